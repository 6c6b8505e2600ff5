//! Logging and debugging facilities for lcdui.
//!
//! lcdui uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("lcdui_core::slot=trace")
//!         .init();
//! }
//! ```
//!
//! [`RegistryDebug`] renders the set of live model objects, which is handy
//! when hunting for a model that outlived its screen.

use std::fmt::Write as FmtWrite;

use crate::model::{global_registry, ModelRegistry};

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "lcdui_core";
    /// Binding-side bookkeeping.
    pub const BINDING: &str = "lcdui_core::binding";
    /// Slot attach/detach/notify.
    pub const SLOT: &str = "lcdui_core::slot";
    /// Model registration.
    pub const MODEL: &str = "lcdui_core::model";
}

/// Options for [`RegistryDebug`] output.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Show raw model ids.
    pub show_ids: bool,
    /// Show full type paths instead of the last path segment.
    pub full_type_paths: bool,
    /// Append a per-type count summary.
    pub show_summary: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            show_ids: true,
            full_type_paths: false,
            show_summary: false,
        }
    }
}

impl FormatOptions {
    /// Everything switched on.
    pub fn detailed() -> Self {
        Self {
            show_ids: true,
            full_type_paths: true,
            show_summary: true,
        }
    }

    /// Type names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            full_type_paths: false,
            show_summary: false,
        }
    }
}

/// Debug renderer for the model registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryDebug {
    options: FormatOptions,
}

impl RegistryDebug {
    /// Renderer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer with custom options.
    pub fn with_options(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Format the global registry.
    pub fn format_global(&self) -> String {
        global_registry().with_read(|registry| self.format(registry))
    }

    /// Emit the global registry as one debug event on the core target.
    pub fn log_global(&self) {
        let text = self.format_global();
        tracing::debug!(target: targets::CORE, "{text}");
    }

    /// Format a registry.
    pub fn format(&self, registry: &ModelRegistry) -> String {
        let entries = registry.entries();
        let mut output = String::new();
        writeln!(output, "Models ({} live):", entries.len()).expect("write to String");

        if entries.is_empty() {
            writeln!(output, "  (empty)").expect("write to String");
            return output;
        }

        for (id, type_name) in &entries {
            let name = self.display_name(type_name);
            if self.options.show_ids {
                writeln!(output, "  {name} [{}]", id.as_raw()).expect("write to String");
            } else {
                writeln!(output, "  {name}").expect("write to String");
            }
        }

        if self.options.show_summary {
            let mut counts: Vec<(&str, usize)> = Vec::new();
            for (_, type_name) in &entries {
                let name = self.display_name(type_name);
                match counts.iter_mut().find(|(n, _)| *n == name) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((name, 1)),
                }
            }
            writeln!(output, "Summary:").expect("write to String");
            for (name, count) in counts {
                writeln!(output, "  {name}: {count}").expect("write to String");
            }
        }

        output
    }

    fn display_name<'a>(&self, type_name: &'a str) -> &'a str {
        if self.options.full_type_paths {
            type_name
        } else {
            short_type_name(type_name)
        }
    }
}

/// Strip the module path from a type name, keeping generic arguments intact.
fn short_type_name(type_name: &str) -> &str {
    let head = type_name.split('<').next().unwrap_or(type_name);
    match head.rfind("::") {
        Some(pos) => &type_name[pos + 2..],
        None => type_name,
    }
}
