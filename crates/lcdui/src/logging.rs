//! Logging targets for the widget layer.
//!
//! Widget models log through `tracing` under the targets below, next to the
//! binding-level targets of [`lcdui_core::logging::targets`]:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lcdui::choice=debug,lcdui_core::slot=trace")
//!     .init();
//! ```

pub use lcdui_core::logging::{FormatOptions, RegistryDebug};

/// Target names for log filtering.
pub mod targets {
    /// Displayables, screens and plain items.
    pub const WIDGET: &str = "lcdui::widget";
    /// Choice groups, lists and their selection state.
    pub const CHOICE: &str = "lcdui::choice";
    /// Form item ownership and state changes.
    pub const FORM: &str = "lcdui::form";
}
