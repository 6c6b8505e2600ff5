//! lcdui - the widget model layer of a MIDP-style user interface.
//!
//! This crate holds the state of screens and form items and keeps a
//! rendering backend informed about every change through the binding
//! protocol of [`lcdui_core`]. It draws nothing itself.
//!
//! # Modules
//!
//! - [`widget`] - Displayables, screens, items and the concrete widgets
//! - [`model`] - The selectable collection behind choice groups and lists
//! - [`error`] - The crate error type
//! - [`logging`] - Tracing targets
//! - [`prelude`] - Common imports
//!
//! # Example
//!
//! ```
//! use lcdui::prelude::*;
//!
//! let colors = ChoiceGroup::with_elements(
//!     Some("Color"),
//!     ChoiceType::Exclusive,
//!     &["Red", "Green", "Blue"],
//!     None,
//! )
//! .unwrap();
//!
//! // An exclusive group always has exactly one selected element.
//! assert_eq!(colors.selected_index(), Some(0));
//! colors.set_selected_index(2, true).unwrap();
//! assert_eq!(colors.selected_flags(), vec![false, false, true]);
//! ```

pub mod error;
pub mod logging;
pub mod model;
pub mod prelude;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
pub use lcdui_core::{global_registry, Binding, BindingBase, BindingError, ModelId};

static_assertions::assert_impl_all!(widget::Alert: Send, Sync);
static_assertions::assert_impl_all!(widget::ChoiceGroup: Send, Sync);
static_assertions::assert_impl_all!(widget::Form: Send, Sync);
static_assertions::assert_impl_all!(widget::Gauge: Send, Sync);
static_assertions::assert_impl_all!(widget::List: Send, Sync);
static_assertions::assert_impl_all!(widget::TextField: Send, Sync);
static_assertions::assert_impl_all!(model::SelectableCollection: Send, Sync);
