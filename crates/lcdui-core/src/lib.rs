//! Core binding system for lcdui.
//!
//! This crate provides the protocol every lcdui widget is built on: a model
//! object owns a [`BindingSlot`], a rendering backend provides a
//! [`Binding`], and the slot makes sure that
//!
//! - at most one binding is attached to a slot at a time,
//! - attaching a binding somewhere moves it there, detaching it from its
//!   previous slot first,
//! - every state change of the model reaches the attached binding
//!   synchronously, before the mutator returns,
//! - a binding can read back into its model only while it is attached.
//!
//! # Modules
//!
//! - [`binding`] - The [`Binding`] trait and the [`BindingBase`] bookkeeping
//! - [`slot`] - [`BindingSlot`] and slot chains for layered model types
//! - [`model`] - The model registry and non-owning [`ModelId`] handles
//! - [`logging`] - Tracing targets and registry debug output
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use lcdui_core::{Binding, BindingBase, BindingSlot, ModelBase};
//!
//! trait LabelBinding: Binding {
//!     fn on_label_changed(&self, _old: &str, _new: &str) {}
//! }
//!
//! struct Label {
//!     base: ModelBase,
//!     text: Mutex<String>,
//!     slot: Arc<BindingSlot<dyn LabelBinding>>,
//! }
//!
//! impl Label {
//!     fn new() -> Arc<Self> {
//!         let base = ModelBase::new::<Self>();
//!         Arc::new_cyclic(|weak| Self {
//!             slot: BindingSlot::new(weak, base.id()),
//!             text: Mutex::new(String::new()),
//!             base,
//!         })
//!     }
//!
//!     fn set_text(&self, text: &str) {
//!         let old = std::mem::replace(&mut *self.text.lock(), text.to_string());
//!         self.slot.notify(|b| b.on_label_changed(&old, text));
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Backend {
//!     base: BindingBase,
//!     seen: Mutex<Vec<String>>,
//! }
//!
//! impl Binding for Backend {
//!     fn binding_base(&self) -> &BindingBase {
//!         &self.base
//!     }
//! }
//!
//! impl LabelBinding for Backend {
//!     fn on_label_changed(&self, _old: &str, new: &str) {
//!         self.seen.lock().push(new.to_string());
//!     }
//! }
//!
//! let label = Label::new();
//! let backend = Arc::new(Backend::default());
//! label.slot.attach(Some(backend.clone()));
//!
//! label.set_text("hello");
//! assert_eq!(*backend.seen.lock(), vec!["hello".to_string()]);
//!
//! // The backend can reach the model while attached.
//! let model = backend.base.view::<Label>().unwrap();
//! assert_eq!(*model.text.lock(), "hello");
//! ```

pub mod binding;
mod error;
pub mod logging;
pub mod model;
pub mod slot;

pub use binding::{Binding, BindingBase, ModelView};
pub use error::{BindingError, BindingResult};
pub use logging::{FormatOptions, RegistryDebug};
pub use model::{global_registry, ModelBase, ModelId, ModelRegistry, SharedModelRegistry};
pub use slot::{BindingSlot, SlotId};

static_assertions::assert_impl_all!(BindingBase: Send, Sync);
static_assertions::assert_impl_all!(ModelBase: Send, Sync);
