//! Bindings: the backend side of the binding system.
//!
//! A binding is an observer that a rendering backend attaches to a model
//! object. Every binding type embeds a [`BindingBase`], which records which
//! model and which slot the binding currently serves. Those records are plain
//! non-owning handles: a binding never keeps its model alive.
//!
//! A binding family is declared as a trait extending [`Binding`], with one
//! default no-op method per observable mutation:
//!
//! ```
//! use lcdui_core::{Binding, BindingBase};
//!
//! trait CounterBinding: Binding {
//!     fn on_value_changed(&self, _old: i32, _new: i32) {}
//! }
//!
//! #[derive(Default)]
//! struct LoggingBinding {
//!     base: BindingBase,
//! }
//!
//! impl Binding for LoggingBinding {
//!     fn binding_base(&self) -> &BindingBase {
//!         &self.base
//!     }
//! }
//!
//! impl CounterBinding for LoggingBinding {
//!     fn on_value_changed(&self, old: i32, new: i32) {
//!         println!("{old} -> {new}");
//!     }
//! }
//!
//! let binding = LoggingBinding::default();
//! assert!(!binding.binding_base().is_attached());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::error::{BindingError, BindingResult};
use crate::logging::targets;
use crate::model::ModelId;
use crate::slot::{SlotId, SlotRelease};

/// A weak, type-erased view of one class level of a model.
pub type ModelView = Weak<dyn Any + Send + Sync>;

/// The base trait of every binding family.
///
/// Implementors only provide [`binding_base`](Self::binding_base); the
/// lifecycle hooks default to no-ops. Each hook runs exactly once per
/// attach/detach transition.
pub trait Binding: Send + Sync + 'static {
    /// The attachment bookkeeping of this binding.
    fn binding_base(&self) -> &BindingBase;

    /// Called after the binding has been installed in a slot.
    fn on_attach(&self) {}

    /// Called when the binding is leaving its slot.
    ///
    /// The binding is still attached while this runs, so it can read back
    /// into the model one last time.
    fn on_detach(&self) {}
}

/// The binding's record of where it is currently attached.
pub(crate) struct Attachment {
    pub(crate) model: ModelId,
    pub(crate) slot_id: SlotId,
    pub(crate) slot: Weak<dyn SlotRelease>,
    /// Owner views of the slot chain, most derived level first.
    pub(crate) views: Vec<ModelView>,
}

/// Attachment state embedded in every binding.
///
/// `attached_model()` is `Some` exactly when `owner_slot()` is `Some`.
#[derive(Default)]
pub struct BindingBase {
    attachment: Mutex<Option<Attachment>>,
}

impl BindingBase {
    /// Create a detached binding base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while the binding is installed in a slot.
    pub fn is_attached(&self) -> bool {
        self.attachment.lock().is_some()
    }

    /// The model the binding currently serves.
    pub fn attached_model(&self) -> Option<ModelId> {
        self.attachment.lock().as_ref().map(|a| a.model)
    }

    /// The slot that currently holds the binding.
    pub fn owner_slot(&self) -> Option<SlotId> {
        self.attachment.lock().as_ref().map(|a| a.slot_id)
    }

    /// Fail with [`BindingError::Detached`] unless attached.
    ///
    /// Every binding operation that reads back into its model starts with
    /// this guard.
    pub fn check_attached(&self) -> BindingResult<ModelId> {
        self.attached_model().ok_or(BindingError::Detached)
    }

    /// Reach back into the attached model through one of its class levels.
    ///
    /// A binding attached to a derived model (a choice group, say) can ask
    /// for the derived model itself or for any base level of it (the item
    /// the group is built on).
    pub fn view<M: Any + Send + Sync>(&self) -> BindingResult<Arc<M>> {
        let views = match self.attachment.lock().as_ref() {
            Some(attachment) => attachment.views.clone(),
            None => return Err(BindingError::Detached),
        };

        let mut any_alive = false;
        for view in &views {
            if let Some(strong) = view.upgrade() {
                any_alive = true;
                if let Ok(model) = strong.downcast::<M>() {
                    return Ok(model);
                }
            }
        }

        if any_alive {
            Err(BindingError::ViewUnavailable {
                expected: std::any::type_name::<M>(),
            })
        } else {
            Err(BindingError::ModelDropped)
        }
    }

    /// Detach the binding from wherever it is attached.
    ///
    /// Equivalent to clearing the owner slot. Does nothing when the binding
    /// is already detached, so `on_detach` never runs twice.
    pub fn detach(&self) {
        let slot = match self.attachment.lock().as_ref() {
            Some(attachment) => attachment.slot.upgrade(),
            None => return,
        };

        match slot {
            Some(slot) => slot.release(),
            None => {
                // Owner slot is already gone; only the stale record remains.
                tracing::trace!(target: targets::BINDING, "dropping stale attachment");
                self.attachment.lock().take();
            }
        }
    }

    pub(crate) fn set_attachment(&self, attachment: Attachment) {
        *self.attachment.lock() = Some(attachment);
    }

    /// Clear the record, but only if `slot` still owns the binding.
    pub(crate) fn clear_attachment_if_owned_by(&self, slot: SlotId) {
        let mut guard = self.attachment.lock();
        if guard.as_ref().is_some_and(|a| a.slot_id == slot) {
            *guard = None;
        }
    }
}

impl fmt::Debug for BindingBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.attachment.lock();
        f.debug_struct("BindingBase")
            .field("attached_model", &guard.as_ref().map(|a| a.model))
            .field("owner_slot", &guard.as_ref().map(|a| a.slot_id))
            .finish()
    }
}
