//! The item level: label, owner screen and state listener.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use lcdui_core::{Binding, BindingSlot, ModelBase, ModelId};
use parking_lot::RwLock;

use crate::error::Result;
use crate::logging::targets;

/// Container-side callback for item state changes.
pub(crate) type StateListener = Arc<dyn Fn(&Item) + Send + Sync>;

/// Backend side of an [`Item`].
pub trait ItemBinding: Binding {
    /// The label changed.
    fn on_label_changed(&self, _old: Option<&str>, _new: Option<&str>) {}

    /// The item was placed into a screen or removed from one.
    fn on_owner_changed(&self, _old: Option<ModelId>, _new: Option<ModelId>) {}

    /// The screen that currently contains the item.
    fn owner(&self) -> Result<Option<ModelId>> {
        Ok(self.binding_base().view::<Item>()?.owner())
    }

    /// Report that the user changed the item's value.
    ///
    /// Reaches the owning container's item state listener, if any.
    fn notify_state_changed(&self) -> Result<()> {
        self.binding_base().view::<Item>()?.notify_state_changed();
        Ok(())
    }
}

/// Anything that can be placed into a form.
pub trait FormItem: Any + Send + Sync {
    /// The item level of this widget.
    fn item(&self) -> &Arc<Item>;
}

/// Base level of every form item.
pub struct Item {
    base: ModelBase,
    label: RwLock<Option<String>>,
    owner: RwLock<Option<ModelId>>,
    state_listener: RwLock<Option<StateListener>>,
    slot: Arc<BindingSlot<dyn ItemBinding>>,
}

impl Item {
    /// Build the item level for an item of type `T`.
    pub(crate) fn new<T: 'static>(label: Option<&str>) -> Arc<Self> {
        let base = ModelBase::new::<T>();
        Arc::new_cyclic(|weak| Self {
            slot: BindingSlot::new(weak, base.id()),
            label: RwLock::new(label.map(str::to_string)),
            owner: RwLock::new(None),
            state_listener: RwLock::new(None),
            base,
        })
    }

    /// The id of this item.
    pub fn model_id(&self) -> ModelId {
        self.base.id()
    }

    /// The item label.
    pub fn label(&self) -> Option<String> {
        self.label.read().clone()
    }

    /// Set or clear the label.
    pub fn set_label(&self, label: Option<&str>) {
        let old = std::mem::replace(&mut *self.label.write(), label.map(str::to_string));
        self.slot.notify(|b| b.on_label_changed(old.as_deref(), label));
    }

    /// The screen that contains this item.
    pub fn owner(&self) -> Option<ModelId> {
        *self.owner.read()
    }

    /// Attach an item-level binding, or detach with `None`.
    pub fn attach_binding(&self, binding: Option<Arc<dyn ItemBinding>>) {
        self.slot.attach(binding);
    }

    pub(crate) fn set_owner(&self, owner: Option<ModelId>) {
        let old = std::mem::replace(&mut *self.owner.write(), owner);
        tracing::trace!(target: targets::WIDGET, item = ?self.base.id(), ?old, new = ?owner, "owner changed");
        self.slot.notify(|b| b.on_owner_changed(old, owner));
    }

    pub(crate) fn set_state_listener(&self, listener: Option<StateListener>) {
        *self.state_listener.write() = listener;
    }

    pub(crate) fn notify_state_changed(&self) {
        let listener = self.state_listener.read().clone();
        if let Some(listener) = listener {
            listener(self);
        }
    }

    pub(crate) fn slot(&self) -> &Arc<BindingSlot<dyn ItemBinding>> {
        &self.slot
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.base.id())
            .field("label", &*self.label.read())
            .field("owner", &*self.owner.read())
            .finish()
    }
}
