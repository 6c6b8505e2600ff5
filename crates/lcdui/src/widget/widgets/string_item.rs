//! StringItem: static text in a form.

use std::sync::Arc;

use lcdui_core::{BindingSlot, ModelId};
use parking_lot::RwLock;

use crate::widget::{FormItem, Item, ItemBinding};

/// Backend side of a [`StringItem`].
pub trait StringItemBinding: ItemBinding {
    /// The text changed.
    fn on_text_changed(&self, _old: Option<&str>, _new: Option<&str>) {}
}

fn string_item_as_item(binding: Arc<dyn StringItemBinding>) -> Arc<dyn ItemBinding> {
    binding
}

/// A labelled piece of read-only text.
pub struct StringItem {
    item: Arc<Item>,
    text: RwLock<Option<String>>,
    slot: Arc<BindingSlot<dyn StringItemBinding>>,
}

impl StringItem {
    /// Create a string item.
    pub fn new(label: Option<&str>, text: Option<&str>) -> Arc<Self> {
        let item = Item::new::<StringItem>(label);
        Arc::new_cyclic(|weak| Self {
            slot: BindingSlot::with_parent(
                weak,
                item.model_id(),
                item.slot().clone(),
                string_item_as_item,
            ),
            text: RwLock::new(text.map(str::to_string)),
            item,
        })
    }

    /// The item level.
    pub fn item(&self) -> &Arc<Item> {
        &self.item
    }

    /// The id of this item.
    pub fn model_id(&self) -> ModelId {
        self.item.model_id()
    }

    /// The text.
    pub fn text(&self) -> Option<String> {
        self.text.read().clone()
    }

    /// Set or clear the text.
    pub fn set_text(&self, text: Option<&str>) {
        let old = std::mem::replace(&mut *self.text.write(), text.map(str::to_string));
        self.slot.notify(|b| b.on_text_changed(old.as_deref(), text));
    }

    /// Attach a binding, or detach with `None`.
    pub fn attach_binding(&self, binding: Option<Arc<dyn StringItemBinding>>) {
        self.slot.attach(binding);
    }
}

impl FormItem for StringItem {
    fn item(&self) -> &Arc<Item> {
        &self.item
    }
}
