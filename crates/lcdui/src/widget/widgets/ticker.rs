//! Scrolling ticker text.

use std::sync::Arc;

use lcdui_core::{Binding, BindingSlot, ModelBase, ModelId};
use parking_lot::RwLock;

/// Backend side of a [`Ticker`].
pub trait TickerBinding: Binding {
    /// The ticker text changed.
    fn on_ticker_string_changed(&self, _old: &str, _new: &str) {}
}

/// A line of text scrolled continuously across the top of a screen.
///
/// One ticker may be shared by several screens.
pub struct Ticker {
    base: ModelBase,
    string: RwLock<String>,
    slot: Arc<BindingSlot<dyn TickerBinding>>,
}

impl Ticker {
    /// Create a ticker showing `text`.
    pub fn new(text: impl Into<String>) -> Arc<Self> {
        let base = ModelBase::new::<Self>();
        Arc::new_cyclic(|weak| Self {
            slot: BindingSlot::new(weak, base.id()),
            string: RwLock::new(text.into()),
            base,
        })
    }

    /// The model id of this ticker.
    pub fn model_id(&self) -> ModelId {
        self.base.id()
    }

    /// The ticker text.
    pub fn string(&self) -> String {
        self.string.read().clone()
    }

    /// Replace the ticker text.
    pub fn set_string(&self, text: &str) {
        let old = std::mem::replace(&mut *self.string.write(), text.to_string());
        self.slot.notify(|b| b.on_ticker_string_changed(&old, text));
    }

    /// Attach a binding, or detach with `None`.
    pub fn attach_binding(&self, binding: Option<Arc<dyn TickerBinding>>) {
        self.slot.attach(binding);
    }
}
