//! The screen level: title and ticker.

use std::sync::Arc;

use lcdui_core::{BindingSlot, ModelId};
use parking_lot::RwLock;

use super::displayable::{Displayable, DisplayableBinding};
use super::widgets::Ticker;

/// Backend side of a [`Screen`].
pub trait ScreenBinding: DisplayableBinding {
    /// The title changed.
    fn on_title_changed(&self, _old: Option<&str>, _new: Option<&str>) {}

    /// The ticker changed.
    fn on_ticker_changed(&self, _old: Option<&Arc<Ticker>>, _new: Option<&Arc<Ticker>>) {}
}

fn screen_as_displayable(binding: Arc<dyn ScreenBinding>) -> Arc<dyn DisplayableBinding> {
    binding
}

/// High-level screen base shared by forms, lists and alerts.
pub struct Screen {
    displayable: Arc<Displayable>,
    title: RwLock<Option<String>>,
    ticker: RwLock<Option<Arc<Ticker>>>,
    slot: Arc<BindingSlot<dyn ScreenBinding>>,
}

impl Screen {
    pub(crate) fn new<T: 'static>(accepts_commands: bool) -> Arc<Self> {
        let displayable = Displayable::new::<T>(accepts_commands);
        Arc::new_cyclic(|weak| Self {
            slot: BindingSlot::with_parent(
                weak,
                displayable.model_id(),
                displayable.slot().clone(),
                screen_as_displayable,
            ),
            title: RwLock::new(None),
            ticker: RwLock::new(None),
            displayable,
        })
    }

    /// The displayable level of this screen.
    pub fn displayable(&self) -> &Arc<Displayable> {
        &self.displayable
    }

    /// The id of this screen.
    pub fn model_id(&self) -> ModelId {
        self.displayable.model_id()
    }

    /// The screen title.
    pub fn title(&self) -> Option<String> {
        self.title.read().clone()
    }

    /// Set or clear the title.
    pub fn set_title(&self, title: Option<&str>) {
        let old = std::mem::replace(&mut *self.title.write(), title.map(str::to_string));
        self.slot.notify(|b| b.on_title_changed(old.as_deref(), title));
    }

    /// The ticker shown above the screen.
    pub fn ticker(&self) -> Option<Arc<Ticker>> {
        self.ticker.read().clone()
    }

    /// Set or clear the ticker.
    pub fn set_ticker(&self, ticker: Option<Arc<Ticker>>) {
        let old = std::mem::replace(&mut *self.ticker.write(), ticker.clone());
        self.slot
            .notify(|b| b.on_ticker_changed(old.as_ref(), ticker.as_ref()));
    }

    /// Attach a screen-level binding, or detach with `None`.
    pub fn attach_binding(&self, binding: Option<Arc<dyn ScreenBinding>>) {
        self.slot.attach(binding);
    }

    pub(crate) fn slot(&self) -> &Arc<BindingSlot<dyn ScreenBinding>> {
        &self.slot
    }
}
