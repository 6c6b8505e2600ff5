//! Gauge: a bounded integer value shown as a bar.

use std::sync::Arc;

use lcdui_core::{BindingSlot, ModelId};
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::widget::{FormItem, Item, ItemBinding};

/// Backend side of a [`Gauge`].
pub trait GaugeBinding: ItemBinding {
    /// The current value changed.
    fn on_value_changed(&self, _old: i32, _new: i32) {}

    /// The maximum value changed.
    fn on_max_value_changed(&self, _old: i32, _new: i32) {}
}

fn gauge_as_item(binding: Arc<dyn GaugeBinding>) -> Arc<dyn ItemBinding> {
    binding
}

#[derive(Debug, Clone, Copy)]
struct GaugeState {
    value: i32,
    max_value: i32,
}

/// A value in `0..=max_value`.
///
/// Values written outside the range are clamped into it.
pub struct Gauge {
    item: Arc<Item>,
    interactive: bool,
    state: Mutex<GaugeState>,
    slot: Arc<BindingSlot<dyn GaugeBinding>>,
}

impl Gauge {
    /// Create a gauge.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `max_value` is negative.
    pub fn new(
        label: Option<&str>,
        interactive: bool,
        max_value: i32,
        initial_value: i32,
    ) -> Result<Arc<Self>> {
        check_max(max_value)?;
        let item = Item::new::<Gauge>(label);
        Ok(Arc::new_cyclic(|weak| Self {
            slot: BindingSlot::with_parent(weak, item.model_id(), item.slot().clone(), gauge_as_item),
            interactive,
            state: Mutex::new(GaugeState {
                value: initial_value.clamp(0, max_value),
                max_value,
            }),
            item,
        }))
    }

    /// The item level.
    pub fn item(&self) -> &Arc<Item> {
        &self.item
    }

    /// The id of this gauge.
    pub fn model_id(&self) -> ModelId {
        self.item.model_id()
    }

    /// Whether the user may change the value.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// The current value.
    pub fn value(&self) -> i32 {
        self.state.lock().value
    }

    /// The maximum value.
    pub fn max_value(&self) -> i32 {
        self.state.lock().max_value
    }

    /// Set the value, clamped into `0..=max_value`.
    pub fn set_value(&self, value: i32) {
        let (old, new) = {
            let mut state = self.state.lock();
            let old = state.value;
            state.value = value.clamp(0, state.max_value);
            (old, state.value)
        };
        self.slot.notify(|b| b.on_value_changed(old, new));
    }

    /// Set the maximum value.
    ///
    /// A current value above the new maximum is lowered to it first, with
    /// its own value notification.
    pub fn set_max_value(&self, max_value: i32) -> Result<()> {
        check_max(max_value)?;

        if self.value() > max_value {
            self.set_value(max_value);
        }

        let old = std::mem::replace(&mut self.state.lock().max_value, max_value);
        self.slot.notify(|b| b.on_max_value_changed(old, max_value));
        Ok(())
    }

    /// Attach a binding, or detach with `None`.
    pub fn attach_binding(&self, binding: Option<Arc<dyn GaugeBinding>>) {
        self.slot.attach(binding);
    }
}

fn check_max(max_value: i32) -> Result<()> {
    if max_value < 0 {
        return Err(Error::invalid_argument(format!(
            "Max value cannot be less than zero, got {max_value}"
        )));
    }
    Ok(())
}

impl FormItem for Gauge {
    fn item(&self) -> &Arc<Item> {
        &self.item
    }
}
