//! A binding that records every notification it receives as a short string.

use std::sync::Arc;

use lcdui_core::{Binding, BindingBase, ModelId};
use parking_lot::Mutex;

use crate::model::SelectionChange;
use crate::widget::widgets::{
    AlertBinding, AlertTimeout, AlertType, ChoiceGroupBinding, Constraints, FormBinding,
    GaugeBinding, ListBinding, StringItemBinding, TextFieldBinding, Ticker, TickerBinding,
};
use crate::widget::{
    ChoiceBinding, Command, DisplayableBinding, FormItem, Image, ItemBinding, ScreenBinding,
};

#[derive(Default)]
pub(crate) struct Recorder {
    base: BindingBase,
    events: Mutex<Vec<String>>,
}

impl Recorder {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    pub(crate) fn is_attached(&self) -> bool {
        self.base.is_attached()
    }

    fn push(&self, event: impl Into<String>) {
        self.events.lock().push(event.into());
    }
}

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or("none")
}

impl Binding for Recorder {
    fn binding_base(&self) -> &BindingBase {
        &self.base
    }

    fn on_attach(&self) {
        self.push("attach");
    }

    fn on_detach(&self) {
        self.push("detach");
    }
}

impl DisplayableBinding for Recorder {
    fn on_command_added(&self, command: &Arc<Command>) {
        self.push(format!("command_added:{}", command.label()));
    }

    fn on_command_removed(&self, command: &Arc<Command>) {
        self.push(format!("command_removed:{}", command.label()));
    }

    fn on_command_action(&self, command: &Arc<Command>) {
        self.push(format!("command_action:{}", command.label()));
    }
}

impl ScreenBinding for Recorder {
    fn on_title_changed(&self, _old: Option<&str>, new: Option<&str>) {
        self.push(format!("title:{}", or_none(new)));
    }

    fn on_ticker_changed(&self, _old: Option<&Arc<Ticker>>, new: Option<&Arc<Ticker>>) {
        let text = new.map(|ticker| ticker.string());
        self.push(format!("ticker:{}", or_none(text.as_deref())));
    }
}

impl ItemBinding for Recorder {
    fn on_label_changed(&self, _old: Option<&str>, new: Option<&str>) {
        self.push(format!("label:{}", or_none(new)));
    }

    fn on_owner_changed(&self, _old: Option<ModelId>, new: Option<ModelId>) {
        self.push(if new.is_some() { "owner:set" } else { "owner:cleared" });
    }
}

impl StringItemBinding for Recorder {
    fn on_text_changed(&self, _old: Option<&str>, new: Option<&str>) {
        self.push(format!("text:{}", or_none(new)));
    }
}

impl GaugeBinding for Recorder {
    fn on_value_changed(&self, old: i32, new: i32) {
        self.push(format!("gauge_value:{old}->{new}"));
    }

    fn on_max_value_changed(&self, old: i32, new: i32) {
        self.push(format!("gauge_max:{old}->{new}"));
    }
}

impl TextFieldBinding for Recorder {
    fn on_string_changed(&self, _old: &str, new: &str) {
        self.push(format!("tf_string:{new}"));
    }

    fn on_max_size_changed(&self, old: usize, new: usize) {
        self.push(format!("tf_max:{old}->{new}"));
    }

    fn on_constraints_changed(&self, _old: Constraints, new: Constraints) {
        let password = if new.is_password() { "*" } else { "" };
        self.push(format!("tf_constraints:{:?}{password}", new.kind()));
    }
}

impl ChoiceBinding for Recorder {
    fn on_item_added(&self, index: usize, text: &str, _image: Option<&Image>) {
        self.push(format!("added:{index}:{text}"));
    }

    fn on_item_changed(
        &self,
        index: usize,
        old_text: &str,
        _old_image: Option<&Image>,
        new_text: &str,
        _new_image: Option<&Image>,
    ) {
        self.push(format!("changed:{index}:{old_text}->{new_text}"));
    }

    fn on_item_removed(&self, index: usize, text: &str, _image: Option<&Image>) {
        self.push(format!("removed:{index}:{text}"));
    }

    fn on_item_selection_change(&self, change: &SelectionChange) {
        self.push(format!("selection:{}:{}", change.index, change.selected));
    }
}

impl ChoiceGroupBinding for Recorder {}

impl ListBinding for Recorder {}

impl FormBinding for Recorder {
    fn on_item_added(&self, index: usize, _item: &Arc<dyn FormItem>) {
        self.push(format!("form_added:{index}"));
    }

    fn on_item_removed(&self, index: usize, _item: &Arc<dyn FormItem>) {
        self.push(format!("form_removed:{index}"));
    }

    fn on_item_changed(&self, index: usize, _old: &Arc<dyn FormItem>, _new: &Arc<dyn FormItem>) {
        self.push(format!("form_changed:{index}"));
    }

    fn on_item_state_changed(&self, index: usize, _item: &Arc<dyn FormItem>) {
        self.push(format!("form_state:{index}"));
    }
}

impl TickerBinding for Recorder {
    fn on_ticker_string_changed(&self, _old: &str, new: &str) {
        self.push(format!("ticker_string:{new}"));
    }
}

impl AlertBinding for Recorder {
    fn on_alert_string_changed(&self, _old: Option<&str>, new: Option<&str>) {
        self.push(format!("alert_string:{}", or_none(new)));
    }

    fn on_alert_image_changed(&self, _old: Option<&Image>, new: Option<&Image>) {
        self.push(if new.is_some() { "alert_image:some" } else { "alert_image:none" });
    }

    fn on_alert_type_changed(&self, _old: Option<AlertType>, new: Option<AlertType>) {
        self.push(format!("alert_type:{new:?}"));
    }

    fn on_alert_timeout_changed(&self, _old: AlertTimeout, new: AlertTimeout) {
        self.push(format!("alert_timeout:{new:?}"));
    }
}
