//! Form: a screen holding an ordered list of items.

use std::fmt;
use std::sync::{Arc, Weak};

use lcdui_core::{BindingSlot, ModelId};
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::logging::targets;
use crate::widget::item::StateListener;
use crate::widget::{FormItem, Item, Screen, ScreenBinding, StringItem};

/// Callback receiving user-driven item changes.
pub type ItemStateListener = Arc<dyn Fn(&Arc<dyn FormItem>) + Send + Sync>;

/// Backend side of a [`Form`].
pub trait FormBinding: ScreenBinding {
    /// An item was inserted at `index`.
    fn on_item_added(&self, _index: usize, _item: &Arc<dyn FormItem>) {}

    /// The item formerly at `index` was removed.
    fn on_item_removed(&self, _index: usize, _item: &Arc<dyn FormItem>) {}

    /// The item at `index` was replaced.
    fn on_item_changed(&self, _index: usize, _old: &Arc<dyn FormItem>, _new: &Arc<dyn FormItem>) {}

    /// The user changed the value of the item at `index`.
    fn on_item_state_changed(&self, _index: usize, _item: &Arc<dyn FormItem>) {}

    /// Every item on the form, in order.
    fn items(&self) -> Result<Vec<Arc<dyn FormItem>>> {
        Ok(self.binding_base().view::<Form>()?.items())
    }
}

fn form_as_screen(binding: Arc<dyn FormBinding>) -> Arc<dyn ScreenBinding> {
    binding
}

/// A screen of items laid out top to bottom.
///
/// An item belongs to at most one screen at a time. The form becomes the
/// owner of every item placed on it and gives ownership up again when the
/// item is removed or the form is dropped.
///
/// # Example
///
/// ```
/// use lcdui::prelude::*;
///
/// let form = Form::new(Some("Settings"));
/// let volume = Gauge::new(Some("Volume"), true, 10, 3).unwrap();
/// form.append(volume.clone()).unwrap();
/// form.append_text("Changes apply immediately").unwrap();
///
/// assert_eq!(form.len(), 2);
/// assert_eq!(volume.item().owner(), Some(form.model_id()));
///
/// // A second form cannot take an item that is already placed.
/// let other = Form::new(None);
/// assert!(other.append(volume).is_err());
/// ```
pub struct Form {
    screen: Arc<Screen>,
    items: RwLock<Vec<Arc<dyn FormItem>>>,
    listener: RwLock<Option<ItemStateListener>>,
    state_listener: StateListener,
    slot: Arc<BindingSlot<dyn FormBinding>>,
}

impl Form {
    /// Create an empty form.
    pub fn new(title: Option<&str>) -> Arc<Self> {
        let screen = Screen::new::<Form>(true);
        screen.set_title(title);
        Arc::new_cyclic(|weak: &Weak<Form>| {
            let form = weak.clone();
            let state_listener: StateListener = Arc::new(move |item: &Item| {
                if let Some(form) = form.upgrade() {
                    form.item_state_changed(item.model_id());
                }
            });
            Self {
                slot: BindingSlot::with_parent(
                    weak,
                    screen.model_id(),
                    screen.slot().clone(),
                    form_as_screen,
                ),
                items: RwLock::new(Vec::new()),
                listener: RwLock::new(None),
                state_listener,
                screen,
            }
        })
    }

    /// Create a form holding `items`.
    ///
    /// # Errors
    ///
    /// `IllegalState` if an item is already owned by a screen or listed
    /// twice; no item is taken in that case.
    pub fn with_items(title: Option<&str>, items: Vec<Arc<dyn FormItem>>) -> Result<Arc<Self>> {
        for (index, item) in items.iter().enumerate() {
            check_unowned(item.item())?;
            let id = item.item().model_id();
            if items[..index].iter().any(|other| other.item().model_id() == id) {
                return Err(Error::illegal_state("The same item is listed twice"));
            }
        }

        let form = Self::new(title);
        for item in items {
            form.append(item)?;
        }
        Ok(form)
    }

    /// The screen level of this form.
    pub fn screen(&self) -> &Arc<Screen> {
        &self.screen
    }

    /// The id of this form.
    pub fn model_id(&self) -> ModelId {
        self.screen.model_id()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the form holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// The item at `index`.
    pub fn get(&self, index: usize) -> Result<Arc<dyn FormItem>> {
        let items = self.items.read();
        Error::check_index(index, items.len())?;
        Ok(items[index].clone())
    }

    /// All items in order.
    pub fn items(&self) -> Vec<Arc<dyn FormItem>> {
        self.items.read().clone()
    }

    /// Append an item and return its index.
    pub fn append(&self, item: Arc<dyn FormItem>) -> Result<usize> {
        let index = self.len();
        self.insert(index, item)?;
        Ok(index)
    }

    /// Append a [`StringItem`] showing `text` and return its index.
    pub fn append_text(&self, text: &str) -> Result<usize> {
        self.append(StringItem::new(None, Some(text)))
    }

    /// Insert an item before `index`; `index == len()` appends.
    pub fn insert(&self, index: usize, item: Arc<dyn FormItem>) -> Result<()> {
        check_unowned(item.item())?;
        {
            let mut items = self.items.write();
            Error::check_insert_index(index, items.len())?;
            items.insert(index, item.clone());
        }

        self.adopt(&item);
        tracing::trace!(target: targets::FORM, index, item = ?item.item().model_id(), "item added");
        self.slot.notify(|b| b.on_item_added(index, &item));
        Ok(())
    }

    /// Replace the item at `index`.
    pub fn set(&self, index: usize, item: Arc<dyn FormItem>) -> Result<()> {
        check_unowned(item.item())?;
        let old = {
            let mut items = self.items.write();
            Error::check_index(index, items.len())?;
            std::mem::replace(&mut items[index], item.clone())
        };

        release(&old);
        self.adopt(&item);
        tracing::trace!(target: targets::FORM, index, "item replaced");
        self.slot.notify(|b| b.on_item_changed(index, &old, &item));
        Ok(())
    }

    /// Remove the item at `index`.
    pub fn delete(&self, index: usize) -> Result<()> {
        let item = {
            let mut items = self.items.write();
            Error::check_index(index, items.len())?;
            items.remove(index)
        };

        release(&item);
        tracing::trace!(target: targets::FORM, index, "item removed");
        self.slot.notify(|b| b.on_item_removed(index, &item));
        Ok(())
    }

    /// Remove every item, last to first.
    pub fn delete_all(&self) {
        while let Some(index) = self.len().checked_sub(1) {
            if self.delete(index).is_err() {
                break;
            }
        }
    }

    /// Replace the item state listener; `None` removes it.
    pub fn set_item_state_listener(&self, listener: Option<ItemStateListener>) {
        *self.listener.write() = listener;
    }

    /// Attach a binding, or detach with `None`.
    pub fn attach_binding(&self, binding: Option<Arc<dyn FormBinding>>) {
        self.slot.attach(binding);
    }

    fn adopt(&self, item: &Arc<dyn FormItem>) {
        let base = item.item();
        base.set_state_listener(Some(self.state_listener.clone()));
        base.set_owner(Some(self.model_id()));
    }

    fn item_state_changed(&self, id: ModelId) {
        let found = self
            .items
            .read()
            .iter()
            .enumerate()
            .find(|(_, item)| item.item().model_id() == id)
            .map(|(index, item)| (index, item.clone()));
        let Some((index, item)) = found else {
            return;
        };

        tracing::debug!(target: targets::FORM, index, "item state changed");
        let listener = self.listener.read().clone();
        if let Some(listener) = listener {
            listener(&item);
        }
        self.slot.notify(|b| b.on_item_state_changed(index, &item));
    }
}

fn check_unowned(item: &Item) -> Result<()> {
    match item.owner() {
        Some(owner) => Err(Error::illegal_state(format!(
            "Item is already owned by screen {}",
            owner.as_raw()
        ))),
        None => Ok(()),
    }
}

fn release(item: &Arc<dyn FormItem>) {
    let base = item.item();
    base.set_owner(None);
    base.set_state_listener(None);
}

impl Drop for Form {
    fn drop(&mut self) {
        for item in self.items.get_mut().drain(..) {
            release(&item);
        }
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("id", &self.model_id())
            .field("items", &self.items.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::test_support::Recorder;
    use crate::widget::{Gauge, ItemBinding};

    #[test]
    fn test_append_sets_owner_and_notifies() {
        let form = Form::new(Some("F"));
        let recorder = Recorder::new();
        form.attach_binding(Some(recorder.clone()));

        let text = StringItem::new(None, Some("hi"));
        assert_eq!(form.append(text.clone()).unwrap(), 0);
        assert_eq!(form.append_text("second").unwrap(), 1);

        assert_eq!(text.item().owner(), Some(form.model_id()));
        assert_eq!(form.get(0).unwrap().item().model_id(), text.model_id());
        assert_eq!(recorder.items().unwrap().len(), 2);
        assert_eq!(recorder.events(), vec!["attach", "form_added:0", "form_added:1"]);
    }

    #[test]
    fn test_owned_item_rejected() {
        let first = Form::new(None);
        let second = Form::new(None);
        let text = StringItem::new(None, None);
        first.append(text.clone()).unwrap();

        assert!(matches!(
            second.append(text.clone()),
            Err(Error::IllegalState(_))
        ));
        assert!(matches!(first.append(text), Err(Error::IllegalState(_))));
        assert!(second.is_empty());
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_bad_index_leaves_item_unowned() {
        let form = Form::new(None);
        let text = StringItem::new(None, None);
        assert!(matches!(
            form.insert(1, text.clone()),
            Err(Error::IndexOutOfRange { index: 1, len: 0 })
        ));
        assert_eq!(text.item().owner(), None);
        assert!(form.get(0).is_err());
        assert!(form.delete(0).is_err());
    }

    #[test]
    fn test_delete_and_set_release_ownership() {
        let form = Form::new(None);
        let a = StringItem::new(None, Some("a"));
        let b = StringItem::new(None, Some("b"));
        let c = StringItem::new(None, Some("c"));
        form.append(a.clone()).unwrap();
        form.append(b.clone()).unwrap();

        form.set(0, c.clone()).unwrap();
        assert_eq!(a.item().owner(), None);
        assert_eq!(c.item().owner(), Some(form.model_id()));

        form.delete(1).unwrap();
        assert_eq!(b.item().owner(), None);
        assert_eq!(form.len(), 1);

        // Released items can move to another form.
        let other = Form::new(None);
        other.append(b).unwrap();
    }

    #[test]
    fn test_item_owner_binding_sees_ownership() {
        let form = Form::new(None);
        let gauge = Gauge::new(None, true, 3, 0).unwrap();
        let recorder = Recorder::new();
        gauge.attach_binding(Some(recorder.clone()));

        form.append(gauge.clone()).unwrap();
        assert_eq!(ItemBinding::owner(&*recorder).unwrap(), Some(form.model_id()));
        form.delete(0).unwrap();
        assert_eq!(recorder.events(), vec!["attach", "owner:set", "owner:cleared"]);
    }

    #[test]
    fn test_state_change_reaches_listener_and_binding() {
        let form = Form::new(None);
        let recorder = Recorder::new();
        form.attach_binding(Some(recorder.clone()));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        form.set_item_state_listener(Some(Arc::new(move |item: &Arc<dyn FormItem>| {
            sink.lock().push(item.item().model_id());
        })));

        form.append_text("first").unwrap();
        let gauge = Gauge::new(None, true, 3, 0).unwrap();
        form.append(gauge.clone()).unwrap();

        let item_side = Recorder::new();
        gauge.item().attach_binding(Some(item_side.clone()));
        item_side.notify_state_changed().unwrap();

        assert_eq!(*seen.lock(), vec![gauge.model_id()]);
        assert!(recorder.events().contains(&"form_state:1".to_string()));

        form.delete(1).unwrap();
        item_side.notify_state_changed().unwrap();
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_with_items_validates_first() {
        let owned = StringItem::new(None, None);
        let holder = Form::new(None);
        holder.append(owned.clone()).unwrap();

        let fresh = StringItem::new(None, None);
        let items: Vec<Arc<dyn FormItem>> = vec![fresh.clone() as Arc<dyn FormItem>, owned];
        assert!(Form::with_items(None, items).is_err());
        assert_eq!(fresh.item().owner(), None);

        let twice: Vec<Arc<dyn FormItem>> = vec![fresh.clone() as Arc<dyn FormItem>, fresh.clone()];
        assert!(Form::with_items(None, twice).is_err());

        let form = Form::with_items(Some("ok"), vec![fresh.clone() as Arc<dyn FormItem>]).unwrap();
        assert_eq!(fresh.item().owner(), Some(form.model_id()));
    }

    #[test]
    fn test_dropping_form_releases_items() {
        let text = StringItem::new(None, None);
        {
            let form = Form::new(None);
            form.append(text.clone()).unwrap();
        }
        assert_eq!(text.item().owner(), None);
    }

    #[test]
    fn test_delete_all() {
        let form = Form::new(None);
        let recorder = Recorder::new();
        form.append_text("a").unwrap();
        form.append_text("b").unwrap();
        form.attach_binding(Some(recorder.clone()));

        form.delete_all();
        assert!(form.is_empty());
        assert_eq!(recorder.events(), vec!["attach", "form_removed:1", "form_removed:0"]);
    }
}
