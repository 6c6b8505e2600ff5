//! The choice family: operations shared by choice groups and lists.

use lcdui_core::{Binding, BindingSlot};
use parking_lot::RwLock;

use super::image::Image;
use crate::error::Result;
use crate::logging::targets;
use crate::model::{ChoiceEvent, ChoiceType, SelectableCollection, SelectionChange};

/// Element notifications common to every choice widget.
pub trait ChoiceBinding: Binding {
    /// An element was inserted at `index`.
    fn on_item_added(&self, _index: usize, _text: &str, _image: Option<&Image>) {}

    /// The element at `index` got new content.
    fn on_item_changed(
        &self,
        _index: usize,
        _old_text: &str,
        _old_image: Option<&Image>,
        _new_text: &str,
        _new_image: Option<&Image>,
    ) {
    }

    /// The element formerly at `index` was removed.
    fn on_item_removed(&self, _index: usize, _text: &str, _image: Option<&Image>) {}

    /// An element's selection flag was written.
    fn on_item_selection_change(&self, _change: &SelectionChange) {}
}

pub(crate) mod sealed {
    use super::*;

    /// Storage behind a [`Choice`](super::Choice) implementation.
    pub trait ChoiceModel {
        fn collection(&self) -> &RwLock<SelectableCollection>;

        /// Forward events to the binding. Called with no lock held.
        fn dispatch(&self, events: &[ChoiceEvent]);
    }
}

/// Deliver `events` to whatever binding `slot` holds, in order.
pub(crate) fn dispatch_to<B>(slot: &BindingSlot<B>, events: &[ChoiceEvent])
where
    B: ChoiceBinding + ?Sized,
{
    for event in events {
        tracing::trace!(target: targets::CHOICE, ?event, "choice event");
        slot.notify(|binding| deliver(binding, event));
    }
}

fn deliver<B: ChoiceBinding + ?Sized>(binding: &B, event: &ChoiceEvent) {
    match event {
        ChoiceEvent::Added { index, text, image } => {
            binding.on_item_added(*index, text, image.as_ref());
        }
        ChoiceEvent::Changed {
            index,
            old_text,
            old_image,
            new_text,
            new_image,
        } => binding.on_item_changed(
            *index,
            old_text,
            old_image.as_ref(),
            new_text,
            new_image.as_ref(),
        ),
        ChoiceEvent::Removed { index, text, image } => {
            binding.on_item_removed(*index, text, image.as_ref());
        }
        ChoiceEvent::SelectionChanged(change) => binding.on_item_selection_change(change),
    }
}

/// A widget presenting a selectable list of text/image elements.
///
/// Every mutator forwards the changes it made to the widget's binding before
/// returning. See [`SelectableCollection`] for the selection rules.
pub trait Choice: sealed::ChoiceModel {
    /// The selection type.
    fn choice_type(&self) -> ChoiceType {
        self.collection().read().choice_type()
    }

    /// Number of elements.
    fn len(&self) -> usize {
        self.collection().read().len()
    }

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.collection().read().is_empty()
    }

    /// The text part of element `index`.
    fn string(&self, index: usize) -> Result<String> {
        self.collection().read().string(index).map(str::to_string)
    }

    /// The image part of element `index`.
    fn image(&self, index: usize) -> Result<Option<Image>> {
        self.collection().read().image(index).map(|image| image.cloned())
    }

    /// Append an element and return its index.
    fn append(&self, text: &str, image: Option<Image>) -> Result<usize> {
        let (index, events) = self.collection().write().append(text, image)?;
        self.dispatch(&events);
        Ok(index)
    }

    /// Insert an element before `index`.
    fn insert(&self, index: usize, text: &str, image: Option<Image>) -> Result<()> {
        let events = self.collection().write().insert(index, text, image)?;
        self.dispatch(&events);
        Ok(())
    }

    /// Replace the content of element `index`.
    fn set(&self, index: usize, text: &str, image: Option<Image>) -> Result<()> {
        let events = self.collection().write().set(index, text, image)?;
        self.dispatch(&events);
        Ok(())
    }

    /// Remove element `index`.
    fn delete(&self, index: usize) -> Result<()> {
        let events = self.collection().write().delete(index)?;
        self.dispatch(&events);
        Ok(())
    }

    /// Remove every element.
    fn delete_all(&self) {
        let events = self.collection().write().delete_all();
        self.dispatch(&events);
    }

    /// Whether element `index` is selected.
    fn is_selected(&self, index: usize) -> Result<bool> {
        self.collection().read().is_selected(index)
    }

    /// The selected element of a single-selection widget.
    fn selected_index(&self) -> Option<usize> {
        self.collection().read().selected_index()
    }

    /// The selection flag of every element.
    fn selected_flags(&self) -> Vec<bool> {
        self.collection().read().selected_flags()
    }

    /// Copy the selection flags into `out` and return the selected count.
    fn fill_selected_flags(&self, out: &mut [bool]) -> Result<usize> {
        self.collection().read().fill_selected_flags(out)
    }

    /// Number of selected elements.
    fn selected_count(&self) -> usize {
        self.collection().read().selected_count()
    }

    /// Write the selection flag of element `index`.
    fn set_selected_index(&self, index: usize, selected: bool) -> Result<()> {
        let events = self
            .collection()
            .write()
            .set_selected_index(index, selected)?;
        self.dispatch(&events);
        Ok(())
    }

    /// Write the selection flags of all elements.
    fn set_selected_flags(&self, flags: &[bool]) -> Result<()> {
        let events = self.collection().write().set_selected_flags(flags)?;
        self.dispatch(&events);
        Ok(())
    }
}
