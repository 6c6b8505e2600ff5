//! ChoiceGroup: a choice placed inside a form.

use std::fmt;
use std::sync::Arc;

use lcdui_core::{BindingSlot, ModelId};
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::model::{ChoiceEvent, ChoiceType, ReselectPolicy, SelectableCollection};
use crate::widget::choice::{dispatch_to, sealed};
use crate::widget::{Choice, ChoiceBinding, FormItem, Image, Item, ItemBinding};

/// Backend side of a [`ChoiceGroup`].
pub trait ChoiceGroupBinding: ItemBinding + ChoiceBinding {
    /// The selection type of the group.
    fn choice_type(&self) -> Result<ChoiceType> {
        Ok(self.binding_base().view::<ChoiceGroup>()?.choice_type())
    }

    /// Apply a selection made by the user.
    ///
    /// Unlike [`Choice::set_selected_index`], this also reports the change to
    /// the owning form's item state listener.
    fn select_element(&self, index: usize, selected: bool) -> Result<()> {
        let group = self.binding_base().view::<ChoiceGroup>()?;
        group.set_selected_index(index, selected)?;
        group.item().notify_state_changed();
        Ok(())
    }
}

fn choice_group_as_item(binding: Arc<dyn ChoiceGroupBinding>) -> Arc<dyn ItemBinding> {
    binding
}

/// A group of selectable elements within a form.
///
/// Choice groups are either [`Exclusive`](ChoiceType::Exclusive) or
/// [`Multiple`](ChoiceType::Multiple); implicit selection is reserved for
/// lists.
///
/// # Example
///
/// ```
/// use lcdui::prelude::*;
///
/// let group = ChoiceGroup::builder(ChoiceType::Exclusive)
///     .label("Size")
///     .element("Small", None)
///     .element("Large", None)
///     .build()
///     .unwrap();
///
/// assert_eq!(group.selected_index(), Some(0));
/// group.set_selected_index(1, true).unwrap();
/// assert_eq!(group.string(group.selected_index().unwrap()).unwrap(), "Large");
/// ```
pub struct ChoiceGroup {
    item: Arc<Item>,
    choices: RwLock<SelectableCollection>,
    slot: Arc<BindingSlot<dyn ChoiceGroupBinding>>,
}

impl ChoiceGroup {
    /// Create an empty choice group.
    pub fn new(label: Option<&str>, choice_type: ChoiceType) -> Result<Arc<Self>> {
        let mut builder = Self::builder(choice_type);
        builder.label = label.map(str::to_string);
        builder.build()
    }

    /// Create a choice group from parallel text and image arrays.
    ///
    /// `images`, when given, must have the same length as `texts`.
    pub fn with_elements(
        label: Option<&str>,
        choice_type: ChoiceType,
        texts: &[&str],
        images: Option<&[Option<Image>]>,
    ) -> Result<Arc<Self>> {
        if let Some(images) = images
            && images.len() != texts.len()
        {
            return Err(Error::invalid_argument(format!(
                "{} images given for {} elements",
                images.len(),
                texts.len()
            )));
        }

        let mut builder = Self::builder(choice_type);
        builder.label = label.map(str::to_string);
        for (index, text) in texts.iter().enumerate() {
            let image = images.and_then(|images| images[index].clone());
            builder = builder.element(*text, image);
        }
        builder.build()
    }

    /// Start building a choice group.
    pub fn builder(choice_type: ChoiceType) -> ChoiceGroupBuilder {
        ChoiceGroupBuilder::new(choice_type)
    }

    /// The item level of this group.
    pub fn item(&self) -> &Arc<Item> {
        &self.item
    }

    /// The id of this group.
    pub fn model_id(&self) -> ModelId {
        self.item.model_id()
    }

    /// Attach a binding, or detach with `None`.
    pub fn attach_binding(&self, binding: Option<Arc<dyn ChoiceGroupBinding>>) {
        self.slot.attach(binding);
    }
}

impl sealed::ChoiceModel for ChoiceGroup {
    fn collection(&self) -> &RwLock<SelectableCollection> {
        &self.choices
    }

    fn dispatch(&self, events: &[ChoiceEvent]) {
        dispatch_to(&self.slot, events);
    }
}

impl Choice for ChoiceGroup {}

impl FormItem for ChoiceGroup {
    fn item(&self) -> &Arc<Item> {
        &self.item
    }
}

impl fmt::Debug for ChoiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let choices = self.choices.read();
        f.debug_struct("ChoiceGroup")
            .field("id", &self.item.model_id())
            .field("type", &choices.choice_type())
            .field("len", &choices.len())
            .finish()
    }
}

/// Builder for [`ChoiceGroup`].
#[derive(Debug, Clone)]
pub struct ChoiceGroupBuilder {
    label: Option<String>,
    choice_type: ChoiceType,
    policy: ReselectPolicy,
    elements: Vec<(String, Option<Image>)>,
}

impl ChoiceGroupBuilder {
    /// Creates a builder for an empty group of the given type.
    pub fn new(choice_type: ChoiceType) -> Self {
        Self {
            label: None,
            choice_type,
            policy: ReselectPolicy::default(),
            elements: Vec::new(),
        }
    }

    /// Sets the item label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets how a replacement is chosen when the selected element is deleted.
    pub fn reselect_policy(mut self, policy: ReselectPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Adds an initial element.
    pub fn element(mut self, text: impl Into<String>, image: Option<Image>) -> Self {
        self.elements.push((text.into(), image));
        self
    }

    /// Creates the group.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the type is implicit or an element image is
    /// mutable.
    pub fn build(self) -> Result<Arc<ChoiceGroup>> {
        if self.choice_type == ChoiceType::Implicit {
            return Err(Error::invalid_argument(
                "Cannot create choice group with implicit type",
            ));
        }

        let mut choices = SelectableCollection::with_policy(self.choice_type, self.policy);
        for (text, image) in self.elements {
            choices.append(&text, image)?;
        }

        let item = Item::new::<ChoiceGroup>(self.label.as_deref());
        Ok(Arc::new_cyclic(|weak| ChoiceGroup {
            slot: BindingSlot::with_parent(
                weak,
                item.model_id(),
                item.slot().clone(),
                choice_group_as_item,
            ),
            choices: RwLock::new(choices),
            item,
        }))
    }
}
