//! List: a full-screen choice.

use std::fmt;
use std::sync::{Arc, LazyLock};

use lcdui_core::{BindingSlot, ModelId};
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::logging::targets;
use crate::model::{ChoiceEvent, ChoiceType, SelectableCollection};
use crate::widget::choice::{dispatch_to, sealed};
use crate::widget::{Choice, ChoiceBinding, Command, CommandKind, Image, Screen, ScreenBinding};

static SELECT_COMMAND: LazyLock<Arc<Command>> =
    LazyLock::new(|| Command::new("", CommandKind::Screen, 0));

/// The command delivered when the user selects an element of an implicit
/// list.
///
/// The same instance is returned for the lifetime of the process, so
/// listeners can compare against it with `Arc::ptr_eq`.
pub fn select_command() -> &'static Arc<Command> {
    &SELECT_COMMAND
}

/// Backend side of a [`List`].
pub trait ListBinding: ScreenBinding + ChoiceBinding {
    /// The selection type of the list.
    fn choice_type(&self) -> Result<ChoiceType> {
        Ok(self.binding_base().view::<List>()?.choice_type())
    }

    /// Apply a selection made by the user.
    ///
    /// Selecting an element of an implicit list also delivers the list's
    /// select command to the command listener.
    fn select_element(&self, index: usize, selected: bool) -> Result<()> {
        self.binding_base()
            .view::<List>()?
            .apply_user_selection(index, selected)
    }
}

fn list_as_screen(binding: Arc<dyn ListBinding>) -> Arc<dyn ScreenBinding> {
    binding
}

/// A screen showing a list of choices.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lcdui::prelude::*;
///
/// let menu = List::new(Some("Menu"), ChoiceType::Implicit);
/// menu.append("Play", None).unwrap();
/// menu.append("Quit", None).unwrap();
///
/// assert_eq!(menu.selected_index(), Some(0));
/// assert!(Arc::ptr_eq(&menu.select_command(), select_command()));
/// ```
pub struct List {
    screen: Arc<Screen>,
    choices: RwLock<SelectableCollection>,
    select_command: RwLock<Arc<Command>>,
    slot: Arc<BindingSlot<dyn ListBinding>>,
}

impl List {
    /// Create an empty list.
    pub fn new(title: Option<&str>, list_type: ChoiceType) -> Arc<Self> {
        Self::build(title, SelectableCollection::new(list_type))
    }

    /// Create a list from parallel text and image arrays.
    ///
    /// `images`, when given, must have the same length as `texts`.
    pub fn with_elements(
        title: Option<&str>,
        list_type: ChoiceType,
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

        let mut choices = SelectableCollection::new(list_type);
        for (index, text) in texts.iter().enumerate() {
            let image = images.and_then(|images| images[index].clone());
            choices.append(text, image)?;
        }
        Ok(Self::build(title, choices))
    }

    /// Create an empty list with its own reselect policy.
    pub fn with_collection(title: Option<&str>, choices: SelectableCollection) -> Result<Arc<Self>> {
        if !choices.is_empty() {
            return Err(Error::invalid_argument(
                "A list must start from an empty collection",
            ));
        }
        Ok(Self::build(title, choices))
    }

    fn build(title: Option<&str>, choices: SelectableCollection) -> Arc<Self> {
        let screen = Screen::new::<List>(true);
        screen.set_title(title);
        Arc::new_cyclic(|weak| Self {
            slot: BindingSlot::with_parent(
                weak,
                screen.model_id(),
                screen.slot().clone(),
                list_as_screen,
            ),
            choices: RwLock::new(choices),
            select_command: RwLock::new(select_command().clone()),
            screen,
        })
    }

    /// The screen level of this list.
    pub fn screen(&self) -> &Arc<Screen> {
        &self.screen
    }

    /// The id of this list.
    pub fn model_id(&self) -> ModelId {
        self.screen.model_id()
    }

    /// The command fired by user selection in an implicit list.
    pub fn select_command(&self) -> Arc<Command> {
        self.select_command.read().clone()
    }

    /// Replace the command fired by user selection; `None` restores the
    /// shared [`select_command`].
    pub fn set_select_command(&self, command: Option<Arc<Command>>) {
        *self.select_command.write() = command.unwrap_or_else(|| select_command().clone());
    }

    /// Attach a binding, or detach with `None`.
    pub fn attach_binding(&self, binding: Option<Arc<dyn ListBinding>>) {
        self.slot.attach(binding);
    }

    fn apply_user_selection(&self, index: usize, selected: bool) -> Result<()> {
        self.set_selected_index(index, selected)?;
        if selected && self.choice_type() == ChoiceType::Implicit {
            let command = self.select_command();
            tracing::debug!(target: targets::CHOICE, index, "implicit selection");
            self.screen.displayable().invoke_command(&command);
        }
        Ok(())
    }
}

impl sealed::ChoiceModel for List {
    fn collection(&self) -> &RwLock<SelectableCollection> {
        &self.choices
    }

    fn dispatch(&self, events: &[ChoiceEvent]) {
        dispatch_to(&self.slot, events);
    }
}

impl Choice for List {}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let choices = self.choices.read();
        f.debug_struct("List")
            .field("id", &self.model_id())
            .field("type", &choices.choice_type())
            .field("len", &choices.len())
            .finish()
    }
}
