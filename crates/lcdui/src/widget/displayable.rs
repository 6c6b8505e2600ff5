//! The displayable base level: commands and the command listener.

use std::fmt;
use std::sync::Arc;

use lcdui_core::{Binding, BindingSlot, ModelBase, ModelId};
use parking_lot::RwLock;

use super::command::Command;
use crate::error::{Error, Result};
use crate::logging::targets;

/// Callback receiving command invocations.
pub type CommandListener = Arc<dyn Fn(&Arc<Command>, &Displayable) + Send + Sync>;

/// Backend side of a [`Displayable`].
pub trait DisplayableBinding: Binding {
    /// A command was added to the displayable.
    fn on_command_added(&self, _command: &Arc<Command>) {}

    /// A command was removed from the displayable.
    fn on_command_removed(&self, _command: &Arc<Command>) {}

    /// A command was delivered to the command listener.
    fn on_command_action(&self, _command: &Arc<Command>) {}

    /// Every command currently on the displayable, in insertion order.
    fn all_commands(&self) -> Result<Vec<Arc<Command>>> {
        Ok(self.binding_base().view::<Displayable>()?.commands())
    }

    /// Deliver `command` to the application, as if the user picked it.
    fn invoke_command(&self, command: &Arc<Command>) -> Result<()> {
        self.binding_base()
            .view::<Displayable>()?
            .invoke_command(command);
        Ok(())
    }
}

/// Base level of every screen.
///
/// A displayable is never created on its own; concrete screens build one as
/// their innermost level and register it under their own type name.
pub struct Displayable {
    base: ModelBase,
    accepts_commands: bool,
    commands: RwLock<Vec<Arc<Command>>>,
    listener: RwLock<Option<CommandListener>>,
    slot: Arc<BindingSlot<dyn DisplayableBinding>>,
}

impl Displayable {
    /// Build the base level for a screen of type `T`.
    ///
    /// Screens that refuse commands pass `accepts_commands = false`; adding
    /// a command or a listener then fails with `InvalidArgument`.
    pub(crate) fn new<T: 'static>(accepts_commands: bool) -> Arc<Self> {
        let base = ModelBase::new::<T>();
        Arc::new_cyclic(|weak| Self {
            slot: BindingSlot::new(weak, base.id()),
            accepts_commands,
            commands: RwLock::new(Vec::new()),
            listener: RwLock::new(None),
            base,
        })
    }

    /// The id of the screen this displayable belongs to.
    pub fn model_id(&self) -> ModelId {
        self.base.id()
    }

    /// Add a command. Adding a command that is already present does nothing.
    pub fn add_command(&self, command: Arc<Command>) -> Result<()> {
        if !self.accepts_commands {
            return Err(Error::invalid_argument(format!(
                "Commands are not allowed on {}",
                self.type_label()
            )));
        }

        {
            let mut commands = self.commands.write();
            if commands.iter().any(|c| Arc::ptr_eq(c, &command)) {
                return Ok(());
            }
            commands.push(command.clone());
        }

        tracing::trace!(target: targets::WIDGET, label = command.label(), "command added");
        self.slot.notify(|b| b.on_command_added(&command));
        Ok(())
    }

    /// Remove a command. Removing an absent command does nothing.
    pub fn remove_command(&self, command: &Arc<Command>) {
        let removed = {
            let mut commands = self.commands.write();
            match commands.iter().position(|c| Arc::ptr_eq(c, command)) {
                Some(pos) => {
                    commands.remove(pos);
                    true
                }
                None => false,
            }
        };

        if removed {
            tracing::trace!(target: targets::WIDGET, label = command.label(), "command removed");
            self.slot.notify(|b| b.on_command_removed(command));
        }
    }

    /// The commands on this displayable, in insertion order.
    pub fn commands(&self) -> Vec<Arc<Command>> {
        self.commands.read().clone()
    }

    /// Replace the command listener; `None` removes it.
    pub fn set_command_listener(&self, listener: Option<CommandListener>) -> Result<()> {
        if !self.accepts_commands {
            return Err(Error::invalid_argument(format!(
                "Listeners are not allowed on {}",
                self.type_label()
            )));
        }
        *self.listener.write() = listener;
        Ok(())
    }

    /// Returns `true` if a command listener is installed.
    pub fn has_command_listener(&self) -> bool {
        self.listener.read().is_some()
    }

    /// Deliver `command` to the listener, then tell the binding.
    pub fn invoke_command(&self, command: &Arc<Command>) {
        let listener = self.listener.read().clone();
        if let Some(listener) = listener {
            tracing::debug!(target: targets::WIDGET, label = command.label(), "command action");
            listener(command, self);
        }
        self.slot.notify(|b| b.on_command_action(command));
    }

    /// Attach a displayable-level binding, or detach with `None`.
    pub fn attach_binding(&self, binding: Option<Arc<dyn DisplayableBinding>>) {
        self.slot.attach(binding);
    }

    pub(crate) fn slot(&self) -> &Arc<BindingSlot<dyn DisplayableBinding>> {
        &self.slot
    }

    fn type_label(&self) -> &'static str {
        let name = self.base.type_name();
        name.rsplit("::").next().unwrap_or(name)
    }
}

impl fmt::Debug for Displayable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Displayable")
            .field("id", &self.base.id())
            .field("type", &self.type_label())
            .field("commands", &self.commands.read().len())
            .finish()
    }
}
