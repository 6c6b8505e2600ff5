//! Abstract commands attached to displayables.

use std::sync::Arc;

use crate::error::{Error, Result};

/// The semantic kind of a command.
///
/// The backend uses the kind to decide where a command goes (a soft key, a
/// menu, a context menu). The discriminants match the codes used by MIDP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Application-defined command for the current screen.
    Screen = 1,
    /// Navigate to the logically previous screen.
    Back = 2,
    /// Negative answer to a dialog.
    Cancel = 3,
    /// Positive answer to a dialog.
    Ok = 4,
    /// Request for help.
    Help = 5,
    /// Stop a running operation.
    Stop = 6,
    /// Exit the application.
    Exit = 7,
    /// Command specific to an item on the screen.
    Item = 8,
}

impl CommandKind {
    /// The numeric code of this kind.
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for CommandKind {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        Ok(match code {
            1 => Self::Screen,
            2 => Self::Back,
            3 => Self::Cancel,
            4 => Self::Ok,
            5 => Self::Help,
            6 => Self::Stop,
            7 => Self::Exit,
            8 => Self::Item,
            _ => {
                return Err(Error::invalid_argument(format!(
                    "Unknown command type {code}"
                )));
            }
        })
    }
}

/// A command the user can invoke on a displayable.
///
/// Commands are immutable. Displayables hold them by `Arc` and tell them
/// apart by identity, so two commands with identical fields are still
/// different commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    label: String,
    kind: CommandKind,
    priority: i32,
}

impl Command {
    /// Create a shared command.
    pub fn new(label: impl Into<String>, kind: CommandKind, priority: i32) -> Arc<Self> {
        Arc::new(Self {
            label: label.into(),
            kind,
            priority,
        })
    }

    /// The command label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The command kind.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Priority among commands of the same kind; lower is more important.
    pub fn priority(&self) -> i32 {
        self.priority
    }
}
