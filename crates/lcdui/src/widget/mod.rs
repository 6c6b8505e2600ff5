//! Widget models for lcdui.
//!
//! Every widget is a model object made of class levels: a [`List`] is a
//! [`Screen`] which is a [`Displayable`]; a [`ChoiceGroup`] is an [`Item`].
//! Each level owns a binding slot, and a backend attaches one binding to
//! the most derived level it understands:
//!
//! ```text
//! List ──────────> Screen ──────────> Displayable
//!  │ ListBinding     │ ScreenBinding     │ DisplayableBinding
//!  └─────────────────┴───────────────────┘
//!           one binding, seen by every level
//! ```
//!
//! Mutators update the model, release its lock and then notify the
//! binding, so a binding may freely read the model back from inside a
//! notification.
//!
//! # Example
//!
//! ```
//! use lcdui::prelude::*;
//!
//! let form = Form::new(Some("Settings"));
//! let volume = Gauge::new(Some("Volume"), true, 10, 3).unwrap();
//! form.append(volume.clone()).unwrap();
//!
//! assert_eq!(volume.item().owner(), Some(form.model_id()));
//! ```

mod choice;
mod command;
mod displayable;
mod image;
mod item;
mod screen;
pub mod widgets;

pub use choice::{Choice, ChoiceBinding};
pub use command::{Command, CommandKind};
pub use displayable::{CommandListener, Displayable, DisplayableBinding};
pub use image::{Image, ImageSource};
pub use item::{FormItem, Item, ItemBinding};
pub use screen::{Screen, ScreenBinding};
pub use widgets::{
    Alert, AlertBinding, AlertTimeout, AlertType, ChoiceGroup, ChoiceGroupBinding,
    ChoiceGroupBuilder, Constraints, Form, FormBinding, Gauge, GaugeBinding, InputKind,
    ItemStateListener, List, ListBinding, StringItem, StringItemBinding, TextField,
    TextFieldBinding, Ticker, TickerBinding, select_command,
};
