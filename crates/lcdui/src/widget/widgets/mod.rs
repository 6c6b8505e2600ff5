//! Concrete widgets.
//!
//! Screens:
//!
//! - [`List`]: a full-screen choice
//! - [`Form`]: a screen holding items
//! - [`Alert`]: a transient message
//!
//! Items:
//!
//! - [`ChoiceGroup`]: a choice inside a form
//! - [`StringItem`]: static text
//! - [`Gauge`]: a bounded value
//! - [`TextField`]: editable text with input constraints
//!
//! [`Ticker`] is neither; it is shared between screens.

mod alert;
mod choice_group;
mod form;
mod gauge;
mod list;
mod string_item;
mod text_field;
mod ticker;

pub use alert::{Alert, AlertBinding, AlertTimeout, AlertType};
pub use choice_group::{ChoiceGroup, ChoiceGroupBinding, ChoiceGroupBuilder};
pub use form::{Form, FormBinding, ItemStateListener};
pub use gauge::{Gauge, GaugeBinding};
pub use list::{List, ListBinding, select_command};
pub use string_item::{StringItem, StringItemBinding};
pub use text_field::{Constraints, InputKind, TextField, TextFieldBinding};
pub use ticker::{Ticker, TickerBinding};
