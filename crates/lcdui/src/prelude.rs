//! Prelude module for lcdui.
//!
//! ```
//! use lcdui::prelude::*;
//! ```
//!
//! This brings in the binding protocol, every widget with its binding
//! trait, and the [`Choice`] trait that carries the collection operations
//! of lists and choice groups.

// ============================================================================
// Binding Protocol
// ============================================================================

pub use lcdui_core::{Binding, BindingBase, BindingError, ModelId};

// ============================================================================
// Base Levels
// ============================================================================

pub use crate::widget::{
    Command, CommandKind, CommandListener, Displayable, DisplayableBinding, FormItem, Image,
    ImageSource, Item, ItemBinding, Screen, ScreenBinding,
};

// ============================================================================
// Choices
// ============================================================================

pub use crate::model::{ChoiceType, ReselectPolicy, SelectableCollection, SelectionChange};
pub use crate::widget::{
    Choice, ChoiceBinding, ChoiceGroup, ChoiceGroupBinding, List, ListBinding, select_command,
};

// ============================================================================
// Screens and Items
// ============================================================================

pub use crate::widget::{
    Alert, AlertBinding, AlertTimeout, AlertType, Constraints, Form, FormBinding, Gauge,
    GaugeBinding, InputKind, StringItem, StringItemBinding, TextField, TextFieldBinding, Ticker,
    TickerBinding,
};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::{Error, Result};
