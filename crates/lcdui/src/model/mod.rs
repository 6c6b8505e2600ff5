//! Data models shared by several widgets.
//!
//! - [`SelectableCollection`]: ordered choice entries with the selection
//!   rules of a [`ChoiceType`], used by both choice groups and lists
//!
//! ```text
//! ┌──────────────┐  mutate   ┌──────────────────────┐
//! │ ChoiceGroup  │──────────>│ SelectableCollection │
//! │ List         │<──────────│                      │
//! └──────────────┘  events   └──────────────────────┘
//!        │
//!        └──> ChoiceBinding (after the lock is released)
//! ```

mod selection;

pub use selection::{
    ChoiceEntry, ChoiceEvent, ChoiceType, ReselectPolicy, SelectableCollection, SelectionChange,
};
