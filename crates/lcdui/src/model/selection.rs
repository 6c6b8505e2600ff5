//! Selection state for choice widgets.
//!
//! [`SelectableCollection`] is the ordered list of entries behind every
//! choice widget. It owns the entries and enforces the selection rules of
//! its [`ChoiceType`]; it knows nothing about bindings. Each mutator returns
//! the [`ChoiceEvent`]s it produced, in order, and the widget that owns the
//! collection forwards them to its binding once its lock is released.
//!
//! # Example
//!
//! ```
//! use lcdui::model::{ChoiceEvent, ChoiceType, SelectableCollection};
//!
//! let mut choices = SelectableCollection::new(ChoiceType::Exclusive);
//! let (index, events) = choices.append("Red", None).unwrap();
//!
//! // The first entry of an exclusive collection is selected right away.
//! assert_eq!(index, 0);
//! assert_eq!(choices.selected_index(), Some(0));
//! assert!(matches!(events[1], ChoiceEvent::SelectionChanged(_)));
//!
//! choices.append("Green", None).unwrap();
//! choices.set_selected_index(1, true).unwrap();
//! assert_eq!(choices.selected_flags(), vec![false, true]);
//! ```

use crate::error::{Error, Result};
use crate::widget::Image;

/// How a choice widget lets the user select entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceType {
    /// Exactly one entry is selected whenever the collection is non-empty.
    Exclusive,
    /// Any subset of entries may be selected.
    Multiple,
    /// Like `Exclusive`, and selecting an entry also fires the list's select
    /// command. Only lists may be implicit.
    Implicit,
}

impl ChoiceType {
    /// Whether at most one entry may be selected.
    pub fn is_single_selection(self) -> bool {
        !matches!(self, Self::Multiple)
    }

    /// The MIDP code of this type.
    pub fn code(self) -> i32 {
        match self {
            Self::Exclusive => 1,
            Self::Multiple => 2,
            Self::Implicit => 3,
        }
    }
}

impl TryFrom<i32> for ChoiceType {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            1 => Ok(Self::Exclusive),
            2 => Ok(Self::Multiple),
            3 => Ok(Self::Implicit),
            _ => Err(Error::invalid_argument(format!("Unknown choice type {code}"))),
        }
    }
}

/// Which entry becomes selected when the selected entry of a single-selection
/// collection is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReselectPolicy {
    /// The entry that moved into the deleted position, or the new last entry
    /// if the deleted entry was last.
    #[default]
    Nearest,
    /// Always the first entry.
    First,
}

impl ReselectPolicy {
    fn pick(self, deleted: usize, len: usize) -> usize {
        match self {
            Self::Nearest => deleted.min(len - 1),
            Self::First => 0,
        }
    }
}

/// One element of a choice: text, optional image, selection flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceEntry {
    text: String,
    image: Option<Image>,
    selected: bool,
}

impl ChoiceEntry {
    fn new(text: &str, image: Option<Image>) -> Self {
        Self {
            text: text.to_string(),
            image,
            selected: false,
        }
    }

    /// The text part.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The image part.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Whether the entry is selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

/// Selection state of one entry after a change.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChange {
    /// Position of the entry.
    pub index: usize,
    /// Text of the entry.
    pub text: String,
    /// Image of the entry.
    pub image: Option<Image>,
    /// The entry's new selection state.
    pub selected: bool,
}

/// A change produced by a [`SelectableCollection`] mutator.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceEvent {
    /// An entry was inserted at `index`.
    Added {
        index: usize,
        text: String,
        image: Option<Image>,
    },
    /// The entry at `index` got new content.
    Changed {
        index: usize,
        old_text: String,
        old_image: Option<Image>,
        new_text: String,
        new_image: Option<Image>,
    },
    /// The entry formerly at `index` was removed.
    Removed {
        index: usize,
        text: String,
        image: Option<Image>,
    },
    /// An entry's selection flag was written.
    SelectionChanged(SelectionChange),
}

/// Ordered entries with type-dependent selection rules.
///
/// In an `Exclusive` or `Implicit` collection exactly one entry is selected
/// whenever the collection is non-empty; every mutator restores that before
/// it returns. Mutators validate their arguments first and leave the
/// collection untouched on error.
#[derive(Debug, Clone)]
pub struct SelectableCollection {
    choice_type: ChoiceType,
    policy: ReselectPolicy,
    entries: Vec<ChoiceEntry>,
}

impl SelectableCollection {
    /// Creates an empty collection with the default reselect policy.
    pub fn new(choice_type: ChoiceType) -> Self {
        Self::with_policy(choice_type, ReselectPolicy::default())
    }

    /// Creates an empty collection with an explicit reselect policy.
    pub fn with_policy(choice_type: ChoiceType, policy: ReselectPolicy) -> Self {
        Self {
            choice_type,
            policy,
            entries: Vec::new(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The selection type.
    pub fn choice_type(&self) -> ChoiceType {
        self.choice_type
    }

    /// The reselect policy.
    pub fn policy(&self) -> ReselectPolicy {
        self.policy
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in order.
    pub fn entries(&self) -> &[ChoiceEntry] {
        &self.entries
    }

    /// The entry at `index`.
    pub fn entry(&self, index: usize) -> Result<&ChoiceEntry> {
        Error::check_index(index, self.entries.len())?;
        Ok(&self.entries[index])
    }

    /// The text part of the entry at `index`.
    pub fn string(&self, index: usize) -> Result<&str> {
        self.entry(index).map(ChoiceEntry::text)
    }

    /// The image part of the entry at `index`.
    pub fn image(&self, index: usize) -> Result<Option<&Image>> {
        self.entry(index).map(ChoiceEntry::image)
    }

    /// Whether the entry at `index` is selected.
    pub fn is_selected(&self, index: usize) -> Result<bool> {
        self.entry(index).map(ChoiceEntry::is_selected)
    }

    /// The selected entry of a single-selection collection.
    ///
    /// Always `None` for `Multiple` collections, whose selection is read
    /// through [`selected_flags`](Self::selected_flags).
    pub fn selected_index(&self) -> Option<usize> {
        if !self.choice_type.is_single_selection() {
            return None;
        }
        self.entries.iter().position(ChoiceEntry::is_selected)
    }

    /// The selection flag of every entry.
    pub fn selected_flags(&self) -> Vec<bool> {
        self.entries.iter().map(ChoiceEntry::is_selected).collect()
    }

    /// Fill `out` with the selection flags and return the number selected.
    ///
    /// Slots of `out` past the last entry are set to `false`. Fails if `out`
    /// is shorter than the collection.
    pub fn fill_selected_flags(&self, out: &mut [bool]) -> Result<usize> {
        if out.len() < self.entries.len() {
            return Err(Error::invalid_argument(format!(
                "Flag array of length {} is shorter than the {} entries",
                out.len(),
                self.entries.len()
            )));
        }
        out.fill(false);
        for (flag, entry) in out.iter_mut().zip(&self.entries) {
            *flag = entry.selected;
        }
        Ok(self.selected_count())
    }

    /// Number of selected entries.
    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|e| e.selected).count()
    }

    // =========================================================================
    // Content mutation
    // =========================================================================

    /// Append an entry and return its index with the produced events.
    pub fn append(&mut self, text: &str, image: Option<Image>) -> Result<(usize, Vec<ChoiceEvent>)> {
        let index = self.entries.len();
        let events = self.insert(index, text, image)?;
        Ok((index, events))
    }

    /// Insert an entry before `index`; `index == len()` appends.
    ///
    /// The first entry of an empty single-selection collection becomes
    /// selected. Otherwise new entries start unselected and existing
    /// selections move with their entries.
    pub fn insert(&mut self, index: usize, text: &str, image: Option<Image>) -> Result<Vec<ChoiceEvent>> {
        Error::check_insert_index(index, self.entries.len())?;
        Image::require_immutable(image.as_ref(), "choice elements")?;

        self.entries.insert(index, ChoiceEntry::new(text, image.clone()));
        let mut events = vec![ChoiceEvent::Added {
            index,
            text: text.to_string(),
            image,
        }];
        self.restore_single_selection(index, &mut events);
        Ok(events)
    }

    /// Replace the content of the entry at `index`, keeping its selection.
    pub fn set(&mut self, index: usize, text: &str, image: Option<Image>) -> Result<Vec<ChoiceEvent>> {
        Error::check_index(index, self.entries.len())?;
        Image::require_immutable(image.as_ref(), "choice elements")?;

        let entry = &mut self.entries[index];
        let old_text = std::mem::replace(&mut entry.text, text.to_string());
        let old_image = std::mem::replace(&mut entry.image, image.clone());
        Ok(vec![ChoiceEvent::Changed {
            index,
            old_text,
            old_image,
            new_text: text.to_string(),
            new_image: image,
        }])
    }

    /// Remove the entry at `index`.
    ///
    /// Deleting the selected entry of a single-selection collection selects
    /// a replacement according to the [`ReselectPolicy`].
    pub fn delete(&mut self, index: usize) -> Result<Vec<ChoiceEvent>> {
        Error::check_index(index, self.entries.len())?;

        let removed = self.entries.remove(index);
        let mut events = vec![ChoiceEvent::Removed {
            index,
            text: removed.text,
            image: removed.image,
        }];
        if !self.entries.is_empty() {
            let fallback = self.policy.pick(index, self.entries.len());
            self.restore_single_selection(fallback, &mut events);
        }
        Ok(events)
    }

    /// Remove every entry, last to first.
    pub fn delete_all(&mut self) -> Vec<ChoiceEvent> {
        let mut events = Vec::with_capacity(self.entries.len());
        while let Some(entry) = self.entries.pop() {
            events.push(ChoiceEvent::Removed {
                index: self.entries.len(),
                text: entry.text,
                image: entry.image,
            });
        }
        events
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Write the selection flag of the entry at `index`.
    ///
    /// For `Multiple` collections the flag is simply stored. For
    /// single-selection collections deselecting is ignored, as is selecting
    /// the entry that is already selected; otherwise the previous entry is
    /// deselected before the requested one is selected.
    pub fn set_selected_index(&mut self, index: usize, selected: bool) -> Result<Vec<ChoiceEvent>> {
        Error::check_index(index, self.entries.len())?;

        let mut events = Vec::new();
        if !self.choice_type.is_single_selection() {
            self.write_flag(index, selected, &mut events);
            return Ok(events);
        }

        if !selected || self.entries[index].selected {
            return Ok(events);
        }
        for other in 0..self.entries.len() {
            if self.entries[other].selected {
                self.write_flag(other, false, &mut events);
            }
        }
        self.write_flag(index, true, &mut events);
        Ok(events)
    }

    /// Write the selection flags of all entries at once.
    ///
    /// `Multiple` collections take the flags element-wise. Single-selection
    /// collections select the first entry whose flag is `true`, or the first
    /// entry if none is. Flags beyond `len()` are ignored; fewer flags than
    /// entries is an error.
    pub fn set_selected_flags(&mut self, flags: &[bool]) -> Result<Vec<ChoiceEvent>> {
        if flags.len() < self.entries.len() {
            return Err(Error::invalid_argument(format!(
                "Flag array of length {} is shorter than the {} entries",
                flags.len(),
                self.entries.len()
            )));
        }
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }

        if !self.choice_type.is_single_selection() {
            let mut events = Vec::new();
            for (index, &selected) in flags.iter().take(self.entries.len()).enumerate() {
                self.write_flag(index, selected, &mut events);
            }
            return Ok(events);
        }

        let target = flags
            .iter()
            .take(self.entries.len())
            .position(|&flag| flag)
            .unwrap_or(0);
        self.set_selected_index(target, true)
    }

    fn write_flag(&mut self, index: usize, selected: bool, events: &mut Vec<ChoiceEvent>) {
        let entry = &mut self.entries[index];
        entry.selected = selected;
        events.push(ChoiceEvent::SelectionChanged(SelectionChange {
            index,
            text: entry.text.clone(),
            image: entry.image.clone(),
            selected,
        }));
    }

    /// Select `fallback` if a non-empty single-selection collection has no
    /// selected entry.
    fn restore_single_selection(&mut self, fallback: usize, events: &mut Vec<ChoiceEvent>) {
        if !self.choice_type.is_single_selection()
            || self.entries.is_empty()
            || self.entries.iter().any(ChoiceEntry::is_selected)
        {
            return;
        }
        self.write_flag(fallback, true, events);
    }
}
