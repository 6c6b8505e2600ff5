//! TextField: editable text with an input constraint.

use std::sync::Arc;

use lcdui_core::{BindingSlot, ModelId};
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::widget::{FormItem, Item, ItemBinding};

/// What kind of text a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputKind {
    /// Any text.
    #[default]
    Any,
    /// An e-mail address.
    EmailAddr,
    /// An integer, optionally negative.
    Numeric,
    /// A phone number.
    PhoneNumber,
    /// A URL.
    Url,
}

/// Input kind plus modifier flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Constraints {
    kind: InputKind,
    password: bool,
}

impl Constraints {
    /// Any text, shown in clear.
    pub const ANY: Self = Self::new(InputKind::Any);
    /// Integers only.
    pub const NUMERIC: Self = Self::new(InputKind::Numeric);

    const PASSWORD_BIT: i32 = 0x1_0000;
    const KIND_MASK: i32 = 0xFFFF;

    /// Constraints of the given kind without modifiers.
    pub const fn new(kind: InputKind) -> Self {
        Self {
            kind,
            password: false,
        }
    }

    /// The same constraints with the content masked on screen.
    pub const fn with_password(mut self) -> Self {
        self.password = true;
        self
    }

    /// Decode the MIDP bit representation.
    pub fn from_bits(bits: i32) -> Result<Self> {
        let kind = match bits & Self::KIND_MASK {
            0 => InputKind::Any,
            1 => InputKind::EmailAddr,
            2 => InputKind::Numeric,
            3 => InputKind::PhoneNumber,
            4 => InputKind::Url,
            _ => {
                return Err(Error::invalid_argument(format!(
                    "Unknown constraints value: {bits}"
                )));
            }
        };
        Ok(Self {
            kind,
            password: bits & Self::PASSWORD_BIT != 0,
        })
    }

    /// Encode as MIDP bits.
    pub fn bits(self) -> i32 {
        let kind = match self.kind {
            InputKind::Any => 0,
            InputKind::EmailAddr => 1,
            InputKind::Numeric => 2,
            InputKind::PhoneNumber => 3,
            InputKind::Url => 4,
        };
        if self.password {
            kind | Self::PASSWORD_BIT
        } else {
            kind
        }
    }

    /// The input kind.
    pub fn kind(self) -> InputKind {
        self.kind
    }

    /// Whether the content is masked.
    pub fn is_password(self) -> bool {
        self.password
    }

    /// Whether `text` is acceptable content.
    pub fn accepts(self, text: &str) -> bool {
        match self.kind {
            InputKind::Numeric => {
                let digits = text.strip_prefix('-').unwrap_or(text);
                digits.chars().all(|c| c.is_ascii_digit())
            }
            InputKind::PhoneNumber => text
                .chars()
                .all(|c| c.is_ascii_digit() || "+*# -()".contains(c)),
            InputKind::Any | InputKind::EmailAddr | InputKind::Url => true,
        }
    }
}

/// Backend side of a [`TextField`].
pub trait TextFieldBinding: ItemBinding {
    /// The content changed.
    fn on_string_changed(&self, _old: &str, _new: &str) {}

    /// The capacity changed.
    fn on_max_size_changed(&self, _old: usize, _new: usize) {}

    /// The constraints changed.
    fn on_constraints_changed(&self, _old: Constraints, _new: Constraints) {}

    /// Move the caret, clamped to the content length.
    fn set_caret_position(&self, position: usize) -> Result<()> {
        self.binding_base()
            .view::<TextField>()?
            .set_caret(position);
        Ok(())
    }

    /// Whether `text` would be acceptable under the field's constraints.
    fn is_valid_for_constraints(&self, text: &str) -> Result<bool> {
        let field = self.binding_base().view::<TextField>()?;
        Ok(field.constraints().accepts(text))
    }
}

fn text_field_as_item(binding: Arc<dyn TextFieldBinding>) -> Arc<dyn ItemBinding> {
    binding
}

#[derive(Debug, Clone)]
struct TextState {
    text: String,
    max_size: usize,
    constraints: Constraints,
    caret: usize,
}

impl TextState {
    /// Validate a replacement content against capacity and constraints.
    fn check(&self, text: &str) -> Result<()> {
        let len = text.chars().count();
        if len > self.max_size {
            return Err(Error::invalid_argument(format!(
                "Text of length {len} exceeds the maximum size {}",
                self.max_size
            )));
        }
        if !self.constraints.accepts(text) {
            return Err(Error::invalid_argument(format!(
                "Text is not valid for {:?} input",
                self.constraints.kind()
            )));
        }
        Ok(())
    }
}

/// An editable text entry.
///
/// Positions and lengths count characters, not bytes.
pub struct TextField {
    item: Arc<Item>,
    state: Mutex<TextState>,
    slot: Arc<BindingSlot<dyn TextFieldBinding>>,
}

impl TextField {
    /// Create a text field.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `max_size` is zero, or if `text` is longer than
    /// `max_size` or not valid for `constraints`.
    pub fn new(
        label: Option<&str>,
        text: Option<&str>,
        max_size: usize,
        constraints: Constraints,
    ) -> Result<Arc<Self>> {
        check_max_size(max_size)?;
        let text = text.unwrap_or_default();
        let state = TextState {
            text: String::new(),
            max_size,
            constraints,
            caret: 0,
        };
        state.check(text)?;

        let item = Item::new::<TextField>(label);
        Ok(Arc::new_cyclic(|weak| Self {
            slot: BindingSlot::with_parent(
                weak,
                item.model_id(),
                item.slot().clone(),
                text_field_as_item,
            ),
            state: Mutex::new(TextState {
                text: text.to_string(),
                ..state
            }),
            item,
        }))
    }

    /// The item level.
    pub fn item(&self) -> &Arc<Item> {
        &self.item
    }

    /// The id of this field.
    pub fn model_id(&self) -> ModelId {
        self.item.model_id()
    }

    /// The content.
    pub fn string(&self) -> String {
        self.state.lock().text.clone()
    }

    /// Content length in characters.
    pub fn len(&self) -> usize {
        self.state.lock().text.chars().count()
    }

    /// Returns `true` if the field is empty.
    pub fn is_empty(&self) -> bool {
        self.state.lock().text.is_empty()
    }

    /// Maximum content length in characters.
    pub fn max_size(&self) -> usize {
        self.state.lock().max_size
    }

    /// The input constraints.
    pub fn constraints(&self) -> Constraints {
        self.state.lock().constraints
    }

    /// The caret position.
    pub fn caret_position(&self) -> usize {
        self.state.lock().caret
    }

    /// Replace the content; `None` clears it.
    pub fn set_string(&self, text: Option<&str>) -> Result<()> {
        let text = text.unwrap_or_default();
        let old = {
            let mut state = self.state.lock();
            state.check(text)?;
            Self::replace_text(&mut state, text.to_string())
        };
        self.slot.notify(|b| b.on_string_changed(&old, text));
        Ok(())
    }

    /// Replace the content with `chars`.
    pub fn set_chars(&self, chars: &[char]) -> Result<()> {
        let text: String = chars.iter().collect();
        self.set_string(Some(&text))
    }

    /// Insert `src` before character `position`; positions past the end
    /// append.
    pub fn insert(&self, src: &str, position: usize) -> Result<()> {
        let (old, new) = {
            let mut state = self.state.lock();
            let split = byte_offset(&state.text, position);
            let mut text = state.text.clone();
            text.insert_str(split, src);
            state.check(&text)?;
            (Self::replace_text(&mut state, text.clone()), text)
        };
        self.slot.notify(|b| b.on_string_changed(&old, &new));
        Ok(())
    }

    /// Remove `length` characters starting at `offset`.
    pub fn delete(&self, offset: usize, length: usize) -> Result<()> {
        let (old, new) = {
            let mut state = self.state.lock();
            let len = state.text.chars().count();
            let end = offset.saturating_add(length);
            if end > len {
                return Err(Error::IndexOutOfRange { index: end, len });
            }
            let text: String = state
                .text
                .chars()
                .enumerate()
                .filter(|(i, _)| *i < offset || *i >= end)
                .map(|(_, c)| c)
                .collect();
            state.check(&text)?;
            (Self::replace_text(&mut state, text.clone()), text)
        };
        self.slot.notify(|b| b.on_string_changed(&old, &new));
        Ok(())
    }

    /// Change the capacity and return the new value.
    ///
    /// Content longer than the new capacity is truncated first, with its own
    /// string notification.
    pub fn set_max_size(&self, max_size: usize) -> Result<usize> {
        check_max_size(max_size)?;

        let (old_max, truncated) = {
            let mut state = self.state.lock();
            let old_max = std::mem::replace(&mut state.max_size, max_size);
            let truncated = if state.text.chars().count() > max_size {
                let text: String = state.text.chars().take(max_size).collect();
                let old = Self::replace_text(&mut state, text.clone());
                Some((old, text))
            } else {
                None
            };
            (old_max, truncated)
        };

        if let Some((old, new)) = truncated {
            self.slot.notify(|b| b.on_string_changed(&old, &new));
        }
        self.slot.notify(|b| b.on_max_size_changed(old_max, max_size));
        Ok(max_size)
    }

    /// Change the constraints.
    ///
    /// Content that is not valid under the new constraints is cleared first,
    /// with its own string notification.
    pub fn set_constraints(&self, constraints: Constraints) {
        let (old_constraints, cleared) = {
            let mut state = self.state.lock();
            let old_constraints = std::mem::replace(&mut state.constraints, constraints);
            let cleared = if constraints.accepts(&state.text) {
                None
            } else {
                Some(Self::replace_text(&mut state, String::new()))
            };
            (old_constraints, cleared)
        };

        if let Some(old) = cleared {
            self.slot.notify(|b| b.on_string_changed(&old, ""));
        }
        self.slot
            .notify(|b| b.on_constraints_changed(old_constraints, constraints));
    }

    /// Attach a binding, or detach with `None`.
    pub fn attach_binding(&self, binding: Option<Arc<dyn TextFieldBinding>>) {
        self.slot.attach(binding);
    }

    fn set_caret(&self, position: usize) {
        let mut state = self.state.lock();
        state.caret = position.min(state.text.chars().count());
    }

    fn replace_text(state: &mut TextState, text: String) -> String {
        let old = std::mem::replace(&mut state.text, text);
        state.caret = state.caret.min(state.text.chars().count());
        old
    }
}

fn check_max_size(max_size: usize) -> Result<()> {
    if max_size == 0 {
        return Err(Error::invalid_argument("Maximum size must be positive"));
    }
    Ok(())
}

/// Byte offset of character `position`, or the end of `text`.
fn byte_offset(text: &str, position: usize) -> usize {
    text.char_indices()
        .nth(position)
        .map_or(text.len(), |(offset, _)| offset)
}

impl FormItem for TextField {
    fn item(&self) -> &Arc<Item> {
        &self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Recorder;

    fn field(text: &str, max: usize) -> Arc<TextField> {
        TextField::new(Some("Name"), Some(text), max, Constraints::ANY).unwrap()
    }

    #[test]
    fn test_constraint_bits() {
        let password = Constraints::new(InputKind::Numeric).with_password();
        assert_eq!(password.bits(), 0x1_0002);
        assert_eq!(Constraints::from_bits(0x1_0002).unwrap(), password);
        assert_eq!(Constraints::from_bits(4).unwrap().kind(), InputKind::Url);
        assert!(Constraints::from_bits(9).is_err());
    }

    #[test]
    fn test_numeric_and_phone_validation() {
        assert!(Constraints::NUMERIC.accepts("-42"));
        assert!(Constraints::NUMERIC.accepts(""));
        assert!(!Constraints::NUMERIC.accepts("4-2"));
        assert!(!Constraints::NUMERIC.accepts("x"));

        let phone = Constraints::new(InputKind::PhoneNumber);
        assert!(phone.accepts("+1 (555) 010-99#"));
        assert!(!phone.accepts("call me"));
    }

    #[test]
    fn test_construction_validates() {
        assert!(TextField::new(None, None, 0, Constraints::ANY).is_err());
        assert!(TextField::new(None, Some("toolong"), 3, Constraints::ANY).is_err());
        assert!(TextField::new(None, Some("abc"), 8, Constraints::NUMERIC).is_err());

        let empty = TextField::new(None, None, 4, Constraints::NUMERIC).unwrap();
        assert_eq!(empty.string(), "");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_insert_and_delete_count_chars() {
        let field = field("héllo", 16);
        field.insert("!", 99).unwrap();
        field.insert(">", 0).unwrap();
        field.insert("_", 3).unwrap();
        assert_eq!(field.string(), ">hé_llo!");

        field.delete(1, 3).unwrap();
        assert_eq!(field.string(), ">llo!");
        assert_eq!(
            field.delete(3, 5),
            Err(Error::IndexOutOfRange { index: 8, len: 5 })
        );
        assert_eq!(field.len(), 5);
    }

    #[test]
    fn test_over_long_text_rejected_without_change() {
        let field = field("abc", 4);
        assert!(field.set_string(Some("abcde")).is_err());
        assert!(field.insert("xy", 1).is_err());
        assert_eq!(field.string(), "abc");
    }

    #[test]
    fn test_lowering_max_size_truncates() {
        let field = field("abcdef", 10);
        let recorder = Recorder::new();
        field.attach_binding(Some(recorder.clone()));

        assert_eq!(field.set_max_size(4).unwrap(), 4);
        assert_eq!(field.string(), "abcd");
        assert!(field.set_max_size(0).is_err());
        assert_eq!(
            recorder.events(),
            vec!["attach", "tf_string:abcd", "tf_max:10->4"]
        );
    }

    #[test]
    fn test_constraint_change_clears_invalid_content() {
        let field = field("abc", 10);
        let recorder = Recorder::new();
        field.attach_binding(Some(recorder.clone()));

        field.set_constraints(Constraints::NUMERIC);
        assert_eq!(field.string(), "");
        field.set_string(Some("12")).unwrap();
        field.set_constraints(Constraints::NUMERIC.with_password());
        assert_eq!(field.string(), "12");

        assert_eq!(
            recorder.events(),
            vec![
                "attach",
                "tf_string:",
                "tf_constraints:Numeric",
                "tf_string:12",
                "tf_constraints:Numeric*",
            ]
        );
    }

    #[test]
    fn test_binding_accessors() {
        let field = field("abc", 10);
        let recorder = Recorder::new();
        field.attach_binding(Some(recorder.clone()));

        recorder.set_caret_position(2).unwrap();
        assert_eq!(field.caret_position(), 2);
        recorder.set_caret_position(50).unwrap();
        assert_eq!(field.caret_position(), 3);

        field.set_string(Some("a")).unwrap();
        assert_eq!(field.caret_position(), 1);

        assert!(recorder.is_valid_for_constraints("anything").unwrap());
        field.set_constraints(Constraints::NUMERIC);
        assert!(!recorder.is_valid_for_constraints("abc").unwrap());
    }

    #[test]
    fn test_set_chars() {
        let field = field("", 10);
        field.set_chars(&['o', 'k']).unwrap();
        assert_eq!(field.string(), "ok");
        field.set_string(None).unwrap();
        assert!(field.is_empty());
    }
}
