//! Alert: a transient message screen.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use lcdui_core::{BindingSlot, ModelId};
use parking_lot::RwLock;

use crate::error::Result;
use crate::widget::{Image, Screen, ScreenBinding};

/// The nature of an alert, used by the backend to pick an icon or sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertType {
    /// Non-threatening information.
    Info,
    /// A hazardous situation.
    Warning,
    /// An error.
    Error,
    /// A reminder the user asked for.
    Alarm,
    /// Confirmation of a user action.
    Confirmation,
}

/// How long an alert stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertTimeout {
    /// Until the user dismisses it.
    Forever,
    /// For a fixed time.
    After(Duration),
}

/// Backend side of an [`Alert`].
pub trait AlertBinding: ScreenBinding {
    /// The message text changed.
    fn on_alert_string_changed(&self, _old: Option<&str>, _new: Option<&str>) {}

    /// The image changed.
    fn on_alert_image_changed(&self, _old: Option<&Image>, _new: Option<&Image>) {}

    /// The alert type changed.
    fn on_alert_type_changed(&self, _old: Option<AlertType>, _new: Option<AlertType>) {}

    /// The timeout changed.
    fn on_alert_timeout_changed(&self, _old: AlertTimeout, _new: AlertTimeout) {}
}

fn alert_as_screen(binding: Arc<dyn AlertBinding>) -> Arc<dyn ScreenBinding> {
    binding
}

#[derive(Debug, Clone)]
struct AlertContent {
    text: Option<String>,
    image: Option<Image>,
    alert_type: Option<AlertType>,
    timeout: AlertTimeout,
}

/// A screen showing a message, optionally with an image.
///
/// Alerts manage their own dismissal, so they accept neither commands nor
/// a command listener.
pub struct Alert {
    screen: Arc<Screen>,
    content: RwLock<AlertContent>,
    slot: Arc<BindingSlot<dyn AlertBinding>>,
}

impl Alert {
    /// Create an empty alert.
    pub fn new(title: Option<&str>) -> Arc<Self> {
        Self::build(title, None, None, None)
    }

    /// Create an alert with content.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `image` is mutable.
    pub fn with_content(
        title: Option<&str>,
        text: Option<&str>,
        image: Option<Image>,
        alert_type: Option<AlertType>,
    ) -> Result<Arc<Self>> {
        Image::require_immutable(image.as_ref(), "alerts")?;
        Ok(Self::build(title, text, image, alert_type))
    }

    fn build(
        title: Option<&str>,
        text: Option<&str>,
        image: Option<Image>,
        alert_type: Option<AlertType>,
    ) -> Arc<Self> {
        let screen = Screen::new::<Alert>(false);
        screen.set_title(title);
        Arc::new_cyclic(|weak| Self {
            slot: BindingSlot::with_parent(
                weak,
                screen.model_id(),
                screen.slot().clone(),
                alert_as_screen,
            ),
            content: RwLock::new(AlertContent {
                text: text.map(str::to_string),
                image,
                alert_type,
                timeout: Self::default_timeout(),
            }),
            screen,
        })
    }

    /// The timeout new alerts start with.
    pub fn default_timeout() -> AlertTimeout {
        AlertTimeout::Forever
    }

    /// The screen level of this alert.
    pub fn screen(&self) -> &Arc<Screen> {
        &self.screen
    }

    /// The id of this alert.
    pub fn model_id(&self) -> ModelId {
        self.screen.model_id()
    }

    /// The message text.
    pub fn string(&self) -> Option<String> {
        self.content.read().text.clone()
    }

    /// Set or clear the message text.
    pub fn set_string(&self, text: Option<&str>) {
        let old = std::mem::replace(&mut self.content.write().text, text.map(str::to_string));
        self.slot
            .notify(|b| b.on_alert_string_changed(old.as_deref(), text));
    }

    /// The image.
    pub fn image(&self) -> Option<Image> {
        self.content.read().image.clone()
    }

    /// Set or clear the image. Mutable images are rejected.
    pub fn set_image(&self, image: Option<Image>) -> Result<()> {
        Image::require_immutable(image.as_ref(), "alerts")?;
        let old = std::mem::replace(&mut self.content.write().image, image.clone());
        self.slot
            .notify(|b| b.on_alert_image_changed(old.as_ref(), image.as_ref()));
        Ok(())
    }

    /// The alert type.
    pub fn alert_type(&self) -> Option<AlertType> {
        self.content.read().alert_type
    }

    /// Set or clear the alert type.
    pub fn set_type(&self, alert_type: Option<AlertType>) {
        let old = std::mem::replace(&mut self.content.write().alert_type, alert_type);
        self.slot.notify(|b| b.on_alert_type_changed(old, alert_type));
    }

    /// The timeout.
    pub fn timeout(&self) -> AlertTimeout {
        self.content.read().timeout
    }

    /// Set the timeout.
    pub fn set_timeout(&self, timeout: AlertTimeout) {
        let old = std::mem::replace(&mut self.content.write().timeout, timeout);
        self.slot.notify(|b| b.on_alert_timeout_changed(old, timeout));
    }

    /// Attach a binding, or detach with `None`.
    pub fn attach_binding(&self, binding: Option<Arc<dyn AlertBinding>>) {
        self.slot.attach(binding);
    }
}

impl fmt::Debug for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alert")
            .field("id", &self.model_id())
            .field("content", &*self.content.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_support::Recorder;
    use crate::widget::{Command, CommandKind, Displayable};

    #[test]
    fn test_defaults() {
        let alert = Alert::new(Some("Oops"));
        assert_eq!(alert.timeout(), AlertTimeout::Forever);
        assert_eq!(alert.screen().title().as_deref(), Some("Oops"));
        assert_eq!(alert.string(), None);
        assert_eq!(alert.alert_type(), None);
    }

    #[test]
    fn test_commands_and_listener_rejected() {
        let alert = Alert::new(None);
        let displayable = alert.screen().displayable();
        assert!(matches!(
            displayable.add_command(Command::new("OK", CommandKind::Ok, 0)),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            displayable.set_command_listener(Some(Arc::new(|_: &Arc<Command>, _: &Displayable| {}))),
            Err(Error::InvalidArgument(_))
        ));
        assert!(displayable.commands().is_empty());
    }

    #[test]
    fn test_mutable_image_rejected() {
        let mutable = Image::mutable(2, 2).unwrap();
        assert!(Alert::with_content(None, Some("x"), Some(mutable.clone()), None).is_err());

        let alert = Alert::new(None);
        assert!(alert.set_image(Some(mutable.clone())).is_err());
        alert.set_image(Some(mutable.immutable_copy())).unwrap();
        assert!(alert.image().is_some());
    }

    #[test]
    fn test_setters_notify() {
        let alert = Alert::with_content(None, Some("Saved"), None, Some(AlertType::Info)).unwrap();
        let recorder = Recorder::new();
        alert.attach_binding(Some(recorder.clone()));

        alert.set_string(Some("Deleted"));
        alert.set_type(Some(AlertType::Warning));
        alert.set_timeout(AlertTimeout::After(Duration::from_millis(1500)));
        alert.set_image(None).unwrap();

        assert_eq!(
            recorder.events(),
            vec![
                "attach",
                "alert_string:Deleted",
                "alert_type:Some(Warning)",
                "alert_timeout:After(1.5s)",
                "alert_image:none",
            ]
        );
    }
}
