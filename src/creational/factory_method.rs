//! Pattern: Factory Method
//! Example: notification channels and platform buttons chosen by name

use crate::error::Result;
use crate::scaffold::Registry;

// ============================================
// Notifications
// ============================================

pub trait Notification {
    fn channel(&self) -> &'static str;
    fn send(&self, message: &str) -> String;
}

pub struct EmailNotification;
pub struct SmsNotification;
pub struct PushNotification;

impl Notification for EmailNotification {
    fn channel(&self) -> &'static str {
        "email"
    }

    fn send(&self, message: &str) -> String {
        format!("Sending email notification: {message}")
    }
}

impl Notification for SmsNotification {
    fn channel(&self) -> &'static str {
        "sms"
    }

    fn send(&self, message: &str) -> String {
        format!("Sending SMS notification: {message}")
    }
}

impl Notification for PushNotification {
    fn channel(&self) -> &'static str {
        "push"
    }

    fn send(&self, message: &str) -> String {
        format!("Sending push notification: {message}")
    }
}

pub fn notification_registry() -> Registry<Box<dyn Notification>> {
    Registry::new("notification channel")
        .register("email", || Box::new(EmailNotification) as Box<dyn Notification>)
        .register("sms", || Box::new(SmsNotification) as Box<dyn Notification>)
        .register("push", || Box::new(PushNotification) as Box<dyn Notification>)
}

pub fn new_notification(channel: &str) -> Result<Box<dyn Notification>> {
    notification_registry().create(channel)
}

// ============================================
// Buttons
// ============================================

pub trait Button {
    fn render(&self) -> String;
    fn on_click(&self) -> String;
}

pub struct WindowsButton;
pub struct HtmlButton;

impl Button for WindowsButton {
    fn render(&self) -> String {
        "Rendering Windows button".to_string()
    }

    fn on_click(&self) -> String {
        "Clicking Windows button".to_string()
    }
}

impl Button for HtmlButton {
    fn render(&self) -> String {
        "Rendering HTML button".to_string()
    }

    fn on_click(&self) -> String {
        "Clicking HTML button".to_string()
    }
}

pub fn create_button(system: &str) -> Result<Box<dyn Button>> {
    Registry::new("button system")
        .register("windows", || Box::new(WindowsButton) as Box<dyn Button>)
        .register("web", || Box::new(HtmlButton) as Box<dyn Button>)
        .create(system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    #[test]
    fn test_each_channel_constructs() {
        for channel in ["email", "sms", "push"] {
            let n = new_notification(channel).unwrap();
            assert_eq!(n.channel(), channel);
        }
        assert_eq!(
            new_notification("SMS").unwrap().send("hi"),
            "Sending SMS notification: hi"
        );
    }

    #[test]
    fn test_unknown_channel() {
        let err = new_notification("pigeon").err().unwrap();
        assert!(matches!(err, CatalogError::UnknownVariant { kind: "notification channel", .. }));
    }

    #[test]
    fn test_buttons() {
        let button = create_button("web").unwrap();
        assert_eq!(button.render(), "Rendering HTML button");
        assert_eq!(button.on_click(), "Clicking HTML button");
        assert!(create_button("macos").is_err());
    }
}
