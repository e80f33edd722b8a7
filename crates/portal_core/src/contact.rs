use serde::Serialize;

pub const CONTACT_REQUIRED_MESSAGE: &str = "Please fill in all required fields";
pub const CONTACT_SENT_MESSAGE: &str = "Message sent successfully!";
pub const CONTACT_REJECTED_MESSAGE: &str = "Failed to send message";
pub const CONTACT_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

/// Contact message as sent to the contact endpoint. Values are trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(name: &str, email: &str, phone: &str, subject: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            subject: subject.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    /// Phone is optional; every other field is required.
    pub fn validate(&self) -> Result<(), &'static str> {
        let missing = [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .any(|value| value.is_empty());
        if missing {
            Err(CONTACT_REQUIRED_MESSAGE)
        } else {
            Ok(())
        }
    }
}
