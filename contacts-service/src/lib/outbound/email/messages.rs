use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::auth::models::VerificationEmail;

/// Serializable envelope for all email requests.
///
/// Consumed by the mail relay, which renders and sends the actual email.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum EmailMessage {
    EmailVerificationRequested(EmailVerificationRequestedMessage),
}

/// Request to send an email-verification link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailVerificationRequestedMessage {
    pub event_id: String,
    pub email: String,
    pub name: Option<String>,
    pub token: String,
    pub confirmation_url: String,
    pub requested_at: DateTime<Utc>,
}

impl EmailVerificationRequestedMessage {
    /// Build the message for a verification email.
    ///
    /// # Arguments
    /// * `email` - Verification email produced by the auth service
    /// * `base_url` - Public base URL of this service
    pub fn new(email: &VerificationEmail, base_url: &str) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            email: email.email.to_string(),
            name: email.name.clone(),
            token: email.token.clone(),
            confirmation_url: confirmation_url(base_url, &email.token),
            requested_at: Utc::now(),
        }
    }
}

impl EmailMessage {
    pub fn verification(email: &VerificationEmail, base_url: &str) -> Self {
        EmailMessage::EmailVerificationRequested(EmailVerificationRequestedMessage::new(
            email, base_url,
        ))
    }
}

fn confirmation_url(base_url: &str, token: &str) -> String {
    format!(
        "{}/auth/confirmed_email/{}",
        base_url.trim_end_matches('/'),
        token
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::EmailAddress;

    fn verification_email() -> VerificationEmail {
        VerificationEmail {
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            name: Some("Alice".to_string()),
            token: "abc.def.ghi".to_string(),
        }
    }

    #[test]
    fn test_verification_message_shape() {
        let message = EmailMessage::verification(&verification_email(), "https://contacts.example");

        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["event_type"], "email_verification_requested");
        assert_eq!(value["email"], "a@x.com");
        assert_eq!(value["name"], "Alice");
        assert_eq!(value["token"], "abc.def.ghi");
        assert_eq!(
            value["confirmation_url"],
            "https://contacts.example/auth/confirmed_email/abc.def.ghi"
        );
        assert!(value["event_id"].is_string());
        assert!(value["requested_at"].is_string());
    }

    #[test]
    fn test_confirmation_url_trailing_slash() {
        assert_eq!(
            confirmation_url("http://localhost:8000/", "t"),
            "http://localhost:8000/auth/confirmed_email/t"
        );
    }
}
