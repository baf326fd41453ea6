//! Operator notifications.
//!
//! The checkup loop reports problems through the [`Notifier`] trait so tests
//! can capture notifications in memory. The production implementation sends
//! plain-text email through an SMTP relay.

use crate::config::NotifyConfig;
use crate::error::{Result, SyncError};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

/// Delivers a message to the operator.
pub trait Notifier: Send + Sync {
    /// Send one notification.
    fn notify(&self, subject: &str, body: &str) -> Result<()>;
}

/// Email notifier backed by an SMTP relay.
#[derive(Debug)]
pub struct SmtpNotifier {
    config: NotifyConfig,
}

impl SmtpNotifier {
    /// Create a notifier from config.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`] when the operator or sender address is
    /// missing.
    pub fn new(config: NotifyConfig) -> Result<Self> {
        if config.operator_email.trim().is_empty() {
            return Err(SyncError::Config("notify.operator_email is empty".into()));
        }
        if config.from_address.trim().is_empty() {
            return Err(SyncError::Config("notify.from_address is empty".into()));
        }
        Ok(Self { config })
    }
}

impl Notifier for SmtpNotifier {
    fn notify(&self, subject: &str, body: &str) -> Result<()> {
        let email = Message::builder()
            .from(
                self.config
                    .from_address
                    .parse()
                    .map_err(|e| SyncError::Notify(format!("bad from address: {e}")))?,
            )
            .to(self
                .config
                .operator_email
                .parse()
                .map_err(|e| SyncError::Notify(format!("bad operator address: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_owned())
            .map_err(|e| SyncError::Notify(format!("cannot build message: {e}")))?;

        let mut builder = SmtpTransport::relay(&self.config.smtp_relay)
            .map_err(|e| SyncError::Notify(format!("bad SMTP relay: {e}")))?;
        if let (Some(user), Some(pass)) = (
            self.config.smtp_username.as_deref(),
            self.config.smtp_password.as_deref(),
        ) {
            builder = builder.credentials(Credentials::new(user.to_owned(), pass.to_owned()));
        }

        builder
            .build()
            .send(&email)
            .map_err(|e| SyncError::Notify(format!("delivery failed: {e}")))?;

        info!(to = %self.config.operator_email, "operator notified");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(operator: &str, from: &str) -> NotifyConfig {
        NotifyConfig {
            operator_email: operator.into(),
            from_address: from.into(),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_missing_operator_address() {
        let err = SmtpNotifier::new(config_with("", "alerts@example.com")).unwrap_err();
        assert!(err.to_string().contains("operator_email"));
    }

    #[test]
    fn rejects_missing_from_address() {
        let err = SmtpNotifier::new(config_with("ops@example.com", " ")).unwrap_err();
        assert!(err.to_string().contains("from_address"));
    }

    #[test]
    fn accepts_complete_config() {
        assert!(SmtpNotifier::new(config_with("ops@example.com", "alerts@example.com")).is_ok());
    }
}
