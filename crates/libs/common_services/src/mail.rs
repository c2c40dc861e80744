//! Outgoing e-mail. Messages are handed to an HTTP mail relay, or only logged when no
//! relay is configured.

mod error;
mod relay;

pub use error::MailError;
pub use relay::RelayMailer;

use app_state::AppSettings;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// Writes messages to the log instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        info!(
            to = ?mail.to,
            subject = %mail.subject,
            "No mail relay configured, not delivering:\n{}",
            mail.body
        );
        Ok(())
    }
}

/// Picks the relay mailer when `mail.relay_url` is set, the log mailer otherwise.
pub fn mailer_from_settings(settings: &AppSettings) -> Result<Arc<dyn Mailer>, MailError> {
    match &settings.mail.relay_url {
        Some(relay_url) => {
            let mailer = RelayMailer::new(
                reqwest::Client::new(),
                relay_url,
                settings.secrets.mail_relay_token.clone(),
            )?;
            info!("Sending mail through relay at {relay_url}");
            Ok(Arc::new(mailer))
        }
        None => {
            info!("No mail relay configured, outgoing mail will only be logged.");
            Ok(Arc::new(LogMailer))
        }
    }
}

/// Sends `mail` on a background task. Failures are logged and dropped.
pub fn dispatch_in_background(mailer: Arc<dyn Mailer>, mail: OutgoingMail) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = mailer.send(&mail).await {
            error!(subject = %mail.subject, "Failed to send mail: {e}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OutgoingMail>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
            self.sent.lock().expect("lock").push(mail.clone());
            Ok(())
        }
    }

    struct FailingMailer;

    #[async_trait]
    impl Mailer for FailingMailer {
        async fn send(&self, _mail: &OutgoingMail) -> Result<(), MailError> {
            Err(MailError::Rejected {
                status: 503,
                body: "relay down".to_owned(),
            })
        }
    }

    fn mail() -> OutgoingMail {
        OutgoingMail {
            from: "site@example.com".to_owned(),
            to: vec!["team@example.com".to_owned()],
            subject: "Hello".to_owned(),
            body: "Body".to_owned(),
        }
    }

    #[tokio::test]
    async fn background_dispatch_sends() {
        let mailer = Arc::new(RecordingMailer::default());
        dispatch_in_background(mailer.clone(), mail())
            .await
            .expect("task finished");
        assert_eq!(*mailer.sent.lock().expect("lock"), vec![mail()]);
    }

    #[tokio::test]
    async fn background_failure_does_not_panic() {
        let handle = dispatch_in_background(Arc::new(FailingMailer), mail());
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        assert!(LogMailer.send(&mail()).await.is_ok());
    }
}
