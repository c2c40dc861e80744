use crate::mail::{MailError, Mailer, OutgoingMail};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

/// Delivers mail by posting it as JSON to an HTTP relay.
#[derive(Debug, Clone)]
pub struct RelayMailer {
    http_client: Client,
    relay_url: Url,
    token: Option<String>,
}

impl RelayMailer {
    pub fn new(http_client: Client, relay_url: &str, token: Option<String>) -> Result<Self, MailError> {
        Ok(Self {
            http_client,
            relay_url: relay_url.parse()?,
            token,
        })
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    #[instrument(skip(self, mail), fields(subject = %mail.subject))]
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let mut request = self.http_client.post(self.relay_url.clone()).json(mail);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        debug!("Mail relay accepted the message.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    type Received = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    async fn spawn_relay(status: StatusCode) -> (String, Received) {
        let received: Received = Arc::default();
        let sink = received.clone();
        let app = Router::new().route(
            "/send",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(ToOwned::to_owned);
                    sink.lock().expect("lock").push((auth, body));
                    status
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        (format!("http://{addr}/send"), received)
    }

    fn mail() -> OutgoingMail {
        OutgoingMail {
            from: "site@example.com".to_owned(),
            to: vec!["team@example.com".to_owned()],
            subject: "New Enquiry".to_owned(),
            body: "Dear Team".to_owned(),
        }
    }

    #[tokio::test]
    async fn posts_json_with_bearer_token() {
        let (url, received) = spawn_relay(StatusCode::ACCEPTED).await;
        let mailer =
            RelayMailer::new(Client::new(), &url, Some("secret".to_owned())).expect("mailer");
        mailer.send(&mail()).await.expect("sent");

        let received = received.lock().expect("lock");
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].0.as_deref(), Some("Bearer secret"));
        assert_eq!(received[0].1["subject"], "New Enquiry");
        assert_eq!(received[0].1["to"][0], "team@example.com");
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let (url, _) = spawn_relay(StatusCode::INTERNAL_SERVER_ERROR).await;
        let mailer = RelayMailer::new(Client::new(), &url, None).expect("mailer");
        let err = mailer.send(&mail()).await.expect_err("rejected");
        assert!(matches!(err, MailError::Rejected { status: 500, .. }));
    }

    #[test]
    fn invalid_relay_url() {
        assert!(matches!(
            RelayMailer::new(Client::new(), "not a url", None),
            Err(MailError::InvalidRelayUrl(_))
        ));
    }
}
