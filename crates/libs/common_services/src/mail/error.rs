use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid mail relay URL: {0}")]
    InvalidRelayUrl(#[from] url::ParseError),

    #[error("Mail relay request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Mail relay rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
