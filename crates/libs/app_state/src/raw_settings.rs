use serde::Deserialize;
use std::path::PathBuf;

/// Settings exactly as they appear in `config/settings.yaml` (plus `APP__` env overrides).
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub api: ApiSettings,
    pub storage: RawStorageSettings,
    pub mail: MailSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
    pub constants: RawConstants,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
    /// Largest accepted request body, used for multipart uploads.
    pub max_upload_mb: usize,
}

/// Where uploaded files live and how they are exposed.
#[derive(Debug, Deserialize, Clone)]
pub struct RawStorageSettings {
    pub media_root: PathBuf,
    pub public_url_prefix: String,
}

/// Outbound notification mail.
#[derive(Debug, Deserialize, Clone)]
pub struct MailSettings {
    /// HTTP mail relay endpoint. When unset, mails are only written to the log.
    pub relay_url: Option<String>,
    pub from_address: String,
    /// Fixed recipient of new-enquiry notifications.
    pub enquiry_recipient: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub jwt: String,
    pub database_url: String,
    pub mail_relay_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawConstants {
    pub database: DatabaseConstants,
    pub auth: AuthConstants,
}

/// Database connection and related configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConstants {
    pub max_connections: u32,
    pub min_connection: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConstants {
    pub access_token_expiry_minutes: i64,
    pub refresh_token_expiry_days: i64,
}
