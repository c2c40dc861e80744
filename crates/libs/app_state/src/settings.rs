use crate::{
    ApiSettings, AuthConstants, DatabaseConstants, LoggingSettings, MailSettings, RawSettings,
    SecretSettings,
};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use std::path::{PathBuf, absolute};

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub mail: MailSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
    pub database: DatabaseConstants,
    pub auth: AuthConstants,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    /// Absolute folder that uploaded files are written to.
    pub media_root: PathBuf,
    /// URL prefix the media root is served under, without trailing slash.
    pub public_url_prefix: String,
}

impl TryFrom<RawSettings> for AppSettings {
    type Error = color_eyre::Report;

    fn try_from(raw: RawSettings) -> Result<Self> {
        let media_root = absolute(&raw.storage.media_root)
            .map_err(|e| eyre!("Invalid storage.media_root: {e}"))?;
        let public_url_prefix = raw.storage.public_url_prefix.trim_end_matches('/').to_owned();
        if !public_url_prefix.starts_with('/') {
            return Err(eyre!(
                "storage.public_url_prefix must start with '/', got '{public_url_prefix}'"
            ));
        }

        let mut mail = raw.mail;
        mail.relay_url = mail.relay_url.filter(|url| !url.trim().is_empty());
        let mut secrets = raw.secrets;
        secrets.mail_relay_token = secrets
            .mail_relay_token
            .filter(|token| !token.trim().is_empty());

        Ok(Self {
            api: raw.api,
            storage: StorageSettings {
                media_root,
                public_url_prefix,
            },
            mail,
            logging: raw.logging,
            secrets,
            database: raw.constants.database,
            auth: raw.constants.auth,
        })
    }
}

impl StorageSettings {
    /// Public URL of a file stored under the media root.
    #[must_use]
    pub fn public_url(&self, relative_path: &str) -> String {
        format!(
            "{}/{}",
            self.public_url_prefix,
            relative_path.trim_start_matches('/')
        )
    }

    /// Location of a stored file on disk.
    #[must_use]
    pub fn absolute_path(&self, relative_path: &str) -> PathBuf {
        self.media_root.join(relative_path.trim_start_matches('/'))
    }
}
