use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use std::path::Path;
use tracing::debug;

const SETTINGS_PATH: &str = "config/settings.yaml";

/// Loads `config/settings.yaml`, applies `.env` and `APP__` environment overrides.
pub fn load_app_settings() -> Result<AppSettings> {
    // Need to load from dotenv to get it to overwrite the db url from env.
    dotenv::from_path(".env").ok();
    load_settings_from_path(Path::new(SETTINGS_PATH), true)
}

/// Loads settings from a specific yaml file, optionally layering environment overrides on top.
///
/// Environment variables use the `APP` prefix and `__` as separator,
/// e.g. `APP__SECRETS__DATABASE_URL`.
pub fn load_settings_from_path(path: &Path, use_env: bool) -> Result<AppSettings> {
    let config_path = path.canonicalize()?;
    debug!("Loading settings from {}", config_path.display());

    let mut builder = config::Config::builder().add_source(config::File::from(config_path));
    if use_env {
        builder = builder.add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );
    }

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    raw_settings.try_into()
}

#[cfg(test)]
mod tests {
    use super::load_settings_from_path;
    use std::fs;
    use tempfile::TempDir;

    const SETTINGS: &str = r#"
api:
  host: 127.0.0.1
  port: 9475
  allowed_origins: ["http://localhost:3000"]
  max_upload_mb: 25
storage:
  media_root: media
  public_url_prefix: /media/
mail:
  relay_url: ""
  from_address: website@example.com
  enquiry_recipient: enquiries@example.com
logging:
  level: debug
secrets:
  jwt: test-secret
  database_url: postgres://localhost/site
constants:
  database:
    max_connections: 5
    min_connection: 1
    max_lifetime: 1800
    idle_timeout: 600
    acquire_timeout: 5
  auth:
    access_token_expiry_minutes: 15
    refresh_token_expiry_days: 30
"#;

    #[test]
    fn loads_yaml_file() -> color_eyre::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("settings.yaml");
        fs::write(&path, SETTINGS)?;

        let settings = load_settings_from_path(&path, false)?;

        assert_eq!(settings.api.port, 9475);
        assert_eq!(settings.storage.public_url_prefix, "/media");
        assert!(settings.storage.media_root.is_absolute());
        assert_eq!(settings.mail.relay_url, None);
        assert_eq!(settings.secrets.mail_relay_token, None);
        assert_eq!(settings.auth.refresh_token_expiry_days, 30);
        assert_eq!(
            settings.storage.public_url("photo_gallery/a.jpg"),
            "/media/photo_gallery/a.jpg"
        );
        assert_eq!(
            settings.storage.absolute_path("/photo_gallery/a.jpg"),
            settings.storage.media_root.join("photo_gallery/a.jpg")
        );
        Ok(())
    }

    #[test]
    fn rejects_relative_url_prefix() -> color_eyre::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("settings.yaml");
        fs::write(&path, SETTINGS.replace("/media/", "media"))?;

        assert!(load_settings_from_path(&path, false).is_err());
        Ok(())
    }
}
