//! Uploaded files on local disk, below the configured media root.

use crate::utils::nice_id;
use app_state::StorageSettings;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument, warn};

pub const PHOTO_FOLDER: &str = "photo_gallery";
pub const VIDEO_THUMBNAIL_FOLDER: &str = "video_thumbnails";
pub const PRODUCT_MEDIA_FOLDER: &str = "products/media";

const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error on stored file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid stored file path: {0}")]
    InvalidPath(String),
}

/// A file received in a multipart upload.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct FileStore {
    settings: StorageSettings,
}

impl FileStore {
    #[must_use]
    pub const fn new(settings: StorageSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn media_root(&self) -> &Path {
        &self.settings.media_root
    }

    /// Writes `bytes` below `folder` and returns the stored path relative to the media root.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn save(
        &self,
        folder: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        let relative = format!(
            "{}/{}-{}",
            folder.trim_matches('/'),
            nice_id(10),
            sanitize_file_name(original_name)
        );
        let target = self.resolve(&relative)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        debug!("Stored upload at {}", target.display());
        Ok(relative)
    }

    /// Saves an upload, see [`FileStore::save`].
    pub async fn save_upload(&self, folder: &str, upload: &Upload) -> Result<String, StorageError> {
        self.save(folder, &upload.file_name, &upload.bytes).await
    }

    /// Public URL of a stored file.
    #[must_use]
    pub fn url(&self, relative_path: &str) -> String {
        self.settings.public_url(relative_path)
    }

    /// Deletes a stored file. Returns `false` when it was already gone.
    #[instrument(skip(self))]
    pub async fn remove(&self, relative_path: &str) -> Result<bool, StorageError> {
        let target = self.resolve(relative_path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("Stored file {} was already gone", target.display());
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes every file in `relative_paths`. Every path is attempted even after a failure;
    /// the first failure is returned.
    pub async fn remove_all<I, S>(&self, relative_paths: I) -> Result<usize, StorageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut removed = 0;
        let mut first_error = None;
        for path in relative_paths {
            match self.remove(path.as_ref()).await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(err) => {
                    warn!("Could not remove stored file {}: {err}", path.as_ref());
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(removed),
        }
    }

    fn resolve(&self, relative_path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(relative_path.trim_start_matches('/'));
        let is_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if relative_path.trim().is_empty() || !is_plain {
            return Err(StorageError::InvalidPath(relative_path.to_owned()));
        }
        Ok(self.settings.absolute_path(relative_path))
    }
}

/// Reduces an uploaded file name to a safe final path component.
#[must_use]
pub fn sanitize_file_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        return "upload".to_owned();
    }
    if cleaned.len() <= MAX_NAME_LEN {
        return cleaned.to_owned();
    }
    // Keep the extension when shortening.
    match cleaned.rsplit_once('.') {
        Some((stem, ext)) if ext.len() < 10 => {
            let stem_len = MAX_NAME_LEN - ext.len() - 1;
            format!("{}.{ext}", &stem[..stem_len.min(stem.len())])
        }
        _ => cleaned[..MAX_NAME_LEN].to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileStore {
        FileStore::new(StorageSettings {
            media_root: dir.path().to_path_buf(),
            public_url_prefix: "/media".to_owned(),
        })
    }

    #[test]
    fn sanitizes_names() {
        assert_eq!(sanitize_file_name("holiday photo.JPG"), "holiday_photo.JPG");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\cat.png"), "cat.png");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "upload");

        let long = format!("{}.pdf", "a".repeat(300));
        let short = sanitize_file_name(&long);
        assert_eq!(short.len(), MAX_NAME_LEN);
        assert!(short.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn save_then_remove() {
        let dir = TempDir::new().expect("temp dir");
        let files = store(&dir);

        let path = files
            .save(PHOTO_FOLDER, "shop front.jpg", b"jpeg bytes")
            .await
            .expect("saved");
        assert!(path.starts_with("photo_gallery/"));
        assert!(path.ends_with("-shop_front.jpg"));
        assert_eq!(
            std::fs::read(dir.path().join(&path)).expect("readable"),
            b"jpeg bytes"
        );
        assert_eq!(files.url(&path), format!("/media/{path}"));

        assert!(files.remove(&path).await.expect("removed"));
        assert!(!dir.path().join(&path).exists());
    }

    #[tokio::test]
    async fn removing_a_missing_file_is_not_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let files = store(&dir);
        assert!(!files.remove("photo_gallery/gone.jpg").await.expect("no-op"));
    }

    #[tokio::test]
    async fn same_name_twice_gives_two_files() {
        let dir = TempDir::new().expect("temp dir");
        let files = store(&dir);
        let first = files.save(PRODUCT_MEDIA_FOLDER, "a.png", b"1").await.expect("saved");
        let second = files.save(PRODUCT_MEDIA_FOLDER, "a.png", b"2").await.expect("saved");
        assert_ne!(first, second);
        assert_eq!(files.remove_all([&first, &second]).await.expect("removed"), 2);
    }

    #[tokio::test]
    async fn remove_all_attempts_every_path() {
        let dir = TempDir::new().expect("temp dir");
        let files = store(&dir);
        // A directory where a file is expected cannot be unlinked.
        std::fs::create_dir_all(dir.path().join("photo_gallery/stuck.jpg")).expect("dir");
        let saved = files.save(PHOTO_FOLDER, "b.jpg", b"2").await.expect("saved");

        let result = files
            .remove_all(["photo_gallery/stuck.jpg", saved.as_str()])
            .await;

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(!dir.path().join(&saved).exists());
    }

    #[tokio::test]
    async fn rejects_paths_outside_the_media_root() {
        let dir = TempDir::new().expect("temp dir");
        let files = store(&dir);
        assert!(matches!(
            files.remove("../outside.txt").await,
            Err(StorageError::InvalidPath(_))
        ));
        assert!(matches!(
            files.remove("  ").await,
            Err(StorageError::InvalidPath(_))
        ));
    }
}
