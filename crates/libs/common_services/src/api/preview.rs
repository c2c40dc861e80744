//! What the site shows for a video entry or a product media slide.
//!
//! The link resolver only knows about links; stored uploads take precedence over
//! anything derived from a link, and that ordering lives here.

use crate::database::product_media::ProductMedia;
use crate::database::video::Video;
use crate::storage::FileStore;
use common_types::MediaKind;
use common_types::video_link::resolve;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaPreview {
    pub thumbnail_url: Option<String>,
    /// Full size image, for image slides.
    pub image_url: Option<String>,
    /// Inline player URL.
    pub embed_url: Option<String>,
    /// Uploaded video file, when there is no embeddable link.
    pub video_file_url: Option<String>,
    /// A link that can only be offered as a plain external link.
    pub external_url: Option<String>,
}

impl MediaPreview {
    /// Nothing to show.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.thumbnail_url.is_some()
            || self.image_url.is_some()
            || self.embed_url.is_some()
            || self.video_file_url.is_some()
            || self.external_url.is_some()
    }
}

/// Preview of a video gallery entry.
#[must_use]
pub fn video_entry_preview(files: &FileStore, video: &Video) -> MediaPreview {
    let resolved = resolve(video.source_url.as_deref());
    let thumbnail_url = video
        .thumbnail
        .as_deref()
        .map(|path| files.url(path))
        .or(resolved.thumbnail_url);
    MediaPreview {
        thumbnail_url,
        embed_url: resolved.embed_url,
        ..MediaPreview::none()
    }
}

/// Preview of one product media slide.
#[must_use]
pub fn product_media_preview(files: &FileStore, media: &ProductMedia) -> MediaPreview {
    let file_url = media.file.as_deref().map(|path| files.url(path));
    let external = media
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());

    match media.kind {
        MediaKind::Image => {
            let image_url = file_url.or_else(|| external.map(ToOwned::to_owned));
            MediaPreview {
                thumbnail_url: image_url.clone(),
                image_url,
                ..MediaPreview::none()
            }
        }
        MediaKind::Video => {
            let resolved = resolve(external);
            let thumbnail_url = media
                .thumbnail
                .as_deref()
                .map(|path| files.url(path))
                .or(resolved.thumbnail_url);
            let external_url = if resolved.embed_url.is_none() {
                external.map(ToOwned::to_owned)
            } else {
                None
            };
            let video_file_url = if resolved.embed_url.is_none() {
                file_url
            } else {
                None
            };
            MediaPreview {
                thumbnail_url,
                embed_url: resolved.embed_url,
                video_file_url,
                external_url,
                ..MediaPreview::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_state::StorageSettings;
    use chrono::Utc;
    use std::path::PathBuf;

    const LINK: &str = "https://youtu.be/YK1gvY2KS9c";
    const EMBED: &str = "https://www.youtube.com/embed/YK1gvY2KS9c";
    const DERIVED_THUMB: &str = "https://img.youtube.com/vi/YK1gvY2KS9c/hqdefault.jpg";

    fn files() -> FileStore {
        FileStore::new(StorageSettings {
            media_root: PathBuf::from("/srv/media"),
            public_url_prefix: "/media".to_owned(),
        })
    }

    fn video(source_url: Option<&str>, thumbnail: Option<&str>) -> Video {
        Video {
            id: 1,
            caption: None,
            source_url: source_url.map(ToOwned::to_owned),
            thumbnail: thumbnail.map(ToOwned::to_owned),
            created_at: Utc::now(),
        }
    }

    fn media(
        kind: MediaKind,
        file: Option<&str>,
        url: Option<&str>,
        thumbnail: Option<&str>,
    ) -> ProductMedia {
        ProductMedia {
            id: 1,
            product_id: 1,
            kind,
            file: file.map(ToOwned::to_owned),
            url: url.map(ToOwned::to_owned),
            thumbnail: thumbnail.map(ToOwned::to_owned),
            display_order: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn video_entry_uses_derived_thumbnail() {
        let preview = video_entry_preview(&files(), &video(Some(LINK), None));
        assert_eq!(preview.thumbnail_url.as_deref(), Some(DERIVED_THUMB));
        assert_eq!(preview.embed_url.as_deref(), Some(EMBED));
    }

    #[test]
    fn stored_video_thumbnail_wins() {
        let preview = video_entry_preview(
            &files(),
            &video(Some(LINK), Some("video_thumbnails/abc-front.jpg")),
        );
        assert_eq!(
            preview.thumbnail_url.as_deref(),
            Some("/media/video_thumbnails/abc-front.jpg")
        );
        assert_eq!(preview.embed_url.as_deref(), Some(EMBED));
    }

    #[test]
    fn unresolvable_video_entry_has_no_player() {
        let preview = video_entry_preview(&files(), &video(Some("https://vimeo.com/1"), None));
        assert_eq!(preview, MediaPreview::none());
        assert!(!preview.is_available());
    }

    #[test]
    fn image_slide_prefers_upload() {
        let preview = product_media_preview(
            &files(),
            &media(
                MediaKind::Image,
                Some("products/media/x-pump.jpg"),
                Some("https://cdn.example.com/pump.jpg"),
                None,
            ),
        );
        assert_eq!(preview.image_url.as_deref(), Some("/media/products/media/x-pump.jpg"));
        assert_eq!(preview.thumbnail_url, preview.image_url);
        assert_eq!(preview.embed_url, None);
    }

    #[test]
    fn image_slide_falls_back_to_link() {
        let preview = product_media_preview(
            &files(),
            &media(MediaKind::Image, None, Some("https://cdn.example.com/pump.jpg"), None),
        );
        assert_eq!(preview.image_url.as_deref(), Some("https://cdn.example.com/pump.jpg"));
    }

    #[test]
    fn video_slide_with_link() {
        let preview = product_media_preview(
            &files(),
            &media(MediaKind::Video, Some("products/media/demo.mp4"), Some(LINK), None),
        );
        assert_eq!(preview.embed_url.as_deref(), Some(EMBED));
        assert_eq!(preview.thumbnail_url.as_deref(), Some(DERIVED_THUMB));
        assert_eq!(preview.video_file_url, None);
        assert_eq!(preview.external_url, None);
    }

    #[test]
    fn video_slide_stored_thumbnail_wins() {
        let preview = product_media_preview(
            &files(),
            &media(MediaKind::Video, None, Some(LINK), Some("products/media/t.jpg")),
        );
        assert_eq!(preview.thumbnail_url.as_deref(), Some("/media/products/media/t.jpg"));
    }

    #[test]
    fn video_slide_without_link_shows_stored_thumbnail() {
        let preview = product_media_preview(
            &files(),
            &media(MediaKind::Video, None, None, Some("products/media/t.jpg")),
        );
        assert_eq!(preview.thumbnail_url.as_deref(), Some("/media/products/media/t.jpg"));
        assert_eq!(preview.embed_url, None);
        assert!(preview.is_available());
    }

    #[test]
    fn video_slide_with_uploaded_file_only() {
        let preview = product_media_preview(
            &files(),
            &media(MediaKind::Video, Some("products/media/demo.mp4"), None, None),
        );
        assert_eq!(preview.embed_url, None);
        assert_eq!(
            preview.video_file_url.as_deref(),
            Some("/media/products/media/demo.mp4")
        );
        assert_eq!(preview.thumbnail_url, None);
    }

    #[test]
    fn video_slide_with_other_host_is_external_link() {
        let preview = product_media_preview(
            &files(),
            &media(MediaKind::Video, None, Some("https://vimeo.com/1"), None),
        );
        assert_eq!(preview.embed_url, None);
        assert_eq!(preview.external_url.as_deref(), Some("https://vimeo.com/1"));
    }

    #[test]
    fn empty_slide_has_no_preview() {
        let preview = product_media_preview(&files(), &media(MediaKind::Video, None, Some("  "), None));
        assert!(!preview.is_available());
    }
}
