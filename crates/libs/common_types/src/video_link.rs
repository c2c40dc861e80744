//! Pulls a hosted-video identifier out of the link shapes admins paste into the back office
//! and derives the canonical embed and thumbnail URLs from it.
//!
//! Resolution is pure pattern matching: no network access, no stored state. Whether a stored
//! thumbnail should win over the derived one is up to the caller.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;

const EMBED_BASE_URL: &str = "https://www.youtube.com/embed";
const THUMBNAIL_BASE_URL: &str = "https://img.youtube.com/vi";
const THUMBNAIL_FILE: &str = "hqdefault.jpg";

/// Link shapes that carry a video identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkShape {
    /// `https://www.youtube.com/embed/<id>`
    Embed,
    /// `https://www.youtube.com/watch?v=<id>`, `v` in any position of the query.
    Watch,
    /// `https://youtu.be/<id>`
    Short,
    /// `https://www.youtube.com/v/<id>`, the old flash player link.
    LegacyPlayer,
}

// Tried in order, first match wins. Every pattern requires the id to be closed off by a
// delimiter or the end of the input so a partial token is never accepted.
static LINK_PATTERNS: LazyLock<Vec<(LinkShape, Regex)>> = LazyLock::new(|| {
    [
        (LinkShape::Embed, r"(?:^|/)embed/([A-Za-z0-9_-]+)(?:[/?&#]|$)"),
        (
            LinkShape::Watch,
            r"/watch\?(?:[^#]*?&)?v=([A-Za-z0-9_-]+)(?:[&#]|$)",
        ),
        (LinkShape::Short, r"youtu\.be/([A-Za-z0-9_-]+)(?:[/?&#]|$)"),
        (
            LinkShape::LegacyPlayer,
            r"youtube\.com/v/([A-Za-z0-9_-]+)(?:[/?&#]|$)",
        ),
    ]
    .into_iter()
    .map(|(shape, pattern)| {
        let regex = Regex::new(pattern).expect("video link patterns are valid regexes");
        (shape, regex)
    })
    .collect()
});

/// Display data derived from a video link.
///
/// All three fields are set together or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoRef {
    pub id: Option<String>,
    pub embed_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl VideoRef {
    /// Builds the canonical links for a known video id.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        Self {
            id: Some(id.to_owned()),
            embed_url: Some(format!("{EMBED_BASE_URL}/{id}")),
            thumbnail_url: Some(format!("{THUMBNAIL_BASE_URL}/{id}/{THUMBNAIL_FILE}")),
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.id.is_some()
    }
}

/// Finds the video id in `raw_url`, together with the shape that matched.
#[must_use]
pub fn find_video_id(raw_url: &str) -> Option<(LinkShape, &str)> {
    let raw_url = raw_url.trim();
    if raw_url.is_empty() {
        return None;
    }

    LINK_PATTERNS.iter().find_map(|(shape, regex)| {
        regex
            .captures(raw_url)
            .and_then(|caps| caps.get(1))
            .map(|id| (*shape, id.as_str()))
    })
}

/// Resolves a stored link into its video id, embed URL and thumbnail URL.
///
/// Empty, missing or unrecognised input yields an all-`None` [`VideoRef`].
#[must_use]
pub fn resolve(raw_url: Option<&str>) -> VideoRef {
    raw_url
        .and_then(find_video_id)
        .map(|(_, id)| VideoRef::from_id(id))
        .unwrap_or_default()
}

/// Cheap check whether a link points at the video platform at all.
#[must_use]
pub fn is_video_platform_url(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "YK1gvY2KS9c";

    #[test]
    fn embed_link_with_tracking_parameter() {
        let video = resolve(Some("https://www.youtube.com/embed/YK1gvY2KS9c?si=hzqRIp8afo8AqE70"));
        assert_eq!(video.id.as_deref(), Some(ID));
        assert_eq!(
            video.embed_url.as_deref(),
            Some("https://www.youtube.com/embed/YK1gvY2KS9c")
        );
        assert_eq!(
            video.thumbnail_url.as_deref(),
            Some("https://img.youtube.com/vi/YK1gvY2KS9c/hqdefault.jpg")
        );
    }

    #[test]
    fn watch_link_ignores_parameter_order() {
        for url in [
            "https://www.youtube.com/watch?v=YK1gvY2KS9c&t=10s",
            "https://www.youtube.com/watch?t=10s&v=YK1gvY2KS9c",
            "https://m.youtube.com/watch?feature=share&list=PL1&v=YK1gvY2KS9c#comments",
        ] {
            assert_eq!(find_video_id(url), Some((LinkShape::Watch, ID)), "{url}");
        }
    }

    #[test]
    fn short_link() {
        assert_eq!(
            find_video_id("https://youtu.be/YK1gvY2KS9c"),
            Some((LinkShape::Short, ID))
        );
        assert_eq!(
            find_video_id("https://youtu.be/YK1gvY2KS9c?si=abc"),
            Some((LinkShape::Short, ID))
        );
    }

    #[test]
    fn legacy_player_link() {
        assert_eq!(
            find_video_id("http://www.youtube.com/v/YK1gvY2KS9c?version=3"),
            Some((LinkShape::LegacyPlayer, ID))
        );
    }

    #[test]
    fn embed_wins_over_watch() {
        let url = "https://www.youtube.com/embed/abcdefghijk?origin=https://www.youtube.com/watch?v=YK1gvY2KS9c";
        assert_eq!(find_video_id(url), Some((LinkShape::Embed, "abcdefghijk")));
    }

    #[test]
    fn all_shapes_agree_on_the_same_video() {
        let expected = VideoRef::from_id(ID);
        for url in [
            "https://www.youtube.com/embed/YK1gvY2KS9c",
            "https://www.youtube.com/watch?v=YK1gvY2KS9c&t=10s",
            "https://youtu.be/YK1gvY2KS9c",
            "  https://youtu.be/YK1gvY2KS9c\n",
        ] {
            assert_eq!(resolve(Some(url)), expected, "{url}");
        }
    }

    #[test]
    fn resolving_the_embed_url_again_is_stable() {
        for url in [
            "https://www.youtube.com/watch?v=YK1gvY2KS9c&t=10s",
            "https://youtu.be/YK1gvY2KS9c",
            "https://www.youtube.com/embed/YK1gvY2KS9c?si=x",
        ] {
            let first = resolve(Some(url));
            let second = resolve(first.embed_url.as_deref());
            assert_eq!(first.id, second.id);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn empty_and_garbage_resolve_to_nothing() {
        assert_eq!(resolve(None), VideoRef::default());
        assert_eq!(resolve(Some("")), VideoRef::default());
        assert_eq!(resolve(Some("   ")), VideoRef::default());
        assert_eq!(resolve(Some("not a url at all")), VideoRef::default());
        assert_eq!(resolve(Some("https://vimeo.com/12345")), VideoRef::default());
        assert_eq!(resolve(Some("https://www.youtube.com/watch?list=PL1")), VideoRef::default());
        assert!(!resolve(Some("https://www.youtube.com/")).is_resolved());
    }

    #[test]
    fn id_must_end_at_a_delimiter() {
        assert_eq!(find_video_id("https://www.youtube.com/embed/YK1gvY2KS9c.mp4"), None);
        assert_eq!(
            find_video_id("https://www.youtube.com/embed/YK1gvY2KS9c/"),
            Some((LinkShape::Embed, ID))
        );
        assert_eq!(
            find_video_id("https://www.youtube.com/embed/YK1gvY2KS9c&feature=oembed"),
            Some((LinkShape::Embed, ID))
        );
    }

    #[test]
    fn platform_detection() {
        assert!(is_video_platform_url("https://youtu.be/x"));
        assert!(is_video_platform_url("https://www.youtube.com/watch?v=x"));
        assert!(!is_video_platform_url("https://example.com/video.mp4"));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(VideoRef::from_id(ID)).expect("serializable");
        assert_eq!(json["embedUrl"], "https://www.youtube.com/embed/YK1gvY2KS9c");
        assert_eq!(json["thumbnailUrl"], "https://img.youtube.com/vi/YK1gvY2KS9c/hqdefault.jpg");
    }
}
