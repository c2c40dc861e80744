use regex::Regex;
use std::sync::LazyLock;

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("slug pattern is valid"));
static SLUG_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("slug separator pattern is valid"));

/// Generate a URL-safe random ID of a given length.
#[must_use]
pub fn nice_id(length: usize) -> String {
    const URL_SAFE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_";
    (0..length)
        .map(|_| {
            let idx = rand::random_range(0..URL_SAFE.len());
            URL_SAFE[idx] as char
        })
        .collect()
}

/// Lowercase, ASCII-only, hyphen separated version of `value`.
#[must_use]
pub fn slugify(value: &str) -> String {
    let ascii: String = value.chars().filter(char::is_ascii).collect();
    let lowered = ascii.to_lowercase();
    let cleaned = NON_SLUG_CHARS.replace_all(&lowered, "");
    SLUG_SEPARATORS
        .replace_all(cleaned.trim(), "-")
        .trim_matches(|c| c == '-' || c == '_')
        .to_owned()
}

/// Slug of a product: its slugified title suffixed with its id, so it is unique.
#[must_use]
pub fn product_slug(title: &str, id: i32) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        id.to_string()
    } else {
        format!("{slug}-{id}")
    }
}

/// Trimmed copy of an optional form value, `None` when blank.
#[must_use]
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_id_has_requested_length() {
        let id = nice_id(12);
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    #[test]
    fn slugify_titles() {
        assert_eq!(slugify("Hydraulic Press 2000"), "hydraulic-press-2000");
        assert_eq!(slugify("  Pumps & Valves -- Series A "), "pumps-valves-series-a");
        assert_eq!(slugify("Café Motor"), "caf-motor");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn product_slug_appends_id() {
        assert_eq!(product_slug("Steel Pipe", 7), "steel-pipe-7");
        assert_eq!(product_slug("???", 7), "7");
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(Some("  hi ".into())), Some("hi".into()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}
