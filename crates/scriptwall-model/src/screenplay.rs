use regex::Regex;
use serde::{Deserialize, Serialize};

/// A screenplay fetched from a web source, cleaned and ready to paginate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screenplay {
    /// Filesystem-safe identifier derived from the source URL or a user-given name.
    pub slug: String,
    /// The page the text was fetched from.
    pub source_url: String,
    /// Cleaned full text.
    pub text: String,
}

impl Screenplay {
    pub fn new(slug: impl Into<String>, source_url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            source_url: source_url.into(),
            text: text.into(),
        }
    }

    /// Total whitespace-delimited token count.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Turn "The_Godfather.html" or "Pulp Fiction" into "the_godfather" / "pulp_fiction".
///
/// Runs of anything outside `[a-z0-9]` collapse to a single underscore;
/// leading/trailing underscores are trimmed. An empty result falls back to
/// "script" so a slug is always usable as a directory name.
pub fn slugify(text: &str) -> String {
    let re = Regex::new(r"[^a-z0-9]+").expect("valid regex");
    let lowered = text.trim().to_lowercase();
    let replaced = re.replace_all(&lowered, "_");
    let slug = replaced.trim_matches('_');

    if slug.is_empty() {
        "script".to_string()
    } else {
        slug.to_string()
    }
}

/// Derive a slug from the last path segment of a source URL, dropping the
/// file extension (".../scripts/pulp_fiction.html" → "pulp_fiction").
pub fn slug_from_url(url: &str) -> String {
    let last = url.trim_end_matches('/').rsplit('/').next().unwrap_or(url);
    let stem = match last.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => last,
    };
    slugify(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("The_Godfather.html"), "the_godfather_html");
        assert_eq!(slugify("Pulp Fiction"), "pulp_fiction");
        assert_eq!(slugify("  Alien: Resurrection  "), "alien_resurrection");
        assert_eq!(slugify("___"), "script");
        assert_eq!(slugify(""), "script");
    }

    #[test]
    fn test_slug_from_url() {
        assert_eq!(
            slug_from_url("https://www.dailyscript.com/scripts/pulp_fiction.html"),
            "pulp_fiction"
        );
        assert_eq!(
            slug_from_url("https://www.dailyscript.com/scripts/The_Godfather.html"),
            "the_godfather"
        );
        // Trailing slash and no extension
        assert_eq!(slug_from_url("https://example.com/scripts/chinatown/"), "chinatown");
        // Hidden-file style segment keeps its name
        assert_eq!(slug_from_url("https://example.com/.config"), "config");
    }

    #[test]
    fn test_word_count() {
        let s = Screenplay::new("x", "http://example.com", "INT  HOUSE\nDAY");
        assert_eq!(s.word_count(), 3);
    }
}
