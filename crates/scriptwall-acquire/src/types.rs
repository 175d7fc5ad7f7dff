use serde::{Deserialize, Serialize};

/// A screenplay as it comes out of acquisition: cleaned text plus provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquiredScreenplay {
    pub source: SourceInfo,
    /// Cleaned, normalized full text.
    pub text: String,
}

/// Provenance information about the acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub url: String,
    pub site: String,
    pub fetched_at: String,
    pub slug: String,
}

impl AcquiredScreenplay {
    /// Generate a source.md provenance file.
    pub fn source_md(&self) -> String {
        format!(
            "# Source\n\n\
             - **Site:** {}\n\
             - **URL:** {}\n\
             - **Slug:** {}\n\
             - **Fetched:** {}\n\
             - **Lines:** {}\n\
             - **Words:** {}\n",
            self.source.site,
            self.source.url,
            self.source.slug,
            self.source.fetched_at,
            self.text.lines().count(),
            self.text.split_whitespace().count(),
        )
    }
}

/// Host portion of a URL, for provenance ("https://www.dailyscript.com/x"
/// → "www.dailyscript.com").
pub fn site_of(url: &str) -> String {
    url.split("://")
        .nth(1)
        .unwrap_or(url)
        .split('/')
        .next()
        .unwrap_or("unknown")
        .to_string()
}
