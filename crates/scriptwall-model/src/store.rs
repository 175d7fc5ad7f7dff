use std::path::{Path, PathBuf};

/// On-disk layout for one screenplay: a per-slug directory under the data
/// dir holding the cached text, the progress record, provenance notes, and
/// the rendered page images.
///
/// ```text
/// <data_dir>/<slug>/
///     screenplay.txt
///     meta.json
///     source.md
///     pages/page_001.png ...
/// ```
#[derive(Debug, Clone)]
pub struct SlugStore {
    root: PathBuf,
}

impl SlugStore {
    pub fn new(data_dir: impl AsRef<Path>, slug: &str) -> Self {
        Self {
            root: data_dir.as_ref().join(slug),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Cached cleaned screenplay text.
    pub fn text_path(&self) -> PathBuf {
        self.root.join("screenplay.txt")
    }

    /// Progress record (start date).
    pub fn meta_path(&self) -> PathBuf {
        self.root.join("meta.json")
    }

    /// Acquisition provenance notes.
    pub fn source_path(&self) -> PathBuf {
        self.root.join("source.md")
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.root.join("pages")
    }

    /// Image path for a zero-based page index; files are numbered from 001.
    pub fn page_path(&self, index: usize) -> PathBuf {
        self.pages_dir().join(format!("page_{:03}.png", index + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let store = SlugStore::new("/tmp/scriptwall", "pulp_fiction");
        assert_eq!(
            store.text_path(),
            PathBuf::from("/tmp/scriptwall/pulp_fiction/screenplay.txt")
        );
        assert_eq!(
            store.page_path(0),
            PathBuf::from("/tmp/scriptwall/pulp_fiction/pages/page_001.png")
        );
        assert_eq!(
            store.page_path(41),
            PathBuf::from("/tmp/scriptwall/pulp_fiction/pages/page_042.png")
        );
    }
}
