use crate::daily_script;
use crate::types::AcquiredScreenplay;
use anyhow::{Context, Result};
use scriptwall_model::SlugStore;
use std::fs;

/// Write acquisition output files to the slug's directory.
///
/// Creates the directory if it doesn't exist, then writes:
/// - `screenplay.txt` — cleaned text (pagination input)
/// - `source.md` — provenance info
pub fn write_acquired(acquired: &AcquiredScreenplay, store: &SlugStore) -> Result<()> {
    fs::create_dir_all(store.root())
        .with_context(|| format!("create directory {}", store.root().display()))?;

    let text_path = store.text_path();
    fs::write(&text_path, &acquired.text)
        .with_context(|| format!("write {}", text_path.display()))?;
    tracing::info!(
        path = %text_path.display(),
        lines = acquired.text.lines().count(),
        "Wrote screenplay text"
    );

    let source_path = store.source_path();
    fs::write(&source_path, acquired.source_md())
        .with_context(|| format!("write {}", source_path.display()))?;
    tracing::info!(path = %source_path.display(), "Wrote source provenance");

    Ok(())
}

/// Read the cached screenplay text for a slug, if present.
pub fn load_cached(store: &SlugStore) -> Result<Option<String>> {
    let path = store.text_path();
    if !path.exists() {
        return Ok(None);
    }
    let text =
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    Ok(Some(text))
}

/// Load the cached text for a slug, fetching, cleaning, and caching it on
/// first use. Later runs never refetch; `scriptwall fetch` forces a refresh.
pub async fn load_or_fetch(store: &SlugStore, url: &str, slug: &str) -> Result<String> {
    if let Some(text) = load_cached(store)? {
        tracing::info!(path = %store.text_path().display(), "Using cached screenplay text");
        return Ok(text);
    }

    let acquired = daily_script::acquire(url, slug).await?;
    write_acquired(&acquired, store)?;
    Ok(acquired.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceInfo;

    fn sample() -> AcquiredScreenplay {
        AcquiredScreenplay {
            source: SourceInfo {
                url: "https://example.com/scripts/test.html".into(),
                site: "example.com".into(),
                fetched_at: "2026-08-07T12:00:00Z".into(),
                slug: "test".into(),
            },
            text: "FADE IN:\n\nEXT. STREET - DAY".into(),
        }
    }

    #[test]
    fn test_write_then_load_cached() {
        let dir = tempfile::tempdir().unwrap();
        let store = SlugStore::new(dir.path(), "test");

        assert!(load_cached(&store).unwrap().is_none());

        let acquired = sample();
        write_acquired(&acquired, &store).unwrap();

        let text = load_cached(&store).unwrap().unwrap();
        assert_eq!(text, acquired.text);
        assert!(store.source_path().exists());
    }
}
