use crate::{RenderError, RenderResult};
use std::fs;
use std::path::Path;

/// Monospace / typewriter-ish font candidates, macOS paths first (the
/// platform the wallpaper adapter targets), then common Linux locations.
const FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Menlo.ttc",
    "/System/Library/Fonts/Monaco.dfont",
    "/Library/Fonts/Courier New.ttf",
    "/System/Library/Fonts/Supplemental/Courier New.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
];

/// Load font bytes from an explicit path, or from the first readable
/// candidate when none is given. Having no usable font is a render error,
/// not a silent fallback to an arbitrary face.
pub fn load_font(path: Option<&Path>) -> RenderResult<Vec<u8>> {
    if let Some(p) = path {
        return fs::read(p)
            .map_err(|e| RenderError::font(format!("read font '{}': {e}", p.display())));
    }

    for candidate in FONT_CANDIDATES {
        let p = Path::new(candidate);
        if p.exists() {
            tracing::debug!(path = candidate, "Using font");
            return fs::read(p)
                .map_err(|e| RenderError::font(format!("read font '{candidate}': {e}")));
        }
    }

    Err(RenderError::font(
        "no usable monospace font found in the candidate list; pass --font <path>",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_font_is_error() {
        let err = load_font(Some(Path::new("/definitely/not/a/font.ttf"))).unwrap_err();
        assert!(matches!(err, RenderError::Font(_)));
    }

    #[test]
    fn test_explicit_font_is_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.ttf");
        fs::write(&path, b"not really a font").unwrap();
        let bytes = load_font(Some(&path)).unwrap();
        assert_eq!(bytes, b"not really a font");
    }
}
