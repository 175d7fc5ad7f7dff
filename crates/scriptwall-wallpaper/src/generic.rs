use crate::WallpaperTarget;
use anyhow::Result;
use std::path::Path;

/// Cross-platform adapter backed by the `wallpaper` crate. No notion of
/// virtual desktops or display spanning; sets the desktop background
/// through whatever mechanism the OS exposes.
#[derive(Debug, Default)]
pub struct GenericDesktop;

impl GenericDesktop {
    pub fn new() -> Self {
        Self
    }
}

impl WallpaperTarget for GenericDesktop {
    fn apply(&self, path: &Path) -> Result<()> {
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("image path is not valid UTF-8: {}", path.display()))?;

        tracing::info!(image = %path.display(), "Setting desktop wallpaper");
        wallpaper::set_from_path(path_str)
            .map_err(|e| anyhow::anyhow!("set wallpaper: {e}"))?;

        Ok(())
    }
}
