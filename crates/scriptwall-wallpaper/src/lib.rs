use anyhow::Result;
use std::path::Path;

#[cfg(not(target_os = "macos"))]
pub mod generic;
#[cfg(target_os = "macos")]
pub mod macos;

/// Capability to apply one image file to every active display and every
/// OS-level virtual desktop. The pipeline depends only on this trait;
/// platform specifics live in the adapters.
pub trait WallpaperTarget {
    /// Apply the image at `path` to all display surfaces.
    fn apply(&self, path: &Path) -> Result<()>;
}

/// The adapter for the platform this binary was built for.
pub fn detect() -> Box<dyn WallpaperTarget> {
    #[cfg(target_os = "macos")]
    {
        Box::new(macos::MacDesktop::new())
    }
    #[cfg(not(target_os = "macos"))]
    {
        Box::new(generic::GenericDesktop::new())
    }
}
