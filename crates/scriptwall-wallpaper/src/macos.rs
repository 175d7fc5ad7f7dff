use crate::WallpaperTarget;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

const SPACES_DOMAIN: &str = "com.apple.spaces";
const SPANS_KEY: &str = "spans-displays";

/// Applies wallpapers through System Events, one picture per desktop, which
/// covers every display and every virtual space.
#[derive(Debug, Default)]
pub struct MacDesktop;

impl MacDesktop {
    pub fn new() -> Self {
        Self
    }
}

impl WallpaperTarget for MacDesktop {
    fn apply(&self, path: &Path) -> Result<()> {
        ensure_spanning_disabled()?;
        set_all_desktops(path)
    }
}

/// With spanning on, one wallpaper stretches across all monitors and
/// per-desktop pictures are ignored; turn the preference off before setting
/// them. The Dock owns desktop rendering and must restart for the change to
/// take effect, so only touch it when the setting actually flips.
fn ensure_spanning_disabled() -> Result<()> {
    if !spanning_enabled()? {
        return Ok(());
    }

    tracing::info!("Display spanning is enabled, disabling it for per-display wallpapers");
    let status = Command::new("defaults")
        .args(["-currentHost", "write", SPACES_DOMAIN, SPANS_KEY, "-bool", "false"])
        .status()
        .context("run `defaults write`")?;
    anyhow::ensure!(
        status.success(),
        "`defaults write {SPACES_DOMAIN} {SPANS_KEY}` failed with {status}"
    );

    let status = Command::new("killall")
        .arg("Dock")
        .status()
        .context("restart the Dock")?;
    anyhow::ensure!(status.success(), "`killall Dock` failed with {status}");

    Ok(())
}

fn spanning_enabled() -> Result<bool> {
    let output = Command::new("defaults")
        .args(["-currentHost", "read", SPACES_DOMAIN, SPANS_KEY])
        .output()
        .context("run `defaults read`")?;

    // A missing key makes `defaults read` exit non-zero: spanning was never
    // turned on for this host.
    if !output.status.success() {
        return Ok(false);
    }

    Ok(parse_defaults_bool(&String::from_utf8_lossy(&output.stdout)))
}

/// `defaults read` prints booleans as 0/1 (true/false on some versions).
fn parse_defaults_bool(raw: &str) -> bool {
    matches!(raw.trim(), "1" | "true" | "yes")
}

fn set_all_desktops(path: &Path) -> Result<()> {
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("image path is not valid UTF-8: {}", path.display()))?;
    anyhow::ensure!(
        !path_str.contains('"'),
        "image path contains a double quote, refusing to splice it into AppleScript: {path_str}"
    );

    tracing::info!(image = %path.display(), "Setting wallpaper on all desktops");
    let script = desktop_script(path_str);
    let status = Command::new("osascript")
        .args(["-e", &script])
        .status()
        .context("run osascript")?;
    anyhow::ensure!(status.success(), "osascript wallpaper script failed with {status}");

    Ok(())
}

fn desktop_script(image_path: &str) -> String {
    format!(
        r#"tell application "System Events"
    repeat with d in desktops
        set picture of d to "{image_path}"
    end repeat
end tell"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_bool() {
        assert!(parse_defaults_bool("1\n"));
        assert!(parse_defaults_bool("true"));
        assert!(!parse_defaults_bool("0\n"));
        assert!(!parse_defaults_bool("false"));
        assert!(!parse_defaults_bool(""));
    }

    #[test]
    fn test_desktop_script_loops_over_desktops() {
        let script = desktop_script("/tmp/pages/page_001.png");
        assert!(script.contains("repeat with d in desktops"));
        assert!(script.contains(r#"set picture of d to "/tmp/pages/page_001.png""#));
    }
}
