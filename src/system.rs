pub trait SystemScheme {
    fn prefers_dark(&self) -> bool;
}

/// Reads the desktop appearance setting where one is available.
pub struct DetectedScheme;

impl SystemScheme for DetectedScheme {
    fn prefers_dark(&self) -> bool {
        #[cfg(target_os = "macos")]
        {
            // Only set when the system appearance is Dark; the key is absent in Light mode.
            std::process::Command::new("defaults")
                .args(["read", "-g", "AppleInterfaceStyle"])
                .output()
                .map(|out| String::from_utf8_lossy(&out.stdout).trim() == "Dark")
                .unwrap_or(false)
        }
        #[cfg(not(target_os = "macos"))]
        {
            std::env::var("COLORFGBG")
                .ok()
                .and_then(|v| colorfgbg_is_dark(&v))
                .unwrap_or(false)
        }
    }
}

/// `COLORFGBG` is "fg;bg" (sometimes "fg;default;bg"); the background is the last field.
#[cfg_attr(target_os = "macos", allow(dead_code))]
pub fn colorfgbg_is_dark(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}
