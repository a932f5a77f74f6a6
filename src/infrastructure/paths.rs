//! Path handling for the Zellij sandbox.

use std::fs;
use std::path::PathBuf;

use crate::domain::Result;

/// Host-side location of plugin data, as seen from inside the sandbox.
pub const DATA_ROOT: &str = "/host/.local/share/zellij/companyplus";

/// Returns the plugin data directory, creating it when missing.
///
/// `/host` points at the cwd of the last focused terminal, which usually is
/// the user's home, so this typically lands in
/// `~/.local/share/zellij/companyplus`. The persistent store (`local.json`)
/// and the trace file live here.
///
/// # Errors
///
/// Returns [`CompanyPlusError::Io`](crate::CompanyPlusError::Io) when the
/// directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let dir = PathBuf::from(DATA_ROOT);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Expands a leading `~` to the sandbox's `/host` mount.
///
/// # Examples
///
/// ```
/// use companyplus::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/mine.toml"), "/host/themes/mine.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/palette.toml"), "/etc/palette.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_only_expands_at_start() {
        assert_eq!(expand_tilde("themes/~/x.toml"), "themes/~/x.toml");
        assert_eq!(expand_tilde("~user/x"), "~user/x");
    }
}
