//! Home directory resolution with test isolation support.
//!
//! `dirs::home_dir()` ignores `HOME` on Windows, so tests and wrappers set
//! `CONTEXTMARK_HOME` instead. Everything that derives a functional path from
//! the home directory (library root, `~/.claude`, project scan root) goes
//! through [`contextmark_home_dir`].

use std::path::PathBuf;

/// Environment variable overriding the home directory.
pub const CONTEXTMARK_HOME_VAR: &str = "CONTEXTMARK_HOME";

/// Environment variable overriding the library root.
pub const CONTEXTMARK_LIBRARY_VAR: &str = "CONTEXTMARK_LIBRARY";

/// Get the home directory for ContextMark paths.
pub fn contextmark_home_dir() -> Option<PathBuf> {
    std::env::var(CONTEXTMARK_HOME_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Library root override from the environment, if any.
pub fn library_root_override() -> Option<PathBuf> {
    std::env::var(CONTEXTMARK_LIBRARY_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Replace a leading home directory with `~` for display.
pub fn display_with_tilde(path: &std::path::Path) -> String {
    match contextmark_home_dir() {
        Some(home) => match path.strip_prefix(&home) {
            Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => path.display().to_string(),
        },
        None => path.display().to_string(),
    }
}
