//! Filesystem locations for configuration and trace output.

use std::path::PathBuf;

/// Returns the default data directory, `<platform data dir>/skillsearch`.
///
/// Falls back to `./.skillsearch` when the platform reports no data
/// directory (e.g. a stripped container without `$HOME`).
///
/// # Examples
///
/// ```
/// use skillsearch::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("skillsearch") || get_data_dir().ends_with(".skillsearch"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(".skillsearch"),
        |dir| dir.join("skillsearch"),
    )
}

/// Returns the default config file, `<platform config dir>/skillsearch/config.toml`.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("skillsearch").join("config.toml"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, or when no home directory is known, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(path),
    }
}
