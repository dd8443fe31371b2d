//! Path utilities for storefront.
//!
//! The default config file lives at `~/.storefront/config.toml`. The
//! database path comes from the config file or `--db`.

use std::path::PathBuf;

/// Returns the storefront home directory (`~/.storefront/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".storefront")
}

/// Returns the default config file path (`~/.storefront/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Ensures the parent directory of `path` exists.
pub fn ensure_parent(path: &std::path::Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_storefront_home() {
        let home = home_dir();
        let config = default_config();

        assert!(home.to_string_lossy().contains(".storefront"));
        assert!(config.starts_with(&home));
    }

    #[test]
    fn ensure_parent_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/shop.db");
        ensure_parent(&nested).unwrap();
        assert!(dir.path().join("a/b").is_dir());
        ensure_parent(std::path::Path::new("shop.db")).unwrap();
    }
}
