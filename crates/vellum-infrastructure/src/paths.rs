//! Unified path management for vellum configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/vellum/            # Config directory (platform specific)
//! ├── config.toml              # Client configuration
//! └── logs/                    # Application logs
//!     └── vellum.log.YYYY-MM-DD
//! ```
//!
//! Analysis results are never written here.

use std::path::PathBuf;

const APP_DIR_NAME: &str = "vellum";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for vellum_core::VellumError {
    fn from(err: PathError) -> Self {
        vellum_core::VellumError::config(err.to_string())
    }
}

/// Path resolution for vellum.
///
/// Uses the platform config directory from `dirs` (XDG on Linux,
/// `~/Library/Application Support` on macOS, `%APPDATA%` on Windows).
pub struct VellumPaths;

impl VellumPaths {
    /// Returns the vellum configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/vellum/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = VellumPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("vellum"));
    }

    #[test]
    fn test_config_file() {
        let config_file = VellumPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = VellumPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_logs_dir() {
        let logs_dir = VellumPaths::logs_dir().unwrap();
        assert!(logs_dir.ends_with("logs"));
        let config_dir = VellumPaths::config_dir().unwrap();
        assert!(logs_dir.starts_with(&config_dir));
    }
}
