//! Loading and saving `config.toml`.
//!
//! Writes go through a temporary file and an atomic rename so a crash never
//! leaves a truncated config behind.

use crate::paths::VellumPaths;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use vellum_core::config::VellumConfig;
use vellum_core::error::{Result, VellumError};

/// Environment variable that overrides `service.endpoint`.
pub const ENDPOINT_ENV_VAR: &str = "VELLUM_ENDPOINT";

/// File-backed configuration store.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Creates a service for the default `~/.config/vellum/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns `VellumError::Config` if the config directory cannot be determined.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(VellumPaths::config_file()?))
    }

    /// Creates a service for an explicit file path (used by tests and `--config`).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration file.
    ///
    /// A missing or empty file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<VellumConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigService] No config at {:?}, using defaults",
                self.path
            );
            return Ok(VellumConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            VellumError::io(format!(
                "Failed to read config file at {:?}: {}",
                self.path, e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(VellumConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            VellumError::config(format!(
                "Failed to parse TOML from {:?}: {}",
                self.path, e
            ))
        })
    }

    /// Loads the configuration and applies environment overrides.
    pub fn load_effective(&self) -> Result<VellumConfig> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }

    /// Saves the configuration atomically (temp file + rename).
    pub fn save(&self, config: &VellumConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(config)?;

        let tmp_path = self.temp_path();
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        tracing::info!("[ConfigService] Saved config to {:?}", self.path);
        Ok(())
    }

    /// Writes a default config file if none exists.
    ///
    /// # Returns
    ///
    /// `true` if the file was created, `false` if it already existed.
    pub fn init(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&VellumConfig::default())?;
        Ok(true)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "config.toml".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Applies environment overrides to a loaded configuration.
///
/// `lookup` abstracts `std::env::var` so callers can test without touching
/// the process environment. Blank values are ignored.
pub fn apply_env_overrides<F>(config: &mut VellumConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup(ENDPOINT_ENV_VAR) {
        let endpoint = endpoint.trim();
        if !endpoint.is_empty() {
            tracing::debug!(
                "[ConfigService] Endpoint overridden by {}: {}",
                ENDPOINT_ENV_VAR,
                endpoint
            );
            config.service.endpoint = endpoint.to_string();
        }
    }
}
