//! TOML configuration
//!
//! Loaded from `studyhall.toml` (or `--config`), with every field optional
//! and defaulted. `studyhall init` writes a starter file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file path; defaults to `studyhall.db` in the data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Required email suffix for registration.
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_email_domain() -> String {
    "@mavs.uta.edu".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind(), port: default_port() }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: None }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { email_domain: default_email_domain() }
    }
}

impl Config {
    /// Load config from a file, or fall back to defaults when it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Write a starter config file.
    pub fn write_default(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
        }
        let rendered = toml::to_string_pretty(&Self::default())?;
        std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Resolved database path: explicit config, else `studyhall.db` under
    /// the platform data dir, else the current directory.
    pub fn database_path(&self) -> PathBuf {
        if let Some(ref path) = self.database.path {
            return path.clone();
        }
        dirs::data_dir()
            .map(|d| d.join("studyhall").join("studyhall.db"))
            .unwrap_or_else(|| PathBuf::from("studyhall.db"))
    }
}
