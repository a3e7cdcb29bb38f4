//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration.
///
/// The password is never stored here; pass it with `--password` or
/// `LEMUR_PASSWORD`, or store a token instead.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Lemur host, e.g. `https://lemur.example.com`.
    pub host: Option<String>,

    /// Username for login.
    pub username: Option<String>,

    /// Bearer token; skips login when set.
    pub token: Option<String>,

    /// Passphrase for JKS keystore and truststore exports.
    pub jks_passphrase: Option<String>,

    /// HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("jks_passphrase", &self.jks_passphrase.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("output_format", &self.output_format)
            .finish()
    }
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "lemur", "lemur")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;

        Ok(())
    }

    /// Set a key by name.
    ///
    /// Returns an error for unknown keys and for `password`, which is never
    /// persisted.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "host" => self.host = Some(value.to_string()),
            "username" | "user" => self.username = Some(value.to_string()),
            "token" => self.token = Some(value.to_string()),
            "jks_passphrase" => self.jks_passphrase = Some(value.to_string()),
            "timeout_secs" | "timeout" => {
                self.timeout_secs = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid timeout '{value}'"))?,
                );
            }
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "password" => anyhow::bail!(
                "The password is not stored in the config file.\n\
                 Use --password, LEMUR_PASSWORD, or `lemur config set token <TOKEN>`."
            ),
            _ => anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 host           - Lemur host URL\n  \
                 username       - Login username\n  \
                 token          - Bearer token (skips login)\n  \
                 jks_passphrase - Passphrase for JKS exports\n  \
                 timeout_secs   - HTTP timeout in seconds\n  \
                 output_format  - Default output format (pretty/json/yaml)",
                key
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("host", "https://lemur.example.com").unwrap();
        config.set("timeout", "10").unwrap();
        config.set("output", "json").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.host.as_deref(), Some("https://lemur.example.com"));
        assert_eq!(loaded.timeout_secs, Some(10));
        assert_eq!(loaded.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn password_is_refused() {
        let mut config = Config::default();
        assert!(config.set("password", "hunter2").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert!(config.set("timeout", "soon").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn debug_hides_secrets() {
        let mut config = Config::default();
        config.set("token", "tok-123").unwrap();
        config.set("jks_passphrase", "changeit").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("tok-123"));
        assert!(!rendered.contains("changeit"));
    }
}
