//! Command implementations.

pub mod authority;
pub mod certificate;
pub mod config;

use anyhow::{Context as _, Result};
use lemur::{DesiredCertificate, ExportSettings, LemurClient};
use std::path::Path;
use std::time::Duration;

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Clone)]
pub struct Context {
    /// Lemur host URL
    pub host: Option<String>,

    /// Login username
    pub username: Option<String>,

    /// Login password
    pub password: Option<String>,

    /// Bearer token
    pub token: Option<String>,

    /// Passphrase for JKS exports
    pub jks_passphrase: Option<String>,

    /// HTTP timeout
    pub timeout: Option<Duration>,

    /// Output format
    pub output_format: OutputFormat,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("authenticated", &(self.token.is_some() || self.password.is_some()))
            .field("timeout", &self.timeout)
            .field("output_format", &self.output_format)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Get the host, returning an error if not set.
    pub fn require_host(&self) -> Result<&str> {
        self.host.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Lemur host required.\n\n\
                 Set it with one of:\n  \
                 1. --host <URL>\n  \
                 2. LEMUR_HOST environment variable\n  \
                 3. lemur config set host <URL>"
            )
        })
    }

    /// Create an authenticated client.
    ///
    /// A token skips login; otherwise username and password are exchanged
    /// for one.
    pub async fn client(&self) -> Result<LemurClient> {
        let mut builder = LemurClient::builder(self.require_host()?);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(token) = &self.token {
            return Ok(builder.token(token).build()?);
        }

        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Ok(builder.login(username, password).await?),
            _ => anyhow::bail!(
                "Credentials required.\n\n\
                 Provide either:\n  \
                 1. --token <TOKEN> (or LEMUR_TOKEN)\n  \
                 2. --username and --password (or LEMUR_USERNAME / LEMUR_PASSWORD)"
            ),
        }
    }

    /// Export settings from the configured JKS passphrase.
    pub fn export_settings(&self) -> ExportSettings {
        let settings = ExportSettings::default();
        match &self.jks_passphrase {
            Some(passphrase) => settings.with_jks_passphrase(passphrase),
            None => settings,
        }
    }
}

/// Read a desired certificate from a TOML file.
pub fn load_desired(path: &Path) -> Result<DesiredCertificate> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
