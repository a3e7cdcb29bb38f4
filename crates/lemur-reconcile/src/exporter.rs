//! Keystore and bundle exports.

use lemur_client::LemurClient;
use lemur_core::{CertificateId, ExportBundle, ExportFormat, ExportRequest, LemurError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Export configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Passphrase for JKS keystore and truststore exports
    #[serde(default)]
    pub jks_passphrase: Option<String>,

    /// Formats produced by [`ExportRequestor::export_all`]
    #[serde(default = "default_formats")]
    pub formats: Vec<ExportFormat>,
}

fn default_formats() -> Vec<ExportFormat> {
    vec![
        ExportFormat::Pkcs12,
        ExportFormat::JksKeystore,
        ExportFormat::JksTruststore,
    ]
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            jks_passphrase: None,
            formats: default_formats(),
        }
    }
}

impl std::fmt::Debug for ExportSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportSettings")
            .field("jks_passphrase", &self.jks_passphrase.as_ref().map(|_| "<redacted>"))
            .field("formats", &self.formats)
            .finish()
    }
}

impl ExportSettings {
    /// Settings producing only the given formats
    #[must_use]
    pub fn only(formats: impl IntoIterator<Item = ExportFormat>) -> Self {
        Self {
            jks_passphrase: None,
            formats: formats.into_iter().collect(),
        }
    }

    /// Set the JKS passphrase
    #[must_use]
    pub fn with_jks_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.jks_passphrase = Some(passphrase.into());
        self
    }

    /// Check that every configured format can be requested
    pub fn validate(&self) -> Result<()> {
        for format in &self.formats {
            ExportRequest::for_format(*format, self.jks_passphrase.as_deref())?;
        }
        Ok(())
    }
}

/// Requests server-side exports of an issued certificate
pub struct ExportRequestor<'a> {
    client: &'a LemurClient,
    settings: &'a ExportSettings,
}

impl<'a> ExportRequestor<'a> {
    /// Create a requestor using the given client and settings
    pub const fn new(client: &'a LemurClient, settings: &'a ExportSettings) -> Self {
        Self { client, settings }
    }

    /// Export a certificate in one format
    ///
    /// PKCS12 and JKS responses must carry a passphrase. Any passphrase on a
    /// CRT response is dropped.
    pub async fn export(&self, id: CertificateId, format: ExportFormat) -> Result<ExportBundle> {
        let request = ExportRequest::for_format(format, self.settings.jks_passphrase.as_deref())?;
        debug!(id = %id, %format, "requesting export");

        let response = self
            .client
            .certificates()
            .export(id, &request)
            .await
            .map_err(LemurError::into_export)?;

        let passphrase = if format.has_passphrase() {
            let passphrase = response.passphrase.filter(|p| !p.is_empty()).ok_or_else(|| {
                LemurError::Decode(format!("{format} export of certificate {id} has no passphrase"))
            })?;
            Some(passphrase)
        } else {
            None
        };

        info!(id = %id, %format, bytes = response.data.len(), "export complete");
        Ok(ExportBundle {
            format,
            data: response.data,
            passphrase,
        })
    }

    /// Export a certificate in every configured format, in order
    ///
    /// Stops at the first failure.
    pub async fn export_all(&self, id: CertificateId) -> Result<Vec<ExportBundle>> {
        self.settings.validate()?;

        let mut bundles = Vec::with_capacity(self.settings.formats.len());
        for format in &self.settings.formats {
            bundles.push(self.export(id, *format).await?);
        }
        Ok(bundles)
    }
}
