//! Managed certificate lifecycle keyed by name.
//!
//! Lemur certificates are immutable once issued. Create finds or issues,
//! read refreshes artifacts when the resolved id moves, update only succeeds
//! when nothing needs to change, and delete is refused.

use crate::{ArtifactFetcher, ExportRequestor, ExportSettings, Issuer, Locator, LookupMode};
use lemur_client::LemurClient;
use lemur_core::{
    CertificateArtifacts, CertificateId, DesiredCertificate, ExportBundle, ExportFormat,
    LemurError, ResolvedCertificate, Result,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// State a caller keeps between reconciliation cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateState {
    /// Id resolved on the previous cycle
    pub certificate_id: CertificateId,
}

/// Result of reading a managed certificate
#[derive(Debug, Clone, Serialize)]
pub struct CertificateRecord {
    /// The certificate as it exists in Lemur
    pub certificate: ResolvedCertificate,

    /// PEM artifacts, present only when refreshed
    pub artifacts: Option<CertificateArtifacts>,

    /// Export bundles, empty unless refreshed
    pub exports: Vec<ExportBundle>,

    /// True if artifacts and exports were fetched on this read
    pub refreshed: bool,

    /// True if the certificate was issued by this call
    pub created: bool,
}

impl CertificateRecord {
    /// State to hand back on the next cycle
    #[must_use]
    pub const fn state(&self) -> CertificateState {
        CertificateState {
            certificate_id: self.certificate.id,
        }
    }

    /// The bundle for `format`, if it was exported
    #[must_use]
    pub fn export(&self, format: ExportFormat) -> Option<&ExportBundle> {
        self.exports.iter().find(|b| b.format == format)
    }
}

/// Certificate lifecycle against Lemur, looked up by name
pub struct CertificateResource<'a> {
    client: &'a LemurClient,
    settings: &'a ExportSettings,
}

impl<'a> CertificateResource<'a> {
    /// Create a resource using the given client and export settings
    pub const fn new(client: &'a LemurClient, settings: &'a ExportSettings) -> Self {
        Self { client, settings }
    }

    /// Returns true if an active certificate matches the desired name
    pub async fn exists(&self, desired: &DesiredCertificate) -> Result<bool> {
        Ok(Locator::new(self.client)
            .find(desired, LookupMode::ByName)
            .await?
            .is_some())
    }

    /// Read the certificate matching `desired`
    ///
    /// `None` means no active certificate matches and the caller should
    /// forget its state.
    pub async fn read(
        &self,
        desired: &DesiredCertificate,
        previous: Option<&CertificateState>,
    ) -> Result<Option<CertificateRecord>> {
        match Locator::new(self.client).find(desired, LookupMode::ByName).await? {
            Some(id) => self.read_id(id, previous).await.map(Some),
            None => {
                debug!(name = desired.name(), "managed certificate is gone");
                Ok(None)
            }
        }
    }

    /// Read a certificate by id
    ///
    /// Artifacts and exports are fetched only if `id` differs from the
    /// previously recorded id.
    pub async fn read_id(
        &self,
        id: CertificateId,
        previous: Option<&CertificateState>,
    ) -> Result<CertificateRecord> {
        let detail = self.client.certificates().get(id).await?;
        let certificate = ResolvedCertificate::from(&detail);

        if previous.is_some_and(|p| p.certificate_id == id) {
            debug!(id = %id, "certificate unchanged, skipping artifacts");
            return Ok(CertificateRecord {
                certificate,
                artifacts: None,
                exports: Vec::new(),
                refreshed: false,
                created: false,
            });
        }

        info!(id = %id, "refreshing certificate artifacts");
        let public = detail.public_certificate();
        let private_key = ArtifactFetcher::new(self.client).fetch_private(id).await?;
        let exports = ExportRequestor::new(self.client, self.settings)
            .export_all(id)
            .await?;

        Ok(CertificateRecord {
            certificate,
            artifacts: Some(CertificateArtifacts {
                chain: public.chain.filter(|c| !c.is_empty()),
                public_certificate: public.body,
                private_key,
            }),
            exports,
            refreshed: true,
            created: false,
        })
    }

    /// Bring the certificate into existence and read it
    ///
    /// An existing active certificate is read without issuing;
    /// [`CertificateRecord::created`] tells the two apart.
    pub async fn create(
        &self,
        desired: &DesiredCertificate,
        previous: Option<&CertificateState>,
    ) -> Result<CertificateRecord> {
        self.settings.validate()?;

        if let Some(id) = Locator::new(self.client)
            .find(desired, LookupMode::ByName)
            .await?
        {
            return self.read_id(id, previous).await;
        }

        let id = Issuer::new(self.client).issue(desired).await?;
        let mut record = self.read_id(id, previous).await?;
        record.created = true;
        Ok(record)
    }

    /// Succeeds only when the certificate already exists
    pub async fn update(
        &self,
        desired: &DesiredCertificate,
        previous: Option<&CertificateState>,
    ) -> Result<CertificateRecord> {
        match self.read(desired, previous).await? {
            Some(record) => Ok(record),
            None => Err(LemurError::Unsupported("update")),
        }
    }

    /// Always fails; issued certificates cannot be removed
    pub fn delete(&self, _state: &CertificateState) -> Result<()> {
        Err(LemurError::Unsupported("delete"))
    }
}
