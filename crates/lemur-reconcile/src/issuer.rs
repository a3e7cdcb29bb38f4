//! Certificate issuance.

use lemur_client::LemurClient;
use lemur_core::{CertificateId, CreateCertificateRequest, DesiredCertificate, LemurError, Result};
use tracing::info;

/// Submits issuance requests
///
/// Lemur offers no idempotency key, so two calls with the same spec create
/// two certificates. Callers go through [`Reconciler`](crate::Reconciler)
/// to search first.
pub struct Issuer<'a> {
    client: &'a LemurClient,
}

impl<'a> Issuer<'a> {
    /// Create an issuer using the given client
    pub const fn new(client: &'a LemurClient) -> Self {
        Self { client }
    }

    /// Request a new certificate and return its id
    pub async fn issue(&self, desired: &DesiredCertificate) -> Result<CertificateId> {
        if desired.name().is_none() && desired.common_name().is_none() {
            return Err(LemurError::InvalidSpec(
                "a name or common name is required for issuance".into(),
            ));
        }

        let request = CreateCertificateRequest::from(desired);
        info!(
            name = desired.name(),
            common_name = desired.common_name(),
            authority = %desired.authority,
            "requesting certificate issuance"
        );

        let issued = self
            .client
            .certificates()
            .create(&request)
            .await
            .map_err(LemurError::into_issuance)?;

        info!(id = %issued.id, "certificate issued");
        Ok(issued.id)
    }
}
