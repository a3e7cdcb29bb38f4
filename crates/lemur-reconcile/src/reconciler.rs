//! Find-or-create and authority resolution.

use crate::{Issuer, Locator, LookupMode};
use lemur_client::LemurClient;
use lemur_core::{
    AuthorityRef, AuthoritySearchResponse, CertificateId, DesiredCertificate, LemurError, Result,
};
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of find-or-create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reconciled {
    /// The certificate id
    pub id: CertificateId,

    /// True if the certificate was issued by this call
    pub created: bool,
}

/// Pick the authority called `name` out of an authority search
///
/// The first active authority with an exact name match wins.
pub fn select_authority(response: &AuthoritySearchResponse, name: &str) -> Result<AuthorityRef> {
    if response.total == 0 {
        return Err(LemurError::not_found(format!("authority '{name}'")));
    }

    let authority = response
        .items
        .iter()
        .find(|a| a.active && a.name == name)
        .ok_or_else(|| LemurError::not_found(format!("active authority '{name}'")))?;

    let signing = authority.authority_certificate.ok_or_else(|| {
        LemurError::Decode(format!("authority '{name}' has no authorityCertificate"))
    })?;

    Ok(AuthorityRef {
        authority_id: authority.id,
        signing_certificate_id: signing.id,
    })
}

/// Ties lookup and issuance together
pub struct Reconciler<'a> {
    client: &'a LemurClient,
    locator: Locator<'a>,
    issuer: Issuer<'a>,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler using the given client
    pub const fn new(client: &'a LemurClient) -> Self {
        Self {
            client,
            locator: Locator::new(client),
            issuer: Issuer::new(client),
        }
    }

    /// Return the active certificate for `desired`, issuing one if none exists
    ///
    /// Idempotence rests entirely on the lookup: a false negative issues a
    /// duplicate certificate.
    pub async fn find_or_create(
        &self,
        desired: &DesiredCertificate,
        mode: LookupMode,
    ) -> Result<Reconciled> {
        match self.locator.locate(desired, mode).await {
            Ok(id) => {
                debug!(id = %id, "found existing certificate");
                Ok(Reconciled { id, created: false })
            }
            Err(err) if err.is_not_found() => {
                info!(%mode, "no active certificate, issuing");
                let id = self.issuer.issue(desired).await?;
                Ok(Reconciled { id, created: true })
            }
            Err(err) => Err(err),
        }
    }

    /// Returns true if an active certificate matches `desired` by name
    ///
    /// Performs the same search as by-name lookup and never issues.
    pub async fn exists(&self, desired: &DesiredCertificate) -> Result<bool> {
        Ok(self
            .locator
            .find(desired, LookupMode::ByName)
            .await?
            .is_some())
    }

    /// Resolve an authority name to its id and signing certificate id
    ///
    /// Read-only: never creates an authority.
    pub async fn resolve_authority(&self, name: &str) -> Result<AuthorityRef> {
        let response = self.client.authorities().search_by_name(name).await?;
        select_authority(&response, name)
    }
}
