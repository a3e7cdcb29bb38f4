//! Certificate lookup and disambiguation.

use lemur_client::LemurClient;
use lemur_core::{CertificateId, CertificateSearchResponse, DesiredCertificate, LemurError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which identity field of a desired certificate is canonical
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupMode {
    /// Search by certificate name, tolerating server-side suffixes
    #[default]
    ByName,
    /// Search by subject common name
    ByCommonName,
}

impl LookupMode {
    /// The identity value this mode searches for
    pub fn key<'d>(self, desired: &'d DesiredCertificate) -> Result<&'d str> {
        match self {
            Self::ByName => desired
                .name()
                .ok_or_else(|| LemurError::InvalidSpec("a name is required for by-name lookup".into())),
            Self::ByCommonName => desired.common_name().ok_or_else(|| {
                LemurError::InvalidSpec("a common name is required for by-common-name lookup".into())
            }),
        }
    }
}

impl std::fmt::Display for LookupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByName => write!(f, "name"),
            Self::ByCommonName => write!(f, "common name"),
        }
    }
}

/// Pick the certificate for `name` out of a by-name search
///
/// Only active certificates count. An exact name match wins; otherwise the
/// first certificate whose name is a prefix of `name`, in response order.
pub fn select_by_name(response: &CertificateSearchResponse, name: &str) -> Option<CertificateId> {
    if response.total == 0 {
        return None;
    }

    response
        .active()
        .find(|c| c.name.as_deref() == Some(name))
        .or_else(|| {
            response.active().find(|c| {
                c.name
                    .as_deref()
                    .is_some_and(|n| !n.is_empty() && name.starts_with(n))
            })
        })
        .map(|c| c.id)
}

/// Pick the certificate for `common_name` out of a by-common-name search
///
/// Only active certificates with an identical `cn` count; the last one in
/// response order wins.
pub fn select_by_common_name(
    response: &CertificateSearchResponse,
    common_name: &str,
) -> Option<CertificateId> {
    if response.total == 0 {
        return None;
    }

    response
        .active()
        .filter(|c| c.cn.as_deref() == Some(common_name))
        .last()
        .map(|c| c.id)
}

/// Searches Lemur for the certificate matching a desired certificate
///
/// Never issues anything.
pub struct Locator<'a> {
    client: &'a LemurClient,
}

impl<'a> Locator<'a> {
    /// Create a locator using the given client
    pub const fn new(client: &'a LemurClient) -> Self {
        Self { client }
    }

    /// Find the active certificate for `desired`, if there is one
    pub async fn find(
        &self,
        desired: &DesiredCertificate,
        mode: LookupMode,
    ) -> Result<Option<CertificateId>> {
        let key = mode.key(desired)?;
        let certificates = self.client.certificates();

        let found = match mode {
            LookupMode::ByName => select_by_name(&certificates.search_by_name(key).await?, key),
            LookupMode::ByCommonName => {
                select_by_common_name(&certificates.search_by_common_name(key).await?, key)
            }
        };

        debug!(%mode, key, found = ?found.map(CertificateId::get), "certificate lookup");
        Ok(found)
    }

    /// Like [`find`](Self::find), but absence is a [`LemurError::NotFound`]
    pub async fn locate(&self, desired: &DesiredCertificate, mode: LookupMode) -> Result<CertificateId> {
        self.find(desired, mode).await?.ok_or_else(|| {
            let key = mode.key(desired).unwrap_or_default();
            LemurError::not_found(format!("active certificate with {mode} '{key}'"))
        })
    }
}
