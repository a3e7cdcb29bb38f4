use serde::{Deserialize, Serialize};

use super::{AuthorityName, CertificateId, PublicCertificate};

/// Search results from `GET /certificates?filter=...`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateSearchResponse {
    /// Total number of matching certificates
    pub total: u64,

    /// Matching certificates in server order
    #[serde(default)]
    pub items: Vec<CertificateSummary>,
}

impl CertificateSearchResponse {
    /// Returns true if the search matched nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0 || self.items.is_empty()
    }

    /// Iterate over active certificates only
    pub fn active(&self) -> impl Iterator<Item = &CertificateSummary> {
        self.items.iter().filter(|item| item.active)
    }
}

/// Individual certificate in search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateSummary {
    /// Certificate id
    pub id: CertificateId,

    /// Certificate name, possibly decorated with a server-side suffix
    #[serde(default)]
    pub name: Option<String>,

    /// Subject common name
    #[serde(default)]
    pub cn: Option<String>,

    /// False once superseded by rotation or reissuance
    pub active: bool,
}

/// Certificate details from `GET /certificates/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDetail {
    /// Certificate id
    pub id: CertificateId,

    /// PEM certificate body
    pub body: String,

    /// PEM chain
    #[serde(default)]
    pub chain: Option<String>,

    /// Subject common name
    #[serde(default)]
    pub common_name: Option<String>,

    /// Owner contact
    #[serde(default)]
    pub owner: Option<String>,

    /// Whether the certificate is active
    #[serde(default)]
    pub active: Option<bool>,

    /// Issuing authority
    #[serde(default)]
    pub authority: Option<AuthorityName>,
}

impl CertificateDetail {
    /// The public half of the certificate
    #[must_use]
    pub fn public_certificate(&self) -> PublicCertificate {
        PublicCertificate {
            chain: self.chain.clone(),
            body: self.body.clone(),
        }
    }
}

/// Private key from `GET /certificates/{id}/key`
#[derive(Clone, Serialize, Deserialize)]
pub struct PrivateKeyResponse {
    /// PEM private key
    pub key: String,
}

impl std::fmt::Debug for PrivateKeyResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKeyResponse")
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Response to `POST /certificates`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedCertificate {
    /// Id assigned to the new certificate
    pub id: CertificateId,
}
