use serde::{Deserialize, Serialize};

use super::CertificateId;

/// Search results from `GET /authorities?filter=name;<name>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoritySearchResponse {
    /// Total number of matching authorities
    pub total: u64,

    /// Matching authorities in server order
    #[serde(default)]
    pub items: Vec<AuthoritySummary>,
}

/// Individual authority in search results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoritySummary {
    /// Authority id
    pub id: u64,

    /// Authority name
    pub name: String,

    /// Whether the authority can issue
    pub active: bool,

    /// The authority's own signing certificate
    #[serde(default)]
    pub authority_certificate: Option<CertificateRef>,
}

/// Reference to a certificate by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRef {
    /// Certificate id
    pub id: CertificateId,
}

/// A resolved authority and its signing certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityRef {
    /// Authority id
    pub authority_id: u64,

    /// Id of the certificate the authority signs with
    pub signing_certificate_id: CertificateId,
}
