use serde::{Deserialize, Serialize};

use super::CertificateDetail;

/// Server-assigned certificate identifier
///
/// Stable for the lifetime of a certificate. A rotated certificate gets a
/// new id, which is what callers use to decide whether artifacts need to be
/// fetched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateId(pub u64);

impl CertificateId {
    /// Returns the raw integer id
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CertificateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CertificateId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// The certificate a caller wants to exist
///
/// Supplied once per reconciliation cycle and never mutated. Results are
/// returned in separate records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredCertificate {
    /// Certificate name, the canonical key for by-name lookups
    #[serde(default)]
    pub name: Option<String>,

    /// Subject common name, the canonical key for by-common-name lookups
    #[serde(default)]
    pub common_name: Option<String>,

    /// Owner contact (usually an email address)
    pub owner: String,

    /// Name of the issuing authority
    pub authority: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Requested validity in years
    pub validity_years: u32,

    /// Subject organization (O)
    #[serde(default)]
    pub organization: Option<String>,

    /// Subject locality (L)
    #[serde(default)]
    pub location: Option<String>,

    /// Subject state or province (ST)
    #[serde(default)]
    pub state: Option<String>,

    /// Subject organizational unit (OU)
    #[serde(default)]
    pub organizational_unit: Option<String>,

    /// Subject country (C)
    #[serde(default)]
    pub country: Option<String>,

    /// Subject alternative names, in the order they should be requested
    #[serde(default)]
    pub subject_alt_names: Vec<SubjectAltName>,

    /// Extended key usage flags
    #[serde(default)]
    pub extended_key_usage: Option<ExtendedKeyUsage>,
}

impl DesiredCertificate {
    /// Create a spec with the required fields and a one-year validity
    #[must_use]
    pub fn new(authority: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: None,
            common_name: None,
            owner: owner.into(),
            authority: authority.into(),
            description: String::new(),
            validity_years: 1,
            organization: None,
            location: None,
            state: None,
            organizational_unit: None,
            country: None,
            subject_alt_names: Vec::new(),
            extended_key_usage: None,
        }
    }

    /// Set the certificate name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the subject common name
    #[must_use]
    pub fn with_common_name(mut self, common_name: impl Into<String>) -> Self {
        self.common_name = Some(common_name.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the validity in years
    #[must_use]
    pub const fn with_validity_years(mut self, years: u32) -> Self {
        self.validity_years = years;
        self
    }

    /// Add a subject alternative name
    #[must_use]
    pub fn with_san(mut self, name_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.subject_alt_names.push(SubjectAltName {
            name_type: name_type.into(),
            value: value.into(),
        });
        self
    }

    /// Set the extended key usage flags
    #[must_use]
    pub const fn with_extended_key_usage(mut self, usage: ExtendedKeyUsage) -> Self {
        self.extended_key_usage = Some(usage);
        self
    }

    /// The name, if set and not blank
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// The common name, if set and not blank
    #[must_use]
    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref().filter(|cn| !cn.is_empty())
    }
}

/// A subject alternative name entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAltName {
    /// Lemur name type, e.g. `DNSName` or `IPAddress`
    pub name_type: String,

    /// The name value
    pub value: String,
}

/// Extended key usage flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedKeyUsage {
    /// Allow TLS client authentication
    #[serde(default)]
    pub use_client_authentication: bool,

    /// Allow TLS server authentication
    #[serde(default)]
    pub use_server_authentication: bool,
}

impl ExtendedKeyUsage {
    /// Server authentication only
    #[must_use]
    pub const fn server() -> Self {
        Self {
            use_client_authentication: false,
            use_server_authentication: true,
        }
    }

    /// Client and server authentication
    #[must_use]
    pub const fn client_and_server() -> Self {
        Self {
            use_client_authentication: true,
            use_server_authentication: true,
        }
    }
}

/// A certificate as it currently exists in Lemur
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCertificate {
    /// Server-assigned id
    pub id: CertificateId,

    /// Name of the issuing authority
    pub authority_name: String,

    /// Subject common name
    pub common_name: String,

    /// Owner contact
    pub owner: String,

    /// Whether this is the authoritative certificate for its name
    pub active: bool,
}

impl From<&CertificateDetail> for ResolvedCertificate {
    fn from(detail: &CertificateDetail) -> Self {
        Self {
            id: detail.id,
            authority_name: detail
                .authority
                .as_ref()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            common_name: detail.common_name.clone().unwrap_or_default(),
            owner: detail.owner.clone().unwrap_or_default(),
            // Lookups only ever resolve active certificates
            active: detail.active.unwrap_or(true),
        }
    }
}

/// Public half of a certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicCertificate {
    /// PEM chain up to (not including) the root, if Lemur has one
    pub chain: Option<String>,

    /// PEM certificate body
    pub body: String,
}

/// Every PEM artifact for a certificate
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateArtifacts {
    /// PEM chain, if any
    pub chain: Option<String>,

    /// PEM public certificate
    pub public_certificate: String,

    /// PEM private key
    pub private_key: String,
}

impl std::fmt::Debug for CertificateArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateArtifacts")
            .field("chain", &self.chain.as_ref().map(|_| "<pem>"))
            .field("public_certificate", &"<pem>")
            .field("private_key", &"<redacted>")
            .finish()
    }
}
