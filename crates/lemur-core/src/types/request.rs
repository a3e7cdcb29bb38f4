use serde::{Deserialize, Serialize};

use super::{DesiredCertificate, ExtendedKeyUsage};

/// Request body for `POST /certificates`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCertificateRequest {
    /// Issuing authority, always referenced by name
    pub authority: AuthorityName,

    /// Certificate name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Owner contact
    pub owner: String,

    /// Subject common name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,

    /// Notify the owner about expiration
    pub notify: bool,

    /// Subject organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Subject locality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Subject state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Subject organizational unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizational_unit: Option<String>,

    /// Subject country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Free-form description
    pub description: String,

    /// Let Lemur rotate the certificate before it expires
    pub rotation: bool,

    /// Requested validity in years
    pub validity_years: u32,

    /// X.509 extensions
    #[serde(default, skip_serializing_if = "CertificateExtensions::is_empty")]
    pub extensions: CertificateExtensions,
}

/// Reference to an object by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityName {
    /// Object name
    pub name: String,
}

/// Optional issuance extensions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateExtensions {
    /// Subject alternative names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_alt_names: Option<SubAltNames>,

    /// Extended key usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_key_usage: Option<ExtendedKeyUsageExtension>,
}

impl CertificateExtensions {
    /// Returns true if no extension is requested
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sub_alt_names.is_none() && self.extended_key_usage.is_none()
    }
}

/// The `subAltNames` extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAltNames {
    /// Names in request order
    pub names: Vec<SubAltNameEntry>,
}

/// A single entry of the `subAltNames` extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubAltNameEntry {
    /// Lemur name type
    pub name_type: String,
    /// Name value
    pub value: String,
}

/// The `extendedKeyUsage` extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedKeyUsageExtension {
    /// TLS client authentication
    pub use_client_authentication: bool,
    /// TLS server authentication
    pub use_server_authentication: bool,
}

impl From<ExtendedKeyUsage> for ExtendedKeyUsageExtension {
    fn from(usage: ExtendedKeyUsage) -> Self {
        Self {
            use_client_authentication: usage.use_client_authentication,
            use_server_authentication: usage.use_server_authentication,
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

impl From<&DesiredCertificate> for CreateCertificateRequest {
    fn from(desired: &DesiredCertificate) -> Self {
        let sub_alt_names = (!desired.subject_alt_names.is_empty()).then(|| SubAltNames {
            names: desired
                .subject_alt_names
                .iter()
                .map(|san| SubAltNameEntry {
                    name_type: san.name_type.clone(),
                    value: san.value.clone(),
                })
                .collect(),
        });

        Self {
            authority: AuthorityName {
                name: desired.authority.clone(),
            },
            name: non_empty(desired.name.as_ref()),
            owner: desired.owner.clone(),
            common_name: non_empty(desired.common_name.as_ref()),
            notify: true,
            organization: non_empty(desired.organization.as_ref()),
            location: non_empty(desired.location.as_ref()),
            state: non_empty(desired.state.as_ref()),
            organizational_unit: non_empty(desired.organizational_unit.as_ref()),
            country: non_empty(desired.country.as_ref()),
            description: desired.description.clone(),
            rotation: true,
            validity_years: desired.validity_years,
            extensions: CertificateExtensions {
                sub_alt_names,
                extended_key_usage: desired.extended_key_usage.map(Into::into),
            },
        }
    }
}
