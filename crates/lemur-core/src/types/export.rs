use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{LemurError, Result};

/// Distributable encodings Lemur can export a certificate in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// PKCS#12 bundle (`.p12`)
    Pkcs12,
    /// DER certificate (`.crt`)
    Crt,
    /// Java keystore holding certificate and key
    JksKeystore,
    /// Java truststore holding the certificate
    JksTruststore,
}

impl ExportFormat {
    /// Every supported format
    pub const ALL: [Self; 4] = [Self::Pkcs12, Self::Crt, Self::JksKeystore, Self::JksTruststore];

    /// Lemur export plugin slug
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Pkcs12 | Self::Crt => "openssl-export",
            Self::JksKeystore => "java-keystore-jks",
            Self::JksTruststore => "java-truststore-jks",
        }
    }

    /// Returns true if the export is protected by a passphrase
    #[must_use]
    pub const fn has_passphrase(self) -> bool {
        !matches!(self, Self::Crt)
    }

    /// Returns true if the plugin takes the configured JKS passphrase
    #[must_use]
    pub const fn needs_jks_passphrase(self) -> bool {
        matches!(self, Self::JksKeystore | Self::JksTruststore)
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pkcs12 => write!(f, "pkcs12"),
            Self::Crt => write!(f, "crt"),
            Self::JksKeystore => write!(f, "jks-keystore"),
            Self::JksTruststore => write!(f, "jks-truststore"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = LemurError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pkcs12" | "p12" => Ok(Self::Pkcs12),
            "crt" => Ok(Self::Crt),
            "jks-keystore" | "keystore" => Ok(Self::JksKeystore),
            "jks-truststore" | "truststore" => Ok(Self::JksTruststore),
            _ => Err(LemurError::Config(format!(
                "unknown export format '{s}' (expected pkcs12, crt, jks-keystore or jks-truststore)"
            ))),
        }
    }
}

/// Request body for `POST /certificates/{id}/export`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Export plugin selection
    pub plugin: ExportPlugin,
}

/// Export plugin and its options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlugin {
    /// Plugin slug
    pub slug: String,

    /// Plugin options
    pub plugin_options: Vec<PluginOption>,
}

/// Name/value option passed to an export plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginOption {
    /// Option name
    pub name: String,
    /// Option value
    pub value: String,
}

impl PluginOption {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

impl ExportRequest {
    /// Build the plugin request for a format
    ///
    /// JKS formats require `jks_passphrase`; the other formats ignore it.
    pub fn for_format(format: ExportFormat, jks_passphrase: Option<&str>) -> Result<Self> {
        let plugin_options = match format {
            ExportFormat::Pkcs12 => vec![PluginOption::new("type", "PKCS12 (.p12)")],
            ExportFormat::Crt => vec![PluginOption::new("type", "CRT (.crt)")],
            ExportFormat::JksKeystore | ExportFormat::JksTruststore => {
                let passphrase = jks_passphrase.filter(|p| !p.is_empty()).ok_or_else(|| {
                    LemurError::Config(format!("a JKS passphrase is required for {format} exports"))
                })?;
                vec![PluginOption::new("passphrase", passphrase)]
            }
        };

        Ok(Self {
            plugin: ExportPlugin {
                slug: format.slug().to_string(),
                plugin_options,
            },
        })
    }
}

/// Response from `POST /certificates/{id}/export`
#[derive(Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    /// Base64 encoded payload
    pub data: String,

    /// Passphrase protecting the payload
    #[serde(default)]
    pub passphrase: Option<String>,
}

impl std::fmt::Debug for ExportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportResponse")
            .field("data_len", &self.data.len())
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// An exported certificate in one format
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    /// Export format
    pub format: ExportFormat,

    /// Base64 encoded payload
    pub data: String,

    /// Passphrase, absent for CRT
    pub passphrase: Option<String>,
}

impl std::fmt::Debug for ExportBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportBundle")
            .field("format", &self.format)
            .field("data_len", &self.data.len())
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pkcs12_request_body() {
        let request = ExportRequest::for_format(ExportFormat::Pkcs12, None).unwrap();
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"plugin": {
                "slug": "openssl-export",
                "pluginOptions": [{"name": "type", "value": "PKCS12 (.p12)"}]
            }})
        );
    }

    #[test]
    fn crt_uses_openssl_plugin() {
        let request = ExportRequest::for_format(ExportFormat::Crt, Some("ignored")).unwrap();
        assert_eq!(request.plugin.slug, "openssl-export");
        assert_eq!(request.plugin.plugin_options[0].value, "CRT (.crt)");
    }

    #[test]
    fn jks_formats_carry_passphrase() {
        for format in [ExportFormat::JksKeystore, ExportFormat::JksTruststore] {
            let request = ExportRequest::for_format(format, Some("changeit")).unwrap();
            assert_eq!(request.plugin.slug, format.slug());
            assert_eq!(
                request.plugin.plugin_options,
                vec![PluginOption::new("passphrase", "changeit")]
            );
        }
        assert_eq!(ExportFormat::JksTruststore.slug(), "java-truststore-jks");
    }

    #[test]
    fn jks_without_passphrase_is_a_config_error() {
        let err = ExportRequest::for_format(ExportFormat::JksKeystore, None).unwrap_err();
        assert!(matches!(err, LemurError::Config(_)));
        let err = ExportRequest::for_format(ExportFormat::JksTruststore, Some("")).unwrap_err();
        assert!(matches!(err, LemurError::Config(_)));
    }

    #[test]
    fn format_names_round_trip_through_display() {
        for format in ExportFormat::ALL {
            assert_eq!(format.to_string().parse::<ExportFormat>().unwrap(), format);
        }
        assert!("pem".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn crt_response_without_passphrase() {
        let response: ExportResponse = serde_json::from_str(r#"{"data": "MIIB"}"#).unwrap();
        assert_eq!(response.passphrase, None);
    }
}
