//! Read-mostly lookups: PKCS#12 bundles by common name and authority material.

use crate::{ArtifactFetcher, ExportRequestor, ExportSettings, LookupMode, Reconciler};
use lemur_client::LemurClient;
use lemur_core::{CertificateId, DesiredCertificate, ExportFormat, Result};
use serde::Serialize;
use tracing::info;

/// PKCS#12 bundle for a certificate found or issued by common name
#[derive(Clone, Serialize)]
pub struct PkcsRecord {
    /// Resolved certificate id
    pub certificate_id: CertificateId,

    /// Base64 PKCS#12 payload
    pub data: String,

    /// Bundle passphrase
    pub passphrase: String,

    /// True if the certificate was issued by this lookup
    pub created: bool,
}

impl std::fmt::Debug for PkcsRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PkcsRecord")
            .field("certificate_id", &self.certificate_id)
            .field("data_len", &self.data.len())
            .field("passphrase", &"<redacted>")
            .field("created", &self.created)
            .finish()
    }
}

/// Finds or issues a certificate by common name and exports it as PKCS#12
pub struct PkcsDataSource<'a> {
    client: &'a LemurClient,
}

impl<'a> PkcsDataSource<'a> {
    /// Create a data source using the given client
    pub const fn new(client: &'a LemurClient) -> Self {
        Self { client }
    }

    /// Find or issue the certificate by common name and export it as PKCS#12
    pub async fn read(&self, desired: &DesiredCertificate) -> Result<PkcsRecord> {
        let reconciled = Reconciler::new(self.client)
            .find_or_create(desired, LookupMode::ByCommonName)
            .await?;

        let settings = ExportSettings::only([ExportFormat::Pkcs12]);
        let bundle = ExportRequestor::new(self.client, &settings)
            .export(reconciled.id, ExportFormat::Pkcs12)
            .await?;

        Ok(PkcsRecord {
            certificate_id: reconciled.id,
            data: bundle.data,
            // PKCS#12 exports always carry one
            passphrase: bundle.passphrase.unwrap_or_default(),
            created: reconciled.created,
        })
    }
}

/// Signing material of a certificate authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorityRecord {
    /// Authority id
    pub authority_id: u64,

    /// Id of the authority's signing certificate
    pub signing_certificate_id: CertificateId,

    /// PEM body of the signing certificate
    pub pem: String,

    /// Base64 CRT export of the signing certificate
    pub crt_base64: String,
}

/// Resolves an authority by name and exposes its signing certificate
pub struct AuthorityDataSource<'a> {
    client: &'a LemurClient,
}

impl<'a> AuthorityDataSource<'a> {
    /// Create a data source using the given client
    pub const fn new(client: &'a LemurClient) -> Self {
        Self { client }
    }

    /// Look up `name` and fetch its signing certificate as PEM and CRT
    pub async fn read(&self, name: &str) -> Result<AuthorityRecord> {
        let authority = Reconciler::new(self.client).resolve_authority(name).await?;
        let signing = authority.signing_certificate_id;

        let public = ArtifactFetcher::new(self.client).fetch_public(signing).await?;

        let settings = ExportSettings::only([ExportFormat::Crt]);
        let crt = ExportRequestor::new(self.client, &settings)
            .export(signing, ExportFormat::Crt)
            .await?;

        info!(authority = name, id = authority.authority_id, "resolved authority");
        Ok(AuthorityRecord {
            authority_id: authority.authority_id,
            signing_certificate_id: signing,
            pem: public.body,
            crt_base64: crt.data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client, mount_detail, mount_exports, mount_search};
    use lemur_core::LemurError;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn desired() -> DesiredCertificate {
        DesiredCertificate::new("internal-ca", "team@x").with_common_name("svc-a.internal")
    }

    #[tokio::test]
    async fn pkcs_for_existing_certificate() {
        let server = MockServer::start().await;
        mount_search(
            &server,
            "cn;svc-a.internal",
            json!([{"id": 42, "cn": "svc-a.internal", "active": true}]),
        )
        .await;
        mount_exports(&server, 42).await;

        let client = client(&server);
        let record = PkcsDataSource::new(&client).read(&desired()).await.unwrap();

        assert_eq!(record.certificate_id, CertificateId(42));
        assert_eq!(record.data, "cDEy");
        assert_eq!(record.passphrase, "p12-pass");
        assert!(!record.created);
    }

    #[tokio::test]
    async fn pkcs_issues_when_missing() {
        let server = MockServer::start().await;
        mount_search(&server, "cn;svc-a.internal", json!([])).await;
        Mock::given(method("POST"))
            .and(path("/api/1/certificates"))
            .and(body_partial_json(json!({"commonName": "svc-a.internal"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
            .expect(1)
            .mount(&server)
            .await;
        mount_exports(&server, 7).await;

        let client = client(&server);
        let record = PkcsDataSource::new(&client).read(&desired()).await.unwrap();
        assert_eq!(record.certificate_id, CertificateId(7));
        assert!(record.created);
        assert!(!format!("{record:?}").contains("p12-pass"));
    }

    async fn mount_authority(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/1/authorities"))
            .and(query_param("filter", "name;internal-ca"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 1,
                "items": [{"id": 5, "name": "internal-ca", "active": true, "authorityCertificate": {"id": 42}}]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn authority_exposes_pem_and_crt() {
        let server = MockServer::start().await;
        mount_authority(&server).await;
        mount_detail(&server, 42, None).await;
        Mock::given(method("POST"))
            .and(path("/api/1/certificates/42/export"))
            .and(body_partial_json(json!({"plugin": {
                "pluginOptions": [{"name": "type", "value": "CRT (.crt)"}]
            }})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "MIIBcrt"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let record = AuthorityDataSource::new(&client)
            .read("internal-ca")
            .await
            .unwrap();

        assert_eq!(
            record,
            AuthorityRecord {
                authority_id: 5,
                signing_certificate_id: CertificateId(42),
                pem: "-----BEGIN CERT...".into(),
                crt_base64: "MIIBcrt".into(),
            }
        );
    }

    #[tokio::test]
    async fn authority_crt_failure_is_an_export_error() {
        let server = MockServer::start().await;
        mount_authority(&server).await;
        mount_detail(&server, 42, None).await;
        Mock::given(method("POST"))
            .and(path("/api/1/certificates/42/export"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let client = client(&server);
        let err = AuthorityDataSource::new(&client)
            .read("internal-ca")
            .await
            .unwrap_err();
        assert!(matches!(err, LemurError::Export { code: 403, .. }));
    }
}
