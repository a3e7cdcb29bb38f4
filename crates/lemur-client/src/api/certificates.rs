//! Certificate API endpoints.

use crate::LemurClient;
use lemur_core::{
    CertificateDetail, CertificateId, CertificateSearchResponse, CreateCertificateRequest,
    ExportRequest, ExportResponse, IssuedCertificate, PrivateKeyResponse, Result,
};

/// Certificate API endpoints
pub struct CertificateApi<'a> {
    client: &'a LemurClient,
}

impl<'a> CertificateApi<'a> {
    pub(crate) fn new(client: &'a LemurClient) -> Self {
        Self { client }
    }

    /// Search certificates by name (`filter=name;<name>`)
    pub async fn search_by_name(&self, name: &str) -> Result<CertificateSearchResponse> {
        self.client
            .get_with_filter("/certificates", "name", name)
            .await
    }

    /// Search certificates by common name (`filter=cn;<cn>`)
    pub async fn search_by_common_name(&self, common_name: &str) -> Result<CertificateSearchResponse> {
        self.client
            .get_with_filter("/certificates", "cn", common_name)
            .await
    }

    /// Get a certificate's details, including its PEM body and chain
    pub async fn get(&self, id: CertificateId) -> Result<CertificateDetail> {
        self.client.get(&format!("/certificates/{id}")).await
    }

    /// Get a certificate's private key
    pub async fn key(&self, id: CertificateId) -> Result<PrivateKeyResponse> {
        self.client.get(&format!("/certificates/{id}/key")).await
    }

    /// Request issuance of a new certificate
    ///
    /// Lemur has no idempotency key: every call creates a certificate.
    pub async fn create(&self, request: &CreateCertificateRequest) -> Result<IssuedCertificate> {
        self.client.post("/certificates", request).await
    }

    /// Export a certificate through an export plugin
    pub async fn export(&self, id: CertificateId, request: &ExportRequest) -> Result<ExportResponse> {
        self.client
            .post(&format!("/certificates/{id}/export"), request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::LemurClient;
    use lemur_core::{CertificateId, ExportFormat, ExportRequest};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> LemurClient {
        LemurClient::new(server.uri(), "tok").unwrap()
    }

    #[tokio::test]
    async fn search_by_common_name_uses_cn_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/1/certificates"))
            .and(query_param("filter", "cn;svc-a.internal"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 1,
                "items": [{"id": 5, "cn": "svc-a.internal", "active": true}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .certificates()
            .search_by_common_name("svc-a.internal")
            .await
            .unwrap();
        assert_eq!(response.items[0].id, CertificateId(5));
    }

    #[tokio::test]
    async fn key_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/1/certificates/42/key"))
            .and(header("authorization", "bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "-----BEGIN KEY..."})))
            .expect(1)
            .mount(&server)
            .await;

        let key = client(&server)
            .certificates()
            .key(CertificateId(42))
            .await
            .unwrap();
        assert_eq!(key.key, "-----BEGIN KEY...");
    }

    #[tokio::test]
    async fn export_posts_plugin_body_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/1/certificates/42/export"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"plugin": {
                "slug": "openssl-export",
                "pluginOptions": [{"name": "type", "value": "CRT (.crt)"}]
            }})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "MIIB"})))
            .expect(1)
            .mount(&server)
            .await;

        let request = ExportRequest::for_format(ExportFormat::Crt, None).unwrap();
        let response = client(&server)
            .certificates()
            .export(CertificateId(42), &request)
            .await
            .unwrap();
        assert_eq!(response.data, "MIIB");
        assert!(response.passphrase.is_none());
    }

    #[tokio::test]
    async fn detail_missing_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/1/certificates/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3})))
            .mount(&server)
            .await;

        let err = client(&server)
            .certificates()
            .get(CertificateId(3))
            .await
            .unwrap_err();
        assert!(matches!(err, lemur_core::LemurError::Decode(_)));
    }
}
