//! Authority API endpoints.

use crate::LemurClient;
use lemur_core::{AuthoritySearchResponse, Result};

/// Authority API endpoints
pub struct AuthorityApi<'a> {
    client: &'a LemurClient,
}

impl<'a> AuthorityApi<'a> {
    pub(crate) fn new(client: &'a LemurClient) -> Self {
        Self { client }
    }

    /// Search authorities by name (`filter=name;<name>`)
    pub async fn search_by_name(&self, name: &str) -> Result<AuthoritySearchResponse> {
        self.client
            .get_with_filter("/authorities", "name", name)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::LemurClient;
    use lemur_core::CertificateId;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn search_decodes_signing_certificate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/1/authorities"))
            .and(query_param("filter", "name;internal-ca"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 1,
                "items": [{
                    "id": 3,
                    "name": "internal-ca",
                    "active": true,
                    "authorityCertificate": {"id": 17, "name": "internal-ca-root"}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LemurClient::new(server.uri(), "tok").unwrap();
        let response = client.authorities().search_by_name("internal-ca").await.unwrap();
        let cert = response.items[0].authority_certificate.unwrap();
        assert_eq!(cert.id, CertificateId(17));
    }
}
