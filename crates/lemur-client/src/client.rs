//! Main Lemur API client implementation.

use crate::api::*;
use crate::config::ClientConfig;
use lemur_core::{LemurError, LoginRequest, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Main Lemur API client
#[derive(Clone)]
pub struct LemurClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    token: Option<String>,
    base_url: String,
}

impl std::fmt::Debug for LemurClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemurClient")
            .field("base_url", &self.inner.base_url)
            .field("authenticated", &self.inner.token.is_some())
            .finish()
    }
}

impl LemurClient {
    /// Create a client for `host` using a token obtained elsewhere
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        LemurClientBuilder::new(host).token(token).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(host: impl Into<String>) -> LemurClientBuilder {
        LemurClientBuilder::new(host)
    }

    /// The API base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns true if the client carries a bearer token
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.token.is_some()
    }

    /// A copy of this client that authenticates with `token`
    #[must_use]
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: self.inner.http.clone(),
                token: Some(token.into()),
                base_url: self.inner.base_url.clone(),
            }),
        }
    }

    /// Access the login endpoint
    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Access certificate endpoints
    #[must_use]
    pub fn certificates(&self) -> CertificateApi<'_> {
        CertificateApi::new(self)
    }

    /// Access authority endpoints
    #[must_use]
    pub fn authorities(&self) -> AuthorityApi<'_> {
        AuthorityApi::new(self)
    }

    /// Perform a GET request
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        debug!(url = %url, "GET request");

        let request = self.authorize(self.inner.http.get(&url));
        self.execute(request, &url).await
    }

    /// Perform a GET request against a search endpoint (`?filter=<field>;<value>`)
    pub(crate) async fn get_with_filter<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        value: &str,
    ) -> Result<T> {
        let filter = format!("{field};{}", urlencoding::encode(value));
        self.get(&format!("{path}?filter={filter}")).await
    }

    /// Perform a POST request with JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path);
        debug!(url = %url, "POST request");

        let request = self.authorize(self.inner.http.post(&url).json(body));
        self.execute(request, &url).await
    }

    /// Perform a POST request without the bearer token
    pub(crate) async fn post_anonymous<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &LoginRequest,
    ) -> Result<T> {
        let url = self.build_url(path);
        debug!(url = %url, "POST request (anonymous)");

        let request = self.inner.http.post(&url).json(body);
        self.execute(request, &url).await
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.inner.token {
            Some(token) => request.header(AUTHORIZATION, format!("bearer {token}")),
            None => request,
        }
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| LemurError::Transport(e.to_string()))?;

        Self::handle_response(response, url).await
    }

    /// Decode a 200 response, turn anything else into a status error
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
        url: &str,
    ) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LemurError::Transport(e.to_string()))?;

        if status == StatusCode::OK {
            serde_json::from_str(&body).map_err(LemurError::from)
        } else {
            warn!(url = %url, status = status.as_u16(), "Lemur rejected request");
            Err(LemurError::Status {
                code: status.as_u16(),
                body,
            })
        }
    }
}

/// Builder for configuring a [`LemurClient`]
pub struct LemurClientBuilder {
    config: ClientConfig,
    token: Option<String>,
}

impl LemurClientBuilder {
    /// Create a new builder for the given Lemur host
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            config: ClientConfig::new(host),
            token: None,
        }
    }

    /// Start from an existing configuration
    #[must_use]
    pub const fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            token: None,
        }
    }

    /// Set the bearer token
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<LemurClient> {
        let base_url = self.config.api_base()?;
        let http = HttpClient::builder()
            .timeout(self.config.timeout)
            .user_agent(&self.config.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| LemurError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(LemurClient {
            inner: Arc::new(ClientInner {
                http,
                token: self.token,
                base_url,
            }),
        })
    }

    /// Log in with username and password and build a client carrying the token
    pub async fn login(
        self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<LemurClient> {
        let client = Self {
            token: None,
            ..self
        }
        .build()?;

        let token = client.auth().login(username, password).await?;
        Ok(client.with_token(token))
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemur_core::CertificateSearchResponse;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/1/certificates"))
            .and(header("authorization", "bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0, "items": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = LemurClient::new(server.uri(), "secret-token").unwrap();
        let response: CertificateSearchResponse = client.get("/certificates").await.unwrap();
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn filter_value_is_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/1/certificates"))
            .and(query_param("filter", "name;web server"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let client = LemurClient::new(server.uri(), "t").unwrap();
        let _: CertificateSearchResponse = client
            .get_with_filter("/certificates", "name", "web server")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_200_keeps_status_and_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("{\"message\": \"nope\"}"))
            .mount(&server)
            .await;

        let client = LemurClient::new(server.uri(), "t").unwrap();
        let err = client
            .get::<CertificateSearchResponse>("/certificates")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(403));
        assert_eq!(err.raw_body(), Some("{\"message\": \"nope\"}"));
    }

    #[tokio::test]
    async fn other_2xx_statuses_are_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = LemurClient::new(server.uri(), "t").unwrap();
        let err = client
            .get::<CertificateSearchResponse>("/certificates")
            .await
            .unwrap_err();
        assert!(matches!(err, LemurError::Status { code: 204, .. }));
    }

    #[tokio::test]
    async fn malformed_json_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = LemurClient::new(server.uri(), "t").unwrap();
        let err = client
            .get::<CertificateSearchResponse>("/certificates")
            .await
            .unwrap_err();
        assert!(matches!(err, LemurError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) is not expected to be listening
        let client = LemurClient::builder("http://127.0.0.1:9")
            .token("t")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let err = client
            .get::<CertificateSearchResponse>("/certificates")
            .await
            .unwrap_err();
        assert!(matches!(err, LemurError::Transport(_)));
    }

    #[tokio::test]
    async fn login_builds_authenticated_client() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/1/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "fresh"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = LemurClient::builder(server.uri())
            .login("admin", "hunter2")
            .await
            .unwrap();
        assert!(client.is_authenticated());
    }

    #[test]
    fn debug_does_not_leak_token() {
        let client = LemurClient::new("https://lemur.example.com", "secret-token").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("https://lemur.example.com/api/1"));
    }
}
