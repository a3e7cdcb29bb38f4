//! Login endpoint.

use crate::LemurClient;
use lemur_core::{LoginRequest, LoginResponse, Result};

/// Login endpoint
pub struct AuthApi<'a> {
    client: &'a LemurClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a LemurClient) -> Self {
        Self { client }
    }

    /// Exchange username and password for a bearer token
    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<String> {
        let request = LoginRequest {
            username: username.into(),
            password: password.into(),
        };

        let response: LoginResponse = self.client.post_anonymous("/auth/login", &request).await?;
        Ok(response.token)
    }
}
