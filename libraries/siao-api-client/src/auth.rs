//! Authentication against the content API.

use crate::error::{ApiClientError, Result};
use crate::response::read_json;
use crate::types::{LoginRequest, LoginResponse};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

/// Authentication client for the content API.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Login with email and password.
    ///
    /// Returns the bearer token and user on success; storing the token is
    /// up to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = format!("{}/auth/login", self.base_url);
        debug!(url = %url, email = %email, "Attempting login");

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ApiClientError::from_send)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::UNPROCESSABLE_ENTITY {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Login failed: invalid credentials");
            return Err(ApiClientError::AuthFailed(
                "Invalid email or password".to_string(),
            ));
        }

        let login: LoginResponse = read_json(response, "login").await?;
        if login.token.is_empty() {
            return Err(ApiClientError::Parse(
                "Login response carried an empty token".to_string(),
            ));
        }

        info!(email = %email, "Login successful");
        Ok(login)
    }
}
