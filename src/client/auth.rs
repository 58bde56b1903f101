//! Credential acquisition.

use crate::error::{AuthError, DecodeError, Result};
use crate::session::{AccessTokenResponse, Credentials};
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use super::RedditClient;

impl RedditClient {
    /// Exchange the Android client id for an anonymous access token
    ///
    /// Sends the app's login request (Basic auth with the client id, the spoofed
    /// device headers and the `{"scopes": ["*", "email", "pii"]}` body). On success
    /// the token plus the `x-reddit-loid` and `x-reddit-session` response headers are
    /// stored in the session and every data call becomes available.
    ///
    /// Calling it again replaces the stored credentials. On failure the session is
    /// left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`](crate::Error::Authentication) when the
    /// request fails, is cancelled or times out, when the server answers with a
    /// status other than 200, or when the body holds no usable token.
    pub async fn authenticate(&self, cancel: &CancellationToken) -> Result<()> {
        let request = self.requests.auth_request(
            &self.config.client_id,
            self.session.user_agent(),
            self.session.device_id(),
        )?;

        tracing::debug!(method = %request.method, endpoint = request.endpoint(), "Sending authentication request");

        let response = self
            .send(cancel, request)
            .await
            .map_err(AuthError::Transport)?;

        if response.status != 200 {
            tracing::warn!(status = response.status, "Authentication rejected");
            return Err(AuthError::Status {
                status: response.status,
            }
            .into());
        }

        let loid = response.header("x-reddit-loid").unwrap_or_default().to_string();
        let session_id = response
            .header("x-reddit-session")
            .unwrap_or_default()
            .to_string();

        let body = if response.is_gzip() {
            self.gzip
                .decompress(&response.body)
                .map_err(AuthError::Decode)?
        } else {
            response.body
        };

        let token: AccessTokenResponse = serde_json::from_slice(&body)
            .map_err(|e| AuthError::Decode(DecodeError::json("OAuth response", e)))?;
        if token.access_token.is_empty() {
            return Err(AuthError::EmptyToken.into());
        }

        let credentials = Credentials::from_token_response(token, loid, session_id, Utc::now());
        tracing::info!(
            expires_at = %credentials.expires_at,
            scopes = credentials.scope.len(),
            has_loid = !credentials.loid.is_empty(),
            "Authenticated"
        );
        self.session.set_credentials(credentials);

        Ok(())
    }
}
