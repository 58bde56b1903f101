//! Shared request path for data calls.

use crate::error::{DecodeError, Error, Result, TransportError};
use crate::request::ApiRequest;
use crate::transport::ApiResponse;
use crate::types::from_json_slice;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use super::RedditClient;
use super::restriction;

/// Header carrying the server's remaining-call estimate
const RATE_LIMIT_HEADER: &str = "x-ratelimit-remaining";

/// Status and (decompressed) body of one response
pub(crate) struct ResponseBody {
    pub(crate) status: u16,
    pub(crate) body: Vec<u8>,
}

impl ResponseBody {
    /// Error for a non-200 status, carrying the body as text
    pub(crate) fn into_status_error(self) -> Error {
        Error::ApiStatus {
            status: self.status,
            body: String::from_utf8_lossy(&self.body).into_owned(),
        }
    }
}

impl RedditClient {
    /// Send one request, racing it against cancellation and the request timeout
    ///
    /// Cancellation wins ties: a token that is already cancelled never reaches the
    /// transport.
    pub(crate) async fn send(
        &self,
        cancel: &CancellationToken,
        request: ApiRequest,
    ) -> std::result::Result<ApiResponse, TransportError> {
        let deadline = self.config.request_timeout;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportError::Cancelled),
            result = tokio::time::timeout(deadline, self.transport.send(request)) => {
                result.unwrap_or(Err(TransportError::DeadlineExceeded(deadline)))
            }
        }
    }

    /// Record the rate signal and decompress the body if needed
    pub(crate) fn read_body(&self, response: ApiResponse) -> Result<ResponseBody> {
        if let Some(remaining) = response.header(RATE_LIMIT_HEADER) {
            self.session.record_rate_signal(remaining);
        }

        let body = if response.is_gzip() {
            self.gzip.decompress(&response.body)?
        } else {
            response.body
        };

        Ok(ResponseBody {
            status: response.status,
            body,
        })
    }

    /// Authenticated GET of `endpoint`, returning the raw JSON body
    ///
    /// Fails with [`Error::NotAuthenticated`] before sending anything when no
    /// credentials are held. A gated or quarantined response is retried once with
    /// the consent cookie.
    pub(crate) async fn fetch(
        &self,
        cancel: &CancellationToken,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<u8>> {
        let credentials = self.session.credentials().ok_or(Error::NotAuthenticated)?;
        let request =
            self.requests
                .data_request(endpoint, params, &credentials, self.session.user_agent())?;

        tracing::debug!(method = %request.method, endpoint, "Sending API request");

        let response = self.send(cancel, request.clone()).await?;
        let response = self.read_body(response)?;

        tracing::debug!(
            endpoint,
            status = response.status,
            bytes = response.body.len(),
            "API response received"
        );

        if response.status != 200 {
            return Err(response.into_status_error());
        }

        match restriction::detect(&response.body) {
            Some(reason) => self.resolve_restriction(cancel, &request, reason).await,
            None => Ok(response.body),
        }
    }

    /// Decode a successful body into `T`
    pub(crate) fn decode<T: DeserializeOwned>(&self, context: &'static str, body: &[u8]) -> Result<T> {
        from_json_slice(body).map_err(|e| {
            tracing::error!(context, error = %e, bytes = body.len(), "Failed to decode response");
            Error::Decode(DecodeError::json(context, e))
        })
    }
}
