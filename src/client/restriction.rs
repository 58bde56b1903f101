//! Restricted-content handling.
//!
//! A data endpoint may answer 200 with `{"reason": "..."}` instead of the expected
//! payload. Gated and quarantined communities only need the consent cookie, so the
//! request is resent once with it; private and unknown restrictions are terminal.

use crate::error::{Error, RestrictionReason, Result};
use crate::request::ApiRequest;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use super::RedditClient;

/// Preferences that opt in to quarantined and gated communities
const CONSENT_OPTIONS: &str = r#"{"pref_quarantine_optin": true, "pref_gated_sr_optin": true}"#;

/// Value of the `Cookie` header sent on the consent retry
pub fn consent_cookie() -> String {
    format!("_options={}", urlencoding::encode(CONSENT_OPTIONS))
}

#[derive(Deserialize)]
struct ReasonProbe {
    #[serde(default)]
    reason: Option<String>,
}

/// Restriction reason carried by `body`, if it is a `{"reason": "..."}` object
///
/// Bodies that are not such an object, or whose reason is empty, are not restricted.
pub(crate) fn detect(body: &[u8]) -> Option<RestrictionReason> {
    let probe: ReasonProbe = serde_json::from_slice(body).ok()?;
    probe
        .reason
        .filter(|reason| !reason.is_empty())
        .map(|reason| RestrictionReason::parse(&reason))
}

impl RedditClient {
    /// Retry a recoverable restriction once, or fail with the restriction
    ///
    /// The retry body is returned as-is: its rate signal is recorded and it is
    /// decompressed, but it is not probed for a reason again. A non-200 retry is an
    /// [`Error::ApiStatus`].
    pub(crate) async fn resolve_restriction(
        &self,
        cancel: &CancellationToken,
        original: &ApiRequest,
        reason: RestrictionReason,
    ) -> Result<Vec<u8>> {
        if !reason.is_recoverable() {
            tracing::warn!(
                endpoint = original.endpoint(),
                reason = reason.as_str(),
                "Content restricted"
            );
            return Err(Error::RestrictedContent(reason));
        }

        tracing::warn!(
            endpoint = original.endpoint(),
            reason = reason.as_str(),
            "Content requires consent, retrying with opt-in cookie"
        );

        let retry = self
            .requests
            .with_header(original, "Cookie", &consent_cookie());
        let response = self.send(cancel, retry).await?;
        let response = self.read_body(response)?;

        if response.status != 200 {
            return Err(response.into_status_error());
        }
        Ok(response.body)
    }
}
