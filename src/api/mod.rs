//! Console API transport. Controllers depend on [`ConsoleApi`] only; the browser
//! build talks to the server through `gloo-net`, native hosts through `reqwest`.
//! Neither transport logs request or response bodies, since generated passwords
//! travel through them.

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;

use crate::errors::AppError;
use secrecy::SecretString;
use serde::Deserialize;

/// Default request timeout (milliseconds) applied to all transports.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;
/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Deserialize)]
pub struct GeneratedPassword {
    pub password: String,
}

/// Body returned by every delete endpoint, on success and on failure.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait ConsoleApi {
    async fn generate_password(&self) -> Result<SecretString, AppError>;

    /// Issues `DELETE url`. Any response carrying a [`DeleteResponse`] body is
    /// returned as `Ok`, with `success` forced to `false` for non-2xx statuses;
    /// `Err` means no usable response arrived.
    async fn delete_resource(&self, url: &str) -> Result<DeleteResponse, AppError>;
}

/// Builds a URL from an explicit base URL and the provided path. Absolute
/// targets are returned unchanged.
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Interprets a delete response body for the given status.
pub(crate) fn parse_delete_body(status: u16, ok: bool, body: &str) -> Result<DeleteResponse, AppError> {
    match serde_json::from_str::<DeleteResponse>(body) {
        Ok(mut response) => {
            if !ok {
                response.success = false;
            }
            Ok(response)
        }
        Err(err) if ok => Err(AppError::Parse(format!("Failed to decode response: {err}"))),
        Err(_) => Err(AppError::Http {
            status,
            message: sanitize_body(body),
        }),
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
pub(crate) fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
