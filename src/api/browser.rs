//! `gloo-net` transport for the browser bundle. Requests carry the session
//! cookie and are aborted after [`DEFAULT_TIMEOUT_MS`].

use super::{
    ConsoleApi, DEFAULT_TIMEOUT_MS, DeleteResponse, GeneratedPassword, build_url_with_base,
    parse_delete_body, sanitize_body,
};
use crate::{config::AppConfig, errors::AppError};
use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use secrecy::SecretString;
use web_sys::{AbortController, RequestCredentials};

#[derive(Clone, Debug)]
pub struct BrowserApi {
    base_url: String,
    generate_password_path: String,
}

impl BrowserApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            generate_password_path: config.generate_password_path.clone(),
        }
    }
}

impl ConsoleApi for BrowserApi {
    async fn generate_password(&self) -> Result<SecretString, AppError> {
        let url = build_url_with_base(&self.base_url, &self.generate_password_path);
        let response = send_with_timeout(|signal| {
            Request::get(&url)
                .credentials(RequestCredentials::Include)
                .abort_signal(Some(signal))
                .build()
                .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
        })
        .await?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Http {
                status,
                message: sanitize_body(&body),
            });
        }

        let body = response
            .json::<GeneratedPassword>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))?;
        Ok(SecretString::from(body.password))
    }

    async fn delete_resource(&self, url: &str) -> Result<DeleteResponse, AppError> {
        let url = build_url_with_base(&self.base_url, url);
        let response = send_with_timeout(|signal| {
            Request::delete(&url)
                .header("Content-Type", "application/json")
                .credentials(RequestCredentials::Include)
                .abort_signal(Some(signal))
                .build()
                .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
        })
        .await?;

        let status = response.status();
        let ok = response.ok();
        let body = response.text().await.map_err(map_request_error)?;
        parse_delete_body(status, ok, &body)
    }
}

/// Maps network errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: gloo_net::Error) -> AppError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Sends a request with an abort timeout to avoid hanging UI state.
async fn send_with_timeout(
    build_request: impl FnOnce(&web_sys::AbortSignal) -> Result<Request, AppError>,
) -> Result<Response, AppError> {
    let controller = AbortController::new()
        .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

    let request = build_request(&signal)?;
    request.send().await.map_err(map_request_error)
}
