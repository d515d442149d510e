//! `reqwest` transport for native hosts.

use super::{
    ConsoleApi, DEFAULT_TIMEOUT_MS, DeleteResponse, GeneratedPassword, build_url_with_base,
    parse_delete_body, sanitize_body,
};
use crate::{APP_USER_AGENT, config::AppConfig, errors::AppError};
use reqwest::{
    Client, Response,
    header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    generate_password_path: String,
}

impl HttpApi {
    /// Builds a client for `config.api_base_url`, which must be an absolute URL.
    /// `session_cookie` is sent verbatim as the `Cookie` header.
    pub fn new(config: &AppConfig, session_cookie: Option<&SecretString>) -> Result<Self, AppError> {
        let base = Url::parse(config.api_base_url.trim())
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;

        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie {
            let mut value = HeaderValue::from_str(cookie.expose_secret())
                .map_err(|_| AppError::Config("Invalid session cookie.".to_string()))?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_millis(u64::from(DEFAULT_TIMEOUT_MS)))
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base.to_string(),
            generate_password_path: config.generate_password_path.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }
}

impl ConsoleApi for HttpApi {
    async fn generate_password(&self) -> Result<SecretString, AppError> {
        let url = self.url(&self.generate_password_path);
        debug!(%url, "requesting generated password");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_request_error)?;
        let response = error_for_status(response).await?;
        let body = response
            .json::<GeneratedPassword>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))?;

        Ok(SecretString::from(body.password))
    }

    async fn delete_resource(&self, url: &str) -> Result<DeleteResponse, AppError> {
        let url = self.url(url);
        debug!(%url, "deleting resource");

        let response = self
            .client
            .delete(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(map_request_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_request_error)?;

        parse_delete_body(status.as_u16(), status.is_success(), &body)
    }
}

/// Maps network errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn error_for_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AppError::Http {
        status: status.as_u16(),
        message: sanitize_body(&body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_base_url() {
        let config = AppConfig {
            api_base_url: "/relative".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(HttpApi::new(&config, None), Err(AppError::Config(_))));
    }

    #[test]
    fn joins_paths_against_base() {
        let config = AppConfig {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            ..AppConfig::default()
        };
        let Ok(api) = HttpApi::new(&config, None) else {
            panic!("client should build");
        };
        assert_eq!(
            api.url("/api/generate-password"),
            "http://127.0.0.1:8080/api/generate-password"
        );
    }

    #[test]
    fn rejects_cookie_with_control_characters() {
        let config = AppConfig {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            ..AppConfig::default()
        };
        let cookie = SecretString::from("session=abc\n".to_string());
        assert!(matches!(
            HttpApi::new(&config, Some(&cookie)),
            Err(AppError::Config(_))
        ));
    }
}
