//! Network-backed form actions: password generation and confirmed deletes.
//!
//! Failures are always reported to the operator through [`Dialogs`] and logged;
//! nothing here retries or leaves the page unusable.

use crate::{
    api::ConsoleApi,
    dom::{Dialogs, Element},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

pub const DEFAULT_GENERATE_FAILURE: &str = "Failed to generate password";
/// Appended to the error message when the server gives no reason.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Alert text for the delete flow. `confirm` may contain `${key}` placeholders.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMessages {
    pub confirm: String,
    pub success: String,
    pub error: String,
    pub request_error: String,
}

/// One delete action as configured by the page.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub url: String,
    #[serde(default)]
    pub replacements: BTreeMap<String, String>,
    pub msgs: DeleteMessages,
}

/// Target inputs for a generated password.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub password_id: String,
    pub confirm_id: String,
    #[serde(default)]
    pub fail_msg: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The operator declined; no request was sent.
    Cancelled,
    Deleted,
    /// The server answered and refused, with its reason.
    Rejected(String),
    /// No usable response arrived.
    TransportFailed(String),
}

/// Replaces every `${key}` in `template` with its value.
pub fn substitute_placeholders(template: &str, replacements: &BTreeMap<String, String>) -> String {
    replacements
        .iter()
        .fold(template.to_string(), |message, (key, value)| {
            message.replace(&format!("${{{key}}}"), value)
        })
}

/// Fetches a generated password, writes it into both inputs and hands it to
/// `on_success`.
///
/// On failure the operator sees `failure_message` (or a generic text) and the
/// inputs are left untouched.
pub async fn request_generated_password<A, E, D>(
    api: &A,
    password: &E,
    confirm: &E,
    dialogs: &D,
    failure_message: Option<&str>,
    on_success: impl FnOnce(&SecretString),
) -> Option<SecretString>
where
    A: ConsoleApi,
    E: Element,
    D: Dialogs,
{
    match api.generate_password().await {
        Ok(generated) => {
            password.set_value(generated.expose_secret());
            confirm.set_value(generated.expose_secret());
            info!("generated password written to form");
            on_success(&generated);
            Some(generated)
        }
        Err(err) => {
            error!("Failed to generate password: {err}");
            dialogs.alert(failure_message.unwrap_or(DEFAULT_GENERATE_FAILURE));
            None
        }
    }
}

/// Asks for confirmation, then deletes `url` and reports the outcome.
///
/// A successful delete reloads the page instead of patching it.
pub async fn confirm_and_delete<A, D>(
    api: &A,
    dialogs: &D,
    url: &str,
    messages: &DeleteMessages,
    replacements: &BTreeMap<String, String>,
) -> DeleteOutcome
where
    A: ConsoleApi,
    D: Dialogs,
{
    let prompt = substitute_placeholders(&messages.confirm, replacements);
    if !dialogs.confirm(&prompt) {
        return DeleteOutcome::Cancelled;
    }

    let outcome = match api.delete_resource(url).await {
        Ok(response) if response.success => DeleteOutcome::Deleted,
        Ok(response) => DeleteOutcome::Rejected(
            response
                .error
                .filter(|reason| !reason.is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        ),
        Err(err) => {
            error!("Delete request for {url} failed: {err}");
            DeleteOutcome::TransportFailed(err.detail())
        }
    };

    match &outcome {
        DeleteOutcome::Deleted => {
            info!("deleted {url}");
            dialogs.alert(&messages.success);
            dialogs.reload();
        }
        DeleteOutcome::Rejected(reason) => {
            warn!("server refused to delete {url}: {reason}");
            dialogs.alert(&format!("{}{reason}", messages.error));
        }
        DeleteOutcome::TransportFailed(detail) => {
            dialogs.alert(&format!("{}{detail}", messages.request_error));
        }
        DeleteOutcome::Cancelled => {}
    }

    outcome
}
