//! Actions that talk to the console over HTTP.

use crate::{
    api::{ConsoleApi, http::HttpApi},
    config::AppConfig,
    dom::{Dialogs, terminal::TerminalDialogs},
    forms::{DeleteMessages, DeleteOutcome, actions::DEFAULT_GENERATE_FAILURE, confirm_and_delete},
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::{collections::BTreeMap, io::Write};
use tracing::debug;

#[derive(Debug)]
pub struct ConnectionArgs {
    pub config: AppConfig,
    pub session_cookie: Option<SecretString>,
}

impl ConnectionArgs {
    fn client(&self) -> Result<HttpApi> {
        HttpApi::new(&self.config, self.session_cookie.as_ref())
            .context("failed to configure the console client")
    }
}

#[derive(Debug)]
pub struct DeleteArgs {
    pub connection: ConnectionArgs,
    pub url: String,
    pub message: String,
    pub replacements: BTreeMap<String, String>,
    pub assume_yes: bool,
}

impl DeleteArgs {
    fn messages(&self) -> DeleteMessages {
        DeleteMessages {
            confirm: self.message.clone(),
            success: "Deleted.".to_string(),
            error: "Error: ".to_string(),
            request_error: "Request failed: ".to_string(),
        }
    }
}

/// Prints one generated password.
/// # Errors
/// Returns an error if the request fails or the output cannot be written.
pub async fn generate<A: ConsoleApi, W: Write>(api: &A, out: &mut W) -> Result<bool> {
    let password = api
        .generate_password()
        .await
        .context(DEFAULT_GENERATE_FAILURE)?;
    writeln!(out, "{}", password.expose_secret())?;
    Ok(true)
}

/// Runs the confirm-then-delete flow. Cancelling counts as success.
pub async fn delete<A: ConsoleApi, D: Dialogs>(api: &A, dialogs: &D, args: &DeleteArgs) -> bool {
    let outcome = confirm_and_delete(
        api,
        dialogs,
        &args.url,
        &args.messages(),
        &args.replacements,
    )
    .await;
    debug!(?outcome, "delete finished");

    matches!(outcome, DeleteOutcome::Deleted | DeleteOutcome::Cancelled)
}

/// # Errors
/// Returns an error if the client cannot be built, the request fails, or the
/// output cannot be written.
pub async fn execute_generate<W: Write>(args: &ConnectionArgs, out: &mut W) -> Result<bool> {
    generate(&args.client()?, out).await
}

/// # Errors
/// Returns an error if the client cannot be built.
pub async fn execute_delete(args: &DeleteArgs) -> Result<bool> {
    let api = args.connection.client()?;
    let dialogs = TerminalDialogs::stdio(args.assume_yes);
    Ok(delete(&api, &dialogs, args).await)
}
