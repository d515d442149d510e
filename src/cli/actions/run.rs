use crate::cli::actions::{Action, check, remote};
use anyhow::Result;
use std::{io, process::ExitCode};

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<ExitCode> {
    let mut stdout = io::stdout();
    let succeeded = match action {
        Action::Strength(args) => check::strength(&args, &mut stdout)?,
        Action::Email(args) => check::email(&args, &mut stdout)?,
        Action::Preview(args) => check::preview(&args, &mut stdout)?,
        Action::Generate(args) => remote::execute_generate(&args, &mut stdout).await?,
        Action::Delete(args) => remote::execute_delete(&args).await?,
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
