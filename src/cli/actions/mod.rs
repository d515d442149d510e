pub mod check;
pub mod remote;

// Internal "interpreter" for `Action`.
mod run;

use std::process::ExitCode;

#[derive(Debug)]
pub enum Action {
    Strength(check::StrengthArgs),
    Email(check::EmailArgs),
    Preview(check::PreviewArgs),
    Generate(remote::ConnectionArgs),
    Delete(remote::DeleteArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<ExitCode> {
        run::execute(self).await
    }
}
