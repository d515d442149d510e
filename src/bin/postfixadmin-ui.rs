#[cfg(not(target_arch = "wasm32"))]
use postfixadmin_ui::cli;

// Main function
#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<std::process::ExitCode> {
    let action = cli::start()?;

    action.execute().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
