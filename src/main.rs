use std::process::ExitCode;

use anyhow::Result;
use fitlog::cli::run_cli;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let code = run_cli().await.inspect_err(|e| {
        error!("Error running cli {e:?}");
    })?;
    Ok(code)
}
