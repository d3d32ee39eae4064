use clap::Parser;

use users_api::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (settings, environment) = load_and_merge_config(&cli)?;
    let log_handle = init_logger_from_settings(&settings)?;

    tracing::debug!(
        level = ?log_handle.current_level(),
        environment = %environment.as_str(),
        "Logger initialized"
    );

    if let Err(e) = execute_command(&cli, settings, environment).await {
        tracing::error!(error = %e, "Command failed");
        return Err(e.into());
    }

    Ok(())
}
