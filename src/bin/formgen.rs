use std::process::ExitCode;

use anyhow::Result;
use formgen::cli;
use formgen::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Parse configuration from command line and settings file
    let config = Config::from_args_and_env()?;
    cli::init_logging(&config.log_level);

    cli::run(config).await
}
