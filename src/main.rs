use anyhow::Result;
use clap::Parser;
use tokio::runtime::Runtime;

use gca_rs::ui::Console;
use gca_rs::*;

fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = cli::Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();

    // Fail fast on a broken config file. A missing API key is NOT fatal:
    // the session starts and the generate action reports it.
    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            let console = Console::new(true);
            console.error(&e.to_string());
            if let Some(suggestion) = e.suggestion() {
                console.info(&suggestion);
            }
            std::process::exit(1);
        }
    };

    let options = session::shell::SessionOptions {
        initial_path: cli.path.clone(),
        provider_override: cli.provider.clone(),
    };

    let rt = Runtime::new()?;
    rt.block_on(async {
        match session::shell::run(&config, &options).await {
            Ok(()) => Ok(()),
            // Quitting mid-prompt is a normal exit, not an error.
            Err(error::GcaError::UserCancelled) => Ok(()),
            Err(e) => {
                let console = Console::new(config.ui.colored);
                console.error(&e.to_string());
                if let Some(suggestion) = e.suggestion() {
                    println!();
                    console.info(&suggestion);
                }
                std::process::exit(1);
            }
        }
    })
}
