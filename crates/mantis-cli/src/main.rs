use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mantis_types::BotConfig;

/// Mantis -- a WhatsApp command bot.
#[derive(Parser, Debug)]
#[command(name = "mantis", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the bot
    Run {
        /// Path to the mantis.toml configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load the configuration, apply env overrides, and print the result
    CheckConfig {
        /// Path to the mantis.toml configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with env filter (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config } => {
            let config = BotConfig::load(config.as_deref())?;
            info!(prefix = %config.prefix, "starting mantis");
            mantis_daemon::run(config).await
        }
        Commands::CheckConfig { config } => {
            let config = BotConfig::load(config.as_deref())?;
            println!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
