//! Telegram Members CLI - main entry point

use clap::Parser;
use tracing_subscriber::EnvFilter;

use telegram_members::{commands, Config};

#[derive(Parser)]
#[command(name = "telegram_members")]
#[command(about = "Export non-bot channel members to per-channel CSV files", long_about = None)]
#[command(version)]
struct Cli {
    /// Channel names to export (defaults to CHAT_NAMES from the environment)
    #[arg(value_delimiter = ',')]
    chats: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("telegram_members=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if !cli.chats.is_empty() {
        config.chat_names = cli.chats;
    }

    commands::export::run(&config).await?;

    Ok(())
}
