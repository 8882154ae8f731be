//! kw-notify CLI - send one cluster event to a Discord webhook.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kw_notify::{ClusterEvent, DiscordChannel, DiscordConfig, NotifyChannel};

/// Send a cluster event to a Discord webhook.
#[derive(Parser)]
#[command(name = "kw-notify")]
#[command(about = "Send a cluster event to a Discord webhook")]
#[command(version)]
pub struct Cli {
    /// Discord webhook URL (falls back to KW_DISCORD_WEBHOOK)
    #[arg(short, long, default_value = "")]
    webhook: String,

    /// Event status: Normal, Warning, Danger or anything else
    #[arg(short, long, default_value = "Normal")]
    status: String,

    /// Message text to send
    #[arg(short, long, conflicts_with = "event")]
    message: Option<String>,

    /// JSON file holding a full cluster event
    #[arg(short, long)]
    event: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_event(cli: &Cli) -> Result<ClusterEvent> {
    if let Some(path) = &cli.event {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event file {}", path.display()))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse event file {}", path.display()));
    }

    match &cli.message {
        Some(message) => Ok(ClusterEvent::with_message(cli.status.clone(), message.clone())),
        None => bail!("either --message or --event is required"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("kw_notify=debug,info")
    } else {
        EnvFilter::new("kw_notify=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let channel = DiscordChannel::init(&DiscordConfig::new(cli.webhook.clone()))?;
    let event = load_event(&cli)?;

    channel.handle(&event).await;

    Ok(())
}
