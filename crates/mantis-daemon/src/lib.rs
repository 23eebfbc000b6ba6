//! Daemon wiring for the Mantis bot.
//!
//! [`run`] performs the full startup sequence: session bootstrap, gateway
//! connect, command registration, health endpoint, owner notice, then the
//! inbound event loop until ctrl-c.

pub mod bootstrap;
pub mod commands;
pub mod health;
pub mod runner;
pub mod session;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::{info, warn};

use mantis_channel::{MessagingClient, WhatsappGateway};
use mantis_commands::{CommandRegistry, Dispatcher};
use mantis_types::{BotConfig, Jid};

/// Run the bot until the event feed ends or ctrl-c arrives.
pub async fn run(config: BotConfig) -> Result<()> {
    let status = session::ensure_session(&config).await;
    info!(?status, "session bootstrap complete");

    let gateway = Arc::new(
        WhatsappGateway::connect(config.gateway.clone())
            .await
            .context("failed to connect to gateway")?,
    );
    info!(jid = %gateway.self_jid(), "gateway session established");

    let mut registry = CommandRegistry::new();
    bootstrap::install(&mut registry);
    info!(commands = registry.len(), "command registry initialized");
    let registry = Arc::new(registry);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let health_listen = config.health_listen.clone();
    let health_shutdown = shutdown_rx.clone();
    tokio::spawn(async move {
        if let Err(e) = health::serve(&health_listen, health_shutdown).await {
            warn!("health server error: {e}");
        }
    });

    notify_owner(&config, gateway.as_ref(), registry.len()).await;

    let client: Arc<dyn MessagingClient> = gateway.clone();
    let dispatcher = Dispatcher::new(registry, client, config);

    tokio::select! {
        _ = runner::run_events(gateway.as_ref(), &dispatcher, shutdown_rx) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("ctrl-c received, shutting down");
        }
    }
    let _ = shutdown_tx.send(true);

    Ok(())
}

/// Best-effort startup notice to the first configured owner.
async fn notify_owner(config: &BotConfig, client: &dyn MessagingClient, command_count: usize) {
    let Some(owner) = config.owner_numbers.first() else {
        return;
    };
    let text = format!(
        "Mantis online as {} with {command_count} commands. Send {}menu for the list.",
        client.self_jid().bare(),
        config.prefix,
    );
    if let Err(e) = client.send_text(&Jid::user(owner), &text, None).await {
        warn!("failed to send startup notice: {e}");
    }
}
