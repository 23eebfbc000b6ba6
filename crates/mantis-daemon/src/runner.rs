//! Inbound event loop.
//!
//! Drains the gateway's long-poll event feed and hands events to the
//! dispatcher one at a time: messages are processed sequentially, and the
//! dispatcher's own failure boundary keeps a bad message from ending the
//! loop. Transient poll errors back off briefly and retry; a `Shutdown`
//! error or the shutdown signal ends the loop.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use mantis_channel::{ChannelError, EventSource};
use mantis_commands::Dispatcher;

/// Poll `source` and dispatch events until shutdown.
pub async fn run_events(
    source: &impl EventSource,
    dispatcher: &Dispatcher,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("event loop started");

    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    info!("event loop shutting down");
                    break;
                }
            }
            batch = source.next_events() => match batch {
                Ok(events) => {
                    for event in events {
                        dispatcher.handle_incoming(event).await;
                    }
                }
                Err(ChannelError::Shutdown) => {
                    info!("event feed shut down");
                    break;
                }
                Err(e) => {
                    warn!("event poll failed: {e}");
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
            }
        }
    }

    info!("event loop stopped");
}
