//! Per-event dispatch pipeline.
//!
//! [`Dispatcher::handle_incoming`] runs once per inbound chat event:
//! unwrap ephemeral envelopes, extract the text body, parse the prefix,
//! resolve sender and group context, look up the command, send the
//! acknowledgement reaction, and invoke the handler. The whole pipeline
//! sits inside a failure boundary -- one malformed or failing message is
//! logged and dropped, never letting an error escape into the event loop.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::{debug, warn};

use mantis_channel::{GroupMetadata, MessageEvent, MessagingClient};
use mantis_types::{BotConfig, Jid};

use crate::context::CommandContext;
use crate::registry::CommandRegistry;

/// A parsed command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Lowercased command name (first space-delimited token after the
    /// prefix; may be empty for a bare prefix).
    pub command: String,
    /// Argument tokens.
    pub args: Vec<String>,
    /// Arguments joined with single spaces.
    pub query: String,
}

/// Parse a message body as a command invocation.
///
/// Returns `None` when the body does not start with the prefix -- an
/// ordinary chat message, not an error.
///
/// The command name is the first single-space-delimited token after
/// stripping the prefix, lowercased. Arguments are the whitespace tokens
/// of the full trimmed body with the first token dropped. The two splits
/// are deliberately independent: a body with whitespace between prefix
/// and name (`"! echo hi"`) parses an empty command name while the name
/// token shifts into the arguments, matching the behavior this bot has
/// always had.
pub fn parse_invocation(body: &str, prefix: &str) -> Option<Invocation> {
    if !body.starts_with(prefix) {
        return None;
    }

    let command = body[prefix.len()..]
        .split(' ')
        .next()
        .unwrap_or("")
        .to_lowercase();
    let args: Vec<String> = body
        .trim()
        .split_whitespace()
        .skip(1)
        .map(String::from)
        .collect();
    let query = args.join(" ");

    Some(Invocation { command, args, query })
}

/// Dispatches inbound message events to registered commands.
///
/// Holds read-only shared state: the registry is fully populated before
/// the event loop starts, so no locking is needed at dispatch time.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    client: Arc<dyn MessagingClient>,
    config: BotConfig,
}

impl Dispatcher {
    /// Create a dispatcher over a populated registry.
    pub fn new(
        registry: Arc<CommandRegistry>,
        client: Arc<dyn MessagingClient>,
        config: BotConfig,
    ) -> Self {
        Self {
            registry,
            client,
            config,
        }
    }

    /// Handle one inbound event. Never fails: the pipeline's failure
    /// boundary logs and swallows every error so the event loop survives
    /// malformed messages and failing handlers.
    pub async fn handle_incoming(&self, event: MessageEvent) {
        if let Err(e) = self.dispatch(event).await {
            warn!("message handling failed: {e:#}");
        }
    }

    async fn dispatch(&self, event: MessageEvent) -> Result<()> {
        // Steps 1-3: payload presence, ephemeral unwrap, text extraction.
        let Some(content) = event.content else {
            return Ok(());
        };
        let content = content.into_unwrapped();
        let body = content.body().to_string();

        // Steps 4-5: prefix parse; ordinary chat messages end here.
        let Some(invocation) = parse_invocation(&body, &self.config.prefix) else {
            return Ok(());
        };

        // Step 6: sender resolution.
        let self_jid = self.client.self_jid().clone();
        let sender: Jid = if event.key.from_me {
            self_jid.clone()
        } else {
            event
                .key
                .participant
                .clone()
                .unwrap_or_else(|| event.key.chat.clone())
        };
        let sender_number = sender.bare().to_string();
        let is_group = event.key.chat.is_group();
        let is_me = self_jid.bare() == sender_number;

        // Step 8: ownership.
        let is_owner = self.config.is_owner(&sender_number) || is_me;

        // Step 7: group context, degrading to empty metadata on failure.
        let group = if is_group {
            match self.client.group_metadata(&event.key.chat).await {
                Ok(meta) => meta,
                Err(e) => {
                    debug!(chat = %event.key.chat, "group metadata fetch failed: {e}");
                    GroupMetadata::default()
                }
            }
        } else {
            GroupMetadata::default()
        };
        let admins = group.admins();
        let is_admin = admins.iter().any(|j| **j == sender);
        // The bot's own jid carries a device suffix (`:12`) that group
        // metadata never includes, so compare bare numbers.
        let is_bot_admin = admins.iter().any(|j| j.bare() == self_jid.bare());

        // Step 9: registry lookup; unknown commands are silently ignored.
        let Some(descriptor) = self.registry.find_match(&invocation.command) else {
            return Ok(());
        };

        if descriptor.restricted_to_owner && !is_owner {
            debug!(command = %descriptor.match_key, sender = %sender, "owner-only command ignored");
            return Ok(());
        }

        // Step 10: best-effort acknowledgement reaction.
        if let Some(emoji) = &descriptor.reaction_emoji {
            if let Err(e) = self.client.react(&event.key.chat, &event.key, emoji).await {
                warn!(command = %descriptor.match_key, "acknowledgement reaction failed: {e}");
            }
        }

        debug!(command = %descriptor.match_key, chat = %event.key.chat, "dispatching command");

        let ctx = CommandContext {
            client: Arc::clone(&self.client),
            registry: Arc::clone(&self.registry),
            prefix: self.config.prefix.clone(),
            chat: event.key.chat.clone(),
            key: event.key,
            sender,
            sender_number,
            push_name: event.push_name.unwrap_or_else(|| "User".to_string()),
            is_group,
            command: invocation.command,
            args: invocation.args,
            query: invocation.query,
            body,
            is_me,
            is_owner,
            is_admin,
            is_bot_admin,
            group,
        };

        // Step 11: handler invocation; errors surface to the boundary.
        descriptor
            .handler
            .run(&ctx)
            .await
            .with_context(|| format!("command '{}' failed", descriptor.match_key))
    }
}
