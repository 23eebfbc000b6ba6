//! Per-message dispatch context.
//!
//! One [`CommandContext`] is built fresh for each dispatched message and
//! handed to exactly one handler invocation; it is never shared across
//! concurrent dispatches.

use std::sync::Arc;

use mantis_channel::{ChannelError, GroupMetadata, MessageKey, MessagingClient};
use mantis_types::Jid;

use crate::registry::CommandRegistry;

/// Everything a command handler can know about the message it is
/// handling, plus helpers to respond.
pub struct CommandContext {
    /// Messaging backend for replies and reactions.
    pub client: Arc<dyn MessagingClient>,
    /// The registry the command was resolved from (for listing surfaces).
    pub registry: Arc<CommandRegistry>,
    /// Configured command prefix (for rendering usage hints).
    pub prefix: String,
    /// Addressing key of the originating message.
    pub key: MessageKey,
    /// The chat the message arrived in.
    pub chat: Jid,
    /// Resolved sender (bot's own jid for self-sent messages).
    pub sender: Jid,
    /// Sender's bare phone number.
    pub sender_number: String,
    /// Sender display name, defaulting to `"User"`.
    pub push_name: String,
    /// Whether the chat is a group.
    pub is_group: bool,
    /// Parsed, lowercased command name.
    pub command: String,
    /// Parsed argument tokens.
    pub args: Vec<String>,
    /// Arguments joined with single spaces.
    pub query: String,
    /// The raw message body.
    pub body: String,
    /// Whether the sender is the bot account itself.
    pub is_me: bool,
    /// Whether the sender is a configured owner (or the bot itself).
    pub is_owner: bool,
    /// Whether the sender is an admin of the group (false outside groups).
    pub is_admin: bool,
    /// Whether the bot is an admin of the group (false outside groups).
    pub is_bot_admin: bool,
    /// Group metadata; empty for direct chats or when the fetch failed.
    pub group: GroupMetadata,
}

impl CommandContext {
    /// Reply in the originating chat, quoting the triggering message.
    pub async fn reply(&self, text: &str) -> Result<(), ChannelError> {
        self.client.send_text(&self.chat, text, Some(&self.key)).await
    }

    /// React to the triggering message with an emoji.
    pub async fn react(&self, emoji: &str) -> Result<(), ChannelError> {
        self.client.react(&self.chat, &self.key, emoji).await
    }
}
