//! Client traits and shared types for talking to the messaging backend.
//!
//! [`MessagingClient`] is the surface command handlers and the dispatcher
//! use; [`EventSource`] is the inbound feed the event loop drains. Both
//! are implemented by [`WhatsappGateway`](crate::gateway::WhatsappGateway)
//! and by in-memory doubles in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mantis_types::Jid;

use crate::event::{MessageEvent, MessageKey};

/// Errors from messaging operations.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway returned error: {0}")]
    Api(String),

    #[error("channel shut down")]
    Shutdown,

    #[error("{0}")]
    Other(String),
}

/// One member of a group chat, as reported by group metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupParticipant {
    /// The member's jid.
    pub jid: Jid,
    /// Admin role (`"admin"` or `"superadmin"`), absent for plain members.
    #[serde(default)]
    pub admin: Option<String>,
}

/// Metadata for a group chat.
///
/// The dispatcher degrades to [`GroupMetadata::default`] (empty) when the
/// fetch fails, so absence of participants must be a valid state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupMetadata {
    /// Group subject line.
    #[serde(default)]
    pub subject: String,
    /// All current members.
    #[serde(default)]
    pub participants: Vec<GroupParticipant>,
}

impl GroupMetadata {
    /// Jids of all members holding any admin role.
    pub fn admins(&self) -> Vec<&Jid> {
        self.participants
            .iter()
            .filter(|p| p.admin.is_some())
            .map(|p| &p.jid)
            .collect()
    }
}

/// Opaque interface to the messaging backend.
///
/// Everything protocol-shaped is behind this trait; the dispatcher and
/// handlers never see HTTP or wire details.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// The authenticated bot account's own jid.
    fn self_jid(&self) -> &Jid;

    /// Send a text message to a chat, optionally quoting another message.
    async fn send_text(
        &self,
        chat: &Jid,
        text: &str,
        quote: Option<&MessageKey>,
    ) -> Result<(), ChannelError>;

    /// Attach an emoji reaction to a message.
    async fn react(&self, chat: &Jid, key: &MessageKey, emoji: &str) -> Result<(), ChannelError>;

    /// Fetch metadata for a group chat.
    async fn group_metadata(&self, chat: &Jid) -> Result<GroupMetadata, ChannelError>;
}

/// Inbound event feed.
///
/// A call returns the next batch of message events, blocking server-side
/// (long poll) until something arrives or the poll times out with an
/// empty batch. `Err(ChannelError::Shutdown)` ends the feed.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn next_events(&self) -> Result<Vec<MessageEvent>, ChannelError>;
}
