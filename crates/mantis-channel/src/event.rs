//! Inbound message event model.
//!
//! Mirrors the gateway's JSON wire shape: a [`MessageEvent`] carries the
//! addressing key, the sender's display name, and an optional content
//! payload. Disappearing messages arrive wrapped in an ephemeral
//! envelope that nests the real payload one level deeper.

use serde::{Deserialize, Serialize};

use mantis_types::Jid;

/// Addressing information for one message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageKey {
    /// The chat the message belongs to (direct peer or group).
    pub chat: Jid,
    /// Platform-assigned message id.
    pub id: String,
    /// Whether the bot account itself sent this message.
    #[serde(default)]
    pub from_me: bool,
    /// The sending group member; absent for direct chats.
    #[serde(default)]
    pub participant: Option<Jid>,
}

/// The content payload of a message, tagged by kind.
///
/// Unknown kinds deserialize as [`MessageContent::Unsupported`] and yield
/// an empty body, so new gateway message types never break dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageContent {
    /// Plain conversation text.
    Text { body: String },
    /// Extended text (links, mentions, quoted replies).
    ExtendedText { body: String },
    /// Image with an optional caption.
    Image {
        #[serde(default)]
        caption: Option<String>,
    },
    /// Video with an optional caption.
    Video {
        #[serde(default)]
        caption: Option<String>,
    },
    /// Disappearing-message envelope carrying the real payload.
    Ephemeral { message: Box<MessageContent> },
    /// Anything else (stickers, audio, documents, ...).
    #[serde(other)]
    Unsupported,
}

impl MessageContent {
    /// Unwrap exactly one level of ephemeral envelope, if present.
    pub fn into_unwrapped(self) -> MessageContent {
        match self {
            MessageContent::Ephemeral { message } => *message,
            other => other,
        }
    }

    /// The text body for this content kind.
    ///
    /// Captions count as the body for image and video messages. Ephemeral
    /// envelopes must be unwrapped first; unsupported kinds are empty.
    pub fn body(&self) -> &str {
        match self {
            MessageContent::Text { body } | MessageContent::ExtendedText { body } => body,
            MessageContent::Image { caption } | MessageContent::Video { caption } => {
                caption.as_deref().unwrap_or("")
            }
            MessageContent::Ephemeral { .. } | MessageContent::Unsupported => "",
        }
    }
}

/// One inbound chat event as delivered by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageEvent {
    /// Addressing key for the message.
    pub key: MessageKey,
    /// Sender display name, when the platform provides one.
    #[serde(default)]
    pub push_name: Option<String>,
    /// Content payload; absent for bare protocol events.
    #[serde(default)]
    pub content: Option<MessageContent>,
}
