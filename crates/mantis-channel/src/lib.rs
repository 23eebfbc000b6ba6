//! Messaging seam for the Mantis bot.
//!
//! The WhatsApp protocol itself (encryption, multi-device session,
//! framing) lives in an external gateway process. This crate provides:
//! - [`MessagingClient`] -- the opaque client interface the dispatcher
//!   and command handlers talk to
//! - [`EventSource`] -- the inbound event feed the runner drains
//! - the inbound message event model ([`MessageEvent`], [`MessageContent`])
//! - [`WhatsappGateway`] -- the HTTP implementation of both traits

pub mod client;
pub mod event;
pub mod gateway;

pub use client::{
    ChannelError, EventSource, GroupMetadata, GroupParticipant, MessagingClient,
};
pub use event::{MessageContent, MessageEvent, MessageKey};
pub use gateway::WhatsappGateway;
