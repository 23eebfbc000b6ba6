//! Shared types for the Mantis WhatsApp bot: configuration, errors, and
//! strongly-typed identifiers.

pub mod config;
pub mod error;
pub mod ids;

pub use config::{BotConfig, GatewayConfig};
pub use error::MantisError;
pub use ids::Jid;
