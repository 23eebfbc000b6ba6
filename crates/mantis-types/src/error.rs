//! Error types shared across all Mantis crates.

/// Errors from loading or parsing configuration.
///
/// Subsystem-specific failures live with their subsystems: the gateway
/// reports `ChannelError`, application flow uses `anyhow`.
#[derive(Debug, thiserror::Error)]
pub enum MantisError {
    #[error("configuration error: {0}")]
    ConfigError(String),
}
