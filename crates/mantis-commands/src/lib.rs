//! Command registry and message dispatch for the Mantis bot.
//!
//! Provides:
//! - [`CommandSpec`] / [`CommandDescriptor`] -- the registered definition
//!   of one command (match key, aliases, metadata, handler)
//! - [`CommandRegistry`] -- an ordered, first-match-wins registry
//! - [`CommandContext`] -- the per-message bundle of derived facts passed
//!   to a handler
//! - [`Dispatcher`] -- the per-event pipeline: text extraction, prefix
//!   parsing, sender and group resolution, lookup, handler invocation,
//!   all inside a failure boundary

pub mod context;
pub mod descriptor;
pub mod dispatch;
pub mod registry;

pub use context::CommandContext;
pub use descriptor::{CommandDescriptor, CommandHandler, CommandSpec, DEFAULT_CATEGORY};
pub use dispatch::{parse_invocation, Dispatcher, Invocation};
pub use registry::CommandRegistry;
