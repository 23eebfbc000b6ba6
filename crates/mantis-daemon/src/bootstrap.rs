//! Static registration of the built-in command set.
//!
//! Plugins are statically compiled modules under [`crate::commands`];
//! [`install`] registers them all in one bootstrap call. Registration
//! order is significant -- dispatch resolves first-match -- so built-ins
//! register before any host extensions.

use std::sync::Arc;

use mantis_commands::{CommandRegistry, CommandSpec};

use crate::commands::{Echo, JidCommand, Menu, Ping, Whoami};

/// Register all built-in commands.
pub fn install(registry: &mut CommandRegistry) {
    // Decorated after registration: the descriptor is live in the
    // registry, the reaction emoji is attached to the stored entry.
    registry
        .register(
            CommandSpec::new("ping", Arc::new(Ping))
                .category("core")
                .describe("Check that the bot is alive"),
        )
        .reaction_emoji = Some("\u{26A1}".to_string());

    registry.register(
        CommandSpec::new("echo", Arc::new(Echo))
            .alias("say")
            .category("core")
            .describe("Repeat the given text"),
    );

    registry.register(
        CommandSpec::new("menu", Arc::new(Menu))
            .alias("help")
            .category("core")
            .describe("List available commands"),
    );

    registry.register(CommandSpec::new("whoami", Arc::new(Whoami)).describe("Show who you are"));

    registry.register(CommandSpec::new("jid", Arc::new(JidCommand)).owner_only().hidden());
}
