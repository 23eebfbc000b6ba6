use anyhow::Result;
use async_trait::async_trait;

use mantis_commands::{CommandContext, CommandHandler};

/// Liveness check.
pub struct Ping;

#[async_trait]
impl CommandHandler for Ping {
    async fn run(&self, ctx: &CommandContext) -> Result<()> {
        ctx.reply("*Pong!*").await?;
        Ok(())
    }
}
