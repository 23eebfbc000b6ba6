use anyhow::Result;
use async_trait::async_trait;

use mantis_commands::{CommandContext, CommandHandler};

/// Repeat the arguments back into the chat.
pub struct Echo;

#[async_trait]
impl CommandHandler for Echo {
    async fn run(&self, ctx: &CommandContext) -> Result<()> {
        if ctx.query.is_empty() {
            ctx.reply(&format!("Usage: {}echo <text>", ctx.prefix)).await?;
        } else {
            ctx.reply(&ctx.query).await?;
        }
        Ok(())
    }
}
