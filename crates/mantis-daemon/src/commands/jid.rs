use anyhow::Result;
use async_trait::async_trait;

use mantis_commands::{CommandContext, CommandHandler};

/// Owner-only: show the raw jid of the current chat. Hidden from the
/// menu; useful when wiring owner numbers and group configs.
pub struct JidCommand;

#[async_trait]
impl CommandHandler for JidCommand {
    async fn run(&self, ctx: &CommandContext) -> Result<()> {
        ctx.reply(ctx.chat.as_str()).await?;
        Ok(())
    }
}
