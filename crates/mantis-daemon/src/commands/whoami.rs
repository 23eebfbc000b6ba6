use anyhow::Result;
use async_trait::async_trait;

use mantis_commands::{CommandContext, CommandHandler};

/// Show the sender what the bot knows about them.
pub struct Whoami;

#[async_trait]
impl CommandHandler for Whoami {
    async fn run(&self, ctx: &CommandContext) -> Result<()> {
        let mut lines = vec![
            format!("Name: {}", ctx.push_name),
            format!("Number: {}", ctx.sender_number),
        ];
        if ctx.is_group {
            lines.push(format!("Group: {}", ctx.group.subject));
            lines.push(format!(
                "Group admin: {}",
                if ctx.is_admin { "yes" } else { "no" }
            ));
        }
        if ctx.is_owner {
            lines.push("Owner: yes".to_string());
        }
        ctx.reply(&lines.join("\n")).await?;
        Ok(())
    }
}
