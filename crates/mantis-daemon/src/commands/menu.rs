//! The command listing surface.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;

use mantis_commands::{CommandContext, CommandDescriptor, CommandHandler};

/// List all visible commands, grouped by category.
pub struct Menu;

#[async_trait]
impl CommandHandler for Menu {
    async fn run(&self, ctx: &CommandContext) -> Result<()> {
        let visible = ctx.registry.visible();
        ctx.reply(&render_menu(&visible, &ctx.prefix)).await?;
        Ok(())
    }
}

/// Render the listing: categories sorted, commands in registration order
/// within each category.
fn render_menu(commands: &[&CommandDescriptor], prefix: &str) -> String {
    let mut by_category: BTreeMap<&str, Vec<&CommandDescriptor>> = BTreeMap::new();
    for c in commands {
        by_category.entry(c.category.as_str()).or_default().push(c);
    }

    let mut out = String::from("*Mantis commands*\n");
    for (category, entries) in by_category {
        out.push_str(&format!("\n*{category}*\n"));
        for c in entries {
            out.push_str(&format!("  {prefix}{}", c.match_key));
            if !c.aliases.is_empty() {
                out.push_str(&format!(" ({})", c.aliases.join(", ")));
            }
            if !c.description.is_empty() {
                out.push_str(&format!(" -- {}", c.description));
            }
            out.push('\n');
        }
    }
    out
}
