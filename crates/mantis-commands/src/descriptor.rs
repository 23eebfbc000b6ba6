//! Command descriptors: the registered definition of one command.
//!
//! Plugins hand a partial [`CommandSpec`] to the registry; registration
//! applies defaults and stores a completed [`CommandDescriptor`]. The
//! handler is a trait object so descriptors of different commands live in
//! one ordered sequence.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::context::CommandContext;

/// Category assigned when a spec does not name one.
pub const DEFAULT_CATEGORY: &str = "misc";

/// A command implementation.
///
/// Handlers produce their effects through the context (reply, react) and
/// report failures as errors; the dispatcher's failure boundary logs and
/// swallows them.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn run(&self, ctx: &CommandContext) -> Result<()>;
}

/// Partial descriptor handed to [`CommandRegistry::register`].
///
/// Only the match key and handler are required; everything else defaults
/// per the completed descriptor's documentation.
///
/// [`CommandRegistry::register`]: crate::registry::CommandRegistry::register
pub struct CommandSpec {
    /// Primary invocation name. Matched against the lowercased parsed
    /// command name, so it should be lowercase itself.
    pub match_key: String,
    /// Alternate invocation names.
    pub aliases: Vec<String>,
    /// Category label; `None` defaults to [`DEFAULT_CATEGORY`].
    pub category: Option<String>,
    /// Human-readable description; `None` defaults to empty.
    pub description: Option<String>,
    /// Restrict invocation to configured owners (and the bot itself).
    pub restricted_to_owner: bool,
    /// Emoji sent as a best-effort acknowledgement before the handler runs.
    pub reaction_emoji: Option<String>,
    /// Register for lookup but omit from the listing surface.
    pub exclude_from_listing: bool,
    /// The command implementation.
    pub handler: Arc<dyn CommandHandler>,
}

impl CommandSpec {
    /// Create a spec with the given match key and handler; all other
    /// fields take their defaults.
    pub fn new(match_key: impl Into<String>, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            match_key: match_key.into(),
            aliases: Vec::new(),
            category: None,
            description: None,
            restricted_to_owner: false,
            reaction_emoji: None,
            exclude_from_listing: false,
            handler,
        }
    }

    /// Add an alternate invocation name.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the category label.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict to configured owners.
    pub fn owner_only(mut self) -> Self {
        self.restricted_to_owner = true;
        self
    }

    /// Set the acknowledgement reaction emoji.
    pub fn react_with(mut self, emoji: impl Into<String>) -> Self {
        self.reaction_emoji = Some(emoji.into());
        self
    }

    /// Keep the command invocable but hide it from listings.
    pub fn hidden(mut self) -> Self {
        self.exclude_from_listing = true;
        self
    }
}

/// A completed command descriptor as stored in the registry.
#[derive(Clone)]
pub struct CommandDescriptor {
    pub match_key: String,
    pub aliases: Vec<String>,
    pub category: String,
    pub description: String,
    pub restricted_to_owner: bool,
    pub reaction_emoji: Option<String>,
    pub exclude_from_listing: bool,
    pub handler: Arc<dyn CommandHandler>,
}

impl CommandDescriptor {
    /// Complete a spec by applying defaults.
    pub(crate) fn from_spec(spec: CommandSpec) -> Self {
        Self {
            match_key: spec.match_key,
            aliases: spec.aliases,
            category: spec.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            description: spec.description.unwrap_or_default(),
            restricted_to_owner: spec.restricted_to_owner,
            reaction_emoji: spec.reaction_emoji,
            exclude_from_listing: spec.exclude_from_listing,
            handler: spec.handler,
        }
    }

    /// Whether the given (lowercased) name invokes this command.
    pub fn matches(&self, name: &str) -> bool {
        self.match_key == name || self.aliases.iter().any(|a| a == name)
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("match_key", &self.match_key)
            .field("aliases", &self.aliases)
            .field("category", &self.category)
            .field("description", &self.description)
            .field("restricted_to_owner", &self.restricted_to_owner)
            .field("reaction_emoji", &self.reaction_emoji)
            .field("exclude_from_listing", &self.exclude_from_listing)
            .finish_non_exhaustive()
    }
}
