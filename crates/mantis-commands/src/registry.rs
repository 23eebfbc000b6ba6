//! Ordered command registry.
//!
//! The registry is an ordered sequence, not a map: duplicate match keys
//! are allowed and dispatch resolves to the *first* registration whose
//! key or alias matches. Registration order equals bootstrap order, so a
//! later registration can never shadow an earlier one -- this first-match
//! policy is intentional and documented rather than enforced away.
//!
//! All registrations happen during startup, before the event loop begins;
//! at dispatch time the registry is read-only behind an `Arc`.

use crate::descriptor::{CommandDescriptor, CommandSpec};

/// An ordered registry of command descriptors.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command: apply defaults, append, and return the stored
    /// descriptor so the caller can decorate it further (e.g. attach a
    /// reaction emoji after registration).
    ///
    /// Registration never fails and never checks uniqueness.
    pub fn register(&mut self, spec: CommandSpec) -> &mut CommandDescriptor {
        self.commands.push(CommandDescriptor::from_spec(spec));
        self.commands.last_mut().expect("just pushed")
    }

    /// Find the first descriptor (in registration order) whose match key
    /// or aliases equals `name`. Comparison is exact equality on the
    /// already-lowercased parsed name.
    pub fn find_match(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.matches(name))
    }

    /// Descriptors for the listing surface, in registration order,
    /// omitting those registered with `exclude_from_listing`.
    pub fn visible(&self) -> Vec<&CommandDescriptor> {
        self.commands
            .iter()
            .filter(|c| !c.exclude_from_listing)
            .collect()
    }

    /// Number of registered descriptors (including hidden ones).
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no descriptors are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
