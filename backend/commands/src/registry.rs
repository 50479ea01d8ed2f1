/// Per-profile command catalogs and the built-in catalog data.
use std::collections::HashMap;

use switchyard_core::{Command, SwitchyardError};

use crate::types::TriggerToken;

// ---------------------------------------------------------------------------
// Built-in identifiers
// ---------------------------------------------------------------------------

pub const PROFILE_ASSISTANT: &str = "AI Assistant";
pub const PROFILE_WEB_SEARCH: &str = "Web Search";
pub const PROFILE_DOCUMENT_HELPER: &str = "Document Helper";

pub const CMD_CUSTOM: &str = "custom";
pub const CMD_INFO: &str = "info";
pub const CMD_DEMO: &str = "demo";
pub const CMD_SETTINGS: &str = "settings";
pub const CMD_FORMATS: &str = "formats";

pub const TRIGGER_CUSTOM_PROMPTS: &str = "🎨";
pub const TRIGGER_INFO: &str = "info";
pub const TRIGGER_DEMO: &str = "demo";

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The command ids and trigger tokens one profile understands.
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    profile: String,
    commands: Vec<Command>,
    triggers: Vec<TriggerToken>,
}

impl CommandCatalog {
    /// Build a catalog, rejecting duplicate command ids and duplicate triggers.
    pub fn new(
        profile: impl Into<String>,
        commands: Vec<Command>,
        triggers: Vec<TriggerToken>,
    ) -> Result<Self, SwitchyardError> {
        let profile = profile.into();

        let mut seen_ids: Vec<&str> = Vec::with_capacity(commands.len());
        for cmd in &commands {
            if seen_ids.contains(&cmd.id.as_str()) {
                return Err(SwitchyardError::config(format!(
                    "duplicate command id '{}' in catalog for profile '{}'",
                    cmd.id, profile
                )));
            }
            seen_ids.push(&cmd.id);
        }

        for (i, trigger) in triggers.iter().enumerate() {
            if triggers[..i].iter().any(|t| t.matches(&trigger.literal) || trigger.matches(&t.literal)) {
                return Err(SwitchyardError::config(format!(
                    "duplicate trigger token '{}' for profile '{}'",
                    trigger.literal, profile
                )));
            }
        }

        Ok(Self { profile, commands, triggers })
    }

    /// A catalog with no commands and no triggers.
    pub fn empty(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            ..Default::default()
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Commands in publication order.
    pub fn all(&self) -> &[Command] {
        &self.commands
    }

    pub fn triggers(&self) -> &[TriggerToken] {
        &self.triggers
    }

    pub fn find(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    /// The trigger whose literal `content` exactly equals, if any.
    pub fn match_trigger(&self, content: &str) -> Option<&TriggerToken> {
        self.triggers.iter().find(|t| t.matches(content))
    }
}

// ---------------------------------------------------------------------------
// Catalog set
// ---------------------------------------------------------------------------

/// All catalogs, keyed by profile name. Read-only after startup.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    catalogs: HashMap<String, CommandCatalog>,
}

impl CatalogSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, catalog: CommandCatalog) -> Result<(), SwitchyardError> {
        if self.catalogs.contains_key(catalog.profile()) {
            return Err(SwitchyardError::config(format!(
                "catalog for profile '{}' registered twice",
                catalog.profile()
            )));
        }
        self.catalogs.insert(catalog.profile().to_string(), catalog);
        Ok(())
    }

    /// The catalog for `profile`, or `None` when the profile advertises nothing.
    pub fn get(&self, profile: &str) -> Option<&CommandCatalog> {
        self.catalogs.get(profile)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }
}

fn settings_command() -> Command {
    Command::new(CMD_SETTINGS, "⚙️", "Show the settings editor")
}

/// Build the catalogs for the built-in profiles.
pub fn builtin_catalogs() -> Result<CatalogSet, SwitchyardError> {
    let mut set = CatalogSet::new();

    set.insert(CommandCatalog::new(
        PROFILE_ASSISTANT,
        vec![
            Command::new(CMD_CUSTOM, "🎨", "Open the custom prompt menu"),
            Command::new(CMD_INFO, "ℹ️", "Show information cards"),
            Command::new(CMD_DEMO, "🚀", "Run the full feature demo"),
            settings_command(),
        ],
        vec![
            TriggerToken::new(TRIGGER_CUSTOM_PROMPTS),
            TriggerToken::new(TRIGGER_INFO),
            TriggerToken::new(TRIGGER_DEMO),
        ],
    )?)?;

    set.insert(CommandCatalog::new(PROFILE_WEB_SEARCH, vec![settings_command()], vec![])?)?;

    set.insert(CommandCatalog::new(
        PROFILE_DOCUMENT_HELPER,
        vec![
            Command::new(CMD_FORMATS, "📋", "List supported file formats"),
            settings_command(),
        ],
        vec![],
    )?)?;

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_command_ids() {
        let err = CommandCatalog::new(
            "p",
            vec![Command::new("a", "x", "one"), Command::new("a", "y", "two")],
            vec![],
        )
        .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn rejects_triggers_equal_ignoring_case() {
        let err = CommandCatalog::new(
            "p",
            vec![],
            vec![TriggerToken::new("info"), TriggerToken::new("INFO")],
        );
        assert!(err.is_err());
    }

    #[test]
    fn rejects_catalog_registered_twice() {
        let mut set = CatalogSet::new();
        set.insert(CommandCatalog::empty("p")).unwrap();
        assert!(set.insert(CommandCatalog::empty("p")).is_err());
    }

    #[test]
    fn builtin_assistant_catalog_order() {
        let set = builtin_catalogs().unwrap();
        let ids: Vec<_> = set
            .get(PROFILE_ASSISTANT)
            .unwrap()
            .all()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec![CMD_CUSTOM, CMD_INFO, CMD_DEMO, CMD_SETTINGS]);
    }

    #[test]
    fn web_search_has_no_triggers() {
        let set = builtin_catalogs().unwrap();
        let catalog = set.get(PROFILE_WEB_SEARCH).unwrap();
        assert!(catalog.triggers().is_empty());
        assert!(catalog.match_trigger("info").is_none());
    }
}
