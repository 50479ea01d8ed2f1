//! Per-profile handler tables.
//!
//! Each profile gets one [`ProfileHandlers`] table mapping command ids and
//! trigger literals to a [`TurnHandler`], plus a mandatory default handler for
//! free text. Tables are built once at startup and never change.
//!
//! A table marked with [`ProfileHandlersBuilder::accepts_attachments`] has
//! every turn's attachments classified into the side panel, whichever handler
//! answers the turn.

pub mod assistant;
pub mod document;
pub mod settings;
pub mod web_search;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use switchyard_commands::registry::{
    CMD_CUSTOM, CMD_DEMO, CMD_FORMATS, CMD_INFO, CMD_SETTINGS, PROFILE_ASSISTANT,
    PROFILE_DOCUMENT_HELPER, PROFILE_WEB_SEARCH, TRIGGER_CUSTOM_PROMPTS, TRIGGER_DEMO, TRIGGER_INFO,
};
use switchyard_commands::Intent;
use switchyard_config::SettingsStore;
use switchyard_core::{IncomingMessage, SessionId, SwitchyardError};

use crate::composer::Reply;

pub use assistant::{AssistantAnswer, FullDemo, InfoCards, PromptMenu};
pub use document::{DocumentAnswer, SupportedFormats};
pub use settings::SettingsEditor;
pub use web_search::WebSearchAnswer;

/// What a handler knows about the turn it is serving.
#[derive(Debug, Clone)]
pub struct TurnContext {
    pub session_id: SessionId,
    pub profile: String,
    pub intent: Intent,
    /// 1-based turn number within the session.
    pub turn: u64,
}

#[async_trait]
pub trait TurnHandler: Send + Sync {
    async fn handle(&self, ctx: &TurnContext, message: &IncomingMessage) -> Result<Reply>;
}

/// Handler table for one profile.
pub struct ProfileHandlers {
    profile: String,
    commands: HashMap<String, Arc<dyn TurnHandler>>,
    triggers: HashMap<String, Arc<dyn TurnHandler>>,
    default: Arc<dyn TurnHandler>,
    attachments: bool,
}

impl ProfileHandlers {
    pub fn builder(profile: impl Into<String>) -> ProfileHandlersBuilder {
        ProfileHandlersBuilder {
            profile: profile.into(),
            commands: Vec::new(),
            triggers: Vec::new(),
            default: None,
            attachments: false,
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// The handler serving `intent`. Commands and triggers without an entry
    /// fall back to the default handler.
    pub fn handler_for(&self, intent: &Intent) -> &Arc<dyn TurnHandler> {
        let routed = match intent {
            Intent::ExplicitCommand(id) => self.commands.get(id),
            Intent::TriggerToken(literal) => self.triggers.get(literal),
            Intent::FreeText(_) => None,
        };
        routed.unwrap_or(&self.default)
    }

    pub fn accepts_attachments(&self) -> bool {
        self.attachments
    }

    pub fn command_ids(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn trigger_literals(&self) -> impl Iterator<Item = &str> {
        self.triggers.keys().map(String::as_str)
    }
}

pub struct ProfileHandlersBuilder {
    profile: String,
    commands: Vec<(String, Arc<dyn TurnHandler>)>,
    triggers: Vec<(String, Arc<dyn TurnHandler>)>,
    default: Option<Arc<dyn TurnHandler>>,
    attachments: bool,
}

impl ProfileHandlersBuilder {
    pub fn command(mut self, id: impl Into<String>, handler: Arc<dyn TurnHandler>) -> Self {
        self.commands.push((id.into(), handler));
        self
    }

    pub fn trigger(mut self, literal: impl Into<String>, handler: Arc<dyn TurnHandler>) -> Self {
        self.triggers.push((literal.into(), handler));
        self
    }

    pub fn default_handler(mut self, handler: Arc<dyn TurnHandler>) -> Self {
        self.default = Some(handler);
        self
    }

    pub fn accepts_attachments(mut self) -> Self {
        self.attachments = true;
        self
    }

    /// Freeze the table. A duplicate key or a missing default handler is a
    /// configuration error.
    pub fn build(self) -> Result<ProfileHandlers, SwitchyardError> {
        let profile = self.profile;
        let commands = into_unique_map(&profile, "command", self.commands)?;
        let triggers = into_unique_map(&profile, "trigger", self.triggers)?;
        let default = self.default.ok_or_else(|| {
            SwitchyardError::config(format!("profile '{profile}' has no default handler"))
        })?;
        Ok(ProfileHandlers { profile, commands, triggers, default, attachments: self.attachments })
    }
}

fn into_unique_map(
    profile: &str,
    kind: &str,
    entries: Vec<(String, Arc<dyn TurnHandler>)>,
) -> Result<HashMap<String, Arc<dyn TurnHandler>>, SwitchyardError> {
    let mut map = HashMap::with_capacity(entries.len());
    for (key, handler) in entries {
        if map.insert(key.clone(), handler).is_some() {
            return Err(SwitchyardError::config(format!(
                "duplicate {kind} handler '{key}' in profile '{profile}'"
            )));
        }
    }
    Ok(map)
}

/// Handler tables for the three built-in profiles.
pub fn builtin_handler_tables(store: SettingsStore) -> Result<Vec<ProfileHandlers>, SwitchyardError> {
    let settings: Arc<dyn TurnHandler> = Arc::new(SettingsEditor::new(store));
    let prompt_menu: Arc<dyn TurnHandler> = Arc::new(PromptMenu);
    let info_cards: Arc<dyn TurnHandler> = Arc::new(InfoCards);
    let demo: Arc<dyn TurnHandler> = Arc::new(FullDemo);

    let assistant = ProfileHandlers::builder(PROFILE_ASSISTANT)
        .command(CMD_CUSTOM, prompt_menu.clone())
        .command(CMD_INFO, info_cards.clone())
        .command(CMD_DEMO, demo.clone())
        .command(CMD_SETTINGS, settings.clone())
        .trigger(TRIGGER_CUSTOM_PROMPTS, prompt_menu)
        .trigger(TRIGGER_INFO, info_cards)
        .trigger(TRIGGER_DEMO, demo)
        .default_handler(Arc::new(AssistantAnswer))
        .build()?;

    let web_search = ProfileHandlers::builder(PROFILE_WEB_SEARCH)
        .command(CMD_SETTINGS, settings.clone())
        .default_handler(Arc::new(WebSearchAnswer))
        .build()?;

    let document_helper = ProfileHandlers::builder(PROFILE_DOCUMENT_HELPER)
        .command(CMD_FORMATS, Arc::new(SupportedFormats))
        .command(CMD_SETTINGS, settings)
        .default_handler(Arc::new(DocumentAnswer))
        .accepts_attachments()
        .build()?;

    Ok(vec![assistant, web_search, document_helper])
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_core::ResponseEnvelope;

    struct Fixed(&'static str);

    #[async_trait]
    impl TurnHandler for Fixed {
        async fn handle(&self, _ctx: &TurnContext, _message: &IncomingMessage) -> Result<Reply> {
            Ok(Reply::single(ResponseEnvelope::text(self.0)))
        }
    }

    fn ctx(intent: Intent) -> TurnContext {
        TurnContext {
            session_id: "s".into(),
            profile: "p".into(),
            intent,
            turn: 1,
        }
    }

    #[test]
    fn missing_default_is_rejected() {
        let err = ProfileHandlers::builder("p")
            .command("x", Arc::new(Fixed("x")))
            .build()
            .err()
            .unwrap();
        assert!(err.is_fatal());
    }

    #[test]
    fn duplicate_command_is_rejected() {
        let result = ProfileHandlers::builder("p")
            .command("x", Arc::new(Fixed("1")))
            .command("x", Arc::new(Fixed("2")))
            .default_handler(Arc::new(Fixed("d")))
            .build();
        assert!(matches!(result, Err(SwitchyardError::Configuration(_))));
    }

    #[test]
    fn same_key_as_command_and_trigger_is_allowed() {
        let table = ProfileHandlers::builder("p")
            .command("info", Arc::new(Fixed("c")))
            .trigger("info", Arc::new(Fixed("t")))
            .default_handler(Arc::new(Fixed("d")))
            .build();
        assert!(table.is_ok());
    }

    #[tokio::test]
    async fn unrouted_intents_fall_back_to_default() {
        let table = ProfileHandlers::builder("p")
            .command("x", Arc::new(Fixed("cmd")))
            .trigger("!", Arc::new(Fixed("trig")))
            .default_handler(Arc::new(Fixed("default")))
            .build()
            .unwrap();
        let msg = IncomingMessage::text("hi");

        let cases = [
            (Intent::ExplicitCommand("x".into()), "cmd"),
            (Intent::ExplicitCommand("y".into()), "default"),
            (Intent::TriggerToken("!".into()), "trig"),
            (Intent::TriggerToken("?".into()), "default"),
            (Intent::FreeText("hi".into()), "default"),
        ];
        for (intent, expected) in cases {
            let c = ctx(intent);
            let reply = table.handler_for(&c.intent).handle(&c, &msg).await.unwrap();
            assert_eq!(reply.steps()[0].envelope.text, expected);
        }
    }

    #[test]
    fn builtin_tables_build() {
        let tables = builtin_handler_tables(SettingsStore::new("unused.toml")).unwrap();
        let names: Vec<_> = tables.iter().map(|t| t.profile()).collect();
        assert_eq!(names, vec![PROFILE_ASSISTANT, PROFILE_WEB_SEARCH, PROFILE_DOCUMENT_HELPER]);
        let with_attachments: Vec<_> =
            tables.iter().filter(|t| t.accepts_attachments()).map(|t| t.profile()).collect();
        assert_eq!(with_attachments, vec![PROFILE_DOCUMENT_HELPER]);
    }
}
