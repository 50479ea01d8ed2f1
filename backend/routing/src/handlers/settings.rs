//! Settings editor: shows the current settings and the editable fields.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use switchyard_config::{load_or_default, SettingKey, Settings, SettingsStore};
use switchyard_core::{DisplayItem, IncomingMessage, ResponseEnvelope};

use super::{TurnContext, TurnHandler};
use crate::composer::Reply;

/// Field descriptors for the settings form, with current values filled in.
pub fn editor_widgets(settings: &Settings) -> Value {
    json!([
        {
            "id": SettingKey::AssistantName.id(),
            "type": "text",
            "label": "Assistant Name",
            "initial": settings.assistant_name,
            "description": "Display name of the chatbot",
        },
        {
            "id": SettingKey::Theme.id(),
            "type": "select",
            "label": "Default Theme",
            "items": { "light": "Light", "dark": "Dark" },
            "initial": settings.theme.as_str(),
            "description": "Default theme of the application",
        },
        {
            "id": SettingKey::Layout.id(),
            "type": "select",
            "label": "Layout",
            "items": { "default": "Default", "wide": "Wide" },
            "initial": settings.layout.as_str(),
            "description": "Chat screen layout",
        },
        {
            "id": SettingKey::AllowHtml.id(),
            "type": "switch",
            "label": "Allow HTML",
            "initial": settings.allow_html,
            "description": "Allow HTML display in messages",
        },
        {
            "id": SettingKey::AllowLatex.id(),
            "type": "switch",
            "label": "Allow LaTeX Math",
            "initial": settings.allow_latex,
            "description": "Enable mathematical expression display",
        },
        {
            "id": SettingKey::AllowEditMessage.id(),
            "type": "switch",
            "label": "Allow Message Editing",
            "initial": settings.allow_edit_message,
            "description": "Users can edit their own messages",
        },
        {
            "id": SettingKey::SessionTimeout.id(),
            "type": "slider",
            "label": "Session Timeout (seconds)",
            "initial": settings.session_timeout_secs,
            "min": 300,
            "max": 7200,
            "step": 300,
            "description": "Session retention time when connection is lost",
        },
    ])
}

/// `settings` command, shared by every profile.
pub struct SettingsEditor {
    store: SettingsStore,
}

impl SettingsEditor {
    pub fn new(store: SettingsStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TurnHandler for SettingsEditor {
    async fn handle(&self, _ctx: &TurnContext, _message: &IncomingMessage) -> Result<Reply> {
        let settings = load_or_default(&self.store).await;
        let text = format!(
            "⚙️ **Settings Editor**\n\n\
             Assistant name: {}\nTheme: {}\nLayout: {}\nHTML: {}\nLaTeX: {}\n\
             Message editing: {}\nSession timeout: {} s\n\n\
             Change values in the settings panel. A restart is required to apply them.",
            settings.assistant_name,
            settings.theme.as_str(),
            settings.layout.as_str(),
            settings.allow_html,
            settings.allow_latex,
            settings.allow_edit_message,
            settings.session_timeout_secs,
        );
        Ok(Reply::single(ResponseEnvelope::text(text).with_item(DisplayItem::Custom {
            component: "SettingsEditor".into(),
            props: json!({ "widgets": editor_widgets(&settings) }),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_commands::Intent;

    #[tokio::test]
    async fn missing_file_shows_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let editor = SettingsEditor::new(SettingsStore::new(dir.path().join("config.toml")));
        let ctx = TurnContext {
            session_id: "s".into(),
            profile: "Web Search".into(),
            intent: Intent::ExplicitCommand("settings".into()),
            turn: 1,
        };
        let reply = editor.handle(&ctx, &IncomingMessage::text("")).await.unwrap();
        let env = &reply.steps()[0].envelope;
        assert!(env.text.contains("Session timeout: 3600 s"));
        let DisplayItem::Custom { props, .. } = &env.display_items[0] else {
            panic!("expected settings widget item");
        };
        assert_eq!(props["widgets"][6]["id"], "project_session_timeout");
        assert_eq!(props["widgets"][0]["initial"], "Assistant");
    }
}
