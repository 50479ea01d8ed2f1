use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Opaque identifier of one conversation session, assigned by the transport.
pub type SessionId = String;

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// A named conversational mode with its own commands, triggers, and default handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Markdown/HTML shown on the landing page when the profile is picked.
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub starters: Vec<StarterPrompt>,
}

impl Profile {
    pub fn new(name: impl Into<String>, description: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            is_default: false,
            starters: Vec::new(),
        }
    }

    pub fn default_profile(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn with_starter(mut self, starter: StarterPrompt) -> Self {
        self.starters.push(starter);
        self
    }
}

/// A canned opening message offered on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterPrompt {
    pub label: String,
    pub message: String,
    pub icon: Option<String>,
}

impl StarterPrompt {
    pub fn new(label: impl Into<String>, message: impl Into<String>, icon: Option<&str>) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
            icon: icon.map(str::to_string),
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// An explicit command advertised to the transport (rendered as a button or menu entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: String,
    pub icon: String,
    pub description: String,
}

impl Command {
    pub fn new(id: impl Into<String>, icon: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            icon: icon.into(),
            description: description.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// A user message as handed over by the transport for one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub content: String,
    /// Command id selected alongside the message, if any.
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
}

impl IncomingMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_command(mut self, id: impl Into<String>) -> Self {
        self.command = Some(id.into());
        self
    }

    pub fn with_attachment(mut self, attachment: AttachmentRef) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// A file uploaded with a message. Classified by MIME type, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub name: String,
    pub mime_type: Option<String>,
    pub content_path: PathBuf,
}

impl AttachmentRef {
    pub fn new(name: impl Into<String>, mime_type: Option<&str>, content_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.map(str::to_string),
            content_path: content_path.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// A follow-up the user can invoke. The payload is handed back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Action {
    pub fn new(id: impl Into<String>, label: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            payload,
        }
    }
}

/// Something the transport renders next to or inside a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayItem {
    Image { name: String, path: PathBuf },
    Document { name: String, path: PathBuf },
    InlineText { name: String, content: String },
    File { name: String, path: PathBuf, size_bytes: Option<u64> },
    /// A front-end component fed with JSON props (prompt menu, info cards).
    Custom { component: String, props: serde_json::Value },
}

impl DisplayItem {
    pub fn name(&self) -> &str {
        match self {
            DisplayItem::Image { name, .. }
            | DisplayItem::Document { name, .. }
            | DisplayItem::InlineText { name, .. }
            | DisplayItem::File { name, .. } => name,
            DisplayItem::Custom { component, .. } => component,
        }
    }
}

/// The complete output of one dispatch: text, actions, and items to display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub text: String,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub display_items: Vec<DisplayItem>,
}

impl ResponseEnvelope {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Add an action. An action with the same id replaces the earlier one.
    pub fn with_action(mut self, action: Action) -> Self {
        if let Some(existing) = self.actions.iter_mut().find(|a| a.id == action.id) {
            *existing = action;
        } else {
            self.actions.push(action);
        }
        self
    }

    pub fn with_item(mut self, item: DisplayItem) -> Self {
        self.display_items.push(item);
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = DisplayItem>) -> Self {
        self.display_items.extend(items);
        self
    }

    pub fn action_ids(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.id.as_str()).collect()
    }
}
