/// Built-in action handlers.
///
/// Each handler is a concrete struct implementing `ActionHandler`. Responses
/// are templated; no real summarisation or generation happens here.
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use switchyard_core::{Action, DisplayItem, ResponseEnvelope};
use tracing::debug;

use crate::dispatch::{ActionContext, ActionHandler};

pub const ACTION_SUMMARY: &str = "action_summary";
pub const ACTION_DETAIL: &str = "action_detail";
pub const ACTION_CUSTOM: &str = "action_custom";

// ---------------------------------------------------------------------------
// Shared building blocks
// ---------------------------------------------------------------------------

pub fn summary_action() -> Action {
    Action::new(ACTION_SUMMARY, "📝 Create a summary", json!("summary"))
}

pub fn detail_action() -> Action {
    Action::new(ACTION_DETAIL, "🔍 Explain in detail", json!("detail"))
}

pub fn custom_action() -> Action {
    Action::new(ACTION_CUSTOM, "🎨 Custom prompts", json!("custom"))
}

/// The prompt cards shown by the custom prompt menu.
pub fn custom_prompts() -> Value {
    json!([
        {
            "title": "Summarise",
            "prompt": "Summarise the following content concisely.",
            "icon": "📝"
        },
        {
            "title": "Technical explanation",
            "prompt": "Explain the technical content in plain terms.",
            "icon": "🔧"
        },
        {
            "title": "Idea generation",
            "prompt": "Suggest three creative ideas.",
            "icon": "💡"
        }
    ])
}

/// The prompt menu envelope, shared by the `🎨` trigger, the `custom`
/// command, and the `action_custom` callback.
pub fn custom_prompts_envelope() -> ResponseEnvelope {
    ResponseEnvelope::text("Choose a custom prompt:").with_item(DisplayItem::Custom {
        component: "CustomPrompts".into(),
        props: json!({ "data": custom_prompts() }),
    })
}

// ---------------------------------------------------------------------------
// action_summary
// ---------------------------------------------------------------------------

pub struct SummaryHandler;

#[async_trait]
impl ActionHandler for SummaryHandler {
    async fn handle(&self, ctx: &ActionContext, payload: &Value) -> Result<ResponseEnvelope> {
        debug!("[Actions] Summary requested in {} with payload {}", ctx.session_id, payload);
        Ok(ResponseEnvelope::text("📝 Creating a summary...")
            .with_action(detail_action())
            .with_action(custom_action()))
    }
}

// ---------------------------------------------------------------------------
// action_detail
// ---------------------------------------------------------------------------

pub struct DetailHandler;

#[async_trait]
impl ActionHandler for DetailHandler {
    async fn handle(&self, ctx: &ActionContext, payload: &Value) -> Result<ResponseEnvelope> {
        debug!("[Actions] Detail requested in {} with payload {}", ctx.session_id, payload);
        Ok(ResponseEnvelope::text("🔍 Explaining in detail...").with_action(summary_action()))
    }
}

// ---------------------------------------------------------------------------
// action_custom
// ---------------------------------------------------------------------------

pub struct CustomPromptsHandler;

#[async_trait]
impl ActionHandler for CustomPromptsHandler {
    async fn handle(&self, _ctx: &ActionContext, _payload: &Value) -> Result<ResponseEnvelope> {
        Ok(custom_prompts_envelope())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ActionContext {
        ActionContext { session_id: "s".into(), profile: Some("AI Assistant".into()) }
    }

    #[tokio::test]
    async fn summary_chains_new_actions() {
        let env = SummaryHandler.handle(&ctx(), &json!("summary")).await.unwrap();
        assert!(!env.actions.is_empty());
        assert!(env.actions.iter().all(|a| a.id != ACTION_SUMMARY));
    }

    #[tokio::test]
    async fn detail_chains_back_to_summary() {
        let env = DetailHandler.handle(&ctx(), &Value::Null).await.unwrap();
        assert_eq!(env.action_ids(), vec![ACTION_SUMMARY]);
    }

    #[tokio::test]
    async fn custom_shows_three_prompt_cards() {
        let env = CustomPromptsHandler.handle(&ctx(), &Value::Null).await.unwrap();
        match &env.display_items[..] {
            [DisplayItem::Custom { component, props }] => {
                assert_eq!(component, "CustomPrompts");
                assert_eq!(props["data"].as_array().unwrap().len(), 3);
            }
            other => panic!("unexpected items: {other:?}"),
        }
    }
}
