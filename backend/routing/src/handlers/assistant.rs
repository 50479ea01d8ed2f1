//! AI Assistant profile: templated answers, prompt menu, info cards, demo.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use switchyard_commands::handlers::{custom_action, detail_action, summary_action};
use switchyard_commands::custom_prompts_envelope;
use switchyard_core::{DisplayItem, IncomingMessage, ResponseEnvelope};
use tracing::debug;

use super::{TurnContext, TurnHandler};
use crate::composer::Reply;

/// Pause between the envelopes of the full demo.
pub const DEMO_STEP_DELAY: Duration = Duration::from_secs(1);

fn answer_envelope(content: &str) -> ResponseEnvelope {
    ResponseEnvelope::text(format!(
        "Answering as AI Assistant:\n\nLet me think about \"{content}\"."
    ))
    .with_action(summary_action())
    .with_action(detail_action())
    .with_action(custom_action())
}

/// Sample cards rendered by the `InfoCards` component.
pub fn info_cards() -> Vec<Value> {
    vec![
        json!({
            "title": "Profiles",
            "descriptions": [
                "Each profile is a separate conversational mode.",
                "Switching profile changes the available commands.",
            ],
            "targetAudience": "All users",
            "published": "2024",
            "source": "Demo",
            "link": "#",
            "tags": ["profiles", "commands"],
            "frequency": "High",
        }),
        json!({
            "title": "Guided actions",
            "descriptions": [
                "Answers come with follow-up buttons.",
                "A follow-up can offer further follow-ups.",
            ],
            "targetAudience": "All users",
            "published": "2024",
            "source": "Demo",
            "link": "#",
            "tags": ["actions"],
            "frequency": "Medium",
        }),
    ]
}

pub fn info_cards_envelope() -> ResponseEnvelope {
    ResponseEnvelope::text("ℹ️ Here is an overview of what this assistant can do:").with_items(
        info_cards().into_iter().map(|props| DisplayItem::Custom {
            component: "InfoCards".into(),
            props,
        }),
    )
}

/// Default handler: echo-style answer with the three standard follow-ups.
pub struct AssistantAnswer;

#[async_trait]
impl TurnHandler for AssistantAnswer {
    async fn handle(&self, _ctx: &TurnContext, message: &IncomingMessage) -> Result<Reply> {
        Ok(Reply::single(answer_envelope(&message.content)))
    }
}

/// `custom` command and `🎨` trigger.
pub struct PromptMenu;

#[async_trait]
impl TurnHandler for PromptMenu {
    async fn handle(&self, _ctx: &TurnContext, _message: &IncomingMessage) -> Result<Reply> {
        Ok(Reply::single(custom_prompts_envelope()))
    }
}

/// `info` command and trigger.
pub struct InfoCards;

#[async_trait]
impl TurnHandler for InfoCards {
    async fn handle(&self, _ctx: &TurnContext, _message: &IncomingMessage) -> Result<Reply> {
        Ok(Reply::single(info_cards_envelope()))
    }
}

/// `demo` command and trigger: four envelopes, one second apart.
pub struct FullDemo;

#[async_trait]
impl TurnHandler for FullDemo {
    async fn handle(&self, ctx: &TurnContext, _message: &IncomingMessage) -> Result<Reply> {
        debug!(session = %ctx.session_id, "[Assistant] Starting full demo");
        Ok(Reply::single(ResponseEnvelope::text("🚀 Starting the full demo..."))
            .then(DEMO_STEP_DELAY, custom_prompts_envelope())
            .then(DEMO_STEP_DELAY, info_cards_envelope())
            .then(
                DEMO_STEP_DELAY,
                ResponseEnvelope::text("✅ Demo complete. Try one of the actions below.")
                    .with_action(summary_action())
                    .with_action(detail_action())
                    .with_action(custom_action()),
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_commands::{Intent, ACTION_CUSTOM, ACTION_DETAIL, ACTION_SUMMARY};

    fn ctx() -> TurnContext {
        TurnContext {
            session_id: "s".into(),
            profile: "AI Assistant".into(),
            intent: Intent::FreeText("hello".into()),
            turn: 1,
        }
    }

    #[tokio::test]
    async fn answer_offers_standard_actions() {
        let reply = AssistantAnswer.handle(&ctx(), &IncomingMessage::text("hello")).await.unwrap();
        let env = &reply.steps()[0].envelope;
        assert!(env.text.contains("hello"));
        assert_eq!(env.action_ids(), vec![ACTION_SUMMARY, ACTION_DETAIL, ACTION_CUSTOM]);
    }

    #[tokio::test]
    async fn demo_has_four_spaced_steps() {
        let reply = FullDemo.handle(&ctx(), &IncomingMessage::text("demo")).await.unwrap();
        let delays: Vec<_> = reply.steps().iter().map(|s| s.delay).collect();
        assert_eq!(
            delays,
            vec![Duration::ZERO, DEMO_STEP_DELAY, DEMO_STEP_DELAY, DEMO_STEP_DELAY]
        );
    }

    #[test]
    fn info_cards_use_the_cards_component() {
        let env = info_cards_envelope();
        assert_eq!(env.display_items.len(), 2);
        assert!(env.display_items.iter().all(|i| i.name() == "InfoCards"));
    }
}
