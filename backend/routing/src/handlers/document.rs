//! Document Helper profile: attachment listing and the supported-formats card.

use anyhow::Result;
use async_trait::async_trait;
use media::{classify_all, format_file_size};
use switchyard_core::{DisplayItem, IncomingMessage, ResponseEnvelope};
use tracing::debug;

use super::{TurnContext, TurnHandler};
use crate::composer::Reply;

fn describe(item: &DisplayItem) -> String {
    match item {
        DisplayItem::Image { name, .. } => format!("- {name} (image)"),
        DisplayItem::Document { name, .. } => format!("- {name} (PDF document)"),
        DisplayItem::InlineText { name, content } => {
            format!("- {name} (text, {} characters)", content.chars().count())
        }
        DisplayItem::File { name, size_bytes: Some(size), .. } => {
            format!("- {name} (file, {})", format_file_size(*size))
        }
        DisplayItem::File { name, .. } => format!("- {name} (file)"),
        DisplayItem::Custom { component, .. } => format!("- {component}"),
    }
}

/// Default handler. With attachments, lists them and publishes them to the
/// side panel; without, asks for an upload.
pub struct DocumentAnswer;

#[async_trait]
impl TurnHandler for DocumentAnswer {
    async fn handle(&self, ctx: &TurnContext, message: &IncomingMessage) -> Result<Reply> {
        if message.attachments.is_empty() {
            return Ok(Reply::single(ResponseEnvelope::text(format!(
                "Answering as Document Helper:\n\n{}\n\nUpload files for a more detailed analysis.",
                message.content
            ))));
        }

        let items = classify_all(&message.attachments).await;
        debug!(session = %ctx.session_id, count = items.len(), "[Documents] Classified attachments");

        let listing: Vec<String> = items.iter().map(describe).collect();
        let text = format!(
            "Analysed {} uploaded file(s).\n\n{}\n\nQuestion: {}",
            items.len(),
            listing.join("\n"),
            message.content
        );
        Ok(Reply::single(ResponseEnvelope::text(text)).with_side_panel(items))
    }
}

/// `formats` command.
pub struct SupportedFormats;

#[async_trait]
impl TurnHandler for SupportedFormats {
    async fn handle(&self, _ctx: &TurnContext, _message: &IncomingMessage) -> Result<Reply> {
        Ok(Reply::single(ResponseEnvelope::text(
            "📋 **Supported file formats**\n\n\
             - Images (`image/*`): shown in the side panel\n\
             - PDF documents (`application/pdf`): shown in the side panel\n\
             - Text and JSON (`text/*`, `*json*`): content shown inline\n\
             - Anything else: listed as a file reference with its size",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_commands::Intent;
    use switchyard_core::AttachmentRef;

    fn ctx() -> TurnContext {
        TurnContext {
            session_id: "s".into(),
            profile: "Document Helper".into(),
            intent: Intent::FreeText(String::new()),
            turn: 1,
        }
    }

    #[tokio::test]
    async fn no_attachments_asks_for_upload() {
        let reply = DocumentAnswer.handle(&ctx(), &IncomingMessage::text("hi")).await.unwrap();
        assert!(reply.side_panel().is_none());
        assert!(reply.steps()[0].envelope.text.contains("Upload files"));
    }

    #[tokio::test]
    async fn attachments_fill_side_panel_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        tokio::fs::write(&notes, "hello").await.unwrap();

        let msg = IncomingMessage::text("what is this?")
            .with_attachment(AttachmentRef::new("a.png", Some("image/png"), dir.path().join("a.png")))
            .with_attachment(AttachmentRef::new("notes.txt", Some("text/plain"), &notes));
        let reply = DocumentAnswer.handle(&ctx(), &msg).await.unwrap();

        let panel = reply.side_panel().unwrap();
        assert!(matches!(panel[0], DisplayItem::Image { .. }));
        assert_eq!(
            panel[1],
            DisplayItem::InlineText { name: "notes.txt".into(), content: "hello".into() }
        );
        let text = &reply.steps()[0].envelope.text;
        assert!(text.contains("2 uploaded file(s)"));
        assert!(text.contains("- a.png (image)"));
        assert!(text.ends_with("Question: what is this?"));
    }
}
