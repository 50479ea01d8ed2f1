use anyhow::Result;
use async_trait::async_trait;
use switchyard_core::{IncomingMessage, ResponseEnvelope};

use super::{TurnContext, TurnHandler};
use crate::composer::Reply;

/// Web Search default handler. No search is performed.
pub struct WebSearchAnswer;

#[async_trait]
impl TurnHandler for WebSearchAnswer {
    async fn handle(&self, _ctx: &TurnContext, message: &IncomingMessage) -> Result<Reply> {
        Ok(Reply::single(ResponseEnvelope::text(format!(
            "Web Search mode.\n\nSearch query: {}\n\n(Real search is not implemented.)",
            message.content
        ))))
    }
}
