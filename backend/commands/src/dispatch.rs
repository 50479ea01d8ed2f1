/// Action dispatch: route an invoked action id to its handler.
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use switchyard_core::{ResponseEnvelope, SessionId, SwitchyardError};
use tracing::info;

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// Context passed to every action handler.
#[derive(Debug, Clone)]
pub struct ActionContext {
    pub session_id: SessionId,
    /// Profile active when the action was invoked, if one was selected.
    pub profile: Option<String>,
}

#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Handle one invocation. The payload is opaque and handed over verbatim.
    async fn handle(&self, ctx: &ActionContext, payload: &Value) -> Result<ResponseEnvelope>;
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Action id → handler table. Filled at startup, read-only afterwards.
pub struct ActionDispatcher {
    handlers: HashMap<String, Arc<dyn ActionHandler>>,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    /// Register the single handler for `id`.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        handler: Arc<dyn ActionHandler>,
    ) -> Result<(), SwitchyardError> {
        let id = id.into();
        if self.handlers.contains_key(&id) {
            return Err(SwitchyardError::config(format!(
                "action '{}' registered twice",
                id
            )));
        }
        self.handlers.insert(id, handler);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    pub fn action_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub async fn invoke(
        &self,
        ctx: &ActionContext,
        id: &str,
        payload: &Value,
    ) -> Result<ResponseEnvelope, SwitchyardError> {
        let Some(handler) = self.handlers.get(id) else {
            return Err(SwitchyardError::not_found("action", id));
        };
        info!("[Actions] Dispatching {} in session {}", id, ctx.session_id);
        handler.handle(ctx, payload).await.map_err(SwitchyardError::from)
    }
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
