pub mod detection;
pub mod dispatch;
pub mod handlers;
pub mod registry;
pub mod types;

use std::sync::Arc;

use switchyard_core::SwitchyardError;

pub use detection::{resolve_intent, CommandResolver};
pub use dispatch::{ActionContext, ActionDispatcher, ActionHandler};
pub use handlers::{
    custom_prompts_envelope, CustomPromptsHandler, DetailHandler, SummaryHandler, ACTION_CUSTOM,
    ACTION_DETAIL, ACTION_SUMMARY,
};
pub use registry::{builtin_catalogs, CatalogSet, CommandCatalog};
pub use types::{Intent, TokenMatch, TriggerToken};

/// Build a dispatcher pre-wired with all built-in action handlers.
pub fn build_default_dispatcher() -> Result<ActionDispatcher, SwitchyardError> {
    let mut dispatcher = ActionDispatcher::new();
    dispatcher.register(ACTION_SUMMARY, Arc::new(SummaryHandler))?;
    dispatcher.register(ACTION_DETAIL, Arc::new(DetailHandler))?;
    dispatcher.register(ACTION_CUSTOM, Arc::new(CustomPromptsHandler))?;
    Ok(dispatcher)
}
