//! Profile-aware message routing.
//!
//! Ties the profile registry, command catalogs, per-profile handler tables and
//! the action dispatcher together behind [`MessageRouter`].

pub mod catalog;
pub mod composer;
pub mod handlers;
pub mod profile;
pub mod router;
pub mod session;

use std::sync::Arc;

use switchyard_commands::{build_default_dispatcher, builtin_catalogs};
use switchyard_config::SettingsStore;
use switchyard_core::{SwitchyardError, Transport};

pub use catalog::builtin_profiles;
pub use composer::{Reply, Step};
pub use handlers::{builtin_handler_tables, ProfileHandlers, TurnContext, TurnHandler};
pub use profile::ProfileRegistry;
pub use router::MessageRouter;
pub use session::{Session, SessionState, SessionTable};

/// Router with the built-in profiles, catalogs, handlers and actions.
pub fn build_default_router(
    transport: Arc<dyn Transport>,
    settings: SettingsStore,
) -> Result<MessageRouter, SwitchyardError> {
    let profiles = ProfileRegistry::register(builtin_profiles())?;
    let catalogs = builtin_catalogs()?;
    let tables = builtin_handler_tables(settings.clone())?;
    let actions = build_default_dispatcher()?;
    MessageRouter::new(profiles, catalogs, tables, actions, settings, transport)
}
