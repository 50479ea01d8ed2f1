/// Intent detection: explicit command, trigger token, or free text.
use switchyard_core::IncomingMessage;
use tracing::debug;

use crate::registry::CommandCatalog;
use crate::types::Intent;

/// Classifies a message against the active profile's catalog.
///
/// Priority is fixed: a known command beats a trigger token, and a trigger
/// token beats free text. An unknown command is not an error; resolution
/// simply continues with the content.
pub struct CommandResolver;

impl CommandResolver {
    pub fn resolve(message: &IncomingMessage, catalog: &CommandCatalog) -> Intent {
        if let Some(id) = message.command.as_deref() {
            if catalog.find(id).is_some() {
                return Intent::ExplicitCommand(id.to_string());
            }
            debug!(
                "[Commands] Unknown command '{}' for profile '{}'; falling through",
                id,
                catalog.profile()
            );
        }

        if let Some(trigger) = catalog.match_trigger(&message.content) {
            return Intent::TriggerToken(trigger.literal.clone());
        }

        Intent::FreeText(message.content.clone())
    }
}

/// Shorthand for [`CommandResolver::resolve`].
pub fn resolve_intent(message: &IncomingMessage, catalog: &CommandCatalog) -> Intent {
    CommandResolver::resolve(message, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{builtin_catalogs, PROFILE_ASSISTANT, PROFILE_WEB_SEARCH};

    fn assistant() -> CommandCatalog {
        builtin_catalogs().unwrap().get(PROFILE_ASSISTANT).unwrap().clone()
    }

    #[test]
    fn command_beats_matching_trigger() {
        let msg = IncomingMessage::text("🎨").with_command("custom");
        assert_eq!(resolve_intent(&msg, &assistant()), Intent::ExplicitCommand("custom".into()));

        let msg = IncomingMessage::text("info").with_command("demo");
        assert_eq!(resolve_intent(&msg, &assistant()), Intent::ExplicitCommand("demo".into()));
    }

    #[test]
    fn trigger_when_no_command() {
        let msg = IncomingMessage::text("info");
        assert_eq!(resolve_intent(&msg, &assistant()), Intent::TriggerToken("info".into()));

        let msg = IncomingMessage::text("Demo");
        assert_eq!(resolve_intent(&msg, &assistant()), Intent::TriggerToken("demo".into()));
    }

    #[test]
    fn unknown_command_falls_through_to_trigger() {
        let msg = IncomingMessage::text("🎨").with_command("nope");
        assert_eq!(resolve_intent(&msg, &assistant()), Intent::TriggerToken("🎨".into()));
    }

    #[test]
    fn unknown_command_falls_through_to_free_text() {
        let msg = IncomingMessage::text("hello").with_command("nope");
        assert_eq!(resolve_intent(&msg, &assistant()), Intent::FreeText("hello".into()));
    }

    #[test]
    fn command_from_other_profile_is_unknown() {
        let set = builtin_catalogs().unwrap();
        let web = set.get(PROFILE_WEB_SEARCH).unwrap();
        let msg = IncomingMessage::text("find rust news").with_command("demo");
        assert_eq!(resolve_intent(&msg, web), Intent::FreeText("find rust news".into()));
    }

    #[test]
    fn near_miss_is_free_text() {
        let msg = IncomingMessage::text("info please");
        assert_eq!(resolve_intent(&msg, &assistant()), Intent::FreeText("info please".into()));
    }
}
