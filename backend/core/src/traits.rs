use anyhow::Result;
use async_trait::async_trait;

use crate::types::{Command, DisplayItem, Profile, ResponseEnvelope, SessionId};

/// The chat-session transport that renders router output to the end user.
///
/// Every call is fire-and-forget from the router's point of view: failures are
/// logged by the caller and never abort a turn.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Publish the ordered profile list once at startup.
    async fn publish_profiles(&self, profiles: &[Profile]) -> Result<()>;

    /// Advertise the commands of the profile that just became active.
    async fn set_commands(&self, session: &SessionId, commands: &[Command]) -> Result<()>;

    /// Deliver one envelope.
    async fn send(&self, session: &SessionId, envelope: &ResponseEnvelope) -> Result<()>;

    /// Replace the contents of the session's side panel.
    async fn set_side_panel(&self, session: &SessionId, items: &[DisplayItem]) -> Result<()>;
}
