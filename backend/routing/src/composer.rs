//! Reply values and the fixed envelopes the router emits on its own.

use std::time::Duration;

use switchyard_core::{DisplayItem, ResponseEnvelope, SwitchyardError};

pub const SELECT_PROFILE_TEXT: &str = "Please select a profile.";
pub const ACTION_UNAVAILABLE_TEXT: &str = "This action is no longer available.";
pub const SETTINGS_UPDATED_TEXT: &str =
    "Settings updated! Please restart the application to apply changes.";

/// One envelope and how long to wait before sending it.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub delay: Duration,
    pub envelope: ResponseEnvelope,
}

/// Everything one turn produces, in send order.
///
/// Consumed by value; a reply cannot be replayed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    steps: Vec<Step>,
    side_panel: Option<Vec<DisplayItem>>,
}

impl Reply {
    pub fn single(envelope: ResponseEnvelope) -> Self {
        Self::default().then(Duration::ZERO, envelope)
    }

    /// Append an envelope sent `delay` after the previous one.
    pub fn then(mut self, delay: Duration, envelope: ResponseEnvelope) -> Self {
        self.steps.push(Step { delay, envelope });
        self
    }

    /// Replace the side panel with `items` when this reply is delivered.
    pub fn with_side_panel(mut self, items: Vec<DisplayItem>) -> Self {
        self.side_panel = Some(items);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn side_panel(&self) -> Option<&[DisplayItem]> {
        self.side_panel.as_deref()
    }

    pub fn into_parts(self) -> (Vec<Step>, Option<Vec<DisplayItem>>) {
        (self.steps, self.side_panel)
    }
}

pub fn selection_prompt() -> ResponseEnvelope {
    ResponseEnvelope::text(SELECT_PROFILE_TEXT)
}

pub fn action_unavailable() -> ResponseEnvelope {
    ResponseEnvelope::text(ACTION_UNAVAILABLE_TEXT)
}

pub fn settings_updated() -> ResponseEnvelope {
    ResponseEnvelope::text(SETTINGS_UPDATED_TEXT)
}

pub fn settings_rejected(reason: &str) -> ResponseEnvelope {
    ResponseEnvelope::text(format!("⚠️ Settings were not saved: {reason}"))
}

/// Envelope for a failure caught at the turn boundary.
pub fn error_envelope(err: &SwitchyardError) -> ResponseEnvelope {
    match err {
        SwitchyardError::NotFound { kind: "action", .. } => action_unavailable(),
        SwitchyardError::NotFound { kind: "profile", .. } => selection_prompt(),
        other => ResponseEnvelope::text(format!(
            "⚠️ Something went wrong while handling your message: {other}. Please try again."
        )),
    }
}
