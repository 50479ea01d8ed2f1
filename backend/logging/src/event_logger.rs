//! Turn Event Logger
//!
//! Structured per-turn events (routing decisions, action invocations, errors)
//! emitted through `tracing` under the `turn_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_and_truncate;

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum TurnEvent {
    ProfileSelected {
        profile: String,
    },
    MessageRouted {
        profile: String,
        intent: String,
        content: String,
        envelopes: usize,
    },
    ActionInvoked {
        action_id: String,
        chained: Vec<String>,
    },
    SettingsUpdated {
        keys: Vec<String>,
    },
    Error {
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: TurnEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Log one turn event. User-supplied text is redacted and truncated first.
    pub fn log_event(session_id: &str, mut event: TurnEvent) {
        match &mut event {
            TurnEvent::MessageRouted { content, .. } => {
                *content = redact_and_truncate(content);
            }
            TurnEvent::Error { error_msg } => {
                *error_msg = redact_and_truncate(error_msg);
            }
            TurnEvent::ProfileSelected { .. }
            | TurnEvent::ActionInvoked { .. }
            | TurnEvent::SettingsUpdated { .. } => {}
        }

        let entry = EventLogEntry {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            event,
        };

        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: "turn_events", event = %json, "Turn event"),
            Err(_) => info!(target: "turn_events", event = ?entry, "Turn event"),
        }
    }
}
