//! Structured logging for Switchyard.
//!
//! Handles subscriber setup with file rotation, log redaction, and per-turn event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, TurnEvent};
pub use logger::init_logger;
pub use redact::{redact_and_truncate, redact_sensitive_data};
