//! Settings validation: domain checks with user-friendly error messages.

use thiserror::Error;

use crate::defaults::{SESSION_TIMEOUT_MAX_SECS, SESSION_TIMEOUT_MIN_SECS, SESSION_TIMEOUT_STEP_SECS};
use crate::schema::{PartialSettings, SettingKey};

/// A settings validation error with key path and message.
#[derive(Debug, Error)]
#[error("Settings validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, key: SettingKey, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: key.to_string(),
            message: message.into(),
        });
    }

    fn warn(&mut self, key: SettingKey, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: key.to_string(),
            message: message.into(),
        });
    }

    /// The first error, for callers that only report one.
    pub fn into_first_error(self) -> Option<ConfigValidationError> {
        self.errors.into_iter().next()
    }
}

/// Validate a settings mapping and return every error and warning.
pub fn validate(settings: &PartialSettings) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_name(settings, &mut report);
    validate_timeout(settings, &mut report);
    report
}

fn validate_name(settings: &PartialSettings, report: &mut ValidationReport) {
    let Some(name) = &settings.assistant_name else { return };
    if name.trim().is_empty() {
        report.error(SettingKey::AssistantName, "Assistant name cannot be empty");
    } else if name.chars().count() > 64 {
        report.warn(SettingKey::AssistantName, "Assistant name is long and may be truncated");
    }
}

/// Whether `secs` is an allowed session timeout.
pub fn timeout_in_domain(secs: u32) -> bool {
    (SESSION_TIMEOUT_MIN_SECS..=SESSION_TIMEOUT_MAX_SECS).contains(&secs)
        && secs % SESSION_TIMEOUT_STEP_SECS == 0
}

fn validate_timeout(settings: &PartialSettings, report: &mut ValidationReport) {
    let Some(secs) = settings.session_timeout_secs else { return };
    if !timeout_in_domain(secs) {
        report.error(
            SettingKey::SessionTimeout,
            format!(
                "Session timeout must be between {SESSION_TIMEOUT_MIN_SECS} and \
                 {SESSION_TIMEOUT_MAX_SECS} seconds in steps of {SESSION_TIMEOUT_STEP_SECS}, got {secs}"
            ),
        );
    }
}
