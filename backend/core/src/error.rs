use thiserror::Error;

/// Top-level error type for the Switchyard router.
///
/// Only `Configuration` may abort startup. Every other variant is caught at the
/// turn boundary and turned into a user-visible envelope.
#[derive(Debug, Error)]
pub enum SwitchyardError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("I/O failure: {0}")]
    Io(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SwitchyardError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    /// Whether the error is allowed to terminate startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<std::io::Error> for SwitchyardError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

pub type Result<T, E = SwitchyardError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_configuration_is_fatal() {
        assert!(SwitchyardError::config("dup").is_fatal());
        assert!(!SwitchyardError::not_found("action", "x").is_fatal());
        assert!(!SwitchyardError::Io("disk".into()).is_fatal());
    }

    #[test]
    fn not_found_message_names_kind_and_id() {
        let err = SwitchyardError::not_found("action", "action_zap");
        assert_eq!(err.to_string(), "action not found: action_zap");
    }
}
