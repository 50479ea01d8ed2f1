//! `switchyard-config`: persisted settings for the Switchyard front-end.
//!
//! Provides:
//! - Typed settings schema with the fixed key set of the settings editor
//! - TOML read/merge/write with atomic replace
//! - Default value application
//! - Domain validation

pub mod defaults;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::{DEFAULT_ASSISTANT_NAME, DEFAULT_SESSION_TIMEOUT_SECS};
pub use io::{load_settings, save_settings, settings_path, SettingsStore};
pub use schema::{Layout, PartialSettings, SettingKey, Settings, Theme};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use tracing::warn;

/// Load settings and apply defaults, degrading to pure defaults on any I/O
/// or parse failure.
pub async fn load_or_default(store: &SettingsStore) -> Settings {
    match store.load().await {
        Ok(partial) => partial.resolve(),
        Err(e) => {
            warn!(path = %store.path().display(), "Failed to load settings, using defaults: {:#}", e);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unparseable_file_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "this is = = not toml").await.unwrap();
        let settings = load_or_default(&SettingsStore::new(&path)).await;
        assert_eq!(settings, Settings::default());
    }
}
