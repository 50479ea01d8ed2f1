//! Settings defaults, applied to whatever the settings file left unset.

use crate::schema::{Layout, PartialSettings, Settings, Theme};

pub const DEFAULT_ASSISTANT_NAME: &str = "Assistant";

/// Default session timeout (seconds).
pub const DEFAULT_SESSION_TIMEOUT_SECS: u32 = 3600;

pub const SESSION_TIMEOUT_MIN_SECS: u32 = 300;
pub const SESSION_TIMEOUT_MAX_SECS: u32 = 7200;
pub const SESSION_TIMEOUT_STEP_SECS: u32 = 300;

impl Default for Settings {
    fn default() -> Self {
        Self {
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            theme: Theme::Light,
            layout: Layout::Default,
            allow_html: false,
            allow_latex: false,
            allow_edit_message: true,
            session_timeout_secs: DEFAULT_SESSION_TIMEOUT_SECS,
        }
    }
}

impl PartialSettings {
    /// Apply the documented defaults to every unset key.
    pub fn resolve(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            assistant_name: self.assistant_name.clone().unwrap_or(defaults.assistant_name),
            theme: self.theme.unwrap_or(defaults.theme),
            layout: self.layout.unwrap_or(defaults.layout),
            allow_html: self.allow_html.unwrap_or(defaults.allow_html),
            allow_latex: self.allow_latex.unwrap_or(defaults.allow_latex),
            allow_edit_message: self.allow_edit_message.unwrap_or(defaults.allow_edit_message),
            session_timeout_secs: self.session_timeout_secs.unwrap_or(defaults.session_timeout_secs),
        }
    }
}

impl From<&Settings> for PartialSettings {
    fn from(s: &Settings) -> Self {
        Self {
            assistant_name: Some(s.assistant_name.clone()),
            theme: Some(s.theme),
            layout: Some(s.layout),
            allow_html: Some(s.allow_html),
            allow_latex: Some(s.allow_latex),
            allow_edit_message: Some(s.allow_edit_message),
            session_timeout_secs: Some(s.session_timeout_secs),
        }
    }
}
