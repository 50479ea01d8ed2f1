//! Settings schema: the fixed set of keys the settings editor can change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enumerated values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'. Use 'light' or 'dark'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Default,
    Wide,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Default => "default",
            Layout::Wide => "wide",
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Layout::Default),
            "wide" => Ok(Layout::Wide),
            other => Err(format!("unknown layout '{other}'. Use 'default' or 'wide'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// A recognized settings key, with its editor id and on-disk location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    AssistantName,
    Theme,
    Layout,
    AllowHtml,
    AllowLatex,
    AllowEditMessage,
    SessionTimeout,
}

impl SettingKey {
    pub const ALL: [SettingKey; 7] = [
        SettingKey::AssistantName,
        SettingKey::Theme,
        SettingKey::Layout,
        SettingKey::AllowHtml,
        SettingKey::AllowLatex,
        SettingKey::AllowEditMessage,
        SettingKey::SessionTimeout,
    ];

    /// Identifier used by the settings editor.
    pub fn id(self) -> &'static str {
        match self {
            SettingKey::AssistantName => "ui_name",
            SettingKey::Theme => "ui_theme",
            SettingKey::Layout => "ui_layout",
            SettingKey::AllowHtml => "features_html",
            SettingKey::AllowLatex => "features_latex",
            SettingKey::AllowEditMessage => "features_edit_message",
            SettingKey::SessionTimeout => "project_session_timeout",
        }
    }

    /// `(table, key)` in the TOML file.
    pub fn toml_path(self) -> (&'static str, &'static str) {
        match self {
            SettingKey::AssistantName => ("UI", "name"),
            SettingKey::Theme => ("UI", "default_theme"),
            SettingKey::Layout => ("UI", "layout"),
            SettingKey::AllowHtml => ("features", "unsafe_allow_html"),
            SettingKey::AllowLatex => ("features", "latex"),
            SettingKey::AllowEditMessage => ("features", "edit_message"),
            SettingKey::SessionTimeout => ("project", "session_timeout"),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (table, key) = self.toml_path();
        write!(f, "{table}.{key}")
    }
}

impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|k| k.id() == s || k.to_string() == s)
            .ok_or_else(|| format!("unrecognized setting '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// A mapping of recognized keys to values. Absent keys were never set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_html: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_latex: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_edit_message: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_timeout_secs: Option<u32>,
}

impl PartialSettings {
    pub fn is_empty(&self) -> bool {
        *self == PartialSettings::default()
    }

    /// Parse `value` for `key` and store it. Range checks happen in validation.
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<(), String> {
        let value = value.trim();
        match key {
            SettingKey::AssistantName => self.assistant_name = Some(value.to_string()),
            SettingKey::Theme => self.theme = Some(value.parse()?),
            SettingKey::Layout => self.layout = Some(value.parse()?),
            SettingKey::AllowHtml => self.allow_html = Some(parse_bool(key, value)?),
            SettingKey::AllowLatex => self.allow_latex = Some(parse_bool(key, value)?),
            SettingKey::AllowEditMessage => self.allow_edit_message = Some(parse_bool(key, value)?),
            SettingKey::SessionTimeout => {
                self.session_timeout_secs = Some(
                    value
                        .parse()
                        .map_err(|_| format!("{key}: expected a number of seconds, got '{value}'"))?,
                )
            }
        }
        Ok(())
    }

    /// Overlay every key set in `other` onto `self`.
    pub fn merge(&mut self, other: &PartialSettings) {
        if other.assistant_name.is_some() {
            self.assistant_name = other.assistant_name.clone();
        }
        self.theme = other.theme.or(self.theme);
        self.layout = other.layout.or(self.layout);
        self.allow_html = other.allow_html.or(self.allow_html);
        self.allow_latex = other.allow_latex.or(self.allow_latex);
        self.allow_edit_message = other.allow_edit_message.or(self.allow_edit_message);
        self.session_timeout_secs = other.session_timeout_secs.or(self.session_timeout_secs);
    }
}

fn parse_bool(key: SettingKey, value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(format!("{key}: expected true or false, got '{value}'")),
    }
}

/// Fully resolved settings with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub assistant_name: String,
    pub theme: Theme,
    pub layout: Layout,
    pub allow_html: bool,
    pub allow_latex: bool,
    pub allow_edit_message: bool,
    pub session_timeout_secs: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_from_editor_id_or_path() {
        assert_eq!("ui_theme".parse::<SettingKey>().unwrap(), SettingKey::Theme);
        assert_eq!("project.session_timeout".parse::<SettingKey>().unwrap(), SettingKey::SessionTimeout);
        assert!("ui_colour".parse::<SettingKey>().is_err());
    }

    #[test]
    fn set_parses_typed_values() {
        let mut p = PartialSettings::default();
        p.set(SettingKey::Theme, "dark").unwrap();
        p.set(SettingKey::AllowHtml, "on").unwrap();
        p.set(SettingKey::SessionTimeout, "600").unwrap();
        assert_eq!(p.theme, Some(Theme::Dark));
        assert_eq!(p.allow_html, Some(true));
        assert_eq!(p.session_timeout_secs, Some(600));
        assert!(p.set(SettingKey::Layout, "narrow").is_err());
    }

    #[test]
    fn merge_keeps_unset_keys() {
        let mut base = PartialSettings {
            assistant_name: Some("Bot".into()),
            theme: Some(Theme::Dark),
            ..Default::default()
        };
        base.merge(&PartialSettings { theme: Some(Theme::Light), ..Default::default() });
        assert_eq!(base.assistant_name.as_deref(), Some("Bot"));
        assert_eq!(base.theme, Some(Theme::Light));
    }
}
