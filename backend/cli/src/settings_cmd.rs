//! CLI Settings Subcommands

use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use switchyard_config::{load_or_default, validate, PartialSettings, SettingKey, Settings, SettingsStore};

use crate::terminal_output::{note_success, note_warn, render_table, Column};

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print the resolved settings
    Show,
    /// Validate and save one or more KEY=VALUE pairs
    Set {
        /// Keys are editor ids (`ui_theme`) or file paths (`UI.default_theme`)
        #[arg(required = true)]
        pairs: Vec<String>,
    },
}

pub fn parse_pairs(pairs: &[String]) -> Result<PartialSettings> {
    let mut patch = PartialSettings::default();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{pair}'"))?;
        let key: SettingKey = key.trim().parse().map_err(|e: String| anyhow!(e))?;
        patch.set(key, value).map_err(|e| anyhow!(e))?;
    }
    Ok(patch)
}

fn value_of(settings: &Settings, key: SettingKey) -> String {
    match key {
        SettingKey::AssistantName => settings.assistant_name.clone(),
        SettingKey::Theme => settings.theme.as_str().to_string(),
        SettingKey::Layout => settings.layout.as_str().to_string(),
        SettingKey::AllowHtml => settings.allow_html.to_string(),
        SettingKey::AllowLatex => settings.allow_latex.to_string(),
        SettingKey::AllowEditMessage => settings.allow_edit_message.to_string(),
        SettingKey::SessionTimeout => settings.session_timeout_secs.to_string(),
    }
}

pub async fn run(cmd: SettingsCommands, store: &SettingsStore) -> Result<()> {
    match cmd {
        SettingsCommands::Show => {
            let settings = load_or_default(store).await;
            let rows: Vec<Vec<String>> = SettingKey::ALL
                .into_iter()
                .map(|key| vec![key.id().to_string(), key.to_string(), value_of(&settings, key)])
                .collect();
            println!("Settings file: {}", store.path().display());
            print!(
                "{}",
                render_table(&[Column::left("Id"), Column::left("Key"), Column::left("Value")], &rows)
            );
        }
        SettingsCommands::Set { pairs } => {
            let patch = parse_pairs(&pairs)?;
            let report = validate(&patch);
            for warning in &report.warnings {
                note_warn(&warning.to_string());
            }
            if let Some(error) = report.into_first_error() {
                bail!(error);
            }
            store.update(&patch).await?;
            note_success(switchyard_routing::composer::SETTINGS_UPDATED_TEXT);
        }
    }
    Ok(())
}
