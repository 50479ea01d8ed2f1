//! Settings file read/write with atomic replace.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use tokio::fs;
use tokio::sync::Mutex;
use toml::{Table, Value};
use tracing::{debug, info, warn};

use crate::schema::{PartialSettings, SettingKey};
use crate::validation::{timeout_in_domain, validate};

/// Default settings file, relative to the working directory.
const SETTINGS_FILE: &str = ".switchyard/config.toml";

/// Resolve the settings file path.
/// Priority: `SWITCHYARD_SETTINGS_PATH` env > `./.switchyard/config.toml`
pub fn settings_path() -> PathBuf {
    if let Ok(path) = std::env::var("SWITCHYARD_SETTINGS_PATH") {
        return PathBuf::from(path);
    }
    PathBuf::from(SETTINGS_FILE)
}

/// Load the recognized keys from disk.
///
/// Returns an empty mapping if the file doesn't exist. Recognized keys with
/// values outside their domain are dropped with a warning.
pub async fn load_settings(path: &Path) -> Result<PartialSettings> {
    let Some(table) = read_table(path).await? else {
        debug!(path = %path.display(), "Settings file does not exist; using empty mapping");
        return Ok(PartialSettings::default());
    };
    let settings = settings_from_table(&table);
    info!(path = %path.display(), "Loaded settings");
    Ok(settings)
}

/// Merge `settings` into the file on disk, keeping every unrelated key.
///
/// The mapping is validated first; nothing is written if it is invalid. The
/// write goes to a uniquely named temp file in the same directory that is
/// renamed over the target, so concurrent saves never share a temp file.
pub async fn save_settings(path: &Path, settings: &PartialSettings) -> Result<()> {
    let report = validate(settings);
    for warning in &report.warnings {
        warn!(path = %warning.path, message = %warning.message, "Settings warning");
    }
    if let Some(error) = report.into_first_error() {
        return Err(error.into());
    }

    let mut table = read_table(path).await?.unwrap_or_default();
    apply_to_table(&mut table, settings)?;

    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
            parent.to_path_buf()
        }
        None => PathBuf::from("."),
    };

    let text = toml::to_string_pretty(&table).context("Failed to serialize settings to TOML")?;
    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || write_replace(&dir, &target, text.as_bytes()))
        .await
        .context("Settings writer task panicked")??;

    info!(path = %path.display(), "Wrote settings");
    Ok(())
}

fn write_replace(dir: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp settings in: {}", dir.display()))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .with_context(|| format!("Failed to write temp settings: {}", tmp.path().display()))?;
    tmp.persist(target)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp settings to: {}", target.display()))?;
    Ok(())
}

async fn read_table(path: &Path) -> Result<Option<Table>> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read settings file: {}", path.display()));
        }
    };
    let table: Table = raw
        .parse()
        .with_context(|| format!("Failed to parse settings TOML at: {}", path.display()))?;
    Ok(Some(table))
}

fn lookup<'a>(table: &'a Table, key: SettingKey) -> Option<&'a Value> {
    let (section, name) = key.toml_path();
    table.get(section)?.as_table()?.get(name)
}

fn dropped(key: SettingKey, value: &Value) {
    warn!(key = %key, value = %value, "Ignoring settings value outside its domain");
}

/// Extract the recognized keys from a parsed settings document.
pub fn settings_from_table(table: &Table) -> PartialSettings {
    let mut out = PartialSettings::default();
    for key in SettingKey::ALL {
        let Some(value) = lookup(table, key) else { continue };
        let accepted = match key {
            SettingKey::AssistantName => value
                .as_str()
                .filter(|s| !s.trim().is_empty())
                .map(|s| out.assistant_name = Some(s.to_string())),
            SettingKey::Theme => value
                .as_str()
                .and_then(|s| s.parse().ok())
                .map(|t| out.theme = Some(t)),
            SettingKey::Layout => value
                .as_str()
                .and_then(|s| s.parse().ok())
                .map(|l| out.layout = Some(l)),
            SettingKey::AllowHtml => value.as_bool().map(|b| out.allow_html = Some(b)),
            SettingKey::AllowLatex => value.as_bool().map(|b| out.allow_latex = Some(b)),
            SettingKey::AllowEditMessage => value.as_bool().map(|b| out.allow_edit_message = Some(b)),
            SettingKey::SessionTimeout => value
                .as_integer()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| timeout_in_domain(*n))
                .map(|n| out.session_timeout_secs = Some(n)),
        };
        if accepted.is_none() {
            dropped(key, value);
        }
    }
    out
}

/// Write every set key of `settings` into `table`, creating sections as needed.
pub fn apply_to_table(table: &mut Table, settings: &PartialSettings) -> Result<()> {
    let entries: [(SettingKey, Option<Value>); 7] = [
        (SettingKey::AssistantName, settings.assistant_name.clone().map(Value::String)),
        (SettingKey::Theme, settings.theme.map(|t| Value::String(t.as_str().into()))),
        (SettingKey::Layout, settings.layout.map(|l| Value::String(l.as_str().into()))),
        (SettingKey::AllowHtml, settings.allow_html.map(Value::Boolean)),
        (SettingKey::AllowLatex, settings.allow_latex.map(Value::Boolean)),
        (SettingKey::AllowEditMessage, settings.allow_edit_message.map(Value::Boolean)),
        (SettingKey::SessionTimeout, settings.session_timeout_secs.map(|n| Value::Integer(n.into()))),
    ];

    for (key, value) in entries {
        let Some(value) = value else { continue };
        let (section, name) = key.toml_path();
        let entry = table
            .entry(section.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        let Some(section_table) = entry.as_table_mut() else {
            bail!("Settings section '{section}' exists but is not a table");
        };
        section_table.insert(name.to_string(), value);
    }
    Ok(())
}

/// Owns the settings file location; the router's handle on persistence.
///
/// Clones share one write lock, so saves and read-merge-write updates made
/// through the same store are serialized.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Arc::new(Mutex::new(())) }
    }

    /// Store at [`settings_path`].
    pub fn from_env() -> Self {
        Self::new(settings_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<PartialSettings> {
        load_settings(&self.path).await
    }

    pub async fn save(&self, settings: &PartialSettings) -> Result<()> {
        let _write = self.write_lock.lock().await;
        save_settings(&self.path, settings).await
    }

    /// Merge `patch` over what is on disk and save the result.
    pub async fn update(&self, patch: &PartialSettings) -> Result<PartialSettings> {
        if patch.is_empty() {
            return Err(anyhow!("No settings to update"));
        }
        let _write = self.write_lock.lock().await;
        let mut current = load_settings(&self.path).await?;
        current.merge(patch);
        save_settings(&self.path, &current).await?;
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Layout, Theme};

    fn store() -> (tempfile::TempDir, SettingsStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("config.toml"));
        (dir, store)
    }

    #[tokio::test]
    async fn missing_file_loads_empty_mapping() {
        let (_dir, store) = store();
        let loaded = store.load().await.unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.resolve().session_timeout_secs, 3600);
    }

    #[tokio::test]
    async fn save_then_load_restores_mapping() {
        let (_dir, store) = store();
        let m = PartialSettings {
            assistant_name: Some("Navi".into()),
            theme: Some(Theme::Dark),
            layout: Some(Layout::Wide),
            allow_html: Some(true),
            allow_latex: Some(false),
            allow_edit_message: Some(false),
            session_timeout_secs: Some(1800),
        };
        store.save(&m).await.unwrap();
        assert_eq!(store.load().await.unwrap(), m);
    }

    #[tokio::test]
    async fn save_of_load_is_noop_and_keeps_unrelated_keys() {
        let (_dir, store) = store();
        tokio::fs::create_dir_all(store.path().parent().unwrap()).await.unwrap();
        tokio::fs::write(
            store.path(),
            "[project]\nsession_timeout = 600\nenable_telemetry = true\n\n[UI]\nname = \"Old\"\ncustom_css = \"/public/style.css\"\n",
        )
        .await
        .unwrap();

        let before = store.load().await.unwrap();
        store.save(&before).await.unwrap();
        let after = store.load().await.unwrap();
        assert_eq!(before, after);

        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        let table: Table = raw.parse().unwrap();
        assert_eq!(table["project"]["enable_telemetry"].as_bool(), Some(true));
        assert_eq!(table["UI"]["custom_css"].as_str(), Some("/public/style.css"));
    }

    #[tokio::test]
    async fn out_of_domain_values_are_dropped_on_load() {
        let (_dir, store) = store();
        tokio::fs::create_dir_all(store.path().parent().unwrap()).await.unwrap();
        tokio::fs::write(
            store.path(),
            "[UI]\ndefault_theme = \"sepia\"\nlayout = \"wide\"\n[project]\nsession_timeout = 10\n",
        )
        .await
        .unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.theme, None);
        assert_eq!(loaded.layout, Some(Layout::Wide));
        assert_eq!(loaded.session_timeout_secs, None);
    }

    #[tokio::test]
    async fn invalid_mapping_is_not_written() {
        let (_dir, store) = store();
        let bad = PartialSettings {
            session_timeout_secs: Some(7201),
            ..Default::default()
        };
        assert!(store.save(&bad).await.is_err());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn update_merges_over_disk() {
        let (_dir, store) = store();
        store
            .save(&PartialSettings { assistant_name: Some("A".into()), ..Default::default() })
            .await
            .unwrap();
        let merged = store
            .update(&PartialSettings { theme: Some(Theme::Dark), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(merged.assistant_name.as_deref(), Some("A"));
        assert_eq!(merged.theme, Some(Theme::Dark));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_all_land() {
        for round in 0..20 {
            let (_dir, store) = store();
            let a = store.clone();
            let b = store.clone();
            let first = tokio::spawn(async move {
                a.update(&PartialSettings { theme: Some(Theme::Dark), ..Default::default() }).await
            });
            let second = tokio::spawn(async move {
                b.update(&PartialSettings { layout: Some(Layout::Wide), ..Default::default() }).await
            });
            first.await.unwrap().unwrap();
            second.await.unwrap().unwrap();

            let loaded = store.load().await.unwrap();
            assert_eq!(loaded.theme, Some(Theme::Dark), "round {round}");
            assert_eq!(loaded.layout, Some(Layout::Wide), "round {round}");
        }
    }

    #[tokio::test]
    async fn save_leaves_no_temp_files_behind() {
        let (_dir, store) = store();
        store
            .save(&PartialSettings { theme: Some(Theme::Light), ..Default::default() })
            .await
            .unwrap();
        let mut entries = tokio::fs::read_dir(store.path().parent().unwrap()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["config.toml"]);
    }

    #[test]
    fn non_table_section_is_rejected() {
        let mut table: Table = "UI = 3".parse().unwrap();
        let p = PartialSettings { theme: Some(Theme::Dark), ..Default::default() };
        assert!(apply_to_table(&mut table, &p).is_err());
    }
}
