//! Persisted settings and their resolution against the model defaults table.
//!
//! The persisted record keeps the original extension's camelCase field names
//! so existing `wingmanSettings` records keep loading; every field except the
//! model id is optional and falls back to the selected model's default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{self, ModelProfile, DEFAULT_MODEL};

/// Fully-resolved inference parameters used for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSettings {
    pub model_id: String,
    pub context: u32,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub min_p: f32,
    pub repeat_penalty: f32,
    pub num_predict: i32,
    pub num_gpu: i32,
    pub history_enabled: bool,
    pub thinking_enabled: bool,
    pub prompt_template: String,
}

impl From<&ModelProfile> for EffectiveSettings {
    fn from(profile: &ModelProfile) -> Self {
        Self {
            model_id: profile.model_id.to_string(),
            context: profile.context,
            temperature: profile.temperature,
            top_k: profile.top_k,
            top_p: profile.top_p,
            min_p: profile.min_p,
            repeat_penalty: profile.repeat_penalty,
            num_predict: profile.num_predict,
            num_gpu: profile.num_gpu,
            history_enabled: profile.history_enabled,
            thinking_enabled: profile.thinking_enabled,
            prompt_template: profile.prompt_template.to_string(),
        }
    }
}

/// The user's last save, field-by-field optional. Missing or legacy fields
/// deserialize to `None` and resolve to the model's default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialSettings {
    pub model_id: Option<String>,
    pub context: Option<u32>,
    pub temperature: Option<f32>,
    pub top_k: Option<u32>,
    pub top_p: Option<f32>,
    pub min_p: Option<f32>,
    pub repeat_penalty: Option<f32>,
    pub num_predict: Option<i32>,
    pub num_gpu: Option<i32>,
    pub history_enabled: Option<bool>,
    pub thinking_enabled: Option<bool>,
    pub prompt_template: Option<String>,
}

impl From<&EffectiveSettings> for PartialSettings {
    fn from(settings: &EffectiveSettings) -> Self {
        Self {
            model_id: Some(settings.model_id.clone()),
            context: Some(settings.context),
            temperature: Some(settings.temperature),
            top_k: Some(settings.top_k),
            top_p: Some(settings.top_p),
            min_p: Some(settings.min_p),
            repeat_penalty: Some(settings.repeat_penalty),
            num_predict: Some(settings.num_predict),
            num_gpu: Some(settings.num_gpu),
            history_enabled: Some(settings.history_enabled),
            thinking_enabled: Some(settings.thinking_enabled),
            prompt_template: Some(settings.prompt_template.clone()),
        }
    }
}

/// Merge persisted settings over the model defaults table.
///
/// The resolved `model_id` always exists in the table: an unknown persisted
/// model degrades to [`DEFAULT_MODEL`] with a single warning rather than
/// blocking the invocation.
pub fn resolve(persisted: Option<&PartialSettings>) -> EffectiveSettings {
    let Some(p) = persisted else {
        return EffectiveSettings::from(models::default_profile());
    };

    let base = match p.model_id.as_deref() {
        Some(id) => match models::profile(id) {
            Some(profile) => profile,
            None => {
                warn!("Unknown model '{}' in saved settings, falling back to {}", id, DEFAULT_MODEL);
                models::default_profile()
            }
        },
        None => models::default_profile(),
    };

    let mut settings = EffectiveSettings::from(base);
    if let Some(v) = p.context {
        settings.context = v;
    }
    if let Some(v) = p.temperature {
        settings.temperature = v;
    }
    if let Some(v) = p.top_k {
        settings.top_k = v;
    }
    if let Some(v) = p.top_p {
        settings.top_p = v;
    }
    if let Some(v) = p.min_p {
        settings.min_p = v;
    }
    if let Some(v) = p.repeat_penalty {
        settings.repeat_penalty = v;
    }
    if let Some(v) = p.num_predict {
        settings.num_predict = v;
    }
    if let Some(v) = p.num_gpu {
        settings.num_gpu = v;
    }
    if let Some(v) = p.history_enabled {
        settings.history_enabled = v;
    }
    if let Some(v) = p.thinking_enabled {
        settings.thinking_enabled = v;
    }
    if let Some(v) = &p.prompt_template {
        settings.prompt_template = v.clone();
    }
    settings
}

/// Errors from the settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown model '{0}'")]
    UnknownModel(String),
}

/// On-disk wrapper holding the single `wingmanSettings` record.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsRecord {
    #[serde(rename = "wingmanSettings", default)]
    wingman_settings: Option<PartialSettings>,
}

/// JSON-file-backed store for the persisted settings record.
///
/// Generation commands only ever read a snapshot taken at invocation start;
/// the store is written exclusively by the explicit save and reset actions.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `~/.wingman/settings.json`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .expect("Could not determine home directory")
            .join(".wingman")
            .join("settings.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted record. A missing file is simply no settings;
    /// unreadable or corrupt content is logged and treated the same way.
    pub fn load(&self) -> Option<PartialSettings> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!("Could not read settings at {}: {}", self.path.display(), err);
                return None;
            }
        };

        match serde_json::from_str::<SettingsRecord>(&content) {
            Ok(record) => record.wingman_settings,
            Err(err) => {
                warn!("Ignoring corrupt settings at {}: {}", self.path.display(), err);
                None
            }
        }
    }

    /// Persist the record verbatim as the user's last save.
    pub fn save(&self, settings: &PartialSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let record = SettingsRecord {
            wingman_settings: Some(settings.clone()),
        };
        let content = serde_json::to_string_pretty(&record)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Replace the whole persisted record with `model_id`'s raw defaults.
    ///
    /// This is a full replacement, never a partial merge: nothing from a
    /// previously selected model survives.
    pub fn reset(&self, model_id: &str) -> Result<EffectiveSettings, SettingsError> {
        let profile = models::profile(model_id)
            .ok_or_else(|| SettingsError::UnknownModel(model_id.to_string()))?;
        let settings = EffectiveSettings::from(profile);
        self.save(&PartialSettings::from(&settings))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_none_uses_default_model() {
        let settings = resolve(None);
        assert!(models::profile(&settings.model_id).is_some());
        assert_eq!(settings.model_id, DEFAULT_MODEL);
    }

    #[test]
    fn test_resolve_overrides_present_fields_only() {
        let persisted = PartialSettings {
            model_id: Some("deepseek-coder:6.7b".to_string()),
            temperature: Some(0.9),
            num_predict: Some(128),
            ..Default::default()
        };

        let settings = resolve(Some(&persisted));
        let base = models::profile("deepseek-coder:6.7b").unwrap();

        assert_eq!(settings.model_id, "deepseek-coder:6.7b");
        assert_eq!(settings.temperature, 0.9);
        assert_eq!(settings.num_predict, 128);
        // Untouched fields keep the table defaults.
        assert_eq!(settings.top_k, base.top_k);
        assert_eq!(settings.context, base.context);
        assert_eq!(settings.prompt_template, base.prompt_template);
    }

    #[test]
    fn test_resolve_unknown_model_falls_back() {
        let persisted = PartialSettings {
            model_id: Some("mystery:13b".to_string()),
            ..Default::default()
        };

        let settings = resolve(Some(&persisted));
        assert_eq!(settings.model_id, DEFAULT_MODEL);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let persisted = PartialSettings {
            model_id: Some("codellama:7b".to_string()),
            top_p: Some(0.7),
            ..Default::default()
        };

        let first = resolve(Some(&persisted));
        let second = resolve(Some(&PartialSettings::from(&first)));
        assert_eq!(first, second);
    }

    #[test]
    fn test_store_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_store_load_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SettingsStore::new(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_store_roundtrip() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        let persisted = PartialSettings {
            model_id: Some("qwen2.5-coder:3b".to_string()),
            temperature: Some(0.5),
            ..Default::default()
        };
        store.save(&persisted).unwrap();

        assert_eq!(store.load().unwrap(), persisted);
    }

    #[test]
    fn test_store_tolerates_legacy_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"wingmanSettings":{"modelId":"codellama:7b","apiVariant":"legacy","topK":20}}"#,
        )
        .unwrap();

        let store = SettingsStore::new(path);
        let loaded = store.load().unwrap();
        assert_eq!(loaded.model_id.as_deref(), Some("codellama:7b"));
        assert_eq!(loaded.top_k, Some(20));

        let settings = resolve(Some(&loaded));
        assert_eq!(settings.top_k, 20);
        // Fields the legacy record never had come from the table.
        let base = models::profile("codellama:7b").unwrap();
        assert_eq!(settings.num_predict, base.num_predict);
    }

    #[test]
    fn test_reset_equals_table_entry_with_no_leftovers() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        // Save a differently-shaped record for another model first.
        let previous = PartialSettings {
            model_id: Some("deepseek-coder:6.7b".to_string()),
            temperature: Some(0.95),
            num_gpu: Some(8),
            ..Default::default()
        };
        store.save(&previous).unwrap();

        let settings = store.reset("qwen2.5-coder:1.5b").unwrap();
        let expected = EffectiveSettings::from(models::profile("qwen2.5-coder:1.5b").unwrap());
        assert_eq!(settings, expected);

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, PartialSettings::from(&expected));
        assert_eq!(resolve(Some(&reloaded)), expected);
    }

    #[test]
    fn test_reset_unknown_model_is_an_error() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        assert!(matches!(
            store.reset("mystery:13b"),
            Err(SettingsError::UnknownModel(_))
        ));
    }
}
