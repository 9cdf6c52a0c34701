use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use tracing::warn;

use super::LinguaError;
use crate::persistence::{
    JsonStore,
    SETTINGS_FILE,
};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";
pub const DEFAULT_DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
pub const DEFAULT_DRIVE_UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";
pub const DEFAULT_DISCOVERY_URL: &str =
    "https://accounts.google.com/.well-known/openid-configuration";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    #[serde(skip)]
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub definition_language: String,
    pub study_language: String,
    pub default_word_count: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_BASE_URL.to_string(),
            definition_language: "Traditional Chinese (Taiwan usage)".to_string(),
            study_language: "English".to_string(),
            default_word_count: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveSettings {
    pub client_id: Option<String>,
    #[serde(skip)]
    pub client_secret: Option<String>,
    pub scope: String,
    pub api_base: String,
    pub upload_base: String,
    pub discovery_url: String,
    pub init_attempts: u32,
    pub init_retry_ms: u64,
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            scope: DEFAULT_DRIVE_SCOPE.to_string(),
            api_base: DEFAULT_DRIVE_API_BASE.to_string(),
            upload_base: DEFAULT_DRIVE_UPLOAD_BASE.to_string(),
            discovery_url: DEFAULT_DISCOVERY_URL.to_string(),
            init_attempts: 20,
            init_retry_ms: 200,
        }
    }
}

impl DriveSettings {
    pub fn init_retry_delay(&self) -> Duration {
        Duration::from_millis(self.init_retry_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generation: GenerationSettings,
    pub drive: DriveSettings,
    pub dark_mode: bool,
}

impl Settings {
    /// settings.json first, then environment overrides.
    pub fn load(store: &JsonStore) -> Self {
        let mut settings: Settings = store.load_or_default(SETTINGS_FILE);
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings
    }

    pub fn save(&self, store: &JsonStore) -> Result<(), LinguaError> {
        store.save(self, SETTINGS_FILE)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("GEMINI_API_KEY").or_else(|| var("API_KEY")) {
            self.generation.api_key = Some(key);
        }
        if let Some(model) = var("LINGUASPARK_MODEL") {
            self.generation.model = model;
        }
        if let Some(base) = var("LINGUASPARK_GEMINI_BASE_URL") {
            self.generation.api_base = base;
        }
        if let Some(client_id) = var("LINGUASPARK_GOOGLE_CLIENT_ID") {
            self.drive.client_id = Some(client_id);
        }
        if let Some(secret) = var("LINGUASPARK_GOOGLE_CLIENT_SECRET") {
            self.drive.client_secret = Some(secret);
        }

        if self.generation.default_word_count == 0 {
            warn!("default_word_count of 0 is not usable, falling back to 5");
            self.generation.default_word_count = 5;
        }
    }

    pub fn generation_configured(&self) -> bool {
        self.generation.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn drive_configured(&self) -> bool {
        self.drive.client_id.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}
