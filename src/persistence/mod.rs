use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};
use tracing::{
    debug,
    error,
    warn,
};

use crate::core::LinguaError;

const APP_NAME: &str = "linguaspark";

pub const WORDS_FILE: &str = "words.json";
pub const STATS_FILE: &str = "stats.json";
pub const SETTINGS_FILE: &str = "settings.json";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

/// JSON documents stored side by side in one directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn app_default() -> Self {
        Self::new(get_app_data_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    pub fn save<T: Serialize>(&self, data: &T, filename: &str) -> Result<(), LinguaError> {
        fs::create_dir_all(&self.dir)?;
        let file_path = self.path_of(filename);
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&file_path, json)?;
        debug!(path = %file_path.display(), "data saved");
        Ok(())
    }

    pub fn load<T: DeserializeOwned + Default>(&self, filename: &str) -> Result<T, LinguaError> {
        let file_path = self.path_of(filename);

        if !file_path.exists() {
            return Ok(T::default());
        }

        let json = fs::read_to_string(&file_path)?;
        let data: T = serde_json::from_str(&json)?;
        debug!(path = %file_path.display(), "data loaded");
        Ok(data)
    }

    /// Falls back to defaults when the file is unreadable. A file that does not parse is
    /// renamed to `<name>.bak` first so the next save cannot overwrite it.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, filename: &str) -> T {
        match self.load::<T>(filename) {
            Ok(data) => data,
            Err(e) => {
                warn!(file = filename, error = %e, "failed to load, using defaults");
                if matches!(e, LinguaError::Json(_)) {
                    self.set_aside(filename);
                }
                T::default()
            }
        }
    }

    fn set_aside(&self, filename: &str) {
        let from = self.path_of(filename);
        let to = self.path_of(&format!("{filename}.bak"));
        match fs::rename(&from, &to) {
            Ok(()) => warn!(path = %to.display(), "unreadable file kept as backup"),
            Err(e) => {
                error!(path = %from.display(), error = %e, "could not set aside unreadable file")
            }
        }
    }

    pub fn delete(&self, filename: &str) -> Result<(), LinguaError> {
        let file_path = self.path_of(filename);
        if file_path.exists() {
            fs::remove_file(&file_path)?;
            debug!(path = %file_path.display(), "deleted");
        }
        Ok(())
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.path_of(filename).exists()
    }
}
