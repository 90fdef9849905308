use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::SettingsError;
use crate::job::JobType;

pub const DEFAULT_ENCODING_OUTPUT_DIRECTORY: &str = "Default Encoding Output Directory";
pub const DEFAULT_DECODING_OUTPUT_DIRECTORY: &str = "Default Decoding Output Directory";

pub const ENCODING_OUTPUT_DIR_ENV_VAR: &str = "DEFAULT_ENCODING_OUTPUT_DIR";
pub const DECODING_OUTPUT_DIR_ENV_VAR: &str = "DEFAULT_DECODING_OUTPUT_DIR";
pub const SETTINGS_FILE_ENV_VAR: &str = "JOB_SETTINGS_FILE";

/// The settings key holding the suggested output folder for `job_type`.
pub fn default_output_key(job_type: JobType) -> &'static str {
    match job_type {
        JobType::Encode => DEFAULT_ENCODING_OUTPUT_DIRECTORY,
        JobType::Decode => DEFAULT_DECODING_OUTPUT_DIRECTORY,
    }
}

/// Source of application settings consulted by the job workflow.
pub trait SettingsStore {
    fn string_setting(&self, key: &str) -> Option<String>;

    fn home_directory(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

impl SettingsStore for HashMap<String, String> {
    fn string_setting(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for &S {
    fn string_setting(&self, key: &str) -> Option<String> {
        (**self).string_setting(key)
    }

    fn home_directory(&self) -> Option<PathBuf> {
        (**self).home_directory()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    pub fn new(values: HashMap<String, String>) -> Self {
        Settings { values }
    }

    /// Reads the default output folders from the environment. Unset
    /// variables leave the corresponding setting absent.
    pub fn from_env() -> Self {
        let mut values = HashMap::new();
        for (env_var, key) in [
            (ENCODING_OUTPUT_DIR_ENV_VAR, DEFAULT_ENCODING_OUTPUT_DIRECTORY),
            (DECODING_OUTPUT_DIR_ENV_VAR, DEFAULT_DECODING_OUTPUT_DIRECTORY),
        ] {
            if let Ok(value) = std::env::var(env_var) {
                debug!("Setting '{}' taken from {}", key, env_var);
                values.insert(key.to_string(), value);
            }
        }
        Settings { values }
    }

    /// Parses a flat JSON object of string settings.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let values: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Settings { values })
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        info!("Loaded {} setting(s) from {:?}", settings.values.len(), path);
        Ok(settings)
    }

    /// Uses the file named by `JOB_SETTINGS_FILE` when set, the environment
    /// otherwise.
    pub fn load() -> Result<Self, SettingsError> {
        match std::env::var(SETTINGS_FILE_ENV_VAR) {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => Ok(Self::from_env()),
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }
}

impl SettingsStore for Settings {
    fn string_setting(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
