use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ZaiError};

/// Storage key for the persisted theme preference.
pub const THEME_KEY: &str = "zebraai-theme";

/// Durable key/value storage for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Preferences persisted as a flat JSON object in the user's config directory.
#[derive(Debug, Clone)]
pub struct Config {
    values: BTreeMap<String, String>,
    path: PathBuf,
}

impl Config {
    /// An empty config that will be written to `path` on the first `set`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            values: BTreeMap::new(),
            path: path.into(),
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(Self::get_config_path()?)
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            return Ok(Self::new(path));
        }

        let content = fs::read_to_string(&path).map_err(|source| ZaiError::Io {
            path: path.clone(),
            source,
        })?;
        let values: BTreeMap<String, String> = serde_json::from_str(&content)?;
        Ok(Self { values, path })
    }

    pub fn save(&self) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ZaiError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, content).map_err(|source| ZaiError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ZaiError::NoConfigDir)?;
        Ok(config_dir.join("zai").join("config.json"))
    }
}

impl PreferenceStore for Config {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// In-memory store for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("config.json")).unwrap();
        assert_eq!(config.get(THEME_KEY), None);
    }

    #[test]
    fn test_set_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::load_from(&path).unwrap();
        config.set(THEME_KEY, "dark").unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.get(THEME_KEY).as_deref(), Some("dark"));

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"zebraai-theme\": \"dark\""));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ZaiError::Json(_))));
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn PreferenceStore> = Box::new(MemoryStore::default());
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
    }
}
