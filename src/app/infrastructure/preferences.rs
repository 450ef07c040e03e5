use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use super::error::Result;

pub const THEME_MODE_KEY: &str = "pp-theme-mode";
pub const THEME_PROFILE_KEY: &str = "pp-theme-profile";

/// Key-value store for user preference flags.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences persisted as a flat JSON object on disk.
///
/// The file is read once at construction and rewritten on every `set`.
pub struct JsonPreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonPreferenceStore {
    /// Open the store at the default location.
    pub fn load() -> Self {
        Self::open(Self::get_config_path())
    }

    /// Open the store at `path`. Missing or corrupt files start empty.
    pub fn open(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt preferences file");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Self { path, values }
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("patternpad");
        path.push("preferences.json");
        path
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: &[(&str, &str)]) -> Self {
        let store = Self::new();
        for (key, value) in values {
            store.values.borrow_mut().insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
