use crate::config::DashboardConfig;
use crate::error::Result;
use crate::schema::Dataset;
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key-value persistence for the single dataset.
///
/// `load` never fails: unreadable or malformed data is reported as absent.
pub trait DatasetStore {
    fn load(&self) -> Option<Dataset>;
    fn save(&mut self, dataset: &Dataset) -> Result<()>;
}

/// Loads the persisted dataset, or a zero-filled one if nothing usable is stored.
pub fn load_or_default<S: DatasetStore + ?Sized>(store: &S) -> Dataset {
    store.load().unwrap_or_else(Dataset::zeroed)
}

fn parse_stored(raw: &str, origin: &str) -> Option<Dataset> {
    match serde_json::from_str(raw) {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            warn!("Failed to parse saved data in {}: {}", origin, e);
            None
        }
    }
}

/// Stores the dataset as pretty JSON in `<storage_dir>/<storage_key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(Path::new(&config.storage_dir).join(format!("{}.json", config.storage_key)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetStore for FileStore {
    fn load(&self) -> Option<Dataset> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => parse_stored(&raw, &self.path.display().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved dataset at {}", self.path.display());
                None
            }
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&mut self, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(dataset)?;
        fs::write(&self.path, json)?;
        debug!("Saved dataset to {}", self.path.display());
        Ok(())
    }
}

/// In-memory string store keyed like browser local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    key: String,
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: HashMap::new(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.storage_key.clone())
    }

    /// Places raw text under the store's key, bypassing serialization.
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.entries.insert(self.key.clone(), raw.into());
        self
    }

    pub fn raw(&self) -> Option<&str> {
        self.entries.get(&self.key).map(String::as_str)
    }
}

impl DatasetStore for MemoryStore {
    fn load(&self) -> Option<Dataset> {
        self.raw().and_then(|raw| parse_stored(raw, &self.key))
    }

    fn save(&mut self, dataset: &Dataset) -> Result<()> {
        let json = serde_json::to_string(dataset)?;
        self.entries.insert(self.key.clone(), json);
        Ok(())
    }
}
