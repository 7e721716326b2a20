use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Display;
use std::fs::{create_dir_all, File};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Mode label -> duration display string, exactly as fetched
pub type ModeDurations = HashMap<String, String>;

/// Cache key for one (origin, destination) pair. Keys are stable across
/// runs only because coordinates are rounded to 4 decimals and
/// destinations normalized here and nowhere else.
pub fn cache_key(lat: f64, lng: f64, destination: &str) -> String {
    format!("{:.4}, {:.4}|{}", lat, lng, normalize_destination(destination))
}

pub fn normalize_destination(destination: &str) -> String {
    destination.trim().to_lowercase()
}

pub trait CacheStore: Send + Sync {
    fn load(&self) -> Result<HashMap<String, ModeDurations>, CacheError>;
    fn persist(&self, entries: &HashMap<String, ModeDurations>) -> Result<(), CacheError>;
}

/// Flat JSON file, read wholesale at startup and replaced wholesale on
/// every flush. A missing file is an empty cache; a malformed one is a
/// hard failure the operator has to fix or delete by hand.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }
}

impl CacheStore for JsonFileStore {
    fn load(&self) -> Result<HashMap<String, ModeDurations>, CacheError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let file = File::open(&self.path)?;
        Ok(serde_json::from_reader(file)?)
    }

    fn persist(&self, entries: &HashMap<String, ModeDurations>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer(file, entries)?;
        Ok(())
    }
}

/// Backend for tests and ephemeral runs. Clones share their contents,
/// so a test can keep a handle and inspect what was persisted.
#[derive(Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, ModeDurations>>>,
}

impl MemoryStore {
    pub fn snapshot(&self) -> HashMap<String, ModeDurations> {
        self.entries.lock().unwrap().clone()
    }
}

impl CacheStore for MemoryStore {
    fn load(&self) -> Result<HashMap<String, ModeDurations>, CacheError> {
        Ok(self.entries.lock().unwrap().clone())
    }

    fn persist(&self, entries: &HashMap<String, ModeDurations>) -> Result<(), CacheError> {
        *self.entries.lock().unwrap() = entries.clone();
        Ok(())
    }
}

/// In-memory view over a persistent mode-duration store. Single owner,
/// no locking: the enricher serializes all access. Entries never expire
/// and the map grows with every unique pair queried.
pub struct CommuteCache {
    entries: HashMap<String, ModeDurations>,
    store: Box<dyn CacheStore>,
}

impl CommuteCache {
    /// Load everything the backend has. Corrupt backing data is fatal
    /// here; there is no recovery path.
    pub fn open(store: Box<dyn CacheStore>) -> Result<Self, CacheError> {
        let entries = store.load()?;
        debug!(target: "commute", "Commute cache opened with {} entries", entries.len());
        Ok(CommuteCache { entries, store })
    }

    pub fn get(&self, key: &str) -> Option<&ModeDurations> {
        self.entries.get(key)
    }

    /// Idempotent overwrite; nothing reaches the backend until `flush`
    pub fn put(&mut self, key: String, durations: ModeDurations) {
        self.entries.insert(key, durations);
    }

    pub fn flush(&self) -> Result<(), CacheError> {
        self.store.persist(&self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    Io(#[from] std::io::Error),
    Json(#[from] serde_json::Error),
}

impl Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let err: &dyn Display = match self {
            CacheError::Io(err) => err,
            CacheError::Json(err) => err,
        };
        write!(f, "{}", err)
    }
}
