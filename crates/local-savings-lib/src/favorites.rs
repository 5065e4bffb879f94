//! Favorite listings, persisted to a session-scoped key-value store.

use crate::data_structures::Severity;
use crate::error::StoreError;
use crate::notifications::Notifier;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_FAVORITES_KEY: &str = "elkin-favorites";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object on disk mapping keys to string values.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Ordered set of favorite ids; insertion order is kept, duplicates are not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: Vec<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I: IntoIterator<Item = String>>(ids: I) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.insert(&id);
        }
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.ids).unwrap_or_else(|_| "[]".to_string())
    }
}

/// How a favorite button should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteIndicator {
    pub icon_class: &'static str,
    pub active: bool,
    pub aria_label: &'static str,
}

impl FavoriteIndicator {
    pub fn for_state(is_favorite: bool) -> Self {
        if is_favorite {
            Self {
                icon_class: "fas fa-star",
                active: true,
                aria_label: "Remove from favorites",
            }
        } else {
            Self {
                icon_class: "far fa-star",
                active: false,
                aria_label: "Add to favorites",
            }
        }
    }
}

pub struct Favorites {
    store: Box<dyn KeyValueStore + Send>,
    key: String,
    set: FavoriteSet,
}

impl Favorites {
    /// Loads the set from `store`. Missing or malformed data yields an empty set.
    pub fn load(store: Box<dyn KeyValueStore + Send>, key: &str) -> Self {
        let set = match store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => FavoriteSet::from_ids(ids),
                Err(e) => {
                    warn!("Ignoring malformed favorites data: {}", e);
                    FavoriteSet::new()
                }
            },
            Ok(None) => FavoriteSet::new(),
            Err(e) => {
                warn!("Could not load favorites: {}", e);
                FavoriteSet::new()
            }
        };

        debug!(count = set.len(), "favorites loaded");

        Self {
            store,
            key: key.to_string(),
            set,
        }
    }

    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()), DEFAULT_FAVORITES_KEY)
    }

    /// Flips `id`, persists the set and confirms through `notifier`.
    /// Returns how the button for `id` should now look.
    pub fn toggle(&mut self, id: &str, notifier: &mut dyn Notifier) -> FavoriteIndicator {
        let currently_favorite = self.set.contains(id);

        if currently_favorite {
            self.set.remove(id);
        } else {
            self.set.insert(id);
        }

        self.save();

        notifier.notify(
            if currently_favorite {
                "Removed from favorites"
            } else {
                "Added to favorites"
            },
            Severity::Info,
        );

        FavoriteIndicator::for_state(!currently_favorite)
    }

    pub fn indicator(&self, id: &str) -> FavoriteIndicator {
        FavoriteIndicator::for_state(self.set.contains(id))
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.set.contains(id)
    }

    pub fn set(&self) -> &FavoriteSet {
        &self.set
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn save(&mut self) {
        if let Err(e) = self.store.set(&self.key, &self.set.to_json()) {
            warn!("Could not save favorites: {}", e);
        }
    }
}
