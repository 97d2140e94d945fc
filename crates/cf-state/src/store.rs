//! Key-value stores
//!
//! Every slot value is a serialized JSON document. The file store keeps all
//! slots in a single JSON object. A batch is staged in memory and written
//! with one file replace, so a failed save leaves the previous snapshot intact.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::IgnoredAny;
use serde_json::Value;

use crate::error::StoreResult;

/// Raw slot writes staged for one commit
pub type SlotEntries = Vec<(String, String)>;

/// Abstract load/save of engine state keyed by named slots
pub trait KeyValueStore: Send {
    /// Raw JSON text of a slot, `None` if it was never written
    fn load(&self, key: &str) -> Option<String>;

    /// Durably store the raw JSON text of a slot
    ///
    /// Text that is not a JSON document is rejected.
    fn save(&mut self, key: &str, value: String) -> StoreResult<()> {
        self.save_batch(vec![(key.to_string(), value)])
    }

    /// Durably store several slots. Either every entry is written or none is.
    fn save_batch(&mut self, entries: SlotEntries) -> StoreResult<()>;

    /// Remove a slot. Missing keys are not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

/// Boxed store for dynamic dispatch
pub type BoxedStore = Box<dyn KeyValueStore>;

// ═══════════════════════════════════════════════════════════════════════════════
// MEMORY STORE
// ═══════════════════════════════════════════════════════════════════════════════

/// In-memory store (nothing survives the process)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of written slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Write raw text, bypassing serialization (used to seed corrupt data in tests)
    pub fn insert_raw(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.slots.insert(key.into(), raw.into());
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn save_batch(&mut self, entries: SlotEntries) -> StoreResult<()> {
        for (_, raw) in &entries {
            serde_json::from_str::<IgnoredAny>(raw)?;
        }
        self.slots.extend(entries);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.slots.remove(key);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// JSON FILE STORE
// ═══════════════════════════════════════════════════════════════════════════════

/// Single-file JSON store
///
/// The in-memory slots only change once the file has been replaced.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    slots: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Open the save file at the standard location
    pub fn open_default() -> Self {
        Self::open(Self::default_path())
    }

    /// Open a save file. A missing or corrupt file starts empty.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let slots = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, Value>>(&content) {
                Ok(slots) => slots,
                Err(e) => {
                    log::warn!("Save file {} is corrupt, starting fresh: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Self { path, slots }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get default save file path
    pub fn default_path() -> PathBuf {
        let base = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .map(|h| h.join("Library/Application Support/CoinForge"))
                .unwrap_or_else(|| PathBuf::from("."))
        } else if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .map(|d| d.join("CoinForge"))
                .unwrap_or_else(|| PathBuf::from("."))
        } else {
            dirs::config_dir()
                .map(|d| d.join("coinforge"))
                .unwrap_or_else(|| PathBuf::from("."))
        };
        base.join("save.json")
    }

    /// Write `slots` to a sibling temp file, then move it over the save file
    fn write_file(&self, slots: &BTreeMap<String, Value>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(slots)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<String> {
        self.slots.get(key).map(|v| v.to_string())
    }

    fn save_batch(&mut self, entries: SlotEntries) -> StoreResult<()> {
        let mut next = self.slots.clone();
        for (key, raw) in entries {
            let value: Value = serde_json::from_str(&raw)?;
            next.insert(key, value);
        }
        self.write_file(&next)?;
        self.slots = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        if !self.slots.contains_key(key) {
            return Ok(());
        }
        let mut next = self.slots.clone();
        next.remove(key);
        self.write_file(&next)?;
        self.slots = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.load("cash").is_none());

        store.save("cash", "250".to_string()).unwrap();
        assert_eq!(store.load("cash").as_deref(), Some("250"));
        assert_eq!(store.len(), 1);

        store.remove("cash").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_batch_rejects_non_json() {
        let mut store = MemoryStore::new();
        let entries = vec![
            ("cash".to_string(), "40".to_string()),
            ("active_bet".to_string(), "abc".to_string()),
        ];
        assert!(matches!(
            store.save_batch(entries),
            Err(crate::StoreError::Serialization(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.remove("nothing").is_ok());
    }

    #[test]
    fn test_default_path_file_name() {
        let path = JsonFileStore::default_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("save.json"));
    }
}
