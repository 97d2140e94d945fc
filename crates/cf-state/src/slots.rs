//! Named save slots and typed access on top of a raw store

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreResult;
use crate::store::{KeyValueStore, SlotEntries};

/// One logical persisted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveSlot {
    HighScore,
    TotalFlips,
    Cash,
    Inventory,
    Achievements,
    Profile,
    Streak,
    ActiveBet,
}

impl SaveSlot {
    /// All slots, in write order
    pub const ALL: [SaveSlot; 8] = [
        SaveSlot::HighScore,
        SaveSlot::TotalFlips,
        SaveSlot::Cash,
        SaveSlot::Inventory,
        SaveSlot::Achievements,
        SaveSlot::Profile,
        SaveSlot::Streak,
        SaveSlot::ActiveBet,
    ];

    /// Storage key
    pub fn key(&self) -> &'static str {
        match self {
            Self::HighScore => "high_score",
            Self::TotalFlips => "total_flips",
            Self::Cash => "cash",
            Self::Inventory => "inventory",
            Self::Achievements => "achievements",
            Self::Profile => "profile",
            Self::Streak => "streak",
            Self::ActiveBet => "active_bet",
        }
    }
}

impl std::fmt::Display for SaveSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Load a typed slot
///
/// Returns `None` when the slot is absent or its content does not parse as `T`.
pub fn load_slot<T: DeserializeOwned>(store: &dyn KeyValueStore, slot: SaveSlot) -> Option<T> {
    let raw = store.load(slot.key())?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed save slot '{}': {}", slot, e);
            None
        }
    }
}

/// Load a typed slot, falling back to `default` when absent or malformed
pub fn load_slot_or<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    slot: SaveSlot,
    default: T,
) -> T {
    load_slot(store, slot).unwrap_or(default)
}

/// Serialize and write a typed slot
pub fn save_slot<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    slot: SaveSlot,
    value: &T,
) -> StoreResult<()> {
    let json = serde_json::to_string(value)?;
    store.save(slot.key(), json)
}

/// Typed slot writes committed to a store in one batch
#[derive(Debug, Default)]
pub struct SlotBatch {
    entries: SlotEntries,
}

impl SlotBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize a slot value into the batch
    pub fn put<T: Serialize + ?Sized>(&mut self, slot: SaveSlot, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value)?;
        self.entries.push((slot.key().to_string(), json));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every staged slot, or none of them
    pub fn commit(self, store: &mut dyn KeyValueStore) -> StoreResult<()> {
        store.save_batch(self.entries)
    }
}
