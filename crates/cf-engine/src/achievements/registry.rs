//! Achievement Registry: ordered storage for achievement definitions

use std::collections::HashMap;

use super::types::{AchievementDef, builtin_achievements};
use crate::error::RegistryError;

/// Ordered set of achievement definitions
///
/// Iteration follows registration order, which is also the order unlocks
/// are reported when several fire on the same flip.
#[derive(Debug, Clone, Default)]
pub struct AchievementRegistry {
    defs: Vec<AchievementDef>,
    /// id -> position in `defs`
    index: HashMap<String, usize>,
}

impl AchievementRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in set
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for def in builtin_achievements() {
            let result = registry.register(def);
            debug_assert!(result.is_ok(), "invalid built-in achievement set: {:?}", result);
            if let Err(e) = result {
                log::error!("Skipping built-in achievement: {}", e);
            }
        }
        registry
    }

    /// Load definitions from a JSON array
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let defs: Vec<AchievementDef> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for def in defs {
            registry.register(def)?;
        }
        Ok(registry)
    }

    /// Append a definition
    pub fn register(&mut self, def: AchievementDef) -> Result<(), RegistryError> {
        if self.index.contains_key(&def.id) {
            return Err(RegistryError::DuplicateId(def.id));
        }
        self.index.insert(def.id.clone(), self.defs.len());
        self.defs.push(def);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&AchievementDef> {
        self.index.get(id).map(|&i| &self.defs[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AchievementDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Longest recent-outcome history any definition looks at
    pub fn history_needed(&self) -> usize {
        self.defs
            .iter()
            .map(|def| def.condition.history_needed())
            .max()
            .unwrap_or(0)
    }
}
