//! In-memory profile storage.
//!
//! Used by the CLI (which has no identity backend) and by tests.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{PamojaError, Result};
use crate::services::profile::Profile;
use crate::services::ProfileStore;

/// In-memory profile store.
///
/// Thread-safe implementation using `RwLock<HashMap>`. Profiles are lost
/// when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

fn poisoned<T>(_: PoisonError<T>) -> PamojaError {
    PamojaError::service("profile store lock poisoned")
}

impl MemoryProfileStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of profiles in the store.
    pub fn len(&self) -> usize {
        self.profiles.read().map(|p| p.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProfileStore for MemoryProfileStore {
    fn get(&self, id: &str) -> Result<Option<Profile>> {
        let profiles = self.profiles.read().map_err(poisoned)?;
        Ok(profiles.get(id).cloned())
    }

    fn put(&self, profile: &Profile) -> Result<()> {
        let mut stored = profile.clone();
        stored.touch();
        let mut profiles = self.profiles.write().map_err(poisoned)?;
        profiles.insert(stored.id.clone(), stored);
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut profiles = self.profiles.write().map_err(poisoned)?;
        profiles.remove(id);
        Ok(())
    }
}
