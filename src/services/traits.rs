//! Collaborator traits for Pamoja.
//!
//! Everything outside the guided-reflection core is reached through these
//! seams: the profile store, the text rewriting call, and the lesson
//! support responder. Implementations are passed in explicitly.

use std::sync::Arc;

use crate::catalog::lessons::LessonId;
use crate::error::Result;
use crate::services::profile::Profile;

/// Trait for profile storage backends.
pub trait ProfileStore: Send + Sync {
    /// Retrieve a profile by user id.
    ///
    /// Returns `Ok(None)` if the profile doesn't exist.
    fn get(&self, id: &str) -> Result<Option<Profile>>;

    /// Save a profile, creating or replacing it.
    fn put(&self, profile: &Profile) -> Result<()>;

    /// Delete a profile.
    ///
    /// Returns `Ok(())` even if the profile doesn't exist.
    fn delete(&self, id: &str) -> Result<()>;

    /// Check if a profile exists.
    fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }
}

/// Blanket implementation of ProfileStore for Arc-wrapped stores.
impl<T: ProfileStore + ?Sized> ProfileStore for Arc<T> {
    fn get(&self, id: &str) -> Result<Option<Profile>> {
        (**self).get(id)
    }

    fn put(&self, profile: &Profile) -> Result<()> {
        (**self).put(profile)
    }

    fn delete(&self, id: &str) -> Result<()> {
        (**self).delete(id)
    }
}

/// Opaque text-rewriting call used by the thought reframing tool.
pub trait Reframer: Send + Sync {
    /// Rewrite a negative thought into a gentler one.
    fn reframe(&self, thought: &str) -> Result<String>;
}

/// Produces the reply shown under "Talk with Pamoja" in a lesson.
pub trait SupportResponder: Send + Sync {
    fn respond(&self, lesson: LessonId, text: &str) -> Result<String>;
}

/// Test utilities for ProfileStore implementations.
#[cfg(test)]
pub mod tests {
    use super::*;

    /// Test helper to verify ProfileStore implementations.
    pub fn test_profile_store_crud<S: ProfileStore>(store: &S) {
        let profile = Profile::new("user-1", "Wren");

        assert!(!store.exists(&profile.id).unwrap());
        assert!(store.get(&profile.id).unwrap().is_none());

        store.put(&profile).unwrap();
        assert!(store.exists(&profile.id).unwrap());

        let retrieved = store.get(&profile.id).unwrap().unwrap();
        assert_eq!(retrieved.nickname, "Wren");

        let upgraded = profile.clone().with_premium(true);
        store.put(&upgraded).unwrap();
        assert!(store.get(&profile.id).unwrap().unwrap().is_premium);

        store.delete(&profile.id).unwrap();
        assert!(!store.exists(&profile.id).unwrap());

        // Delete again should succeed
        store.delete(&profile.id).unwrap();
    }
}
