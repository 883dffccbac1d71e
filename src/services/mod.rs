//! Collaborator services for Pamoja.
//!
//! [`Services`] is built once by the caller and passed to whatever needs
//! it. There is no process-wide instance: construct it, use it, then call
//! [`Services::shutdown`].

pub mod memory;
pub mod profile;
pub mod reframe;
pub mod support;
pub mod traits;

use std::sync::Arc;

pub use memory::MemoryProfileStore;
pub use profile::Profile;
pub use reframe::{request_reframe, ReframeOutcome, REFRAME_FAILURE_MESSAGE};
pub use support::CannedSupport;
pub use traits::{ProfileStore, Reframer, SupportResponder};

use crate::config::Config;
use crate::error::FailOpen;

/// Message returned when no rewrite service has been wired in.
pub const REFRAME_UNAVAILABLE_MESSAGE: &str = "Thought reframing is not available right now.";

/// Explicitly constructed bundle of collaborators.
pub struct Services {
    config: Config,
    profiles: Arc<dyn ProfileStore>,
    support: Box<dyn SupportResponder>,
    reframer: Option<Box<dyn Reframer>>,
}

impl Services {
    /// Build services with the in-memory profile store and canned support.
    pub fn new(config: Config) -> Self {
        tracing::debug!("initializing services");
        Self {
            config,
            profiles: Arc::new(MemoryProfileStore::new()),
            support: Box::new(CannedSupport),
            reframer: None,
        }
    }

    pub fn with_profile_store(mut self, store: Arc<dyn ProfileStore>) -> Self {
        self.profiles = store;
        self
    }

    pub fn with_support(mut self, support: Box<dyn SupportResponder>) -> Self {
        self.support = support;
        self
    }

    pub fn with_reframer(mut self, reframer: Box<dyn Reframer>) -> Self {
        self.reframer = Some(reframer);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn profiles(&self) -> &dyn ProfileStore {
        self.profiles.as_ref()
    }

    pub fn support(&self) -> &dyn SupportResponder {
        self.support.as_ref()
    }

    /// Load a profile, falling back to a free guest profile.
    pub fn profile_or_guest(&self, id: &str) -> Profile {
        self.profiles
            .get(id)
            .fail_open_default("loading profile")
            .unwrap_or_else(|| Profile::new(id, "friend"))
    }

    /// Reframe a thought through the configured rewrite service.
    pub fn reframe(&self, thought: &str) -> ReframeOutcome {
        match &self.reframer {
            Some(reframer) => {
                request_reframe(reframer.as_ref(), thought, self.config.reframe.min_chars)
            }
            None => ReframeOutcome::Error(REFRAME_UNAVAILABLE_MESSAGE.to_string()),
        }
    }

    /// Tear the services down, releasing the collaborators.
    pub fn shutdown(self) {
        tracing::debug!("shutting down services");
        drop(self);
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("config", &self.config)
            .field("reframer", &self.reframer.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PamojaError, Result};

    struct Gentle;

    impl Reframer for Gentle {
        fn reframe(&self, _thought: &str) -> Result<String> {
            Ok("This is hard, and I am still learning.".to_string())
        }
    }

    struct FailingStore;

    impl ProfileStore for FailingStore {
        fn get(&self, _id: &str) -> Result<Option<Profile>> {
            Err(PamojaError::service("offline"))
        }
        fn put(&self, _profile: &Profile) -> Result<()> {
            Err(PamojaError::service("offline"))
        }
        fn delete(&self, _id: &str) -> Result<()> {
            Err(PamojaError::service("offline"))
        }
    }

    #[test]
    fn test_reframe_without_service() {
        let services = Services::new(Config::default());
        assert_eq!(
            services.reframe("I always get everything wrong"),
            ReframeOutcome::Error(REFRAME_UNAVAILABLE_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_reframe_uses_configured_min_chars() {
        let mut config = Config::default();
        config.reframe.min_chars = 30;
        let services = Services::new(config).with_reframer(Box::new(Gentle));

        assert!(matches!(
            services.reframe("I always get it wrong"),
            ReframeOutcome::Error(_)
        ));
        assert!(matches!(
            services.reframe("I always get everything wrong at work"),
            ReframeOutcome::Reframed(_)
        ));
    }

    #[test]
    fn test_profile_or_guest() {
        let services = Services::new(Config::default());
        services
            .profiles()
            .put(&Profile::new("u1", "Wren").with_premium(true))
            .unwrap();

        assert!(services.profile_or_guest("u1").is_premium);
        let guest = services.profile_or_guest("unknown");
        assert!(!guest.is_premium);
        assert_eq!(guest.nickname, "friend");
    }

    #[test]
    fn test_profile_store_failure_is_fail_open() {
        let services = Services::new(Config::default()).with_profile_store(Arc::new(FailingStore));
        assert!(!services.profile_or_guest("u1").is_premium);
        services.shutdown();
    }
}
