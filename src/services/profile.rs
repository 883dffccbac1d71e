//! User profile as seen by the tools.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::avatars::DEFAULT_AVATAR_ID;

/// Profile data supplied by the identity store.
///
/// The guided-reflection core never reads or writes this; it only decides
/// which tools are unlocked and which avatar greets the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Identity-provider user id.
    pub id: String,
    /// Name shown in greetings.
    pub nickname: String,
    /// Avatar identifier (see the avatar registry).
    pub avatar_id: String,
    /// Whether premium tools are unlocked.
    pub is_premium: bool,
    /// When the profile was last written.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a free-tier profile with the default avatar.
    pub fn new(id: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nickname: nickname.into(),
            avatar_id: DEFAULT_AVATAR_ID.to_string(),
            is_premium: false,
            updated_at: Utc::now(),
        }
    }

    pub fn with_avatar(mut self, avatar_id: impl Into<String>) -> Self {
        self.avatar_id = avatar_id.into();
        self
    }

    pub fn with_premium(mut self, is_premium: bool) -> Self {
        self.is_premium = is_premium;
        self
    }

    /// Update the profile's updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
