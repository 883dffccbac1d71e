//! Avatar registry.
//!
//! Avatars are looked up by string id (stored on the profile). The table is
//! checked at construction so every [`AvatarId`] has exactly one entry.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PamojaError, Result};

/// Avatar given to new profiles.
pub const DEFAULT_AVATAR_ID: &str = "solace-familiar";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvatarId {
    EliaCandlemage,
    MiraStarling,
    RowanQuill,
    OrionAshwood,
    LiraMoontear,
    FenWillowfrost,
    KasaiEmberbright,
    SeleneWhisperwell,
    AeroFinch,
    NovaLumen,
    ThistleAndPip,
    SolaceFamiliar,
}

impl AvatarId {
    pub const ALL: [AvatarId; 12] = [
        AvatarId::EliaCandlemage,
        AvatarId::MiraStarling,
        AvatarId::RowanQuill,
        AvatarId::OrionAshwood,
        AvatarId::LiraMoontear,
        AvatarId::FenWillowfrost,
        AvatarId::KasaiEmberbright,
        AvatarId::SeleneWhisperwell,
        AvatarId::AeroFinch,
        AvatarId::NovaLumen,
        AvatarId::ThistleAndPip,
        AvatarId::SolaceFamiliar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AvatarId::EliaCandlemage => "elia-candlemage",
            AvatarId::MiraStarling => "mira-starling",
            AvatarId::RowanQuill => "rowan-quill",
            AvatarId::OrionAshwood => "orion-ashwood",
            AvatarId::LiraMoontear => "lira-moontear",
            AvatarId::FenWillowfrost => "fen-willowfrost",
            AvatarId::KasaiEmberbright => "kasai-emberbright",
            AvatarId::SeleneWhisperwell => "selene-whisperwell",
            AvatarId::AeroFinch => "aero-finch",
            AvatarId::NovaLumen => "nova-lumen",
            AvatarId::ThistleAndPip => "thistle-and-pip",
            AvatarId::SolaceFamiliar => "solace-familiar",
        }
    }
}

impl fmt::Display for AvatarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvatarId {
    type Err = PamojaError;

    fn from_str(s: &str) -> Result<Self> {
        AvatarId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| PamojaError::not_found("avatar", s))
    }
}

/// Overall feel of an avatar, used for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    Cozy,
    Scholar,
    Forest,
    Dreamy,
    Water,
    Fire,
    Cosmic,
    Playful,
}

/// Display data for one avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvatarConfig {
    pub id: AvatarId,
    pub name: &'static str,
    pub tagline: &'static str,
    pub vibe: Vibe,
    /// Gradient start colour.
    pub from: &'static str,
    /// Gradient end colour.
    pub to: &'static str,
}

fn avatar(
    id: AvatarId,
    name: &'static str,
    tagline: &'static str,
    vibe: Vibe,
    from: &'static str,
    to: &'static str,
) -> AvatarConfig {
    AvatarConfig {
        id,
        name,
        tagline,
        vibe,
        from,
        to,
    }
}

#[rustfmt::skip]
fn builtin_avatars() -> Vec<AvatarConfig> {
    use AvatarId::*;
    vec![
        avatar(EliaCandlemage, "Elia the Candle-Mage", "Soft light, steady warmth.", Vibe::Cozy, "#f97316", "#fb7185"),
        avatar(MiraStarling, "Mira Starling", "Star freckles & open books.", Vibe::Scholar, "#a855f7", "#22c1c3"),
        avatar(RowanQuill, "Rowan Quill", "Quiet writer of brave spells.", Vibe::Scholar, "#6366f1", "#8b5cf6"),
        avatar(OrionAshwood, "Orion Ashwood", "Forest owl & steady roots.", Vibe::Forest, "#16a34a", "#22c55e"),
        avatar(LiraMoontear, "Lira Moontear", "Dreamy moonlit seer.", Vibe::Dreamy, "#6366f1", "#ec4899"),
        avatar(FenWillowfrost, "Fen Willowfrost", "Mist, snow & quiet calm.", Vibe::Water, "#38bdf8", "#4f46e5"),
        avatar(KasaiEmberbright, "Kasai Emberbright", "Tiny fire sprite, big heart.", Vibe::Fire, "#f97316", "#ef4444"),
        avatar(SeleneWhisperwell, "Selene Whisperwell", "Healing light & lavender blooms.", Vibe::Dreamy, "#a855f7", "#ec4899"),
        avatar(AeroFinch, "Aero Finch", "Sky-runner with hopeful winds.", Vibe::Water, "#22c1c3", "#6366f1"),
        avatar(NovaLumen, "Nova Lumen", "Nebulas, stars & gentle cosmos.", Vibe::Cosmic, "#8b5cf6", "#ec4899"),
        avatar(ThistleAndPip, "Thistle & Pip", "Forest sprite & mushroom buddy.", Vibe::Playful, "#22c55e", "#a3e635"),
        avatar(SolaceFamiliar, "Solace", "Soft spirit-cat of comfort.", Vibe::Cozy, "#6366f1", "#f9a8d4"),
    ]
}

/// Lookup table from avatar id to display data.
#[derive(Debug, Clone)]
pub struct AvatarRegistry {
    avatars: Vec<AvatarConfig>,
    by_id: HashMap<AvatarId, usize>,
}

impl AvatarRegistry {
    /// Build a registry, requiring exactly one entry per [`AvatarId`].
    pub fn new(avatars: Vec<AvatarConfig>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(avatars.len());
        for (position, config) in avatars.iter().enumerate() {
            if by_id.insert(config.id, position).is_some() {
                return Err(PamojaError::config(format!(
                    "duplicate avatar entry: {}",
                    config.id
                )));
            }
        }

        if let Some(missing) = AvatarId::ALL.iter().find(|id| !by_id.contains_key(id)) {
            return Err(PamojaError::config(format!(
                "missing avatar entry: {}",
                missing
            )));
        }

        Ok(Self { avatars, by_id })
    }

    /// The built-in avatar table.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_avatars())
    }

    pub fn get(&self, id: AvatarId) -> &AvatarConfig {
        // Construction guarantees every id is present.
        &self.avatars[self.by_id[&id]]
    }

    /// Strict lookup by string id.
    pub fn lookup(&self, id: &str) -> Result<&AvatarConfig> {
        Ok(self.get(id.parse()?))
    }

    /// Lookup that falls back to the default avatar for unknown ids.
    ///
    /// Profiles may carry ids from older releases; those still need a face.
    pub fn resolve(&self, id: &str) -> &AvatarConfig {
        match id.parse::<AvatarId>() {
            Ok(id) => self.get(id),
            Err(_) => {
                tracing::debug!(avatar = id, "unknown avatar, using default");
                self.get(AvatarId::SolaceFamiliar)
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AvatarConfig> {
        self.avatars.iter()
    }

    pub fn len(&self) -> usize {
        self.avatars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.avatars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_is_complete() {
        let registry = AvatarRegistry::builtin().unwrap();
        assert_eq!(registry.len(), AvatarId::ALL.len());
        for id in AvatarId::ALL {
            assert_eq!(registry.get(id).id, id);
        }
    }

    #[test]
    fn test_default_avatar_exists() {
        let registry = AvatarRegistry::builtin().unwrap();
        assert_eq!(registry.lookup(DEFAULT_AVATAR_ID).unwrap().name, "Solace");
    }

    #[test]
    fn test_lookup_unknown_is_not_found() {
        let registry = AvatarRegistry::builtin().unwrap();
        let err = registry.lookup("grumpy-goblin").unwrap_err();
        assert!(matches!(err, PamojaError::NotFound { kind: "avatar", .. }));
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let registry = AvatarRegistry::builtin().unwrap();
        assert_eq!(
            registry.resolve("grumpy-goblin").id,
            AvatarId::SolaceFamiliar
        );
        assert_eq!(registry.resolve("nova-lumen").vibe, Vibe::Cosmic);
    }

    #[test]
    fn test_missing_entry_rejected() {
        let mut avatars = builtin_avatars();
        avatars.retain(|a| a.id != AvatarId::AeroFinch);
        let err = AvatarRegistry::new(avatars).unwrap_err();
        assert!(err.to_string().contains("aero-finch"));
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let mut avatars = builtin_avatars();
        avatars.push(avatars[0].clone());
        assert!(AvatarRegistry::new(avatars).is_err());
    }

    #[test]
    fn test_ids_serialize_kebab_case() {
        let json = serde_json::to_string(&AvatarId::ThistleAndPip).unwrap();
        assert_eq!(json, "\"thistle-and-pip\"");
    }
}
