//! Logical asset names
//!
//! Textures are referenced by key; loading them is the host's job.

use serde::{Deserialize, Serialize};

/// Every texture slot the renderer knows how to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureKey {
    Player,
    Ground,
    LaneBorder,
    SmallBarrier,
    LargeBarrier,
    FloatingBarrier,
    Hole,
    Sky,
}

impl TextureKey {
    pub const ALL: [TextureKey; 8] = [
        TextureKey::Player,
        TextureKey::Ground,
        TextureKey::LaneBorder,
        TextureKey::SmallBarrier,
        TextureKey::LargeBarrier,
        TextureKey::FloatingBarrier,
        TextureKey::Hole,
        TextureKey::Sky,
    ];

    /// Name the host uses when registering image data
    pub fn name(&self) -> &'static str {
        match self {
            TextureKey::Player => "player",
            TextureKey::Ground => "ground",
            TextureKey::LaneBorder => "laneBorder",
            TextureKey::SmallBarrier => "small-barrier",
            TextureKey::LargeBarrier => "large-barrier",
            TextureKey::FloatingBarrier => "floating-barrier",
            TextureKey::Hole => "hole",
            TextureKey::Sky => "sky",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// Which shared mesh an entity is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshKind {
    Cube,
    Sphere,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for key in TextureKey::ALL {
            assert_eq!(TextureKey::from_name(key.name()), Some(key));
        }
        assert_eq!(TextureKey::from_name("gold-coin"), None);
    }
}
