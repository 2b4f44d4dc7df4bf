//! Monster attribute tags

use serde::{Deserialize, Serialize};

/// Capability tags consulted by slayer, bane and immunity rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonsterAttribute {
    Demon,
    Dragon,
    Fiery,
    Flying,
    Golem,
    Kalphite,
    Leafy,
    Penance,
    Rat,
    Shade,
    Spectral,
    Undead,
    Vampyre1,
    Vampyre2,
    Vampyre3,
    Xerician,
}

impl MonsterAttribute {
    pub fn is_vampyre(self) -> bool {
        matches!(
            self,
            MonsterAttribute::Vampyre1 | MonsterAttribute::Vampyre2 | MonsterAttribute::Vampyre3
        )
    }
}
