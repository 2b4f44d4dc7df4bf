//! Spells and spell max hits

use crate::error::CalcError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spellbook {
    #[default]
    Standard,
    Ancient,
    Lunar,
    Arceuus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellElement {
    Air,
    Water,
    Earth,
    Fire,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    /// Fixed max hit, or 0 when the spell scales with magic level
    #[serde(default)]
    pub max_hit: i32,
    #[serde(default)]
    pub spellbook: Spellbook,
    #[serde(default)]
    pub element: Option<SpellElement>,
}

impl Spell {
    pub fn new(name: &str, max_hit: i32, spellbook: Spellbook, element: Option<SpellElement>) -> Self {
        Spell {
            name: name.to_string(),
            max_hit,
            spellbook,
            element,
        }
    }

    pub fn is_demonbane(&self) -> bool {
        matches!(
            self.name.as_str(),
            "Inferior Demonbane" | "Superior Demonbane" | "Dark Demonbane"
        )
    }

    pub fn is_bind(&self) -> bool {
        matches!(self.name.as_str(), "Bind" | "Snare" | "Entangle")
    }

    /// Sunfire runes only power standard spellbook fire spells
    pub fn can_use_sunfire_runes(&self) -> bool {
        self.spellbook == Spellbook::Standard && self.element == Some(SpellElement::Fire)
    }

    pub fn is_bolt(&self) -> bool {
        self.name.to_lowercase().contains("bolt")
    }
}

/// Max hit of a spell at the given magic level
///
/// Spells without a fixed max hit must have a level formula; anything else is
/// a data error.
pub fn get_spell_max_hit(spell: &Spell, magic_level: i32) -> Result<i32, CalcError> {
    if spell.max_hit > 0 {
        return Ok(spell.max_hit);
    }

    match spell.name.as_str() {
        "Magic Dart" => Ok(10 + magic_level / 10),
        // binds only deal damage through their fixed max hit
        _ if spell.is_bind() => Ok(0),
        name => Err(CalcError::UnknownSpellMaxHit(name.to_string())),
    }
}
