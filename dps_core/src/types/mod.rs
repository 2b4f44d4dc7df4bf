//! Player, monster and equipment value types

pub mod attributes;
pub mod equipment;
pub mod monster;
pub mod player;
pub mod prayer;
pub mod spell;
pub mod style;

pub use attributes::MonsterAttribute;
pub use equipment::{Equipment, EquipmentBonuses, EquipmentPiece, EquipmentSlot, OtherBonuses, StyleBonuses};
pub use monster::{
    DefenceReductions, Monster, MonsterDefensive, MonsterInputs, MonsterOffensive, MonsterSkills,
    MonsterStyle, Weakness,
};
pub use player::{Buffs, Player, Potion, Skills};
pub use prayer::{Prayer, PrayerData, PrayerStyle};
pub use spell::{get_spell_max_hit, Spell, SpellElement, Spellbook};
pub use style::{CombatStyle, EquipmentCategory, RangedDamageType, Stance, StyleType};
