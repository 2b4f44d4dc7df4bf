//! The attacking (or defending) player

use super::equipment::{Equipment, EquipmentBonuses, EquipmentPiece, EquipmentSlot};
use super::prayer::Prayer;
use super::spell::Spell;
use super::style::{CombatStyle, StyleType};
use serde::{Deserialize, Serialize};

/// Player skill levels, also used for temporary boosts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub atk: i32,
    pub str: i32,
    pub def: i32,
    pub ranged: i32,
    pub magic: i32,
    pub hp: i32,
    pub prayer: i32,
    pub mining: i32,
}

impl Skills {
    pub fn maxed() -> Self {
        Skills {
            atk: 99,
            str: 99,
            def: 99,
            ranged: 99,
            magic: 99,
            hp: 99,
            prayer: 99,
            mining: 99,
        }
    }

    pub fn all(level: i32) -> Self {
        Skills {
            atk: level,
            str: level,
            def: level,
            ranged: level,
            magic: level,
            hp: level,
            prayer: level,
            mining: level,
        }
    }
}

/// Stat-boosting consumables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Potion {
    Attack,
    Strength,
    SuperAttack,
    SuperStrength,
    Ranging,
    Magic,
    ImbuedHeart,
    SaturatedHeart,
    Overload,
    SmellingSalts,
    AncientBrew,
    ForgottenBrew,
}

/// Toggles and counters affecting the calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Buffs {
    pub potions: Vec<Potion>,
    pub on_slayer_task: bool,
    pub in_wilderness: bool,
    pub kandarin_diary: bool,
    pub charge_spell: bool,
    pub forinthry_surge: bool,
    pub mark_of_darkness_spell: bool,
    pub using_sunfire_runes: bool,
    pub soulreaper_stacks: i32,
    pub chinchompa_distance: i32,
    /// Barbarian Assault attacker role level, adds flat damage to penance
    pub ba_attacker_level: i32,
    /// Keep `Player::bonuses` as entered instead of recomputing them from gear
    pub manual_bonuses: bool,
}

impl Default for Buffs {
    fn default() -> Self {
        Buffs {
            potions: Vec::new(),
            on_slayer_task: true,
            in_wilderness: false,
            kandarin_diary: true,
            charge_spell: false,
            forinthry_surge: false,
            mark_of_darkness_spell: false,
            using_sunfire_runes: false,
            soulreaper_stacks: 0,
            chinchompa_distance: 4,
            ba_attacker_level: 0,
            manual_bonuses: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    pub name: String,
    pub style: CombatStyle,
    pub skills: Skills,
    pub boosts: Skills,
    pub equipment: Equipment,
    pub prayers: Vec<Prayer>,
    pub buffs: Buffs,
    pub spell: Option<Spell>,
    pub bonuses: EquipmentBonuses,
    /// Derived from the weapon and stance when bonuses are rebuilt
    pub attack_speed: u32,
}

impl Default for Player {
    fn default() -> Self {
        Player {
            name: "Loadout 1".to_string(),
            style: CombatStyle::default(),
            skills: Skills::maxed(),
            boosts: Skills::default(),
            equipment: Equipment::default(),
            prayers: Vec::new(),
            buffs: Buffs::default(),
            spell: None,
            bonuses: EquipmentBonuses::default(),
            attack_speed: 4,
        }
    }
}

impl Player {
    pub fn new(name: &str) -> Self {
        Player {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Wear a piece; a new weapon resets the combat style to its first style
    pub fn equip(&mut self, piece: EquipmentPiece) {
        let is_weapon = piece.slot == EquipmentSlot::Weapon;
        let category = piece.category;
        self.equipment.equip(piece);
        if is_weapon {
            self.style = category.default_style();
        }
    }

    pub fn with_equipment(mut self, pieces: impl IntoIterator<Item = EquipmentPiece>) -> Self {
        for piece in pieces {
            self.equip(piece);
        }
        self
    }

    /// Turn a prayer on, switching off any it conflicts with
    pub fn activate_prayer(&mut self, prayer: Prayer) {
        self.prayers.retain(|p| !p.conflicts_with(prayer) && *p != prayer);
        self.prayers.push(prayer);
    }

    pub fn is_using(&self, style: StyleType) -> bool {
        self.style.is_type(style)
    }

    /// Current level including boosts
    pub fn current(&self, skill: fn(&Skills) -> i32) -> i32 {
        skill(&self.skills) + skill(&self.boosts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::style::{EquipmentCategory, Stance};

    #[test]
    fn test_equip_weapon_resets_style() {
        let mut whip = EquipmentPiece::named("Abyssal whip", EquipmentSlot::Weapon);
        whip.category = EquipmentCategory::Whip;
        let player = Player::default().with_equipment([whip]);
        assert_eq!(player.style.name, "Flick");
        assert!(player.style.is_stance(Stance::Accurate));
    }

    #[test]
    fn test_strength_and_attack_prayers_stack() {
        let mut player = Player::default();
        player.activate_prayer(Prayer::UltimateStrength);
        player.activate_prayer(Prayer::IncredibleReflexes);
        assert_eq!(player.prayers, vec![Prayer::UltimateStrength, Prayer::IncredibleReflexes]);

        player.activate_prayer(Prayer::EagleEye);
        assert_eq!(player.prayers, vec![Prayer::EagleEye]);
    }

    #[test]
    fn test_activate_prayer_replaces_conflicts() {
        let mut player = Player::default();
        player.activate_prayer(Prayer::UltimateStrength);
        player.activate_prayer(Prayer::IncredibleReflexes);
        player.activate_prayer(Prayer::Piety);
        assert_eq!(player.prayers, vec![Prayer::Piety]);

        player.activate_prayer(Prayer::ProtectFromMelee);
        player.activate_prayer(Prayer::Piety);
        assert_eq!(player.prayers, vec![Prayer::ProtectFromMelee, Prayer::Piety]);
    }

    #[test]
    fn test_current_level_includes_boost() {
        let mut player = Player::default();
        player.boosts.str = 19;
        assert_eq!(player.current(|s| s.str), 118);
    }
}
