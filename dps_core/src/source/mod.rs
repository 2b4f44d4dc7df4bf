//! BonusSource - Trait and implementations for equipment bonus providers

mod gear;
mod potion;
mod set_effects;

pub use gear::{ammo_applicability, AmmoApplicability, GearSource};
pub use potion::PotionSource;
pub use set_effects::SetEffectSource;

use crate::types::{EquipmentBonuses, Monster, Player, Skills, StyleType};

/// Running totals the sources write into
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BonusAccumulator {
    pub bonuses: EquipmentBonuses,
    pub boosts: Skills,
}

/// Trait for anything that contributes to a player's derived bonuses
pub trait BonusSource: Send + Sync {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// - Gear: 0
    /// - Set effects: 100, since they scale the gear totals
    /// - Potions: 200
    fn priority(&self) -> i32 {
        0
    }

    fn apply(&self, acc: &mut BonusAccumulator);
}

/// Run every source for this player against this monster
pub fn compute_bonuses(player: &Player, monster: &Monster) -> BonusAccumulator {
    let mut sources: Vec<Box<dyn BonusSource + '_>> = vec![
        Box::new(GearSource::new(&player.equipment)),
        Box::new(SetEffectSource::new(player, monster)),
        Box::new(PotionSource::new(&player.buffs.potions, &player.skills)),
    ];
    sources.sort_by_key(|s| s.priority());

    let mut acc = BonusAccumulator::default();
    for source in &sources {
        source.apply(&mut acc);
    }
    acc
}

impl Player {
    /// Rebuild bonuses, attack speed and potion boosts from the current gear
    ///
    /// Bonuses entered by hand (`buffs.manual_bonuses`) are left alone. Boosts
    /// are only replaced when at least one potion is active.
    pub fn recompute_bonuses(&mut self, monster: &Monster) {
        let acc = compute_bonuses(self, monster);
        if !self.buffs.manual_bonuses {
            self.bonuses = acc.bonuses;
        }
        if !self.buffs.potions.is_empty() {
            self.boosts = acc.boosts;
        }
        self.attack_speed = attack_speed(self, monster);
    }
}

/// Ticks between attacks for the player's weapon and stance
pub fn attack_speed(player: &Player, monster: &Monster) -> u32 {
    let weapon = player.equipment.weapon.as_ref();
    let mut speed = weapon.map(|w| w.speed).filter(|&s| s > 0).unwrap_or(4) as i32;
    let stance = player.style.stance;
    let manual = player.style.is_stance(crate::types::Stance::ManualCast);

    if player.is_using(StyleType::Ranged) && player.style.is_stance(crate::types::Stance::Rapid) {
        speed -= 1;
    } else if stance.is_some_and(|s| s.is_cast()) {
        let weapon_name = player.equipment.weapon_name();
        let standard_book = player
            .spell
            .as_ref()
            .is_some_and(|s| s.spellbook == crate::types::Spellbook::Standard);
        speed = match weapon_name {
            Some("Harmonised nightmare staff") if standard_book && !manual => 4,
            Some("Twinflame staff") => 6,
            _ => 5,
        };
    }

    if monster.id == crate::config::ids::SCURRIUS_RAT_ID
        && !manual
        && player
            .equipment
            .weapon
            .as_ref()
            .is_some_and(|w| w.name_is(&["Bone mace", "Bone shortbow", "Bone staff"]))
    {
        speed = 1;
    }

    speed.max(1) as u32
}

/// Special attack energy cost of a weapon, if it has a special attack
pub fn spec_cost(weapon_name: &str) -> Option<u32> {
    let cost = match weapon_name {
        "Abyssal dagger" | "Dragon dagger" | "Dragon longsword" | "Dragon mace"
        | "Osmumten's fang" | "Osmumten's fang (or)" | "Dual macuahuitl" | "Scorching bow"
        | "Dragon knife" | "Purging staff" => 25,

        "Dawnbringer" | "Dragon halberd" | "Crystal halberd" | "Burning claws" => 30,

        "Magic longbow" | "Magic comp bow" => 35,

        "Dragon sword" => 40,

        "Elder maul" | "Dragon warhammer" | "Bandos godsword" | "Saradomin godsword"
        | "Accursed sceptre" | "Accursed sceptre (a)" | "Arclight" | "Emberlight"
        | "Tonalztics of ralos" | "Dragon claws" | "Voidwaker" | "Toxic blowpipe"
        | "Blazing blowpipe" | "Webweaver bow" | "Magic shortbow (i)" | "Ancient godsword"
        | "Armadyl godsword" | "Zamorak godsword" | "Abyssal bludgeon" | "Abyssal whip"
        | "Barrelchest anchor" => 50,

        "Magic shortbow" | "Dark bow" | "Eldritch nightmare staff" | "Volatile nightmare staff"
        | "Dragon scimitar" => 55,

        "Heavy ballista" | "Light ballista" | "Saradomin's blessed sword" => 65,

        "Brine sabre" | "Zaryte crossbow" => 75,

        "Saradomin sword" | "Seercull" => 100,

        _ => return None,
    };
    Some(cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CombatStyle, EquipmentCategory, EquipmentPiece, EquipmentSlot, Spell, Spellbook, Stance};

    fn weapon(name: &str, speed: u32, category: EquipmentCategory) -> EquipmentPiece {
        let mut w = EquipmentPiece::named(name, EquipmentSlot::Weapon);
        w.speed = speed;
        w.category = category;
        w
    }

    #[test]
    fn test_rapid_is_one_tick_faster() {
        let mut player = Player::default().with_equipment([weapon("Magic shortbow", 4, EquipmentCategory::Bow)]);
        player.style = CombatStyle::new("Rapid", StyleType::Ranged, Stance::Rapid);
        assert_eq!(attack_speed(&player, &Monster::default()), 3);
    }

    #[test]
    fn test_casting_speeds() {
        let mut player = Player::default().with_equipment([weapon("Harmonised nightmare staff", 4, EquipmentCategory::Staff)]);
        player.style = CombatStyle::new("Spell", StyleType::Magic, Stance::Autocast);
        player.spell = Some(Spell::new("Fire Surge", 24, Spellbook::Standard, None));
        assert_eq!(attack_speed(&player, &Monster::default()), 4);

        player.style = CombatStyle::manual_cast();
        assert_eq!(attack_speed(&player, &Monster::default()), 5);
    }

    #[test]
    fn test_unarmed_default_speed() {
        assert_eq!(attack_speed(&Player::default(), &Monster::default()), 4);
    }

    #[test]
    fn test_bone_weapons_on_scurrius_rats() {
        let player = Player::default().with_equipment([weapon("Bone mace", 4, EquipmentCategory::Blunt)]);
        let rat = Monster {
            id: 7223,
            ..Default::default()
        };
        assert_eq!(attack_speed(&player, &rat), 1);
    }

    #[test]
    fn test_recompute_keeps_manual_bonuses() {
        let mut whip = EquipmentPiece::named("Abyssal whip", EquipmentSlot::Weapon);
        whip.offensive.slash = 82;
        whip.speed = 4;
        let mut player = Player::default().with_equipment([whip]);
        player.recompute_bonuses(&Monster::default());
        assert_eq!(player.bonuses.offensive.slash, 82);

        player.buffs.manual_bonuses = true;
        player.bonuses.offensive.slash = -1000;
        player.recompute_bonuses(&Monster::default());
        assert_eq!(player.bonuses.offensive.slash, -1000);
    }

    #[test]
    fn test_recompute_sets_boosts_only_with_potions() {
        let mut player = Player::default();
        player.boosts.str = 3;
        player.recompute_bonuses(&Monster::default());
        assert_eq!(player.boosts.str, 3);

        player.buffs.potions = vec![crate::types::Potion::SuperStrength];
        player.recompute_bonuses(&Monster::default());
        assert_eq!(player.boosts.str, 19);
    }

    #[test]
    fn test_spec_costs() {
        assert_eq!(spec_cost("Dragon claws"), Some(50));
        assert_eq!(spec_cost("Dragon dagger"), Some(25));
        assert_eq!(spec_cost("Seercull"), Some(100));
        assert_eq!(spec_cost("Rune scimitar"), None);
    }
}
