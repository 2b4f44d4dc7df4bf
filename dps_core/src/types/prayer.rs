//! Prayers and their combat modifiers

use crate::math::Factor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prayer {
    ThickSkin,
    BurstOfStrength,
    ClarityOfThought,
    SharpEye,
    MysticWill,
    RockSkin,
    SuperhumanStrength,
    ImprovedReflexes,
    HawkEye,
    MysticLore,
    SteelSkin,
    UltimateStrength,
    IncredibleReflexes,
    EagleEye,
    MysticMight,
    ProtectFromMagic,
    ProtectFromMissiles,
    ProtectFromMelee,
    Chivalry,
    Piety,
    Rigour,
    Augury,
}

/// The attack style family a prayer boosts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrayerStyle {
    Melee,
    Ranged,
    Magic,
    /// Defence-only and overhead prayers
    None,
}

/// Static data for one prayer
#[derive(Debug, Clone, Copy)]
pub struct PrayerData {
    pub name: &'static str,
    pub style: PrayerStyle,
    pub factor_accuracy: Option<Factor>,
    pub factor_strength: Option<Factor>,
    pub factor_defence: Option<Factor>,
    /// Additive magic damage, in tenths of a percent
    pub magic_damage_bonus: i32,
    /// Drain rate in prayer drain units
    pub drain_rate: i32,
    slots: u8,
}

// Slots that two prayers cannot both occupy
const ATTACK: u8 = 1;
const STRENGTH: u8 = 1 << 1;
const DEFENCE: u8 = 1 << 2;
const RANGED: u8 = 1 << 3;
const MAGIC: u8 = 1 << 4;
const OVERHEAD: u8 = 1 << 5;
const OFFENCE: u8 = ATTACK | STRENGTH | RANGED | MAGIC;

const TIER_1: Factor = (21, 20);
const TIER_2: Factor = (11, 10);
const TIER_3: Factor = (23, 20);

#[allow(clippy::too_many_arguments)]
const fn data(
    name: &'static str,
    style: PrayerStyle,
    accuracy: Option<Factor>,
    strength: Option<Factor>,
    defence: Option<Factor>,
    magic_damage_bonus: i32,
    drain_rate: i32,
    slots: u8,
) -> PrayerData {
    PrayerData {
        name,
        style,
        factor_accuracy: accuracy,
        factor_strength: strength,
        factor_defence: defence,
        magic_damage_bonus,
        drain_rate,
        slots,
    }
}

impl Prayer {
    pub fn data(self) -> PrayerData {
        use PrayerStyle as S;
        match self {
            Prayer::ThickSkin => data("Thick Skin", S::None, None, None, Some(TIER_1), 0, 1, DEFENCE),
            Prayer::BurstOfStrength => data("Burst of Strength", S::Melee, None, Some(TIER_1), None, 0, 1, STRENGTH),
            Prayer::ClarityOfThought => data("Clarity of Thought", S::Melee, Some(TIER_1), None, None, 0, 1, ATTACK),
            Prayer::SharpEye => data("Sharp Eye", S::Ranged, Some(TIER_1), Some(TIER_1), None, 0, 1, OFFENCE),
            Prayer::MysticWill => data("Mystic Will", S::Magic, Some(TIER_1), None, None, 0, 1, OFFENCE),
            Prayer::RockSkin => data("Rock Skin", S::None, None, None, Some(TIER_2), 0, 6, DEFENCE),
            Prayer::SuperhumanStrength => data("Superhuman Strength", S::Melee, None, Some(TIER_2), None, 0, 6, STRENGTH),
            Prayer::ImprovedReflexes => data("Improved Reflexes", S::Melee, Some(TIER_2), None, None, 0, 6, ATTACK),
            Prayer::HawkEye => data("Hawk Eye", S::Ranged, Some(TIER_2), Some(TIER_2), None, 0, 6, OFFENCE),
            Prayer::MysticLore => data("Mystic Lore", S::Magic, Some(TIER_2), None, None, 10, 6, OFFENCE),
            Prayer::SteelSkin => data("Steel Skin", S::None, None, None, Some(TIER_3), 0, 12, DEFENCE),
            Prayer::UltimateStrength => data("Ultimate Strength", S::Melee, None, Some(TIER_3), None, 0, 12, STRENGTH),
            Prayer::IncredibleReflexes => data("Incredible Reflexes", S::Melee, Some(TIER_3), None, None, 0, 12, ATTACK),
            Prayer::EagleEye => data("Eagle Eye", S::Ranged, Some(TIER_3), Some(TIER_3), None, 0, 12, OFFENCE),
            Prayer::MysticMight => data("Mystic Might", S::Magic, Some(TIER_3), None, None, 20, 12, OFFENCE),
            Prayer::ProtectFromMagic => data("Protect from Magic", S::None, None, None, None, 0, 12, OVERHEAD),
            Prayer::ProtectFromMissiles => data("Protect from Missiles", S::None, None, None, None, 0, 12, OVERHEAD),
            Prayer::ProtectFromMelee => data("Protect from Melee", S::None, None, None, None, 0, 12, OVERHEAD),
            Prayer::Chivalry => data("Chivalry", S::Melee, Some((23, 20)), Some((118, 100)), Some((6, 5)), 0, 24, OFFENCE | DEFENCE),
            Prayer::Piety => data("Piety", S::Melee, Some((6, 5)), Some((123, 100)), Some((5, 4)), 0, 24, OFFENCE | DEFENCE),
            Prayer::Rigour => data("Rigour", S::Ranged, Some((6, 5)), Some((123, 100)), Some((5, 4)), 0, 24, OFFENCE | DEFENCE),
            Prayer::Augury => data("Augury", S::Magic, Some((5, 4)), None, Some((5, 4)), 40, 24, OFFENCE | DEFENCE),
        }
    }

    /// Whether both prayers can be active at once
    pub fn conflicts_with(self, other: Prayer) -> bool {
        self != other && self.data().slots & other.data().slots != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piety_conflicts() {
        assert!(Prayer::Piety.conflicts_with(Prayer::SteelSkin));
        assert!(Prayer::Piety.conflicts_with(Prayer::Rigour));
        assert!(!Prayer::Piety.conflicts_with(Prayer::ProtectFromMelee));
        assert!(!Prayer::SteelSkin.conflicts_with(Prayer::UltimateStrength));
        assert!(!Prayer::UltimateStrength.conflicts_with(Prayer::IncredibleReflexes));
        assert!(!Prayer::BurstOfStrength.conflicts_with(Prayer::ImprovedReflexes));
    }

    #[test]
    fn test_melee_prayers_conflict_with_other_styles() {
        assert!(Prayer::UltimateStrength.conflicts_with(Prayer::EagleEye));
        assert!(Prayer::IncredibleReflexes.conflicts_with(Prayer::MysticMight));
        assert!(Prayer::SharpEye.conflicts_with(Prayer::MysticMight));
        assert!(Prayer::UltimateStrength.conflicts_with(Prayer::SuperhumanStrength));
    }

    #[test]
    fn test_overheads_are_exclusive() {
        assert!(Prayer::ProtectFromMagic.conflicts_with(Prayer::ProtectFromMelee));
    }

    #[test]
    fn test_drain_rates() {
        let total: i32 = [Prayer::SteelSkin, Prayer::SuperhumanStrength, Prayer::ImprovedReflexes]
            .iter()
            .map(|p| p.data().drain_rate)
            .sum();
        assert_eq!(total, 24);
        assert_eq!(Prayer::Piety.data().drain_rate, 24);
    }
}
