//! GearSource - sums the bonuses of every worn piece

use super::{BonusAccumulator, BonusSource};
use crate::types::{Equipment, EquipmentPiece, EquipmentSlot};

/// Whether a weapon makes use of the worn ammunition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmoApplicability {
    /// The weapon fires this ammo, so its ranged bonuses count
    Included,
    /// The weapon needs no ammo; whatever is worn is irrelevant
    Allowed,
    /// The weapon needs ammo and this is not one of them
    Invalid,
}

pub fn ammo_applicability(weapon: Option<&EquipmentPiece>, ammo: Option<&EquipmentPiece>) -> AmmoApplicability {
    let Some(weapon) = weapon else {
        return AmmoApplicability::Allowed;
    };
    if weapon.compatible_ammo.is_empty() {
        return AmmoApplicability::Allowed;
    }
    match ammo {
        Some(a) if weapon.compatible_ammo.iter().any(|n| *n == a.name) => AmmoApplicability::Included,
        _ => AmmoApplicability::Invalid,
    }
}

pub struct GearSource<'a> {
    equipment: &'a Equipment,
}

impl<'a> GearSource<'a> {
    pub fn new(equipment: &'a Equipment) -> Self {
        GearSource { equipment }
    }
}

impl BonusSource for GearSource<'_> {
    fn id(&self) -> &str {
        "gear"
    }

    fn apply(&self, acc: &mut BonusAccumulator) {
        let ammo_counts = ammo_applicability(self.equipment.weapon.as_ref(), self.equipment.ammo.as_ref())
            == AmmoApplicability::Included;

        for piece in self.equipment.iter() {
            let mut offensive = piece.offensive;
            let mut bonuses = piece.bonuses;
            if piece.slot == EquipmentSlot::Ammo && !ammo_counts {
                offensive.ranged = 0;
                bonuses.ranged_str = 0;
            }
            acc.bonuses.offensive += offensive;
            acc.bonuses.defensive += piece.defensive;
            acc.bonuses.bonuses += bonuses;
        }

        if let Some(dart) = self.equipment.weapon.as_ref().and_then(|w| w.dart.as_deref()) {
            acc.bonuses.bonuses.ranged_str += dart.bonuses.ranged_str;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OtherBonuses, StyleBonuses};

    fn bow() -> EquipmentPiece {
        let mut bow = EquipmentPiece::named("Twisted bow", EquipmentSlot::Weapon);
        bow.offensive.ranged = 70;
        bow.bonuses.ranged_str = 20;
        bow.compatible_ammo = vec!["Dragon arrow".to_string()];
        bow
    }

    fn arrow(name: &str) -> EquipmentPiece {
        let mut a = EquipmentPiece::named(name, EquipmentSlot::Ammo);
        a.bonuses = OtherBonuses {
            ranged_str: 60,
            ..Default::default()
        };
        a.defensive = StyleBonuses {
            stab: 1,
            ..Default::default()
        };
        a
    }

    fn total(equipment: &Equipment) -> BonusAccumulator {
        let mut acc = BonusAccumulator::default();
        GearSource::new(equipment).apply(&mut acc);
        acc
    }

    #[test]
    fn test_applicability() {
        let bow = bow();
        assert_eq!(ammo_applicability(Some(&bow), Some(&arrow("Dragon arrow"))), AmmoApplicability::Included);
        assert_eq!(ammo_applicability(Some(&bow), Some(&arrow("Bronze bolts"))), AmmoApplicability::Invalid);
        assert_eq!(ammo_applicability(Some(&bow), None), AmmoApplicability::Invalid);
        assert_eq!(ammo_applicability(None, Some(&arrow("Dragon arrow"))), AmmoApplicability::Allowed);
    }

    #[test]
    fn test_unused_ammo_ranged_stats_skipped() {
        let mut equipment = Equipment::default();
        equipment.equip(bow());
        equipment.equip(arrow("Dragon arrow"));
        assert_eq!(total(&equipment).bonuses.bonuses.ranged_str, 80);

        equipment.equip(arrow("Bronze bolts"));
        let acc = total(&equipment);
        assert_eq!(acc.bonuses.bonuses.ranged_str, 20);
        // defensive stats of ammo always count
        assert_eq!(acc.bonuses.defensive.stab, 1);
    }

    #[test]
    fn test_blowpipe_dart_strength() {
        let mut pipe = EquipmentPiece::named("Toxic blowpipe", EquipmentSlot::Weapon);
        pipe.bonuses.ranged_str = 20;
        let mut dart = EquipmentPiece::named("Dragon dart", EquipmentSlot::Weapon);
        dart.bonuses.ranged_str = 35;
        pipe.dart = Some(Box::new(dart));

        let mut equipment = Equipment::default();
        equipment.equip(pipe);
        assert_eq!(total(&equipment).bonuses.bonuses.ranged_str, 55);
    }
}
