//! SetEffectSource - bonuses that depend on combinations of worn items

use super::gear::{ammo_applicability, AmmoApplicability};
use super::{BonusAccumulator, BonusSource};
use crate::config::ids;
use crate::types::{Monster, Player, Spellbook, Stance};

pub struct SetEffectSource<'a> {
    player: &'a Player,
    monster: &'a Monster,
}

impl<'a> SetEffectSource<'a> {
    pub fn new(player: &'a Player, monster: &'a Monster) -> Self {
        SetEffectSource { player, monster }
    }

    fn worn(&self, piece: &Option<crate::types::EquipmentPiece>, name: &str) -> bool {
        piece.as_ref().is_some_and(|p| p.name == name)
    }
}

impl BonusSource for SetEffectSource<'_> {
    fn id(&self) -> &str {
        "set_effects"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn apply(&self, acc: &mut BonusAccumulator) {
        let eq = &self.player.equipment;
        let style = &self.player.style;
        let casting = style.stance.is_some_and(Stance::is_cast);
        let totals = &mut acc.bonuses;

        if self.worn(&eq.weapon, "Tumeken's shadow") && !style.is_stance(Stance::ManualCast) {
            let factor = if ids::is_toa_monster(self.monster.id) { 4 } else { 3 };
            totals.bonuses.magic_str *= factor;
            totals.offensive.magic *= factor;
        }

        if self.worn(&eq.weapon, "Dinh's bulwark") || self.worn(&eq.weapon, "Dinh's blazing bulwark") {
            let d = &totals.defensive;
            let defence_sum = d.stab + d.slash + d.crush + d.ranged;
            totals.bonuses.str += ((defence_sum - 800) / 12 - 38).max(0);
        }

        let ancient = self
            .player
            .spell
            .as_ref()
            .is_some_and(|s| s.spellbook == Spellbook::Ancient);
        if ancient && casting {
            let virtus = [&eq.head, &eq.body, &eq.legs]
                .into_iter()
                .filter(|p| p.as_ref().is_some_and(|p| p.name.contains("Virtus")))
                .count() as i32;
            totals.bonuses.magic_str += 30 * virtus;
        }

        if self.worn(&eq.head, "Void mage helm")
            && self.worn(&eq.body, "Elite void top")
            && self.worn(&eq.legs, "Elite void robe")
            && self.worn(&eq.hands, "Void knight gloves")
        {
            totals.bonuses.magic_str += 50;
        }

        let quiver = eq.cape.as_ref().is_some_and(|c| {
            c.name == "Dizana's max cape"
                || c.name == "Blessed dizana's quiver"
                || (c.name == "Dizana's quiver" && c.version == "Charged")
        });
        if quiver && ammo_applicability(eq.weapon.as_ref(), eq.ammo.as_ref()) == AmmoApplicability::Included {
            totals.offensive.ranged += 10;
            totals.bonuses.ranged_str += 1;
        }
    }
}
