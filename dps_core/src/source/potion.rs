//! PotionSource - temporary skill boosts from consumables
//!
//! Boosts don't stack: for each skill the largest change from the potions
//! that touch it wins. A brew drain stays in place unless another active
//! potion boosts that same skill.

use super::{BonusAccumulator, BonusSource};
use crate::types::{Potion, Skills};

pub struct PotionSource<'a> {
    potions: &'a [Potion],
    skills: &'a Skills,
}

impl<'a> PotionSource<'a> {
    pub fn new(potions: &'a [Potion], skills: &'a Skills) -> Self {
        PotionSource { potions, skills }
    }
}

/// Per-skill change from a single potion; `None` for skills it leaves alone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PotionBoost {
    pub atk: Option<i32>,
    pub str: Option<i32>,
    pub def: Option<i32>,
    pub ranged: Option<i32>,
    pub magic: Option<i32>,
}

impl PotionBoost {
    /// Fold another potion in, keeping the larger change for skills both touch
    fn merge(self, other: PotionBoost) -> PotionBoost {
        let pick = |a: Option<i32>, b: Option<i32>| match (a, b) {
            (Some(x), Some(y)) => Some(x.max(y)),
            (x, y) => x.or(y),
        };
        PotionBoost {
            atk: pick(self.atk, other.atk),
            str: pick(self.str, other.str),
            def: pick(self.def, other.def),
            ranged: pick(self.ranged, other.ranged),
            magic: pick(self.magic, other.magic),
        }
    }

    fn into_skills(self) -> Skills {
        Skills {
            atk: self.atk.unwrap_or(0),
            str: self.str.unwrap_or(0),
            def: self.def.unwrap_or(0),
            ranged: self.ranged.unwrap_or(0),
            magic: self.magic.unwrap_or(0),
            ..Skills::default()
        }
    }
}

/// Boost a single potion gives, given the base levels
pub fn potion_boost(potion: Potion, s: &Skills) -> PotionBoost {
    let pct = |lvl: i32, p: i32| lvl * p / 100;
    let brew_drain = |lvl: i32| Some(-(2 + pct(lvl, 10)));
    let mut b = PotionBoost::default();
    match potion {
        Potion::Attack => b.atk = Some(3 + pct(s.atk, 10)),
        Potion::Strength => b.str = Some(3 + pct(s.str, 10)),
        Potion::SuperAttack => b.atk = Some(5 + pct(s.atk, 15)),
        Potion::SuperStrength => b.str = Some(5 + pct(s.str, 15)),
        Potion::Ranging => b.ranged = Some(4 + pct(s.ranged, 10)),
        Potion::Magic => b.magic = Some(4),
        Potion::ImbuedHeart => b.magic = Some(1 + pct(s.magic, 10)),
        Potion::SaturatedHeart => b.magic = Some(4 + pct(s.magic, 10)),
        Potion::Overload => {
            b.atk = Some(6 + pct(s.atk, 16));
            b.str = Some(6 + pct(s.str, 16));
            b.def = Some(6 + pct(s.def, 16));
            b.ranged = Some(6 + pct(s.ranged, 16));
            b.magic = Some(6 + pct(s.magic, 16));
        }
        Potion::SmellingSalts => {
            b.atk = Some(11 + pct(s.atk, 16));
            b.str = Some(11 + pct(s.str, 16));
            b.def = Some(11 + pct(s.def, 16));
            b.ranged = Some(11 + pct(s.ranged, 16));
            b.magic = Some(11 + pct(s.magic, 16));
        }
        Potion::AncientBrew => {
            b.magic = Some(2 + pct(s.magic, 5));
            b.atk = brew_drain(s.atk);
            b.str = brew_drain(s.str);
            b.def = brew_drain(s.def);
        }
        Potion::ForgottenBrew => {
            b.magic = Some(3 + pct(s.magic, 8));
            b.atk = brew_drain(s.atk);
            b.str = brew_drain(s.str);
            b.def = brew_drain(s.def);
        }
    }
    b
}

impl BonusSource for PotionSource<'_> {
    fn id(&self) -> &str {
        "potions"
    }

    fn priority(&self) -> i32 {
        200
    }

    fn apply(&self, acc: &mut BonusAccumulator) {
        if self.potions.is_empty() {
            return;
        }
        let combined = self
            .potions
            .iter()
            .map(|p| potion_boost(*p, self.skills))
            .fold(PotionBoost::default(), PotionBoost::merge);
        acc.boosts = combined.into_skills();
    }
}
