//! Enchanted crossbow bolt effects
//!
//! Each effect replaces the standard single-roll distribution with a mix of
//! the normal roll and the proc outcome. Ruby bolts run separately, after the
//! accurate-zero raise and the Corporeal Beast halving, since their damage
//! is a share of the target's current hitpoints.

use crate::dist::{HitDistribution, Hitsplat, WeightedHit};
use crate::math::apply_factor;
use crate::types::{Monster, MonsterAttribute};

/// Everything a bolt effect depends on
#[derive(Debug, Clone, Copy)]
pub struct BoltContext<'a> {
    pub ranged_level: i32,
    pub accuracy: f64,
    pub max_hit: i32,
    pub zaryte: bool,
    pub spec: bool,
    pub kandarin_diary: bool,
    pub monster: &'a Monster,
}

impl BoltContext<'_> {
    fn chance(&self, base: f64) -> f64 {
        if self.zaryte && self.spec {
            1.0
        } else if self.kandarin_diary {
            base * 1.1
        } else {
            base
        }
    }
}

/// Which enchanted bolt is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bolt {
    Opal,
    Pearl,
    Diamond,
    Dragonstone,
    Onyx,
    Ruby,
}

impl Bolt {
    pub fn from_ammo(name: &str) -> Option<Bolt> {
        let bolt = match name {
            "Opal bolts (e)" | "Opal dragon bolts (e)" => Bolt::Opal,
            "Pearl bolts (e)" | "Pearl dragon bolts (e)" => Bolt::Pearl,
            "Diamond bolts (e)" | "Diamond dragon bolts (e)" => Bolt::Diamond,
            "Dragonstone bolts (e)" | "Dragonstone dragon bolts (e)" => Bolt::Dragonstone,
            "Onyx bolts (e)" | "Onyx dragon bolts (e)" => Bolt::Onyx,
            "Ruby bolts (e)" | "Ruby dragon bolts (e)" => Bolt::Ruby,
            _ => return None,
        };
        Some(bolt)
    }
}

fn mix(standard: &HitDistribution, chance: f64, effect: HitDistribution) -> HitDistribution {
    let mut hits = standard.scale_probability(1.0 - chance).hits;
    hits.extend(effect.hits);
    HitDistribution::new(hits)
}

/// The bolt's distribution, or `None` when it has no effect here
///
/// Ruby bolts are handled by `ruby_bolts`.
pub fn bolt_distribution(bolt: Bolt, ctx: &BoltContext, standard: &HitDistribution) -> Option<HitDistribution> {
    let max = ctx.max_hit;
    let attrs = &ctx.monster.attributes;

    let dist = match bolt {
        Bolt::Opal => {
            let chance = ctx.chance(0.05);
            let bonus = ctx.ranged_level / if ctx.zaryte { 9 } else { 10 };
            mix(standard, chance, HitDistribution::linear(1.0, bonus, max + bonus).scale_probability(chance))
        }
        Bolt::Pearl => {
            let chance = ctx.chance(0.06);
            let divisor = if attrs.contains(&MonsterAttribute::Fiery) { 15 } else { 20 };
            let bonus = ctx.ranged_level / if ctx.zaryte { divisor - 2 } else { divisor };
            mix(standard, chance, HitDistribution::linear(1.0, bonus, max + bonus).scale_probability(chance))
        }
        Bolt::Diamond => {
            let chance = ctx.chance(0.1);
            let effect_max = max + apply_factor(max, (if ctx.zaryte { 26 } else { 15 }, 100));
            mix(standard, chance, HitDistribution::linear(1.0, 0, effect_max).scale_probability(chance))
        }
        Bolt::Dragonstone => {
            // fiery dragons shrug off dragonfire
            if attrs.contains(&MonsterAttribute::Fiery) && attrs.contains(&MonsterAttribute::Dragon) {
                return None;
            }
            let chance = ctx.chance(0.06);
            let effect = ctx.ranged_level * 2 / if ctx.zaryte { 9 } else { 10 };
            mix(
                standard,
                chance,
                HitDistribution::linear(ctx.accuracy, effect, max + effect).scale_probability(chance),
            )
        }
        Bolt::Onyx => {
            if attrs.contains(&MonsterAttribute::Undead) {
                return None;
            }
            let chance = ctx.chance(0.11);
            let effect_max = apply_factor(max, (if ctx.zaryte { 132 } else { 120 }, 100));
            let mut effect = HitDistribution::linear(1.0, 0, effect_max).scale_probability(ctx.accuracy * chance);
            effect.add_hit(WeightedHit::new((1.0 - ctx.accuracy) * chance, vec![Hitsplat::INACCURATE]));
            mix(standard, chance, effect)
        }
        Bolt::Ruby => return None,
    };
    Some(dist)
}

/// Ruby bolts: a share of current hitpoints, landing regardless of max hit
pub fn ruby_bolts(ctx: &BoltContext, current: &HitDistribution) -> HitDistribution {
    let chance = ctx.chance(0.06);
    let hp = ctx.monster.inputs.monster_current_hp;
    let effect = if ctx.zaryte {
        apply_factor(hp, (22, 100)).min(110)
    } else {
        (hp / 5).min(100)
    };

    let mut dist = current.scale_probability(1.0 - chance);
    dist.add_hit(WeightedHit::new(chance * ctx.accuracy, vec![Hitsplat::new(effect)]));
    dist.add_hit(WeightedHit::new(
        chance * (1.0 - ctx.accuracy),
        vec![Hitsplat::with_accuracy(effect, false)],
    ));
    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(monster: &Monster) -> BoltContext<'_> {
        BoltContext {
            ranged_level: 99,
            accuracy: 0.8,
            max_hit: 40,
            zaryte: false,
            spec: false,
            kandarin_diary: false,
            monster,
        }
    }

    #[test]
    fn test_from_ammo() {
        assert_eq!(Bolt::from_ammo("Ruby dragon bolts (e)"), Some(Bolt::Ruby));
        assert_eq!(Bolt::from_ammo("Runite bolts"), None);
    }

    #[test]
    fn test_opal_bonus_damage() {
        let monster = Monster::default();
        let c = ctx(&monster);
        let standard = HitDistribution::linear(c.accuracy, 0, c.max_hit);
        let d = bolt_distribution(Bolt::Opal, &c, &standard).unwrap();
        assert!((d.total_probability() - 1.0).abs() < 1e-9);
        // 99 / 10 = 9 bonus on top of the max
        assert_eq!(d.max(), 49);
    }

    #[test]
    fn test_kandarin_diary_raises_chance() {
        let monster = Monster::default();
        let mut c = ctx(&monster);
        c.kandarin_diary = true;
        assert!((c.chance(0.1) - 0.11).abs() < 1e-12);
        c.zaryte = true;
        c.spec = true;
        assert_eq!(c.chance(0.1), 1.0);
    }

    #[test]
    fn test_onyx_ignored_by_undead() {
        let monster = Monster {
            attributes: vec![MonsterAttribute::Undead],
            ..Default::default()
        };
        let c = ctx(&monster);
        let standard = HitDistribution::linear(c.accuracy, 0, c.max_hit);
        assert!(bolt_distribution(Bolt::Onyx, &c, &standard).is_none());
    }

    #[test]
    fn test_ruby_caps_at_100() {
        let mut monster = Monster::default();
        monster.inputs.monster_current_hp = 2000;
        let c = ctx(&monster);
        let standard = HitDistribution::linear(c.accuracy, 0, c.max_hit);
        let d = ruby_bolts(&c, &standard);
        assert_eq!(d.max(), 100);
        assert!((d.total_probability() - 1.0).abs() < 1e-9);
    }
}
