//! Claw special attack distributions
//!
//! Claw specials roll accuracy up to four (three for burning claws) times and
//! split the damage of the first successful roll across several hitsplats.

use super::attack::AttackDistribution;
use super::distribution::HitDistribution;
use super::hitsplat::{Hitsplat, WeightedHit};

/// `(chance per damage value, low, high)` for the roll that first succeeds
fn roll_totals(acc_roll: i32, total_rolls: i32, acc: f64, max: i32, high_offset: i32) -> (f64, i32, i32) {
    let low = max * (total_rolls - acc_roll) / 4;
    let high = max + low + high_offset;
    let previous_fail = (1.0 - acc).powi(acc_roll);
    let this_passes = previous_fail * acc;
    let per_damage = this_passes / (high - low + 1) as f64;
    (per_damage, low, high)
}

/// Dragon claws special attack
pub fn dragon_claw_spec(acc: f64, max: i32) -> AttackDistribution {
    let mut dist = HitDistribution::default();
    for acc_roll in 0..4 {
        let (chance, low, high) = roll_totals(acc_roll, 4, acc, max, -1);
        for dmg in low..=high {
            let splats = match acc_roll {
                0 => vec![
                    Hitsplat::new(dmg / 2),
                    Hitsplat::new(dmg / 4),
                    Hitsplat::new(dmg / 8),
                    Hitsplat::new(dmg / 8 + 1),
                ],
                1 => vec![
                    Hitsplat::new(dmg / 2),
                    Hitsplat::new(dmg / 4),
                    Hitsplat::new(dmg / 4 + 1),
                    Hitsplat::INACCURATE,
                ],
                2 => vec![
                    Hitsplat::new(dmg / 2),
                    Hitsplat::new(dmg / 2 + 1),
                    Hitsplat::INACCURATE,
                    Hitsplat::INACCURATE,
                ],
                _ => vec![
                    Hitsplat::new(dmg + 1),
                    Hitsplat::INACCURATE,
                    Hitsplat::INACCURATE,
                    Hitsplat::INACCURATE,
                ],
            };
            dist.add_hit(WeightedHit::new(chance, splats));
        }
    }

    let all_fail = (1.0 - acc).powi(4);
    dist.add_hit(WeightedHit::new(
        all_fail * 2.0 / 3.0,
        vec![
            Hitsplat::with_accuracy(1, false),
            Hitsplat::with_accuracy(1, false),
            Hitsplat::INACCURATE,
            Hitsplat::INACCURATE,
        ],
    ));
    dist.add_hit(WeightedHit::new(all_fail / 3.0, vec![Hitsplat::INACCURATE; 4]));
    AttackDistribution::single(dist)
}

/// Burning claws special attack
pub fn burning_claw_spec(acc: f64, max: i32) -> AttackDistribution {
    let mut dist = HitDistribution::default();
    for acc_roll in 0..3 {
        let (chance, low, high) = roll_totals(acc_roll, 3, acc, max, 0);
        for dmg in low..=high {
            let splats = match acc_roll {
                0 => vec![
                    Hitsplat::new(dmg / 2),
                    Hitsplat::new(dmg / 4),
                    Hitsplat::new(dmg / 4),
                ],
                1 => vec![
                    Hitsplat::new(dmg / 2 - 1),
                    Hitsplat::new(dmg / 2 - 1),
                    Hitsplat::new(2),
                ],
                _ => vec![Hitsplat::new(dmg - 2), Hitsplat::new(1), Hitsplat::new(1)],
            };
            dist.add_hit(WeightedHit::new(chance, splats));
        }
    }

    let all_fail = (1.0 - acc).powi(3);
    dist.add_hit(WeightedHit::new(all_fail / 5.0, vec![Hitsplat::INACCURATE; 3]));
    dist.add_hit(WeightedHit::new(
        2.0 * all_fail / 5.0,
        vec![Hitsplat::with_accuracy(1, false), Hitsplat::INACCURATE, Hitsplat::INACCURATE],
    ));
    dist.add_hit(WeightedHit::new(
        2.0 * all_fail / 5.0,
        vec![
            Hitsplat::with_accuracy(1, false),
            Hitsplat::with_accuracy(1, false),
            Hitsplat::INACCURATE,
        ],
    ));
    AttackDistribution::single(dist)
}

/// Expected burn damage from one burning claws special
///
/// Each of the three hitsplats may burn for 10 damage, more likely the later
/// the successful roll. This keeps the long-standing calculator behaviour of
/// weighting a 30 damage total per roll rather than per landed splat.
pub fn burning_claw_dot(acc: f64) -> f64 {
    (0..3)
        .map(|acc_roll| {
            let this_hits = (1.0 - acc).powi(acc_roll) * acc;
            let burn_chance = 0.15 * (acc_roll + 1) as f64;
            30.0 * this_hits * burn_chance
        })
        .sum()
}
