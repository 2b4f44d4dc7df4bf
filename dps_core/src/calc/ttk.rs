//! Time-to-kill solver
//!
//! Tracks the probability of every remaining-hitpoints value at the tick of
//! the next attack. A branch's mass is always filed under its own next-attack
//! tick, so timelines that took different attack delays are never merged
//! even when they share a hitpoint value.

use crate::config::TtkConstants;
use crate::dist::DelayedHit;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// The delayed hits to use for each remaining-hitpoints value
#[derive(Debug, Clone, Copy)]
pub enum HitsByHp<'a> {
    /// One distribution regardless of hitpoints
    Shared(&'a [DelayedHit]),
    /// Indexed by remaining hitpoints, `0..=start_hp`; higher hp reuses the last row
    PerHp(&'a [Vec<DelayedHit>]),
}

impl<'a> HitsByHp<'a> {
    fn at(&self, hp: usize) -> &'a [DelayedHit] {
        match self {
            HitsByHp::Shared(hits) => hits,
            // hp past the end of the table uses the last row
            HitsByHp::PerHp(by_hp) => match by_hp.len() {
                0 => &[],
                len => by_hp[hp.min(len - 1)].as_slice(),
            },
        }
    }
}

/// Probability of the kill landing on each tick
///
/// The first attack happens on tick 1. Solving stops once the unresolved
/// mass drops below `constants.epsilon` or the tick passes
/// `constants.max_iter_rounds * attack_speed`; the result may then sum to
/// slightly less than 1.
pub fn ttk_distribution(
    start_hp: i32,
    attack_speed: u32,
    hits: HitsByHp<'_>,
    constants: &TtkConstants,
) -> BTreeMap<u32, f64> {
    let mut ttks: BTreeMap<u32, f64> = BTreeMap::new();
    if start_hp <= 0 {
        return ttks;
    }

    let width = start_hp as usize + 1;
    let iter_max = constants.max_iter_rounds.saturating_mul(attack_speed.max(1));

    // remaining-hp mass, keyed by the tick of the next attack
    let mut pending: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    let mut first = vec![0.0; width];
    first[start_hp as usize] = 1.0;
    pending.insert(1, first);

    let mut epsilon = 1.0;
    let mut last_tick = 0;

    while let Some((tick, row)) = pending.pop_first() {
        if tick > iter_max || epsilon < constants.epsilon {
            break;
        }
        last_tick = tick;

        for (hp, &hp_prob) in row.iter().enumerate() {
            if hp_prob == 0.0 {
                continue;
            }

            for (wh, delay) in hits.at(hp) {
                let chance = wh.probability * hp_prob;
                if chance == 0.0 {
                    continue;
                }

                let new_hp = hp as i32 - wh.sum();
                if new_hp <= 0 {
                    *ttks.entry(tick).or_insert(0.0) += chance;
                    epsilon -= chance;
                } else {
                    let next = tick + (*delay).max(1);
                    pending.entry(next).or_insert_with(|| vec![0.0; width])[new_hp as usize] += chance;
                }
            }
        }
    }

    if epsilon >= constants.epsilon {
        warn!(
            ticks = last_tick,
            residual = epsilon,
            cap = iter_max,
            "time-to-kill solver stopped with unresolved probability"
        );
    }
    debug!(ticks = last_tick, residual = epsilon, outcomes = ttks.len(), "time-to-kill solved");

    ttks
}

/// Expected number of attacks to kill, from a damage histogram indexed by damage
pub fn hits_to_kill(pmf: &[f64], start_hp: i32) -> f64 {
    let max_dmg = pmf.len().saturating_sub(1) as i32;
    let max = start_hp.min(max_dmg);
    if max <= 0 {
        return 0.0;
    }

    let miss = pmf.first().copied().unwrap_or(0.0);
    let start = start_hp as usize;
    let mut htk = vec![0.0; start + 1];
    for hp in 1..=start {
        let mut val = 1.0;
        for hit in 1..=(hp.min(max as usize)) {
            val += pmf[hit] * htk[hp - hit];
        }
        htk[hp] = val / (1.0 - miss);
    }
    htk[start]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::{Hitsplat, HitDistribution, WeightedHit};

    fn constants() -> TtkConstants {
        TtkConstants {
            max_iter_rounds: 1000,
            epsilon: 0.0001,
        }
    }

    fn coin_flip(speed: u32) -> Vec<DelayedHit> {
        let dist = HitDistribution::linear(0.5, 1, 1);
        dist.with_probabilistic_delays(&move |_: &WeightedHit| vec![(1.0, speed)])
    }

    #[test]
    fn test_one_shot() {
        let hits = vec![(WeightedHit::new(1.0, vec![Hitsplat::new(10)]), 4)];
        let ttk = ttk_distribution(5, 4, HitsByHp::Shared(&hits), &constants());
        assert_eq!(ttk.len(), 1);
        assert_eq!(ttk.get(&1), Some(&1.0));
    }

    #[test]
    fn test_fixed_speed_mass_and_ticks() {
        let hits = coin_flip(4);
        let ttk = ttk_distribution(2, 4, HitsByHp::Shared(&hits), &constants());
        // kills only happen on attack ticks
        assert!(ttk.keys().all(|t| (t - 1) % 4 == 0));
        let total: f64 = ttk.values().sum();
        assert!(total > 1.0 - 0.001 && total <= 1.0 + 1e-9);
        // two hits in a row
        assert!((ttk[&5] - 0.25).abs() < 1e-12);
    }

    fn assert_close(ttk: &BTreeMap<u32, f64>, expected: &[(u32, f64)]) {
        for &(tick, p) in expected {
            let got = ttk.get(&tick).copied().unwrap_or(0.0);
            assert!((got - p).abs() < 0.005, "tick {}: expected {}, got {}", tick, p, got);
        }
    }

    #[test]
    fn test_accuracy_dependent_delays() {
        // a landed hit is followed by a 3 tick attack, a miss by a 4 tick one
        let dist = HitDistribution::new(vec![
            WeightedHit::new(0.5, vec![Hitsplat::INACCURATE]),
            WeightedHit::new(0.5, vec![Hitsplat::new(1)]),
        ]);
        let hits = dist.with_probabilistic_delays(&|wh: &WeightedHit| {
            vec![(1.0, if wh.any_accurate() { 3 } else { 4 })]
        });

        let two = ttk_distribution(2, 4, HitsByHp::Shared(&hits), &constants());
        assert_close(
            &two,
            &[
                (4, 0.2500323),
                (8, 0.2499614),
                (12, 0.1875178),
                (16, 0.1250477),
                (20, 0.0781260),
                (24, 0.0468598),
                (28, 0.0273283),
                (32, 0.0156107),
            ],
        );

        let three = ttk_distribution(3, 4, HitsByHp::Shared(&hits), &constants());
        assert_close(
            &three,
            &[
                (7, 0.1252002),
                (11, 0.1873703),
                (15, 0.1875431),
                (19, 0.1563541),
                (23, 0.1172253),
                (27, 0.0819964),
                (31, 0.0545925),
                (35, 0.0351271),
                (39, 0.0219353),
                (43, 0.0134112),
                (47, 0.0080274),
            ],
        );
    }

    #[test]
    fn test_zero_damage_never_kills() {
        let hits = vec![(WeightedHit::new(1.0, vec![Hitsplat::INACCURATE]), 4)];
        let ttk = ttk_distribution(5, 4, HitsByHp::Shared(&hits), &constants());
        assert!(ttk.is_empty());
    }

    #[test]
    fn test_per_hp_hits() {
        // hp 2 takes 1, hp 1 always dies
        let by_hp = vec![
            vec![],
            vec![(WeightedHit::new(1.0, vec![Hitsplat::new(1)]), 2)],
            vec![(WeightedHit::new(1.0, vec![Hitsplat::new(1)]), 5)],
        ];
        let ttk = ttk_distribution(2, 2, HitsByHp::PerHp(&by_hp), &constants());
        assert_eq!(ttk.get(&6), Some(&1.0));
    }

    #[test]
    fn test_per_hp_table_shorter_than_hp() {
        // rows only for hp 0 and 1; hp 3 and 2 fall back to the hp 1 row
        let by_hp = vec![vec![], vec![(WeightedHit::new(1.0, vec![Hitsplat::new(1)]), 2)]];
        let ttk = ttk_distribution(3, 2, HitsByHp::PerHp(&by_hp), &constants());
        assert_eq!(ttk.get(&5), Some(&1.0));
        let total: f64 = ttk.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hits_to_kill() {
        // always hits exactly 1
        assert!((hits_to_kill(&[0.0, 1.0], 5) - 5.0).abs() < 1e-12);
        // half the attacks miss
        assert!((hits_to_kill(&[0.5, 0.5], 3) - 6.0).abs() < 1e-12);
        assert_eq!(hits_to_kill(&[1.0], 10), 0.0);
    }
}
