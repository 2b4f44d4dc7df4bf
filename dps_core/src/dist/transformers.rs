//! Reusable hitsplat transformers
//!
//! Each function returns a closure suitable for `HitDistribution::transform`.

use super::distribution::HitDistribution;
use super::hitsplat::{Hitsplat, WeightedHit};

fn certain(damage: i32, accurate: bool) -> HitDistribution {
    HitDistribution::new(vec![WeightedHit::new(1.0, vec![Hitsplat::with_accuracy(damage, accurate)])])
}

/// Cap damage at `maximum`
pub fn flat_limit(maximum: i32) -> impl Fn(Hitsplat) -> HitDistribution {
    move |h| certain(h.damage.min(maximum), h.accurate)
}

/// Cap damage at a uniform roll of `[offset, maximum + offset]`
pub fn linear_min(maximum: i32, offset: i32) -> impl Fn(Hitsplat) -> HitDistribution {
    move |h| {
        let prob = 1.0 / (maximum + 1) as f64;
        let hits = (0..=maximum)
            .map(|i| WeightedHit::new(prob, vec![Hitsplat::with_accuracy(h.damage.min(i + offset), h.accurate)]))
            .collect();
        HitDistribution::new(hits).flatten()
    }
}

/// Replace any hit above `limit` with a uniform roll of `[offset, roll_max + offset]`
pub fn capped_reroll(limit: i32, roll_max: i32, offset: i32) -> impl Fn(Hitsplat) -> HitDistribution {
    move |h| {
        if h.damage <= limit {
            return HitDistribution::new(vec![WeightedHit::new(1.0, vec![h])]);
        }
        let prob = 1.0 / (roll_max + 1) as f64;
        let hits = (0..=roll_max)
            .map(|i| WeightedHit::new(prob, vec![Hitsplat::with_accuracy(i + offset, h.accurate)]))
            .collect();
        HitDistribution::new(hits).flatten()
    }
}

/// Scale damage by `numerator / divisor`, truncating
///
/// With a non-zero `minimum`, a hit that started at or above it never drops
/// below it, and a hit that started below it is never reduced.
pub fn multiply(numerator: i32, divisor: i32, minimum: i32) -> impl Fn(Hitsplat) -> HitDistribution {
    move |h| {
        let mut dmg = (numerator as i64 * h.damage as i64 / divisor as i64) as i32;
        if minimum != 0 {
            dmg = if h.damage >= minimum {
                dmg.max(minimum)
            } else {
                dmg.max(h.damage)
            };
        }
        certain(dmg, h.accurate)
    }
}

pub fn division(divisor: i32, minimum: i32) -> impl Fn(Hitsplat) -> HitDistribution {
    multiply(1, divisor, minimum)
}

/// Add a flat amount, never going below `minimum`
pub fn flat_add(addend: i32, minimum: i32) -> impl Fn(Hitsplat) -> HitDistribution {
    move |h| certain((h.damage + addend).max(minimum), h.accurate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::TransformOpts;

    fn apply<F: Fn(Hitsplat) -> HitDistribution>(t: F, dmg: i32) -> i32 {
        t(Hitsplat::new(dmg)).hits[0].hitsplats[0].damage
    }

    #[test]
    fn test_multiply_truncates() {
        assert_eq!(apply(multiply(5, 4, 0), 5), 6);
        assert_eq!(apply(multiply(3, 2, 0), 3), 4);
    }

    #[test]
    fn test_multiply_minimum() {
        // started above the minimum: clamped up to it
        assert_eq!(apply(multiply(1, 5, 2), 3), 2);
        // started below the minimum: left alone
        assert_eq!(apply(multiply(1, 5, 2), 1), 1);
        assert_eq!(apply(multiply(1, 5, 2), 20), 4);
    }

    #[test]
    fn test_division() {
        assert_eq!(apply(division(3, 0), 10), 3);
        assert_eq!(apply(division(7, 1), 3), 1);
        assert_eq!(apply(division(7, 1), 0), 0);
    }

    #[test]
    fn test_flat_add_floor() {
        assert_eq!(apply(flat_add(-5, 1), 3), 1);
        assert_eq!(apply(flat_add(4, 0), 3), 7);
    }

    #[test]
    fn test_flat_limit() {
        assert_eq!(apply(flat_limit(10), 15), 10);
        assert_eq!(apply(flat_limit(10), 7), 7);
    }

    #[test]
    fn test_linear_min_shape() {
        let d = linear_min(2, 0)(Hitsplat::new(1));
        // min(1, 0), min(1, 1), min(1, 2)
        assert_eq!(d.len(), 2);
        assert!((d.hits[0].probability - 1.0 / 3.0).abs() < 1e-12);
        assert!((d.hits[1].probability - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_capped_reroll() {
        let t = capped_reroll(50, 5, 45);
        let low = t(Hitsplat::new(30));
        assert_eq!(low.len(), 1);
        let high = t(Hitsplat::new(70));
        assert_eq!(high.len(), 6);
        assert_eq!(high.min(), 45);
        assert_eq!(high.max(), 50);
    }

    #[test]
    fn test_transform_skips_inaccurate_when_asked() {
        let d = HitDistribution::linear(0.5, 0, 4);
        let t = d.transform(&flat_add(-3, 1), TransformOpts::ACCURATE_ONLY);
        assert!(t.hits.iter().any(|h| h.hitsplats[0] == Hitsplat::INACCURATE));
        assert_eq!(t.max(), 1);
    }
}
