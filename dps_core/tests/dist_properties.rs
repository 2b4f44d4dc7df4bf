//! Invariants of the distribution algebra under arbitrary inputs

use dps_core::dist::transformers::{capped_reroll, division, flat_add, flat_limit, linear_min, multiply};
use dps_core::prelude::*;
use proptest::prelude::*;
use std::collections::HashSet;

const EPS: f64 = 1e-9;

fn linear() -> impl Strategy<Value = HitDistribution> {
    (0.01..=1.0f64, 0..20i32, 0..60i32).prop_map(|(acc, min, span)| HitDistribution::linear(acc, min, min + span))
}

proptest! {
    #[test]
    fn test_linear_mass_and_mean(acc in 0.0..=1.0f64, min in 0..30i32, span in 0..80i32) {
        let max = min + span;
        let d = HitDistribution::linear(acc, min, max);
        prop_assert!((d.total_probability() - 1.0).abs() < EPS);
        let mean = acc * (min + max) as f64 / 2.0;
        prop_assert!((d.expected_hit() - mean).abs() < 1e-6);
    }

    #[test]
    fn test_transformers_conserve_mass(
        d in linear(),
        num in 1..8i32,
        den in 1..8i32,
        minimum in 0..5i32,
        limit in 0..50i32,
        addend in -10..10i32,
    ) {
        let results = [
            d.transform(&multiply(num, den, minimum), TransformOpts::default()),
            d.transform(&division(den, minimum), TransformOpts::ACCURATE_ONLY),
            d.transform(&flat_limit(limit), TransformOpts::default()),
            d.transform(&flat_add(addend, 0), TransformOpts::ACCURATE_ONLY),
            d.transform(&linear_min(limit, minimum), TransformOpts::default()),
            d.transform(&capped_reroll(limit, 10, minimum), TransformOpts::default()),
        ];
        for t in &results {
            prop_assert!((t.total_probability() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_flat_limit_caps_damage(d in linear(), limit in 0..50i32) {
        let capped = d.transform(&flat_limit(limit), TransformOpts::default());
        prop_assert!(capped.max() <= limit);
        prop_assert!(capped.expected_hit() <= d.expected_hit() + EPS);
    }

    #[test]
    fn test_accurate_only_keeps_misses(d in linear(), addend in 1..10i32) {
        let miss = |h: &HitDistribution| -> f64 {
            h.hits.iter().filter(|w| !w.any_accurate()).map(|w| w.probability).sum()
        };
        let shifted = d.transform(&flat_add(addend, 0), TransformOpts::ACCURATE_ONLY);
        prop_assert!((miss(&shifted) - miss(&d)).abs() < EPS);
        prop_assert!(shifted.hits.iter().filter(|w| !w.any_accurate()).all(|w| w.sum() == 0));
    }

    #[test]
    fn test_flatten_merges_without_changing_moments(a in linear(), b in linear()) {
        let mut joined = a.clone();
        joined.hits.extend(b.hits.iter().cloned());
        let joined = joined.scale_probability(0.5);
        let flat = joined.flatten();

        prop_assert!((flat.total_probability() - joined.total_probability()).abs() < EPS);
        prop_assert!((flat.expected_hit() - joined.expected_hit()).abs() < 1e-6);
        let distinct: HashSet<_> = flat.hits.iter().map(|h| h.hitsplats.clone()).collect();
        prop_assert_eq!(distinct.len(), flat.len());
    }

    #[test]
    fn test_zip_is_additive(a in linear(), b in linear()) {
        let z = a.zip(&b);
        prop_assert!((z.total_probability() - 1.0).abs() < 1e-6);
        prop_assert!((z.expected_hit() - (a.expected_hit() + b.expected_hit())).abs() < 1e-6);
        prop_assert_eq!(z.max(), a.max() + b.max());
    }

    #[test]
    fn test_histogram_covers_every_total(a in linear(), b in linear()) {
        let attack = AttackDistribution::new(vec![a, b]);
        let pmf = attack.damage_pmf();
        prop_assert_eq!(pmf.len() as i32, attack.max() + 1);
        prop_assert!((pmf.iter().sum::<f64>() - 1.0).abs() < 1e-6);
        let mean: f64 = pmf.iter().enumerate().map(|(dmg, p)| dmg as f64 * p).sum();
        prop_assert!((mean - attack.expected_damage()).abs() < 1e-6);
    }

    #[test]
    fn test_scale_damage_truncates(d in linear(), num in 1..5i32, den in 1..5i32) {
        let scaled = d.scale_damage(num, den);
        prop_assert_eq!(scaled.max(), d.max() * num / den);
        prop_assert!((scaled.total_probability() - 1.0).abs() < EPS);
    }
}
