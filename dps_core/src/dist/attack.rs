//! Distributions for a whole attack, which may land several hitsplats

use super::distribution::{HitDistribution, TransformOpts};
use super::hitsplat::Hitsplat;
use std::collections::BTreeMap;

/// One bar of a damage histogram
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntry {
    pub name: String,
    pub value: f64,
}

/// Independent hit distributions that together make up one attack
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttackDistribution {
    pub dists: Vec<HitDistribution>,
}

impl AttackDistribution {
    pub fn new(dists: Vec<HitDistribution>) -> Self {
        AttackDistribution { dists }
    }

    pub fn single(dist: HitDistribution) -> Self {
        AttackDistribution::new(vec![dist])
    }

    pub fn add_dist(&mut self, dist: HitDistribution) {
        self.dists.push(dist);
    }

    /// All constituent distributions combined into one
    pub fn zipped(&self) -> HitDistribution {
        let mut iter = self.dists.iter();
        match iter.next() {
            Some(first) => iter.fold(first.clone(), |acc, d| acc.zip(d)),
            None => HitDistribution::default(),
        }
    }

    /// Probability mass over the total damage of the attack
    pub fn single_hitsplat(&self) -> HitDistribution {
        self.zipped().cumulative()
    }

    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(&HitDistribution) -> HitDistribution,
    {
        AttackDistribution::new(self.dists.iter().map(f).collect())
    }

    pub fn transform<F>(&self, t: &F, opts: TransformOpts) -> Self
    where
        F: Fn(Hitsplat) -> HitDistribution,
    {
        self.map(|d| d.transform(t, opts))
    }

    pub fn flatten(&self) -> Self {
        self.map(HitDistribution::flatten)
    }

    pub fn scale_probability(&self, factor: f64) -> Self {
        self.map(|d| d.scale_probability(factor))
    }

    pub fn scale_damage(&self, factor: i32, divisor: i32) -> Self {
        self.map(|d| d.scale_damage(factor, divisor))
    }

    pub fn min(&self) -> i32 {
        self.dists.iter().map(HitDistribution::min).sum()
    }

    pub fn max(&self) -> i32 {
        self.dists.iter().map(HitDistribution::max).sum()
    }

    pub fn expected_damage(&self) -> f64 {
        self.dists.iter().map(HitDistribution::expected_hit).sum()
    }

    /// Damage histogram from 0 to the max hit, optionally without misses
    pub fn as_histogram(&self, hide_misses: bool) -> Vec<ChartEntry> {
        let dist = self.single_hitsplat();

        let mut by_damage: BTreeMap<i32, f64> = BTreeMap::new();
        for h in &dist.hits {
            if !hide_misses || h.any_accurate() {
                *by_damage.entry(h.sum()).or_insert(0.0) += h.probability;
            }
        }

        (0..=dist.max())
            .map(|dmg| ChartEntry {
                name: dmg.to_string(),
                value: by_damage.get(&dmg).copied().unwrap_or(0.0),
            })
            .collect()
    }

    /// Probability of each total damage value, indexed by damage
    pub fn damage_pmf(&self) -> Vec<f64> {
        self.as_histogram(false).into_iter().map(|e| e.value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::WeightedHit;

    #[test]
    fn test_two_hitsplats_sum_in_histogram() {
        let d = AttackDistribution::new(vec![
            HitDistribution::linear(1.0, 0, 1),
            HitDistribution::linear(1.0, 0, 1),
        ]);
        let hist = d.as_histogram(false);
        assert_eq!(hist.len(), 3);
        assert!((hist[0].value - 0.25).abs() < 1e-9);
        assert!((hist[1].value - 0.5).abs() < 1e-9);
        assert!((hist[2].value - 0.25).abs() < 1e-9);
        assert_eq!(hist[2].name, "2");
        assert_eq!(d.max(), 2);
        assert!((d.expected_damage() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_hides_misses() {
        let d = AttackDistribution::single(HitDistribution::linear(0.5, 0, 1));
        let all = d.as_histogram(false);
        let hits_only = d.as_histogram(true);
        assert!((all[0].value - 0.75).abs() < 1e-9);
        assert!((hits_only[0].value - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_empty_attack() {
        let d = AttackDistribution::default();
        assert_eq!(d.max(), 0);
        assert!(d.zipped().is_empty());
        assert!(d.expected_damage().abs() < f64::EPSILON);
    }

    #[test]
    fn test_scale_damage_maps_every_dist() {
        let d = AttackDistribution::new(vec![
            HitDistribution::new(vec![WeightedHit::new(1.0, vec![Hitsplat::new(10)])]),
            HitDistribution::new(vec![WeightedHit::new(1.0, vec![Hitsplat::new(3)])]),
        ]);
        assert_eq!(d.scale_damage(1, 2).max(), 6);
    }
}
