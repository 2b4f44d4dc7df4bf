//! Single-hitsplat-sequence damage distributions

use super::hitsplat::{Hitsplat, WeightedHit};
use std::collections::HashMap;

/// Options for applying a hit transformer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOpts {
    /// Also run the transformer over inaccurate hitsplats
    pub transform_inaccurate: bool,
}

impl Default for TransformOpts {
    fn default() -> Self {
        TransformOpts {
            transform_inaccurate: true,
        }
    }
}

impl TransformOpts {
    pub const ACCURATE_ONLY: TransformOpts = TransformOpts {
        transform_inaccurate: false,
    };
}

/// `(probability, delay in ticks)` until the next attack
pub type ProbabilisticDelay = (f64, u32);

/// A hit merged down to one hitsplat, with the delay before the next attack
pub type DelayedHit = (WeightedHit, u32);

/// Maps an attack outcome onto the delays that can follow it
pub trait DelayProvider {
    fn delays(&self, hit: &WeightedHit) -> Vec<ProbabilisticDelay>;
}

impl<F> DelayProvider for F
where
    F: Fn(&WeightedHit) -> Vec<ProbabilisticDelay>,
{
    fn delays(&self, hit: &WeightedHit) -> Vec<ProbabilisticDelay> {
        self(hit)
    }
}

/// Exact discrete distribution over the outcomes of one attack roll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitDistribution {
    pub hits: Vec<WeightedHit>,
}

impl HitDistribution {
    pub fn new(hits: Vec<WeightedHit>) -> Self {
        HitDistribution { hits }
    }

    /// `accuracy` chance of exactly `hitsplats`, otherwise a miss
    pub fn single(accuracy: f64, hitsplats: Vec<Hitsplat>) -> Self {
        let mut d = HitDistribution::new(vec![WeightedHit::new(accuracy, hitsplats)]);
        if accuracy != 1.0 {
            d.add_hit(WeightedHit::new(1.0 - accuracy, vec![Hitsplat::INACCURATE]));
        }
        d
    }

    /// Uniform roll over `[min, max]` on an accurate hit, otherwise a miss
    pub fn linear(accuracy: f64, min: i32, max: i32) -> Self {
        let mut d = HitDistribution::default();
        let span = (max - min + 1).max(1);
        let hit_prob = accuracy / span as f64;
        for dmg in min..=max {
            d.add_hit(WeightedHit::new(hit_prob, vec![Hitsplat::new(dmg)]));
        }
        d.add_hit(WeightedHit::new(1.0 - accuracy, vec![Hitsplat::INACCURATE]));
        d
    }

    pub fn add_hit(&mut self, hit: WeightedHit) {
        self.hits.push(hit);
    }

    /// Cartesian product with hitsplats concatenated
    pub fn zip(&self, other: &HitDistribution) -> Self {
        let mut hits = Vec::with_capacity(self.hits.len() * other.hits.len());
        for a in &self.hits {
            for b in &other.hits {
                hits.push(a.zip(b));
            }
        }
        HitDistribution::new(hits)
    }

    pub fn transform<F>(&self, t: &F, opts: TransformOpts) -> Self
    where
        F: Fn(Hitsplat) -> HitDistribution,
    {
        let mut d = HitDistribution::default();
        for h in &self.hits {
            d.hits.extend(h.transform(t, opts).hits);
        }
        d.flatten()
    }

    pub fn scale_probability(&self, factor: f64) -> Self {
        HitDistribution::new(self.hits.iter().map(|h| h.scale(factor)).collect())
    }

    /// Multiply every hitsplat's damage by `factor / divisor`, truncating
    pub fn scale_damage(&self, factor: i32, divisor: i32) -> Self {
        HitDistribution::new(
            self.hits
                .iter()
                .map(|h| {
                    WeightedHit::new(
                        h.probability,
                        h.hitsplats
                            .iter()
                            .map(|s| {
                                let dmg = (s.damage as i64 * factor as i64 / divisor as i64) as i32;
                                Hitsplat::with_accuracy(dmg, s.accurate)
                            })
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    /// Merge outcomes with identical hitsplat sequences, dropping empty mass
    pub fn flatten(&self) -> Self {
        let mut index: HashMap<&[Hitsplat], usize> = HashMap::new();
        let mut merged: Vec<WeightedHit> = Vec::new();
        for hit in &self.hits {
            match index.get(hit.hitsplats.as_slice()) {
                Some(&i) => merged[i].probability += hit.probability,
                None => {
                    index.insert(hit.hitsplats.as_slice(), merged.len());
                    merged.push(hit.clone());
                }
            }
        }
        merged.retain(|h| h.probability > 0.0);
        HitDistribution::new(merged)
    }

    /// Collapse multi-hitsplat outcomes into one total per outcome
    ///
    /// An outcome counts as accurate if any of its hitsplats was. Accurate and
    /// inaccurate totals stay separate entries.
    pub fn cumulative(&self) -> Self {
        let mut index: HashMap<(bool, i32), usize> = HashMap::new();
        let mut merged: Vec<WeightedHit> = Vec::new();
        for hit in &self.hits {
            let key = (hit.any_accurate(), hit.sum());
            match index.get(&key) {
                Some(&i) => merged[i].probability += hit.probability,
                None => {
                    index.insert(key, merged.len());
                    merged.push(WeightedHit::new(
                        hit.probability,
                        vec![Hitsplat::with_accuracy(key.1, key.0)],
                    ));
                }
            }
        }
        merged.retain(|h| h.probability > 0.0);
        HitDistribution::new(merged)
    }

    pub fn expected_hit(&self) -> f64 {
        self.hits.iter().map(WeightedHit::expected_value).sum()
    }

    pub fn total_probability(&self) -> f64 {
        self.hits.iter().map(|h| h.probability).sum()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn min(&self) -> i32 {
        self.hits.iter().map(WeightedHit::sum).min().unwrap_or(0)
    }

    pub fn max(&self) -> i32 {
        self.hits.iter().map(WeightedHit::sum).max().unwrap_or(0)
    }

    /// Merge each outcome to one hitsplat and attach the delays that follow it
    ///
    /// Entries with the same total and delay are combined.
    pub fn with_probabilistic_delays<P>(&self, provider: &P) -> Vec<DelayedHit>
    where
        P: DelayProvider + ?Sized,
    {
        let mut index: HashMap<(i32, u32), usize> = HashMap::new();
        let mut merged: Vec<DelayedHit> = Vec::new();
        for wh in &self.hits {
            let total = wh.sum();
            for (probability, delay) in provider.delays(wh) {
                let p = wh.probability * probability;
                match index.get(&(total, delay)) {
                    Some(&i) => merged[i].0.probability += p,
                    None => {
                        index.insert((total, delay), merged.len());
                        merged.push((WeightedHit::new(p, vec![Hitsplat::new(total)]), delay));
                    }
                }
            }
        }
        merged
    }
}
