//! Hitsplats and weighted outcomes

use super::distribution::{HitDistribution, TransformOpts};

/// One unit of displayed damage
///
/// An inaccurate hitsplat conventionally carries zero damage, but an accurate
/// zero is a different outcome and is never merged with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hitsplat {
    pub damage: i32,
    pub accurate: bool,
}

impl Hitsplat {
    pub const INACCURATE: Hitsplat = Hitsplat {
        damage: 0,
        accurate: false,
    };

    /// An accurate hitsplat
    pub const fn new(damage: i32) -> Self {
        Hitsplat {
            damage,
            accurate: true,
        }
    }

    pub const fn with_accuracy(damage: i32, accurate: bool) -> Self {
        Hitsplat { damage, accurate }
    }

    pub fn transform<F>(self, t: &F, opts: TransformOpts) -> HitDistribution
    where
        F: Fn(Hitsplat) -> HitDistribution,
    {
        if !self.accurate && !opts.transform_inaccurate {
            return HitDistribution::new(vec![WeightedHit::new(1.0, vec![self])]);
        }
        t(self)
    }
}

/// A probability paired with the hitsplats of one outcome
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedHit {
    pub probability: f64,
    pub hitsplats: Vec<Hitsplat>,
}

impl WeightedHit {
    pub fn new(probability: f64, hitsplats: Vec<Hitsplat>) -> Self {
        WeightedHit {
            probability,
            hitsplats,
        }
    }

    pub fn scale(&self, factor: f64) -> Self {
        WeightedHit::new(self.probability * factor, self.hitsplats.clone())
    }

    /// Both outcomes happening together, hitsplats concatenated
    pub fn zip(&self, other: &WeightedHit) -> Self {
        let mut hitsplats = Vec::with_capacity(self.hitsplats.len() + other.hitsplats.len());
        hitsplats.extend_from_slice(&self.hitsplats);
        hitsplats.extend_from_slice(&other.hitsplats);
        WeightedHit::new(self.probability * other.probability, hitsplats)
    }

    /// Split off the first hitsplat, keeping the probability on the head
    pub fn shift(&self) -> (WeightedHit, WeightedHit) {
        let (head, tail) = self.hitsplats.split_at(self.hitsplats.len().min(1));
        (
            WeightedHit::new(self.probability, head.to_vec()),
            WeightedHit::new(1.0, tail.to_vec()),
        )
    }

    /// Transform each hitsplat independently and combine the results
    pub fn transform<F>(&self, t: &F, opts: TransformOpts) -> HitDistribution
    where
        F: Fn(Hitsplat) -> HitDistribution,
    {
        match self.hitsplats.as_slice() {
            [] => HitDistribution::new(vec![self.clone()]),
            [only] => only.transform(t, opts).scale_probability(self.probability),
            _ => {
                let (head, tail) = self.shift();
                head.transform(t, opts).zip(&tail.transform(t, opts))
            }
        }
    }

    pub fn any_accurate(&self) -> bool {
        self.hitsplats.iter().any(|h| h.accurate)
    }

    pub fn sum(&self) -> i32 {
        self.hitsplats.iter().map(|h| h.damage).sum()
    }

    pub fn expected_value(&self) -> f64 {
        self.probability * self.sum() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_concatenates() {
        let a = WeightedHit::new(0.5, vec![Hitsplat::new(3)]);
        let b = WeightedHit::new(0.4, vec![Hitsplat::INACCURATE]);
        let z = a.zip(&b);
        assert!((z.probability - 0.2).abs() < 1e-12);
        assert_eq!(z.hitsplats, vec![Hitsplat::new(3), Hitsplat::INACCURATE]);
        assert_eq!(z.sum(), 3);
        assert!(z.any_accurate());
    }

    #[test]
    fn test_shift() {
        let w = WeightedHit::new(0.3, vec![Hitsplat::new(1), Hitsplat::new(2), Hitsplat::new(3)]);
        let (head, tail) = w.shift();
        assert_eq!(head.hitsplats, vec![Hitsplat::new(1)]);
        assert!((head.probability - 0.3).abs() < 1e-12);
        assert_eq!(tail.hitsplats.len(), 2);
        assert!((tail.probability - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_accurate_zero_differs_from_miss() {
        assert_ne!(Hitsplat::new(0), Hitsplat::INACCURATE);
    }

    #[test]
    fn test_inaccurate_skipped_when_requested() {
        let double = |h: Hitsplat| {
            HitDistribution::single(1.0, vec![Hitsplat::with_accuracy(h.damage * 2, h.accurate)])
        };
        let miss = Hitsplat::with_accuracy(4, false);
        let kept = miss.transform(&double, TransformOpts { transform_inaccurate: false });
        assert_eq!(kept.hits[0].hitsplats, vec![miss]);
        let doubled = miss.transform(&double, TransformOpts::default());
        assert_eq!(doubled.hits[0].hitsplats[0].damage, 8);
    }
}
