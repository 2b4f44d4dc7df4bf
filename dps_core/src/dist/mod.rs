//! Hit distribution algebra
//!
//! A `HitDistribution` is an exact discrete distribution over the hitsplats a
//! single roll can produce. An `AttackDistribution` groups the independent
//! rolls that make up one attack.

mod attack;
pub mod claws;
mod distribution;
mod hitsplat;
pub mod transformers;

pub use attack::{AttackDistribution, ChartEntry};
pub use distribution::{DelayProvider, DelayedHit, HitDistribution, ProbabilisticDelay, TransformOpts};
pub use hitsplat::{Hitsplat, WeightedHit};
