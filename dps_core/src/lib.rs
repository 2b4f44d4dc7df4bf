//! dps_core - Combat outcome engine for a tick-based combat game
//!
//! This library provides:
//! - Hit distributions: exact discrete damage distributions and transforms
//! - Roll calculators: attack rolls, defence rolls, max hits and hit chance
//! - Monster scaling: raid, phase and defence-reduction adjustments
//! - Time-to-kill: per-tick kill probabilities from a hit distribution
//! - Calculators: player vs monster and monster vs player orchestration

pub mod calc;
pub mod config;
pub mod details;
pub mod dist;
pub mod error;
pub mod math;
pub mod prelude;
pub mod scaling;
pub mod source;
pub mod types;

// Re-export core types for convenience
pub use calc::{
    CalcOpts, CalcResult, DamageTaken, NpcVsPlayerCalc, Overrides, PlayerVsNpcCalc, SpecSupport, UserIssue,
    UserIssueType,
};
pub use config::{ConfigError, DataSource, EngineConstants};
pub use details::{DetailEntry, DetailKey, DetailValue};
pub use dist::{AttackDistribution, HitDistribution, Hitsplat, TransformOpts, WeightedHit};
pub use error::CalcError;
pub use scaling::{scale_monster, scale_monster_hp_only};
pub use types::{
    CombatStyle, Equipment, EquipmentCategory, EquipmentPiece, EquipmentSlot, Monster, MonsterAttribute, Player,
    Prayer, Spell, Stance, StyleType,
};
