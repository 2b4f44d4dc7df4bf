//! Prelude module for convenient imports
//!
//! ```rust
//! use dps_core::prelude::*;
//! ```

// Calculators
pub use crate::calc::{CalcOpts, CalcResult, DamageTaken, NpcVsPlayerCalc, PlayerVsNpcCalc, UserIssueType};

// Distributions
pub use crate::dist::{AttackDistribution, HitDistribution, Hitsplat, TransformOpts, WeightedHit};

// Inputs
pub use crate::types::{
    Buffs, CombatStyle, EquipmentCategory, EquipmentPiece, EquipmentSlot, Monster, MonsterAttribute,
    MonsterInputs, MonsterStyle, Player, Potion, Prayer, Skills, Spell, Spellbook, Stance, StyleType,
};

// Config
pub use crate::config::{DataSource, EngineConstants};

// Errors
pub use crate::error::CalcError;
