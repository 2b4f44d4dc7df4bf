//! Engine constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunable engine constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConstants {
    #[serde(default)]
    pub timing: TimingConstants,
    #[serde(default)]
    pub ttk: TtkConstants,
    #[serde(default)]
    pub spec: SpecConstants,
}

impl EngineConstants {
    /// Constants shipped with the crate
    pub fn builtin() -> Self {
        let toml = include_str!("../../config/engine.toml");
        super::parse_toml::<EngineConstants>(toml)
            .and_then(|c| c.validate().map(|_| c))
            .unwrap_or_default()
    }

    /// Reject values the calculators cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.seconds_per_tick <= 0.0 {
            return Err(ConfigError::ValidationError(
                "timing.seconds_per_tick must be positive".to_string(),
            ));
        }
        if self.timing.default_attack_speed == 0 {
            return Err(ConfigError::ValidationError(
                "timing.default_attack_speed must be at least one tick".to_string(),
            ));
        }
        if self.ttk.max_iter_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "ttk.max_iter_rounds must be non-zero".to_string(),
            ));
        }
        if !(self.ttk.epsilon > 0.0 && self.ttk.epsilon < 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "ttk.epsilon must be in (0, 1), got {}",
                self.ttk.epsilon
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConstants {
    /// Length of one game tick
    #[serde(default = "default_seconds_per_tick")]
    pub seconds_per_tick: f64,
    /// Attack speed used when a weapon has none
    #[serde(default = "default_attack_speed")]
    pub default_attack_speed: u32,
}

impl Default for TimingConstants {
    fn default() -> Self {
        TimingConstants {
            seconds_per_tick: 0.6,
            default_attack_speed: 4,
        }
    }
}

fn default_seconds_per_tick() -> f64 {
    0.6
}
fn default_attack_speed() -> u32 {
    4
}

/// Cutoffs for the time-to-kill solver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtkConstants {
    #[serde(default = "default_max_iter_rounds")]
    pub max_iter_rounds: u32,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

impl Default for TtkConstants {
    fn default() -> Self {
        TtkConstants {
            max_iter_rounds: 1000,
            epsilon: 0.0001,
        }
    }
}

fn default_max_iter_rounds() -> u32 {
    1000
}
fn default_epsilon() -> f64 {
    0.0001
}

/// Special attack energy regeneration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecConstants {
    /// Ticks to regenerate 10% energy
    #[serde(default = "default_regen_ticks")]
    pub regen_ticks: u32,
    /// Regeneration ticks while wearing a Lightbearer
    #[serde(default = "default_lightbearer_regen_ticks")]
    pub lightbearer_regen_ticks: u32,
}

impl Default for SpecConstants {
    fn default() -> Self {
        SpecConstants {
            regen_ticks: 50,
            lightbearer_regen_ticks: 25,
        }
    }
}

fn default_regen_ticks() -> u32 {
    50
}
fn default_lightbearer_regen_ticks() -> u32 {
    25
}
