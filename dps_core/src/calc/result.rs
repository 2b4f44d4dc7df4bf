//! CalcResult - Summary of one loadout against one monster

use super::base::UserIssue;
use serde::{Deserialize, Serialize};

/// Every headline number for a player attacking a monster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcResult {
    /// Loadout the result belongs to
    pub loadout: String,

    // === Rolls ===
    pub max_attack_roll: i32,
    pub npc_defence_roll: i32,
    pub min_hit: i32,
    pub max_hit: i32,
    /// Chance for a single roll to land
    pub accuracy: f64,

    // === Damage ===
    /// Expected damage of one attack
    pub expected_hit: f64,
    /// Expected ticks between attacks
    pub attack_speed: f64,
    pub dpt: f64,
    pub dps: f64,

    // === Kill ===
    /// Expected attacks to kill from the monster's current hitpoints
    pub htk: f64,
    /// Expected seconds to kill
    pub ttk: f64,

    // === Special Attack ===
    /// Special attack expected hit, when the weapon's special is modelled
    pub spec_expected_hit: Option<f64>,
    pub spec_max_hit: Option<i32>,
    pub spec_accuracy: Option<f64>,
    /// Special attack damage per second of regenerated energy
    pub spec_dps: Option<f64>,
    /// Expected burn damage following a burning claws special
    pub spec_burn_damage: Option<f64>,

    // === Prayer ===
    /// Ticks the active prayers last; `None` when nothing drains
    pub prayer_ticks: Option<f64>,

    // === Diagnostics ===
    pub user_issues: Vec<UserIssue>,
}

impl Default for CalcResult {
    fn default() -> Self {
        CalcResult {
            loadout: String::new(),
            max_attack_roll: 0,
            npc_defence_roll: 0,
            min_hit: 0,
            max_hit: 0,
            accuracy: 0.0,
            expected_hit: 0.0,
            attack_speed: 0.0,
            dpt: 0.0,
            dps: 0.0,
            htk: 0.0,
            ttk: 0.0,
            spec_expected_hit: None,
            spec_max_hit: None,
            spec_accuracy: None,
            spec_dps: None,
            spec_burn_damage: None,
            prayer_ticks: None,
            user_issues: Vec::new(),
        }
    }
}

impl CalcResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the loadout can damage the monster at all
    pub fn can_damage(&self) -> bool {
        self.expected_hit > 0.0
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        if !self.can_damage() {
            return format!("{}: no damage", self.loadout);
        }

        let mut parts = vec![
            format!("max hit {}", self.max_hit),
            format!("{:.2}% accuracy", self.accuracy * 100.0),
            format!("{:.3} dps", self.dps),
            format!("{:.1}s to kill", self.ttk),
        ];

        if let Some(spec_dps) = self.spec_dps {
            parts.push(format!("{:.3} spec dps", spec_dps));
        }

        if !self.user_issues.is_empty() {
            parts.push(format!("{} issue(s)", self.user_issues.len()));
        }

        format!("{}: {}", self.loadout, parts.join(", "))
    }
}

/// Expected damage a player takes from a monster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DamageTaken {
    /// The monster's attacks can be modelled
    Expected {
        /// Damage per second while the monster attacks
        dps: f64,
        /// Damage taken over one average kill
        per_kill: f64,
    },
    /// Typeless or otherwise non-standard attacks
    Unavailable,
}

impl DamageTaken {
    pub fn per_kill(&self) -> Option<f64> {
        match self {
            DamageTaken::Expected { per_kill, .. } => Some(*per_kill),
            DamageTaken::Unavailable => None,
        }
    }

    pub fn dps(&self) -> Option<f64> {
        match self {
            DamageTaken::Expected { dps, .. } => Some(*dps),
            DamageTaken::Unavailable => None,
        }
    }
}
