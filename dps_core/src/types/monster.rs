//! Monster definitions and per-scenario inputs

use super::attributes::MonsterAttribute;
use super::spell::SpellElement;
use super::style::StyleType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterSkills {
    pub atk: i32,
    pub str: i32,
    pub def: i32,
    pub magic: i32,
    pub ranged: i32,
    pub hp: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterOffensive {
    pub atk: i32,
    pub str: i32,
    pub magic: i32,
    pub ranged: i32,
    pub ranged_str: i32,
    pub magic_str: i32,
}

/// Defensive bonuses; ranged defence is split by ammunition weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterDefensive {
    pub stab: i32,
    pub slash: i32,
    pub crush: i32,
    pub magic: i32,
    pub light: i32,
    pub standard: i32,
    pub heavy: i32,
    /// Flat damage reduction applied to every accurate hit
    pub flat_armour: i32,
}

/// Elemental weakness to standard spellbook spells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weakness {
    pub element: SpellElement,
    /// Percentage of the base spell max hit added on a matching element
    pub severity: i32,
}

/// How the monster attacks the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonsterStyle {
    Stab,
    Slash,
    Crush,
    Magic,
    Ranged,
    /// Typeless, dragonfire and other attacks the damage-taken maths cannot model
    #[default]
    #[serde(other)]
    NonStandard,
}

impl MonsterStyle {
    pub fn style_type(self) -> Option<StyleType> {
        match self {
            MonsterStyle::Stab => Some(StyleType::Stab),
            MonsterStyle::Slash => Some(StyleType::Slash),
            MonsterStyle::Crush => Some(StyleType::Crush),
            MonsterStyle::Magic => Some(StyleType::Magic),
            MonsterStyle::Ranged => Some(StyleType::Ranged),
            MonsterStyle::NonStandard => None,
        }
    }
}

/// Special attacks and debuffs already landed on the monster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenceReductions {
    pub vulnerability: bool,
    pub accursed: bool,
    pub elder_maul: i32,
    pub dwh: i32,
    pub arclight: i32,
    pub emberlight: i32,
    pub tonalztic: i32,
    /// Magic levels drained by Seercull
    pub seercull: i32,
    /// Total damage dealt by Bandos godsword specials
    pub bgs: i32,
    /// Magic defence bonus removed by the Eye of ayak
    pub ayak: i32,
}

impl DefenceReductions {
    fn clamped(self) -> Self {
        DefenceReductions {
            elder_maul: self.elder_maul.max(0),
            dwh: self.dwh.max(0),
            arclight: self.arclight.max(0),
            emberlight: self.emberlight.max(0),
            tonalztic: self.tonalztic.max(0),
            seercull: self.seercull.max(0),
            bgs: self.bgs.max(0),
            ayak: self.ayak.max(0),
            ..self
        }
    }
}

/// Scenario parameters the user controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterInputs {
    pub is_from_cox_cm: bool,
    pub toa_invocation_level: i32,
    pub toa_path_level: i32,
    pub party_size: i32,
    pub party_max_combat_level: i32,
    pub party_avg_mining_level: i32,
    pub party_max_hp_level: i32,
    /// Zero means full health
    pub monster_current_hp: i32,
    pub defence_reductions: DefenceReductions,
    pub phase: Option<String>,
    /// Percentage demonbane effectiveness, filled in for demons
    pub demonbane_vulnerability: Option<i32>,
}

impl Default for MonsterInputs {
    fn default() -> Self {
        MonsterInputs {
            is_from_cox_cm: false,
            toa_invocation_level: 0,
            toa_path_level: 0,
            party_size: 1,
            party_max_combat_level: 126,
            party_avg_mining_level: 99,
            party_max_hp_level: 99,
            monster_current_hp: 0,
            defence_reductions: DefenceReductions::default(),
            phase: None,
            demonbane_vulnerability: None,
        }
    }
}

impl MonsterInputs {
    /// Inputs forced into the ranges the scaling formulas accept
    pub fn clamped(&self) -> Self {
        MonsterInputs {
            toa_invocation_level: self.toa_invocation_level.clamp(0, 600),
            toa_path_level: self.toa_path_level.clamp(0, 6),
            party_size: self.party_size.clamp(1, 100),
            party_max_combat_level: self.party_max_combat_level.clamp(3, 126),
            party_avg_mining_level: self.party_avg_mining_level.clamp(1, 99),
            party_max_hp_level: self.party_max_hp_level.clamp(1, 99),
            monster_current_hp: self.monster_current_hp.max(0),
            defence_reductions: self.defence_reductions.clamped(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default = "default_size")]
    pub size: i32,
    #[serde(default)]
    pub skills: MonsterSkills,
    #[serde(default)]
    pub offensive: MonsterOffensive,
    #[serde(default)]
    pub defensive: MonsterDefensive,
    #[serde(default)]
    pub attributes: Vec<MonsterAttribute>,
    #[serde(default)]
    pub style: MonsterStyle,
    /// Attack speed in ticks
    #[serde(default = "default_speed")]
    pub speed: u32,
    /// Listed max hit, if the data source provides one
    #[serde(default)]
    pub max_hit: Option<i32>,
    #[serde(default)]
    pub weakness: Option<Weakness>,
    #[serde(default)]
    pub inputs: MonsterInputs,
}

fn default_size() -> i32 {
    1
}

fn default_speed() -> u32 {
    4
}

impl Default for Monster {
    fn default() -> Self {
        Monster {
            id: -1,
            name: String::new(),
            version: String::new(),
            size: 1,
            skills: MonsterSkills::default(),
            offensive: MonsterOffensive::default(),
            defensive: MonsterDefensive::default(),
            attributes: Vec::new(),
            style: MonsterStyle::NonStandard,
            speed: 4,
            max_hit: None,
            weakness: None,
            inputs: MonsterInputs::default(),
        }
    }
}

impl Monster {
    pub fn has(&self, attribute: MonsterAttribute) -> bool {
        self.attributes.contains(&attribute)
    }

    /// Current hitpoints, treating an unset or out-of-range value as full health
    pub fn current_hp(&self) -> i32 {
        let current = self.inputs.monster_current_hp;
        if current <= 0 || current > self.skills.hp {
            self.skills.hp
        } else {
            current
        }
    }

    pub fn in_phase(&self, phase: &str) -> bool {
        self.inputs.phase.as_deref() == Some(phase)
    }

    /// Copy of this monster with different scenario inputs
    pub fn with_inputs(&self, inputs: MonsterInputs) -> Self {
        Monster {
            inputs,
            ..self.clone()
        }
    }
}
