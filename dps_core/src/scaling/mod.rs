//! Monster scaling pipeline
//!
//! Each stage is a pure `Monster -> Monster` function. Stages are applied in
//! a fixed order, and every stage leaves monsters it doesn't recognise alone.

pub mod cox;
pub mod defence_reduction;
pub mod phases;
pub mod toa;
pub mod tob;
pub mod vardorvis;

use crate::types::Monster;
use tracing::debug;

type Stage = fn(Monster) -> Monster;

const STAGES: &[(&str, Stage)] = &[
    ("cox", cox::apply),
    ("tob", tob::apply),
    ("toa", toa::apply),
    ("vardorvis", vardorvis::apply),
    ("phases", phases::apply),
    ("defence_reduction", defence_reduction::apply),
];

/// Normalize a base monster for its raid, party, phase and drains
pub fn scale_monster(m: &Monster) -> Monster {
    let mut scaled = m.with_inputs(m.inputs.clamped());
    for (name, stage) in STAGES {
        let before = scaled.skills;
        scaled = stage(scaled);
        if scaled.skills != before {
            debug!(stage = name, monster = %scaled.name, hp = scaled.skills.hp, def = scaled.skills.def, "scaled monster");
        }
    }
    scaled
}

/// Rescale only the stats that depend on current hitpoints
///
/// Used when the same monster is evaluated at many hp values, where rerunning
/// the whole pipeline would be wasted work.
pub fn scale_monster_hp_only(m: &Monster) -> Monster {
    if m.name == "Vardorvis" {
        return vardorvis::apply(m.clone());
    }
    m.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DefenceReductions, MonsterAttribute, MonsterInputs, MonsterSkills};

    #[test]
    fn test_pipeline_leaves_input_alone() {
        let m = Monster {
            id: 7540,
            name: "Tekton".to_string(),
            skills: MonsterSkills {
                atk: 390,
                str: 390,
                def: 205,
                magic: 205,
                ranged: 1,
                hp: 300,
            },
            attributes: vec![MonsterAttribute::Xerician],
            inputs: MonsterInputs {
                party_size: 3,
                defence_reductions: DefenceReductions {
                    dwh: 1,
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let before = m.clone();
        let scaled = scale_monster(&m);
        assert_eq!(m, before);
        // party scaling happens before the drain
        // 205 * (1 + 1 + 100) / 100 = 209, minus 30%
        assert_eq!(scaled.skills.def, 209 - 209 * 3 / 10);
        assert_eq!(scaled.skills.hp, 600);
    }

    #[test]
    fn test_inputs_clamped_before_scaling() {
        let mut m = Monster {
            id: 11778,
            ..Default::default()
        };
        m.inputs.toa_invocation_level = 9000;
        let scaled = scale_monster(&m);
        assert_eq!(scaled.inputs.toa_invocation_level, 600);
        // 38 * 3400 * 100 * 10 / 1e6 = 129.2
        assert_eq!(scaled.skills.hp, 1290);
    }

    #[test]
    fn test_hp_only_rescales_vardorvis() {
        let mut m = Monster {
            name: "Vardorvis".to_string(),
            ..Default::default()
        };
        m.inputs.monster_current_hp = 350;
        assert_eq!(scale_monster_hp_only(&m).skills.def, 180);

        let other = Monster::default();
        assert_eq!(scale_monster_hp_only(&other), other);
    }
}
