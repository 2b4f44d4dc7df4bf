//! Vardorvis strength and defence, which shift as he loses hitpoints

use crate::math::lerp;
use crate::types::Monster;

struct VardRanges {
    max_hp: i32,
    str: (i32, i32),
    def: (i32, i32),
}

fn ranges(version: &str) -> VardRanges {
    match version {
        "Quest" => VardRanges {
            max_hp: 500,
            str: (210, 280),
            def: (180, 130),
        },
        "Awakened" => VardRanges {
            max_hp: 1400,
            str: (391, 522),
            def: (268, 181),
        },
        _ => VardRanges {
            max_hp: 700,
            str: (270, 360),
            def: (215, 145),
        },
    }
}

pub fn apply(m: Monster) -> Monster {
    if m.name != "Vardorvis" {
        return m;
    }
    let r = ranges(&m.version);
    // zero means full health, as in Monster::current_hp
    let current = match m.inputs.monster_current_hp {
        hp if hp > 0 => hp.min(r.max_hp),
        _ => r.max_hp,
    };

    let mut scaled = m;
    scaled.skills.str = lerp(current, r.max_hp, 0, r.str.0, r.str.1);
    scaled.skills.def = lerp(current, r.max_hp, 0, r.def.0, r.def.1);
    scaled
}
