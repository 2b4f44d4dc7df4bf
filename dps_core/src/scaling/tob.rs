//! Theatre of Blood party scaling, which only touches hitpoints

use crate::config::ids::{is_tob_monster, TOB_EM_MONSTER_IDS};
use crate::types::Monster;

pub fn apply(m: Monster) -> Monster {
    let ps = m.inputs.party_size;
    let hp = if is_tob_monster(m.id) {
        m.skills.hp * (ps.clamp(3, 5) + 3) / 8
    } else if TOB_EM_MONSTER_IDS.contains(&m.id) {
        m.skills.hp * ps.clamp(1, 5) / 5
    } else {
        return m;
    };

    let mut scaled = m;
    scaled.skills.hp = hp;
    scaled
}
