//! Chambers of Xeric party scaling

use crate::config::ids::{
    ABYSSAL_PORTAL_IDS, GLOWING_CRYSTAL_IDS, GUARDIAN_IDS, OLM_HEAD_IDS, SCAVENGER_BEAST_IDS, TEKTON_IDS,
};
use crate::config::ids::is_olm;
use crate::math::isqrt;
use crate::types::{Monster, MonsterAttribute};

/// Scale a xerician monster's hp and combat levels for the party
pub fn apply(m: Monster) -> Monster {
    if !m.has(MonsterAttribute::Xerician) {
        return m;
    }

    let inputs = m.inputs.clamped();
    let cmb = inputs.party_max_combat_level;
    let hp = inputs.party_max_hp_level;
    let mining = inputs.party_avg_mining_level;
    let ps = inputs.party_size;
    let cm = inputs.is_from_cox_cm;

    if is_olm(m.id) {
        return scale_olm(m, ps, cm);
    }

    let id = m.id;
    let challenge = cm && !GLOWING_CRYSTAL_IDS.contains(&id);
    let party_def = isqrt(ps - 1) + (ps - 1) * 7 / 10 + 100;
    let party_off = isqrt(ps - 1) * 7 + (ps - 1) + 100;
    let hp_factor = hp * 4 / 9 + 55;

    let scale_hp = |base: i32| {
        if SCAVENGER_BEAST_IDS.contains(&id) {
            return base;
        }
        let base_hp = if GUARDIAN_IDS.contains(&id) { 151 + mining } else { base };
        (base_hp * cmb / 126) * (ps / 2 + 1) * if challenge { 3 } else { 2 } / 2
    };

    let scale_defence = |base: i32| {
        let f = if TEKTON_IDS.contains(&id) { 5 } else { 2 };
        (base * hp_factor / 99) * party_def / 100 * if challenge { f + 1 } else { f } / f
    };

    let scale_offence = |base: i32, f: i32| {
        if ABYSSAL_PORTAL_IDS.contains(&id) {
            return scale_defence(base);
        }
        (base * hp_factor / 99) * party_off / 100 * if cm { f + 1 } else { f } / f
    };

    let magic_f = if TEKTON_IDS.contains(&id) { 5 } else { 2 };
    let mut scaled = m.clone();
    scaled.skills.hp = scale_hp(m.skills.hp);
    scaled.skills.atk = scale_offence(m.skills.atk, 2);
    scaled.skills.str = scale_offence(m.skills.str, 2);
    scaled.skills.ranged = scale_offence(m.skills.ranged, 2);
    scaled.skills.magic = scale_offence(m.skills.magic, magic_f);
    scaled.skills.def = scale_defence(m.skills.def);
    scaled
}

fn scale_olm(m: Monster, ps: i32, cm: bool) -> Monster {
    let cm_factor = if cm { 3.0 } else { 2.0 };
    let defence = |base: i32| {
        let party = (isqrt(ps - 1) + (ps - 1) * 7 / 10 + 100) as f64;
        (base as f64 * party / 100.0 * cm_factor / 2.0).trunc() as i32
    };
    let offence = |base: i32| {
        let party = (isqrt(ps - 1) * 7 + (ps - 1) + 100) as f64;
        (base as f64 * party / 100.0 * cm_factor / 2.0).trunc() as i32
    };

    let mut scaled = m.clone();
    let per_head = if OLM_HEAD_IDS.contains(&m.id) { 400 } else { 300 };
    scaled.skills.hp = per_head * (ps - ps / 8 * 3 + 1);
    scaled.skills.atk = offence(m.skills.atk);
    scaled.skills.str = offence(m.skills.str);
    scaled.skills.ranged = offence(m.skills.ranged);
    scaled.skills.magic = offence(m.skills.magic);
    scaled.skills.def = defence(m.skills.def);
    scaled
}
