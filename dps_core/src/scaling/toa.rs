//! Tombs of Amascut invocation, path and party scaling
//!
//! ToA multiplies rolls rather than stats, so only hitpoints change here.
//! The defence roll scaling lives with the roll calculators.

use crate::config::ids::{
    is_toa_monster, is_toa_path_monster, AKKHA_IDS, AKKHA_SHADOW_IDS, BABA_IDS, KEPHRI_OVERLORD_IDS,
    KEPHRI_SHIELDED_IDS, KEPHRI_UNSHIELDED_IDS, P2_WARDEN_IDS, P3_WARDEN_IDS, TOA_CORE_IDS, TOA_OBELISK_IDS,
    ZEBAK_IDS,
};
use crate::types::Monster;

/// `(base hp, rounding factor)` for each scaled encounter
fn scaling_values(id: i32) -> Option<(i64, i32)> {
    let table: &[(&[i32], i64, i32)] = &[
        (AKKHA_IDS, 40, 10),
        (AKKHA_SHADOW_IDS, 14, 5),
        (BABA_IDS, 38, 10),
        (KEPHRI_SHIELDED_IDS, 15, 10),
        (KEPHRI_UNSHIELDED_IDS, 16, 5),
        (KEPHRI_OVERLORD_IDS, 40, 1),
        (ZEBAK_IDS, 58, 10),
        (TOA_OBELISK_IDS, 26, 10),
        (P2_WARDEN_IDS, 28, 5),
        (TOA_CORE_IDS, 450, 10),
        (P3_WARDEN_IDS, 88, 10),
    ];
    table
        .iter()
        .find(|(ids, _, _)| ids.contains(&id))
        .map(|&(_, base, factor)| (base, factor))
}

/// Party size contribution, in tenths
pub fn party_factor(party_size: i32) -> i64 {
    let ps = party_size.clamp(1, 8) as i64;
    let mut factor = 0;
    if ps >= 2 {
        factor += 9 * (ps - 1).min(2);
    }
    if ps >= 4 {
        factor += 6 * (ps - 3);
    }
    factor
}

/// Path level contribution, in percent
pub fn path_factor(id: i32, path_level: i32) -> i64 {
    let path = path_level.clamp(0, 6) as i64;
    if is_toa_path_monster(id) && path >= 1 {
        3 + 5 * path
    } else {
        0
    }
}

pub fn apply(m: Monster) -> Monster {
    if !is_toa_monster(m.id) {
        return m;
    }
    let Some((base, factor)) = scaling_values(m.id) else {
        return m;
    };

    let inputs = m.inputs.clamped();
    let invo = inputs.toa_invocation_level as i64;
    let invo_factor = if TOA_CORE_IDS.contains(&m.id) { invo } else { 4 * invo };

    let numerator = base * (1000 + invo_factor) * (100 + path_factor(m.id, inputs.toa_path_level)) * (10 + party_factor(inputs.party_size));
    let scaled_base = (numerator as f64 / 1_000_000.0).round() as i32;

    let mut scaled = m;
    scaled.skills.hp = scaled_base * factor;
    scaled
}
