//! Monster and item id tables consulted by scaling and damage rules
//!
//! Ids are grouped by encounter. Composite groups are exposed as functions
//! because const slices cannot be concatenated.

// === Tombs of Amascut ===

pub const AKKHA_IDS: &[i32] = &[11789, 11790, 11791, 11792, 11793, 11794, 11795, 11796];
pub const AKKHA_SHADOW_IDS: &[i32] = &[11797, 11798, 11799];
pub const BABA_IDS: &[i32] = &[11778, 11779, 11780];
pub const KEPHRI_SHIELDED_IDS: &[i32] = &[11719];
pub const KEPHRI_UNSHIELDED_IDS: &[i32] = &[11721];
pub const KEPHRI_OVERLORD_IDS: &[i32] = &[11724, 11725, 11726];
pub const ZEBAK_IDS: &[i32] = &[11730, 11732, 11733];
pub const TOA_OBELISK_IDS: &[i32] = &[11750, 11751, 11752];
pub const P2_WARDEN_IDS: &[i32] = &[11753, 11754, 11756, 11757];
pub const P3_WARDEN_IDS: &[i32] = &[11761, 11763, 11762, 11764];
pub const TOA_WARDEN_CORE_EJECTED_IDS: &[i32] = &[11755, 11758];
pub const TOA_CORE_IDS: &[i32] = &[11770, 11771];

const TOA_PATH_GROUPS: &[&[i32]] = &[
    AKKHA_IDS,
    AKKHA_SHADOW_IDS,
    BABA_IDS,
    KEPHRI_SHIELDED_IDS,
    KEPHRI_UNSHIELDED_IDS,
    KEPHRI_OVERLORD_IDS,
    ZEBAK_IDS,
];

const TOA_OTHER_GROUPS: &[&[i32]] = &[
    TOA_OBELISK_IDS,
    P2_WARDEN_IDS,
    TOA_WARDEN_CORE_EJECTED_IDS,
    P3_WARDEN_IDS,
    TOA_CORE_IDS,
];

/// Monsters whose stats depend on the Tombs of Amascut path level
pub fn is_toa_path_monster(id: i32) -> bool {
    in_groups(TOA_PATH_GROUPS, id)
}

/// Any monster found in the Tombs of Amascut
pub fn is_toa_monster(id: i32) -> bool {
    is_toa_path_monster(id) || in_groups(TOA_OTHER_GROUPS, id)
}

// === Theatre of Blood ===

pub const VERZIK_P1_IDS: &[i32] = &[10830, 10831, 10832, 8369, 8370, 8371, 10847, 10848, 10849];
pub const VERZIK_LATER_PHASE_IDS: &[i32] = &[10833, 10834, 10835, 8372, 8373, 8374, 10850, 10851, 10852];
pub const SOTETSEG_IDS: &[i32] = &[8387, 8388, 10867, 10868];

const TOB_OTHER_IDS: &[i32] = &[
    // normal
    8360, 8361, 8362, 8363, 8364, 8365, 8366, 8367, 8359, 8342, 8343, 8344, 8345, 8346, 8347, 8348,
    8349, 8350, 8351, 8352, 8353, 8355, 8356, 8357, 8339, 8340, 8372, 8373, 8374, 8376, 8381, 8382,
    8383, 8384, 8385,
    // hard mode
    10822, 10823, 10824, 10825, 10826, 10827, 10828, 10829, 10813, 10791, 10792, 10793, 10794,
    10795, 10796, 10797, 10798, 10799, 10800, 10801, 10802, 10804, 10805, 10806, 10808, 10809,
    10810, 10770, 10771, 10772, 10850, 10851, 10852, 10854, 10858, 10859, 10860, 10861, 10862,
];

/// Entry mode monsters, which scale HP from a party of one
pub const TOB_EM_MONSTER_IDS: &[i32] = &[
    10814, 10815, 10816, 10817, 10818, 10819, 10820, 10821, 10812, 10774, 10775, 10776, 10777,
    10778, 10779, 10780, 10781, 10782, 10783, 10784, 10785, 10787, 10788, 10789, 10864, 10865,
    10767, 10768, 10833, 10834, 10835, 10837, 10841, 10842, 10843, 10844, 10845,
];

/// Normal and hard mode Theatre of Blood monsters
pub fn is_tob_monster(id: i32) -> bool {
    in_groups(&[VERZIK_P1_IDS, SOTETSEG_IDS, TOB_OTHER_IDS], id)
}

pub fn is_verzik(id: i32) -> bool {
    VERZIK_P1_IDS.contains(&id) || VERZIK_LATER_PHASE_IDS.contains(&id)
}

// === Chambers of Xeric ===

pub const TEKTON_IDS: &[i32] = &[7540, 7543, 7544, 7545];
pub const GUARDIAN_IDS: &[i32] = &[7569, 7571, 7570, 7572];
pub const OLM_HEAD_IDS: &[i32] = &[7551, 7554];
pub const OLM_MELEE_HAND_IDS: &[i32] = &[7552, 7555];
pub const OLM_MAGE_HAND_IDS: &[i32] = &[7550, 7553];
pub const SCAVENGER_BEAST_IDS: &[i32] = &[7548, 7549];
pub const ABYSSAL_PORTAL_IDS: &[i32] = &[7533];
pub const GLOWING_CRYSTAL_IDS: &[i32] = &[7568];
pub const ICE_DEMON_IDS: &[i32] = &[7584, 7585];

pub fn is_olm(id: i32) -> bool {
    in_groups(&[OLM_HEAD_IDS, OLM_MELEE_HAND_IDS, OLM_MAGE_HAND_IDS], id)
}

// === Other bosses ===

pub const FRAGMENT_OF_SEREN_IDS: &[i32] = &[8917, 8918, 8919, 8920];
pub const NIGHTMARE_TOTEM_IDS: &[i32] = &[9434, 9437, 9440, 9443, 9435, 9438, 9441, 9444];
pub const ZULRAH_IDS: &[i32] = &[2042, 2043, 2044];
pub const VARDORVIS_IDS: &[i32] = &[12223, 12224, 12228, 12425, 12426, 13656];
pub const ARAXXOR_IDS: &[i32] = &[13668];
pub const TORMENTED_DEMON_IDS: &[i32] = &[13599, 13600, 13601, 13602, 13603, 13604, 13605, 13606];
pub const HUEYCOATL_PHASE_IDS: &[i32] = &[14009, 14010, 14013, 14014];
/// The body segment can't receive the pillar buff
pub const HUEYCOATL_BODY_IDS: &[i32] = &[14017];
pub const NIGHTMARE_IDS: &[i32] = &[
    378, 9425, 9426, 9427, 9428, 9429, 9430, 9431, 9432, 9433, 9460, // nightmare
    377, 9423, 9416, 9417, 9418, 9419, 9420, 9421, 9422, 9424, 11153, 11154, 11155, // phosani's
];
pub const NEX_IDS: &[i32] = &[11278, 11279, 11280, 11281, 11282];
pub const YAMA_IDS: &[i32] = &[14176];
pub const KRAKEN_ID: i32 = 494;
pub const SCURRIUS_RAT_ID: i32 = 7223;

/// Phase names a monster can be put into, if any
pub fn monster_phases(id: i32) -> &'static [&'static str] {
    if TORMENTED_DEMON_IDS.contains(&id) {
        &["Shielded", "Shielded (Defenceless)", "Unshielded"]
    } else if ARAXXOR_IDS.contains(&id) {
        &["Standard", "Enraged"]
    } else if HUEYCOATL_PHASE_IDS.contains(&id) {
        &["Without Pillar", "With Pillar"]
    } else {
        &[]
    }
}

/// Baboon brawlers and the Prifddinas rabbit
const DEFENCE_LEVEL_MAGIC_OTHERS: &[i32] = &[11709, 11712, 9118];

/// Monsters that roll magic defence from their defence level
pub fn uses_defence_level_for_magic(id: i32) -> bool {
    in_groups(&[ICE_DEMON_IDS, FRAGMENT_OF_SEREN_IDS, DEFENCE_LEVEL_MAGIC_OTHERS], id) || is_verzik(id)
}

// === Immunities ===

const DUSK_IDS: &[i32] = &[7851, 7854, 7855, 7882, 7883, 7886, 7887, 7888, 7889];
const WARRIORS_GUILD_CYCLOPES: &[i32] = &[2463, 2465, 2467, 2464, 2466, 2468, 2137, 2138, 2139, 2140, 2141, 2142];
const MELEE_IMMUNE_OTHERS: &[i32] = &[494, 7706, 7708, 12214, 12215, 12219, 7852, 7853, 7884, 7885];

pub const IMMUNE_TO_NON_SALAMANDER_MELEE_IDS: &[i32] = &[
    3169, 3170, 3171, 3172, 3173, 3174, 3175, 3176, 3177, 3178, 3179, 3180, 3181, 3182, 3183, 7037,
];

pub fn is_immune_to_melee(id: i32) -> bool {
    in_groups(&[MELEE_IMMUNE_OTHERS, ABYSSAL_PORTAL_IDS, ZULRAH_IDS], id)
}

pub fn is_immune_to_ranged(id: i32) -> bool {
    in_groups(&[TEKTON_IDS, DUSK_IDS, GLOWING_CRYSTAL_IDS, WARRIORS_GUILD_CYCLOPES], id)
}

pub fn is_immune_to_magic(id: i32) -> bool {
    in_groups(&[DUSK_IDS, WARRIORS_GUILD_CYCLOPES], id)
}

// === Distribution shortcuts ===

/// Barbarian Assault fighters and rangers
pub const BA_ATTACKER_IDS: &[i32] = &[
    1667, 5739, 5740, 5741, 5742, 5743, 5744, 5745, 5746, 5747, 1668, 5757, 5758, 5759, 5760, 5761,
    5762, 5763, 5764, 5765,
];

/// Monsters that always die to a single player hit
pub const ONE_HIT_MONSTER_IDS: &[i32] = &[7223, 8584, 11193];

pub const ALWAYS_MAX_HIT_MELEE_IDS: &[i32] = &[11710, 11713, 12814, 11755, 11758];
pub const ALWAYS_MAX_HIT_RANGED_IDS: &[i32] = &[11711, 11714, 12815];
pub const ALWAYS_MAX_HIT_MAGIC_IDS: &[i32] = &[11709, 11712, 12816];

/// NPCs whose attacks never miss the player
pub const ALWAYS_ACCURATE_MONSTER_IDS: &[i32] = &[931, 4135, 7691, 12335];

/// Max hit overrides for NPCs whose listed max hit is wrong
pub fn npc_hardcoded_max_hit(id: i32) -> Option<i32> {
    match id {
        5947 | 5961 => Some(10),
        _ => None,
    }
}

pub const BLOWPIPE_IDS: &[i32] = &[12926, 28688];

fn in_groups(groups: &[&[i32]], id: i32) -> bool {
    groups.iter().any(|g| g.contains(&id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toa_groups() {
        assert!(is_toa_path_monster(11789));
        assert!(!is_toa_path_monster(11753));
        assert!(is_toa_monster(11753));
        assert!(is_toa_monster(11755));
        assert!(!is_toa_monster(415));
    }

    #[test]
    fn test_magic_defence_level_users() {
        assert!(uses_defence_level_for_magic(7584));
        assert!(uses_defence_level_for_magic(8372));
        assert!(!uses_defence_level_for_magic(415));
    }

    #[test]
    fn test_phases() {
        assert_eq!(monster_phases(13668), &["Standard", "Enraged"]);
        assert!(monster_phases(415).is_empty());
    }
}
