//! Stat drains from special attacks and debuffs
//!
//! Reductions are applied to a running copy of the monster, but percentage
//! drains that scale off the starting stats (arclight, emberlight) and the
//! defence floor always use the unreduced values.

use crate::config::ids::{
    AKKHA_IDS, ARAXXOR_IDS, BABA_IDS, HUEYCOATL_BODY_IDS, HUEYCOATL_PHASE_IDS, KEPHRI_SHIELDED_IDS,
    KEPHRI_UNSHIELDED_IDS, NEX_IDS, NIGHTMARE_IDS, P3_WARDEN_IDS, SOTETSEG_IDS, TOA_OBELISK_IDS, VARDORVIS_IDS,
    YAMA_IDS, ZEBAK_IDS,
};
use crate::config::ids::is_verzik;
use crate::math::Factor;
use crate::types::{Monster, MonsterAttribute, MonsterSkills};
use tracing::debug;

/// Lowest defence level drains can bring this monster to
pub fn defence_floor(m: &Monster) -> i32 {
    let id = m.id;
    if is_verzik(id) || VARDORVIS_IDS.contains(&id) {
        return m.skills.def;
    }
    let floors: &[(&[i32], i32)] = &[
        (SOTETSEG_IDS, 100),
        (NIGHTMARE_IDS, 120),
        (AKKHA_IDS, 70),
        (BABA_IDS, 60),
        (KEPHRI_UNSHIELDED_IDS, 60),
        (KEPHRI_SHIELDED_IDS, 60),
        (ZEBAK_IDS, 50),
        (P3_WARDEN_IDS, 120),
        (TOA_OBELISK_IDS, 60),
        (NEX_IDS, 250),
        (ARAXXOR_IDS, 90),
        (HUEYCOATL_PHASE_IDS, 120),
        (HUEYCOATL_BODY_IDS, 120),
        (YAMA_IDS, 145),
    ];
    floors
        .iter()
        .find(|(ids, _)| ids.contains(&id))
        .map_or(0, |&(_, floor)| floor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stat {
    Atk,
    Str,
    Def,
    Magic,
    Ranged,
}

impl Stat {
    fn get(self, s: &MonsterSkills) -> i32 {
        match self {
            Stat::Atk => s.atk,
            Stat::Str => s.str,
            Stat::Def => s.def,
            Stat::Magic => s.magic,
            Stat::Ranged => s.ranged,
        }
    }

    fn slot(self, s: &mut MonsterSkills) -> &mut i32 {
        match self {
            Stat::Atk => &mut s.atk,
            Stat::Str => &mut s.str,
            Stat::Def => &mut s.def,
            Stat::Magic => &mut s.magic,
            Stat::Ranged => &mut s.ranged,
        }
    }
}

/// Skills with the drain floors enforced on every write
struct Drainer {
    skills: MonsterSkills,
    def_floor: i32,
}

impl Drainer {
    fn set(&mut self, stat: Stat, value: i32) {
        let floor = if stat == Stat::Def { self.def_floor } else { 0 };
        *stat.slot(&mut self.skills) = value.max(floor);
    }

    fn get(&self, stat: Stat) -> i32 {
        stat.get(&self.skills)
    }

    /// Remove `num/den` of each base stat plus one, `times` times over
    fn arclight(&mut self, base: &MonsterSkills, times: i32, (num, den): Factor) {
        if times == 0 {
            return;
        }
        for stat in [Stat::Atk, Stat::Str, Stat::Def] {
            let per_hit = num * stat.get(base) / den + 1;
            self.set(stat, self.get(stat) - times * per_hit);
        }
    }
}

pub fn apply(m: Monster) -> Monster {
    let reductions = m.inputs.defence_reductions;
    let base = m.skills;
    let mut d = Drainer {
        skills: m.skills,
        def_floor: defence_floor(&m),
    };

    if reductions.accursed {
        d.set(Stat::Def, d.get(Stat::Def) * 17 / 20);
        d.set(Stat::Magic, d.get(Stat::Magic) * 17 / 20);
    } else if reductions.vulnerability {
        d.set(Stat::Def, d.get(Stat::Def) * 9 / 10);
    }

    for _ in 0..reductions.elder_maul {
        let def = d.get(Stat::Def);
        d.set(Stat::Def, def - def * 35 / 100);
    }
    for _ in 0..reductions.dwh {
        let def = d.get(Stat::Def);
        d.set(Stat::Def, def - def * 3 / 10);
    }

    let demon = m.has(MonsterAttribute::Demon);
    d.arclight(&base, reductions.arclight, if demon { (2, 20) } else { (1, 20) });
    d.arclight(&base, reductions.emberlight, if demon { (3, 20) } else { (1, 20) });

    for _ in 0..reductions.tonalztic {
        d.set(Stat::Def, d.get(Stat::Def) - d.get(Stat::Magic) / 10);
    }

    if reductions.seercull > 0 {
        d.set(Stat::Magic, d.get(Stat::Magic) - reductions.seercull);
    }

    // a stat that fails to reach zero, even because of a floor, stops the drain
    let mut bgs = reductions.bgs;
    for stat in [Stat::Def, Stat::Str, Stat::Atk, Stat::Magic, Stat::Ranged] {
        if bgs <= 0 {
            break;
        }
        let start = d.get(stat);
        d.set(stat, start - bgs);
        if d.get(stat) > 0 {
            bgs = 0;
        } else {
            bgs -= start;
        }
    }

    let mut reduced = m;
    if reduced.skills != d.skills {
        debug!(
            monster = %reduced.name,
            def_before = base.def,
            def_after = d.skills.def,
            "applied defence reductions"
        );
    }
    reduced.skills = d.skills;
    if reductions.ayak > 0 {
        reduced.defensive.magic = (reduced.defensive.magic - reductions.ayak).max(0);
    }
    reduced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DefenceReductions;

    fn monster(reductions: DefenceReductions) -> Monster {
        let mut m = Monster {
            id: 415,
            name: "Abyssal demon".to_string(),
            ..Default::default()
        };
        m.skills = MonsterSkills {
            atk: 97,
            str: 67,
            def: 135,
            magic: 1,
            ranged: 1,
            hp: 150,
        };
        m.inputs.defence_reductions = reductions;
        m
    }

    #[test]
    fn test_dwh_stacks_multiplicatively() {
        let m = apply(monster(DefenceReductions {
            dwh: 2,
            ..Default::default()
        }));
        // 135 - 40 = 95, 95 - 28 = 67
        assert_eq!(m.skills.def, 67);
    }

    #[test]
    fn test_accursed_beats_vulnerability() {
        let m = apply(monster(DefenceReductions {
            accursed: true,
            vulnerability: true,
            ..Default::default()
        }));
        assert_eq!(m.skills.def, 114);
    }

    #[test]
    fn test_arclight_uses_base_stats() {
        let mut demon = monster(DefenceReductions {
            arclight: 2,
            ..Default::default()
        });
        demon.attributes.push(MonsterAttribute::Demon);
        let m = apply(demon);
        // demon: 2 * (2 * 135 / 20 + 1) = 28
        assert_eq!(m.skills.def, 107);
        assert_eq!(m.skills.atk, 97 - 2 * (2 * 97 / 20 + 1));
    }

    #[test]
    fn test_arclight_weaker_on_non_demons() {
        let m = apply(monster(DefenceReductions {
            arclight: 2,
            ..Default::default()
        }));
        // 2 * (135 / 20 + 1) = 14
        assert_eq!(m.skills.def, 121);
        assert_eq!(m.skills.str, 67 - 2 * (67 / 20 + 1));
    }

    #[test]
    fn test_bgs_drain_order() {
        let m = apply(monster(DefenceReductions {
            bgs: 150,
            ..Default::default()
        }));
        assert_eq!(m.skills.def, 0);
        assert_eq!(m.skills.str, 52);
        assert_eq!(m.skills.atk, 97);
    }

    #[test]
    fn test_bgs_stops_at_floor() {
        let mut m = monster(DefenceReductions {
            bgs: 500,
            ..Default::default()
        });
        // akkha, floor of 70
        m.id = 11789;
        let m = apply(m);
        assert_eq!(m.skills.def, 70);
        assert_eq!(m.skills.str, 67);
    }

    #[test]
    fn test_floor_from_unreduced_defence() {
        let mut m = monster(DefenceReductions {
            dwh: 3,
            ..Default::default()
        });
        m.id = 12223;
        assert_eq!(apply(m).skills.def, 135);
    }

    #[test]
    fn test_ayak_floors_magic_defence() {
        let mut m = monster(DefenceReductions {
            ayak: 40,
            ..Default::default()
        });
        m.defensive.magic = 25;
        assert_eq!(apply(m).defensive.magic, 0);
    }

    #[test]
    fn test_input_untouched() {
        let m = monster(DefenceReductions {
            dwh: 1,
            ..Default::default()
        });
        let before = m.clone();
        let _ = apply(m.clone());
        assert_eq!(m, before);
    }
}
