//! NpcVsPlayerCalc - A monster attacking a loadout
//!
//! The reverse of `PlayerVsNpcCalc`: the monster's listed style and stats
//! against the player's defensive bonuses and prayers.

use super::base::{BaseCalc, CalcOpts, UserIssue};
use super::player_vs_npc::PlayerVsNpcCalc;
use super::result::DamageTaken;
use crate::config::ids;
use crate::dist::{AttackDistribution, HitDistribution, Hitsplat, WeightedHit};
use crate::error::CalcError;
use crate::math::apply_factor;
use crate::types::{Monster, MonsterStyle, Player, Prayer, Stance};
use std::cell::OnceCell;

/// A monster attacking a loadout
#[derive(Debug)]
pub struct NpcVsPlayerCalc {
    base: BaseCalc,
    dist: OnceCell<AttackDistribution>,
}

impl NpcVsPlayerCalc {
    pub fn new(player: &Player, monster: &Monster, opts: CalcOpts) -> Result<Self, CalcError> {
        Ok(NpcVsPlayerCalc {
            base: BaseCalc::new(player, monster, opts)?,
            dist: OnceCell::new(),
        })
    }

    pub fn monster(&self) -> &Monster {
        self.base.monster()
    }

    pub fn user_issues(&self) -> &[UserIssue] {
        self.base.user_issues()
    }

    fn style(&self) -> MonsterStyle {
        self.monster().style
    }

    // === Rolls ===

    pub fn npc_attack_roll(&self) -> i32 {
        let m = self.monster();
        match self.style() {
            MonsterStyle::Stab | MonsterStyle::Slash | MonsterStyle::Crush => {
                (9 + m.skills.atk) * (m.offensive.atk + 64)
            }
            MonsterStyle::Ranged => (9 + m.skills.ranged) * (m.offensive.ranged + 64),
            MonsterStyle::Magic => (9 + m.skills.magic) * (m.offensive.magic + 64),
            MonsterStyle::NonStandard => 0,
        }
    }

    /// Known fixed max hits first, then the listed value, then the stat formula
    pub fn npc_max_hit(&self) -> i32 {
        let m = self.monster();
        if let Some(max) = ids::npc_hardcoded_max_hit(m.id).or(m.max_hit) {
            return max;
        }

        let formula = |level: i32, bonus: i32| ((9 + level) * (bonus + 64) + 320) / 640;
        match self.style() {
            MonsterStyle::Stab | MonsterStyle::Slash | MonsterStyle::Crush => {
                formula(m.skills.str, m.offensive.str)
            }
            MonsterStyle::Ranged => formula(m.skills.ranged, m.offensive.ranged_str),
            MonsterStyle::Magic => formula(m.skills.magic, m.offensive.magic_str),
            MonsterStyle::NonStandard => 0,
        }
    }

    pub fn player_defence_roll(&self) -> i32 {
        let player = self.base.player();
        let defensive = &player.bonuses.defensive;

        let stance_bonus = match player.style.stance {
            Some(Stance::Defensive) => 3,
            Some(Stance::Controlled) => 1,
            _ => 0,
        };

        let mut def_level = player.current(|s| s.def);
        for prayer in &player.prayers {
            if let Some(factor) = prayer.data().factor_defence {
                def_level = apply_factor(def_level, factor);
            }
        }

        let (level, bonus) = match self.style() {
            MonsterStyle::Stab => (def_level, defensive.stab),
            MonsterStyle::Slash => (def_level, defensive.slash),
            MonsterStyle::Crush => (def_level, defensive.crush),
            MonsterStyle::Ranged => (def_level, defensive.ranged),
            MonsterStyle::Magic => {
                let magic = player.current(|s| s.magic);
                ((7 * magic + 3 * def_level) / 10, defensive.magic)
            }
            MonsterStyle::NonStandard => (def_level, 0),
        };

        (8 + level + stance_bonus) * (bonus + 64)
    }

    pub fn hit_chance(&self) -> f64 {
        if ids::ALWAYS_ACCURATE_MONSTER_IDS.contains(&self.monster().id) {
            return 1.0;
        }
        BaseCalc::normal_accuracy(self.npc_attack_roll(), self.player_defence_roll())
    }

    // === Distribution ===

    fn overhead_blocks(&self) -> bool {
        let prayers = &self.base.player().prayers;
        let protecting = |p: Prayer| prayers.contains(&p);
        match self.style() {
            MonsterStyle::Stab | MonsterStyle::Slash | MonsterStyle::Crush => protecting(Prayer::ProtectFromMelee),
            MonsterStyle::Ranged => protecting(Prayer::ProtectFromMissiles),
            MonsterStyle::Magic => protecting(Prayer::ProtectFromMagic),
            MonsterStyle::NonStandard => false,
        }
    }

    pub fn distribution(&self) -> &AttackDistribution {
        self.dist.get_or_init(|| {
            if self.overhead_blocks() {
                return AttackDistribution::single(HitDistribution::new(vec![WeightedHit::new(
                    1.0,
                    vec![Hitsplat::INACCURATE],
                )]));
            }
            AttackDistribution::single(HitDistribution::linear(self.hit_chance(), 0, self.npc_max_hit()))
        })
    }

    pub fn dpt(&self) -> f64 {
        self.distribution().expected_damage() / self.monster().speed.max(1) as f64
    }

    pub fn dps(&self) -> f64 {
        self.dpt() / self.base.opts().constants.timing.seconds_per_tick
    }

    /// Expected damage taken while killing the monster with the same loadout
    pub fn damage_taken(&self) -> Result<DamageTaken, CalcError> {
        if self.style() == MonsterStyle::NonStandard {
            return Ok(DamageTaken::Unavailable);
        }

        let mut opts = self.base.opts().clone();
        opts.detailed_output = false;
        let attacker = PlayerVsNpcCalc::new(self.base.player(), self.base.base_monster(), opts)?;

        let dps = self.dps();
        Ok(DamageTaken::Expected {
            dps,
            per_kill: dps * attacker.ttk(),
        })
    }
}
