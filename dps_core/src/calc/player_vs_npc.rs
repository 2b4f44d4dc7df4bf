//! PlayerVsNpcCalc - A loadout attacking a monster
//!
//! Wraps the shared calculator state with the queries built on top of the
//! attack distribution: damage rates, kill times, prayer upkeep and special
//! attacks. The distribution is computed once and cached.

use super::base::{BaseCalc, CalcOpts, UserIssue, UserIssueType};
use super::result::CalcResult;
use super::rolls::MinMax;
use super::ttk::{hits_to_kill, ttk_distribution, HitsByHp};
use crate::details::{DetailEntry, DetailKey, DetailValue};
use crate::dist::claws::burning_claw_dot;
use crate::dist::{AttackDistribution, DelayedHit, ProbabilisticDelay, WeightedHit};
use crate::error::CalcError;
use crate::scaling::scale_monster_hp_only;
use crate::source::spec_cost;
use crate::types::{Monster, Player};
use std::cell::OnceCell;
use std::collections::BTreeMap;
use tracing::warn;

/// Weapons whose special attack exists in game but has no modelled cost
const UNIMPLEMENTED_SPECS: &[&str] = &[
    "Abyssal tentacle",
    "Ancient mace",
    "Armadyl crossbow",
    "Blue moon spear",
    "Bone dagger",
    "Darklight",
    "Dinh's bulwark",
    "Dorgeshuun crossbow",
    "Dragon 2h sword",
    "Dragon crossbow",
    "Dragon hasta",
    "Dragon spear",
    "Dragon thrownaxe",
    "Eclipse atlatl",
    "Excalibur",
    "Granite hammer",
    "Granite maul",
    "Rune claws",
    "Soulreaper axe",
    "Staff of balance",
    "Staff of light",
    "Staff of the dead",
    "Toxic staff of the dead",
    "Ursine chainmace",
    "Zamorakian hasta",
    "Zamorakian spear",
];

/// Chance a landed blood moon hit leaves the next attack at full delay
const BLOOD_MOON_NO_EFFECT: f64 = 67.0 / 100.0;

/// How far the calculator models the equipped weapon's special attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecSupport {
    Implemented,
    Unimplemented,
    NotApplicable,
}

/// A loadout attacking a monster
#[derive(Debug)]
pub struct PlayerVsNpcCalc {
    base: BaseCalc,
    dist: OnceCell<AttackDistribution>,
}

impl PlayerVsNpcCalc {
    pub fn new(player: &Player, monster: &Monster, opts: CalcOpts) -> Result<Self, CalcError> {
        let no_init = opts.no_init;
        let mut base = BaseCalc::new(player, monster, opts)?;
        if !no_init && spec_support(base.weapon_name()) == SpecSupport::Unimplemented {
            base.add_issue(
                UserIssueType::EquipmentSpecUnsupported,
                "This loadout's weapon special attack is not yet supported in the calculator.",
            );
        }
        Ok(PlayerVsNpcCalc::from_base(base))
    }

    fn from_base(base: BaseCalc) -> Self {
        PlayerVsNpcCalc {
            base,
            dist: OnceCell::new(),
        }
    }

    /// A calculator over this one's sanitized player and a given monster
    fn sub_calc(&self, monster: Monster) -> PlayerVsNpcCalc {
        PlayerVsNpcCalc::from_base(self.base.sub_calc(monster, None))
    }

    pub fn player(&self) -> &Player {
        self.base.player()
    }

    /// The monster after scaling
    pub fn monster(&self) -> &Monster {
        self.base.monster()
    }

    pub fn opts(&self) -> &CalcOpts {
        self.base.opts()
    }

    // === Rolls ===

    pub fn max_attack_roll(&self) -> i32 {
        self.base.max_attack_roll()
    }

    pub fn npc_defence_roll(&self) -> i32 {
        self.base.npc_defence_roll()
    }

    pub fn min_and_max(&self) -> MinMax {
        self.base.min_and_max()
    }

    pub fn max_hit(&self) -> i32 {
        self.min_and_max().1
    }

    pub fn hit_chance(&self) -> f64 {
        self.base.hit_chance()
    }

    pub fn is_immune(&self) -> bool {
        self.base.is_immune()
    }

    // === Distribution ===

    pub fn distribution(&self) -> &AttackDistribution {
        self.dist.get_or_init(|| {
            let dist = self.base.attack_distribution();
            self.base.track(DetailKey::HitDistFinalMin, dist.min());
            self.base.track(DetailKey::HitDistFinalMax, dist.max());
            self.base.track(DetailKey::HitDistFinalExpected, dist.expected_damage());
            dist
        })
    }

    // === Damage rates ===

    /// Ticks between attacks for the weapon and stance
    pub fn attack_speed(&self) -> u32 {
        self.player().attack_speed.max(1)
    }

    /// Average ticks between attacks, counting speed-ups from landed hits
    pub fn expected_attack_speed(&self) -> f64 {
        let speed = self.attack_speed() as f64;
        if self.base.wearing_blood_moon_set() {
            let acc = self.hit_chance();
            return speed - (acc / 3.0 + acc * acc * 2.0 / 9.0);
        }
        speed
    }

    pub fn dpt(&self) -> f64 {
        self.distribution().expected_damage() / self.expected_attack_speed()
    }

    pub fn dps(&self) -> f64 {
        self.dpt() / self.seconds_per_tick()
    }

    fn seconds_per_tick(&self) -> f64 {
        self.opts().constants.timing.seconds_per_tick
    }

    // === Kill time ===

    /// Expected attacks to kill the monster from its current hitpoints
    pub fn htk(&self) -> f64 {
        hits_to_kill(&self.distribution().damage_pmf(), self.monster().current_hp())
    }

    /// Expected seconds to kill
    pub fn ttk(&self) -> f64 {
        self.htk() * self.expected_attack_speed() * self.seconds_per_tick()
    }

    /// Delays that can follow an attack outcome
    fn delays_after(&self, hit: &WeightedHit) -> Vec<ProbabilisticDelay> {
        let speed = self.attack_speed();
        if !self.base.wearing_blood_moon_set() {
            return vec![(1.0, speed)];
        }

        let mut no_effect = 1.0;
        for splat in &hit.hitsplats {
            if !splat.accurate {
                break;
            }
            no_effect *= BLOOD_MOON_NO_EFFECT;
        }
        vec![(1.0 - no_effect, speed.saturating_sub(1)), (no_effect, speed)]
    }

    fn delayed_hits(&self) -> Vec<DelayedHit> {
        self.distribution()
            .zipped()
            .with_probabilistic_delays(&|wh: &WeightedHit| self.delays_after(wh))
    }

    /// Probability of the kill landing on each tick, the first attack on tick 1
    pub fn ttk_distribution(&self) -> BTreeMap<u32, f64> {
        if self.distribution().expected_damage() == 0.0 {
            return BTreeMap::new();
        }

        let start_hp = self.monster().current_hp();
        let speed = self.attack_speed();
        let constants = &self.opts().constants.ttk;
        let player_hits = self.delayed_hits();

        if !self.base.dist_is_current_hp_dependent() || self.opts().disable_monster_scaling {
            return ttk_distribution(start_hp, speed, HitsByHp::Shared(&player_hits), constants);
        }

        let by_hp: Vec<Vec<DelayedHit>> = (0..=start_hp).map(|hp| self.hits_at_hp(&player_hits, hp)).collect();
        ttk_distribution(start_hp, speed, HitsByHp::PerHp(&by_hp), constants)
    }

    fn hits_at_hp(&self, base: &[DelayedHit], hp: i32) -> Vec<DelayedHit> {
        if hp == self.monster().current_hp() || self.base.ruby_hp_cap_reached(hp) {
            return base.to_vec();
        }

        let mut at_hp = self.monster().clone();
        at_hp.inputs.monster_current_hp = hp;
        self.sub_calc(scale_monster_hp_only(&at_hp)).delayed_hits()
    }

    // === Prayer ===

    /// Ticks until the active prayers run out of points, infinite when nothing drains
    pub fn prayer_ticks(&self) -> f64 {
        let drain: i32 = self.player().prayers.iter().map(|p| p.data().drain_rate).sum();
        if drain == 0 {
            return f64::INFINITY;
        }

        let resistance = 2 * self.player().bonuses.bonuses.prayer + 60;
        let units = self.player().skills.prayer * resistance;
        (units as f64 / drain as f64).ceil()
    }

    pub fn prayer_duration(&self) -> f64 {
        self.prayer_ticks() * self.seconds_per_tick()
    }

    // === Special attacks ===

    pub fn spec_cost(&self) -> Option<u32> {
        spec_cost(self.base.weapon_name())
    }

    pub fn spec_support(&self) -> SpecSupport {
        spec_support(self.base.weapon_name())
    }

    /// The same loadout using its special attack, when the calculator models it
    pub fn spec_calc(&self) -> Result<Option<PlayerVsNpcCalc>, CalcError> {
        if self.spec_support() != SpecSupport::Implemented {
            return Ok(None);
        }
        let mut opts = self.opts().clone();
        opts.using_special_attack = true;
        PlayerVsNpcCalc::new(self.player(), self.base.base_monster(), opts).map(Some)
    }

    /// Damage per second of special attack energy regeneration
    pub fn spec_dps(&self) -> f64 {
        let Some(cost) = self.spec_cost() else {
            warn!(weapon = %self.base.weapon_name(), "no special attack cost for weapon");
            return 0.0;
        };

        let spec = &self.opts().constants.spec;
        let regen_ticks = if self.base.wearing("Lightbearer") {
            spec.lightbearer_regen_ticks
        } else {
            spec.regen_ticks
        };
        let ticks_per_spec = cost as f64 * (regen_ticks as f64 / 10.0);
        self.dps() / ticks_per_spec
    }

    // === Output ===

    pub fn details(&self) -> Vec<DetailEntry> {
        self.base.details()
    }

    pub fn detail(&self, key: DetailKey) -> Option<DetailValue> {
        self.base.detail(key)
    }

    pub fn user_issues(&self) -> &[UserIssue] {
        self.base.user_issues()
    }

    /// Every headline number, special attack included
    pub fn summary(&self) -> Result<CalcResult, CalcError> {
        let (min_hit, max_hit) = self.min_and_max();
        let prayer_ticks = self.prayer_ticks();

        let mut result = CalcResult {
            loadout: self.opts().loadout_name.clone(),
            max_attack_roll: self.max_attack_roll(),
            npc_defence_roll: self.npc_defence_roll(),
            min_hit,
            max_hit,
            accuracy: self.hit_chance(),
            expected_hit: self.distribution().expected_damage(),
            attack_speed: self.expected_attack_speed(),
            dpt: self.dpt(),
            dps: self.dps(),
            htk: self.htk(),
            ttk: self.ttk(),
            prayer_ticks: prayer_ticks.is_finite().then_some(prayer_ticks),
            user_issues: self.user_issues().to_vec(),
            ..CalcResult::new()
        };

        if !self.opts().using_special_attack {
            if let Some(spec) = self.spec_calc()? {
                result.spec_expected_hit = Some(spec.distribution().expected_damage());
                result.spec_max_hit = Some(spec.max_hit());
                result.spec_accuracy = Some(spec.hit_chance());
                result.spec_dps = Some(spec.spec_dps());
                if spec.base.wearing("Burning claws") {
                    result.spec_burn_damage = Some(burning_claw_dot(spec.hit_chance()));
                }
            }
        }

        Ok(result)
    }
}

fn spec_support(weapon_name: &str) -> SpecSupport {
    if weapon_name.is_empty() {
        SpecSupport::NotApplicable
    } else if spec_cost(weapon_name).is_some() {
        SpecSupport::Implemented
    } else if UNIMPLEMENTED_SPECS.contains(&weapon_name) {
        SpecSupport::Unimplemented
    } else {
        SpecSupport::NotApplicable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CombatStyle, EquipmentCategory, EquipmentPiece, EquipmentSlot, MonsterAttribute, Prayer, Stance, StyleType,
    };

    fn dummy() -> Monster {
        let mut m = Monster {
            id: 1,
            name: "Dummy".to_string(),
            ..Default::default()
        };
        m.skills.hp = 50;
        m.skills.def = 20;
        m
    }

    fn weapon(name: &str, category: EquipmentCategory) -> EquipmentPiece {
        let mut w = EquipmentPiece::named(name, EquipmentSlot::Weapon);
        w.category = category;
        w.speed = 4;
        w.offensive.slash = 82;
        w.bonuses.str = 82;
        w
    }

    fn whip_player() -> Player {
        let mut p = Player::default().with_equipment([weapon("Abyssal whip", EquipmentCategory::Whip)]);
        p.style = CombatStyle::new("Lash", StyleType::Slash, Stance::Controlled);
        p
    }

    fn calc(player: &Player, monster: &Monster) -> PlayerVsNpcCalc {
        PlayerVsNpcCalc::new(player, monster, CalcOpts::default()).unwrap()
    }

    #[test]
    fn test_dps_consistent_with_distribution() {
        let c = calc(&whip_player(), &dummy());
        let expected = c.distribution().expected_damage();
        assert!((c.dpt() - expected / 4.0).abs() < 1e-12);
        assert!((c.dps() - expected / 4.0 / 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_is_cached() {
        let c = calc(&whip_player(), &dummy());
        let a = c.distribution() as *const AttackDistribution;
        let b = c.distribution() as *const AttackDistribution;
        assert_eq!(a, b);
    }

    #[test]
    fn test_ttk_distribution_sums_to_one() {
        let c = calc(&whip_player(), &dummy());
        let ttk = c.ttk_distribution();
        let total: f64 = ttk.values().sum();
        assert!(total <= 1.0 + 1e-9);
        assert!(total > 1.0 - 0.001);
        // fixed speed: kills only on attack ticks
        assert!(ttk.keys().all(|t| (t - 1) % 4 == 0));
    }

    #[test]
    fn test_mean_ttk_close_to_htk() {
        let c = calc(&whip_player(), &dummy());
        let mean_ticks: f64 = c.ttk_distribution().iter().map(|(t, p)| (*t as f64 - 1.0) * p).sum();
        // the first attack is on tick 1, so n attacks finish at 4(n - 1) + 1
        let from_htk = (c.htk() - 1.0) * 4.0;
        assert!((mean_ticks - from_htk).abs() < 0.05 * from_htk.max(1.0));
    }

    #[test]
    fn test_immune_monster_has_empty_ttk() {
        let mut m = dummy();
        m.attributes.push(MonsterAttribute::Leafy);
        let c = calc(&whip_player(), &m);
        assert!(c.is_immune());
        assert!(c.ttk_distribution().is_empty());
        assert_eq!(c.htk(), 0.0);
        assert_eq!(c.dps(), 0.0);
    }

    #[test]
    fn test_prayer_ticks() {
        let mut p = whip_player();
        assert!(calc(&p, &dummy()).prayer_ticks().is_infinite());

        p.activate_prayer(Prayer::Piety);
        // 99 prayer, no bonus: ceil(99 * 60 / 24)
        let c = calc(&p, &dummy());
        assert_eq!(c.prayer_ticks(), 248.0);
        assert!((c.prayer_duration() - 248.0 * 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_unimplemented_spec_issue() {
        let c = calc(&whip_player(), &dummy());
        // the whip has a known cost, so it counts as modelled
        assert_eq!(c.spec_support(), SpecSupport::Implemented);
        assert!(c.user_issues().is_empty());

        let mut p = Player::default().with_equipment([weapon("Granite maul", EquipmentCategory::Blunt)]);
        p.style = CombatStyle::new("Pound", StyleType::Crush, Stance::Accurate);
        let c = calc(&p, &dummy());
        assert_eq!(c.spec_support(), SpecSupport::Unimplemented);
        assert!(c
            .user_issues()
            .iter()
            .any(|i| i.kind == UserIssueType::EquipmentSpecUnsupported));
        assert!(c.spec_calc().unwrap().is_none());
    }

    #[test]
    fn test_unimplemented_specs_have_no_cost() {
        for name in UNIMPLEMENTED_SPECS {
            assert!(spec_cost(name).is_none(), "{name} has a cost but is listed as unmodelled");
            assert_eq!(spec_support(name), SpecSupport::Unimplemented);
        }
        assert_eq!(spec_support("Abyssal whip"), SpecSupport::Implemented);
    }

    #[test]
    fn test_spec_dps_uses_regen() {
        let mut p = Player::default().with_equipment([weapon("Dragon dagger", EquipmentCategory::Dagger)]);
        p.style = CombatStyle::new("Lunge", StyleType::Stab, Stance::Aggressive);
        let c = calc(&p, &dummy());
        let spec = c.spec_calc().unwrap().unwrap();
        assert!(spec.opts().using_special_attack);
        // two hits per special
        assert_eq!(spec.distribution().dists.len(), 2);
        let expected = spec.dps() / (25.0 * 5.0);
        assert!((spec.spec_dps() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_summary_fields() {
        let c = calc(&whip_player(), &dummy());
        let r = c.summary().unwrap();
        assert_eq!(r.max_hit, c.max_hit());
        assert!((r.dps - c.dps()).abs() < 1e-12);
        assert!(r.prayer_ticks.is_none());
        assert!(r.spec_dps.is_some());
    }
}
