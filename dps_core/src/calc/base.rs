//! Shared calculator state
//!
//! `BaseCalc` owns the sanitized player, the scaled monster, the calculation
//! options and the optional detail trace. Both calculators build on it.

use crate::config::ids;
use crate::config::EngineConstants;
use crate::details::{CalcDetails, DetailEntry, DetailKey, DetailValue};
use crate::error::CalcError;
use crate::math::{apply_factor, Factor};
use crate::scaling::scale_monster;
use crate::source::{ammo_applicability, AmmoApplicability};
use crate::types::{
    get_spell_max_hit, EquipmentCategory, Monster, MonsterAttribute, Player, Stance, StyleType,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use tracing::{debug, warn};

/// Values that replace a computed roll or accuracy outright
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub accuracy: Option<f64>,
    pub attack_roll: Option<i32>,
    pub defence_roll: Option<i32>,
}

/// Options for a single calculation
#[derive(Debug, Clone)]
pub struct CalcOpts {
    pub loadout_name: String,
    pub detailed_output: bool,
    pub disable_monster_scaling: bool,
    pub using_special_attack: bool,
    pub overrides: Overrides,
    pub constants: EngineConstants,
    /// Set on sub-calculators whose inputs were already sanitized and scaled
    pub(crate) no_init: bool,
}

impl Default for CalcOpts {
    fn default() -> Self {
        CalcOpts {
            loadout_name: "unknown".to_string(),
            detailed_output: false,
            disable_monster_scaling: false,
            using_special_attack: false,
            overrides: Overrides::default(),
            constants: EngineConstants::builtin(),
            no_init: false,
        }
    }
}

impl CalcOpts {
    pub fn new(loadout_name: &str) -> Self {
        CalcOpts {
            loadout_name: loadout_name.to_string(),
            ..Default::default()
        }
    }

    pub fn detailed(mut self) -> Self {
        self.detailed_output = true;
        self
    }

    pub fn special_attack(mut self) -> Self {
        self.using_special_attack = true;
        self
    }

    /// Use the monster exactly as given, skipping the scaling pipeline
    pub fn without_scaling(mut self) -> Self {
        self.disable_monster_scaling = true;
        self
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Problems with a loadout that don't stop the calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserIssueType {
    EquipmentWrongAmmo,
    EquipmentMissingAmmo,
    EquipmentSetEffectUnsupported,
    EquipmentSpecUnsupported,
    SpellWrongWeapon,
    SpellWrongMonster,
    WeaponWrongMonster,
    RingRecoilUnsupported,
    FeetRecoilUnsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIssue {
    pub kind: UserIssueType,
    pub message: String,
    pub loadout: String,
}

/// Sanitized inputs plus the detail trace of one calculation
#[derive(Debug)]
pub struct BaseCalc {
    pub(crate) player: Player,
    /// The monster after scaling and sanitizing
    pub(crate) monster: Monster,
    /// The monster exactly as passed in
    pub(crate) base_monster: Monster,
    pub(crate) opts: CalcOpts,
    equipped: Vec<String>,
    details: Option<RefCell<CalcDetails>>,
    issues: Vec<UserIssue>,
}

impl BaseCalc {
    pub fn new(player: &Player, monster: &Monster, opts: CalcOpts) -> Result<Self, CalcError> {
        if let Some(acc) = opts.overrides.accuracy.filter(|a| !(0.0..=1.0).contains(a)) {
            return Err(CalcError::InvalidInput(format!(
                "accuracy override {} is outside [0, 1]",
                acc
            )));
        }
        opts.constants.validate()?;

        let mut player = player.clone();
        if !opts.no_init {
            player.recompute_bonuses(monster);
        }

        let scaled = if opts.disable_monster_scaling || opts.no_init {
            monster.clone()
        } else {
            scale_monster(monster)
        };

        let equipped = player.equipment.iter().map(|p| p.name.clone()).collect();
        let details = opts.detailed_output.then(|| RefCell::new(CalcDetails::new()));

        let mut calc = BaseCalc {
            player,
            monster: scaled,
            base_monster: monster.clone(),
            opts,
            equipped,
            details,
            issues: Vec::new(),
        };

        if !calc.opts.no_init {
            calc.sanitize_inputs();
            calc.validate_spell()?;
            debug!(
                loadout = %calc.opts.loadout_name,
                monster = %calc.monster.name,
                style = %calc.player.style.name,
                spec = calc.opts.using_special_attack,
                "built calculator"
            );
        }

        Ok(calc)
    }

    /// A calculator over already-sanitized inputs, sharing this one's options
    pub(crate) fn sub_calc(&self, monster: Monster, overrides: Option<Overrides>) -> BaseCalc {
        let mut opts = self.opts.clone();
        opts.no_init = true;
        opts.detailed_output = false;
        if let Some(o) = overrides {
            opts.overrides = o;
        }
        BaseCalc {
            player: self.player.clone(),
            monster,
            base_monster: self.base_monster.clone(),
            opts,
            equipped: self.equipped.clone(),
            details: None,
            issues: Vec::new(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    pub fn base_monster(&self) -> &Monster {
        &self.base_monster
    }

    pub fn opts(&self) -> &CalcOpts {
        &self.opts
    }

    pub fn user_issues(&self) -> &[UserIssue] {
        &self.issues
    }

    /// Traced values in display order; empty unless detailed output was requested
    pub fn details(&self) -> Vec<DetailEntry> {
        self.details
            .as_ref()
            .map(|d| d.borrow().lines())
            .unwrap_or_default()
    }

    pub fn detail(&self, key: DetailKey) -> Option<DetailValue> {
        self.details.as_ref().and_then(|d| d.borrow().get(key).cloned())
    }

    pub(crate) fn add_issue(&mut self, kind: UserIssueType, message: &str) {
        warn!(loadout = %self.opts.loadout_name, issue = ?kind, "{}", message);
        self.issues.push(UserIssue {
            kind,
            message: message.to_string(),
            loadout: self.opts.loadout_name.clone(),
        });
    }

    // === Detail tracking ===

    pub(crate) fn track<V: Into<DetailValue> + Copy>(&self, key: DetailKey, value: V) -> V {
        if let Some(d) = &self.details {
            d.borrow_mut().track(key, value);
        }
        value
    }

    fn track_with(&self, key: DetailKey, value: i32, working: impl FnOnce() -> String) -> i32 {
        if let Some(d) = &self.details {
            d.borrow_mut().track_working(key, value, working());
        }
        value
    }

    pub(crate) fn track_factor(&self, key: DetailKey, base: i32, factor: Factor) -> i32 {
        let result = apply_factor(base, factor);
        self.track_with(key, result, || {
            let mul = if factor.0 != 1 { format!(" * {}", factor.0) } else { String::new() };
            let div = if factor.1 != 1 { format!(" / {}", factor.1) } else { String::new() };
            format!("{}{}{} = {}", base, mul, div, result)
        })
    }

    pub(crate) fn track_add(&self, key: DetailKey, base: i32, addend: i32) -> i32 {
        let result = base + addend;
        self.track_with(key, result, || {
            if addend >= 0 {
                format!("{} +{} = {}", base, addend, result)
            } else {
                format!("{} -{} = {}", base, -addend, result)
            }
        })
    }

    pub(crate) fn track_max_hit_from_effective(&self, key: DetailKey, effective: i32, gear_bonus: i32) -> i32 {
        let result = ((effective as i64 * gear_bonus as i64 + 320) / 640) as i32;
        self.track_with(key, result, || {
            format!("({} * {} + 320) / 640 = {}", effective, gear_bonus, result)
        })
    }

    // === Input sanitizing ===

    fn sanitize_inputs(&mut self) {
        if self.monster.has(MonsterAttribute::Demon) {
            let vulnerability = self.demonbane_vulnerability();
            self.monster.inputs.demonbane_vulnerability = Some(vulnerability);
        }

        let hp = self.monster.inputs.monster_current_hp;
        if hp <= 0 || hp > self.monster.skills.hp {
            self.monster.inputs.monster_current_hp = self.monster.skills.hp;
        }

        let category = self.player.equipment.weapon_category();
        if self.opts.using_special_attack {
            if self.player.style.is_stance(Stance::ManualCast) {
                self.player.style = category.default_style();
                self.player.spell = None;
            } else if self.wearing_any(&[
                "Accursed sceptre (a)",
                "Eldritch nightmare staff",
                "Volatile nightmare staff",
            ]) {
                self.player.style = EquipmentCategory::PoweredStaff.default_style();
                self.player.spell = None;
            }
        }

        if !self.player.style.stance.is_some_and(Stance::is_cast) {
            self.player.spell = None;
        }

        if !self.player.style.is_stance(Stance::ManualCast) && self.ammo_invalid() {
            if self.player.equipment.ammo.is_some() {
                self.add_issue(
                    UserIssueType::EquipmentWrongAmmo,
                    "This ammo does not work with your current weapon.",
                );
            } else {
                self.add_issue(UserIssueType::EquipmentMissingAmmo, "Your weapon requires ammo to use.");
            }
        }

        if let Some(spell) = self.player.spell.clone() {
            let needed: &[&str] = match spell.name.as_str() {
                "Iban Blast" => &["Iban's staff", "Iban's staff (u)"],
                "Saradomin Strike" => &["Saradomin staff", "Staff of light"],
                "Claws of Guthix" => &["Guthix staff", "Void knight mace", "Staff of balance"],
                "Flames of Zamorak" => &[
                    "Zamorak staff",
                    "Staff of the dead",
                    "Toxic staff of the dead",
                    "Thammaron's sceptre (a)",
                    "Accursed sceptre (a)",
                ],
                "Magic Dart" => &[
                    "Slayer's staff",
                    "Slayer's staff (e)",
                    "Staff of the dead",
                    "Toxic staff of the dead",
                    "Staff of light",
                    "Staff of balance",
                ],
                _ => &[],
            };
            if !needed.is_empty() && !self.wearing_any(needed) {
                self.player.spell = None;
                self.add_issue(
                    UserIssueType::SpellWrongWeapon,
                    "This spell needs a specific weapon equipped to cast.",
                );
            } else if (spell.is_demonbane() && !self.monster.has(MonsterAttribute::Demon))
                || (spell.name == "Crumble Undead" && !self.monster.has(MonsterAttribute::Undead))
            {
                self.player.spell = None;
                self.add_issue(
                    UserIssueType::SpellWrongMonster,
                    "This spell cannot be cast on the selected monster.",
                );
            }
        }

        let dawnbringer_misuse = self.wearing("Dawnbringer")
            && !(ids::VERZIK_P1_IDS.contains(&self.monster.id) || self.monster.name == "Verzik Vitur" && self.monster.version == "Phase 1");
        let holy_water_misuse = self.wearing("Holy water") && !self.monster.has(MonsterAttribute::Demon);
        if dawnbringer_misuse || holy_water_misuse {
            self.add_issue(
                UserIssueType::WeaponWrongMonster,
                "This weapon cannot be used against the selected monster.",
            );
        }

        if self.wearing_all(&["Blue moon helm", "Blue moon chestplate", "Blue moon tassets", "Blue moon spear"])
            || self.wearing_all(&["Eclipse moon helm", "Eclipse moon chestplate", "Eclipse moon tassets", "Eclipse atlatl"])
        {
            self.add_issue(
                UserIssueType::EquipmentSetEffectUnsupported,
                "This set effect is not accounted for by the calculator.",
            );
        }

        if self.wearing_any(&["Ring of recoil", "Ring of suffering", "Ring of suffering (i)"]) {
            self.add_issue(
                UserIssueType::RingRecoilUnsupported,
                "The calculator does not account for recoil damage.",
            );
        }
        if self.wearing("Echo boots") {
            self.add_issue(
                UserIssueType::FeetRecoilUnsupported,
                "The calculator does not account for recoil damage.",
            );
        }
    }

    /// Spells with no usable max hit are rejected up front
    fn validate_spell(&self) -> Result<(), CalcError> {
        if let Some(spell) = &self.player.spell {
            let magic = self.player.current(|s| s.magic);
            get_spell_max_hit(spell, magic)?;
        }
        Ok(())
    }

    /// Percentage effectiveness of demonbane effects against this monster
    fn demonbane_vulnerability(&self) -> i32 {
        if self.monster.id == -1 {
            return self.monster.inputs.demonbane_vulnerability.unwrap_or(100);
        }
        if self.monster.name == "Duke Sucellus" {
            70
        } else if ids::YAMA_IDS.contains(&self.monster.id) {
            120
        } else {
            100
        }
    }

    /// Scale a demonbane bonus by the monster's vulnerability and add the base
    pub(crate) fn demonbane_factor(&self, base: Factor) -> Factor {
        let vulnerability = self.monster.inputs.demonbane_vulnerability.unwrap_or(100);
        let (num, den) = (base.0 * vulnerability, base.1 * 100);
        (num + den, den)
    }

    pub(crate) fn ammo_invalid(&self) -> bool {
        ammo_applicability(self.player.equipment.weapon.as_ref(), self.player.equipment.ammo.as_ref())
            == AmmoApplicability::Invalid
    }

    // === Equipment predicates ===

    pub(crate) fn wearing(&self, name: &str) -> bool {
        self.equipped.iter().any(|n| n == name)
    }

    pub(crate) fn wearing_any(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.wearing(n))
    }

    pub(crate) fn wearing_all(&self, names: &[&str]) -> bool {
        names.iter().all(|n| self.wearing(n))
    }

    fn wearing_containing(&self, fragment: &str) -> bool {
        self.equipped.iter().any(|n| n.contains(fragment))
    }

    pub(crate) fn style_type(&self) -> Option<StyleType> {
        self.player.style.style_type
    }

    pub(crate) fn is_using_melee(&self) -> bool {
        self.player.style.is_melee()
    }

    pub(crate) fn is_using(&self, style: StyleType) -> bool {
        self.player.is_using(style)
    }

    pub(crate) fn spec(&self) -> bool {
        self.opts.using_special_attack
    }

    pub(crate) fn weapon_name(&self) -> &str {
        self.player.equipment.weapon_name().unwrap_or("")
    }

    fn wearing_void_robes(&self) -> bool {
        self.wearing_any(&["Void knight top", "Void knight top (or)", "Elite void top", "Elite void top (or)"])
            && self.wearing_any(&["Void knight robe", "Void knight robe (or)", "Elite void robe", "Elite void robe (or)"])
            && self.wearing("Void knight gloves")
    }

    fn wearing_elite_void_robes(&self) -> bool {
        self.wearing_any(&["Elite void top", "Elite void top (or)"])
            && self.wearing_any(&["Elite void robe", "Elite void robe (or)"])
            && self.wearing("Void knight gloves")
    }

    pub(crate) fn wearing_melee_void(&self) -> bool {
        self.wearing_void_robes() && self.wearing_any(&["Void melee helm", "Void melee helm (or)"])
    }

    pub(crate) fn wearing_ranged_void(&self) -> bool {
        self.wearing_void_robes() && self.wearing_any(&["Void ranger helm", "Void ranger helm (or)"])
    }

    pub(crate) fn wearing_elite_ranged_void(&self) -> bool {
        self.wearing_elite_void_robes() && self.wearing_any(&["Void ranger helm", "Void ranger helm (or)"])
    }

    pub(crate) fn wearing_magic_void(&self) -> bool {
        self.wearing_void_robes() && self.wearing_any(&["Void mage helm", "Void mage helm (or)"])
    }

    pub(crate) fn wearing_black_mask(&self) -> bool {
        self.wearing_imbued_black_mask() || self.wearing_any(&["Black mask", "Slayer helmet"])
    }

    pub(crate) fn wearing_imbued_black_mask(&self) -> bool {
        self.wearing_any(&["Black mask (i)", "Slayer helmet (i)"])
    }

    pub(crate) fn wearing_smoke_staff(&self) -> bool {
        self.wearing_any(&["Smoke battlestaff", "Mystic smoke staff", "Twinflame staff"])
    }

    pub(crate) fn wearing_tzhaar_weapon(&self) -> bool {
        self.wearing_any(&[
            "Tzhaar-ket-em",
            "Tzhaar-ket-om",
            "Tzhaar-ket-om (t)",
            "Toktz-xil-ak",
            "Toktz-xil-ek",
            "Toktz-mej-tal",
        ])
    }

    pub(crate) fn wearing_obsidian(&self) -> bool {
        self.wearing_all(&["Obsidian helmet", "Obsidian platelegs", "Obsidian platebody"])
    }

    pub(crate) fn wearing_berserker_necklace(&self) -> bool {
        self.wearing_any(&["Berserker necklace", "Berserker necklace (or)"])
    }

    pub(crate) fn wearing_crystal_bow(&self) -> bool {
        self.wearing("Crystal bow") || self.wearing_containing("Bow of faerdhinen")
    }

    pub(crate) fn crystal_armour_pieces(&self) -> i32 {
        [("Crystal helm", 1), ("Crystal legs", 2), ("Crystal body", 3)]
            .iter()
            .filter(|(name, _)| self.wearing(name))
            .map(|(_, n)| n)
            .sum()
    }

    pub(crate) fn wearing_fang(&self) -> bool {
        self.wearing_any(&["Osmumten's fang", "Osmumten's fang (or)"])
    }

    pub(crate) fn wearing_accursed_sceptre(&self) -> bool {
        self.wearing_any(&["Accursed sceptre", "Accursed sceptre (a)"])
    }

    pub(crate) fn wearing_blowpipe(&self) -> bool {
        self.wearing_any(&["Toxic blowpipe", "Blazing blowpipe"])
    }

    pub(crate) fn wearing_scythe(&self) -> bool {
        self.wearing_containing("of vitur")
    }

    pub(crate) fn wearing_keris(&self) -> bool {
        self.wearing_containing("Keris")
    }

    pub(crate) fn wearing_dharok(&self) -> bool {
        self.wearing_all(&["Dharok's helm", "Dharok's platebody", "Dharok's platelegs", "Dharok's greataxe"])
    }

    pub(crate) fn wearing_veracs(&self) -> bool {
        self.wearing_all(&["Verac's helm", "Verac's brassard", "Verac's plateskirt", "Verac's flail"])
    }

    pub(crate) fn wearing_karils(&self) -> bool {
        self.wearing_all(&[
            "Karil's coif",
            "Karil's leathertop",
            "Karil's leatherskirt",
            "Karil's crossbow",
            "Amulet of the damned",
        ])
    }

    pub(crate) fn wearing_ahrims(&self) -> bool {
        self.wearing_all(&[
            "Ahrim's staff",
            "Ahrim's hood",
            "Ahrim's robetop",
            "Ahrim's robeskirt",
            "Amulet of the damned",
        ])
    }

    pub(crate) fn wearing_blood_moon_set(&self) -> bool {
        self.wearing_all(&["Dual macuahuitl", "Blood moon helm", "Blood moon chestplate", "Blood moon tassets"])
    }

    pub(crate) fn wearing_silver_weapon(&self) -> bool {
        let silver_bolts = self
            .player
            .equipment
            .ammo_name()
            .is_some_and(|n| n.starts_with("Silver bolts"));
        if silver_bolts && self.is_using(StyleType::Ranged) {
            return true;
        }

        self.is_using_melee()
            && self.wearing_any(&[
                "Blessed axe",
                "Ivandis flail",
                "Blisterwood flail",
                "Silver sickle",
                "Silver sickle (b)",
                "Emerald sickle",
                "Emerald sickle (b)",
                "Enchanted emerald sickle (b)",
                "Ruby sickle (b)",
                "Enchanted ruby sickle (b)",
                "Blisterwood sickle",
                "Silverlight",
                "Darklight",
                "Arclight",
                "Rod of ivandis",
                "Wolfbane",
            ])
    }

    /// Weapons able to damage tier 2 (`tier_two`) or tier 3 vampyres
    pub(crate) fn wearing_vampyrebane(&self, tier_two: bool) -> bool {
        let weapons: &[&str] = if tier_two {
            &["Rod of ivandis", "Ivandis flail", "Blisterwood sickle", "Blisterwood flail"]
        } else {
            &["Ivandis flail", "Blisterwood sickle", "Blisterwood flail"]
        };
        (tier_two || self.is_using_melee()) && self.wearing_any(weapons)
    }

    pub(crate) fn wearing_leaf_bladed_weapon(&self) -> bool {
        if self.is_using_melee()
            && self.wearing_any(&["Leaf-bladed battleaxe", "Leaf-bladed spear", "Leaf-bladed sword"])
        {
            return true;
        }
        if self.player.spell.as_ref().is_some_and(|s| s.name == "Magic Dart") {
            return true;
        }
        self.is_using(StyleType::Ranged) && self.wearing_any(&["Broad arrows", "Broad bolts", "Amethyst broad bolts"])
    }

    pub(crate) fn wearing_corpbane_weapon(&self) -> bool {
        let Some(weapon) = self.player.equipment.weapon.as_ref() else {
            return false;
        };
        let stab = self.is_using(StyleType::Stab);
        if self.wearing_fang() {
            return stab;
        }
        if weapon.name.ends_with("halberd") {
            return stab;
        }
        if weapon.name.contains("spear") && weapon.name != "Blue moon spear" {
            return stab;
        }
        self.is_using(StyleType::Magic)
    }

    pub(crate) fn rev_weapon_applicable(&self) -> bool {
        if !self.player.buffs.in_wilderness {
            return false;
        }
        let charged = self
            .player
            .equipment
            .weapon
            .as_ref()
            .is_some_and(|w| w.version == "Charged");
        if !charged {
            return false;
        }
        match self.style_type() {
            Some(StyleType::Magic) => self.wearing_any(&[
                "Accursed sceptre",
                "Accursed sceptre (a)",
                "Thammaron's sceptre",
                "Thammaron's sceptre (a)",
            ]),
            Some(StyleType::Ranged) => self.wearing_any(&["Craw's bow", "Webweaver bow"]),
            _ => self.wearing_any(&["Ursine chainmace", "Viggora's chainmace"]),
        }
    }

    pub(crate) fn wearing_rat_bone_weapon(&self) -> bool {
        self.wearing_any(&["Bone mace", "Bone shortbow", "Bone staff"])
    }

    pub(crate) fn charge_spell_applicable(&self) -> bool {
        if !self.player.buffs.charge_spell {
            return false;
        }
        let Some(spell) = &self.player.spell else {
            return false;
        };
        let capes: &[&str] = match spell.name.as_str() {
            "Saradomin Strike" => &[
                "Saradomin cape",
                "Imbued saradomin cape",
                "Saradomin max cape",
                "Imbued saradomin max cape",
            ],
            "Claws of Guthix" => &[
                "Guthix cape",
                "Imbued guthix cape",
                "Guthix max cape",
                "Imbued guthix max cape",
            ],
            "Flames of Zamorak" => &[
                "Zamorak cape",
                "Imbued zamorak cape",
                "Zamorak max cape",
                "Imbued zamorak max cape",
            ],
            _ => return false,
        };
        self.wearing_any(capes)
    }

    // === Accuracy formulas ===

    /// Chance for an attack roll to beat a defence roll
    ///
    /// Negative rolls (possible with very negative gear) are pulled two
    /// points toward zero and resolved symmetrically.
    pub fn normal_accuracy(atk: i32, def: i32) -> f64 {
        fn std_roll(attack: f64, defence: f64) -> f64 {
            if attack > defence {
                1.0 - (defence + 2.0) / (2.0 * (attack + 1.0))
            } else {
                attack / (2.0 * (defence + 1.0))
            }
        }

        let (atk, def) = pull_negative(atk, def);
        match (atk >= 0.0, def >= 0.0) {
            (true, true) => std_roll(atk, def),
            (true, false) => 1.0 - 1.0 / (-def + 1.0) / (atk + 1.0),
            (false, true) => 0.0,
            (false, false) => std_roll(-def, -atk),
        }
    }

    /// Accuracy when the better of two attack rolls is kept
    pub fn fang_accuracy(atk: i32, def: i32) -> f64 {
        let (atk, def) = pull_negative(atk, def);
        let std_roll = |a: f64, d: f64| {
            if a > def {
                1.0 - (d + 2.0) * (2.0 * d + 3.0) / (a + 1.0) / (a + 1.0) / 6.0
            } else {
                a * (4.0 * a + 5.0) / 6.0 / (a + 1.0) / (d + 1.0)
            }
        };
        let rv_roll = |a: f64, d: f64| {
            if a < def {
                a * (d * 6.0 - 2.0 * a + 5.0) / 6.0 / (d + 1.0) / (d + 1.0)
            } else {
                1.0 - (d + 2.0) * (2.0 * d + 3.0) / 6.0 / (d + 1.0) / (a + 1.0)
            }
        };

        match (atk >= 0.0, def >= 0.0) {
            (true, true) => std_roll(atk, def),
            (true, false) => 1.0 - 1.0 / (-def + 1.0) / (atk + 1.0),
            (false, true) => 0.0,
            (false, false) => rv_roll(-def, -atk),
        }
    }
}

fn pull_negative(atk: i32, def: i32) -> (f64, f64) {
    let pull = |v: i32| if v < 0 { (v + 2).min(0) } else { v };
    (pull(atk) as f64, pull(def) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CombatStyle, EquipmentPiece, EquipmentSlot, Spell, Spellbook};

    fn demon() -> Monster {
        let mut m = Monster {
            id: 415,
            name: "Abyssal demon".to_string(),
            attributes: vec![MonsterAttribute::Demon],
            ..Default::default()
        };
        m.skills.hp = 150;
        m
    }

    #[test]
    fn test_opts_builders() {
        let opts = CalcOpts::new("spec").detailed().special_attack().without_scaling().with_overrides(Overrides {
            accuracy: Some(0.5),
            ..Default::default()
        });
        assert_eq!(opts.loadout_name, "spec");
        assert!(opts.detailed_output && opts.using_special_attack && opts.disable_monster_scaling);
        assert_eq!(opts.overrides.accuracy, Some(0.5));
        assert!(!opts.no_init);
    }

    #[test]
    fn test_without_scaling_keeps_monster() {
        let mut m = demon();
        m.skills.def = 135;
        m.inputs.defence_reductions.dwh = 1;

        let scaled = BaseCalc::new(&Player::default(), &m, CalcOpts::default()).unwrap();
        assert_eq!(scaled.monster().skills.def, 95);

        let raw = BaseCalc::new(&Player::default(), &m, CalcOpts::default().without_scaling()).unwrap();
        assert_eq!(raw.monster().skills.def, 135);
    }

    #[test]
    fn test_normal_accuracy() {
        assert!((BaseCalc::normal_accuracy(7040, 12096) - 0.29098).abs() < 1e-4);
        assert!((BaseCalc::normal_accuracy(100, 50) - (1.0 - 52.0 / 202.0)).abs() < 1e-12);
        assert_eq!(BaseCalc::normal_accuracy(0, 100), 0.0);
    }

    #[test]
    fn test_negative_rolls() {
        assert_eq!(BaseCalc::normal_accuracy(-50, 100), 0.0);
        // -1 pulls up to 0, which still hits a negative defence
        assert!((BaseCalc::normal_accuracy(100, -10) - (1.0 - 1.0 / 9.0 / 101.0)).abs() < 1e-12);
        let both = BaseCalc::normal_accuracy(-20, -40);
        assert!((both - (1.0 - 20.0 / (2.0 * 39.0))).abs() < 1e-12);
    }

    #[test]
    fn test_fang_beats_normal() {
        for (a, d) in [(10_000, 20_000), (20_000, 10_000), (5_000, 5_000)] {
            assert!(BaseCalc::fang_accuracy(a, d) > BaseCalc::normal_accuracy(a, d));
        }
    }

    #[test]
    fn test_demonbane_factor() {
        let calc = BaseCalc::new(&Player::default(), &demon(), CalcOpts::default()).unwrap();
        assert_eq!(calc.monster.inputs.demonbane_vulnerability, Some(100));
        let f = calc.demonbane_factor((7, 10));
        assert_eq!(apply_factor(100, f), 170);

        let mut duke = demon();
        duke.name = "Duke Sucellus".to_string();
        duke.id = 12191;
        let calc = BaseCalc::new(&Player::default(), &duke, CalcOpts::default()).unwrap();
        assert_eq!(apply_factor(1000, calc.demonbane_factor((7, 10))), 1490);
    }

    #[test]
    fn test_sanitize_current_hp_and_spell() {
        let mut m = demon();
        m.inputs.monster_current_hp = 900;
        let mut player = Player::default();
        player.spell = Some(Spell::new("Fire Surge", 24, Spellbook::Standard, None));
        let calc = BaseCalc::new(&player, &m, CalcOpts::default()).unwrap();
        assert_eq!(calc.monster.inputs.monster_current_hp, 150);
        // punching is not a cast stance
        assert!(calc.player.spell.is_none());
    }

    #[test]
    fn test_wrong_spell_weapon_issue() {
        let mut player = Player::default();
        player.style = CombatStyle::manual_cast();
        player.spell = Some(Spell::new("Iban Blast", 25, Spellbook::Standard, None));
        let calc = BaseCalc::new(&player, &demon(), CalcOpts::default()).unwrap();
        assert!(calc.player.spell.is_none());
        assert_eq!(calc.user_issues()[0].kind, UserIssueType::SpellWrongWeapon);
    }

    #[test]
    fn test_missing_ammo_issue() {
        let mut bow = EquipmentPiece::named("Magic shortbow", EquipmentSlot::Weapon);
        bow.category = EquipmentCategory::Bow;
        bow.compatible_ammo = vec!["Amethyst arrow".to_string()];
        let player = Player::default().with_equipment([bow]);
        let calc = BaseCalc::new(&player, &demon(), CalcOpts::default()).unwrap();
        assert!(calc.ammo_invalid());
        assert_eq!(calc.user_issues()[0].kind, UserIssueType::EquipmentMissingAmmo);
    }

    #[test]
    fn test_unknown_dynamic_spell_fails() {
        let mut player = Player::default();
        player.style = CombatStyle::manual_cast();
        player.spell = Some(Spell::new("Mystery Blast", 0, Spellbook::Standard, None));
        let err = BaseCalc::new(&player, &demon(), CalcOpts::default()).unwrap_err();
        assert!(matches!(err, CalcError::UnknownSpellMaxHit(_)));
    }

    #[test]
    fn test_rejects_bad_options() {
        let mut opts = CalcOpts::default();
        opts.overrides.accuracy = Some(1.5);
        let err = BaseCalc::new(&Player::default(), &demon(), opts).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));

        let mut opts = CalcOpts::default();
        opts.constants.ttk.epsilon = 0.0;
        let err = BaseCalc::new(&Player::default(), &demon(), opts).unwrap_err();
        assert!(matches!(err, CalcError::Config(_)));
    }

    #[test]
    fn test_tracking_only_when_detailed() {
        let calc = BaseCalc::new(&Player::default(), &demon(), CalcOpts::default()).unwrap();
        assert_eq!(calc.track_factor(DetailKey::MaxHitBase, 100, (7, 6)), 116);
        assert!(calc.details().is_empty());

        let calc = BaseCalc::new(&Player::default(), &demon(), CalcOpts::default().detailed()).unwrap();
        calc.track_add(DetailKey::MaxHitObsidian, 40, 4);
        calc.track_add(DetailKey::MaxHitBase, 40, -5);
        let lines = calc.details();
        let working = |key: DetailKey| lines.iter().find(|l| l.key == key).and_then(|l| l.working.clone());
        assert_eq!(calc.detail(DetailKey::MaxHitObsidian), Some(DetailValue::Int(44)));
        assert_eq!(working(DetailKey::MaxHitObsidian).as_deref(), Some("40 +4 = 44"));
        assert_eq!(working(DetailKey::MaxHitBase).as_deref(), Some("40 -5 = 35"));
    }
}
