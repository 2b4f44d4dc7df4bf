//! Trace of intermediate calculation values
//!
//! Each calculator owns a `CalcDetails` when detailed output is requested.
//! Entries are keyed by `DetailKey`; writing a key again replaces its value,
//! and lines always come back in key order.

use std::collections::BTreeMap;
use std::fmt;

/// Named intermediate values, declared in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DetailKey {
    // === NPC defence ===
    DefenceRollLevel,
    DefenceRollEffectiveLevel,
    DefenceStatBonus,
    DefenceRollBase,
    DefenceRollToa,
    DefenceRollFinal,

    // === Player accuracy ===
    AccuracyLevel,
    AccuracyPrayerBonus,
    AccuracyStanceBonus,
    AccuracyEffectiveLevel,
    AccuracyEffectiveLevelVoid,
    AccuracyGearBonus,
    AccuracyRollBase,
    AccuracyObsidianBonus,
    AccuracyForinthrySurgeBonus,
    AccuracyMagicPercent,
    AccuracyEfaritayBonus,
    AccuracySmokeStaffBonus,
    AccuracySalveBonus,
    AccuracyBlackMaskBonus,
    AccuracyRevWeaponBonus,
    AccuracyDemonbaneBonus,
    AccuracyDragonhunterBonus,
    AccuracyCrystalBonus,
    AccuracyTwistedBowBonus,
    AccuracyKerisBonus,
    AccuracyVampyrebaneBonus,
    AccuracyInqBonus,
    AccuracyTomeBonus,
    AccuracyWeaknessBonus,
    AccuracySpecBonus,
    AccuracyRollFinal,

    // === Player damage ===
    DamageLevel,
    DamagePrayerBonus,
    DamageSoulreaperBonus,
    DamageStanceBonus,
    DamageEffectiveLevel,
    DamageEffectiveLevelVoid,
    DamageGearBonus,
    MaxHitBase,
    MaxHitChargeSpell,
    MaxHitMagicDmgBonus,
    MaxHitForinthrySurgeBonus,
    MaxHitSalveBonus,
    MaxHitBlackMaskBonus,
    MaxHitDemonbaneBonus,
    MaxHitObsidianBonus,
    MaxHitObsidian,
    MaxHitBerserkerBonus,
    MaxHitDragonhunterBonus,
    MaxHitCrystalBonus,
    MaxHitTwistedBowBonus,
    MaxHitKerisBonus,
    MaxHitGolembaneBonus,
    MaxHitRevWeaponBonus,
    MaxHitVampyrebaneBonus,
    MaxHitEfaritayBonus,
    MaxHitLeafyBonus,
    MaxHitColossalBladeBonus,
    MaxHitRatbaneBonus,
    MaxHitInqBonus,
    MaxHitTonalztics,
    MaxHitWeaknessBonus,
    MaxHitTomeBonus,
    MaxHitFang,
    MaxHitSpecBonus,
    MinHitFang,
    MinHitSpec,
    MinHitSunfire,
    MinHitFinal,
    MaxHitFinal,

    // === Hit chance ===
    PlayerAccuracyDawnbringer,
    PlayerAccuracyScurriusRat,
    PlayerAccuracyBase,
    PlayerAccuracyBrimstone,
    PlayerAccuracyFangToa,
    PlayerAccuracyFang,
    PlayerAccuracyFinal,

    // === Distribution ===
    GuardiansDmgBonus,
    HitDistFinalMin,
    HitDistFinalMax,
    HitDistFinalExpected,
}

impl DetailKey {
    pub fn label(self) -> &'static str {
        use DetailKey::*;
        match self {
            DefenceRollLevel => "Defence level",
            DefenceRollEffectiveLevel => "Defence effective level",
            DefenceStatBonus => "Defence stat bonus",
            DefenceRollBase => "Defence base roll",
            DefenceRollToa => "Defence ToA roll",
            DefenceRollFinal => "Defence roll",
            AccuracyLevel => "Accuracy level",
            AccuracyPrayerBonus => "Accuracy prayer bonus",
            AccuracyStanceBonus => "Accuracy stance bonus",
            AccuracyEffectiveLevel => "Accuracy effective level",
            AccuracyEffectiveLevelVoid => "Accuracy void effective level",
            AccuracyGearBonus => "Accuracy gear bonus",
            AccuracyRollBase => "Accuracy base roll",
            AccuracyObsidianBonus => "Accuracy obsidian bonus",
            AccuracyForinthrySurgeBonus => "Accuracy forinthry surge bonus",
            AccuracyMagicPercent => "Accuracy magic percentage bonus",
            AccuracyEfaritayBonus => "Accuracy efaritay's aid bonus",
            AccuracySmokeStaffBonus => "Accuracy smoke staff bonus",
            AccuracySalveBonus => "Accuracy salve amulet bonus",
            AccuracyBlackMaskBonus => "Accuracy black mask bonus",
            AccuracyRevWeaponBonus => "Accuracy revenant weapon bonus",
            AccuracyDemonbaneBonus => "Accuracy demonbane bonus",
            AccuracyDragonhunterBonus => "Accuracy dragonhunter bonus",
            AccuracyCrystalBonus => "Accuracy crystal armour bonus",
            AccuracyTwistedBowBonus => "Accuracy twisted bow bonus",
            AccuracyKerisBonus => "Accuracy keris bonus",
            AccuracyVampyrebaneBonus => "Accuracy vampyrebane bonus",
            AccuracyInqBonus => "Accuracy inquisitor's bonus",
            AccuracyTomeBonus => "Accuracy tome bonus",
            AccuracyWeaknessBonus => "Accuracy elemental weakness bonus",
            AccuracySpecBonus => "Accuracy special attack bonus",
            AccuracyRollFinal => "Accuracy roll",
            DamageLevel => "Damage level",
            DamagePrayerBonus => "Damage prayer bonus",
            DamageSoulreaperBonus => "Damage soulreaper axe bonus",
            DamageStanceBonus => "Damage stance bonus",
            DamageEffectiveLevel => "Damage effective level",
            DamageEffectiveLevelVoid => "Damage void effective level",
            DamageGearBonus => "Damage gear bonus",
            MaxHitBase => "Base max hit",
            MaxHitChargeSpell => "Max hit charge spell bonus",
            MaxHitMagicDmgBonus => "Max hit magic damage bonus",
            MaxHitForinthrySurgeBonus => "Max hit forinthry surge bonus",
            MaxHitSalveBonus => "Max hit salve amulet bonus",
            MaxHitBlackMaskBonus => "Max hit black mask bonus",
            MaxHitDemonbaneBonus => "Max hit demonbane bonus",
            MaxHitObsidianBonus => "Max hit obsidian bonus",
            MaxHitObsidian => "Obsidian max hit",
            MaxHitBerserkerBonus => "Max hit berserker necklace bonus",
            MaxHitDragonhunterBonus => "Max hit dragonhunter bonus",
            MaxHitCrystalBonus => "Max hit crystal armour bonus",
            MaxHitTwistedBowBonus => "Max hit twisted bow bonus",
            MaxHitKerisBonus => "Max hit keris bonus",
            MaxHitGolembaneBonus => "Max hit golembane bonus",
            MaxHitRevWeaponBonus => "Max hit revenant weapon bonus",
            MaxHitVampyrebaneBonus => "Max hit vampyrebane bonus",
            MaxHitEfaritayBonus => "Max hit efaritay's aid bonus",
            MaxHitLeafyBonus => "Max hit leafy bonus",
            MaxHitColossalBladeBonus => "Max hit colossal blade bonus",
            MaxHitRatbaneBonus => "Max hit ratbane bonus",
            MaxHitInqBonus => "Max hit inquisitor's bonus",
            MaxHitTonalztics => "Max hit tonalztics",
            MaxHitWeaknessBonus => "Max hit elemental weakness bonus",
            MaxHitTomeBonus => "Max hit tome bonus",
            MaxHitFang => "Max hit fang",
            MaxHitSpecBonus => "Max hit special attack bonus",
            MinHitFang => "Min hit fang",
            MinHitSpec => "Min hit special attack",
            MinHitSunfire => "Min hit sunfire runes",
            MinHitFinal => "Min hit",
            MaxHitFinal => "Max hit",
            PlayerAccuracyDawnbringer => "Accuracy override dawnbringer",
            PlayerAccuracyScurriusRat => "Accuracy override giant rat",
            PlayerAccuracyBase => "Accuracy base",
            PlayerAccuracyBrimstone => "Accuracy brimstone ring",
            PlayerAccuracyFangToa => "Accuracy fang toa",
            PlayerAccuracyFang => "Accuracy fang",
            PlayerAccuracyFinal => "Accuracy",
            GuardiansDmgBonus => "Guardians hit multiplier",
            HitDistFinalMin => "Hit distribution min",
            HitDistFinalMax => "Hit distribution max",
            HitDistFinalExpected => "Hit distribution expected",
        }
    }

    /// Keys worth emphasising when rendered
    pub fn is_highlight(self) -> bool {
        matches!(
            self,
            DetailKey::DefenceRollFinal
                | DetailKey::AccuracyRollFinal
                | DetailKey::MaxHitBase
                | DetailKey::MaxHitFinal
                | DetailKey::PlayerAccuracyFinal
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl DetailValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DetailValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            DetailValue::Int(v) => Some(*v as f64),
            DetailValue::Float(v) => Some(*v),
            DetailValue::Text(_) => None,
        }
    }
}

impl fmt::Display for DetailValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailValue::Int(v) => write!(f, "{}", v),
            DetailValue::Float(v) if v.fract() == 0.0 => write!(f, "{}", v),
            DetailValue::Float(v) => write!(f, "{:.4}", v),
            DetailValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for DetailValue {
    fn from(v: i32) -> Self {
        DetailValue::Int(v as i64)
    }
}

impl From<u32> for DetailValue {
    fn from(v: u32) -> Self {
        DetailValue::Int(v as i64)
    }
}

impl From<f64> for DetailValue {
    fn from(v: f64) -> Self {
        DetailValue::Float(v)
    }
}

impl From<String> for DetailValue {
    fn from(v: String) -> Self {
        DetailValue::Text(v)
    }
}

/// One rendered trace line
#[derive(Debug, Clone, PartialEq)]
pub struct DetailEntry {
    pub key: DetailKey,
    pub value: DetailValue,
    /// How the value was derived, e.g. `110 * 146 = 16060`
    pub working: Option<String>,
    pub highlight: bool,
}

impl DetailEntry {
    pub fn label(&self) -> &'static str {
        self.key.label()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CalcDetails {
    entries: BTreeMap<DetailKey, DetailEntry>,
}

impl CalcDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, key: DetailKey, value: impl Into<DetailValue>) {
        self.insert(key, value.into(), None);
    }

    pub fn track_working(&mut self, key: DetailKey, value: impl Into<DetailValue>, working: String) {
        self.insert(key, value.into(), Some(working));
    }

    fn insert(&mut self, key: DetailKey, value: DetailValue, working: Option<String>) {
        self.entries.insert(
            key,
            DetailEntry {
                key,
                value,
                working,
                highlight: key.is_highlight(),
            },
        );
    }

    pub fn get(&self, key: DetailKey) -> Option<&DetailValue> {
        self.entries.get(&key).map(|e| &e.value)
    }

    /// All entries in key order
    pub fn lines(&self) -> Vec<DetailEntry> {
        self.entries.values().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
