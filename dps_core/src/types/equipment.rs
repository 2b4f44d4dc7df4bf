//! Equipment pieces and bonus vectors

use super::style::{EquipmentCategory, StyleType};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Equipment slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Head,
    Cape,
    Neck,
    Ammo,
    Weapon,
    Body,
    Shield,
    Legs,
    Hands,
    Feet,
    Ring,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 11] = [
        EquipmentSlot::Head,
        EquipmentSlot::Cape,
        EquipmentSlot::Neck,
        EquipmentSlot::Ammo,
        EquipmentSlot::Weapon,
        EquipmentSlot::Body,
        EquipmentSlot::Shield,
        EquipmentSlot::Legs,
        EquipmentSlot::Hands,
        EquipmentSlot::Feet,
        EquipmentSlot::Ring,
    ];
}

/// One value per attack type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleBonuses {
    pub stab: i32,
    pub slash: i32,
    pub crush: i32,
    pub magic: i32,
    pub ranged: i32,
}

impl StyleBonuses {
    pub fn get(&self, style: StyleType) -> i32 {
        match style {
            StyleType::Stab => self.stab,
            StyleType::Slash => self.slash,
            StyleType::Crush => self.crush,
            StyleType::Magic => self.magic,
            StyleType::Ranged => self.ranged,
        }
    }
}

impl AddAssign for StyleBonuses {
    fn add_assign(&mut self, rhs: Self) {
        self.stab += rhs.stab;
        self.slash += rhs.slash;
        self.crush += rhs.crush;
        self.magic += rhs.magic;
        self.ranged += rhs.ranged;
    }
}

/// Strength-type and prayer bonuses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherBonuses {
    pub str: i32,
    pub ranged_str: i32,
    /// Magic damage in tenths of a percent
    pub magic_str: i32,
    pub prayer: i32,
}

impl AddAssign for OtherBonuses {
    fn add_assign(&mut self, rhs: Self) {
        self.str += rhs.str;
        self.ranged_str += rhs.ranged_str;
        self.magic_str += rhs.magic_str;
        self.prayer += rhs.prayer;
    }
}

/// Total bonuses of a loadout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentBonuses {
    pub offensive: StyleBonuses,
    pub defensive: StyleBonuses,
    pub bonuses: OtherBonuses,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentPiece {
    pub name: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub version: String,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub category: EquipmentCategory,
    /// Attack speed in ticks, weapons only
    #[serde(default)]
    pub speed: u32,
    #[serde(default)]
    pub is_two_handed: bool,
    #[serde(default)]
    pub offensive: StyleBonuses,
    #[serde(default)]
    pub defensive: StyleBonuses,
    #[serde(default)]
    pub bonuses: OtherBonuses,
    /// Ammo names this weapon fires; empty when it needs no ammo
    #[serde(default)]
    pub compatible_ammo: Vec<String>,
    /// Dart loaded into a blowpipe
    #[serde(default)]
    pub dart: Option<Box<EquipmentPiece>>,
}

impl EquipmentPiece {
    /// A piece with no bonuses, mostly useful in tests
    pub fn named(name: &str, slot: EquipmentSlot) -> Self {
        EquipmentPiece {
            name: name.to_string(),
            id: 0,
            version: String::new(),
            slot,
            category: EquipmentCategory::None,
            speed: 0,
            is_two_handed: false,
            offensive: StyleBonuses::default(),
            defensive: StyleBonuses::default(),
            bonuses: OtherBonuses::default(),
            compatible_ammo: Vec::new(),
            dart: None,
        }
    }

    pub fn name_is(&self, names: &[&str]) -> bool {
        names.contains(&self.name.as_str())
    }
}

/// Worn equipment, one optional piece per slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub head: Option<EquipmentPiece>,
    pub cape: Option<EquipmentPiece>,
    pub neck: Option<EquipmentPiece>,
    pub ammo: Option<EquipmentPiece>,
    pub weapon: Option<EquipmentPiece>,
    pub body: Option<EquipmentPiece>,
    pub shield: Option<EquipmentPiece>,
    pub legs: Option<EquipmentPiece>,
    pub hands: Option<EquipmentPiece>,
    pub feet: Option<EquipmentPiece>,
    pub ring: Option<EquipmentPiece>,
}

impl Equipment {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquipmentPiece> {
        self.slot_ref(slot).as_ref()
    }

    /// Put a piece in its own slot, returning what was there
    pub fn equip(&mut self, piece: EquipmentPiece) -> Option<EquipmentPiece> {
        if piece.slot == EquipmentSlot::Weapon && piece.is_two_handed {
            self.shield = None;
        }
        let slot = piece.slot;
        self.slot_mut(slot).replace(piece)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<EquipmentPiece> {
        self.slot_mut(slot).take()
    }

    /// All worn pieces in slot order
    pub fn iter(&self) -> impl Iterator<Item = &EquipmentPiece> {
        EquipmentSlot::ALL.into_iter().filter_map(move |s| self.get(s))
    }

    pub fn weapon_name(&self) -> Option<&str> {
        self.weapon.as_ref().map(|w| w.name.as_str())
    }

    pub fn ammo_name(&self) -> Option<&str> {
        self.ammo.as_ref().map(|a| a.name.as_str())
    }

    pub fn weapon_category(&self) -> EquipmentCategory {
        self.weapon.as_ref().map(|w| w.category).unwrap_or_default()
    }

    fn slot_ref(&self, slot: EquipmentSlot) -> &Option<EquipmentPiece> {
        match slot {
            EquipmentSlot::Head => &self.head,
            EquipmentSlot::Cape => &self.cape,
            EquipmentSlot::Neck => &self.neck,
            EquipmentSlot::Ammo => &self.ammo,
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Body => &self.body,
            EquipmentSlot::Shield => &self.shield,
            EquipmentSlot::Legs => &self.legs,
            EquipmentSlot::Hands => &self.hands,
            EquipmentSlot::Feet => &self.feet,
            EquipmentSlot::Ring => &self.ring,
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<EquipmentPiece> {
        match slot {
            EquipmentSlot::Head => &mut self.head,
            EquipmentSlot::Cape => &mut self.cape,
            EquipmentSlot::Neck => &mut self.neck,
            EquipmentSlot::Ammo => &mut self.ammo,
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Body => &mut self.body,
            EquipmentSlot::Shield => &mut self.shield,
            EquipmentSlot::Legs => &mut self.legs,
            EquipmentSlot::Hands => &mut self.hands,
            EquipmentSlot::Feet => &mut self.feet,
            EquipmentSlot::Ring => &mut self.ring,
        }
    }
}
