//! Combat styles, stances and weapon categories

use serde::{Deserialize, Serialize};

/// The attack type of a combat style, also the monster's defensive bonus used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleType {
    Stab,
    Slash,
    Crush,
    Magic,
    Ranged,
}

impl StyleType {
    pub fn is_melee(self) -> bool {
        matches!(self, StyleType::Stab | StyleType::Slash | StyleType::Crush)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    Accurate,
    Aggressive,
    Controlled,
    Defensive,
    Rapid,
    Longrange,
    Autocast,
    #[serde(rename = "Defensive Autocast")]
    DefensiveAutocast,
    /// Pseudo stance for casting a spell without autocasting it
    #[serde(rename = "Manual Cast")]
    ManualCast,
}

impl Stance {
    pub fn is_autocast(self) -> bool {
        matches!(self, Stance::Autocast | Stance::DefensiveAutocast)
    }

    pub fn is_cast(self) -> bool {
        self.is_autocast() || self == Stance::ManualCast
    }
}

/// A selectable combat style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStyle {
    pub name: String,
    /// `None` for non-attacking styles such as a bulwark's block
    #[serde(rename = "type")]
    pub style_type: Option<StyleType>,
    pub stance: Option<Stance>,
}

impl CombatStyle {
    pub fn new(name: &str, style_type: StyleType, stance: Stance) -> Self {
        CombatStyle {
            name: name.to_string(),
            style_type: Some(style_type),
            stance: Some(stance),
        }
    }

    pub fn manual_cast() -> Self {
        CombatStyle::new("Spell", StyleType::Magic, Stance::ManualCast)
    }

    pub fn is_type(&self, t: StyleType) -> bool {
        self.style_type == Some(t)
    }

    pub fn is_melee(&self) -> bool {
        self.style_type.is_some_and(StyleType::is_melee)
    }

    pub fn is_stance(&self, s: Stance) -> bool {
        self.stance == Some(s)
    }
}

impl Default for CombatStyle {
    fn default() -> Self {
        CombatStyle::new("Punch", StyleType::Crush, Stance::Accurate)
    }
}

/// Weapon category, which decides the available combat styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EquipmentCategory {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "2h Sword")]
    TwoHandedSword,
    Axe,
    Banner,
    #[serde(rename = "Bladed Staff")]
    BladedStaff,
    Blaster,
    Bludgeon,
    Blunt,
    Bow,
    Bulwark,
    #[serde(rename = "Chinchompas")]
    Chinchompa,
    Claw,
    Crossbow,
    Dagger,
    Gun,
    Partisan,
    Pickaxe,
    Polearm,
    Polestaff,
    #[serde(rename = "Powered Staff")]
    PoweredStaff,
    #[serde(rename = "Powered Wand")]
    PoweredWand,
    Salamander,
    Scythe,
    #[serde(rename = "Slash Sword")]
    SlashSword,
    Spear,
    Spiked,
    #[serde(rename = "Stab Sword")]
    StabSword,
    Staff,
    Thrown,
    Unarmed,
    Whip,
}

impl EquipmentCategory {
    /// Styles offered by this category, always ending with manual casting
    pub fn combat_styles(self) -> Vec<CombatStyle> {
        use EquipmentCategory as C;
        use Stance::*;
        use StyleType::*;

        let table: &[(&str, StyleType, Stance)] = match self {
            C::TwoHandedSword => &[
                ("Chop", Slash, Accurate),
                ("Slash", Slash, Aggressive),
                ("Smash", Crush, Aggressive),
                ("Block", Slash, Defensive),
            ],
            C::Banner => &[
                ("Lunge", Stab, Accurate),
                ("Swipe", Slash, Aggressive),
                ("Pound", Crush, Controlled),
                ("Block", Stab, Defensive),
            ],
            C::BladedStaff => &[
                ("Jab", Stab, Accurate),
                ("Swipe", Slash, Aggressive),
                ("Fend", Crush, Defensive),
                ("Spell", Magic, DefensiveAutocast),
                ("Spell", Magic, Autocast),
            ],
            C::Blaster => return Vec::new(),
            C::Bow | C::Crossbow | C::Thrown => &[
                ("Accurate", Ranged, Accurate),
                ("Rapid", Ranged, Rapid),
                ("Longrange", Ranged, Longrange),
            ],
            C::Gun => &[("Kick", Crush, Aggressive)],
            C::Bulwark => &[("Pummel", Crush, Accurate)],
            C::Partisan => &[
                ("Stab", Stab, Accurate),
                ("Lunge", Stab, Aggressive),
                ("Pound", Crush, Aggressive),
                ("Block", Stab, Defensive),
            ],
            C::Pickaxe => &[
                ("Spike", Stab, Accurate),
                ("Impale", Stab, Aggressive),
                ("Smash", Crush, Aggressive),
                ("Block", Stab, Defensive),
            ],
            C::Polearm => &[
                ("Jab", Stab, Controlled),
                ("Swipe", Slash, Aggressive),
                ("Fend", Stab, Defensive),
            ],
            C::PoweredStaff | C::PoweredWand => &[
                ("Accurate", Magic, Accurate),
                ("Accurate", Magic, Accurate),
                ("Longrange", Magic, Longrange),
            ],
            C::Salamander => &[
                ("Scorch", Slash, Aggressive),
                ("Flare", Ranged, Rapid),
                ("Blaze", Magic, Defensive),
            ],
            C::Chinchompa => &[
                ("Short fuse", Ranged, Accurate),
                ("Medium fuse", Ranged, Rapid),
                ("Long fuse", Ranged, Longrange),
            ],
            C::Claw | C::SlashSword => &[
                ("Chop", Slash, Accurate),
                ("Slash", Slash, Aggressive),
                ("Lunge", Stab, Controlled),
                ("Block", Slash, Defensive),
            ],
            C::Bludgeon => &[
                ("Pound", Crush, Aggressive),
                ("Pummel", Crush, Aggressive),
                ("Smash", Crush, Aggressive),
            ],
            C::Blunt => &[
                ("Pound", Crush, Accurate),
                ("Pummel", Crush, Aggressive),
                ("Block", Crush, Defensive),
            ],
            C::Polestaff => &[
                ("Bash", Crush, Accurate),
                ("Pound", Crush, Aggressive),
                ("Block", Crush, Defensive),
            ],
            C::Spiked => &[
                ("Pound", Crush, Accurate),
                ("Pummel", Crush, Aggressive),
                ("Spike", Stab, Controlled),
                ("Block", Crush, Defensive),
            ],
            C::Staff => &[
                ("Bash", Crush, Accurate),
                ("Pound", Crush, Aggressive),
                ("Focus", Crush, Defensive),
                ("Spell", Magic, DefensiveAutocast),
                ("Spell", Magic, Autocast),
            ],
            C::Axe => &[
                ("Chop", Slash, Accurate),
                ("Hack", Slash, Aggressive),
                ("Smash", Crush, Aggressive),
                ("Block", Slash, Defensive),
            ],
            C::None | C::Unarmed => &[
                ("Punch", Crush, Accurate),
                ("Kick", Crush, Aggressive),
                ("Block", Crush, Defensive),
            ],
            C::Scythe => &[
                ("Reap", Slash, Accurate),
                ("Chop", Slash, Aggressive),
                ("Jab", Crush, Aggressive),
                ("Block", Slash, Defensive),
            ],
            C::Spear => &[
                ("Lunge", Stab, Controlled),
                ("Swipe", Slash, Controlled),
                ("Pound", Crush, Controlled),
                ("Block", Stab, Defensive),
            ],
            C::StabSword | C::Dagger => &[
                ("Stab", Stab, Accurate),
                ("Lunge", Stab, Aggressive),
                ("Slash", Slash, Aggressive),
                ("Block", Stab, Defensive),
            ],
            C::Whip => &[
                ("Flick", Slash, Accurate),
                ("Lash", Slash, Controlled),
                ("Deflect", Slash, Defensive),
            ],
        };

        let mut styles: Vec<CombatStyle> = table
            .iter()
            .map(|&(name, t, s)| CombatStyle::new(name, t, s))
            .collect();
        if self == C::Bulwark {
            styles.push(CombatStyle {
                name: "Block".to_string(),
                style_type: None,
                stance: None,
            });
        }
        styles.push(CombatStyle::manual_cast());
        styles
    }

    /// The style a freshly equipped weapon starts on
    pub fn default_style(self) -> CombatStyle {
        self.combat_styles()
            .into_iter()
            .next()
            .unwrap_or_else(CombatStyle::manual_cast)
    }

    pub fn is_magic_weapon(self) -> bool {
        matches!(
            self,
            EquipmentCategory::Staff
                | EquipmentCategory::PoweredWand
                | EquipmentCategory::PoweredStaff
                | EquipmentCategory::BladedStaff
                | EquipmentCategory::Polestaff
        )
    }
}

/// Which of a monster's ranged defence bonuses an attack is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangedDamageType {
    Light,
    Standard,
    Heavy,
    /// Average of all three
    Mixed,
}

impl RangedDamageType {
    pub fn for_category(category: EquipmentCategory) -> Self {
        match category {
            EquipmentCategory::Thrown => RangedDamageType::Light,
            EquipmentCategory::Crossbow | EquipmentCategory::Chinchompa => RangedDamageType::Heavy,
            EquipmentCategory::Salamander => RangedDamageType::Mixed,
            _ => RangedDamageType::Standard,
        }
    }
}
