//! Read-only monster, equipment and spell tables

use super::{load_json, load_toml, parse_toml, ConfigError};
use crate::types::{EquipmentPiece, Monster, Spell};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MonsterTable {
    #[serde(default)]
    monsters: Vec<Monster>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct EquipmentTable {
    #[serde(default)]
    equipment: Vec<EquipmentPiece>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SpellTable {
    #[serde(default)]
    spells: Vec<Spell>,
}

/// Static game data consumed by the calculators
///
/// Lookups hand out owned clones so callers can freely adjust inputs
/// without touching the tables.
#[derive(Debug, Clone, Default)]
pub struct DataSource {
    monsters: Vec<Monster>,
    equipment: Vec<EquipmentPiece>,
    spells: Vec<Spell>,
}

impl DataSource {
    pub fn new(monsters: Vec<Monster>, equipment: Vec<EquipmentPiece>, spells: Vec<Spell>) -> Self {
        DataSource {
            monsters,
            equipment,
            spells,
        }
    }

    /// Tables shipped with the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        let monsters: MonsterTable = parse_toml(include_str!("../../data/monsters.toml"))?;
        let equipment: EquipmentTable = parse_toml(include_str!("../../data/equipment.toml"))?;
        let spells: SpellTable = parse_toml(include_str!("../../data/spells.toml"))?;
        Ok(DataSource::new(monsters.monsters, equipment.equipment, spells.spells))
    }

    /// Load `monsters`, `equipment` and `spells` tables from a directory
    ///
    /// Each table may be stored as `.toml` or `.json`; a missing table is empty.
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let monsters: MonsterTable = load_table(dir, "monsters")?;
        let equipment: EquipmentTable = load_table(dir, "equipment")?;
        let spells: SpellTable = load_table(dir, "spells")?;
        Ok(DataSource::new(monsters.monsters, equipment.equipment, spells.spells))
    }

    /// Find a monster by name, optionally narrowed to one version
    pub fn monster(&self, name: &str, version: Option<&str>) -> Result<Monster, ConfigError> {
        self.monsters
            .iter()
            .find(|m| m.name == name && version.map_or(true, |v| m.version == v))
            .cloned()
            .ok_or_else(|| not_found("monster", name, version))
    }

    pub fn monster_by_id(&self, id: i32) -> Result<Monster, ConfigError> {
        self.monsters
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| ConfigError::NotFound {
                kind: "monster",
                name: format!("#{}", id),
            })
    }

    pub fn equipment(&self, name: &str) -> Result<EquipmentPiece, ConfigError> {
        self.equipment_version(name, None)
    }

    pub fn equipment_version(&self, name: &str, version: Option<&str>) -> Result<EquipmentPiece, ConfigError> {
        self.equipment
            .iter()
            .find(|e| e.name == name && version.map_or(true, |v| e.version == v))
            .cloned()
            .ok_or_else(|| not_found("equipment piece", name, version))
    }

    pub fn spell(&self, name: &str) -> Result<Spell, ConfigError> {
        self.spells
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .ok_or_else(|| not_found("spell", name, None))
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }
}

fn load_table<T>(dir: &Path, stem: &str) -> Result<T, ConfigError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let toml_path = dir.join(format!("{}.toml", stem));
    if toml_path.exists() {
        return load_toml(&toml_path);
    }
    let json_path = dir.join(format!("{}.json", stem));
    if json_path.exists() {
        return load_json(&json_path);
    }
    Ok(T::default())
}

fn not_found(kind: &'static str, name: &str, version: Option<&str>) -> ConfigError {
    let name = match version {
        Some(v) => format!("{} ({})", name, v),
        None => name.to_string(),
    };
    ConfigError::NotFound { kind, name }
}
