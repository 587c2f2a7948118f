//! Equippable item fixtures: a template's scalable base contributions plus an
//! instance's upgrade level and rolled flat bonuses. The power calculator treats
//! all of it as a pure additive projection over a character's totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{load_fixture, FixtureError};

/// +10% of template base values per upgrade level, truncated per stat.
pub const UPGRADE_SCALING_PER_LEVEL: f64 = 0.10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: String,
    pub name: String,
    pub min_level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_damage_min: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_damage_max: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_defense: Option<i32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub base_stats: BTreeMap<String, f64>,
}

/// One rolled flat bonus on an item instance, addressed by stat name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemBonus {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemInstance {
    pub template: ItemTemplate,
    #[serde(default)]
    pub upgrade_level: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bonuses: Vec<ItemBonus>,
}

impl ItemInstance {
    /// Upgrade multiplier applied to template base values.
    pub fn upgrade_multiplier(&self) -> f64 {
        1.0 + self.upgrade_level as f64 * UPGRADE_SCALING_PER_LEVEL
    }
}

pub fn load_item(path: &str) -> Result<ItemInstance, FixtureError> {
    load_fixture(path)
}
