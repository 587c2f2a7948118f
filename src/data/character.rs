//! Character records: the resolved total-stats bundle the game's stat recalculation
//! persists, as handed to the combat core by callers. Stats are typed fields with
//! sparse-input defaults; ad-hoc bonus keys (e.g. `attack_speed_percent`) collect
//! into a flattened extension table instead of an open string bag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{load_fixture, FixtureError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Warrior,
    Assassin,
    Mage,
    /// Tolerated for forward compatibility with classes the balance data predates.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Strength,
    Dexterity,
    Intelligence,
    Vitality,
}

/// Governing attribute per class, consulted by the power calculator when it
/// re-derives damage from a hypothetical stat set. One table, read here only.
const GOVERNING_ATTRIBUTES: [(CharacterClass, Attribute); 3] = [
    (CharacterClass::Warrior, Attribute::Strength),
    (CharacterClass::Assassin, Attribute::Dexterity),
    (CharacterClass::Mage, Attribute::Intelligence),
];

impl CharacterClass {
    /// Unlisted classes (including [CharacterClass::Unknown]) take the strength row.
    pub fn governing_attribute(self) -> Attribute {
        GOVERNING_ATTRIBUTES
            .iter()
            .find(|(class, _)| *class == self)
            .map(|(_, attribute)| *attribute)
            .unwrap_or(Attribute::Strength)
    }
}

/// A character's resolved total stats. Every field is optional on the wire; the
/// profile builder and the power calculator each apply their own documented
/// fallbacks, so partially populated input degrades instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dexterity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitality: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_min: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_max: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance_fire: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance_water: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance_wind: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance_earth: Option<i32>,
    /// Ad-hoc bonus keys with no typed slot.
    #[serde(flatten)]
    pub extra: BTreeMap<String, f64>,
}

impl StatBundle {
    /// Resolve sparse input into the totals the power calculator merges against:
    /// attributes, damage, defense and resistances default to 0, attack speed to 1.0.
    /// `max_hp` stays optional; its fallback (`vitality × 10`) depends on the
    /// post-merge vitality, so the calculator applies it after accumulation.
    pub fn resolve(&self) -> StatTotals {
        StatTotals {
            strength: self.strength.unwrap_or(0),
            dexterity: self.dexterity.unwrap_or(0),
            intelligence: self.intelligence.unwrap_or(0),
            vitality: self.vitality.unwrap_or(0),
            damage_min: self.damage_min.unwrap_or(0),
            damage_max: self.damage_max.unwrap_or(0),
            defense: self.defense.unwrap_or(0),
            max_hp: self.max_hp,
            attack_speed: self.attack_speed.unwrap_or(1.0),
            resistance_fire: self.resistance_fire.unwrap_or(0),
            resistance_water: self.resistance_water.unwrap_or(0),
            resistance_wind: self.resistance_wind.unwrap_or(0),
            resistance_earth: self.resistance_earth.unwrap_or(0),
            extra: self.extra.clone(),
        }
    }
}

/// Typed key for a stat slot. Item templates and bonus lists address stats by
/// name; parsing routes known names to typed fields and leaves the rest to the
/// extension table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKey {
    Strength,
    Dexterity,
    Intelligence,
    Vitality,
    DamageMin,
    DamageMax,
    Defense,
    MaxHp,
    AttackSpeed,
    ResistanceFire,
    ResistanceWater,
    ResistanceWind,
    ResistanceEarth,
}

impl StatKey {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "strength" => Some(Self::Strength),
            "dexterity" => Some(Self::Dexterity),
            "intelligence" => Some(Self::Intelligence),
            "vitality" => Some(Self::Vitality),
            "damage_min" => Some(Self::DamageMin),
            "damage_max" => Some(Self::DamageMax),
            "defense" => Some(Self::Defense),
            "max_hp" => Some(Self::MaxHp),
            "attack_speed" => Some(Self::AttackSpeed),
            "resistance_fire" => Some(Self::ResistanceFire),
            "resistance_water" => Some(Self::ResistanceWater),
            "resistance_wind" => Some(Self::ResistanceWind),
            "resistance_earth" => Some(Self::ResistanceEarth),
            _ => None,
        }
    }
}

/// Fully resolved stat totals, the accumulation target for item merges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatTotals {
    pub strength: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub vitality: i32,
    pub damage_min: i32,
    pub damage_max: i32,
    pub defense: i32,
    pub max_hp: Option<i32>,
    pub attack_speed: f64,
    pub resistance_fire: i32,
    pub resistance_water: i32,
    pub resistance_wind: i32,
    pub resistance_earth: i32,
    pub extra: BTreeMap<String, f64>,
}

impl StatTotals {
    /// Additively apply a named contribution. Integer slots truncate toward zero
    /// (upgrade scaling is applied before the add and truncates the same way).
    /// Keys without a typed slot accumulate in `extra`, initialized to 0.
    pub fn add(&mut self, key: &str, value: f64) {
        match StatKey::parse(key) {
            Some(StatKey::Strength) => self.strength += value as i32,
            Some(StatKey::Dexterity) => self.dexterity += value as i32,
            Some(StatKey::Intelligence) => self.intelligence += value as i32,
            Some(StatKey::Vitality) => self.vitality += value as i32,
            Some(StatKey::DamageMin) => self.damage_min += value as i32,
            Some(StatKey::DamageMax) => self.damage_max += value as i32,
            Some(StatKey::Defense) => self.defense += value as i32,
            Some(StatKey::MaxHp) => {
                self.max_hp = Some(self.max_hp.unwrap_or(0) + value as i32);
            }
            Some(StatKey::AttackSpeed) => self.attack_speed += value,
            Some(StatKey::ResistanceFire) => self.resistance_fire += value as i32,
            Some(StatKey::ResistanceWater) => self.resistance_water += value as i32,
            Some(StatKey::ResistanceWind) => self.resistance_wind += value as i32,
            Some(StatKey::ResistanceEarth) => self.resistance_earth += value as i32,
            None => *self.extra.entry(key.to_string()).or_insert(0.0) += value,
        }
    }

    pub fn attribute(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Intelligence => self.intelligence,
            Attribute::Vitality => self.vitality,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub id: String,
    pub name: String,
    pub class: CharacterClass,
    pub stats: StatBundle,
}

pub fn load_character(path: &str) -> Result<CharacterSheet, FixtureError> {
    load_fixture(path)
}
