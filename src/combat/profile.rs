//! Combat profiles: normalized, simulation-ready snapshots of one combatant.
//!
//! The builder maps a character's resolved stat bundle or a monster's static record
//! into a self-contained profile; the engine never looks anything up mid-fight.
//! Construction is pure and total; partially populated input degrades to documented
//! defaults instead of failing.

use serde::{Deserialize, Serialize};

use crate::data::character::CharacterSheet;
use crate::data::monster::MonsterRecord;

/// Attacks-per-reference-period converts to milliseconds against this period.
pub const REFERENCE_PERIOD_MS: f64 = 3000.0;
/// Interval substituted whenever attack speed is non-positive. Never divide by it.
pub const FALLBACK_INTERVAL_MS: f64 = 3000.0;

pub const CRIT_BASE_CHANCE: f64 = 5.0;
pub const CRIT_CHANCE_PER_ACCURACY: f64 = 0.1;
pub const CRIT_MULTIPLIER: f64 = 1.5;

/// Resistance a monster holds against its own declared element, percent.
pub const OWN_ELEMENT_RESISTANCE: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    Wind,
    Earth,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Wind, Element::Earth];
}

/// Per-element mitigation percentages, 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resistances {
    pub fire: i32,
    pub water: i32,
    pub wind: i32,
    pub earth: i32,
}

impl Resistances {
    pub fn get(&self, element: Element) -> i32 {
        match element {
            Element::Fire => self.fire,
            Element::Water => self.water,
            Element::Wind => self.wind,
            Element::Earth => self.earth,
        }
    }

    pub fn set(&mut self, element: Element, percent: i32) {
        match element {
            Element::Fire => self.fire = percent,
            Element::Water => self.water = percent,
            Element::Wind => self.wind = percent,
            Element::Earth => self.earth = percent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Character,
    Monster,
}

/// One combatant's snapshot. Identity fields are fixed at construction;
/// `current_hp` and `next_action_at` are the runtime state the engine owns
/// for the duration of a single simulation.
#[derive(Debug, Clone, Serialize)]
pub struct CombatProfile {
    pub id: String,
    pub name: String,
    pub kind: ProfileKind,
    pub max_hp: i32,
    pub current_hp: i32,
    pub min_dmg: i32,
    pub max_dmg: i32,
    pub defense: i32,
    pub accuracy: i32,
    pub evasion: i32,
    pub attack_speed: f64,
    pub resistances: Resistances,
    /// Absolute simulation time (ms) of this profile's next scheduled action.
    #[serde(skip)]
    pub next_action_at: f64,
}

impl CombatProfile {
    /// Build from a character's resolved stat bundle. Missing fields fall back to
    /// safe defaults; accuracy and evasion derive from dexterity.
    pub fn from_character(sheet: &CharacterSheet) -> Self {
        let stats = &sheet.stats;
        let max_hp = stats.max_hp.unwrap_or(100);
        let dexterity = stats.dexterity.unwrap_or(1);

        Self {
            id: sheet.id.clone(),
            name: sheet.name.clone(),
            kind: ProfileKind::Character,
            max_hp,
            current_hp: max_hp,
            min_dmg: stats.damage_min.unwrap_or(1),
            max_dmg: stats.damage_max.unwrap_or(2),
            defense: stats.defense.unwrap_or(0),
            accuracy: dexterity * 2,
            evasion: dexterity,
            attack_speed: stats.attack_speed.unwrap_or(1.0),
            resistances: Resistances {
                fire: stats.resistance_fire.unwrap_or(0),
                water: stats.resistance_water.unwrap_or(0),
                wind: stats.resistance_wind.unwrap_or(0),
                earth: stats.resistance_earth.unwrap_or(0),
            },
            next_action_at: 0.0,
        }
    }

    /// Build from a monster's static record. Speed acts as the governing attribute:
    /// accuracy and evasion derive from it, and the legacy speed integer converts to
    /// an attack speed (`1.0 + speed × 0.01`) here, once. Monsters carry no armor;
    /// their bulk is all hit points.
    pub fn from_monster(record: &MonsterRecord) -> Self {
        let mut resistances = Resistances::default();
        if let Some(element) = record.element {
            resistances.set(element, OWN_ELEMENT_RESISTANCE);
        }

        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            kind: ProfileKind::Monster,
            max_hp: record.hp,
            current_hp: record.hp,
            min_dmg: record.min_dmg,
            max_dmg: record.max_dmg,
            defense: 0,
            accuracy: record.speed * 2,
            evasion: record.speed,
            attack_speed: 1.0 + record.speed as f64 * 0.01,
            resistances,
            next_action_at: 0.0,
        }
    }

    /// Milliseconds between successive actions. Non-positive attack speed recovers
    /// to the fixed fallback interval rather than propagating an error.
    pub fn attack_interval(&self) -> f64 {
        if self.attack_speed > 0.0 {
            REFERENCE_PERIOD_MS / self.attack_speed
        } else {
            FALLBACK_INTERVAL_MS
        }
    }

    /// Critical strike chance in percent.
    pub fn crit_chance(&self) -> f64 {
        CRIT_BASE_CHANCE + self.accuracy as f64 * CRIT_CHANCE_PER_ACCURACY
    }

    pub fn crit_multiplier(&self) -> f64 {
        CRIT_MULTIPLIER
    }

    /// Apply damage, clamping at zero. Returns the remaining hit points.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.current_hp = (self.current_hp - amount).max(0);
        self.current_hp
    }

    pub fn is_dead(&self) -> bool {
        self.current_hp <= 0
    }
}
