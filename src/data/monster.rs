//! Monster records: static stat blocks as seeded into the game's bestiary, plus the
//! map roster shape the balancing sweep consumes. The legacy `speed` integer lives
//! only here; the profile builder converts it to an attack speed on the way in.

use serde::{Deserialize, Serialize};

use crate::combat::profile::Element;
use crate::data::{load_fixture, FixtureError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub min_dmg: i32,
    pub max_dmg: i32,
    pub speed: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Element>,
    /// Last CP the balance tooling computed. Persisted by callers, never written here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_score: Option<i64>,
}

/// A map's monster roster with the level the curve check targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapRecord {
    pub name: String,
    pub min_level: u32,
    pub monsters: Vec<MonsterRecord>,
}

pub fn load_monster(path: &str) -> Result<MonsterRecord, FixtureError> {
    load_fixture(path)
}

pub fn load_map(path: &str) -> Result<MapRecord, FixtureError> {
    load_fixture(path)
}
