use std::fmt;
use std::fs;

use serde::de::DeserializeOwned;

pub mod character;
pub mod item;
pub mod monster;

pub use character::{
    Attribute, CharacterClass, CharacterSheet, StatBundle, StatKey, StatTotals,
};
pub use item::{ItemBonus, ItemInstance, ItemTemplate};
pub use monster::{MapRecord, MonsterRecord};

/// Failure loading a JSON fixture from disk. The only fallible surface of the crate;
/// the combat core itself operates on already-loaded values and never errors.
#[derive(Debug)]
pub enum FixtureError {
    Read(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read fixture: {err}"),
            Self::Parse(err) => write!(f, "failed to parse fixture: {err}"),
        }
    }
}

impl std::error::Error for FixtureError {}

/// Load and deserialize a JSON fixture file.
pub fn load_fixture<T: DeserializeOwned>(path: &str) -> Result<T, FixtureError> {
    let raw = fs::read_to_string(path).map_err(FixtureError::Read)?;
    serde_json::from_str(&raw).map_err(FixtureError::Parse)
}
