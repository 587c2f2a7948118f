//! Power calculator: reduces a combat profile to a scalar Combat Power score,
//! and projects the marginal CP of equipping one item without mutating any
//! caller-owned state. CP = survivability × 0.1 + offense × 1.5, rounded.

use crate::combat::profile::{CombatProfile, FALLBACK_INTERVAL_MS};
use crate::data::character::CharacterSheet;
use crate::data::item::ItemInstance;

pub const SURVIVABILITY_WEIGHT: f64 = 0.1;
pub const OFFENSIVE_WEIGHT: f64 = 1.5;
/// Offense normalizes attack cadence against a 2000 ms reference swing.
pub const SPEED_FACTOR_REFERENCE_MS: f64 = 2000.0;
/// Damage added per point of governing attribute, truncated.
pub const GOVERNING_DAMAGE_SCALE: f64 = 1.5;
/// Hit points granted per point of vitality.
pub const HP_PER_VITALITY: i32 = 10;

/// Effective hit points: raw pool scaled by defense as a percent buffer.
pub fn survivability(profile: &CombatProfile) -> f64 {
    profile.max_hp as f64 * (1.0 + profile.defense as f64 / 100.0)
}

/// Expected sustained damage output: average roll, accuracy, cadence and crit
/// expectation composed multiplicatively.
pub fn offensive(profile: &CombatProfile) -> f64 {
    let attack = (profile.min_dmg + profile.max_dmg) as f64 / 2.0;
    let accuracy_factor = profile.accuracy as f64 / 100.0;

    let interval = profile.attack_interval();
    let speed_factor = SPEED_FACTOR_REFERENCE_MS
        / if interval > 0.0 {
            interval
        } else {
            FALLBACK_INTERVAL_MS
        };

    let crit_factor = 1.0 + profile.crit_chance() * profile.crit_multiplier() / 100.0;

    attack * accuracy_factor * speed_factor * crit_factor
}

/// Combat Power score for a profile.
pub fn calculate(profile: &CombatProfile) -> i64 {
    (survivability(profile) * SURVIVABILITY_WEIGHT + offensive(profile) * OFFENSIVE_WEIGHT).round()
        as i64
}

/// Marginal CP from hypothetically equipping `item` on `character`.
///
/// Builds the character's current profile and CP, additively applies the item's
/// scaled template contributions and flat bonuses to the resolved totals,
/// re-derives hit points and damage from the shifted attributes, scores the
/// hypothetical profile, and returns `new − base`. A pure projection: neither
/// the character nor the item is written through.
pub fn item_delta(item: &ItemInstance, character: &CharacterSheet) -> i64 {
    let base_profile = CombatProfile::from_character(character);
    let base_cp = calculate(&base_profile);

    let base = character.stats.resolve();
    let governing = character.class.governing_attribute();
    let old_governing_bonus = (base.attribute(governing) as f64 * GOVERNING_DAMAGE_SCALE) as i32;

    let mut totals = base.clone();
    let multiplier = item.upgrade_multiplier();
    let template = &item.template;

    if let Some(base_min) = template.base_damage_min.filter(|v| *v != 0) {
        let base_max = template
            .base_damage_max
            .filter(|v| *v != 0)
            .unwrap_or(base_min);
        totals.add("damage_min", (base_min as f64 * multiplier).trunc());
        totals.add("damage_max", (base_max as f64 * multiplier).trunc());
    }
    if let Some(base_defense) = template.base_defense.filter(|v| *v != 0) {
        totals.add("defense", (base_defense as f64 * multiplier).trunc());
    }
    for (key, value) in &template.base_stats {
        totals.add(key, (value * multiplier).trunc());
    }
    for bonus in &item.bonuses {
        totals.add(&bonus.kind, bonus.value);
    }

    // Hit points follow vitality; flat max_hp contributions are not double-counted.
    let delta_vitality = totals.vitality - base.vitality;
    let base_hp = base.max_hp.unwrap_or(base.vitality * HP_PER_VITALITY);
    totals.max_hp = Some(base_hp + delta_vitality * HP_PER_VITALITY);

    // Damage follows the governing attribute by its delta only.
    let new_governing_bonus = (totals.attribute(governing) as f64 * GOVERNING_DAMAGE_SCALE) as i32;
    let governing_delta = new_governing_bonus - old_governing_bonus;
    totals.damage_min += governing_delta;
    totals.damage_max += governing_delta;

    let dexterity = totals.dexterity;
    let mut hypothetical = base_profile.clone();
    hypothetical.max_hp = totals.max_hp.unwrap_or(0);
    hypothetical.current_hp = hypothetical.max_hp;
    hypothetical.min_dmg = totals.damage_min.max(1);
    hypothetical.max_dmg = totals.damage_max.max(2);
    hypothetical.defense = totals.defense;
    hypothetical.accuracy = dexterity * 2;
    hypothetical.evasion = dexterity;
    hypothetical.attack_speed = totals.attack_speed;

    calculate(&hypothetical) - base_cp
}
