pub mod engine;
pub mod power;
pub mod profile;
pub mod rng;

pub use engine::{
    hit_chance, simulate_fight, CombatEvent, EventKind, FightOutcome, FinalHp, BASE_HIT_CHANCE,
    MAX_HIT_CHANCE, MIN_HIT_CHANCE, TIME_LIMIT_MS,
};
pub use power::{
    calculate, item_delta, offensive, survivability, GOVERNING_DAMAGE_SCALE, HP_PER_VITALITY,
    OFFENSIVE_WEIGHT, SPEED_FACTOR_REFERENCE_MS, SURVIVABILITY_WEIGHT,
};
pub use profile::{
    CombatProfile, Element, ProfileKind, Resistances, CRIT_BASE_CHANCE, CRIT_CHANCE_PER_ACCURACY,
    CRIT_MULTIPLIER, FALLBACK_INTERVAL_MS, OWN_ELEMENT_RESISTANCE, REFERENCE_PERIOD_MS,
};
pub use rng::Rng;
