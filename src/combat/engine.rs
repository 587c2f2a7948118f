//! Deterministic turn-exchange simulation between two combat profiles.
//!
//! The engine owns clones of both profiles and a seeded [Rng] for the duration of
//! one call; given identical profiles and seed, the roll sequence, event log and
//! winner are bit-for-bit reproducible. Miss, hit, death and timeout are all
//! regular outcomes, and the engine never errors for gameplay.

use serde::Serialize;

use crate::combat::profile::CombatProfile;
use crate::combat::rng::Rng;

/// In-simulation clock bound. A safety net against stalemates, not a wall-clock timeout.
pub const TIME_LIMIT_MS: f64 = 60_000.0;

pub const BASE_HIT_CHANCE: i32 = 85;
pub const MIN_HIT_CHANCE: i32 = 20;
pub const MAX_HIT_CHANCE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Hit,
    Crit,
    Miss,
    Death,
    Timeout,
}

/// One entry in the append-only fight log: a resolved action, or a terminal
/// death/timeout marker.
#[derive(Debug, Clone, Serialize)]
pub struct CombatEvent {
    pub tick: i64,
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attacker_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attacker_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defender_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defender_hp: Option<i32>,
    pub message: String,
}

impl CombatEvent {
    fn action(
        tick: i64,
        kind: EventKind,
        attacker: &CombatProfile,
        defender: &CombatProfile,
        damage: i32,
        message: String,
    ) -> Self {
        Self {
            tick,
            kind,
            attacker_id: Some(attacker.id.clone()),
            attacker_name: Some(attacker.name.clone()),
            defender_id: Some(defender.id.clone()),
            defender_name: Some(defender.name.clone()),
            damage: Some(damage),
            defender_hp: Some(defender.current_hp),
            message,
        }
    }

    fn death(tick: i64, defender: &CombatProfile) -> Self {
        Self {
            tick,
            kind: EventKind::Death,
            attacker_id: None,
            attacker_name: None,
            defender_id: Some(defender.id.clone()),
            defender_name: Some(defender.name.clone()),
            damage: None,
            defender_hp: None,
            message: format!("{} has been defeated!", defender.name),
        }
    }

    fn timeout(tick: i64) -> Self {
        Self {
            tick,
            kind: EventKind::Timeout,
            attacker_id: None,
            attacker_name: None,
            defender_id: None,
            defender_name: None,
            damage: None,
            defender_hp: None,
            message: "Time limit reached.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FinalHp {
    pub hero: i32,
    pub enemy: i32,
}

/// Complete, replayable outcome of one simulated fight.
#[derive(Debug, Clone, Serialize)]
pub struct FightOutcome {
    pub winner_id: String,
    pub is_victory: bool,
    pub seed: u64,
    pub log: Vec<CombatEvent>,
    pub final_hp: FinalHp,
}

/// Effective chance to land an attack, percent, clamped to [20, 100].
pub fn hit_chance(accuracy: i32, evasion: i32) -> i32 {
    (BASE_HIT_CHANCE + accuracy - evasion).clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

struct AttackResult {
    kind: EventKind,
    damage: i32,
}

/// Resolve one attack. Roll order is fixed: hit, then damage, then crit.
fn resolve_attack(rng: &mut Rng, attacker: &CombatProfile, defender: &mut CombatProfile) -> AttackResult {
    let chance = hit_chance(attacker.accuracy, defender.evasion);
    if rng.roll_percent() > chance {
        return AttackResult {
            kind: EventKind::Miss,
            damage: 0,
        };
    }

    let mut raw = rng.roll_range(attacker.min_dmg, attacker.max_dmg);

    let is_crit = f64::from(rng.roll_percent()) <= attacker.crit_chance();
    if is_crit {
        raw = (raw as f64 * attacker.crit_multiplier()) as i32;
    }

    // Defense halves into a flat reduction; damage never drops below 1.
    let mitigation = defender.defense / 2;
    let final_damage = (raw - mitigation).max(1);
    defender.take_damage(final_damage);

    AttackResult {
        kind: if is_crit { EventKind::Crit } else { EventKind::Hit },
        damage: final_damage,
    }
}

fn format_message(attacker: &CombatProfile, defender: &CombatProfile, result: &AttackResult) -> String {
    match result.kind {
        EventKind::Miss => format!("{} attacks {} but misses!", attacker.name, defender.name),
        EventKind::Crit => format!(
            "{} critically hits {} for {} damage!",
            attacker.name, defender.name, result.damage
        ),
        _ => format!(
            "{} hits {} for {} damage!",
            attacker.name, defender.name, result.damage
        ),
    }
}

/// Simulate one fight between `hero` and `enemy`.
///
/// Passing `None` for the seed draws a fresh one; the seed actually used is
/// recorded in the outcome either way, so any fight can be replayed exactly.
pub fn simulate_fight(hero: &CombatProfile, enemy: &CombatProfile, seed: Option<u64>) -> FightOutcome {
    let seed = seed.unwrap_or_else(fresh_seed);
    let mut rng = Rng::new(seed);

    let mut hero = hero.clone();
    let mut enemy = enemy.clone();
    hero.current_hp = hero.max_hp;
    enemy.current_hp = enemy.max_hp;

    // The first action lands after one full interval, not at time zero.
    hero.next_action_at = hero.attack_interval();
    enemy.next_action_at = enemy.attack_interval();

    let mut log = Vec::new();
    let winner_id;

    loop {
        // On an exact tie the hero acts first.
        let hero_acts = hero.next_action_at <= enemy.next_action_at;
        let (actor, target) = if hero_acts {
            (&mut hero, &mut enemy)
        } else {
            (&mut enemy, &mut hero)
        };

        let timestamp = actor.next_action_at;
        if timestamp > TIME_LIMIT_MS {
            log.push(CombatEvent::timeout(TIME_LIMIT_MS as i64));
            winner_id = enemy.id.clone();
            break;
        }

        let result = resolve_attack(&mut rng, actor, target);
        let tick = timestamp.round() as i64;
        let message = format_message(actor, target, &result);
        log.push(CombatEvent::action(
            tick,
            result.kind,
            actor,
            target,
            result.damage,
            message,
        ));

        if target.is_dead() {
            log.push(CombatEvent::death(tick, target));
            winner_id = actor.id.clone();
            break;
        }

        let interval = actor.attack_interval();
        actor.next_action_at += interval;
    }

    let is_victory = winner_id == hero.id;
    FightOutcome {
        winner_id,
        is_victory,
        seed,
        log,
        final_hp: FinalHp {
            hero: hero.current_hp,
            enemy: enemy.current_hp,
        },
    }
}

fn fresh_seed() -> u64 {
    let mut buf = [0u8; 8];
    if getrandom::getrandom(&mut buf).is_ok() {
        u64::from_le_bytes(buf)
    } else {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9e3779b97f4a7c15)
    }
}
