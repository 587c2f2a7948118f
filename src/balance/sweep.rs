//! Monte Carlo matchup sweeps: N simulated fights per monster on a map, reduced
//! to win rate, average action count and average HP loss, with the monster's CP
//! checked against the level curve. Serial and parallel sweeps produce identical
//! reports: per-matchup seeds are stable mixes of the combatant ids and the base
//! seed, and per-iteration seeds derive by wrapping addition, so results never
//! depend on sweep order.

use rayon::prelude::*;
use serde::Serialize;

use crate::balance::curve::{monster_curve_status, CurveStatus, CP_PER_LEVEL};
use crate::combat::power::calculate;
use crate::combat::profile::CombatProfile;
use crate::combat::simulate_fight;
use crate::data::character::CharacterSheet;
use crate::data::monster::{MapRecord, MonsterRecord};

pub const DEFAULT_SIMS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchupRating {
    Fatal,
    Hard,
    Ok,
}

/// Win rates below 10% read as FATAL, below 50% as HARD.
pub fn rating_for_win_rate(win_rate_pct: f64) -> MatchupRating {
    if win_rate_pct < 10.0 {
        MatchupRating::Fatal
    } else if win_rate_pct < 50.0 {
        MatchupRating::Hard
    } else {
        MatchupRating::Ok
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupReport {
    pub monster_id: String,
    pub monster_name: String,
    pub monster_cp: i64,
    pub target_cp: i64,
    pub curve_diff_pct: f64,
    pub curve_status: CurveStatus,
    pub win_rate_pct: f64,
    pub avg_actions: u32,
    /// Average HP lost among victories, percent of the hero's pool.
    pub avg_hp_loss_pct: f64,
    pub rating: MatchupRating,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapSweepReport {
    pub map_name: String,
    pub map_level: u32,
    pub hero_id: String,
    pub hero_name: String,
    pub hero_cp: i64,
    pub sims: u32,
    pub base_seed: u64,
    pub generated_at: String,
    pub matchups: Vec<MatchupReport>,
}

/// Run `sims` fights of `hero` against one monster. Iteration `i` is seeded
/// `base_seed + i` (wrapping), so a single fight from the batch can be replayed
/// by handing the engine that seed directly.
pub fn run_matchup(
    hero: &CombatProfile,
    monster: &MonsterRecord,
    map_level: u32,
    sims: u32,
    base_seed: u64,
) -> MatchupReport {
    let enemy = CombatProfile::from_monster(monster);
    let monster_cp = calculate(&enemy);

    let mut wins = 0u32;
    let mut actions = 0u64;
    let mut hp_loss_pct_sum = 0.0;

    for i in 0..sims {
        let seed = base_seed.wrapping_add(u64::from(i));
        let outcome = simulate_fight(hero, &enemy, Some(seed));
        actions += outcome.log.len() as u64;
        if outcome.is_victory {
            wins += 1;
            let loss = hero.max_hp - outcome.final_hp.hero;
            hp_loss_pct_sum += loss as f64 / hero.max_hp as f64 * 100.0;
        }
    }

    let win_rate_pct = if sims == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(sims) * 100.0
    };
    let avg_actions = if sims == 0 {
        0
    } else {
        (actions as f64 / f64::from(sims)).round() as u32
    };
    let avg_hp_loss_pct = (hp_loss_pct_sum / f64::from(wins.max(1))).round();

    let (curve_diff_pct, curve_status) = monster_curve_status(monster_cp, map_level);

    MatchupReport {
        monster_id: monster.id.clone(),
        monster_name: monster.name.clone(),
        monster_cp,
        target_cp: CP_PER_LEVEL * i64::from(map_level),
        curve_diff_pct,
        curve_status,
        win_rate_pct,
        avg_actions,
        avg_hp_loss_pct,
        rating: rating_for_win_rate(win_rate_pct),
    }
}

/// Sweep every monster on a map sequentially.
pub fn run_map_sweep(
    hero_sheet: &CharacterSheet,
    map: &MapRecord,
    sims: u32,
    base_seed: u64,
) -> MapSweepReport {
    run_map_sweep_with_parallelism(hero_sheet, map, sims, base_seed, false)
}

/// Like [run_map_sweep] but distributes matchups across all CPU cores via Rayon.
/// Results order matches the roster order and the numbers match the serial sweep.
pub fn run_map_sweep_parallel(
    hero_sheet: &CharacterSheet,
    map: &MapRecord,
    sims: u32,
    base_seed: u64,
) -> MapSweepReport {
    run_map_sweep_with_parallelism(hero_sheet, map, sims, base_seed, true)
}

fn run_map_sweep_with_parallelism(
    hero_sheet: &CharacterSheet,
    map: &MapRecord,
    sims: u32,
    base_seed: u64,
    parallel: bool,
) -> MapSweepReport {
    let hero = CombatProfile::from_character(hero_sheet);
    let hero_cp = calculate(&hero);

    let run_one = |monster: &MonsterRecord| {
        let seed = matchup_seed(&hero.id, &monster.id, base_seed);
        run_matchup(&hero, monster, map.min_level, sims, seed)
    };

    let matchups = if parallel {
        map.monsters.par_iter().map(run_one).collect()
    } else {
        map.monsters.iter().map(run_one).collect()
    };

    MapSweepReport {
        map_name: map.name.clone(),
        map_level: map.min_level,
        hero_id: hero.id.clone(),
        hero_name: hero.name.clone(),
        hero_cp,
        sims,
        base_seed,
        generated_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        matchups,
    }
}

/// Stable per-matchup seed: a byte mix of both combatant ids over the base seed.
fn matchup_seed(hero_id: &str, monster_id: &str, seed: u64) -> u64 {
    let mut acc = seed;
    for s in [hero_id, monster_id] {
        for b in s.bytes() {
            acc = acc.wrapping_mul(37).wrapping_add(u64::from(b));
        }
    }
    acc
}

/// Write a sweep report's matchup table as a CSV artifact.
pub fn write_sweep_csv(report: &MapSweepReport, path: &str) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "monster_id",
        "monster_name",
        "monster_cp",
        "target_cp",
        "curve_diff_pct",
        "curve_status",
        "win_rate_pct",
        "avg_actions",
        "avg_hp_loss_pct",
        "rating",
    ])?;
    for matchup in &report.matchups {
        writer.write_record([
            matchup.monster_id.clone(),
            matchup.monster_name.clone(),
            matchup.monster_cp.to_string(),
            matchup.target_cp.to_string(),
            format!("{:.1}", matchup.curve_diff_pct),
            format!("{:?}", matchup.curve_status).to_uppercase(),
            format!("{:.1}", matchup.win_rate_pct),
            matchup.avg_actions.to_string(),
            format!("{:.0}", matchup.avg_hp_loss_pct),
            format!("{:?}", matchup.rating).to_uppercase(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
