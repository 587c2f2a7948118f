use serde::{Deserialize, Serialize};

use crate::balance::{
    check_item_scaling, run_map_sweep_pooled, write_sweep_csv, ItemScaling, SweepPool,
    DEFAULT_SIMS,
};
use crate::combat::power::{calculate, item_delta, offensive, survivability};
use crate::combat::profile::{CombatProfile, ProfileKind};
use crate::combat::simulate_fight;
use crate::data::character::load_character;
use crate::data::item::load_item;
use crate::data::monster::load_map;
use crate::data::{load_fixture, CharacterSheet, MonsterRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Simulate,
    Power,
    Item,
    Balance,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("simulate") => Some(Command::Simulate),
        Some("power") => Some(Command::Power),
        Some("item") => Some(Command::Item),
        Some("balance") => Some(Command::Balance),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Simulate) => handle_simulate(args),
        Some(Command::Power) => handle_power(args),
        Some(Command::Item) => handle_item(args),
        Some(Command::Balance) => handle_balance(args),
        None => {
            eprintln!("usage: skirmish <simulate|power|item|balance>");
            2
        }
    }
}

/// A fixture that is either a character sheet or a monster record; monsters have
/// no `class`/`stats`, so the untagged match is unambiguous.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum EntityFixture {
    Character(CharacterSheet),
    Monster(MonsterRecord),
}

#[derive(Debug, Clone, Serialize)]
struct PowerBreakdown {
    id: String,
    name: String,
    kind: ProfileKind,
    survivability: f64,
    offensive: f64,
    cp: i64,
}

fn handle_simulate(args: &[String]) -> i32 {
    let (Some(hero_path), Some(enemy_path)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: skirmish simulate <hero.json> <monster.json> [seed] [--table]");
        return 2;
    };
    let seed = parse_optional_u64(positional(args, 4), "seed");
    let as_table = args.iter().any(|arg| arg == "--table");

    let hero_sheet = match load_character(hero_path) {
        Ok(sheet) => sheet,
        Err(err) => {
            eprintln!("failed to load hero: {err}");
            return 1;
        }
    };
    let monster = match load_fixture::<MonsterRecord>(enemy_path) {
        Ok(record) => record,
        Err(err) => {
            eprintln!("failed to load monster: {err}");
            return 1;
        }
    };

    let hero = CombatProfile::from_character(&hero_sheet);
    let enemy = CombatProfile::from_monster(&monster);
    let outcome = simulate_fight(&hero, &enemy, seed);

    if as_table {
        println!("winner\tis_victory\tseed\tactions\thero_hp\tenemy_hp");
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            outcome.winner_id,
            outcome.is_victory,
            outcome.seed,
            outcome.log.len(),
            outcome.final_hp.hero,
            outcome.final_hp.enemy
        );
        return 0;
    }

    match serde_json::to_string_pretty(&outcome) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize fight outcome: {err}");
            1
        }
    }
}

fn handle_power(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: skirmish power <entity.json>");
        return 2;
    };

    let profile = match load_fixture::<EntityFixture>(path) {
        Ok(EntityFixture::Character(sheet)) => CombatProfile::from_character(&sheet),
        Ok(EntityFixture::Monster(record)) => CombatProfile::from_monster(&record),
        Err(err) => {
            eprintln!("failed to load entity: {err}");
            return 1;
        }
    };

    let breakdown = PowerBreakdown {
        id: profile.id.clone(),
        name: profile.name.clone(),
        kind: profile.kind,
        survivability: survivability(&profile),
        offensive: offensive(&profile),
        cp: calculate(&profile),
    };

    match serde_json::to_string_pretty(&breakdown) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize power breakdown: {err}");
            1
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ItemCheckOutput {
    item_id: String,
    item_name: String,
    upgrade_level: u32,
    character_id: String,
    cp_delta: i64,
    target_cp: i64,
    diff_pct: f64,
    status: ItemScaling,
}

fn handle_item(args: &[String]) -> i32 {
    let (Some(character_path), Some(item_path)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: skirmish item <character.json> <item.json>");
        return 2;
    };

    let character = match load_character(character_path) {
        Ok(sheet) => sheet,
        Err(err) => {
            eprintln!("failed to load character: {err}");
            return 1;
        }
    };
    let item = match load_item(item_path) {
        Ok(item) => item,
        Err(err) => {
            eprintln!("failed to load item: {err}");
            return 1;
        }
    };

    let delta = item_delta(&item, &character);
    let report = check_item_scaling(delta, item.template.min_level);

    let output = ItemCheckOutput {
        item_id: item.template.id.clone(),
        item_name: item.template.name.clone(),
        upgrade_level: item.upgrade_level,
        character_id: character.id.clone(),
        cp_delta: report.cp_delta,
        target_cp: report.target_cp,
        diff_pct: report.diff_pct,
        status: report.status,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize item check: {err}");
            1
        }
    }
}

fn handle_balance(args: &[String]) -> i32 {
    let (Some(character_path), Some(map_path)) = (args.get(2), args.get(3)) else {
        eprintln!(
            "usage: skirmish balance <character.json> <map.json> [sims] [seed] [--table] [--csv <path>] [--workers <n>]"
        );
        return 2;
    };
    let sims = parse_u32_arg(positional(args, 4), "sims", DEFAULT_SIMS);
    let base_seed = parse_optional_u64(positional(args, 5), "seed").unwrap_or(7);
    let as_table = args.iter().any(|arg| arg == "--table");
    let csv_path = flag_value(args, "--csv");
    let workers = flag_value(args, "--workers")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(0);

    let character = match load_character(character_path) {
        Ok(sheet) => sheet,
        Err(err) => {
            eprintln!("failed to load character: {err}");
            return 1;
        }
    };
    let map = match load_map(map_path) {
        Ok(map) => map,
        Err(err) => {
            eprintln!("failed to load map: {err}");
            return 1;
        }
    };

    let pool = SweepPool::with_workers(workers);
    let report = run_map_sweep_pooled(&character, &map, sims, base_seed, &pool);

    if let Some(path) = csv_path {
        if let Err(err) = write_sweep_csv(&report, path) {
            eprintln!("failed to write csv report: {err}");
            return 1;
        }
    }

    if as_table {
        println!(
            "map={} level={} hero_cp={} sims={} seed={}",
            report.map_name, report.map_level, report.hero_cp, report.sims, report.base_seed
        );
        println!("monster\tcp\ttarget\twin_rate\tavg_actions\tavg_hp_loss\trating");
        for matchup in &report.matchups {
            println!(
                "{}\t{}\t{}\t{:.1}%\t{}\t{:.0}%\t{:?}",
                matchup.monster_name,
                matchup.monster_cp,
                matchup.target_cp,
                matchup.win_rate_pct,
                matchup.avg_actions,
                matchup.avg_hp_loss_pct,
                matchup.rating
            );
        }
        return 0;
    }

    match serde_json::to_string_pretty(&report) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize sweep report: {err}");
            1
        }
    }
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == name)
        .and_then(|index| args.get(index + 1))
        .map(String::as_str)
}

/// Positional argument at `index`, unless a flag already starts there.
fn positional(args: &[String], index: usize) -> Option<&String> {
    args.get(index).filter(|value| !value.starts_with("--"))
}

fn parse_u32_arg(raw: Option<&String>, name: &str, default: u32) -> u32 {
    raw.and_then(|value| value.parse::<u32>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

fn parse_optional_u64(raw: Option<&String>, name: &str) -> Option<u64> {
    let value = raw?;
    match value.parse::<u64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            eprintln!("invalid {name} '{value}', ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_command_recognizes_subcommands() {
        assert_eq!(
            parse_command(&args(&["skirmish", "simulate"])),
            Some(Command::Simulate)
        );
        assert_eq!(
            parse_command(&args(&["skirmish", "balance"])),
            Some(Command::Balance)
        );
        assert_eq!(parse_command(&args(&["skirmish", "bogus"])), None);
        assert_eq!(parse_command(&args(&["skirmish"])), None);
    }

    #[test]
    fn flag_value_reads_following_argument() {
        let list = args(&["skirmish", "balance", "c.json", "m.json", "--csv", "out.csv"]);
        assert_eq!(flag_value(&list, "--csv"), Some("out.csv"));
        assert_eq!(flag_value(&list, "--workers"), None);
    }

    #[test]
    fn positional_skips_flags() {
        let list = args(&["skirmish", "simulate", "h.json", "m.json", "--table"]);
        assert_eq!(positional(&list, 4), None);
        let list = args(&["skirmish", "simulate", "h.json", "m.json", "42"]);
        assert_eq!(positional(&list, 4).map(String::as_str), Some("42"));
    }

    #[test]
    fn parse_optional_u64_ignores_invalid() {
        assert_eq!(parse_optional_u64(Some(&"42".to_string()), "seed"), Some(42));
        assert_eq!(parse_optional_u64(Some(&"nope".to_string()), "seed"), None);
        assert_eq!(parse_optional_u64(None, "seed"), None);
    }
}
