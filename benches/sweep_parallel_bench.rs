//! Compare sequential vs parallel map sweep run times.
//!
//! Run with: `cargo bench --bench sweep_parallel`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skirmish::balance::{run_map_sweep, run_map_sweep_parallel};
use skirmish::data::{CharacterSheet, MapRecord};

fn hero() -> CharacterSheet {
    serde_json::from_str(
        r#"{
            "id": "hero", "name": "SimPlayer", "class": "warrior",
            "stats": {
                "dexterity": 25, "vitality": 40, "max_hp": 400,
                "damage_min": 18, "damage_max": 30, "defense": 12, "attack_speed": 1.1
            }
        }"#,
    )
    .expect("hero should parse")
}

/// Synthetic roster so the bench measures sweep scaling, not fixture loading.
fn synthetic_map(count: usize) -> MapRecord {
    let monsters = (0..count)
        .map(|i| {
            serde_json::from_str(&format!(
                r#"{{"id":"m{i}","name":"Monster {i}","hp":{hp},"min_dmg":{lo},"max_dmg":{hi},"speed":{speed}}}"#,
                hp = 150 + (i % 7) * 40,
                lo = 4 + i % 5,
                hi = 10 + i % 9,
                speed = 5 + (i % 11) as i32,
            ))
            .expect("monster should parse")
        })
        .collect();
    MapRecord {
        name: "Synthetic Plains".to_string(),
        min_level: 10,
        monsters,
    }
}

fn bench_sweep_sequential_vs_parallel(c: &mut Criterion) {
    let hero = hero();
    let map = synthetic_map(32);
    let sims = 200;
    let seed = 42u64;

    let mut group = c.benchmark_group("map_sweep");
    group.sample_size(20);
    group.measurement_time(std::time::Duration::from_secs(10));

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(run_map_sweep(&hero, &map, sims, seed)));
    });

    group.bench_function("parallel", |b| {
        b.iter(|| black_box(run_map_sweep_parallel(&hero, &map, sims, seed)));
    });

    group.finish();
}

criterion_group!(benches, bench_sweep_sequential_vs_parallel);
criterion_main!(benches);
