//! Engine throughput benchmarks: fights per second for short kills and for
//! worst-case stalemates that run to the clock bound.
//!
//! Run with: `cargo bench --bench engine`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skirmish::combat::{simulate_fight, CombatProfile, ProfileKind, Resistances};

fn profile(id: &str, max_hp: i32, min_dmg: i32, max_dmg: i32, attack_speed: f64) -> CombatProfile {
    CombatProfile {
        id: id.to_string(),
        name: id.to_string(),
        kind: ProfileKind::Character,
        max_hp,
        current_hp: max_hp,
        min_dmg,
        max_dmg,
        defense: 10,
        accuracy: 30,
        evasion: 15,
        attack_speed,
        resistances: Resistances::default(),
        next_action_at: 0.0,
    }
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    group.sample_size(100);

    // Decisive fight, a handful of exchanges
    let strong = profile("hero", 300, 40, 60, 1.2);
    let weak = profile("enemy", 150, 5, 10, 1.0);
    group.bench_function("decisive_fight", |b| {
        b.iter(|| black_box(simulate_fight(&strong, &weak, Some(7))))
    });

    // Stalemate runs the full 60 s clock, maximum event volume
    let turtle_a = profile("hero", 10_000, 0, 0, 2.0);
    let turtle_b = profile("enemy", 10_000, 0, 0, 2.0);
    group.bench_function("stalemate_to_timeout", |b| {
        b.iter(|| black_box(simulate_fight(&turtle_a, &turtle_b, Some(7))))
    });

    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
