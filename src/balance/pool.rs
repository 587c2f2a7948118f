//! Rayon thread pool sizing for balance sweeps.
//!
//! Use [SweepPool::install] to run a parallel sweep with a fixed number of
//! threads, or rely on Rayon's default (all CPU cores).

use rayon::ThreadPoolBuilder;

use crate::balance::sweep::{run_map_sweep_parallel, MapSweepReport};
use crate::data::character::CharacterSheet;
use crate::data::monster::MapRecord;

/// Configures how many worker threads a parallel sweep uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepPool {
    /// Number of worker threads. If 0, use Rayon's default (num_cpus).
    pub workers: usize,
}

impl SweepPool {
    /// Use exactly `n` worker threads.
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run a closure on a pool with this worker count. A count of 0 uses the
    /// global Rayon pool; otherwise a temporary pool of that size is built.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            f()
        } else {
            let pool = ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()
                .expect("Rayon thread pool");
            pool.install(f)
        }
    }
}

/// Run a parallel map sweep on a pool with a custom worker count.
pub fn run_map_sweep_pooled(
    hero_sheet: &CharacterSheet,
    map: &MapRecord,
    sims: u32,
    base_seed: u64,
    pool: &SweepPool,
) -> MapSweepReport {
    pool.install(|| run_map_sweep_parallel(hero_sheet, map, sims, base_seed))
}
