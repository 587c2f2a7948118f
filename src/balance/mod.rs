pub mod curve;
pub mod pool;
pub mod sweep;

pub use curve::{
    check_item_scaling, diff_percent, monster_curve_status, CurveStatus, ItemScaling,
    ItemScalingReport, CP_PER_LEVEL, ITEM_CP_PER_LEVEL,
};
pub use pool::{run_map_sweep_pooled, SweepPool};
pub use sweep::{
    rating_for_win_rate, run_map_sweep, run_map_sweep_parallel, run_matchup, write_sweep_csv,
    MapSweepReport, MatchupRating, MatchupReport, DEFAULT_SIMS,
};
