//! Level-curve checks: compare computed CP against the level-linear targets the
//! game balances around, and classify the deviation.

use serde::Serialize;

/// Monster CP target per map level.
pub const CP_PER_LEVEL: i64 = 100;
/// Marginal item CP target per template level.
pub const ITEM_CP_PER_LEVEL: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurveStatus {
    Overpowered,
    Strong,
    Ok,
    Underpowered,
    Weak,
}

/// Deviation from target in percent. A non-positive target yields 0 rather than
/// dividing by it.
pub fn diff_percent(actual: i64, target: i64) -> f64 {
    if target > 0 {
        (actual - target) as f64 / target as f64 * 100.0
    } else {
        0.0
    }
}

/// Classify a monster's CP against the map-level curve.
pub fn monster_curve_status(cp: i64, map_level: u32) -> (f64, CurveStatus) {
    let target = CP_PER_LEVEL * i64::from(map_level);
    let diff = diff_percent(cp, target);
    let status = if diff > 50.0 {
        CurveStatus::Overpowered
    } else if diff > 20.0 {
        CurveStatus::Strong
    } else if diff < -80.0 {
        CurveStatus::Weak
    } else if diff < -50.0 {
        CurveStatus::Underpowered
    } else {
        CurveStatus::Ok
    };
    (diff, status)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemScaling {
    Overpowered,
    Ok,
    Underpowered,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemScalingReport {
    pub cp_delta: i64,
    pub target_cp: i64,
    pub diff_pct: f64,
    pub status: ItemScaling,
}

/// Classify an item's marginal CP against the template-level curve.
pub fn check_item_scaling(cp_delta: i64, template_level: u32) -> ItemScalingReport {
    let target_cp = ITEM_CP_PER_LEVEL * i64::from(template_level);
    let diff_pct = diff_percent(cp_delta, target_cp);
    let status = if diff_pct > 20.0 {
        ItemScaling::Overpowered
    } else if diff_pct < -50.0 {
        ItemScaling::Underpowered
    } else {
        ItemScaling::Ok
    };
    ItemScalingReport {
        cp_delta,
        target_cp,
        diff_pct,
        status,
    }
}
