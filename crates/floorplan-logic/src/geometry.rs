//! Grid snapping and nearest-value lookup.
//!
//! Every coordinate or dimension a pass writes goes through [`snap`] or
//! [`snap_up`], which keeps the layout on a drafting grid and stops
//! floating-point drift from accumulating across passes.

/// Drafting grid used by the rule passes.
pub const SNAP_GRID: f64 = 0.05;

/// Finer grid used for wall alignment and final normalization.
pub const FINE_GRID: f64 = 0.01;

/// Tolerance for comparing measured values against rulebook minimums.
pub const EPS: f64 = 1e-9;

/// Number of grid steps per meter when the grid divides 1 m evenly.
fn steps_per_meter(grid: f64) -> Option<f64> {
    let inv = 1.0 / grid;
    let rounded = inv.round();
    ((inv - rounded).abs() < 1e-9 && rounded > 0.0).then_some(rounded)
}

/// Round `value` to the nearest multiple of `grid`.
///
/// Grids that divide a meter evenly (0.05, 0.01, ...) are computed as
/// `round(value * n) / n`, which yields the closest `f64` to the decimal
/// result instead of values like `2.2000000000000002`.
pub fn snap(value: f64, grid: f64) -> f64 {
    match steps_per_meter(grid) {
        Some(n) => (value * n).round() / n,
        None => (value / grid).round() * grid,
    }
}

/// Smallest multiple of `grid` that is not below `value`.
///
/// Used when growing a dimension to a minimum: rounding to nearest could
/// land just under the minimum that was being satisfied.
pub fn snap_up(value: f64, grid: f64) -> f64 {
    // Tolerance absorbs products like 2.2 * 20 = 44.000000000000007.
    match steps_per_meter(grid) {
        Some(n) => (value * n - 1e-6).ceil() / n,
        None => (value / grid - 1e-6).ceil() * grid,
    }
}

/// Candidate numerically closest to `value`. Ties go to the earliest
/// candidate. Returns `None` for an empty slice.
pub fn nearest(candidates: &[f64], value: f64) -> Option<f64> {
    let (&first, rest) = candidates.split_first()?;
    let mut best = first;
    let mut best_dist = (first - value).abs();
    for &c in rest {
        let d = (c - value).abs();
        if d < best_dist {
            best = c;
            best_dist = d;
        }
    }
    Some(best)
}

/// True when `value` sits on `grid` within `tolerance`.
pub fn is_on_grid(value: f64, grid: f64, tolerance: f64) -> bool {
    (value - snap(value, grid)).abs() <= tolerance
}
