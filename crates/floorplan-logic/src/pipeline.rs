//! Constraint pipeline: validates input, runs every rule pass in order,
//! and normalizes the result.
//!
//! The pipeline works on its own copy of the caller's rooms. Once input
//! validation passes it always completes: rules it cannot satisfy come
//! back as conflicts, never as errors.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{snap, snap_up, EPS, FINE_GRID};
use crate::passes::{top_up_glazing, PassContext, PassOutcome, PASSES};
use crate::room::{BuildingParameters, Room};
use crate::specifications::{merge_specifications, SpecificationOverrides, SpecificationSet};

/// Lower bound on x and y after normalization.
pub const MIN_COORDINATE: f64 = 0.1;
/// Lower bound on width and height after normalization.
pub const MIN_SIDE: f64 = 0.5;
/// Prefix marking a conflict mirrored into the warning list.
pub const CONFLICT_PREFIX: &str = "CONFLICT: ";

/// Adjusted layout plus every diagnostic produced on the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub rooms: Vec<Room>,
    /// Every adjustment, in the order it happened, followed by the
    /// prefixed conflicts.
    pub warnings: Vec<String>,
    /// Rules that could not be satisfied. Absent when there were none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<String>>,
}

impl PipelineResult {
    pub fn conflict_count(&self) -> usize {
        self.conflicts.as_ref().map_or(0, Vec::len)
    }
}

/// Precondition violations rejected before any pass runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("room `{id}` has non-positive or non-finite size {width}x{height}")]
    InvalidDimensions { id: String, width: f64, height: f64 },
    #[error("room `{id}` has negative or non-finite position ({x}, {y})")]
    InvalidPosition { id: String, x: f64, y: f64 },
    #[error("room id `{0}` is used more than once")]
    DuplicateId(String),
    #[error("room `{id}` {kind} {index} has a negative or non-finite size")]
    InvalidOpening {
        id: String,
        kind: &'static str,
        index: usize,
    },
    #[error("lot must be positive and finite, got {width}x{depth}")]
    InvalidLot { width: f64, depth: f64 },
    #[error("total area target must be positive and finite, got {0}")]
    InvalidTotalArea(f64),
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

/// Check every precondition, returning all problems found.
pub fn validate_input(rooms: &[Room], params: &BuildingParameters) -> Vec<InputError> {
    let mut errors = Vec::new();

    if !positive(params.lot_width) || !positive(params.lot_depth) {
        errors.push(InputError::InvalidLot {
            width: params.lot_width,
            depth: params.lot_depth,
        });
    }
    if let Some(area) = params.total_area {
        if !positive(area) {
            errors.push(InputError::InvalidTotalArea(area));
        }
    }

    let mut seen = HashSet::new();
    for r in rooms {
        if !seen.insert(r.id.as_str()) {
            errors.push(InputError::DuplicateId(r.id.clone()));
        }
        if !positive(r.width) || !positive(r.height) {
            errors.push(InputError::InvalidDimensions {
                id: r.id.clone(),
                width: r.width,
                height: r.height,
            });
        }
        if !non_negative(r.x) || !non_negative(r.y) {
            errors.push(InputError::InvalidPosition {
                id: r.id.clone(),
                x: r.x,
                y: r.y,
            });
        }
        for (i, w) in r.windows.iter().enumerate() {
            if !non_negative(w.width) || !non_negative(w.height) {
                errors.push(InputError::InvalidOpening {
                    id: r.id.clone(),
                    kind: "window",
                    index: i + 1,
                });
            }
        }
        for (i, d) in r.doors.iter().enumerate() {
            if !non_negative(d.width) {
                errors.push(InputError::InvalidOpening {
                    id: r.id.clone(),
                    kind: "door",
                    index: i + 1,
                });
            }
        }
    }
    errors
}

/// Clamp to the output floors and put everything on the fine grid.
/// Positions round to nearest, sizes round up so no minimum is undercut.
fn normalize(mut room: Room) -> Room {
    room.x = snap(room.x, FINE_GRID).max(MIN_COORDINATE);
    room.y = snap(room.y, FINE_GRID).max(MIN_COORDINATE);
    room.width = snap_up(room.width, FINE_GRID).max(MIN_SIDE);
    room.height = snap_up(room.height, FINE_GRID).max(MIN_SIDE);
    room
}

/// Warnings for rooms that end up outside the lot.
fn lot_fit_warnings(rooms: &[Room], params: &BuildingParameters) -> Vec<String> {
    rooms
        .iter()
        .filter(|r| r.right() > params.lot_width + EPS || r.bottom() > params.lot_depth + EPS)
        .map(|r| {
            format!(
                "\"{}\" extends beyond the {}x{} m lot.",
                r.name, params.lot_width, params.lot_depth
            )
        })
        .collect()
}

/// Rewrite `rooms` so they satisfy the rulebook in `specs`.
///
/// Returns the first precondition violation if the input is invalid;
/// see [`validate_input`] for the full list.
pub fn enforce_constraints(
    rooms: &[Room],
    params: &BuildingParameters,
    specs: &SpecificationSet,
) -> Result<PipelineResult, InputError> {
    if let Some(err) = validate_input(rooms, params).into_iter().next() {
        return Err(err);
    }

    let ctx = PassContext { specs, params };
    let outcome = PASSES
        .iter()
        .fold(PassOutcome::new(rooms.to_vec()), |acc, pass| {
            acc.then(pass, &ctx)
        });

    let PassOutcome {
        rooms,
        mut warnings,
        conflicts,
    } = outcome;
    let mut rooms: Vec<Room> = rooms.into_iter().map(normalize).collect();
    // Rounding sizes up can leave a room a sliver short of glass.
    let mut rounding = PassOutcome::default();
    for room in rooms.iter_mut() {
        top_up_glazing(room, specs, &mut rounding);
    }
    warnings.extend(rounding.warnings);
    warnings.extend(lot_fit_warnings(&rooms, params));

    for c in &conflicts {
        log::warn!("{}", c);
    }
    warnings.extend(conflicts.iter().map(|c| format!("{CONFLICT_PREFIX}{c}")));

    log::info!(
        "Constraints enforced on {} rooms: {} warnings, {} conflicts",
        rooms.len(),
        warnings.len(),
        conflicts.len()
    );

    Ok(PipelineResult {
        rooms,
        warnings,
        conflicts: (!conflicts.is_empty()).then_some(conflicts),
    })
}

/// [`enforce_constraints`] with optional rulebook overrides merged over the
/// defaults first.
pub fn enforce_constraints_with(
    rooms: &[Room],
    params: &BuildingParameters,
    overrides: Option<&SpecificationOverrides>,
) -> Result<PipelineResult, InputError> {
    let specs = merge_specifications(overrides);
    enforce_constraints(rooms, params, &specs)
}
