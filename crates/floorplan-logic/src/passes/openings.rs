//! Door widths and window glazing.

use super::{PassContext, PassOutcome};
use crate::geometry::{snap_up, EPS, FINE_GRID};
use crate::room::{Room, Window};
use crate::specifications::SpecificationSet;

/// Smallest glazing requirement, so tiny rooms still get a window.
const MIN_REQUIRED_GLAZING: f64 = 0.01;
/// Synthesized windows are at least this wide...
const MIN_WINDOW_WIDTH: f64 = 0.5;
/// ...and leave this much wall on the room's width.
const WINDOW_SIDE_MARGIN: f64 = 0.2;
/// Width floor for rooms too narrow to honor the margin.
const TINY_WINDOW_WIDTH: f64 = 0.1;
const MIN_WINDOW_HEIGHT: f64 = 0.12;
const MAX_WINDOW_HEIGHT: f64 = 1.2;

/// Pass 3: raise every door below the minimum for its room type.
pub fn size_doors(rooms: Vec<Room>, ctx: &PassContext) -> PassOutcome {
    let mut out = PassOutcome::default();
    for mut room in rooms {
        for (i, door) in room.doors.iter_mut().enumerate() {
            let min_width = ctx.specs.door_min_for(room.room_type, door.entrance);
            if door.width + EPS < min_width {
                door.width = min_width;
                out.warn(format!(
                    "Door {} in \"{}\" adjusted to {:.2} m.",
                    i + 1,
                    room.name,
                    min_width
                ));
            }
        }
        out.rooms.push(room);
    }
    out
}

/// A window closing the gap between `room`'s glazing and `fraction` of its
/// floor area, or `None` if the room already has enough.
fn window_for_gap(room: &Room, fraction: f64) -> Option<Window> {
    let required = (room.area() * fraction).max(MIN_REQUIRED_GLAZING);
    let current = room.window_area();
    if current + EPS >= required {
        return None;
    }
    let need = required - current;

    let max_width = (room.width - WINDOW_SIDE_MARGIN).max(TINY_WINDOW_WIDTH);
    let mut width = (need * 1.5).sqrt().max(MIN_WINDOW_WIDTH).min(max_width);
    let height = snap_up(
        (need / width).clamp(MIN_WINDOW_HEIGHT, MAX_WINDOW_HEIGHT),
        FINE_GRID,
    );
    // Height hit its cap: make up the rest in width.
    if width * height + EPS < need {
        width = (need / height).min(max_width);
    }
    Some(Window::new(snap_up(width, FINE_GRID), height))
}

/// True when `room` already meets both glazing fractions.
pub(crate) fn has_required_glazing(room: &Room, specs: &SpecificationSet) -> bool {
    window_for_gap(room, specs.window_fraction_lighting).is_none()
        && window_for_gap(room, specs.window_fraction_vent).is_none()
}

/// Add a window wherever glazing is below the daylight fraction, then again
/// wherever it is below the ventilation fraction. Passes that grow a room
/// call this so the glazing follows the new floor area.
pub(crate) fn top_up_glazing(room: &mut Room, specs: &SpecificationSet, out: &mut PassOutcome) {
    let checks = [
        (specs.window_fraction_lighting, "minimum daylight"),
        (specs.window_fraction_vent, "minimum ventilation"),
    ];
    for (fraction, purpose) in checks {
        if let Some(window) = window_for_gap(room, fraction) {
            out.warn(format!(
                "Added window to \"{}\" (~{:.2} m²) for {}.",
                room.name,
                window.area(),
                purpose
            ));
            room.windows.push(window);
        }
    }
}

/// Pass 4: glazing up to the daylight and ventilation fractions.
pub fn size_windows(rooms: Vec<Room>, ctx: &PassContext) -> PassOutcome {
    let mut out = PassOutcome::default();
    for mut room in rooms {
        top_up_glazing(&mut room, ctx.specs, &mut out);
        out.rooms.push(room);
    }
    out
}
