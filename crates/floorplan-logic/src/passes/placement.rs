//! Positional passes: zoning, kitchen adjacency, wet-area grouping, and
//! wall alignment.
//!
//! These are layout heuristics, not a packer. They keep zones apart and
//! line walls up, but rooms inside a zone row may still overlap.

use super::{has_required_glazing, meets_minimums, PassContext, PassOutcome};
use crate::geometry::{nearest, snap, EPS, FINE_GRID, SNAP_GRID};
use crate::room::{Room, RoomType, Zone};

/// Where the zone stacks start.
const ZONE_ORIGIN: f64 = 1.0;
/// Gap between consecutive rooms in a stack or row.
const STACK_GAP: f64 = 0.2;
/// Gap between the social stack and the service stack.
const SERVICE_GAP: f64 = 0.5;
/// Gap between the stacks and the private row below them.
const PRIVATE_GAP: f64 = 0.4;
/// Kitchen/social horizontal center distance tolerated before relocating.
const KITCHEN_MAX_OFFSET: f64 = 2.0;
/// Gap left between the social room and a relocated kitchen.
const KITCHEN_GAP: f64 = 0.2;
/// x offset between consecutive wet rooms.
const WET_STEP: f64 = 0.1;
/// Edges closer than this are treated as one structural axis.
const AXIS_MERGE_DISTANCE: f64 = 0.12;
/// Narrowest room the alignment pass may produce.
const MIN_ALIGNED_WIDTH: f64 = 0.5;

/// Move `room` to `(x, y)`; returns true if it actually moved.
fn place(room: &mut Room, x: f64, y: f64) -> bool {
    let moved = (room.x - x).abs() > EPS || (room.y - y).abs() > EPS;
    room.x = x;
    room.y = y;
    moved
}

/// Pass 7: social rooms stack down at the origin, service rooms stack down
/// to their right, private rooms form a row below both stacks. Balconies
/// stay put.
pub fn apply_zoning(mut rooms: Vec<Room>, _ctx: &PassContext) -> PassOutcome {
    let mut moved = false;

    let mut social_y = ZONE_ORIGIN;
    let mut widest_social: f64 = 0.0;
    for room in rooms
        .iter_mut()
        .filter(|r| r.room_type.zone() == Some(Zone::Social))
    {
        moved |= place(room, snap(ZONE_ORIGIN, SNAP_GRID), snap(social_y, SNAP_GRID));
        social_y += room.height + STACK_GAP;
        widest_social = widest_social.max(room.width);
    }

    let service_x = ZONE_ORIGIN + widest_social + SERVICE_GAP;
    let mut service_y = ZONE_ORIGIN;
    for room in rooms
        .iter_mut()
        .filter(|r| r.room_type.zone() == Some(Zone::Service))
    {
        moved |= place(room, snap(service_x, SNAP_GRID), snap(service_y, SNAP_GRID));
        service_y += room.height + STACK_GAP;
    }

    let private_y = social_y.max(service_y) + PRIVATE_GAP;
    let mut private_x = ZONE_ORIGIN;
    for room in rooms
        .iter_mut()
        .filter(|r| r.room_type.zone() == Some(Zone::Private))
    {
        moved |= place(room, snap(private_x, SNAP_GRID), snap(private_y, SNAP_GRID));
        private_x += room.width + STACK_GAP;
    }

    let mut out = PassOutcome::new(rooms);
    if moved {
        out.warn("Applied zoning (social / service / private).".to_string());
    }
    out
}

/// Pass 8: if the first kitchen is more than 2 m (center to center, along
/// x) from the first social room, move it against that room's right side.
pub fn kitchen_adjacency(mut rooms: Vec<Room>, _ctx: &PassContext) -> PassOutcome {
    let kitchen = rooms.iter().position(|r| r.room_type == RoomType::Kitchen);
    let social = rooms
        .iter()
        .position(|r| r.room_type.zone() == Some(Zone::Social));
    let (Some(k), Some(s)) = (kitchen, social) else {
        return PassOutcome::new(rooms);
    };

    let (social_cx, _) = rooms[s].center();
    let (kitchen_cx, _) = rooms[k].center();
    if (kitchen_cx - social_cx).abs() <= KITCHEN_MAX_OFFSET {
        return PassOutcome::new(rooms);
    }

    let x = snap(rooms[s].right() + KITCHEN_GAP, SNAP_GRID);
    let y = snap(rooms[s].y, SNAP_GRID);
    place(&mut rooms[k], x, y);
    let message = format!(
        "Kitchen \"{}\" moved next to the social area.",
        rooms[k].name
    );
    let mut out = PassOutcome::new(rooms);
    out.warn(message);
    out
}

/// Pass 9: pull wet rooms toward their average x, staggered by 0.1 m, so
/// plumbing runs stay short.
pub fn group_wet_areas(mut rooms: Vec<Room>, _ctx: &PassContext) -> PassOutcome {
    let wet: Vec<usize> = rooms
        .iter()
        .enumerate()
        .filter(|(_, r)| r.room_type.is_wet())
        .map(|(i, _)| i)
        .collect();
    if wet.len() <= 1 {
        return PassOutcome::new(rooms);
    }

    let avg_x = wet.iter().map(|&i| rooms[i].x).sum::<f64>() / wet.len() as f64;
    let mut moved = false;
    for (n, &i) in wet.iter().enumerate() {
        let x = snap(avg_x + n as f64 * WET_STEP, SNAP_GRID);
        let y = rooms[i].y;
        moved |= place(&mut rooms[i], x, y);
    }

    let mut out = PassOutcome::new(rooms);
    if moved {
        out.warn("Grouped wet areas to simplify plumbing.".to_string());
    }
    out
}

/// Sorted x-axes shared by room edges. Edges are snapped to 0.01 m and
/// deduplicated; neighbours closer than 0.12 m collapse to their midpoint.
fn structural_axes(rooms: &[Room]) -> Vec<f64> {
    let mut axes: Vec<f64> = rooms
        .iter()
        .flat_map(|r| [r.x, r.right()])
        .map(|v| snap(v, FINE_GRID))
        .collect();
    axes.sort_by(f64::total_cmp);
    axes.dedup();
    for i in 1..axes.len() {
        if (axes[i] - axes[i - 1]).abs() < AXIS_MERGE_DISTANCE - EPS {
            let mid = (axes[i] + axes[i - 1]) / 2.0;
            axes[i - 1] = mid;
            axes[i] = mid;
        }
    }
    axes
}

/// Pass 10: snap each room's left edge to the nearest structural axis and
/// derive its width from the axis nearest its right edge. A room that met
/// its size minimums or its glazing fractions keeps its width if the
/// aligned one would break them.
pub fn align_walls(mut rooms: Vec<Room>, ctx: &PassContext) -> PassOutcome {
    let axes = structural_axes(&rooms);
    let mut changed = false;

    for room in rooms.iter_mut() {
        let (Some(left), Some(right)) = (nearest(&axes, room.x), nearest(&axes, room.right()))
        else {
            continue;
        };
        let (old_x, old_width) = (room.x, room.width);
        let was_conformant = meets_minimums(room, ctx);
        let was_lit = has_required_glazing(room, ctx.specs);

        room.x = snap(left, SNAP_GRID);
        room.width = snap((right - left).max(MIN_ALIGNED_WIDTH), SNAP_GRID);
        if (was_conformant && !meets_minimums(room, ctx))
            || (was_lit && !has_required_glazing(room, ctx.specs))
        {
            room.width = old_width;
        }
        changed |= (room.x - old_x).abs() > EPS || (room.width - old_width).abs() > EPS;
    }

    let mut out = PassOutcome::new(rooms);
    if changed {
        out.warn("Aligned walls to a simplified structural grid.".to_string());
    }
    out
}
