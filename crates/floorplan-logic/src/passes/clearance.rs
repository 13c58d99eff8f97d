//! Bathroom turning circle and bedroom free-wall length.
//!
//! Both rules grow rooms, but only within a sanity bound. A requirement past
//! the bound is recorded as a conflict and the room is left as it was. A
//! grown room gets its glazing topped up to the new floor area.

use super::{top_up_glazing, PassContext, PassOutcome};
use crate::geometry::{snap_up, EPS, SNAP_GRID};
use crate::room::{Room, RoomType};

/// Largest side the clearance rule may grow a bathroom to.
pub const CLEARANCE_MAX_SIDE: f64 = 6.0;
/// Largest free-wall length the bedroom rule may ask for.
pub const FREE_WALL_MAX: f64 = 8.0;

/// Pass 5: bathrooms must fit the turning circle in both directions.
pub fn bathroom_clearance(rooms: Vec<Room>, ctx: &PassContext) -> PassOutcome {
    let diameter = ctx.specs.turning_diameter(ctx.params.accessible);
    let mut out = PassOutcome::default();

    for mut room in rooms {
        if room.room_type == RoomType::Bathroom
            && (room.width + EPS < diameter || room.height + EPS < diameter)
        {
            let need_w = room.width.max(diameter);
            let need_h = room.height.max(diameter);
            if need_w > CLEARANCE_MAX_SIDE || need_h > CLEARANCE_MAX_SIDE {
                out.conflict(format!(
                    "Bathroom \"{}\" needs a {:.2} m turning circle and could not be adjusted automatically.",
                    room.name, diameter
                ));
            } else {
                room.width = snap_up(need_w, SNAP_GRID);
                room.height = snap_up(need_h, SNAP_GRID);
                out.warn(format!(
                    "Adjusted \"{}\" to fit a {:.2} m turning circle.",
                    room.name, diameter
                ));
                top_up_glazing(&mut room, ctx.specs, &mut out);
            }
        }
        out.rooms.push(room);
    }
    out
}

/// Pass 6: a bedroom's longer edge must reach the free-wall minimum. The
/// currently larger side is the one that grows.
pub fn bedroom_free_wall(rooms: Vec<Room>, ctx: &PassContext) -> PassOutcome {
    let min_free = ctx.specs.min_bedroom_free_wall;
    let mut out = PassOutcome::default();

    for mut room in rooms {
        if room.room_type == RoomType::Bedroom && room.width.max(room.height) + EPS < min_free {
            if min_free > FREE_WALL_MAX {
                out.conflict(format!(
                    "Bedroom \"{}\" lacks a {:.2} m free wall and could not be adjusted automatically.",
                    room.name, min_free
                ));
            } else {
                if room.width >= room.height {
                    room.width = snap_up(min_free, SNAP_GRID);
                } else {
                    room.height = snap_up(min_free, SNAP_GRID);
                }
                out.warn(format!(
                    "Adjusted \"{}\" to have a free wall of at least {:.2} m.",
                    room.name, min_free
                ));
                top_up_glazing(&mut room, ctx.specs, &mut out);
            }
        }
        out.rooms.push(room);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::{BuildingParameters, Window};
    use crate::specifications::{merge_specifications, SpecificationOverrides, SpecificationSet};

    fn run_with(
        specs: &SpecificationSet,
        params: &BuildingParameters,
        pass: fn(Vec<Room>, &PassContext) -> PassOutcome,
        rooms: Vec<Room>,
    ) -> PassOutcome {
        let ctx = PassContext { specs, params };
        pass(rooms, &ctx)
    }

    fn run(pass: fn(Vec<Room>, &PassContext) -> PassOutcome, rooms: Vec<Room>) -> PassOutcome {
        run_with(
            &SpecificationSet::default(),
            &BuildingParameters::new(12.0, 20.0, 2),
            pass,
            rooms,
        )
    }

    #[test]
    fn small_bathroom_grows_to_circle() {
        let rooms = vec![Room::new("b", "Bath", RoomType::Bathroom, 0.8, 0.8).with_window(Window::new(0.5, 0.5))];
        let out = run(bathroom_clearance, rooms);
        assert_eq!(out.rooms[0].width, 0.9);
        assert_eq!(out.rooms[0].height, 0.9);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.conflicts.is_empty());
    }

    #[test]
    fn tiny_bathroom_within_bound_never_conflicts() {
        let rooms = vec![Room::new("b", "Bath", RoomType::Bathroom, 0.5, 0.5)];
        let out = run(bathroom_clearance, rooms);
        assert_eq!(out.rooms[0].width, 0.9);
        assert_eq!(out.rooms[0].height, 0.9);
        assert!(out.conflicts.is_empty());
    }

    #[test]
    fn long_narrow_bathroom_conflicts() {
        let rooms = vec![Room::new("b", "Corridor Bath", RoomType::Bathroom, 7.0, 0.5)];
        let out = run(bathroom_clearance, rooms.clone());
        assert_eq!(out.rooms, rooms);
        assert!(out.warnings.is_empty());
        assert_eq!(out.conflicts.len(), 1);
        assert!(out.conflicts[0].contains("Corridor Bath"));
    }

    #[test]
    fn oversized_circle_conflicts() {
        let overrides = SpecificationOverrides {
            bathroom_circle_diameter: Some(6.5),
            ..Default::default()
        };
        let specs = merge_specifications(Some(&overrides));
        let params = BuildingParameters::new(12.0, 20.0, 2);
        let rooms = vec![Room::new("b", "Bath", RoomType::Bathroom, 1.5, 2.0)];
        let out = run_with(&specs, &params, bathroom_clearance, rooms);
        assert_eq!(out.rooms[0].width, 1.5);
        assert_eq!(out.conflicts.len(), 1);
    }

    #[test]
    fn accessible_house_uses_larger_circle() {
        let mut params = BuildingParameters::new(12.0, 20.0, 2);
        params.accessible = true;
        let rooms = vec![Room::new("b", "Bath", RoomType::Bathroom, 1.2, 2.1).with_window(Window::new(0.8, 0.6))];
        let out = run_with(&SpecificationSet::default(), &params, bathroom_clearance, rooms);
        assert_eq!(out.rooms[0].width, 1.5);
        assert_eq!(out.rooms[0].height, 2.1);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn non_bathrooms_ignored() {
        let rooms = vec![Room::new("k", "Pantry", RoomType::Service, 0.5, 0.5)];
        let out = run(bathroom_clearance, rooms.clone());
        assert_eq!(out.rooms, rooms);
    }

    #[test]
    fn short_bedroom_grows_larger_side() {
        let rooms = vec![
            Room::new("a", "Wide", RoomType::Bedroom, 2.5, 2.4).with_window(Window::new(1.0, 1.0)),
            Room::new("b", "Deep", RoomType::Bedroom, 2.2, 2.5).with_window(Window::new(1.0, 1.0)),
        ];
        let out = run(bedroom_free_wall, rooms);
        assert_eq!(out.rooms[0].width, 2.6);
        assert_eq!(out.rooms[0].height, 2.4);
        assert_eq!(out.rooms[1].width, 2.2);
        assert_eq!(out.rooms[1].height, 2.6);
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn square_bedroom_grows_width() {
        let rooms = vec![Room::new("a", "Square", RoomType::Bedroom, 2.5, 2.5)];
        let out = run(bedroom_free_wall, rooms);
        assert_eq!(out.rooms[0].width, 2.6);
        assert_eq!(out.rooms[0].height, 2.5);
    }

    #[test]
    fn long_enough_bedroom_untouched() {
        let rooms = vec![Room::new("a", "Bedroom", RoomType::Bedroom, 2.2, 2.75)];
        let out = run(bedroom_free_wall, rooms.clone());
        assert_eq!(out.rooms, rooms);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn unreachable_free_wall_conflicts() {
        let overrides = SpecificationOverrides {
            min_bedroom_free_wall: Some(9.0),
            ..Default::default()
        };
        let specs = merge_specifications(Some(&overrides));
        let params = BuildingParameters::new(12.0, 20.0, 2);
        let rooms = vec![Room::new("a", "Bedroom", RoomType::Bedroom, 3.0, 3.0)];
        let out = run_with(&specs, &params, bedroom_free_wall, rooms.clone());
        assert_eq!(out.rooms, rooms);
        assert_eq!(out.conflicts.len(), 1);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn grown_bathroom_keeps_enough_glazing() {
        // 0.5x5.0 with 0.315 m² of glass; at 0.9x5.0 it needs 0.5625 m².
        let rooms = vec![Room::new("b", "Bath", RoomType::Bathroom, 0.5, 5.0).with_window(Window::new(0.3, 1.05))];
        let out = run(bathroom_clearance, rooms);
        let bath = &out.rooms[0];
        assert_eq!(bath.width, 0.9);
        assert_eq!(bath.height, 5.0);
        assert_eq!(bath.windows.len(), 2);
        assert!(bath.window_area() + 1e-9 >= 4.5 / 8.0);
        assert_eq!(out.warnings.len(), 2);
        assert!(out.warnings[1].starts_with("Added window to \"Bath\""));
    }

    #[test]
    fn lit_bathroom_grows_without_new_window() {
        let rooms = vec![Room::new("b", "Bath", RoomType::Bathroom, 0.8, 0.8).with_window(Window::new(0.5, 0.5))];
        let out = run(bathroom_clearance, rooms);
        assert_eq!(out.rooms[0].windows.len(), 1);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn grown_bedroom_keeps_enough_glazing() {
        // 2.5x2.4 lit exactly at 6.0 / 8; growing to 2.6 wide needs more.
        let rooms = vec![Room::new("a", "Wide", RoomType::Bedroom, 2.5, 2.4).with_window(Window::new(0.75, 1.0))];
        let out = run(bedroom_free_wall, rooms);
        let room = &out.rooms[0];
        assert_eq!(room.width, 2.6);
        assert_eq!(room.windows.len(), 2);
        assert!(room.window_area() + 1e-9 >= 2.6 * 2.4 / 8.0);
        assert_eq!(out.warnings.len(), 2);
    }
}
