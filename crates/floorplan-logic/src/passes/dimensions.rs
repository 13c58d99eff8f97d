//! Wall thickness defaults and per-type minimum dimensions.

use super::{PassContext, PassOutcome};
use crate::geometry::{snap_up, EPS, SNAP_GRID};
use crate::room::{Occupancy, Room, RoomType};
use crate::specifications::SpecificationSet;

/// Lowercase name fragments that mark a bedroom as double occupancy when
/// no explicit occupancy is given.
pub const COUPLE_MARKERS: [&str; 4] = ["casal", "couple", "double", "master"];

/// Smallest width used when dividing by a bathroom's width.
const MIN_DIVISOR_WIDTH: f64 = 0.1;

/// Pass 1: rooms without an explicit wall thickness get the default for
/// their type.
pub fn assign_wall_thickness(rooms: Vec<Room>, ctx: &PassContext) -> PassOutcome {
    let rooms = rooms
        .into_iter()
        .map(|mut r| {
            if r.wall_thickness.is_none() {
                r.wall_thickness = Some(ctx.specs.wall_thickness_for(r.room_type));
            }
            r
        })
        .collect();
    PassOutcome::new(rooms)
}

/// Occupancy used to pick bedroom minimums. An explicit value wins;
/// otherwise a couple marker in the name or a width already at the couple
/// minimum makes it a double room.
pub fn bedroom_occupancy(room: &Room, specs: &SpecificationSet) -> Occupancy {
    if let Some(occupancy) = room.occupancy {
        return occupancy;
    }
    let name = room.name.to_lowercase();
    let named_couple = COUPLE_MARKERS.iter().any(|m| name.contains(m));
    if named_couple || room.width + EPS >= specs.min_bedroom_couple_width {
        Occupancy::Couple
    } else {
        Occupancy::Single
    }
}

/// Grow `width` to `min_width`, then `height` until the area reaches
/// `min_area`. Returns true if the room needed it.
fn grow_to_minimums(room: &mut Room, min_area: f64, min_width: f64) -> bool {
    if room.area() + EPS >= min_area && room.width + EPS >= min_width {
        return false;
    }
    let width = snap_up(room.width.max(min_width), SNAP_GRID);
    let height = snap_up(room.height.max(min_area / width), SNAP_GRID);
    room.width = width;
    room.height = height;
    true
}

/// Pass 2: per-type minimum area and width. Only ever grows rooms.
pub fn enforce_min_dimensions(rooms: Vec<Room>, ctx: &PassContext) -> PassOutcome {
    let specs = ctx.specs;
    let mut out = PassOutcome::default();

    for mut room in rooms {
        match room.room_type {
            RoomType::Bedroom => {
                // Resolved once here; later growth and rounding must not reclassify.
                let occupancy = bedroom_occupancy(&room, specs);
                room.occupancy = Some(occupancy);
                let (min_area, min_width) = specs.bedroom_minimums(occupancy);
                if grow_to_minimums(&mut room, min_area, min_width) {
                    out.warn(format!(
                        "Adjusted \"{}\" to minimum dimensions ({:.2}x{:.2} m).",
                        room.name, room.width, room.height
                    ));
                }
            }
            RoomType::Living => {
                if grow_to_minimums(&mut room, specs.min_living_area, specs.min_living_width) {
                    out.warn(format!(
                        "Adjusted \"{}\" to minimum social area ({:.2}x{:.2} m).",
                        room.name, room.width, room.height
                    ));
                }
            }
            // Kitchens may be shallow but not narrow.
            RoomType::Kitchen => {
                if room.width + EPS < specs.min_kitchen_width {
                    room.width = snap_up(specs.min_kitchen_width, SNAP_GRID);
                    out.warn(format!(
                        "Kitchen \"{}\" width adjusted to {:.2} m (min {:.2} m).",
                        room.name, room.width, specs.min_kitchen_width
                    ));
                }
            }
            RoomType::Bathroom => {
                if room.area() + EPS < specs.min_bathroom_area {
                    let needed = specs.min_bathroom_area / room.width.max(MIN_DIVISOR_WIDTH);
                    room.height = snap_up(room.height.max(needed), SNAP_GRID);
                    out.warn(format!(
                        "Bathroom \"{}\" adjusted to minimum area ({:.2}x{:.2} m).",
                        room.name, room.width, room.height
                    ));
                }
            }
            _ => {}
        }
        out.rooms.push(room);
    }
    out
}

/// True when the room satisfies every size rule the dimension, clearance
/// and free-wall passes enforce for its type.
pub fn meets_minimums(room: &Room, ctx: &PassContext) -> bool {
    let specs = ctx.specs;
    let area = room.area() + EPS;
    match room.room_type {
        RoomType::Bedroom => {
            let (min_area, min_width) = specs.bedroom_minimums(bedroom_occupancy(room, specs));
            area >= min_area
                && room.width + EPS >= min_width
                && room.width.max(room.height) + EPS >= specs.min_bedroom_free_wall
        }
        RoomType::Living => area >= specs.min_living_area && room.width + EPS >= specs.min_living_width,
        RoomType::Kitchen => room.width + EPS >= specs.min_kitchen_width,
        RoomType::Bathroom => {
            let diameter = specs.turning_diameter(ctx.params.accessible);
            area >= specs.min_bathroom_area
                && room.width + EPS >= diameter
                && room.height + EPS >= diameter
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::BuildingParameters;

    fn run(pass: fn(Vec<Room>, &PassContext) -> PassOutcome, rooms: Vec<Room>) -> PassOutcome {
        let specs = SpecificationSet::default();
        let params = BuildingParameters::new(12.0, 20.0, 2);
        let ctx = PassContext {
            specs: &specs,
            params: &params,
        };
        pass(rooms, &ctx)
    }

    #[test]
    fn wall_thickness_defaults_by_type() {
        let mut custom = Room::new("k", "Kitchen", RoomType::Kitchen, 3.0, 3.0);
        custom.wall_thickness = Some(0.25);
        let rooms = vec![
            Room::new("l", "Living", RoomType::Living, 4.0, 4.0),
            Room::new("b", "Bath", RoomType::Bathroom, 2.0, 2.0),
            custom,
        ];
        let out = run(assign_wall_thickness, rooms);
        assert_eq!(out.rooms[0].wall_thickness, Some(0.15));
        assert_eq!(out.rooms[1].wall_thickness, Some(0.10));
        assert_eq!(out.rooms[2].wall_thickness, Some(0.25));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn narrow_single_bedroom_grows_width_only() {
        let rooms = vec![Room::new("q2", "Bedroom 2", RoomType::Bedroom, 2.0, 3.0)];
        let out = run(enforce_min_dimensions, rooms);
        let room = &out.rooms[0];
        assert_eq!(room.width, 2.2);
        assert_eq!(room.height, 3.0);
        assert!(room.area() >= 6.0);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("Bedroom 2"));
    }

    #[test]
    fn short_single_bedroom_grows_height() {
        let rooms = vec![Room::new("q2", "Bedroom 2", RoomType::Bedroom, 2.2, 2.0)];
        let out = run(enforce_min_dimensions, rooms);
        let room = &out.rooms[0];
        assert_eq!(room.width, 2.2);
        // 6.0 / 2.2 = 2.727.. rounded up to the grid
        assert_eq!(room.height, 2.75);
        assert!(room.area() >= 6.0);
    }

    #[test]
    fn couple_marker_uses_couple_minimums() {
        let rooms = vec![Room::new("m", "Quarto Casal", RoomType::Bedroom, 2.5, 2.5)];
        let out = run(enforce_min_dimensions, rooms);
        let room = &out.rooms[0];
        assert_eq!(room.width, 2.8);
        assert!(room.area() >= 8.0);
        assert_eq!(room.height, 2.9);
    }

    #[test]
    fn explicit_occupancy_overrides_heuristic() {
        let specs = SpecificationSet::default();
        let wide = Room::new("b", "Guest", RoomType::Bedroom, 3.0, 2.0);
        assert_eq!(bedroom_occupancy(&wide, &specs), Occupancy::Couple);
        let wide_single = wide.clone().with_occupancy(Occupancy::Single);
        assert_eq!(bedroom_occupancy(&wide_single, &specs), Occupancy::Single);
        let named = Room::new("m", "Master Suite", RoomType::Bedroom, 2.0, 2.0)
            .with_occupancy(Occupancy::Single);
        assert_eq!(bedroom_occupancy(&named, &specs), Occupancy::Single);
    }

    #[test]
    fn conformant_bedroom_untouched() {
        let rooms = vec![Room::new("q", "Bedroom", RoomType::Bedroom, 3.0, 3.0)];
        let out = run(enforce_min_dimensions, rooms);
        assert_eq!(out.rooms[0].width, 3.0);
        assert_eq!(out.rooms[0].height, 3.0);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn living_grows_to_area() {
        let rooms = vec![Room::new("l", "Living", RoomType::Living, 2.0, 3.0)];
        let out = run(enforce_min_dimensions, rooms);
        assert_eq!(out.rooms[0].width, 2.5);
        assert_eq!(out.rooms[0].height, 4.0);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn kitchen_only_width_enforced() {
        let rooms = vec![
            Room::new("k1", "Narrow", RoomType::Kitchen, 1.5, 1.0),
            Room::new("k2", "Shallow", RoomType::Kitchen, 2.0, 1.0),
        ];
        let out = run(enforce_min_dimensions, rooms);
        assert_eq!(out.rooms[0].width, 1.8);
        assert_eq!(out.rooms[0].height, 1.0);
        assert_eq!(out.rooms[1].width, 2.0);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn bathroom_grows_height_only() {
        let rooms = vec![Room::new("b", "Bath", RoomType::Bathroom, 1.0, 1.5)];
        let out = run(enforce_min_dimensions, rooms);
        assert_eq!(out.rooms[0].width, 1.0);
        assert_eq!(out.rooms[0].height, 2.5);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn other_types_ignored() {
        let rooms = vec![
            Room::new("g", "Garage", RoomType::Garage, 0.6, 0.6),
            Room::new("v", "Balcony", RoomType::Balcony, 0.6, 0.6),
        ];
        let out = run(enforce_min_dimensions, rooms.clone());
        assert_eq!(out.rooms, rooms);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn minimums_check_matches_enforcement() {
        let specs = SpecificationSet::default();
        let params = BuildingParameters::new(12.0, 20.0, 2);
        let ctx = PassContext {
            specs: &specs,
            params: &params,
        };
        assert!(!meets_minimums(
            &Room::new("b", "Bedroom", RoomType::Bedroom, 2.0, 3.0),
            &ctx
        ));
        assert!(meets_minimums(
            &Room::new("b", "Bedroom", RoomType::Bedroom, 2.2, 3.0),
            &ctx
        ));
        assert!(!meets_minimums(
            &Room::new("w", "Bath", RoomType::Bathroom, 0.8, 4.0),
            &ctx
        ));
        assert!(meets_minimums(
            &Room::new("g", "Garage", RoomType::Garage, 0.5, 0.5),
            &ctx
        ));
    }

    #[test]
    fn bedroom_occupancy_is_recorded() {
        let rooms = vec![
            Room::new("a", "Bedroom", RoomType::Bedroom, 2.795, 2.2),
            Room::new("b", "Master", RoomType::Bedroom, 3.0, 3.0),
            Room::new("c", "Guest", RoomType::Bedroom, 3.0, 3.0).with_occupancy(Occupancy::Single),
        ];
        let out = run(enforce_min_dimensions, rooms);
        assert_eq!(out.rooms[0].occupancy, Some(Occupancy::Single));
        assert_eq!(out.rooms[1].occupancy, Some(Occupancy::Couple));
        assert_eq!(out.rooms[2].occupancy, Some(Occupancy::Single));
        assert!(out.warnings.is_empty());

        // Rounding the single room up to 2.8 m must not turn it into a couple room.
        let mut widened = out.rooms[0].clone();
        widened.width = 2.8;
        assert_eq!(bedroom_occupancy(&widened, &SpecificationSet::default()), Occupancy::Single);
    }

    #[test]
    fn tiny_bathroom_grows_into_a_strip() {
        // Only the height grows, so a 0.5 m wide room needs 5 m of depth.
        let rooms = vec![Room::new("b", "Bath", RoomType::Bathroom, 0.5, 0.5)];
        let out = run(enforce_min_dimensions, rooms);
        assert_eq!(out.rooms[0].width, 0.5);
        assert_eq!(out.rooms[0].height, 5.0);
    }
}
