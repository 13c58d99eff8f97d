//! Specification sheet derived from an adjusted layout.
//!
//! Summarizes each room (size, glazing, doors, walls) and the house as a
//! whole, echoing the rulebook values a drafter needs alongside the plan.

use serde::{Deserialize, Serialize};

use crate::geometry::EPS;
use crate::pipeline::PipelineResult;
use crate::room::{BuildingParameters, Room, RoomType};
use crate::specifications::SpecificationSet;

/// One line of the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSheetRow {
    pub id: String,
    pub name: String,
    pub room_type: RoomType,
    pub width: f64,
    pub height: f64,
    pub area: f64,
    pub window_area: f64,
    /// Window area over floor area.
    pub daylight_ratio: f64,
    pub meets_daylight: bool,
    pub door_count: usize,
    pub wall_thickness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecSheet {
    pub rooms: Vec<RoomSheetRow>,
    /// Sum of room areas, balconies excluded.
    pub built_area: f64,
    pub balcony_area: f64,
    pub lot_area: f64,
    /// Built area over lot area.
    pub lot_occupancy: f64,
    pub area_target: Option<f64>,
    /// Built area minus target, when a target was given.
    pub area_deviation: Option<f64>,
    pub ceiling_min: f64,
    pub short_ceiling_min: f64,
    pub corridor_width: f64,
    pub warning_count: usize,
    pub conflict_count: usize,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn sheet_row(room: &Room, specs: &SpecificationSet) -> RoomSheetRow {
    let area = room.area();
    let window_area = room.window_area();
    let daylight_ratio = if area > 0.0 { window_area / area } else { 0.0 };
    RoomSheetRow {
        id: room.id.clone(),
        name: room.name.clone(),
        room_type: room.room_type,
        width: room.width,
        height: room.height,
        area: round2(area),
        window_area: round2(window_area),
        daylight_ratio: (daylight_ratio * 1000.0).round() / 1000.0,
        meets_daylight: daylight_ratio + EPS >= specs.window_fraction_lighting,
        door_count: room.doors.len(),
        wall_thickness: room
            .wall_thickness
            .unwrap_or_else(|| specs.wall_thickness_for(room.room_type)),
    }
}

/// Build the sheet for a pipeline result.
pub fn build_spec_sheet(
    result: &PipelineResult,
    params: &BuildingParameters,
    specs: &SpecificationSet,
) -> SpecSheet {
    let rows: Vec<RoomSheetRow> = result.rooms.iter().map(|r| sheet_row(r, specs)).collect();

    let (balconies, interior): (Vec<&Room>, Vec<&Room>) = result
        .rooms
        .iter()
        .partition(|r| r.room_type == RoomType::Balcony);
    let built_area: f64 = interior.iter().map(|r| r.area()).sum();
    let balcony_area: f64 = balconies.iter().map(|r| r.area()).sum();
    let lot_area = params.lot_width * params.lot_depth;

    SpecSheet {
        rooms: rows,
        built_area: round2(built_area),
        balcony_area: round2(balcony_area),
        lot_area: round2(lot_area),
        lot_occupancy: if lot_area > 0.0 {
            (built_area / lot_area * 1000.0).round() / 1000.0
        } else {
            0.0
        },
        area_target: params.total_area,
        area_deviation: params.total_area.map(|t| round2(built_area - t)),
        ceiling_min: specs.ceiling_min,
        short_ceiling_min: specs.short_ceiling_min,
        corridor_width: specs.corridor_width,
        warning_count: result.warnings.len(),
        conflict_count: result.conflict_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Window;

    fn result_with(rooms: Vec<Room>) -> PipelineResult {
        PipelineResult {
            rooms,
            warnings: vec!["one".to_string()],
            conflicts: Some(vec!["bad".to_string()]),
        }
    }

    #[test]
    fn rows_describe_rooms() {
        let room = Room::new("q", "Bedroom", RoomType::Bedroom, 3.0, 4.0)
            .with_window(Window::new(1.5, 1.0));
        let sheet = build_spec_sheet(
            &result_with(vec![room]),
            &BuildingParameters::new(12.0, 20.0, 1),
            &SpecificationSet::default(),
        );
        let row = &sheet.rooms[0];
        assert_eq!(row.area, 12.0);
        assert_eq!(row.window_area, 1.5);
        assert_eq!(row.daylight_ratio, 0.125);
        assert!(row.meets_daylight);
        assert_eq!(row.wall_thickness, 0.15);
        assert_eq!(sheet.warning_count, 1);
        assert_eq!(sheet.conflict_count, 1);
    }

    #[test]
    fn totals_exclude_balconies() {
        let rooms = vec![
            Room::new("l", "Living", RoomType::Living, 5.0, 4.0),
            Room::new("v", "Balcony", RoomType::Balcony, 3.0, 2.0),
        ];
        let mut params = BuildingParameters::new(10.0, 20.0, 0);
        params.total_area = Some(25.0);
        let sheet = build_spec_sheet(&result_with(rooms), &params, &SpecificationSet::default());
        assert_eq!(sheet.built_area, 20.0);
        assert_eq!(sheet.balcony_area, 6.0);
        assert_eq!(sheet.lot_area, 200.0);
        assert_eq!(sheet.lot_occupancy, 0.1);
        assert_eq!(sheet.area_deviation, Some(-5.0));
        assert_eq!(sheet.ceiling_min, 2.5);
    }

    #[test]
    fn dark_room_flagged() {
        let rooms = vec![Room::new("s", "Store", RoomType::Other, 2.0, 2.0)];
        let sheet = build_spec_sheet(
            &result_with(rooms),
            &BuildingParameters::new(10.0, 20.0, 0),
            &SpecificationSet::default(),
        );
        assert!(!sheet.rooms[0].meets_daylight);
        assert_eq!(sheet.rooms[0].daylight_ratio, 0.0);
    }
}
