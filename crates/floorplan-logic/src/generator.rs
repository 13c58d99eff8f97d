//! Initial room list from the wizard's house program.
//!
//! The constraint engine does not care where its rooms come from; anything
//! implementing [`LayoutGenerator`] can feed it. [`NaiveLayoutGenerator`]
//! is the default: nominal room areas, a simple row layout, and typical
//! door and window sizes, with no attempt at satisfying the rulebook.
//!
//! ```
//! use floorplan_logic::generator::{validate_program, HouseProgram, LayoutGenerator, NaiveLayoutGenerator};
//!
//! let program = HouseProgram { bedrooms: 2, has_garage: false, ..Default::default() };
//! assert!(validate_program(&program).is_empty());
//! let rooms = NaiveLayoutGenerator.generate(&program);
//! assert_eq!(rooms.iter().filter(|r| r.name.starts_with("Bedroom")).count(), 1);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{snap, SNAP_GRID};
use crate::room::{BuildingParameters, Door, Occupancy, Room, RoomType, Window};

/// Wizard inputs describing the house to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseProgram {
    /// Target built area in m².
    pub total_area: f64,
    pub lot_width: f64,
    pub lot_depth: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub has_garage: bool,
    pub has_balcony: bool,
    /// Architectural style tag; only used by downstream collaborators.
    pub style: String,
    pub accessible: bool,
}

impl Default for HouseProgram {
    fn default() -> Self {
        Self {
            total_area: 120.0,
            lot_width: 12.0,
            lot_depth: 20.0,
            bedrooms: 3,
            bathrooms: 2,
            has_garage: true,
            has_balcony: true,
            style: "modern_minimalist".to_string(),
            accessible: false,
        }
    }
}

impl HouseProgram {
    /// Parameters handed to the constraint pipeline.
    pub fn building_parameters(&self) -> BuildingParameters {
        BuildingParameters {
            lot_width: self.lot_width,
            lot_depth: self.lot_depth,
            bedrooms: self.bedrooms,
            total_area: Some(self.total_area),
            accessible: self.accessible,
        }
    }
}

/// House program validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProgramError {
    #[error("lot must be positive, got {0}x{1} m")]
    InvalidLot(f64, f64),
    #[error("total area must be positive, got {0} m²")]
    InvalidTotalArea(f64),
    #[error("total area {area} m² does not fit a {lot_area} m² lot")]
    AreaExceedsLot { area: f64, lot_area: f64 },
    #[error("bedroom count {0} is outside 1..=6")]
    BedroomCount(u32),
    #[error("bathroom count {0} is outside 1..=4")]
    BathroomCount(u32),
}

/// Validate a house program, returning all errors found.
pub fn validate_program(program: &HouseProgram) -> Vec<ProgramError> {
    let mut errors = Vec::new();

    let lot_ok = program.lot_width.is_finite()
        && program.lot_depth.is_finite()
        && program.lot_width > 0.0
        && program.lot_depth > 0.0;
    if !lot_ok {
        errors.push(ProgramError::InvalidLot(program.lot_width, program.lot_depth));
    }
    if !(program.total_area.is_finite() && program.total_area > 0.0) {
        errors.push(ProgramError::InvalidTotalArea(program.total_area));
    } else if lot_ok && program.total_area > program.lot_width * program.lot_depth {
        errors.push(ProgramError::AreaExceedsLot {
            area: program.total_area,
            lot_area: program.lot_width * program.lot_depth,
        });
    }
    if !(1..=6).contains(&program.bedrooms) {
        errors.push(ProgramError::BedroomCount(program.bedrooms));
    }
    if !(1..=4).contains(&program.bathrooms) {
        errors.push(ProgramError::BathroomCount(program.bathrooms));
    }
    errors
}

/// Produces the initial, unconstrained room list for a program.
pub trait LayoutGenerator {
    fn generate(&self, program: &HouseProgram) -> Vec<Room>;
}

/// Nominal rooms placed left to right, wrapping at the lot width.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveLayoutGenerator;

/// Nominal area for each generated room, in m².
mod nominal {
    pub const LIVING: f64 = 25.5;
    pub const KITCHEN: f64 = 12.8;
    pub const SERVICE: f64 = 6.2;
    pub const MASTER_BEDROOM: f64 = 15.6;
    pub const SUITE_BATHROOM: f64 = 4.8;
    pub const SECOND_BEDROOM: f64 = 11.2;
    pub const BEDROOM: f64 = 9.8;
    pub const BATHROOM: f64 = 4.2;
    pub const POWDER_ROOM: f64 = 2.5;
    pub const GARAGE: f64 = 15.0;
    pub const BALCONY: f64 = 8.5;
}

const ROW_GAP: f64 = 0.2;
const ORIGIN: f64 = 1.0;

/// Width and depth for a nominal area, aspect between 1:1 and 1.5:1.
fn room_dims(area: f64) -> (f64, f64) {
    let w = snap(area.sqrt() * 1.2, SNAP_GRID);
    let h = snap(area / w, SNAP_GRID);
    (w, h)
}

fn nominal_room(id: String, name: String, room_type: RoomType, area: f64) -> Room {
    let (w, h) = room_dims(area);
    Room::new(id, name, room_type, w, h)
}

impl LayoutGenerator for NaiveLayoutGenerator {
    fn generate(&self, program: &HouseProgram) -> Vec<Room> {
        let mut rooms = Vec::new();

        rooms.push(
            nominal_room("living".into(), "Living Room".into(), RoomType::Living, nominal::LIVING)
                .with_door(Door::entrance(0.9))
                .with_window(Window::new(1.2, 1.2)),
        );
        rooms.push(
            nominal_room("kitchen".into(), "Kitchen".into(), RoomType::Kitchen, nominal::KITCHEN)
                .with_door(Door::new(0.8))
                .with_window(Window::new(0.6, 0.6)),
        );
        rooms.push(
            nominal_room("service".into(), "Laundry".into(), RoomType::Service, nominal::SERVICE)
                .with_door(Door::new(0.7)),
        );

        for i in 0..program.bedrooms {
            let room = match i {
                0 => nominal_room(
                    "bedroom-1".into(),
                    "Master Bedroom".into(),
                    RoomType::Bedroom,
                    nominal::MASTER_BEDROOM,
                )
                .with_occupancy(Occupancy::Couple),
                1 => nominal_room(
                    "bedroom-2".into(),
                    "Bedroom 2".into(),
                    RoomType::Bedroom,
                    nominal::SECOND_BEDROOM,
                ),
                n => nominal_room(
                    format!("bedroom-{}", n + 1),
                    format!("Bedroom {}", n + 1),
                    RoomType::Bedroom,
                    nominal::BEDROOM,
                ),
            };
            rooms.push(
                room.with_door(Door::new(0.8))
                    .with_window(Window::new(1.0, 1.2)),
            );
        }

        for i in 0..program.bathrooms {
            let (name, area) = match i {
                0 => ("Suite Bathroom".to_string(), nominal::SUITE_BATHROOM),
                1 => ("Bathroom".to_string(), nominal::BATHROOM),
                n => (format!("Powder Room {}", n - 1), nominal::POWDER_ROOM),
            };
            rooms.push(
                nominal_room(format!("bathroom-{}", i + 1), name, RoomType::Bathroom, area)
                    .with_door(Door::new(0.6))
                    .with_window(Window::new(0.6, 0.6)),
            );
        }

        if program.has_garage {
            rooms.push(
                nominal_room("garage".into(), "Garage".into(), RoomType::Garage, nominal::GARAGE)
                    .with_door(Door::new(0.8)),
            );
        }
        if program.has_balcony {
            rooms.push(nominal_room(
                "balcony".into(),
                "Balcony".into(),
                RoomType::Balcony,
                nominal::BALCONY,
            ));
        }

        place_in_rows(&mut rooms, program.lot_width);
        rooms
    }
}

/// Lay rooms out left to right from the origin, starting a new row when
/// the next room would cross the lot width.
fn place_in_rows(rooms: &mut [Room], lot_width: f64) {
    let mut x = ORIGIN;
    let mut y = ORIGIN;
    let mut row_depth: f64 = 0.0;
    for room in rooms.iter_mut() {
        if x > ORIGIN && x + room.width > lot_width {
            x = ORIGIN;
            y += row_depth + ROW_GAP;
            row_depth = 0.0;
        }
        room.x = snap(x, SNAP_GRID);
        room.y = snap(y, SNAP_GRID);
        x += room.width + ROW_GAP;
        row_depth = row_depth.max(room.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_program_is_valid() {
        let errors = validate_program(&HouseProgram::default());
        assert!(errors.is_empty(), "default program should be valid: {errors:?}");
    }

    #[test]
    fn invalid_programs() {
        let mut program = HouseProgram::default();
        program.bedrooms = 0;
        program.bathrooms = 9;
        let errors = validate_program(&program);
        assert!(errors.contains(&ProgramError::BedroomCount(0)));
        assert!(errors.contains(&ProgramError::BathroomCount(9)));

        let mut program = HouseProgram::default();
        program.total_area = 500.0;
        assert!(matches!(
            validate_program(&program)[..],
            [ProgramError::AreaExceedsLot { .. }]
        ));

        let mut program = HouseProgram::default();
        program.lot_depth = -1.0;
        assert!(validate_program(&program).contains(&ProgramError::InvalidLot(12.0, -1.0)));
    }

    #[test]
    fn default_program_rooms() {
        let rooms = NaiveLayoutGenerator.generate(&HouseProgram::default());
        let count = |t: RoomType| rooms.iter().filter(|r| r.room_type == t).count();
        assert_eq!(count(RoomType::Bedroom), 3);
        assert_eq!(count(RoomType::Bathroom), 2);
        assert_eq!(count(RoomType::Living), 1);
        assert_eq!(count(RoomType::Kitchen), 1);
        assert_eq!(count(RoomType::Garage), 1);
        assert_eq!(count(RoomType::Balcony), 1);

        let ids: HashSet<&str> = rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), rooms.len());
    }

    #[test]
    fn master_bedroom_is_couple_occupancy() {
        let rooms = NaiveLayoutGenerator.generate(&HouseProgram::default());
        let master = rooms.iter().find(|r| r.id == "bedroom-1").unwrap();
        assert_eq!(master.occupancy, Some(Occupancy::Couple));
    }

    #[test]
    fn living_room_has_entrance() {
        let rooms = NaiveLayoutGenerator.generate(&HouseProgram::default());
        let living = rooms.iter().find(|r| r.room_type == RoomType::Living).unwrap();
        assert!(living.doors.iter().any(|d| d.entrance));
    }

    #[test]
    fn optional_rooms_follow_program() {
        let program = HouseProgram {
            has_garage: false,
            has_balcony: false,
            bathrooms: 3,
            ..Default::default()
        };
        let rooms = NaiveLayoutGenerator.generate(&program);
        assert!(rooms.iter().all(|r| r.room_type != RoomType::Garage));
        assert!(rooms.iter().all(|r| r.room_type != RoomType::Balcony));
        assert!(rooms.iter().any(|r| r.name == "Powder Room 1"));
    }

    #[test]
    fn rows_wrap_at_lot_width() {
        let rooms = NaiveLayoutGenerator.generate(&HouseProgram::default());
        for r in &rooms {
            assert!(r.x >= ORIGIN && r.y >= ORIGIN);
            assert!(r.width > 0.0 && r.height > 0.0);
        }
        assert!(rooms.iter().any(|r| r.y > ORIGIN));
    }

    #[test]
    fn building_parameters_carry_program() {
        let program = HouseProgram {
            accessible: true,
            ..Default::default()
        };
        let params = program.building_parameters();
        assert_eq!(params.lot_width, 12.0);
        assert_eq!(params.bedrooms, 3);
        assert_eq!(params.total_area, Some(120.0));
        assert!(params.accessible);
    }
}
