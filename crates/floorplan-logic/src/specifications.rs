//! Rulebook of minimum and derived values.
//!
//! A [`SpecificationSet`] is built once per run from the defaults, with
//! caller overrides layered on top, and is then passed by reference into
//! every rule pass. Nothing reads the rulebook from global state.
//!
//! ```
//! use floorplan_logic::specifications::{merge_specifications, SpecificationOverrides};
//!
//! let overrides = SpecificationOverrides {
//!     min_kitchen_width: Some(2.0),
//!     ..Default::default()
//! };
//! let specs = merge_specifications(Some(&overrides));
//! assert_eq!(specs.min_kitchen_width, 2.0);
//! assert_eq!(specs.min_living_width, 2.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::room::{Occupancy, RoomType};

/// The complete rulebook. All lengths in meters, areas in m².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificationSet {
    pub wall_external: f64,
    pub wall_internal: f64,
    pub min_bedroom_couple_area: f64,
    pub min_bedroom_single_area: f64,
    pub min_bedroom_couple_width: f64,
    pub min_bedroom_single_width: f64,
    /// Shortest acceptable longer edge of a bedroom (bed headboard wall).
    pub min_bedroom_free_wall: f64,
    pub min_living_area: f64,
    pub min_living_width: f64,
    pub min_kitchen_width: f64,
    pub min_bathroom_area: f64,
    pub bathroom_circle_diameter: f64,
    pub accessible_circle_diameter: f64,
    pub ceiling_min: f64,
    pub short_ceiling_min: f64,
    pub door_entrance: f64,
    pub door_room: f64,
    pub door_bath: f64,
    pub corridor_width: f64,
    /// Window area as a fraction of floor area, for daylight.
    pub window_fraction_lighting: f64,
    /// Window area as a fraction of floor area, for ventilation.
    pub window_fraction_vent: f64,
}

impl Default for SpecificationSet {
    fn default() -> Self {
        Self {
            wall_external: 0.15,
            wall_internal: 0.10,
            min_bedroom_couple_area: 8.0,
            min_bedroom_single_area: 6.0,
            min_bedroom_couple_width: 2.8,
            min_bedroom_single_width: 2.2,
            min_bedroom_free_wall: 2.6,
            min_living_area: 10.0,
            min_living_width: 2.5,
            min_kitchen_width: 1.8,
            min_bathroom_area: 2.5,
            bathroom_circle_diameter: 0.9,
            accessible_circle_diameter: 1.5,
            ceiling_min: 2.5,
            short_ceiling_min: 2.3,
            door_entrance: 0.8,
            door_room: 0.7,
            door_bath: 0.6,
            corridor_width: 0.9,
            window_fraction_lighting: 1.0 / 8.0,
            window_fraction_vent: 1.0 / 16.0,
        }
    }
}

/// Partial rulebook supplied by the caller. `None` keeps the default.
/// Unknown fields are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecificationOverrides {
    pub wall_external: Option<f64>,
    pub wall_internal: Option<f64>,
    pub min_bedroom_couple_area: Option<f64>,
    pub min_bedroom_single_area: Option<f64>,
    pub min_bedroom_couple_width: Option<f64>,
    pub min_bedroom_single_width: Option<f64>,
    pub min_bedroom_free_wall: Option<f64>,
    pub min_living_area: Option<f64>,
    pub min_living_width: Option<f64>,
    pub min_kitchen_width: Option<f64>,
    pub min_bathroom_area: Option<f64>,
    pub bathroom_circle_diameter: Option<f64>,
    pub accessible_circle_diameter: Option<f64>,
    pub ceiling_min: Option<f64>,
    pub short_ceiling_min: Option<f64>,
    pub door_entrance: Option<f64>,
    pub door_room: Option<f64>,
    pub door_bath: Option<f64>,
    pub corridor_width: Option<f64>,
    pub window_fraction_lighting: Option<f64>,
    pub window_fraction_vent: Option<f64>,
}

/// Layer `overrides` onto the built-in defaults.
pub fn merge_specifications(overrides: Option<&SpecificationOverrides>) -> SpecificationSet {
    let d = SpecificationSet::default();
    let Some(o) = overrides else {
        return d;
    };
    SpecificationSet {
        wall_external: o.wall_external.unwrap_or(d.wall_external),
        wall_internal: o.wall_internal.unwrap_or(d.wall_internal),
        min_bedroom_couple_area: o
            .min_bedroom_couple_area
            .unwrap_or(d.min_bedroom_couple_area),
        min_bedroom_single_area: o
            .min_bedroom_single_area
            .unwrap_or(d.min_bedroom_single_area),
        min_bedroom_couple_width: o
            .min_bedroom_couple_width
            .unwrap_or(d.min_bedroom_couple_width),
        min_bedroom_single_width: o
            .min_bedroom_single_width
            .unwrap_or(d.min_bedroom_single_width),
        min_bedroom_free_wall: o.min_bedroom_free_wall.unwrap_or(d.min_bedroom_free_wall),
        min_living_area: o.min_living_area.unwrap_or(d.min_living_area),
        min_living_width: o.min_living_width.unwrap_or(d.min_living_width),
        min_kitchen_width: o.min_kitchen_width.unwrap_or(d.min_kitchen_width),
        min_bathroom_area: o.min_bathroom_area.unwrap_or(d.min_bathroom_area),
        bathroom_circle_diameter: o
            .bathroom_circle_diameter
            .unwrap_or(d.bathroom_circle_diameter),
        accessible_circle_diameter: o
            .accessible_circle_diameter
            .unwrap_or(d.accessible_circle_diameter),
        ceiling_min: o.ceiling_min.unwrap_or(d.ceiling_min),
        short_ceiling_min: o.short_ceiling_min.unwrap_or(d.short_ceiling_min),
        door_entrance: o.door_entrance.unwrap_or(d.door_entrance),
        door_room: o.door_room.unwrap_or(d.door_room),
        door_bath: o.door_bath.unwrap_or(d.door_bath),
        corridor_width: o.corridor_width.unwrap_or(d.corridor_width),
        window_fraction_lighting: o
            .window_fraction_lighting
            .unwrap_or(d.window_fraction_lighting),
        window_fraction_vent: o.window_fraction_vent.unwrap_or(d.window_fraction_vent),
    }
}

impl SpecificationSet {
    /// Default wall thickness for a room type: living rooms and bedrooms
    /// sit on the envelope, everything else gets an internal partition.
    pub fn wall_thickness_for(&self, room_type: RoomType) -> f64 {
        match room_type {
            RoomType::Living | RoomType::Bedroom => self.wall_external,
            _ => self.wall_internal,
        }
    }

    /// Minimum door width for a door in a room of `room_type`.
    pub fn door_min_for(&self, room_type: RoomType, entrance: bool) -> f64 {
        if entrance {
            self.door_entrance
        } else if room_type == RoomType::Bathroom {
            self.door_bath
        } else {
            self.door_room
        }
    }

    /// `(min_area, min_width)` for a bedroom of the given occupancy.
    pub fn bedroom_minimums(&self, occupancy: Occupancy) -> (f64, f64) {
        match occupancy {
            Occupancy::Couple => (self.min_bedroom_couple_area, self.min_bedroom_couple_width),
            Occupancy::Single => (self.min_bedroom_single_area, self.min_bedroom_single_width),
        }
    }

    /// Turning-circle diameter required in bathrooms.
    pub fn turning_diameter(&self, accessible: bool) -> f64 {
        if accessible {
            self.accessible_circle_diameter
        } else {
            self.bathroom_circle_diameter
        }
    }
}
