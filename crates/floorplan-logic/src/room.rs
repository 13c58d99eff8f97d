//! Room data model: rooms, openings, and building parameters.
//!
//! Plain structs with no behavior beyond simple geometry accessors.
//! Every type round-trips through serde so the front end can hand rooms
//! over as JSON.

use serde::{Deserialize, Serialize};

/// Closed set of room kinds the rulebook knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Bedroom,
    Bathroom,
    Living,
    Kitchen,
    Garage,
    Balcony,
    Service,
    Other,
}

/// Functional zone used by the zoning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Living and common spaces.
    Social,
    /// Kitchen, laundry, garage.
    Service,
    /// Bedrooms and bathrooms.
    Private,
}

impl RoomType {
    /// Zone this room type belongs to. Balconies have no zone and keep
    /// whatever position they were given.
    pub fn zone(self) -> Option<Zone> {
        match self {
            RoomType::Living | RoomType::Other => Some(Zone::Social),
            RoomType::Kitchen | RoomType::Service | RoomType::Garage => Some(Zone::Service),
            RoomType::Bedroom | RoomType::Bathroom => Some(Zone::Private),
            RoomType::Balcony => None,
        }
    }

    /// Rooms that need plumbing and are clustered by the wet-area pass.
    pub fn is_wet(self) -> bool {
        matches!(
            self,
            RoomType::Kitchen | RoomType::Bathroom | RoomType::Service | RoomType::Garage
        )
    }
}

/// Explicit bedroom classification. When absent the dimension pass falls
/// back to a name/width heuristic and records what it picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    Single,
    Couple,
}

/// Window opening. Missing fields deserialize as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Window {
    pub width: f64,
    pub height: f64,
    /// Offset along the room perimeter.
    pub x: f64,
    pub y: f64,
}

impl Window {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Door opening. A missing width deserializes as 0 and is raised to the
/// rulebook minimum by the door pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Door {
    pub width: f64,
    pub x: f64,
    pub y: f64,
    /// Main entrance of the house (uses the entrance minimum).
    pub entrance: bool,
}

impl Door {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn entrance(width: f64) -> Self {
        Self {
            width,
            entrance: true,
            ..Self::default()
        }
    }
}

/// One enclosed, axis-aligned space in the plan. Units are meters, origin
/// at the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_thickness: Option<f64>,
    #[serde(default)]
    pub windows: Vec<Window>,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupancy: Option<Occupancy>,
}

impl Room {
    /// A room at the origin with no openings.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        room_type: RoomType,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            width,
            height,
            x: 0.0,
            y: 0.0,
            room_type,
            wall_thickness: None,
            windows: Vec::new(),
            doors: Vec::new(),
            occupancy: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_door(mut self, door: Door) -> Self {
        self.doors.push(door);
        self
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.windows.push(window);
        self
    }

    pub fn with_occupancy(mut self, occupancy: Occupancy) -> Self {
        self.occupancy = Some(occupancy);
        self
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Total glazed area of all windows.
    pub fn window_area(&self) -> f64 {
        self.windows.iter().map(Window::area).sum()
    }
}

/// Lot and program parameters. Read-only input to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingParameters {
    pub lot_width: f64,
    pub lot_depth: f64,
    pub bedrooms: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_area: Option<f64>,
    /// Use the accessible turning-circle diameter for bathrooms.
    #[serde(default)]
    pub accessible: bool,
}

impl BuildingParameters {
    pub fn new(lot_width: f64, lot_depth: f64, bedrooms: u32) -> Self {
        Self {
            lot_width,
            lot_depth,
            bedrooms,
            total_area: None,
            accessible: false,
        }
    }
}
