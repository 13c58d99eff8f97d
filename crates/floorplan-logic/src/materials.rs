//! Rough bill of materials.
//!
//! Quantities are rule-of-thumb estimates driven by built area, lot
//! perimeter, and the room and opening counts of the adjusted layout.
//! Unit prices are reference values in the local currency and only serve
//! to rank where the money goes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::generator::HouseProgram;
use crate::room::{Room, RoomType};

/// A single estimated line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub id: String,
    pub category: String,
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
    pub specification: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillOfMaterials {
    pub items: Vec<MaterialItem>,
    pub total_cost: f64,
}

impl BillOfMaterials {
    /// Items grouped by category, categories in alphabetical order.
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&MaterialItem>> {
        let mut groups: BTreeMap<&str, Vec<&MaterialItem>> = BTreeMap::new();
        for item in &self.items {
            groups.entry(item.category.as_str()).or_default().push(item);
        }
        groups
    }

    pub fn item(&self, id: &str) -> Option<&MaterialItem> {
        self.items.iter().find(|i| i.id == id)
    }
}

/// Storey height used for wall areas, in meters.
const WALL_HEIGHT: f64 = 3.0;
/// Internal partition area per m² of floor.
const INTERNAL_WALL_RATIO: f64 = 0.8;
/// Slab plus foundation concrete per m² of floor.
const CONCRETE_PER_M2: f64 = 0.12 + 0.03;
const STEEL_KG_PER_M2: f64 = 8.0;
const BLOCKS_PER_M2: f64 = 12.5;
/// Pitched roof area per m² of floor.
const ROOF_FACTOR: f64 = 1.3;
const ROOF_TIMBER_PER_M2: f64 = 0.04;
/// Wall tiling per bathroom, plus a fixed kitchen allowance.
const TILE_PER_BATHROOM: f64 = 25.0;
const TILE_KITCHEN: f64 = 15.0;
/// Two coats, 12 m² per liter.
const PAINT_COATS: f64 = 2.0;
const PAINT_COVERAGE: f64 = 12.0;
const ELECTRICAL_POINTS_PER_M2: f64 = 1.2;
const PLUMBING_PER_BATHROOM: f64 = 8.0;
const PLUMBING_KITCHEN_SERVICE: f64 = 6.0;

fn round_to(v: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (v * f).round() / f
}

struct Line {
    id: &'static str,
    category: &'static str,
    name: &'static str,
    unit: &'static str,
    quantity: f64,
    unit_price: f64,
    specification: &'static str,
}

impl From<Line> for MaterialItem {
    fn from(l: Line) -> Self {
        MaterialItem {
            id: l.id.to_string(),
            category: l.category.to_string(),
            name: l.name.to_string(),
            unit: l.unit.to_string(),
            quantity: l.quantity,
            unit_price: l.unit_price,
            total_price: round_to(l.quantity * l.unit_price, 2),
            specification: l.specification.to_string(),
        }
    }
}

/// Counts taken from the adjusted rooms, or from the program when the
/// layout is empty.
struct Takeoff {
    floor_area: f64,
    bathrooms: f64,
    windows: f64,
    doors: f64,
}

impl Takeoff {
    fn new(program: &HouseProgram, rooms: &[Room]) -> Self {
        if rooms.is_empty() {
            let bedrooms = program.bedrooms as f64;
            let bathrooms = program.bathrooms as f64;
            return Self {
                floor_area: program.total_area,
                bathrooms,
                windows: bedrooms + 2.0 + bathrooms,
                doors: bedrooms + bathrooms + 2.0,
            };
        }
        Self {
            floor_area: rooms
                .iter()
                .filter(|r| r.room_type != RoomType::Balcony)
                .map(Room::area)
                .sum(),
            bathrooms: rooms
                .iter()
                .filter(|r| r.room_type == RoomType::Bathroom)
                .count() as f64,
            windows: rooms.iter().map(|r| r.windows.len()).sum::<usize>() as f64,
            doors: rooms.iter().map(|r| r.doors.len()).sum::<usize>() as f64,
        }
    }
}

/// Estimate materials for `program` built as the adjusted `rooms`.
pub fn estimate_materials(program: &HouseProgram, rooms: &[Room]) -> BillOfMaterials {
    let t = Takeoff::new(program, rooms);
    let area = t.floor_area;

    let external_walls = (2.0 * program.lot_width + 2.0 * program.lot_depth) * WALL_HEIGHT;
    let wall_area = external_walls + area * INTERNAL_WALL_RATIO;
    let roof_area = area * ROOF_FACTOR;

    let lines = vec![
        Line {
            id: "concrete",
            category: "Structure",
            name: "Ready-mix concrete C25",
            unit: "m³",
            quantity: round_to(area * CONCRETE_PER_M2, 2),
            unit_price: 380.0,
            specification: "Pumped, with plasticizer",
        },
        Line {
            id: "steel",
            category: "Structure",
            name: "Rebar CA-50",
            unit: "kg",
            quantity: round_to(area * STEEL_KG_PER_M2, 0),
            unit_price: 6.5,
            specification: "6 mm to 20 mm bars, cut and bent",
        },
        Line {
            id: "blocks",
            category: "Masonry",
            name: "Ceramic block 14x19x39 cm",
            unit: "pcs",
            quantity: (wall_area * BLOCKS_PER_M2).ceil(),
            unit_price: 1.85,
            specification: "Horizontal cores, class 2.5 MPa",
        },
        Line {
            id: "roof_tiles",
            category: "Roofing",
            name: "Ceramic roof tiles",
            unit: "m²",
            quantity: round_to(roof_area, 2),
            unit_price: 28.5,
            specification: "Natural color, first grade",
        },
        Line {
            id: "roof_structure",
            category: "Roofing",
            name: "Roof framing timber",
            unit: "m³",
            quantity: round_to(roof_area * ROOF_TIMBER_PER_M2, 2),
            unit_price: 2800.0,
            specification: "Treated timber, assorted sections",
        },
        Line {
            id: "floor_tiles",
            category: "Finishes",
            name: "Porcelain floor tile 60x60 cm",
            unit: "m²",
            quantity: round_to(area, 2),
            unit_price: 45.8,
            specification: "Rectified, PEI 4, anti-slip",
        },
        Line {
            id: "wall_tiles",
            category: "Finishes",
            name: "Ceramic wall tile 30x60 cm",
            unit: "m²",
            quantity: round_to(t.bathrooms * TILE_PER_BATHROOM + TILE_KITCHEN, 2),
            unit_price: 38.9,
            specification: "Glossy, first grade",
        },
        Line {
            id: "paint",
            category: "Painting",
            name: "Premium acrylic paint",
            unit: "l",
            quantity: (wall_area * PAINT_COATS / PAINT_COVERAGE).ceil(),
            unit_price: 85.0,
            specification: "Washable, off-white",
        },
        Line {
            id: "windows",
            category: "Frames",
            name: "Aluminium windows",
            unit: "pcs",
            quantity: t.windows,
            unit_price: 420.0,
            specification: "Tempered glass, hardware included",
        },
        Line {
            id: "doors",
            category: "Frames",
            name: "Timber doors",
            unit: "pcs",
            quantity: t.doors,
            unit_price: 320.0,
            specification: "Solid wood, frame and hardware",
        },
        Line {
            id: "electrical",
            category: "Installations",
            name: "Electrical materials",
            unit: "point",
            quantity: (area * ELECTRICAL_POINTS_PER_M2).ceil(),
            unit_price: 85.0,
            specification: "Wiring, breakers, sockets, switches",
        },
        Line {
            id: "plumbing",
            category: "Installations",
            name: "Plumbing materials",
            unit: "point",
            quantity: t.bathrooms * PLUMBING_PER_BATHROOM + PLUMBING_KITCHEN_SERVICE,
            unit_price: 120.0,
            specification: "PVC pipes, fittings, valves, basic fixtures",
        },
    ];

    let items: Vec<MaterialItem> = lines.into_iter().map(MaterialItem::from).collect();
    let total_cost = round_to(items.iter().map(|i| i.total_price).sum(), 2);
    BillOfMaterials { items, total_cost }
}
