//! Rule passes applied by the constraint pipeline.
//!
//! Each pass takes ownership of the room list, rewrites whatever its rule
//! requires, and hands back the rooms together with the warnings and
//! conflicts it produced. Passes never fail: a rule that cannot be met is
//! reported as a conflict and the room is left alone for that rule.
//!
//! Order matters, later passes assume the invariants of earlier ones:
//!   1. assign_wall_thickness   -- external/internal default thickness
//!   2. enforce_min_dimensions  -- per-type minimum area and width
//!   3. size_doors              -- door widths up to the type minimum
//!   4. size_windows            -- daylight, then ventilation glazing
//!   5. bathroom_clearance      -- turning circle, conflict past 6 m
//!   6. bedroom_free_wall       -- longer edge, conflict past 8 m
//!   7. apply_zoning            -- social / service / private placement
//!   8. kitchen_adjacency       -- kitchen next to the social area
//!   9. group_wet_areas         -- cluster plumbing rooms on x
//!  10. align_walls             -- merge nearby x-edges into shared axes

use crate::room::{BuildingParameters, Room};
use crate::specifications::SpecificationSet;

mod clearance;
mod dimensions;
mod openings;
mod placement;

pub use clearance::{bathroom_clearance, bedroom_free_wall, CLEARANCE_MAX_SIDE, FREE_WALL_MAX};
pub use dimensions::{
    assign_wall_thickness, bedroom_occupancy, enforce_min_dimensions, meets_minimums,
    COUPLE_MARKERS,
};
pub use openings::{size_doors, size_windows};
pub(crate) use openings::{has_required_glazing, top_up_glazing};
pub use placement::{align_walls, apply_zoning, group_wet_areas, kitchen_adjacency};

/// Read-only inputs shared by every pass in a run.
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
    pub specs: &'a SpecificationSet,
    pub params: &'a BuildingParameters,
}

/// Rooms after a pass, plus what the pass had to say about them.
#[derive(Debug, Clone, Default)]
pub struct PassOutcome {
    pub rooms: Vec<Room>,
    pub warnings: Vec<String>,
    pub conflicts: Vec<String>,
}

impl PassOutcome {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self {
            rooms,
            ..Self::default()
        }
    }

    pub(crate) fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    pub(crate) fn conflict(&mut self, message: String) {
        self.conflicts.push(message);
    }

    /// Run `pass` on these rooms and append its diagnostics after ours.
    pub fn then(self, pass: &RulePass, ctx: &PassContext) -> PassOutcome {
        let PassOutcome {
            rooms,
            mut warnings,
            mut conflicts,
        } = self;
        let next = (pass.run)(rooms, ctx);
        log::debug!(
            "pass {}: {} warnings, {} conflicts",
            pass.name,
            next.warnings.len(),
            next.conflicts.len()
        );
        warnings.extend(next.warnings);
        conflicts.extend(next.conflicts);
        PassOutcome {
            rooms: next.rooms,
            warnings,
            conflicts,
        }
    }
}

/// A named rule pass.
pub struct RulePass {
    pub name: &'static str,
    pub run: fn(Vec<Room>, &PassContext) -> PassOutcome,
}

/// All rule passes in execution order.
pub const PASSES: [RulePass; 10] = [
    RulePass {
        name: "wall_thickness",
        run: assign_wall_thickness,
    },
    RulePass {
        name: "min_dimensions",
        run: enforce_min_dimensions,
    },
    RulePass {
        name: "doors",
        run: size_doors,
    },
    RulePass {
        name: "windows",
        run: size_windows,
    },
    RulePass {
        name: "bathroom_clearance",
        run: bathroom_clearance,
    },
    RulePass {
        name: "bedroom_free_wall",
        run: bedroom_free_wall,
    },
    RulePass {
        name: "zoning",
        run: apply_zoning,
    },
    RulePass {
        name: "kitchen_adjacency",
        run: kitchen_adjacency,
    },
    RulePass {
        name: "wet_areas",
        run: group_wet_areas,
    },
    RulePass {
        name: "wall_alignment",
        run: align_walls,
    },
];
