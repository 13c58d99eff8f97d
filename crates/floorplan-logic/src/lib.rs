//! Pure floor-plan logic for a single-family residence.
//!
//! This crate contains the layout constraint engine and the small amount of
//! derived data built on top of it. Functions take plain data and return
//! results, with no I/O, so the same code serves the web front end, native
//! CLI tools, and the headless harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`generator`] | Naive initial room list from wizard inputs |
//! | [`geometry`] | Grid snapping and nearest-value lookup |
//! | [`materials`] | Rough bill of materials from the adjusted layout |
//! | [`passes`] | Rule passes (dimensions, openings, clearance, placement) |
//! | [`pipeline`] | Runs the passes in order, validates input, normalizes output |
//! | [`room`] | Room, opening, and building parameter data model |
//! | [`spec_sheet`] | Derived per-room specification sheet |
//! | [`specifications`] | Rulebook defaults and caller overrides |
//!
//! ```
//! use floorplan_logic::generator::{HouseProgram, LayoutGenerator, NaiveLayoutGenerator};
//! use floorplan_logic::pipeline::enforce_constraints;
//! use floorplan_logic::specifications::merge_specifications;
//!
//! let program = HouseProgram::default();
//! let rooms = NaiveLayoutGenerator.generate(&program);
//! let specs = merge_specifications(None);
//! let result = enforce_constraints(&rooms, &program.building_parameters(), &specs).unwrap();
//! assert_eq!(result.rooms.len(), rooms.len());
//! ```

pub mod generator;
pub mod geometry;
pub mod materials;
pub mod passes;
pub mod pipeline;
pub mod room;
pub mod spec_sheet;
pub mod specifications;
