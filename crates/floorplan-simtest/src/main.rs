//! Floor-plan Headless Harness
//!
//! Runs the constraint engine end to end without a front end: rulebook
//! sanity, geometry helpers, the reference scenarios, a seeded sweep of
//! random house programs, and the derived spec sheet and materials.
//!
//! Usage:
//!   cargo run -p floorplan-simtest
//!   cargo run -p floorplan-simtest -- --verbose
//!   cargo run -p floorplan-simtest -- --json path/to/house.json

use floorplan_logic::generator::{validate_program, HouseProgram, LayoutGenerator, NaiveLayoutGenerator};
use floorplan_logic::geometry::{is_on_grid, nearest, snap, snap_up, EPS, FINE_GRID, SNAP_GRID};
use floorplan_logic::materials::estimate_materials;
use floorplan_logic::passes::{bedroom_occupancy, PASSES};
use floorplan_logic::pipeline::{enforce_constraints, PipelineResult, MIN_COORDINATE, MIN_SIDE};
use floorplan_logic::room::{BuildingParameters, Door, Room, RoomType, Window};
use floorplan_logic::spec_sheet::build_spec_sheet;
use floorplan_logic::specifications::{merge_specifications, SpecificationOverrides, SpecificationSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;

// ── Scenario file (same JSON the wizard posts) ──────────────────────────
const SCENARIO_JSON: &str = include_str!("../../../data/sample_house.json");

const SWEEP_SEED: u64 = 42;
const SWEEP_PROGRAMS: usize = 200;

#[derive(Debug, Deserialize)]
struct Scenario {
    program: HouseProgram,
    #[serde(default)]
    overrides: Option<SpecificationOverrides>,
}

// ── Logging ─────────────────────────────────────────────────────────────

fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Engine diagnostics go through the `log` facade; the subscriber's
/// `tracing-log` bridge picks them up and writes them to stderr.
fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level(verbose))
        .try_init();
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let json = args.iter().any(|a| a == "--json");
    let path = args.iter().find(|a| !a.starts_with("--"));
    init_logging(verbose);
    println!("=== Floor-plan Constraint Harness ===\n");

    let mut results = Vec::new();

    // 1. Scenario file
    let scenario = load_scenario(path.map(String::as_str), &mut results);

    // 2. Rulebook
    results.extend(validate_rulebook(scenario.as_ref()));

    // 3. Geometry helpers
    results.extend(validate_geometry());

    // 4. Reference scenarios
    results.extend(validate_scenarios());

    // 5. Seeded program sweep
    results.extend(sweep_programs(verbose));

    // 6. Spec sheet & materials
    if let Some(scenario) = &scenario {
        results.extend(validate_deliverables(scenario, json));
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Scenario File ────────────────────────────────────────────────────

fn load_scenario(path: Option<&str>, results: &mut Vec<TestResult>) -> Option<Scenario> {
    println!("--- Scenario File ---");
    let source = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(s) => s,
            Err(e) => {
                results.push(check("scenario_read", false, format!("{}: {}", p, e)));
                return None;
            }
        },
        None => SCENARIO_JSON.to_string(),
    };

    let scenario: Scenario = match serde_json::from_str(&source) {
        Ok(s) => s,
        Err(e) => {
            results.push(check(
                "scenario_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return None;
        }
    };

    let errors = validate_program(&scenario.program);
    results.push(check(
        "scenario_program_valid",
        errors.is_empty(),
        if errors.is_empty() {
            format!(
                "{} m² on a {}x{} m lot, {} bedrooms, {} bathrooms",
                scenario.program.total_area,
                scenario.program.lot_width,
                scenario.program.lot_depth,
                scenario.program.bedrooms,
                scenario.program.bathrooms
            )
        } else {
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        },
    ));
    Some(scenario)
}

// ── 2. Rulebook ─────────────────────────────────────────────────────────

fn validate_rulebook(scenario: Option<&Scenario>) -> Vec<TestResult> {
    println!("--- Rulebook ---");
    let mut results = Vec::new();
    let d = SpecificationSet::default();

    let positive = [
        d.wall_external,
        d.wall_internal,
        d.min_bedroom_single_area,
        d.min_bedroom_single_width,
        d.min_living_area,
        d.min_kitchen_width,
        d.min_bathroom_area,
        d.bathroom_circle_diameter,
        d.door_bath,
        d.window_fraction_vent,
    ]
    .iter()
    .all(|v| *v > 0.0);
    results.push(check(
        "rulebook_positive",
        positive,
        "all default minimums are positive".into(),
    ));

    results.push(check(
        "rulebook_couple_exceeds_single",
        d.min_bedroom_couple_area >= d.min_bedroom_single_area
            && d.min_bedroom_couple_width >= d.min_bedroom_single_width,
        format!(
            "couple {}m²/{}m, single {}m²/{}m",
            d.min_bedroom_couple_area,
            d.min_bedroom_couple_width,
            d.min_bedroom_single_area,
            d.min_bedroom_single_width
        ),
    ));

    results.push(check(
        "rulebook_door_order",
        d.door_entrance >= d.door_room && d.door_room >= d.door_bath,
        format!(
            "entrance {} ≥ room {} ≥ bath {}",
            d.door_entrance, d.door_room, d.door_bath
        ),
    ));

    results.push(check(
        "rulebook_daylight_exceeds_vent",
        d.window_fraction_lighting >= d.window_fraction_vent,
        format!(
            "lighting {:.3}, ventilation {:.3}",
            d.window_fraction_lighting, d.window_fraction_vent
        ),
    ));

    results.push(check(
        "rulebook_accessible_circle",
        d.accessible_circle_diameter > d.bathroom_circle_diameter,
        format!(
            "{} m standard, {} m accessible",
            d.bathroom_circle_diameter, d.accessible_circle_diameter
        ),
    ));

    if let Some(overrides) = scenario.and_then(|s| s.overrides.as_ref()) {
        let merged = merge_specifications(Some(overrides));
        let applied = overrides
            .min_kitchen_width
            .map_or(true, |w| merged.min_kitchen_width == w);
        results.push(check(
            "rulebook_overrides_applied",
            applied && merged.min_living_width == d.min_living_width,
            format!("kitchen width {}", merged.min_kitchen_width),
        ));
    }

    results.push(check(
        "rulebook_pass_count",
        PASSES.len() == 10,
        PASSES.iter().map(|p| p.name).collect::<Vec<_>>().join(" → "),
    ));

    results
}

// ── 3. Geometry ─────────────────────────────────────────────────────────

fn validate_geometry() -> Vec<TestResult> {
    println!("--- Geometry ---");
    let mut results = Vec::new();

    let snaps = [(2.22, 2.2), (2.23, 2.25), (2.727, 2.75), (0.0, 0.0)];
    let bad: Vec<_> = snaps
        .iter()
        .filter(|(v, want)| (snap(*v, SNAP_GRID) - want).abs() > EPS)
        .collect();
    results.push(check(
        "geometry_snap",
        bad.is_empty(),
        format!("{}/{} snaps to the 0.05 m grid", snaps.len() - bad.len(), snaps.len()),
    ));

    let up = snap_up(2.727, SNAP_GRID);
    let exact = snap_up(2.2, SNAP_GRID);
    results.push(check(
        "geometry_snap_up",
        (up - 2.75).abs() < EPS && (exact - 2.2).abs() < EPS,
        format!("2.727 → {}, 2.2 → {}", up, exact),
    ));

    let tie = nearest(&[1.0, 2.0], 1.5);
    results.push(check(
        "geometry_nearest",
        tie == Some(1.0) && nearest(&[], 1.0).is_none(),
        format!("tie resolves to {:?}", tie),
    ));

    results
}

// ── 4. Reference Scenarios ──────────────────────────────────────────────

fn run_default(rooms: &[Room]) -> Option<PipelineResult> {
    enforce_constraints(
        rooms,
        &BuildingParameters::new(12.0, 20.0, 2),
        &SpecificationSet::default(),
    )
    .ok()
}

fn validate_scenarios() -> Vec<TestResult> {
    println!("--- Reference Scenarios ---");
    let mut results = Vec::new();

    // Narrow single bedroom
    let bedroom = Room::new("q", "Bedroom", RoomType::Bedroom, 2.0, 3.0)
        .at(1.0, 1.4)
        .with_door(Door::new(0.8))
        .with_window(Window::new(1.2, 1.0));
    match run_default(&[bedroom]) {
        Some(r) => {
            let room = &r.rooms[0];
            results.push(check(
                "scenario_single_bedroom",
                (room.width - 2.2).abs() < 1e-6
                    && room.area() + EPS >= 6.0
                    && r.warnings.len() == 1,
                format!(
                    "{:.2}x{:.2} m, {} warnings",
                    room.width,
                    room.height,
                    r.warnings.len()
                ),
            ));
        }
        None => results.push(check("scenario_single_bedroom", false, "input rejected".into())),
    }

    // Small bathroom
    let bath = Room::new("b", "Bath", RoomType::Bathroom, 0.8, 0.8).with_door(Door::new(0.6));
    match run_default(&[bath]) {
        Some(r) => {
            let room = &r.rooms[0];
            results.push(check(
                "scenario_small_bathroom",
                room.width + EPS >= 0.9 && room.height + EPS >= 0.9 && r.conflicts.is_none(),
                format!("{:.2}x{:.2} m, {} conflicts", room.width, room.height, r.conflict_count()),
            ));
        }
        None => results.push(check("scenario_small_bathroom", false, "input rejected".into())),
    }

    // Kitchen far from the living room
    let rooms = vec![
        Room::new("l", "Living Room", RoomType::Living, 4.0, 3.0).with_door(Door::entrance(0.9)),
        Room::new("k", "Kitchen", RoomType::Kitchen, 2.0, 3.0)
            .at(9.0, 9.0)
            .with_door(Door::new(0.8)),
    ];
    match run_default(&rooms) {
        Some(r) => {
            let (living, kitchen) = (&r.rooms[0], &r.rooms[1]);
            let expected = living.x + living.width + 0.2;
            results.push(check(
                "scenario_kitchen_adjacency",
                (kitchen.x - expected).abs() < 1e-6 && (kitchen.y - living.y).abs() < 1e-6,
                format!("kitchen at ({:.2}, {:.2}), expected x {:.2}", kitchen.x, kitchen.y, expected),
            ));
        }
        None => results.push(check("scenario_kitchen_adjacency", false, "input rejected".into())),
    }

    // Unsatisfiable clearance
    let corridor = Room::new("c", "Corridor Bath", RoomType::Bathroom, 7.0, 0.5);
    match run_default(&[corridor]) {
        Some(r) => results.push(check(
            "scenario_clearance_conflict",
            r.conflict_count() == 1,
            format!("{} conflicts", r.conflict_count()),
        )),
        None => results.push(check("scenario_clearance_conflict", false, "input rejected".into())),
    }

    // Determinism
    let program = HouseProgram::default();
    let rooms = NaiveLayoutGenerator.generate(&program);
    let params = program.building_parameters();
    let specs = SpecificationSet::default();
    let a = enforce_constraints(&rooms, &params, &specs)
        .ok()
        .and_then(|r| serde_json::to_string(&r).ok());
    let b = enforce_constraints(&rooms, &params, &specs)
        .ok()
        .and_then(|r| serde_json::to_string(&r).ok());
    results.push(check(
        "scenario_deterministic",
        a.is_some() && a == b,
        "two runs serialize identically".into(),
    ));

    // Second run over the first run's output adds no glazing
    let rerun = enforce_constraints(&rooms, &params, &specs)
        .and_then(|first| enforce_constraints(&first.rooms, &params, &specs));
    match rerun {
        Ok(second) => {
            let added = second
                .warnings
                .iter()
                .filter(|w| w.starts_with("Added window"))
                .count();
            results.push(check(
                "scenario_fixed_point",
                added == 0,
                format!("{} windows added on the second run", added),
            ));
        }
        Err(e) => results.push(check("scenario_fixed_point", false, e.to_string())),
    }

    // Invalid input
    let zero = Room::new("z", "Zero", RoomType::Other, 0.0, 2.0);
    let rejected = enforce_constraints(&[zero], &params, &specs);
    results.push(check(
        "scenario_invalid_rejected",
        rejected.is_err(),
        match rejected {
            Err(e) => e.to_string(),
            Ok(_) => "zero-width room accepted".into(),
        },
    ));

    results
}

// ── 5. Program Sweep ────────────────────────────────────────────────────

fn random_program(rng: &mut StdRng) -> HouseProgram {
    let lot_width = rng.gen_range(16..=40) as f64 * 0.5;
    let lot_depth = rng.gen_range(30..=80) as f64 * 0.5;
    let bedrooms = rng.gen_range(1..=6);
    let bathrooms = rng.gen_range(1..=4);
    HouseProgram {
        total_area: (rng.gen_range(0.3..0.7) * lot_width * lot_depth).round(),
        lot_width,
        lot_depth,
        bedrooms,
        bathrooms,
        has_garage: rng.gen_bool(0.5),
        has_balcony: rng.gen_bool(0.5),
        accessible: rng.gen_bool(0.2),
        ..Default::default()
    }
}

/// Output invariants for one run; returns a description of each violation.
fn invariant_violations(result: &PipelineResult, specs: &SpecificationSet, accessible: bool) -> Vec<String> {
    let mut problems = Vec::new();
    let conflicts = result.conflicts.clone().unwrap_or_default();
    let diameter = specs.turning_diameter(accessible);

    for r in &result.rooms {
        if r.width < MIN_SIDE || r.height < MIN_SIDE || r.x < MIN_COORDINATE || r.y < MIN_COORDINATE {
            problems.push(format!("{} below floors", r.id));
        }
        if ![r.x, r.y, r.width, r.height]
            .iter()
            .all(|v| is_on_grid(*v, FINE_GRID, 1e-6))
        {
            problems.push(format!("{} off grid", r.id));
        }
        match r.room_type {
            RoomType::Bedroom => {
                let (min_area, min_width) = specs.bedroom_minimums(bedroom_occupancy(r, specs));
                if r.area() + EPS < min_area || r.width + EPS < min_width {
                    problems.push(format!("{} below bedroom minimums", r.id));
                }
            }
            RoomType::Bathroom => {
                let named = format!("\"{}\"", r.name);
                let excused = conflicts.iter().any(|c| c.contains(&named));
                if !excused && (r.width + EPS < diameter || r.height + EPS < diameter) {
                    problems.push(format!("{} misses the turning circle", r.id));
                }
            }
            _ => {}
        }
        for door in &r.doors {
            if door.width + EPS < specs.door_min_for(r.room_type, door.entrance) {
                problems.push(format!("{} has a narrow door", r.id));
            }
        }
    }
    problems
}

fn sweep_programs(verbose: bool) -> Vec<TestResult> {
    println!("--- Program Sweep ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(SWEEP_SEED);
    let specs = SpecificationSet::default();

    let mut runs = 0;
    let mut rejected = 0;
    let mut warnings = 0;
    let mut conflicts = 0;
    let mut violations = Vec::new();

    for i in 0..SWEEP_PROGRAMS {
        let program = random_program(&mut rng);
        if !validate_program(&program).is_empty() {
            continue;
        }
        let rooms = NaiveLayoutGenerator.generate(&program);
        match enforce_constraints(&rooms, &program.building_parameters(), &specs) {
            Ok(result) => {
                runs += 1;
                warnings += result.warnings.len();
                conflicts += result.conflict_count();
                for v in invariant_violations(&result, &specs, program.accessible) {
                    violations.push(format!("program {}: {}", i, v));
                }
            }
            Err(e) => {
                rejected += 1;
                violations.push(format!("program {}: {}", i, e));
            }
        }
    }

    if verbose {
        println!(
            "  {} runs, {} warnings, {} conflicts",
            runs, warnings, conflicts
        );
    }

    results.push(check(
        "sweep_ran",
        runs > SWEEP_PROGRAMS / 2,
        format!("{} of {} programs run (seed {})", runs, SWEEP_PROGRAMS, SWEEP_SEED),
    ));
    results.push(check(
        "sweep_no_rejections",
        rejected == 0,
        format!("{} generated layouts rejected", rejected),
    ));
    results.push(check(
        "sweep_invariants",
        violations.is_empty(),
        if violations.is_empty() {
            format!("all invariants hold across {} runs", runs)
        } else {
            format!(
                "{} violations, first: {}",
                violations.len(),
                violations.first().map(String::as_str).unwrap_or_default()
            )
        },
    ));

    results
}

// ── 6. Spec Sheet & Materials ───────────────────────────────────────────

fn validate_deliverables(scenario: &Scenario, json: bool) -> Vec<TestResult> {
    println!("--- Spec Sheet & Materials ---");
    let mut results = Vec::new();

    let specs = merge_specifications(scenario.overrides.as_ref());
    let params = scenario.program.building_parameters();
    let rooms = NaiveLayoutGenerator.generate(&scenario.program);
    let result = match enforce_constraints(&rooms, &params, &specs) {
        Ok(r) => r,
        Err(e) => {
            results.push(check("deliverables_pipeline", false, e.to_string()));
            return results;
        }
    };

    let sheet = build_spec_sheet(&result, &params, &specs);
    results.push(check(
        "spec_sheet_rows",
        sheet.rooms.len() == result.rooms.len(),
        format!("{} rooms, built area {} m²", sheet.rooms.len(), sheet.built_area),
    ));
    results.push(check(
        "spec_sheet_fits_lot",
        sheet.lot_occupancy > 0.0 && sheet.lot_occupancy <= 1.0,
        format!("lot occupancy {:.1}%", sheet.lot_occupancy * 100.0),
    ));

    let bom = estimate_materials(&scenario.program, &result.rooms);
    let sum: f64 = bom.items.iter().map(|i| i.total_price).sum();
    results.push(check(
        "materials_total",
        bom.total_cost > 0.0 && (bom.total_cost - sum).abs() < 0.01,
        format!("{} items, total {:.2}", bom.items.len(), bom.total_cost),
    ));
    let windows: usize = result.rooms.iter().map(|r| r.windows.len()).sum();
    results.push(check(
        "materials_window_count",
        bom.item("windows").map(|i| i.quantity) == Some(windows as f64),
        format!("{} windows in the adjusted layout", windows),
    ));

    if json {
        let report = serde_json::json!({
            "result": result,
            "spec_sheet": sheet,
            "materials": bom,
        });
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => results.push(check("deliverables_json", false, e.to_string())),
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_selects_log_level() {
        assert_eq!(log_level(true), LevelFilter::DEBUG);
        assert_eq!(log_level(false), LevelFilter::WARN);
    }

    #[test]
    fn embedded_scenario_parses() {
        let scenario: Scenario = serde_json::from_str(SCENARIO_JSON).unwrap();
        assert!(validate_program(&scenario.program).is_empty());
        assert!(scenario.overrides.is_some());
    }
}
