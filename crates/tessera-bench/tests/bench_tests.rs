//! Integration tests for tessera-bench.

use tessera_bench::metrics::BenchmarkMetrics;
use tessera_bench::runner::BenchmarkRunner;
use tessera_bench::scenarios::{Scenario, ScenarioKind};
use tessera_telemetry::{EventBus, EventKind, VecSink};

fn sample_metrics(name: &str) -> BenchmarkMetrics {
    BenchmarkMetrics {
        scenario: name.into(),
        body_count: 2,
        particle_count: 16,
        edge_count: 36,
        tetrahedron_count: 10,
        timesteps: 100,
        total_wall_time: 1.5,
        avg_step_time: 0.015,
        min_step_time: 0.01,
        max_step_time: 0.02,
        final_kinetic_energy: 1e-5,
        max_displacement: 0.5,
        final_min_height: 0.0,
        total_collisions: 7,
        total_corrected_particles: 28,
        total_skipped: 0,
        final_edge_error: 1e-4,
        final_volume_error: 1e-5,
    }
}

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn falling_cube_setup() {
    let s = Scenario::falling_cube();
    assert_eq!(s.kind, ScenarioKind::FallingCube);
    assert_eq!(s.bodies.len(), 1);
    let scene = s.build_scene().unwrap();
    assert_eq!(scene.particle_count(), 8);
    assert_eq!(scene.edges.len(), 18);
}

#[test]
fn cube_stack_setup() {
    let s = Scenario::cube_stack();
    let scene = s.build_scene().unwrap();
    assert_eq!(scene.body_count(), 3);
    assert_eq!(scene.particle_count(), 24);
    assert_eq!(scene.tetrahedra.len(), 15);
}

#[test]
fn overlapping_cubes_start_in_contact() {
    let s = Scenario::overlapping_cubes();
    let scene = s.build_scene().unwrap();
    let hulls = scene.hulls();
    let pen = tessera_collision::penetration(&hulls[0], &hulls[1]).unwrap();
    assert!(pen.is_some(), "Scenario should start interpenetrating");
}

#[test]
fn all_scenarios() {
    assert_eq!(ScenarioKind::all().len(), 3);
    for &kind in ScenarioKind::all() {
        assert_eq!(ScenarioKind::from_name(kind.name()), Some(kind));
        assert_eq!(Scenario::from_kind(kind).kind, kind);
    }
    assert_eq!(ScenarioKind::from_name("hanging_sheet"), None);
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn run_falling_cube() {
    let mut scenario = Scenario::falling_cube();
    scenario.timesteps = 10; // Very short for testing
    let mut solver = scenario.solver().unwrap();
    let mut bus = EventBus::new();
    let metrics = BenchmarkRunner::run(&scenario, &mut solver, &mut bus).unwrap();

    assert_eq!(metrics.scenario, "falling_cube");
    assert_eq!(metrics.timesteps, 10);
    assert_eq!(metrics.particle_count, 8);
    assert!(metrics.max_displacement > 0.0); // Gravity should cause displacement
    assert!(metrics.final_min_height > 1.0);
    assert_eq!(metrics.total_collisions, 0);
}

#[test]
fn runner_emits_telemetry_per_step() {
    let mut scenario = Scenario::overlapping_cubes();
    scenario.timesteps = 4;
    let mut solver = scenario.solver().unwrap();
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));

    let metrics = BenchmarkRunner::run(&scenario, &mut solver, &mut bus).unwrap();
    let events = log.lock().unwrap();

    let begins = events.iter().filter(|e| matches!(e.kind, EventKind::StepBegin { .. })).count();
    let ends = events.iter().filter(|e| matches!(e.kind, EventKind::StepEnd { .. })).count();
    assert_eq!(begins, 4);
    assert_eq!(ends, 4);
    assert!(matches!(events[0].kind, EventKind::StepBegin { .. }));
    assert!(matches!(events.last().unwrap().kind, EventKind::StepEnd { .. }));

    let first_detection = events
        .iter()
        .find_map(|e| match e.kind {
            EventKind::CollisionDetection { collisions, .. } => Some(collisions),
            _ => None,
        })
        .unwrap();
    assert_eq!(first_detection, 1);
    assert!(metrics.total_collisions >= 1);
    assert!(metrics.total_corrected_particles > 0);
}

#[test]
fn run_all_scenarios_short() {
    let mut bus = EventBus::new();
    for &kind in ScenarioKind::all() {
        let mut scenario = Scenario::from_kind(kind);
        scenario.timesteps = 3;
        let mut solver = scenario.solver().unwrap();
        let metrics = BenchmarkRunner::run(&scenario, &mut solver, &mut bus).unwrap();
        assert_eq!(metrics.scenario, kind.name());
        assert!(metrics.total_wall_time >= 0.0);
        assert!(metrics.min_step_time <= metrics.max_step_time);
    }
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn metrics_csv_output() {
    let csv_row = sample_metrics("test").to_csv_row();
    assert!(csv_row.starts_with("test,2,16,36,10,100,"));
    assert_eq!(
        csv_row.split(',').count(),
        BenchmarkMetrics::to_csv_header().split(',').count()
    );
}

#[test]
fn metrics_csv_multi() {
    let csv = BenchmarkMetrics::to_csv(&[sample_metrics("a"), sample_metrics("b")]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3); // Header + 2 data rows
    assert!(lines[0].starts_with("scenario,"));
    assert!(lines[2].starts_with("b,"));
}

#[test]
fn metrics_json_round_trip() {
    let metrics = sample_metrics("test");
    let json = serde_json::to_string(&metrics).unwrap();
    let recovered: BenchmarkMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, metrics);
}
