//! CLI command implementations.

use std::path::Path;

use tessera_bench::metrics::BenchmarkMetrics;
use tessera_bench::runner::BenchmarkRunner;
use tessera_bench::scenarios::{Scenario, ScenarioKind};
use tessera_debug::snapshot::StateSnapshot;
use tessera_mesh::BodyMesh;
use tessera_solver::{BodyDesc, Scene, SolverConfig, SolverStrategy};
use tessera_telemetry::{EventBus, TracingSink};
use tessera_types::{SkipCounts, SkipReason};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn lookup_scenario(name: &str) -> Result<ScenarioKind, Box<dyn std::error::Error>> {
    ScenarioKind::from_name(name).ok_or_else(|| {
        let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
        format!("Unknown scenario: '{name}'. Available: {}", available.join(", ")).into()
    })
}

fn load_config(path: &str) -> Result<SolverConfig, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let config: SolverConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

fn print_skips(skipped: &SkipCounts) {
    for reason in SkipReason::ALL {
        let count = skipped.get(reason);
        if count > 0 {
            println!("    {:<26} {count}", reason.label());
        }
    }
}

/// Run one scenario, optionally with a custom config and step count.
pub fn simulate(
    scenario_name: &str,
    config_path: Option<&str>,
    steps: Option<u32>,
    snapshot_path: Option<&str>,
) -> CliResult {
    println!("Tessera Simulation");
    println!("──────────────────");

    let mut scenario = Scenario::from_kind(lookup_scenario(scenario_name)?);
    if let Some(path) = config_path {
        println!("Config:    {path}");
        scenario = scenario.with_config(load_config(path)?);
    }
    let steps = steps.unwrap_or(scenario.timesteps);

    let mut scene = scenario.build_scene()?;
    let mut solver = scenario.solver()?;

    println!("Scenario:  {}", scenario.kind.name());
    println!(
        "Bodies:    {} ({} particles, {} edges, {} tets)",
        scene.body_count(),
        scene.particle_count(),
        scene.edges.len(),
        scene.tetrahedra.len(),
    );
    println!("Substeps:  {}", scenario.config.substeps);
    println!("Steps:     {steps} (dt = {:.4}s)", scenario.dt);
    println!();

    let mut skipped = SkipCounts::default();
    let mut collisions = 0_u32;
    let mut max_penetration = 0.0_f32;
    let mut wall_time = 0.0_f64;
    let report_every = (steps / 10).max(1);

    for t in 0..steps {
        let report = solver.step(&mut scene, scenario.dt)?;
        skipped.merge(report.skipped);
        collisions += report.collisions;
        max_penetration = max_penetration.max(report.max_penetration);
        wall_time += report.wall_time;

        if (t + 1) % report_every == 0 || t + 1 == steps {
            println!(
                "  step {:>5}  KE {:.4e}  min y {:>8.4}  collisions {}",
                t + 1,
                scene.state.kinetic_energy(),
                scene.state.min_height().unwrap_or(0.0),
                report.collisions,
            );
        }
    }

    println!();
    println!("Wall time:       {:.3}s", wall_time);
    println!("Collisions:      {collisions}");
    println!("Max penetration: {:.4}m", max_penetration);
    println!("Edge error:      {:.3e}", scene.max_edge_error());
    println!("Volume error:    {:.3e}", scene.max_volume_error());
    println!("Skipped:         {}", skipped.total());
    print_skips(&skipped);

    if let Some(path) = snapshot_path {
        let sim_time = steps as f64 * scenario.dt as f64;
        StateSnapshot::capture(steps, sim_time, &scene).save(Path::new(path))?;
        println!();
        println!("Snapshot written to: {path}");
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, output_path: Option<&str>) -> CliResult {
    println!("Tessera Benchmark Suite");
    println!("═══════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![lookup_scenario(scenario_name)?]
    };

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new(tracing::Level::DEBUG)));

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);
        let mut solver = scenario.solver()?;

        println!(
            "Running: {} ({} bodies, {} steps, {})",
            kind.name(),
            scenario.bodies.len(),
            scenario.timesteps,
            solver.name(),
        );

        let metrics = BenchmarkRunner::run(&scenario, &mut solver, &mut bus)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Min height:    {:.4}m", metrics.final_min_height);
        println!("  Collisions:    {}", metrics.total_collisions);
        println!("  Skipped:       {}", metrics.total_skipped);
        println!();

        all_metrics.push(metrics);
    }
    bus.finish();

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Inspect a state snapshot.
pub fn inspect(path: &str) -> CliResult {
    println!("Tessera Snapshot Inspector");
    println!("─────────────────────────");
    println!();

    let snapshot = StateSnapshot::load(Path::new(path))?;

    println!("Timestep:     {}", snapshot.timestep);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Bodies:       {}", snapshot.body_vertex_counts.len());
    println!("Particles:    {}", snapshot.particle_count());
    println!(
        "Hit flags:    {}",
        snapshot.hits.iter().filter(|&&hit| hit).count()
    );

    let n = snapshot.particle_count();
    if n > 0 {
        let (min_y, max_y) = (0..n)
            .map(|i| snapshot.position(i).y)
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
        let max_speed = (0..n)
            .map(|i| snapshot.velocity(i).length())
            .fold(0.0_f32, f32::max);
        println!("Y range:      [{:.4}, {:.4}]", min_y, max_y);
        println!("Max speed:    {:.4}m/s", max_speed);
    }

    Ok(())
}

/// Validate a solver config or a body description.
///
/// `.json` files may hold either a list of body descriptions, which are
/// built into a scene, or a single mesh.
pub fn validate(path: &str) -> CliResult {
    println!("Tessera Validator");
    println!("─────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        match load_config(path) {
            Ok(config) => println!("✅ Config is valid ({} substeps).", config.substeps),
            Err(e) => println!("❌ Config validation failed: {e}"),
        }
    } else if path.ends_with(".json") {
        let content = std::fs::read_to_string(path)?;
        if let Ok(descs) = serde_json::from_str::<Vec<BodyDesc>>(&content) {
            println!("Validating bodies: {path}");
            match Scene::build(descs) {
                Ok(scene) => println!(
                    "✅ Scene is valid ({} bodies, {} particles, {} edges, {} tets).",
                    scene.body_count(),
                    scene.particle_count(),
                    scene.edges.len(),
                    scene.tetrahedra.len(),
                ),
                Err(e) => println!("❌ Scene validation failed: {e}"),
            }
        } else {
            println!("Validating mesh: {path}");
            let mesh: BodyMesh = serde_json::from_str(&content)?;
            match mesh.validate() {
                Ok(()) => println!(
                    "✅ Mesh is valid ({} verts, {} tris, {} tets).",
                    mesh.vertex_count(),
                    mesh.triangle_count(),
                    mesh.tetrahedron_count(),
                ),
                Err(e) => println!("❌ Mesh validation failed: {e}"),
            }
        }
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (bodies or mesh).");
    }

    Ok(())
}
