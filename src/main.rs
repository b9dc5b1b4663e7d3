// src/main.rs
//
// Demo run: a following scenario on a straight lanelet, every built-in
// measure evaluated over a short time window, results logged per step.
// Scenario/map loading and plotting live outside this crate; this binary
// stands in for those collaborators with a synthetic scenario.

use anyhow::Result;
use criticality_engine::{
    Config, CriticalityPipeline, EvalContext, InMemoryScenario, KinematicState, Lanelet,
    Trajectory, Vec2,
};
use tracing::info;

const EGO_ID: u32 = 1;
const OTHER_ID: u32 = 2;

fn main() -> Result<()> {
    // Config errors are fatal at setup; only a missing file falls back to
    // defaults for the demo.
    let config = Config::load_or_default("config.yaml")?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("criticality_engine={}", config.logging.level))
        .init();

    info!("criticality measure engine demo");
    info!(
        "acceleration mode: {:?}, rounding precision: {}",
        config.acceleration.mode, config.rounding.precision
    );

    let scenario = build_following_scenario();
    let ctx = EvalContext {
        scenario: &scenario,
        config: &config,
        ego_id: EGO_ID,
    };

    let pipeline = CriticalityPipeline::with_all_measures();
    let run = pipeline.run(&ctx, OTHER_ID, 0, 29, true);

    let (start, end) = run.time_bounds();
    info!("results for steps {start}..={end}:");
    for (step, row) in &run.values {
        let line = row
            .iter()
            .map(|(name, value)| format!("{name}={value:.2}"))
            .collect::<Vec<_>>()
            .join("  ");
        info!("  t={step:>3}  {line}");
    }

    for measure in pipeline.measures() {
        info!(
            "{}: monotone {}",
            measure.name(),
            measure.monotone().as_str()
        );
    }

    Ok(())
}

/// Ego at 15 m/s closing on a lead vehicle rolling at 8 m/s, dt = 0.1 s.
fn build_following_scenario() -> InMemoryScenario {
    let dt = 0.1;
    let mut scenario = InMemoryScenario::new();
    scenario.add_lanelet(Lanelet::straight(
        1,
        Vec2::new(0.0, 0.0),
        Vec2::new(400.0, 0.0),
        3.5,
    ));

    let trajectory = |x0: f64, v: f64, steps: usize| {
        Trajectory::new(
            0,
            (0..steps)
                .map(|i| {
                    KinematicState::new(
                        Vec2::new(x0 + v * dt * i as f64, 0.0),
                        Vec2::new(v, 0.0),
                        Vec2::new(0.0, 0.0),
                    )
                })
                .collect(),
        )
    };

    scenario.add_actor(EGO_ID, trajectory(0.0, 15.0, 30));
    scenario.add_actor(OTHER_ID, trajectory(40.0, 8.0, 30));
    scenario
}
