// src/pipeline.rs
//
// Orchestrates a configured, ordered set of measures over a closed time-step
// window and collects the step-keyed criticality map consumed by downstream
// reporting/plotting. Individual measure failures (NaN) never abort a run.

use crate::measures::{ALongReq, CriticalityMeasure, EvalContext, Hw, Psd, Thw, Ttc};
use crate::types::{ActorId, CriticalityRun, TimeStep};
use std::collections::BTreeMap;
use tracing::{debug, info};

pub struct CriticalityPipeline {
    measures: Vec<Box<dyn CriticalityMeasure>>,
}

impl CriticalityPipeline {
    pub fn new(measures: Vec<Box<dyn CriticalityMeasure>>) -> Self {
        Self { measures }
    }

    /// Pipeline with every built-in measure, in canonical order.
    pub fn with_all_measures() -> Self {
        Self::new(vec![
            Box::new(Hw),
            Box::new(Thw),
            Box::new(Ttc),
            Box::new(ALongReq),
            Box::new(Psd),
        ])
    }

    pub fn measures(&self) -> &[Box<dyn CriticalityMeasure>] {
        &self.measures
    }

    /// Evaluate every measure for each step in `[start, end]`.
    pub fn run(
        &self,
        ctx: &EvalContext<'_>,
        other_id: ActorId,
        start: TimeStep,
        end: TimeStep,
        verbose: bool,
    ) -> CriticalityRun {
        info!(
            "evaluating {} measure(s) for ego {} vs actor {} over steps {start}..={end}",
            self.measures.len(),
            ctx.ego_id,
            other_id
        );

        let mut values = BTreeMap::new();
        for step in start..=end {
            let mut row = BTreeMap::new();
            for measure in &self.measures {
                let value = measure.compute(ctx, other_id, step, verbose);
                if value.is_nan() {
                    debug!("step {step}: {} unresolved (NaN)", measure.name());
                }
                row.insert(measure.name(), value);
            }
            values.insert(step, row);
        }

        CriticalityRun { start, end, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanelet::Lanelet;
    use crate::scenario::{InMemoryScenario, Trajectory};
    use crate::types::{Config, KinematicState, MeasureName, Vec2};

    /// Straight-lane scenario with constant-velocity trajectories, dt = 0.1 s.
    /// The other actor's trajectory is one step shorter to leave a hole.
    fn rolling_scenario() -> InMemoryScenario {
        let dt = 0.1;
        let mut s = InMemoryScenario::new();
        s.add_lanelet(Lanelet::straight(
            1,
            Vec2::new(0.0, 0.0),
            Vec2::new(500.0, 0.0),
            3.5,
        ));
        let make_states = |x0: f64, v: f64, n: usize| {
            (0..n)
                .map(|i| {
                    KinematicState::new(
                        Vec2::new(x0 + v * dt * i as f64, 0.0),
                        Vec2::new(v, 0.0),
                        Vec2::new(0.0, 0.0),
                    )
                })
                .collect::<Vec<_>>()
        };
        s.add_actor(1, Trajectory::new(0, make_states(0.0, 10.0, 5)));
        s.add_actor(2, Trajectory::new(0, make_states(20.0, 5.0, 4)));
        s
    }

    #[test]
    fn test_run_collects_every_step_and_measure() {
        let scenario = rolling_scenario();
        let config = Config::default();
        let ctx = EvalContext {
            scenario: &scenario,
            config: &config,
            ego_id: 1,
        };
        let pipeline = CriticalityPipeline::with_all_measures();
        let run = pipeline.run(&ctx, 2, 0, 3, false);

        assert_eq!(run.time_bounds(), (0, 3));
        assert_eq!(run.values.len(), 4);
        for row in run.values.values() {
            assert_eq!(row.len(), 5);
        }
        // Steps are ordered by time.
        let steps: Vec<_> = run.values.keys().copied().collect();
        assert_eq!(steps, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_missing_state_hole_yields_nan_without_aborting() {
        let scenario = rolling_scenario();
        let config = Config::default();
        let ctx = EvalContext {
            scenario: &scenario,
            config: &config,
            ego_id: 1,
        };
        let pipeline = CriticalityPipeline::with_all_measures();
        // Step 4 exists for ego but not for the other actor.
        let run = pipeline.run(&ctx, 2, 0, 4, false);

        assert_eq!(run.values.len(), 5);
        assert!(run.at(4, MeasureName::ALongReq).unwrap().is_nan());
        assert!(run.at(4, MeasureName::Hw).unwrap().is_nan());
        // Earlier steps still resolved.
        assert!(!run.at(0, MeasureName::ALongReq).unwrap().is_nan());
    }

    #[test]
    fn test_reference_values_at_first_step() {
        let scenario = rolling_scenario();
        let config = Config::default();
        let ctx = EvalContext {
            scenario: &scenario,
            config: &config,
            ego_id: 1,
        };
        let pipeline = CriticalityPipeline::with_all_measures();
        let run = pipeline.run(&ctx, 2, 0, 0, false);

        assert!((run.at(0, MeasureName::Hw).unwrap() - 20.0).abs() < 1e-9);
        assert!((run.at(0, MeasureName::Thw).unwrap() - 2.0).abs() < 1e-9);
        assert!((run.at(0, MeasureName::Ttc).unwrap() - 4.0).abs() < 1e-9);
        assert!((run.at(0, MeasureName::ALongReq).unwrap() - (-0.63)).abs() < 1e-9);
    }

    #[test]
    fn test_series_extraction() {
        let scenario = rolling_scenario();
        let config = Config::default();
        let ctx = EvalContext {
            scenario: &scenario,
            config: &config,
            ego_id: 1,
        };
        let run = CriticalityPipeline::with_all_measures().run(&ctx, 2, 0, 3, false);
        let series = run.series(MeasureName::Ttc);
        assert_eq!(series.len(), 4);
        assert_eq!(series[0].0, 0);
        // The gap shrinks, so TTC shrinks step over step.
        assert!(series[3].1 < series[0].1);
    }
}
