// src/measures/time_headway.rs

use crate::measures::{
    headway_along_lane, log_result, longitudinal_component, resolve_pair_states, round_to,
    CriticalityMeasure, EvalContext,
};
use crate::types::{ActorId, MeasureName, Monotone, TimeStep};
use tracing::debug;

/// THW — time headway: the time the ego needs to reach the other actor's
/// current longitudinal position. Decreasing is worse. A stationary ego or a
/// trailing other actor yields the +inf "never reached" sentinel.
pub struct Thw;

impl CriticalityMeasure for Thw {
    fn name(&self) -> MeasureName {
        MeasureName::Thw
    }

    fn monotone(&self) -> Monotone {
        Monotone::Neg
    }

    fn compute(
        &self,
        ctx: &EvalContext<'_>,
        other_id: ActorId,
        time_step: TimeStep,
        verbose: bool,
    ) -> f64 {
        let Some((ego, _other)) = resolve_pair_states(ctx, other_id, time_step, self.name(), verbose)
        else {
            return f64::NAN;
        };

        let x_rel = match headway_along_lane(ctx, other_id, time_step) {
            Ok(d) => d,
            Err(e) => {
                debug!("{}: {e}, returning NaN", self.name());
                return f64::NAN;
            }
        };

        let Some(lane) = ctx
            .scenario
            .lanelet_at_position(ego.position)
            .and_then(|id| ctx.scenario.lanelet_by_id(id))
        else {
            return f64::NAN;
        };
        let ego_heading = lane
            .lane_projection(ego.position)
            .longitudinal_orientation
            .unwrap_or_default();
        let v_ego_long = longitudinal_component(ego.velocity, ego_heading);

        let value = if x_rel <= 0.0 || v_ego_long <= f64::EPSILON {
            f64::INFINITY
        } else {
            round_to(x_rel / v_ego_long, ctx.config.rounding.precision)
        };
        log_result(self.name(), value, verbose);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanelet::Lanelet;
    use crate::scenario::{InMemoryScenario, Trajectory};
    use crate::types::{Config, KinematicState, Vec2};

    fn scenario(ego_v: f64) -> InMemoryScenario {
        let mut s = InMemoryScenario::new();
        s.add_lanelet(Lanelet::straight(
            1,
            Vec2::new(0.0, 0.0),
            Vec2::new(200.0, 0.0),
            3.5,
        ));
        s.add_actor(
            1,
            Trajectory::new(
                0,
                vec![KinematicState::new(
                    Vec2::new(0.0, 0.0),
                    Vec2::new(ego_v, 0.0),
                    Vec2::new(0.0, 0.0),
                )],
            ),
        );
        s.add_actor(
            2,
            Trajectory::new(
                0,
                vec![KinematicState::new(
                    Vec2::new(30.0, 0.0),
                    Vec2::new(5.0, 0.0),
                    Vec2::new(0.0, 0.0),
                )],
            ),
        );
        s
    }

    #[test]
    fn test_thw_basic() {
        let s = scenario(10.0);
        let config = Config::default();
        let ctx = EvalContext {
            scenario: &s,
            config: &config,
            ego_id: 1,
        };
        // 30 m at 10 m/s → 3 s.
        assert!((Thw.compute(&ctx, 2, 0, false) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_thw_stationary_ego_is_infinite() {
        let s = scenario(0.0);
        let config = Config::default();
        let ctx = EvalContext {
            scenario: &s,
            config: &config,
            ego_id: 1,
        };
        assert_eq!(Thw.compute(&ctx, 2, 0, false), f64::INFINITY);
    }

    #[test]
    fn test_thw_trailing_other_is_infinite() {
        let s = scenario(10.0);
        let config = Config::default();
        // Evaluate from the lead vehicle's perspective.
        let ctx = EvalContext {
            scenario: &s,
            config: &config,
            ego_id: 2,
        };
        assert_eq!(Thw.compute(&ctx, 1, 0, false), f64::INFINITY);
    }
}
