// src/measures/stopping_distance.rs

use crate::measures::{
    headway_along_lane, log_result, longitudinal_component, resolve_pair_states, round_to,
    CriticalityMeasure, EvalContext,
};
use crate::types::{ActorId, MeasureName, Monotone, TimeStep};
use tracing::debug;

/// PSD — proportion of stopping distance: the available gap divided by the
/// minimum stopping distance `v²/(2·a_max)` under the configured maximum
/// deceleration. Values below 1 mean the ego cannot stop inside the gap.
/// Decreasing is worse; a trailing other actor or a (near-)stationary ego
/// yields the +inf "can always stop" sentinel.
pub struct Psd;

impl CriticalityMeasure for Psd {
    fn name(&self) -> MeasureName {
        MeasureName::Psd
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

        let min_stopping = v_ego_long.powi(2) / (2.0 * ctx.config.braking.max_deceleration);
        let value = if x_rel <= 0.0 || min_stopping <= f64::EPSILON {
            f64::INFINITY
        } else {
            round_to(x_rel / min_stopping, ctx.config.rounding.precision)
        };
        log_result(self.name(), value, verbose);
        value
    }
}
