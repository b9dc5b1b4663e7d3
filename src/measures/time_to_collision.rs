// src/measures/time_to_collision.rs

use crate::measures::{
    headway_along_lane, log_result, longitudinal_component, resolve_pair_states, round_to,
    CriticalityMeasure, EvalContext,
};
use crate::types::{ActorId, MeasureName, Monotone, TimeStep};
use tracing::debug;

/// TTC — time to collision: gap along the shared lane divided by the
/// longitudinal closing speed. Decreasing is worse. A non-closing or trailing
/// other actor yields the +inf "no collision course" sentinel.
pub struct Ttc;

impl CriticalityMeasure for Ttc {
    fn name(&self) -> MeasureName {
        MeasureName::Ttc
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
        let Some((ego, other)) = resolve_pair_states(ctx, other_id, time_step, self.name(), verbose)
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

        // Headway succeeded, so both projections onto the ego lane exist.
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
        let other_heading = lane
            .lane_projection(other.position)
            .longitudinal_orientation
            .unwrap_or_default();

        let v_closing = longitudinal_component(ego.velocity, ego_heading)
            - longitudinal_component(other.velocity, other_heading);

        let value = if x_rel <= 0.0 || v_closing <= f64::EPSILON {
            f64::INFINITY
        } else {
            round_to(x_rel / v_closing, ctx.config.rounding.precision)
        };
        log_result(self.name(), value, verbose);
        value
    }
}
