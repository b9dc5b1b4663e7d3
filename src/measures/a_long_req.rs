// src/measures/a_long_req.rs
//
// A_LONG_REQ: the longitudinal acceleration required to bring the relative
// velocity to zero before the gap closes (Jansson, "Collision Avoidance
// Theory", 2005, Sec. 5.3.5). Two kinematic models are selectable via
// configuration; they use different sign/structure conventions and do NOT
// agree numerically on the same inputs (see DESIGN.md) — both are kept
// verbatim pending domain-expert review.

use crate::measures::{
    headway_along_lane, log_result, longitudinal_component, resolve_pair_states, round_to,
    same_lane_non_closing, CriticalityMeasure, EvalContext, NON_CRITICAL,
};
use crate::types::{AccelerationMode, ActorId, MeasureName, Monotone, TimeStep};
use tracing::debug;

/// Required longitudinal acceleration measure. Decreasing is worse: harder
/// required braking (more negative) means a more critical situation; 0.0 is
/// the canonical "no braking needed" value, so the result is always ≤ 0.
pub struct ALongReq;

impl CriticalityMeasure for ALongReq {
    fn name(&self) -> MeasureName {
        MeasureName::ALongReq
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

        // Shared-lane non-closing rule: no braking needed at all.
        if same_lane_non_closing(ctx, &ego, &other) {
            log_result(self.name(), NON_CRITICAL, verbose);
            return NON_CRITICAL;
        }

        // The longitudinal frame comes from the lanelet under the ego.
        let Some(lane_id) = ctx.scenario.lanelet_at_position(ego.position) else {
            debug!("{}: ego actor {} is on no lanelet", self.name(), ctx.ego_id);
            return f64::NAN;
        };
        let Some(lane) = ctx.scenario.lanelet_by_id(lane_id) else {
            return f64::NAN;
        };

        let ego_proj = lane.lane_projection(ego.position);
        let other_proj = lane.lane_projection(other.position);
        let (Some(ego_heading), Some(other_heading)) = (
            ego_proj.longitudinal_orientation,
            other_proj.longitudinal_orientation,
        ) else {
            // Out of projection domain: the other actor is too far away to be
            // on a collision course along this lane.
            log_result(self.name(), NON_CRITICAL, verbose);
            return NON_CRITICAL;
        };

        let a_obj = longitudinal_component(other.acceleration, other_heading);
        let x_rel = match headway_along_lane(ctx, other_id, time_step) {
            Ok(d) => d,
            Err(e) => {
                debug!("{}: {e}, returning NaN", self.name());
                return f64::NAN;
            }
        };
        let v_ego_long = longitudinal_component(ego.velocity, ego_heading);
        let v_other_long = longitudinal_component(other.velocity, other_heading);

        let a_req = match ctx.config.acceleration.mode {
            AccelerationMode::ConstantAcceleration => {
                let v_rel = v_other_long - v_ego_long;
                debug!("{}: relative velocity is {v_rel}", self.name());
                let raw = a_obj - v_rel.powi(2) / (2.0 * x_rel);
                // f64::min would swallow a NaN from the degenerate
                // zero-gap/zero-closing case; keep the sentinel.
                if raw.is_nan() {
                    raw
                } else {
                    raw.min(0.0)
                }
            }
            AccelerationMode::PiecewiseConstant => {
                -v_ego_long.powi(2) / (2.0 * (x_rel - v_other_long.powi(2) / (2.0 * a_obj)))
            }
        };

        // Positive required acceleration means the other actor is non-closing.
        let value = if a_req > 0.0 {
            NON_CRITICAL
        } else {
            round_to(a_req, ctx.config.rounding.precision)
        };
        log_result(self.name(), value, verbose);
        value
    }
}
