// src/measures/headway.rs

use crate::error::{CriticalityError, CriticalityResult};
use crate::measures::{
    log_result, resolve_pair_states, round_to, CriticalityMeasure, EvalContext,
};
use crate::types::{ActorId, MeasureName, Monotone, TimeStep};
use tracing::debug;

/// Signed arc-length separation (other minus ego) along the lanelet under the
/// ego position — the Headway Computer.
///
/// Positive means the other actor is ahead of the ego in driving direction.
/// Fails with `NoCommonLane` when the ego is on no lanelet or either actor
/// cannot be projected onto the ego's lanelet.
pub fn headway_along_lane(
    ctx: &EvalContext<'_>,
    other_id: ActorId,
    time_step: TimeStep,
) -> CriticalityResult<f64> {
    let ego = ctx.scenario.state_at(ctx.ego_id, time_step)?;
    let other = ctx.scenario.state_at(other_id, time_step)?;

    let no_common_lane = || CriticalityError::NoCommonLane {
        ego_id: ctx.ego_id,
        other_id,
        time_step,
    };

    let lane_id = ctx
        .scenario
        .lanelet_at_position(ego.position)
        .ok_or_else(|| {
            debug!("ego actor {} is on no lanelet", ctx.ego_id);
            no_common_lane()
        })?;
    let lane = ctx
        .scenario
        .lanelet_by_id(lane_id)
        .ok_or_else(no_common_lane)?;

    match (lane.project(ego.position), lane.project(other.position)) {
        (Some(ego_proj), Some(other_proj)) => Ok(other_proj.arc_length - ego_proj.arc_length),
        _ => Err(no_common_lane()),
    }
}

/// HW — headway distance measure. Decreasing is worse: a shrinking gap means
/// a more critical situation.
pub struct Hw;

impl CriticalityMeasure for Hw {
    fn name(&self) -> MeasureName {
        MeasureName::Hw
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
        if resolve_pair_states(ctx, other_id, time_step, self.name(), verbose).is_none() {
            return f64::NAN;
        }
        let value = match headway_along_lane(ctx, other_id, time_step) {
            Ok(d) => round_to(d, ctx.config.rounding.precision),
            Err(e) => {
                debug!("{}: {e}, returning NaN", self.name());
                f64::NAN
            }
        };
        log_result(self.name(), value, verbose);
        value
    }
}
