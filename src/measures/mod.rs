// src/measures/mod.rs
//
// Criticality measure modules.
//
// Signal flow per (ego, other, time step):
//   ScenarioAccess.state_at ──→ pair validation (missing state → NaN)
//   Lanelet.lane_projection ──→ longitudinal frame (heading, width)
//   headway_along_lane ───────→ gap along the shared lane
//   measure formula ──────────→ scalar, clamped/rounded, logged
//
// Measures are stateless: each `compute` returns its value and retains
// nothing. History lives in the pipeline's time-indexed result map.

pub mod a_long_req;
pub mod headway;
pub mod stopping_distance;
pub mod time_headway;
pub mod time_to_collision;

// Re-exports for ergonomic access from the pipeline and binaries.
pub use a_long_req::ALongReq;
pub use headway::{headway_along_lane, Hw};
pub use stopping_distance::Psd;
pub use time_headway::Thw;
pub use time_to_collision::Ttc;

use crate::scenario::ScenarioAccess;
use crate::types::{ActorId, Config, KinematicState, MeasureName, Monotone, TimeStep, Vec2};
use tracing::{debug, info};

/// Everything a measure needs to evaluate one (ego, other, step) triple.
pub struct EvalContext<'a> {
    pub scenario: &'a dyn ScenarioAccess,
    pub config: &'a Config,
    pub ego_id: ActorId,
}

/// Uniform contract of every criticality measure.
///
/// `compute` is a pure function of (scenario, actor pair, time step, config):
/// calling it twice with identical inputs yields bit-identical results. Any
/// unresolved state maps to NaN (soft failure, logged), never a panic — a
/// batch run across a time window must survive isolated missing data.
pub trait CriticalityMeasure {
    fn name(&self) -> MeasureName;

    fn monotone(&self) -> Monotone;

    /// Scalar criticality of the (ego, other) pair at `time_step`. NaN and
    /// ±inf are valid sentinel outputs.
    fn compute(
        &self,
        ctx: &EvalContext<'_>,
        other_id: ActorId,
        time_step: TimeStep,
        verbose: bool,
    ) -> f64;
}

/// Canonical value decreasing-is-worse measures report for "no danger".
pub const NON_CRITICAL: f64 = 0.0;

/// Resolve both actors' states, or log and yield `None` (caller returns NaN).
pub(crate) fn resolve_pair_states(
    ctx: &EvalContext<'_>,
    other_id: ActorId,
    time_step: TimeStep,
    name: MeasureName,
    verbose: bool,
) -> Option<(KinematicState, KinematicState)> {
    let ego = match ctx.scenario.state_at(ctx.ego_id, time_step) {
        Ok(s) => s,
        Err(e) => {
            log_line(verbose, format_args!("{name}: {e}, returning NaN"));
            return None;
        }
    };
    let other = match ctx.scenario.state_at(other_id, time_step) {
        Ok(s) => s,
        Err(e) => {
            log_line(verbose, format_args!("{name}: {e}, returning NaN"));
            return None;
        }
    };
    Some((ego, other))
}

/// Shared pre-condition of the required-acceleration family: both actors
/// occupy the same lanelet and the gap is not shrinking (closing speed ≤ 0),
/// so no braking is needed and the canonical non-critical value applies.
pub(crate) fn same_lane_non_closing(
    ctx: &EvalContext<'_>,
    ego: &KinematicState,
    other: &KinematicState,
) -> bool {
    let ego_lane = ctx.scenario.lanelet_at_position(ego.position);
    let other_lane = ctx.scenario.lanelet_at_position(other.position);
    match (ego_lane, other_lane) {
        (Some(a), Some(b)) if a == b => closing_speed(ego, other) <= 0.0,
        _ => false,
    }
}

/// Rate at which the euclidean gap between the actors shrinks (m/s);
/// positive means the ego is gaining on the other.
pub(crate) fn closing_speed(ego: &KinematicState, other: &KinematicState) -> f64 {
    let gap = other.position - ego.position;
    let dist = gap.norm();
    if dist < f64::EPSILON {
        return 0.0;
    }
    let toward = Vec2::new(gap.x / dist, gap.y / dist);
    (ego.velocity - other.velocity).dot(toward)
}

/// Component of a motion vector along the lane-tangential direction:
/// magnitude × cos(relative angle between the vector and the lane heading).
pub(crate) fn longitudinal_component(motion: Vec2, lane_heading: f64) -> f64 {
    let magnitude = motion.norm();
    if magnitude < f64::EPSILON {
        return 0.0;
    }
    magnitude * (motion.angle() - lane_heading).cos()
}

/// Round to `digits` decimal places, half away from zero. Non-finite values
/// pass through unchanged — NaN/±inf are sentinels, not numbers to round.
pub(crate) fn round_to(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

pub(crate) fn log_result(name: MeasureName, value: f64, verbose: bool) {
    log_line(verbose, format_args!("{name} = {value}"));
}

fn log_line(verbose: bool, args: std::fmt::Arguments<'_>) {
    if verbose {
        info!("{}", args);
    } else {
        debug!("{}", args);
    }
}
