// src/types.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, Mul, Sub};

pub type ActorId = u32;
pub type TimeStep = u32;
pub type LaneletId = u32;

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub acceleration: AccelerationConfig,
    #[serde(default)]
    pub braking: BrakingConfig,
    #[serde(default)]
    pub rounding: RoundingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which kinematic model the required-acceleration family uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccelerationMode {
    /// Required acceleration under a constant-acceleration assumption for the
    /// other vehicle.
    #[serde(rename = "constant-acceleration")]
    ConstantAcceleration,
    /// Piecewise constant motion: the other vehicle brakes to a stop and the
    /// ego must stop within the remaining gap.
    #[serde(rename = "piecewise-constant")]
    PiecewiseConstant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccelerationConfig {
    pub mode: AccelerationMode,
}

impl Default for AccelerationConfig {
    fn default() -> Self {
        Self {
            mode: AccelerationMode::ConstantAcceleration,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrakingConfig {
    /// Maximum assumed deceleration magnitude (m/s²) for stopping-distance
    /// based measures.
    pub max_deceleration: f64,
}

impl Default for BrakingConfig {
    fn default() -> Self {
        Self {
            max_deceleration: 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundingConfig {
    /// Decimal places kept on finite measure results.
    pub precision: u32,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ============================================================================
// KINEMATICS
// ============================================================================

/// 2D point/vector in scenario coordinates (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Direction of this vector in radians. The zero vector maps to 0.0.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Immutable kinematic snapshot of one actor at one time step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KinematicState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Heading in radians; `None` when the source trajectory carries no
    /// orientation channel.
    pub orientation: Option<f64>,
}

impl KinematicState {
    pub fn new(position: Vec2, velocity: Vec2, acceleration: Vec2) -> Self {
        Self {
            position,
            velocity,
            acceleration,
            orientation: None,
        }
    }

    /// Same snapshot with a heading attached, for trajectories that carry an
    /// orientation channel.
    pub fn with_orientation(mut self, orientation: f64) -> Self {
        self.orientation = Some(orientation);
        self
    }
}

/// Result of projecting a position onto a lanelet.
///
/// `None` in the orientation/width fields means the position falls outside the
/// lanelet's longitudinal parameterization domain — a defined outcome, not an
/// error. Callers must keep this distinct from a valid zero orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneProjection {
    pub lane_id: LaneletId,
    /// Heading of the lane centerline at the projected point, radians.
    pub longitudinal_orientation: Option<f64>,
    pub lane_width: Option<f64>,
}

impl LaneProjection {
    pub fn out_of_domain(lane_id: LaneletId) -> Self {
        Self {
            lane_id,
            longitudinal_orientation: None,
            lane_width: None,
        }
    }

    pub fn is_out_of_domain(&self) -> bool {
        self.longitudinal_orientation.is_none()
    }
}

// ============================================================================
// MEASURES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MeasureName {
    /// Headway: longitudinal gap along the shared lane (m).
    Hw,
    /// Time headway: gap over ego speed (s).
    Thw,
    /// Time to collision: gap over closing speed (s).
    Ttc,
    /// Required longitudinal acceleration to avoid collision (m/s²).
    ALongReq,
    /// Proportion of stopping distance: gap over minimum stopping distance.
    Psd,
}

impl MeasureName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hw => "HW",
            Self::Thw => "THW",
            Self::Ttc => "TTC",
            Self::ALongReq => "A_LONG_REQ",
            Self::Psd => "PSD",
        }
    }
}

impl std::fmt::Display for MeasureName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether lower or higher values of a measure indicate greater danger.
/// Downstream reporting uses this to orient axes and comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Monotone {
    /// Decreasing is worse: more negative / smaller means more critical.
    Neg,
    /// Increasing is worse.
    Pos,
}

impl Monotone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "NEG",
            Self::Pos => "POS",
        }
    }
}

/// Accumulated results of one orchestrator run: for each time step, one value
/// per computed measure. NaN and ±inf are valid sentinels and are kept as-is.
#[derive(Debug, Clone, Serialize)]
pub struct CriticalityRun {
    pub start: TimeStep,
    pub end: TimeStep,
    pub values: BTreeMap<TimeStep, BTreeMap<MeasureName, f64>>,
}

impl CriticalityRun {
    pub fn time_bounds(&self) -> (TimeStep, TimeStep) {
        (self.start, self.end)
    }

    pub fn at(&self, step: TimeStep, name: MeasureName) -> Option<f64> {
        self.values
            .get(&step)
            .and_then(|row| row.get(&name))
            .copied()
    }

    /// Time series of one measure, in step order, for reporting/plotting.
    pub fn series(&self, name: MeasureName) -> Vec<(TimeStep, f64)> {
        self.values
            .iter()
            .filter_map(|(step, row)| row.get(&name).map(|v| (*step, *v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_orientation_defaults_to_none() {
        let s = KinematicState::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 0.0),
        );
        assert_eq!(s.orientation, None);
    }

    #[test]
    fn test_state_with_orientation() {
        let s = KinematicState::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 0.0),
        )
        .with_orientation(std::f64::consts::FRAC_PI_2);
        assert_eq!(s.orientation, Some(std::f64::consts::FRAC_PI_2));
    }
}
