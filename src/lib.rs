// src/lib.rs
//
// Criticality measure engine: scalar measures quantifying how dangerous a
// traffic situation is for an ego vehicle relative to another road user at a
// given time step, computed from kinematic state and lanelet geometry.

pub mod config;
pub mod error;
pub mod lanelet;
pub mod measures;
pub mod pipeline;
pub mod scenario;
pub mod types;

pub use error::{CriticalityError, CriticalityResult};
pub use lanelet::Lanelet;
pub use measures::{CriticalityMeasure, EvalContext};
pub use pipeline::CriticalityPipeline;
pub use scenario::{InMemoryScenario, ScenarioAccess, Trajectory};
pub use types::{
    Config, CriticalityRun, KinematicState, LaneProjection, MeasureName, Monotone, Vec2,
};
