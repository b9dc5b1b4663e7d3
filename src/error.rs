// src/error.rs

use crate::types::{ActorId, TimeStep};
use thiserror::Error;

/// Failures inside the measure engine.
///
/// Measure-level failures are soft: the orchestrator maps them to NaN and the
/// run continues. Only configuration errors are fatal at setup time.
#[derive(Error, Debug)]
pub enum CriticalityError {
    /// The actor has no recorded state at the requested time step.
    #[error("no state for actor {actor_id} at time step {time_step}")]
    StateUnavailable {
        actor_id: ActorId,
        time_step: TimeStep,
    },

    /// The two actors cannot be related via a shared lanelet.
    #[error("actors {ego_id} and {other_id} share no common lanelet at time step {time_step}")]
    NoCommonLane {
        ego_id: ActorId,
        other_id: ActorId,
        time_step: TimeStep,
    },

    /// Invalid configuration (fatal at setup).
    #[error("config error: {0}")]
    Config(String),
}

pub type CriticalityResult<T> = Result<T, CriticalityError>;
