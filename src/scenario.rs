// src/scenario.rs
//
// State Accessor: the narrow interface the measure engine needs from whatever
// holds the scenario (map + actor trajectories). Measures never touch a
// concrete scenario representation directly — they go through `ScenarioAccess`
// so the engine stays decoupled from any particular map/scenario library.

use crate::error::{CriticalityError, CriticalityResult};
use crate::lanelet::Lanelet;
use crate::types::{ActorId, KinematicState, LaneletId, TimeStep, Vec2};
use std::collections::HashMap;

/// Scenario collaborator contract.
pub trait ScenarioAccess {
    /// Kinematic state of `actor_id` at `time_step`.
    ///
    /// Fails with `StateUnavailable` when the actor has no recorded state at
    /// that step (outside its trajectory span). Pure lookup, no side effects.
    fn state_at(&self, actor_id: ActorId, time_step: TimeStep)
        -> CriticalityResult<KinematicState>;

    /// Lanelet whose surface contains `position`, if any.
    fn lanelet_at_position(&self, position: Vec2) -> Option<LaneletId>;

    fn lanelet_by_id(&self, id: LaneletId) -> Option<&Lanelet>;
}

/// One actor's recorded motion: a state per consecutive time step starting at
/// `start_step`.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub start_step: TimeStep,
    pub states: Vec<KinematicState>,
}

impl Trajectory {
    pub fn new(start_step: TimeStep, states: Vec<KinematicState>) -> Self {
        Self { start_step, states }
    }

    pub fn state_at(&self, time_step: TimeStep) -> Option<&KinematicState> {
        let idx = time_step.checked_sub(self.start_step)? as usize;
        self.states.get(idx)
    }
}

/// In-memory scenario: actor trajectories plus a lanelet network slice.
#[derive(Debug, Default)]
pub struct InMemoryScenario {
    actors: HashMap<ActorId, Trajectory>,
    lanelets: Vec<Lanelet>,
}

impl InMemoryScenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_actor(&mut self, actor_id: ActorId, trajectory: Trajectory) {
        self.actors.insert(actor_id, trajectory);
    }

    pub fn add_lanelet(&mut self, lanelet: Lanelet) {
        self.lanelets.push(lanelet);
    }
}

impl ScenarioAccess for InMemoryScenario {
    fn state_at(
        &self,
        actor_id: ActorId,
        time_step: TimeStep,
    ) -> CriticalityResult<KinematicState> {
        self.actors
            .get(&actor_id)
            .and_then(|t| t.state_at(time_step))
            .copied()
            .ok_or(CriticalityError::StateUnavailable {
                actor_id,
                time_step,
            })
    }

    fn lanelet_at_position(&self, position: Vec2) -> Option<LaneletId> {
        self.lanelets
            .iter()
            .find(|l| l.contains(position))
            .map(|l| l.id)
    }

    fn lanelet_by_id(&self, id: LaneletId) -> Option<&Lanelet> {
        self.lanelets.iter().find(|l| l.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at_x(x: f64) -> KinematicState {
        KinematicState::new(Vec2::new(x, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 0.0))
    }

    #[test]
    fn test_state_lookup_within_span() {
        let mut scenario = InMemoryScenario::new();
        scenario.add_actor(
            7,
            Trajectory::new(5, vec![state_at_x(0.0), state_at_x(1.0), state_at_x(2.0)]),
        );

        let s = scenario.state_at(7, 6).unwrap();
        assert_eq!(s.position.x, 1.0);
    }

    #[test]
    fn test_state_unavailable_outside_span() {
        let mut scenario = InMemoryScenario::new();
        scenario.add_actor(7, Trajectory::new(5, vec![state_at_x(0.0)]));

        assert!(matches!(
            scenario.state_at(7, 4),
            Err(CriticalityError::StateUnavailable {
                actor_id: 7,
                time_step: 4
            })
        ));
        assert!(scenario.state_at(7, 6).is_err());
        assert!(scenario.state_at(99, 5).is_err());
    }

    #[test]
    fn test_lanelet_lookup_by_position() {
        let mut scenario = InMemoryScenario::new();
        scenario.add_lanelet(Lanelet::straight(
            1,
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            3.5,
        ));

        assert_eq!(scenario.lanelet_at_position(Vec2::new(50.0, 0.5)), Some(1));
        assert_eq!(scenario.lanelet_at_position(Vec2::new(50.0, 10.0)), None);
        assert!(scenario.lanelet_by_id(1).is_some());
        assert!(scenario.lanelet_by_id(2).is_none());
    }
}
