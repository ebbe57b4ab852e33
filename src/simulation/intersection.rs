//! Intersection admission gate
//!
//! One lock guards the whole occupancy vector. Every movement owns a
//! condition variable (its wait group) tied to that lock. A vehicle blocks
//! on its own group while any conflicting movement is inside, and each exit
//! re-evaluates all twelve groups against the new occupancy.
//!
//! Starvation is possible for movements with many conflicts (left turns)
//! under continuous opposing traffic. There is no aging or priority.

use log::{debug, trace};
use std::sync::{Condvar, Mutex, MutexGuard};

use super::conflict::conflicts;
use super::types::{Direction, Movement, MOVEMENT_COUNT};

/// Counters guarded by the gate lock
#[derive(Debug, Clone, Default)]
struct GateState {
    /// Vehicles inside the intersection, per movement
    inside: [usize; MOVEMENT_COUNT],
    /// Vehicles blocked in each wait group
    waiting: [usize; MOVEMENT_COUNT],
}

impl GateState {
    /// The block predicate: true while any conflicting movement is inside
    fn blocks(&self, movement: Movement) -> bool {
        movement
            .conflicting()
            .iter()
            .any(|other| self.inside[other.index()] > 0)
    }

    fn occupied(&self) -> impl Iterator<Item = Movement> + '_ {
        Movement::ALL
            .into_iter()
            .filter(move |m| self.inside[m.index()] > 0)
    }

    /// No two occupied movements may conflict
    fn is_conflict_free(&self) -> bool {
        self.occupied()
            .all(|a| self.occupied().all(|b| !conflicts(a, b)))
    }
}

/// A copy of the gate counters taken under the lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancySnapshot {
    inside: [usize; MOVEMENT_COUNT],
    waiting: [usize; MOVEMENT_COUNT],
}

impl OccupancySnapshot {
    pub fn inside(&self, movement: Movement) -> usize {
        self.inside[movement.index()]
    }

    pub fn waiting(&self, movement: Movement) -> usize {
        self.waiting[movement.index()]
    }

    pub fn total_inside(&self) -> usize {
        self.inside.iter().sum()
    }

    pub fn total_waiting(&self) -> usize {
        self.waiting.iter().sum()
    }

    /// Movements with at least one vehicle inside
    pub fn occupied(&self) -> impl Iterator<Item = Movement> + '_ {
        Movement::ALL
            .into_iter()
            .filter(move |m| self.inside[m.index()] > 0)
    }
}

/// Serializes vehicle access to a single four-way intersection
///
/// Vehicles call [`enter`](IntersectionGate::enter) before crossing and
/// [`exit`](IntersectionGate::exit) once they are through. A vehicle is
/// never admitted while a movement that conflicts with its own is inside.
#[derive(Debug)]
pub struct IntersectionGate {
    state: Mutex<GateState>,
    wait_groups: [Condvar; MOVEMENT_COUNT],
}

impl Default for IntersectionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionGate {
    /// Create an empty gate: all counters zero, all wait groups empty
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState::default()),
            wait_groups: std::array::from_fn(|_| Condvar::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        // A poisoned lock means another vehicle hit a fatal assertion
        self.state
            .lock()
            .expect("intersection lock poisoned by a failed vehicle")
    }

    /// Block until a vehicle going from `origin` to `destination` may enter,
    /// then record it as inside the intersection
    ///
    /// # Panics
    /// Panics if `origin == destination`.
    pub fn enter(&self, origin: Direction, destination: Direction) {
        let movement = Movement::from_route(origin, destination);
        let group = movement.index();

        let mut state = self.lock();
        if state.blocks(movement) {
            debug!("{} waits for the intersection", movement);
            state.waiting[group] += 1;
            state = self.wait_groups[group]
                .wait_while(state, |s| s.blocks(movement))
                .expect("intersection lock poisoned by a failed vehicle");
            state.waiting[group] -= 1;
        }

        state.inside[group] += 1;
        debug_assert!(
            state.is_conflict_free(),
            "conflicting movements inside after admitting {}",
            movement
        );
        trace!("{} entered ({} inside)", movement, state.inside[group]);
    }

    /// Record that a vehicle from `origin` to `destination` has left, and wake
    /// every wait group that may now proceed
    ///
    /// # Panics
    /// Panics if no vehicle of that movement is inside.
    pub fn exit(&self, origin: Direction, destination: Direction) {
        let movement = Movement::from_route(origin, destination);

        let mut state = self.lock();
        let count = &mut state.inside[movement.index()];
        assert!(
            *count > 0,
            "{} exited but no such vehicle is inside the intersection",
            movement
        );
        *count -= 1;
        trace!("{} exited ({} inside)", movement, *count);

        for candidate in Movement::ALL {
            let group = candidate.index();
            if state.waiting[group] > 0 && !state.blocks(candidate) {
                debug!(
                    "waking {} waiter(s) for {}",
                    state.waiting[group], candidate
                );
                self.wait_groups[group].notify_all();
            }
        }
    }

    /// Snapshot the counters as they are right now
    pub fn snapshot(&self) -> OccupancySnapshot {
        let state = self.lock();
        OccupancySnapshot {
            inside: state.inside,
            waiting: state.waiting,
        }
    }

    /// True when no vehicle is inside or waiting
    pub fn is_idle(&self) -> bool {
        let state = self.lock();
        state.inside.iter().all(|c| *c == 0) && state.waiting.iter().all(|c| *c == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::types::TravelClass;

    #[test]
    fn empty_state_blocks_nothing() {
        let state = GateState::default();
        assert!(Movement::ALL.iter().all(|m| !state.blocks(*m)));
        assert!(state.is_conflict_free());
    }

    #[test]
    fn opposite_straights_are_conflict_free() {
        let mut state = GateState::default();
        let north = Movement::new(Direction::North, TravelClass::Straight);
        let south = Movement::new(Direction::South, TravelClass::Straight);
        state.inside[north.index()] = 2;
        state.inside[south.index()] = 1;
        assert!(state.is_conflict_free());

        let east = Movement::new(Direction::East, TravelClass::Straight);
        assert!(state.blocks(east));
        state.inside[east.index()] = 1;
        assert!(!state.is_conflict_free());
    }
}
