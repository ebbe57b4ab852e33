//! Collision checker used by the simulation driver
//!
//! The monitor keeps its own view of who is inside, independent of the gate.
//! Vehicles register after `enter` returns and deregister before calling
//! `exit`, so the monitor never sees a vehicle the gate has not admitted.

use log::error;
use std::sync::Mutex;

use super::conflict::conflicts;
use super::types::{CarId, Movement, MOVEMENT_COUNT};

/// A pair of conflicting movements observed inside the intersection together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub car: CarId,
    pub entering: Movement,
    pub occupying: Movement,
}

#[derive(Debug, Default)]
pub struct IntersectionMonitor {
    inside: Mutex<[usize; MOVEMENT_COUNT]>,
}

impl IntersectionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a car that was just admitted
    ///
    /// Returns the collisions its entry caused, if any.
    pub fn on_enter(&self, car: CarId, movement: Movement) -> Vec<Collision> {
        let mut inside = self.inside.lock().expect("monitor lock poisoned");
        let collisions: Vec<Collision> = Movement::ALL
            .into_iter()
            .filter(|other| inside[other.index()] > 0 && conflicts(movement, *other))
            .map(|occupying| Collision {
                car,
                entering: movement,
                occupying,
            })
            .collect();

        for collision in &collisions {
            error!(
                "Vehicle collision: car {} ({}) entered while {} was inside",
                car.0 .0, collision.entering, collision.occupying
            );
        }

        inside[movement.index()] += 1;
        collisions
    }

    /// Deregister a car that is about to leave
    pub fn on_exit(&self, movement: Movement) {
        let mut inside = self.inside.lock().expect("monitor lock poisoned");
        let count = &mut inside[movement.index()];
        assert!(*count > 0, "monitor lost track of {}", movement);
        *count -= 1;
    }

    pub fn total_inside(&self) -> usize {
        self.inside
            .lock()
            .expect("monitor lock poisoned")
            .iter()
            .sum()
    }
}
