//! Simulated vehicles
//!
//! A car only carries its route. Timing and gate interaction are driven by
//! the world that owns the vehicle threads.

use rand::seq::IndexedRandom;
use rand::Rng;
use std::time::Duration;

use super::types::{CarId, Direction, Movement};

/// A vehicle crossing the intersection once
#[derive(Debug, Clone)]
pub struct SimCar {
    pub id: CarId,
    pub origin: Direction,
    pub destination: Direction,
}

impl SimCar {
    pub fn new(id: CarId, origin: Direction, destination: Direction) -> Self {
        Self {
            id,
            origin,
            destination,
        }
    }

    /// Create a car with a random origin and a different random destination
    pub fn random<R: Rng>(id: CarId, rng: &mut R) -> Self {
        let origin = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        let exits: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| *d != origin)
            .collect();
        // Three candidate exits always remain
        let destination = *exits.choose(rng).unwrap_or(&origin.opposite());
        Self::new(id, origin, destination)
    }

    pub fn movement(&self) -> Movement {
        Movement::from_route(self.origin, self.destination)
    }
}

/// What happened to one car during a run
#[derive(Debug, Clone)]
pub struct CarRecord {
    pub id: CarId,
    pub movement: Movement,
    /// Time between arriving at the gate and being admitted
    pub wait: Duration,
}
