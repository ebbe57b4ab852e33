//! Wait-time statistics for a simulation run

use log::info;
use ordered_float::OrderedFloat;
use sorted_vec::SortedVec;
use std::time::Duration;

use super::car::CarRecord;
use super::monitor::Collision;
use super::types::{Direction, Movement, MOVEMENT_COUNT};

/// Statistics collected over one simulation run
pub struct SimulationStats {
    pub total_cars: usize,
    /// Cars per movement, indexed by [`Movement::index`]
    pub cars_per_movement: [usize; MOVEMENT_COUNT],
    /// Longest wait per origin direction, indexed by [`Direction::index`]
    pub max_wait: [Duration; 4],
    pub collisions: Vec<Collision>,
    pub elapsed: Duration,
    /// Wait times in milliseconds, kept sorted for percentile lookups
    waits_ms: SortedVec<OrderedFloat<f64>>,
    total_wait: Duration,
}

impl Default for SimulationStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationStats {
    pub fn new() -> Self {
        Self {
            total_cars: 0,
            cars_per_movement: [0; MOVEMENT_COUNT],
            max_wait: [Duration::ZERO; 4],
            collisions: Vec::new(),
            elapsed: Duration::ZERO,
            waits_ms: SortedVec::new(),
            total_wait: Duration::ZERO,
        }
    }

    pub fn record(&mut self, car: &CarRecord) {
        self.total_cars += 1;
        self.cars_per_movement[car.movement.index()] += 1;

        let max = &mut self.max_wait[car.movement.origin.index()];
        *max = (*max).max(car.wait);

        self.total_wait += car.wait;
        self.waits_ms
            .insert(OrderedFloat(car.wait.as_secs_f64() * 1000.0));
    }

    pub fn record_collisions(&mut self, collisions: impl IntoIterator<Item = Collision>) {
        self.collisions.extend(collisions);
    }

    pub fn cars_for(&self, movement: Movement) -> usize {
        self.cars_per_movement[movement.index()]
    }

    pub fn max_wait_from(&self, origin: Direction) -> Duration {
        self.max_wait[origin.index()]
    }

    pub fn mean_wait(&self) -> Duration {
        if self.total_cars == 0 {
            Duration::ZERO
        } else {
            self.total_wait / self.total_cars as u32
        }
    }

    /// Wait time in milliseconds at the given percentile (0.0..=100.0)
    pub fn percentile_wait_ms(&self, percentile: f64) -> f64 {
        if self.waits_ms.is_empty() {
            return 0.0;
        }
        let rank = (percentile.clamp(0.0, 100.0) / 100.0 * (self.waits_ms.len() - 1) as f64)
            .round() as usize;
        self.waits_ms[rank].into_inner()
    }

    /// Log the end-of-run summary
    pub fn log_summary(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Elapsed time: {:.2}s", self.elapsed.as_secs_f64());
        info!("Total cars: {}", self.total_cars);
        for origin in Direction::ALL {
            info!(
                "Max wait from {}: {:.3}ms",
                origin,
                self.max_wait_from(origin).as_secs_f64() * 1000.0
            );
        }
        for movement in Movement::ALL {
            info!("Cars {}: {}", movement, self.cars_for(movement));
        }
        info!(
            "Mean wait: {:.3}ms",
            self.mean_wait().as_secs_f64() * 1000.0
        );
        info!("95th percentile wait: {:.3}ms", self.percentile_wait_ms(95.0));
        info!("Collisions: {}", self.collisions.len());
    }
}
