//! Standalone intersection simulation module
//!
//! This module contains the intersection admission gate and a threaded
//! vehicle simulation that exercises it from the console.

mod car;
mod conflict;
mod intersection;
mod monitor;
mod stats;
mod synch;
mod types;
mod world;

pub use car::{CarRecord, SimCar};
pub use conflict::{classify, conflicts};
pub use intersection::{IntersectionGate, OccupancySnapshot};
pub use monitor::{Collision, IntersectionMonitor};
pub use stats::SimulationStats;
pub use synch::{
    intersection_after_exit, intersection_before_entry, intersection_sync_cleanup,
    intersection_sync_init,
};
pub use types::{
    CarId, Direction, Movement, SimId, TravelClass, DEFAULT_CROSSING_MS,
    DEFAULT_MAX_INTERARRIVAL_MS, DEFAULT_THREADS, DEFAULT_VEHICLES_PER_THREAD, MOVEMENT_COUNT,
};
pub use world::{SimConfig, SimWorld};
