//! Entry points used by a vehicle simulation driver
//!
//! The driver creates one gate before any vehicle runs, calls
//! `intersection_before_entry` / `intersection_after_exit` around every
//! crossing, and tears the gate down after the last vehicle is gone. The gate
//! is passed explicitly so independent simulations never share state.

use log::debug;

use super::intersection::IntersectionGate;
use super::types::Direction;

/// Create the gate for one simulation run
pub fn intersection_sync_init() -> IntersectionGate {
    debug!("intersection gate initialized");
    IntersectionGate::new()
}

/// Tear down the gate at the end of a simulation run
///
/// # Panics
/// Panics if any vehicle is still inside or waiting.
pub fn intersection_sync_cleanup(gate: IntersectionGate) {
    let snapshot = gate.snapshot();
    assert!(
        snapshot.total_inside() == 0 && snapshot.total_waiting() == 0,
        "intersection torn down with {} vehicle(s) inside and {} waiting",
        snapshot.total_inside(),
        snapshot.total_waiting()
    );
    drop(gate);
    debug!("intersection gate released");
}

/// Block the calling vehicle until it may enter the intersection
pub fn intersection_before_entry(gate: &IntersectionGate, origin: Direction, destination: Direction) {
    gate.enter(origin, destination);
}

/// Release the calling vehicle's place in the intersection
pub fn intersection_after_exit(gate: &IntersectionGate, origin: Direction, destination: Direction) {
    gate.exit(origin, destination);
}
