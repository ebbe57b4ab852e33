//! Path conflicts between movements
//!
//! The conflict table below is the only place the admission policy lives.
//! Both the gate's block predicate and its wake decision read it, so the two
//! can never disagree.
//!
//! The table is symmetric, irreflexive and invariant under a 90 degree
//! rotation of the compass. Straight movements from opposite origins never
//! conflict, right turns only yield to traffic from their own origin, and
//! left turns sweep across oncoming and perpendicular straight traffic.

use super::types::{Direction, Movement, TravelClass, MOVEMENT_COUNT};

const N_S: Movement = Movement::new(Direction::North, TravelClass::Straight);
const N_L: Movement = Movement::new(Direction::North, TravelClass::LeftTurn);
const N_R: Movement = Movement::new(Direction::North, TravelClass::RightTurn);
const S_S: Movement = Movement::new(Direction::South, TravelClass::Straight);
const S_L: Movement = Movement::new(Direction::South, TravelClass::LeftTurn);
const S_R: Movement = Movement::new(Direction::South, TravelClass::RightTurn);
const E_S: Movement = Movement::new(Direction::East, TravelClass::Straight);
const E_L: Movement = Movement::new(Direction::East, TravelClass::LeftTurn);
const E_R: Movement = Movement::new(Direction::East, TravelClass::RightTurn);
const W_S: Movement = Movement::new(Direction::West, TravelClass::Straight);
const W_L: Movement = Movement::new(Direction::West, TravelClass::LeftTurn);
const W_R: Movement = Movement::new(Direction::West, TravelClass::RightTurn);

/// Each requesting movement with the movements it must wait for
const CONFLICT_TABLE: [(Movement, &[Movement]); MOVEMENT_COUNT] = [
    (N_R, &[N_S, N_L]),
    (N_L, &[W_S, N_S, S_S, N_R, W_L, S_L, E_L]),
    (N_S, &[W_S, E_S, N_R, N_L, S_L, E_L]),
    (S_R, &[S_S, S_L]),
    (S_L, &[E_S, N_S, S_S, S_R, W_L, N_L, E_L]),
    (S_S, &[W_S, E_S, S_R, N_L, S_L, W_L]),
    (W_R, &[W_S, W_L]),
    (W_L, &[E_S, W_S, S_S, W_R, E_L, S_L, N_L]),
    (W_S, &[N_S, S_S, W_R, W_L, N_L, E_L]),
    (E_R, &[E_S, E_L]),
    (E_L, &[E_S, W_S, N_S, E_R, W_L, S_L, N_L]),
    (E_S, &[N_S, S_S, E_R, W_L, S_L, E_L]),
];

/// Conflict lists re-ordered so they can be addressed by [`Movement::index`]
const CONFLICTS_BY_INDEX: [&[Movement]; MOVEMENT_COUNT] = {
    let mut by_index: [&[Movement]; MOVEMENT_COUNT] = [&[]; MOVEMENT_COUNT];
    let mut i = 0;
    while i < MOVEMENT_COUNT {
        let (movement, conflicts) = CONFLICT_TABLE[i];
        by_index[movement.index()] = conflicts;
        i += 1;
    }
    by_index
};

/// Derive the travel class of a vehicle from where it comes from and where it goes
///
/// # Panics
/// A vehicle that leaves toward the direction it arrived from has no valid
/// path through the intersection.
pub fn classify(origin: Direction, destination: Direction) -> TravelClass {
    assert_ne!(
        origin, destination,
        "invalid route: vehicle arrives from and departs toward {}",
        origin
    );

    if destination == origin.counter_clockwise() {
        TravelClass::RightTurn
    } else if destination == origin.clockwise() {
        TravelClass::LeftTurn
    } else {
        TravelClass::Straight
    }
}

impl Movement {
    /// Build the movement for a vehicle travelling from `origin` to `destination`
    pub fn from_route(origin: Direction, destination: Direction) -> Self {
        Movement::new(origin, classify(origin, destination))
    }

    /// Movements that must be empty before this one may enter
    pub fn conflicting(self) -> &'static [Movement] {
        CONFLICTS_BY_INDEX[self.index()]
    }
}

/// True when `requesting` may not share the intersection with `occupying`
pub fn conflicts(requesting: Movement, occupying: Movement) -> bool {
    requesting.conflicting().contains(&occupying)
}
