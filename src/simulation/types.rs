//! Core types for the intersection simulation
//!
//! Compass directions, travel classes and the (origin, class) movements the
//! gate keys all of its state on.

use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

/// A unique identifier for simulation entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimId(pub usize);

/// A wrapper type for car IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarId(pub SimId);

/// A compass point a vehicle arrives from or departs toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// The next compass point clockwise (N -> E -> S -> W -> N)
    pub const fn clockwise(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub const fn counter_clockwise(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "s" | "south" => Ok(Direction::South),
            "e" | "east" => Ok(Direction::East),
            "w" | "west" => Ok(Direction::West),
            other => bail!("Unknown direction '{}'", other),
        }
    }
}

/// The kind of movement a vehicle makes through the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelClass {
    Straight,
    LeftTurn,
    RightTurn,
}

impl TravelClass {
    pub const ALL: [TravelClass; 3] = [
        TravelClass::Straight,
        TravelClass::LeftTurn,
        TravelClass::RightTurn,
    ];

    pub const fn index(self) -> usize {
        match self {
            TravelClass::Straight => 0,
            TravelClass::LeftTurn => 1,
            TravelClass::RightTurn => 2,
        }
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TravelClass::Straight => "straight",
            TravelClass::LeftTurn => "left",
            TravelClass::RightTurn => "right",
        };
        f.write_str(name)
    }
}

/// Number of distinct (origin, class) movements
pub const MOVEMENT_COUNT: usize = 12;

/// An (origin, travel class) pair
///
/// Every occupancy counter and wait group in the gate belongs to exactly one
/// movement, addressed through [`Movement::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Movement {
    pub origin: Direction,
    pub class: TravelClass,
}

impl Movement {
    pub const ALL: [Movement; MOVEMENT_COUNT] = {
        let mut all = [Movement::new(Direction::North, TravelClass::Straight); MOVEMENT_COUNT];
        let mut d = 0;
        while d < Direction::ALL.len() {
            let mut c = 0;
            while c < TravelClass::ALL.len() {
                let movement = Movement::new(Direction::ALL[d], TravelClass::ALL[c]);
                all[movement.index()] = movement;
                c += 1;
            }
            d += 1;
        }
        all
    };

    pub const fn new(origin: Direction, class: TravelClass) -> Self {
        Self { origin, class }
    }

    /// Dense index in `0..MOVEMENT_COUNT`
    pub const fn index(self) -> usize {
        self.origin.index() * TravelClass::ALL.len() + self.class.index()
    }

    /// The direction a vehicle following this movement departs toward
    pub const fn destination(self) -> Direction {
        match self.class {
            TravelClass::Straight => self.origin.opposite(),
            TravelClass::LeftTurn => self.origin.clockwise(),
            TravelClass::RightTurn => self.origin.counter_clockwise(),
        }
    }

    /// The same movement seen from the next compass point clockwise
    pub const fn rotated(self) -> Movement {
        Movement::new(self.origin.clockwise(), self.class)
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.origin, self.class)
    }
}

/// Default number of vehicle threads in a simulation run
pub const DEFAULT_THREADS: usize = 10;

/// Default number of vehicles generated by each thread
pub const DEFAULT_VEHICLES_PER_THREAD: usize = 20;

/// Default upper bound on the pause before a vehicle arrives, in milliseconds
pub const DEFAULT_MAX_INTERARRIVAL_MS: u64 = 1;

/// Default time a vehicle spends inside the intersection, in milliseconds
pub const DEFAULT_CROSSING_MS: u64 = 1;
