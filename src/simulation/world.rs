//! Main simulation world that ties everything together
//!
//! Runs a set of vehicle threads against one intersection gate. Each thread
//! generates its own cars, pauses a random interarrival time, enters the
//! gate, spends the crossing time inside and exits.

use anyhow::{anyhow, bail, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;
use std::time::{Duration, Instant};

use super::car::{CarRecord, SimCar};
use super::intersection::IntersectionGate;
use super::monitor::{Collision, IntersectionMonitor};
use super::stats::SimulationStats;
use super::synch::{
    intersection_after_exit, intersection_before_entry, intersection_sync_cleanup,
    intersection_sync_init,
};
use super::types::{
    CarId, SimId, DEFAULT_CROSSING_MS, DEFAULT_MAX_INTERARRIVAL_MS, DEFAULT_THREADS,
    DEFAULT_VEHICLES_PER_THREAD,
};

/// Parameters of one simulation run
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of concurrent vehicle threads
    pub threads: usize,
    /// Cars generated by each thread, one after another
    pub vehicles_per_thread: usize,
    /// Upper bound on the random pause before each car arrives
    pub max_interarrival: Duration,
    /// Time every car spends inside the intersection
    pub crossing_time: Duration,
    /// Seed for reproducible routes; thread `i` uses `seed + i`
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            vehicles_per_thread: DEFAULT_VEHICLES_PER_THREAD,
            max_interarrival: Duration::from_millis(DEFAULT_MAX_INTERARRIVAL_MS),
            crossing_time: Duration::from_millis(DEFAULT_CROSSING_MS),
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            bail!("At least one vehicle thread is required");
        }
        if self.vehicles_per_thread == 0 {
            bail!("Each thread must generate at least one vehicle");
        }
        Ok(())
    }
}

/// Everything one vehicle thread produced
struct ThreadOutcome {
    records: Vec<CarRecord>,
    collisions: Vec<Collision>,
}

/// The main simulation world
pub struct SimWorld {
    pub config: SimConfig,
}

impl SimWorld {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// Run every vehicle thread to completion and collect statistics
    pub fn run(&self) -> Result<SimulationStats> {
        self.config.validate()?;
        info!(
            "Running {} thread(s) x {} vehicle(s), interarrival <= {:?}, crossing {:?}",
            self.config.threads,
            self.config.vehicles_per_thread,
            self.config.max_interarrival,
            self.config.crossing_time
        );

        let gate = intersection_sync_init();
        let monitor = IntersectionMonitor::new();
        let started = Instant::now();

        let outcomes: Vec<Result<ThreadOutcome>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..self.config.threads)
                .map(|thread_index| {
                    let gate = &gate;
                    let monitor = &monitor;
                    scope.spawn(move || self.run_vehicle_thread(thread_index, gate, monitor))
                })
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(thread_index, handle)| {
                    handle
                        .join()
                        .map_err(|_| anyhow!("Vehicle thread {} panicked", thread_index))
                })
                .collect()
        });

        let mut stats = SimulationStats::new();
        stats.elapsed = started.elapsed();
        for outcome in outcomes {
            let outcome = outcome?;
            for record in &outcome.records {
                stats.record(record);
            }
            stats.record_collisions(outcome.collisions);
        }

        debug_assert_eq!(monitor.total_inside(), 0);
        intersection_sync_cleanup(gate);
        Ok(stats)
    }

    fn run_vehicle_thread(
        &self,
        thread_index: usize,
        gate: &IntersectionGate,
        monitor: &IntersectionMonitor,
    ) -> ThreadOutcome {
        match self.config.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(thread_index as u64));
                self.drive_cars(thread_index, &mut rng, gate, monitor)
            }
            None => self.drive_cars(thread_index, &mut rand::rng(), gate, monitor),
        }
    }

    fn drive_cars<R: Rng>(
        &self,
        thread_index: usize,
        rng: &mut R,
        gate: &IntersectionGate,
        monitor: &IntersectionMonitor,
    ) -> ThreadOutcome {
        let per_thread = self.config.vehicles_per_thread;
        let mut outcome = ThreadOutcome {
            records: Vec::with_capacity(per_thread),
            collisions: Vec::new(),
        };

        for n in 0..per_thread {
            let car = SimCar::random(CarId(SimId(thread_index * per_thread + n)), rng);
            let movement = car.movement();

            let pause = self.random_interarrival(rng);
            if !pause.is_zero() {
                thread::sleep(pause);
            }

            let arrived = Instant::now();
            intersection_before_entry(gate, car.origin, car.destination);
            let wait = arrived.elapsed();

            outcome.collisions.extend(monitor.on_enter(car.id, movement));
            if !self.config.crossing_time.is_zero() {
                thread::sleep(self.config.crossing_time);
            }
            monitor.on_exit(movement);
            intersection_after_exit(gate, car.origin, car.destination);

            outcome.records.push(CarRecord {
                id: car.id,
                movement,
                wait,
            });
        }

        debug!("vehicle thread {} finished {} car(s)", thread_index, per_thread);
        outcome
    }

    fn random_interarrival<R: Rng>(&self, rng: &mut R) -> Duration {
        let max_micros = self.config.max_interarrival.as_micros() as u64;
        if max_micros == 0 {
            Duration::ZERO
        } else {
            Duration::from_micros(rng.random_range(0..=max_micros))
        }
    }
}
