use std::process::Command;
use std::time::Duration;

use traffic_gate::simulation::{
    CarId, CarRecord, Direction, Movement, SimConfig, SimId, SimWorld, SimulationStats,
    TravelClass,
};

fn quick_config(seed: u64) -> SimConfig {
    SimConfig {
        threads: 8,
        vehicles_per_thread: 25,
        max_interarrival: Duration::from_micros(200),
        crossing_time: Duration::from_micros(200),
        seed: Some(seed),
    }
}

/// Test that a seeded run admits every car without collisions
#[test]
fn test_seeded_simulation_runs_clean() {
    let world = SimWorld::new(quick_config(42));
    let stats = world.run().expect("simulation should complete");

    assert_eq!(stats.total_cars, 8 * 25);
    assert!(stats.collisions.is_empty(), "collisions: {:?}", stats.collisions);
    let per_movement: usize = Movement::ALL.iter().map(|m| stats.cars_for(*m)).sum();
    assert_eq!(per_movement, stats.total_cars);
}

/// Test that the same seed produces the same routes
#[test]
fn test_seed_reproduces_routes() {
    let first = SimWorld::new(quick_config(7)).run().unwrap();
    let second = SimWorld::new(quick_config(7)).run().unwrap();
    assert_eq!(first.cars_per_movement, second.cars_per_movement);
}

/// Test that zero-sized runs are rejected up front
#[test]
fn test_invalid_config_is_rejected() {
    let mut config = SimConfig::default();
    config.threads = 0;
    assert!(SimWorld::new(config).run().is_err());

    let mut config = SimConfig::default();
    config.vehicles_per_thread = 0;
    assert!(config.validate().is_err());

    assert!(SimConfig::default().validate().is_ok());
}

/// Test wait statistics bookkeeping
#[test]
fn test_stats_track_waits_per_origin() {
    let mut stats = SimulationStats::new();
    let north_left = Movement::new(Direction::North, TravelClass::LeftTurn);
    let east_straight = Movement::new(Direction::East, TravelClass::Straight);

    for (i, (movement, wait_ms)) in [(north_left, 4), (north_left, 10), (east_straight, 2)]
        .into_iter()
        .enumerate()
    {
        stats.record(&CarRecord {
            id: CarId(SimId(i)),
            movement,
            wait: Duration::from_millis(wait_ms),
        });
    }

    assert_eq!(stats.total_cars, 3);
    assert_eq!(stats.cars_for(north_left), 2);
    assert_eq!(stats.max_wait_from(Direction::North), Duration::from_millis(10));
    assert_eq!(stats.max_wait_from(Direction::East), Duration::from_millis(2));
    assert_eq!(stats.max_wait_from(Direction::West), Duration::ZERO);
    assert_eq!(stats.mean_wait(), Duration::from_millis(16) / 3);
    assert!((stats.percentile_wait_ms(100.0) - 10.0).abs() < 1e-9);
    assert!((stats.percentile_wait_ms(0.0) - 2.0).abs() < 1e-9);
}

/// Test that the binary runs headless and logs its summary
#[test]
fn test_headless_binary_reports_summary() {
    let output = Command::new(env!("CARGO_BIN_EXE_traffic_gate"))
        .args([
            "--threads",
            "4",
            "--vehicles",
            "5",
            "--interarrival-ms",
            "0",
            "--crossing-ms",
            "0",
            "--seed",
            "3",
        ])
        .env("RUST_LOG", "info")
        .output()
        .expect("Failed to execute simulation");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "Simulation failed to run. stderr: {}",
        stderr
    );
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
    assert!(stderr.contains("Total cars: 20"), "stderr: {}", stderr);
    assert!(stderr.contains("Collisions: 0"), "stderr: {}", stderr);
    assert!(stderr.contains("Max wait from north:"), "stderr: {}", stderr);
}
