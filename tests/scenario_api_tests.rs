use liftsim::{run_scenario, ScenarioConfig, SchedulerOptions, SCHEDULER_NAMES};

fn seeded_config() -> ScenarioConfig {
    serde_json::from_str(
        r#"{
            "name": "integration",
            "building": {
                "num_floors": 12,
                "elevator_count": 2,
                "constraints": {"capacity": 4}
            },
            "scheduler": {"name": "scan"},
            "arrival_rate_per_floor": 0.2,
            "random_seed": 1234,
            "metrics_hook_interval": 10,
            "duration": 100
        }"#,
    )
    .unwrap()
}

#[test]
fn scenario_runs_are_deterministic_for_a_seed() {
    let config = seeded_config();
    let first = run_scenario(&config).unwrap();
    let second = run_scenario(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn snapshots_follow_the_configured_cadence() {
    let results = run_scenario(&seeded_config()).unwrap();
    // One snapshot per 10 ticks over 100 ticks, plus the final snapshot.
    assert_eq!(results.metrics_over_time.len(), 10);
    let times: Vec<u64> = results
        .metrics_over_time
        .iter()
        .map(|s| s.time_step)
        .collect();
    assert_eq!(times, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    assert_eq!(results.final_metrics.time_step, 100);
    assert_eq!(results.scenario, "integration");
    assert_eq!(results.scheduler, "scan");
}

#[test]
fn full_outage_stops_all_throughput() {
    let config: ScenarioConfig = serde_json::from_str(
        r#"{
            "building": {"num_floors": 8, "elevator_count": 1},
            "arrival_rate_per_floor": 0.3,
            "random_seed": 5,
            "duration": 60,
            "events": [
                {"type": "outage", "elevator_id": 0, "start_time": 0, "end_time": 100}
            ]
        }"#,
    )
    .unwrap();
    let results = run_scenario(&config).unwrap();
    assert_eq!(results.final_metrics.throughput, 0);
}

#[test]
fn scheduler_can_be_swapped_at_runtime() {
    let config = seeded_config();
    let mut simulation = liftsim::build_simulation(&config).unwrap();
    simulation.run(10);

    simulation
        .building_mut()
        .set_scheduler("destination_dispatch", &SchedulerOptions::default())
        .unwrap();
    assert_eq!(simulation.building().scheduler_name(), "destination_dispatch");
    simulation.run(10);
    assert_eq!(simulation.current_time(), 20);
}

#[test]
fn rejected_swap_leaves_the_active_scheduler_untouched() {
    let config = seeded_config();
    let mut simulation = liftsim::build_simulation(&config).unwrap();

    let err = simulation
        .building_mut()
        .set_scheduler("teleporter", &SchedulerOptions::default())
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("teleporter"));
    for name in SCHEDULER_NAMES {
        assert!(message.contains(name));
    }
    assert_eq!(simulation.building().scheduler_name(), "scan");
}

#[test]
fn every_scheduler_completes_rides_under_steady_load() {
    for name in SCHEDULER_NAMES {
        let mut config = seeded_config();
        config.scheduler.name = name.to_string();
        config.duration = 200;
        let results = run_scenario(&config).unwrap();
        assert!(
            results.final_metrics.throughput > 0,
            "{} moved nobody",
            name
        );
        assert!(results.final_metrics.average_wait >= 0.0);
    }
}

#[test]
fn results_serialize_to_json_and_back() {
    let results = run_scenario(&seeded_config()).unwrap();
    let body = serde_json::to_string_pretty(&results).unwrap();
    let reparsed: liftsim::ScenarioResults = serde_json::from_str(&body).unwrap();
    assert_eq!(results, reparsed);
}
