//! JSON scenario documents for offline runs: building shape, scheduler
//! choice, arrival process, scheduled outages, and run length.

use serde::{Deserialize, Serialize};

use super::building::Building;
use super::constraints::ElevatorConstraints;
use super::error::SimError;
use super::metrics::MetricsSnapshot;
use super::scheduler::SchedulerOptions;
use super::simulation::{MorningRushWindow, Simulation};
use super::types::{ElevatorId, Tick};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildingConfig {
    #[serde(default = "default_num_floors")]
    pub num_floors: usize,
    #[serde(default = "default_elevator_count")]
    pub elevator_count: usize,
    #[serde(default)]
    pub constraints: ElevatorConstraints,
}

fn default_num_floors() -> usize {
    100
}

fn default_elevator_count() -> usize {
    10
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            num_floors: default_num_floors(),
            elevator_count: default_elevator_count(),
            constraints: ElevatorConstraints::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchedulerConfig {
    #[serde(default = "default_scheduler_name")]
    pub name: String,
    #[serde(default)]
    pub options: SchedulerOptions,
}

fn default_scheduler_name() -> String {
    "fcfs".to_string()
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            name: default_scheduler_name(),
            options: SchedulerOptions::default(),
        }
    }
}

/// Discrete start/end events applied by the runner before each tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioEvent {
    Outage {
        elevator_id: ElevatorId,
        start_time: Tick,
        end_time: Tick,
    },
}

/// The full scenario document. Every field has a default, so `{}` is a
/// valid scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub building: BuildingConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default = "default_arrival_rate")]
    pub arrival_rate_per_floor: f64,
    #[serde(default)]
    pub morning_bursts: Vec<MorningRushWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
    #[serde(default = "default_metrics_interval")]
    pub metrics_hook_interval: u64,
    #[serde(default = "default_duration")]
    pub duration: u64,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            building: BuildingConfig::default(),
            scheduler: SchedulerConfig::default(),
            arrival_rate_per_floor: default_arrival_rate(),
            morning_bursts: Vec::new(),
            random_seed: None,
            metrics_hook_interval: default_metrics_interval(),
            duration: default_duration(),
            events: Vec::new(),
        }
    }
}

fn default_arrival_rate() -> f64 {
    0.05
}

fn default_metrics_interval() -> u64 {
    10
}

fn default_duration() -> u64 {
    300
}

/// Runner output: snapshots on the configured interval plus a final one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioResults {
    pub scenario: String,
    pub description: Option<String>,
    pub duration: u64,
    pub scheduler: String,
    pub final_metrics: MetricsSnapshot,
    pub metrics_over_time: Vec<MetricsSnapshot>,
}

pub fn build_simulation(config: &ScenarioConfig) -> Result<Simulation, SimError> {
    let building = Building::new(
        config.building.num_floors,
        config.building.elevator_count,
        config.building.constraints.clone(),
        &config.scheduler.name,
        &config.scheduler.options,
    )?;
    let mut simulation = Simulation::new(building)
        .with_arrival_rate(config.arrival_rate_per_floor)
        .with_morning_bursts(config.morning_bursts.clone())
        .with_metrics_interval(config.metrics_hook_interval);
    if let Some(seed) = config.random_seed {
        simulation = simulation.with_seed(seed);
    }
    Ok(simulation)
}

fn apply_scheduled_events(simulation: &mut Simulation, events: &[ScenarioEvent]) {
    let current_time = simulation.current_time();
    for event in events {
        let ScenarioEvent::Outage {
            elevator_id,
            start_time,
            end_time,
        } = event;
        if current_time == *start_time {
            simulation.start_maintenance(*elevator_id);
        }
        if current_time == *end_time {
            simulation.restore_elevator(*elevator_id);
        }
    }
}

/// Run a scenario to completion and collect its metrics series.
pub fn run_scenario(config: &ScenarioConfig) -> Result<ScenarioResults, SimError> {
    let mut simulation = build_simulation(config)?;
    let mut metrics_over_time = Vec::new();

    for _ in 0..config.duration {
        apply_scheduled_events(&mut simulation, &config.events);
        simulation.step();
        if simulation.current_time() % simulation.metrics_hook_interval() == 0 {
            metrics_over_time.push(simulation.metrics().snapshot(simulation.current_time()));
        }
    }

    Ok(ScenarioResults {
        scenario: config
            .name
            .clone()
            .unwrap_or_else(|| "scenario".to_string()),
        description: config.description.clone(),
        duration: config.duration,
        scheduler: config.scheduler.name.clone(),
        final_metrics: simulation.metrics().snapshot(simulation.current_time()),
        metrics_over_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_every_default() {
        let config: ScenarioConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.building.num_floors, 100);
        assert_eq!(config.building.elevator_count, 10);
        assert_eq!(config.building.constraints.capacity, 8);
        assert_eq!(config.scheduler.name, "fcfs");
        assert_eq!(config.arrival_rate_per_floor, 0.05);
        assert_eq!(config.metrics_hook_interval, 10);
        assert_eq!(config.duration, 300);
        assert!(config.events.is_empty());
        assert!(config.random_seed.is_none());
    }

    #[test]
    fn full_document_round_trips() {
        let text = r#"{
            "name": "morning_rush",
            "description": "lobby surge",
            "building": {
                "num_floors": 20,
                "elevator_count": 3,
                "constraints": {
                    "capacity": 6,
                    "cruise_speed_floors_per_tick": 1.5,
                    "acceleration_floors_per_tick2": 0.5,
                    "door_dwell_ticks": 2
                }
            },
            "scheduler": {"name": "destination_dispatch", "options": {"cluster_size": 4}},
            "arrival_rate_per_floor": 0.2,
            "morning_bursts": [
                {"start_time": 0, "end_time": 50, "multiplier": 4.0,
                 "origin_floor": 0, "destination_focus": 15}
            ],
            "random_seed": 99,
            "metrics_hook_interval": 5,
            "duration": 120,
            "events": [
                {"type": "outage", "elevator_id": 1, "start_time": 10, "end_time": 40}
            ]
        }"#;
        let config: ScenarioConfig = serde_json::from_str(text).unwrap();
        assert_eq!(config.scheduler.options.cluster_size, Some(4));
        assert_eq!(
            config.events,
            vec![ScenarioEvent::Outage {
                elevator_id: 1,
                start_time: 10,
                end_time: 40
            }]
        );

        let serialized = serde_json::to_string(&config).unwrap();
        let reparsed: ScenarioConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn outage_event_toggles_maintenance() {
        let config: ScenarioConfig = serde_json::from_str(
            r#"{
                "building": {"num_floors": 5, "elevator_count": 1},
                "arrival_rate_per_floor": 0.0,
                "duration": 10,
                "events": [{"type": "outage", "elevator_id": 0, "start_time": 2, "end_time": 6}]
            }"#,
        )
        .unwrap();
        let mut simulation = build_simulation(&config).unwrap();
        for _ in 0..4 {
            apply_scheduled_events(&mut simulation, &config.events);
            simulation.step();
        }
        assert_eq!(
            simulation.building().snapshot().elevators[0].status,
            crate::core::elevator::ElevatorStatus::Maintenance
        );
        for _ in 0..4 {
            apply_scheduled_events(&mut simulation, &config.events);
            simulation.step();
        }
        assert_eq!(
            simulation.building().snapshot().elevators[0].status,
            crate::core::elevator::ElevatorStatus::InService
        );
    }

    #[test]
    fn unknown_scheduler_fails_construction() {
        let config: ScenarioConfig =
            serde_json::from_str(r#"{"scheduler": {"name": "elevator_2000"}}"#).unwrap();
        let err = build_simulation(&config).err().unwrap();
        assert!(err.to_string().contains("elevator_2000"));
    }
}
