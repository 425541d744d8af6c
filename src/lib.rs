pub mod core;

// Re-export commonly used types
pub use crate::core::building::{Building, BuildingSnapshot};
pub use crate::core::constraints::ElevatorConstraints;
pub use crate::core::elevator::{DoorState, Elevator, ElevatorStatus};
pub use crate::core::error::SimError;
pub use crate::core::metrics::{MetricsSnapshot, MetricsTracker};
pub use crate::core::passenger::Passenger;
pub use crate::core::scenario::{build_simulation, run_scenario, ScenarioConfig, ScenarioResults};
pub use crate::core::scheduler::{build_scheduler, Scheduler, SchedulerOptions, SCHEDULER_NAMES};
pub use crate::core::simulation::{MorningRushWindow, Simulation, SimulationObserver};
pub use crate::core::types::{ElevatorId, FloorId, Tick};
