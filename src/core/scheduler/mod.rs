pub mod destination_dispatch;
pub mod fcfs;
pub mod interface;
pub mod scan;
pub mod utils;

use serde::{Deserialize, Serialize};

pub use destination_dispatch::DestinationDispatchScheduler;
pub use fcfs::FirstComeFirstServedScheduler;
pub use interface::{Assignments, ElevatorSnapshot, PendingRequest, Scheduler};
pub use scan::ScanScheduler;

use super::error::SimError;

/// Names accepted by [`build_scheduler`], in registry order.
pub const SCHEDULER_NAMES: [&str; 3] = ["fcfs", "scan", "destination_dispatch"];

const DEFAULT_CLUSTER_SIZE: usize = 3;

/// Strategy-specific tunables carried by the scenario document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchedulerOptions {
    /// Destination-dispatch bucket width in floors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_size: Option<usize>,
}

/// Static name-to-constructor registry. Fails fast on unknown names with no
/// partial state change anywhere.
pub fn build_scheduler(
    name: &str,
    options: &SchedulerOptions,
) -> Result<Box<dyn Scheduler>, SimError> {
    match name.to_ascii_lowercase().as_str() {
        "fcfs" => Ok(Box::new(FirstComeFirstServedScheduler::new())),
        "scan" => Ok(Box::new(ScanScheduler::new())),
        "destination_dispatch" => Ok(Box::new(DestinationDispatchScheduler::new(
            options.cluster_size.unwrap_or(DEFAULT_CLUSTER_SIZE),
        ))),
        _ => Err(SimError::UnknownScheduler {
            name: name.to_string(),
        }),
    }
}
