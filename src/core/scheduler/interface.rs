use std::collections::BTreeMap;

use crate::core::elevator::Elevator;
use crate::core::types::{Direction, ElevatorId, FloorId, Tick};

/// Immutable view of an elevator used for scheduling decisions.
///
/// Constructed fresh each dispatch cycle; schedulers never mutate the real
/// entity through it.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevatorSnapshot {
    pub elevator_id: ElevatorId,
    pub position: f64,
    pub direction: Direction,
    pub targets: Vec<FloorId>,
    pub load: usize,
    pub capacity: usize,
    pub cruise_speed: f64,
    pub acceleration: f64,
    pub door_dwell: u64,
}

impl ElevatorSnapshot {
    pub fn of(elevator: &Elevator) -> Self {
        Self {
            elevator_id: elevator.id,
            position: elevator.position,
            direction: elevator.direction(),
            targets: elevator.targets.clone(),
            load: elevator.passenger_count(),
            capacity: elevator.capacity,
            cruise_speed: elevator.cruise_speed,
            acceleration: elevator.acceleration,
            door_dwell: elevator.door_dwell,
        }
    }

    pub fn available_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.load)
    }
}

/// One unsatisfied directional hall call, aggregating every passenger
/// currently waiting at a floor in that direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub origin: FloorId,
    pub direction: Direction,
    /// Earliest arrival tick among the waiting passengers.
    pub requested_at: Tick,
    pub passenger_count: usize,
    pub destinations: Vec<FloorId>,
}

/// Elevator-to-targets assignment produced by one dispatch cycle.
///
/// A `BTreeMap` keeps iteration over assignments deterministic.
pub type Assignments = BTreeMap<ElevatorId, Vec<FloorId>>;

/// Strategy contract for dispatching elevators to hall calls.
///
/// Implementations are pure with respect to their inputs (tunables are fixed
/// at construction), may assign zero or many targets per elevator, and may
/// leave requests unserved when no car has capacity. Unserved requests are
/// re-offered next cycle because floor queues are only consumed on boarding.
pub trait Scheduler {
    fn select_calls(
        &self,
        elevator_state: &[ElevatorSnapshot],
        pending_requests: &[PendingRequest],
    ) -> Assignments;

    /// Registry name of this strategy.
    fn name(&self) -> &'static str;
}
