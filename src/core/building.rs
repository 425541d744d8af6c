use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::constraints::ElevatorConstraints;
use super::elevator::{DoorState, Elevator, ElevatorStatus};
use super::error::SimError;
use super::floor::Floor;
use super::metrics::MetricsTracker;
use super::passenger::Passenger;
use super::scheduler::{
    build_scheduler, ElevatorSnapshot, PendingRequest, Scheduler, SchedulerOptions,
};
use super::types::{ElevatorId, FloorId, Tick};

/// Serializable point-in-time view of the whole building.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildingSnapshot {
    /// Waiting passenger count per floor.
    pub floors: Vec<usize>,
    pub elevators: Vec<ElevatorInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElevatorInfo {
    pub id: ElevatorId,
    pub position: f64,
    pub targets: Vec<FloorId>,
    pub door_state: DoorState,
    pub status: ElevatorStatus,
    pub passenger_count: usize,
}

/// Owns the floors and elevators, and turns floor queues into scheduler
/// requests once per dispatch cycle.
pub struct Building {
    num_floors: usize,
    floors: Vec<Floor>,
    elevators: Vec<Elevator>,
    constraints: ElevatorConstraints,
    scheduler: Box<dyn Scheduler>,
}

impl Building {
    pub fn new(
        num_floors: usize,
        elevator_count: usize,
        constraints: ElevatorConstraints,
        scheduler_name: &str,
        scheduler_options: &SchedulerOptions,
    ) -> Result<Self, SimError> {
        let scheduler = build_scheduler(scheduler_name, scheduler_options)?;
        let floors = (0..num_floors).map(Floor::new).collect();
        let elevators = (0..elevator_count)
            .map(|id| Elevator::new(id, &constraints))
            .collect();
        Ok(Self {
            num_floors,
            floors,
            elevators,
            constraints,
            scheduler,
        })
    }

    pub fn num_floors(&self) -> usize {
        self.num_floors
    }

    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn scheduler_name(&self) -> &'static str {
        self.scheduler.name()
    }

    /// Floors outside `[0, num_floors)` are treated as absent.
    pub fn get_floor(&self, floor_number: i64) -> Option<&Floor> {
        if floor_number < 0 {
            return None;
        }
        self.floors.get(floor_number as usize)
    }

    pub fn get_floor_mut(&mut self, floor_number: i64) -> Option<&mut Floor> {
        if floor_number < 0 {
            return None;
        }
        self.floors.get_mut(floor_number as usize)
    }

    pub fn get_elevator_mut(&mut self, elevator_id: ElevatorId) -> Option<&mut Elevator> {
        self.elevators.iter_mut().find(|e| e.id == elevator_id)
    }

    /// Swap the active strategy. The new scheduler is built before any state
    /// changes, so an unknown name leaves the building untouched.
    pub fn set_scheduler(
        &mut self,
        name: &str,
        options: &SchedulerOptions,
    ) -> Result<(), SimError> {
        let scheduler = build_scheduler(name, options)?;
        info!("scheduler changed to '{}'", scheduler.name());
        self.scheduler = scheduler;
        self.push_constraints();
        Ok(())
    }

    pub fn set_constraints(&mut self, constraints: ElevatorConstraints) {
        self.constraints = constraints;
        self.push_constraints();
    }

    fn push_constraints(&mut self) {
        for elevator in &mut self.elevators {
            elevator.apply_constraints(&self.constraints);
        }
    }

    /// One dispatch cycle: collect hall calls, snapshot the in-service cars,
    /// run the active strategy once, and append the returned targets.
    pub fn dispatch(&mut self, current_time: Tick) {
        let requests = self.collect_requests();
        if requests.is_empty() {
            return;
        }
        let snapshots: Vec<ElevatorSnapshot> = self
            .elevators
            .iter()
            .filter(|e| e.in_service())
            .map(ElevatorSnapshot::of)
            .collect();
        let assignments = self.scheduler.select_calls(&snapshots, &requests);
        debug!(
            "tick {}: {} pending requests, {} elevators assigned",
            current_time,
            requests.len(),
            assignments.len()
        );
        for (elevator_id, targets) in assignments {
            if let Some(elevator) = self.get_elevator_mut(elevator_id) {
                for target in targets {
                    elevator.assign_target(target);
                }
            }
        }
    }

    /// One request per non-empty directional queue, carrying the queue
    /// head's arrival tick and the full destination list.
    fn collect_requests(&self) -> Vec<PendingRequest> {
        let mut requests = Vec::new();
        for floor in &self.floors {
            for direction in [1, -1] {
                let queue = floor.queue(direction);
                if let Some(front) = queue.front() {
                    requests.push(PendingRequest {
                        origin: floor.number,
                        direction,
                        requested_at: front.arrival_tick,
                        passenger_count: queue.len(),
                        destinations: queue.iter().map(|p| p.destination).collect(),
                    });
                }
            }
        }
        requests
    }

    /// Advance every elevator by one tick.
    pub fn step_elevators(&mut self, current_time: Tick, metrics: &mut MetricsTracker) {
        let floors = self.floors.as_mut_slice();
        for elevator in &mut self.elevators {
            elevator.step(&mut *floors, current_time, metrics);
        }
    }

    /// Deliver a passenger to their origin floor's queue. Returns false when
    /// the floor does not exist.
    pub fn deliver_passenger(&mut self, passenger: Passenger) -> bool {
        match self.floors.get_mut(passenger.origin) {
            Some(floor) => {
                floor.add_passenger(passenger);
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> BuildingSnapshot {
        BuildingSnapshot {
            floors: self.floors.iter().map(Floor::total_waiting).collect(),
            elevators: self
                .elevators
                .iter()
                .map(|elevator| ElevatorInfo {
                    id: elevator.id,
                    position: elevator.position,
                    targets: elevator.targets.clone(),
                    door_state: elevator.door_state,
                    status: elevator.status,
                    passenger_count: elevator.passenger_count(),
                })
                .collect(),
        }
    }
}
