use serde::{Deserialize, Serialize};

use super::constraints::ElevatorConstraints;
use super::floor::Floor;
use super::metrics::MetricsTracker;
use super::passenger::Passenger;
use super::types::{Direction, ElevatorId, FloorId, Tick};

/// Door phase of the per-tick state machine.
///
/// `Opening` is the armed state entered when a stop condition fires: the
/// doors are ajar but the stop side effects (alighting, boarding, target
/// bookkeeping) run on the next tick, when the state advances to `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorState {
    Closed,
    Opening,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevatorStatus {
    InService,
    Faulted,
    Maintenance,
}

/// A single car: position, door state machine, target list and manifest.
#[derive(Debug, Clone)]
pub struct Elevator {
    pub id: ElevatorId,
    pub capacity: usize,
    pub cruise_speed: f64,
    pub acceleration: f64,
    pub door_dwell: u64,
    pub position: f64,
    pub targets: Vec<FloorId>,
    pub passengers: Vec<Passenger>,
    pub status: ElevatorStatus,
    pub door_state: DoorState,
    door_timer: u64,
}

impl Elevator {
    pub fn new(id: ElevatorId, constraints: &ElevatorConstraints) -> Self {
        Self {
            id,
            capacity: constraints.capacity,
            cruise_speed: constraints.cruise_speed_floors_per_tick,
            acceleration: constraints.acceleration_floors_per_tick2,
            door_dwell: constraints.door_dwell_ticks,
            position: 0.0,
            targets: Vec::new(),
            passengers: Vec::new(),
            status: ElevatorStatus::InService,
            door_state: DoorState::Closed,
            door_timer: 0,
        }
    }

    pub fn apply_constraints(&mut self, constraints: &ElevatorConstraints) {
        self.capacity = constraints.capacity;
        self.cruise_speed = constraints.cruise_speed_floors_per_tick;
        self.acceleration = constraints.acceleration_floors_per_tick2;
        self.door_dwell = constraints.door_dwell_ticks;
    }

    pub fn in_service(&self) -> bool {
        self.status == ElevatorStatus::InService
    }

    /// Derived, never stored: 0 with no target, otherwise the sign of
    /// (next target - position).
    pub fn direction(&self) -> Direction {
        match self.targets.first() {
            None => 0,
            Some(&target) => {
                let target = target as f64;
                if self.position < target {
                    1
                } else if self.position > target {
                    -1
                } else {
                    0
                }
            }
        }
    }

    /// Append a target floor, skipping duplicates.
    pub fn assign_target(&mut self, floor: FloorId) {
        if !self.targets.contains(&floor) {
            self.targets.push(floor);
        }
    }

    pub fn current_floor(&self) -> i64 {
        self.position.round() as i64
    }

    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    /// Advance the door/motion state machine by one tick.
    pub fn step(&mut self, floors: &mut [Floor], current_time: Tick, metrics: &mut MetricsTracker) {
        if !self.in_service() {
            return;
        }

        match self.door_state {
            DoorState::Opening => {
                self.handle_stop(floors, current_time, metrics);
                self.door_state = DoorState::Open;
                self.tick_door_timer();
            }
            DoorState::Open => {
                self.tick_door_timer();
            }
            DoorState::Closed => {
                if self.should_stop_here(floors) {
                    self.open_doors();
                    return;
                }
                self.move_towards_target();
                if self.should_stop_here(floors) {
                    self.open_doors();
                }
            }
        }
    }

    fn tick_door_timer(&mut self) {
        self.door_timer = self.door_timer.saturating_sub(1);
        if self.door_timer == 0 {
            self.door_state = DoorState::Closed;
        }
    }

    fn open_doors(&mut self) {
        self.door_state = DoorState::Opening;
        self.door_timer = self.door_dwell.max(1);
    }

    fn should_stop_here(&self, floors: &[Floor]) -> bool {
        let at = self.current_floor();
        if at < 0 {
            return false;
        }
        let at_floor = at as FloorId;
        if self.targets.first() == Some(&at_floor) {
            return true;
        }
        let floor = match floors.get(at_floor) {
            Some(floor) => floor,
            None => return false,
        };
        floor.has_waiting() || self.passengers.iter().any(|p| p.destination == at_floor)
    }

    /// One tick of cruise motion toward the head target, snapping exactly
    /// onto it when within a single step. The head is popped by the stop
    /// handler, not here.
    fn move_towards_target(&mut self) {
        let target = match self.targets.first() {
            Some(&target) => target as f64,
            None => return,
        };
        if (self.position - target).abs() <= self.cruise_speed {
            self.position = target;
        } else if self.position < target {
            self.position += self.cruise_speed;
        } else {
            self.position -= self.cruise_speed;
        }
    }

    /// Stop side effects, run on the first tick of an open period:
    /// alight, board, pop the serviced head target, queue new destinations.
    fn handle_stop(&mut self, floors: &mut [Floor], current_time: Tick, metrics: &mut MetricsTracker) {
        let at = self.current_floor();
        if at < 0 {
            return;
        }
        let floor_number = at as FloorId;
        let floor = match floors.get_mut(floor_number) {
            Some(floor) => floor,
            None => return,
        };

        // Alight first so boarding sees the freed capacity.
        let mut remaining = Vec::with_capacity(self.passengers.len());
        for mut passenger in std::mem::take(&mut self.passengers) {
            if passenger.destination == floor_number {
                passenger.record_alighting(current_time);
                metrics.record_ride_time(&passenger);
            } else {
                remaining.push(passenger);
            }
        }
        self.passengers = remaining;

        // Board in the current direction; idle cars take the up queue.
        let free_space = self.capacity.saturating_sub(self.passengers.len());
        let direction = match self.direction() {
            0 => 1,
            d => d,
        };
        let mut boarded = floor.board_passengers(direction, free_space);
        for passenger in boarded.iter_mut() {
            passenger.record_boarding(current_time);
            metrics.record_wait_time(passenger);
        }

        if self.targets.first() == Some(&floor_number) {
            self.targets.remove(0);
        }
        for passenger in &boarded {
            if !self.targets.contains(&passenger.destination) {
                self.targets.push(passenger.destination);
            }
        }
        self.passengers.extend(boarded);
    }

    pub fn trigger_fault(&mut self) {
        self.status = ElevatorStatus::Faulted;
        self.take_out_of_service();
    }

    pub fn start_maintenance(&mut self) {
        self.status = ElevatorStatus::Maintenance;
        self.take_out_of_service();
    }

    /// Return to service; the target list stays as it was (empty after a
    /// fault or maintenance).
    pub fn restore_service(&mut self) {
        self.status = ElevatorStatus::InService;
    }

    fn take_out_of_service(&mut self) {
        self.targets.clear();
        self.door_state = DoorState::Closed;
        self.door_timer = 0;
    }
}
