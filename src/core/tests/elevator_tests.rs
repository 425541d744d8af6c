use crate::core::constraints::ElevatorConstraints;
use crate::core::elevator::{DoorState, Elevator, ElevatorStatus};
use crate::core::floor::Floor;
use crate::core::metrics::MetricsTracker;
use crate::core::passenger::Passenger;

fn floors(count: usize) -> Vec<Floor> {
    (0..count).map(Floor::new).collect()
}

fn constraints(capacity: usize, dwell: u64) -> ElevatorConstraints {
    ElevatorConstraints::new()
        .with_capacity(capacity)
        .with_cruise_speed(1.0)
        .with_door_dwell(dwell)
}

#[test]
fn stop_handling_runs_on_the_tick_after_doors_open() {
    let mut floors = floors(3);
    floors[0].add_passenger(Passenger::new(0, 0, 2, 0));
    let mut elevator = Elevator::new(0, &constraints(2, 2));
    let mut metrics = MetricsTracker::new();
    elevator.assign_target(0);

    // Tick 0: the stop condition fires, doors open, nothing boards yet.
    elevator.step(&mut floors, 0, &mut metrics);
    assert_eq!(elevator.door_state, DoorState::Opening);
    assert_eq!(elevator.passenger_count(), 0);
    assert_eq!(floors[0].total_waiting(), 1);

    // Tick 1: first open tick performs the boarding side effect.
    elevator.step(&mut floors, 1, &mut metrics);
    assert_eq!(elevator.door_state, DoorState::Open);
    assert_eq!(elevator.passenger_count(), 1);
    assert_eq!(elevator.passengers[0].board_tick, Some(1));
    assert_eq!(elevator.targets, vec![2]);

    // Tick 2: dwell expires, doors close.
    elevator.step(&mut floors, 2, &mut metrics);
    assert_eq!(elevator.door_state, DoorState::Closed);
}

#[test]
fn travels_to_destination_and_discharges() {
    let mut floors = floors(3);
    floors[0].add_passenger(Passenger::new(0, 0, 2, 0));
    let mut elevator = Elevator::new(0, &constraints(2, 1));
    let mut metrics = MetricsTracker::new();
    elevator.assign_target(0);

    for tick in 0..6 {
        elevator.step(&mut floors, tick, &mut metrics);
    }
    // open@0, board@1, move@2 (pos 1), move+arrive@3, alight@4.
    assert_eq!(elevator.passenger_count(), 0);
    assert!(elevator.targets.is_empty());
    assert_eq!(elevator.position, 2.0);
    assert_eq!(metrics.throughput(), 1);
}

#[test]
fn motion_snaps_onto_target_within_one_step() {
    let mut floors = floors(10);
    let mut elevator = Elevator::new(0, &constraints(8, 1));
    let mut metrics = MetricsTracker::new();
    elevator.position = 2.4;
    elevator.assign_target(3);

    elevator.step(&mut floors, 0, &mut metrics);
    assert_eq!(elevator.position, 3.0);
    // Arrival triggers the stop condition immediately.
    assert_eq!(elevator.door_state, DoorState::Opening);
}

#[test]
fn target_assignment_is_idempotent() {
    let mut elevator = Elevator::new(0, &constraints(8, 1));
    elevator.assign_target(5);
    elevator.assign_target(5);
    assert_eq!(elevator.targets, vec![5]);
}

#[test]
fn boarding_respects_capacity_and_fifo_order() {
    let mut floors = floors(6);
    for id in 0..5 {
        floors[0].add_passenger(Passenger::new(id, 0, 5, 0));
    }
    let mut elevator = Elevator::new(0, &constraints(2, 1));
    let mut metrics = MetricsTracker::new();
    elevator.assign_target(0);

    elevator.step(&mut floors, 0, &mut metrics);
    elevator.step(&mut floors, 1, &mut metrics);

    let boarded: Vec<u64> = elevator.passengers.iter().map(|p| p.id).collect();
    assert_eq!(boarded, vec![0, 1]);
    assert_eq!(floors[0].total_waiting(), 3);
    assert_eq!(floors[0].up_queue().front().map(|p| p.id), Some(2));
}

#[test]
fn picks_up_waiting_passengers_when_passing_through() {
    let mut floors = floors(6);
    floors[2].add_passenger(Passenger::new(0, 2, 4, 0));
    let mut elevator = Elevator::new(0, &constraints(8, 1));
    let mut metrics = MetricsTracker::new();
    elevator.assign_target(5);

    // Moves to 1, then 2, where the waiting passenger forces a stop.
    elevator.step(&mut floors, 0, &mut metrics);
    elevator.step(&mut floors, 1, &mut metrics);
    assert_eq!(elevator.position, 2.0);
    assert_eq!(elevator.door_state, DoorState::Opening);

    elevator.step(&mut floors, 2, &mut metrics);
    assert_eq!(elevator.passenger_count(), 1);
    // The pass-through stop keeps the original head and queues the new
    // destination behind it.
    assert_eq!(elevator.targets, vec![5, 4]);
}

#[test]
fn boards_down_queue_when_sweeping_downward() {
    let mut floors = floors(6);
    floors[3].add_passenger(Passenger::new(0, 3, 1, 0));
    let mut elevator = Elevator::new(0, &constraints(8, 1));
    let mut metrics = MetricsTracker::new();
    elevator.position = 5.0;
    elevator.assign_target(0);

    elevator.step(&mut floors, 0, &mut metrics); // pos 4
    elevator.step(&mut floors, 1, &mut metrics); // pos 3, doors open
    elevator.step(&mut floors, 2, &mut metrics); // boards downward rider
    assert_eq!(elevator.passenger_count(), 1);
    assert_eq!(elevator.passengers[0].id, 0);
    assert_eq!(elevator.targets, vec![0, 1]);
}

#[test]
fn fault_clears_targets_and_halts_the_car() {
    let mut floors = floors(6);
    floors[1].add_passenger(Passenger::new(0, 1, 4, 0));
    let mut elevator = Elevator::new(0, &constraints(8, 1));
    let mut metrics = MetricsTracker::new();
    elevator.assign_target(4);

    elevator.trigger_fault();
    assert_eq!(elevator.status, ElevatorStatus::Faulted);
    assert!(elevator.targets.is_empty());
    assert_eq!(elevator.door_state, DoorState::Closed);

    // A faulted car never advances or opens doors, even with waiting floors.
    let before = elevator.position;
    for tick in 0..5 {
        elevator.step(&mut floors, tick, &mut metrics);
    }
    assert_eq!(elevator.position, before);
    assert_eq!(elevator.door_state, DoorState::Closed);
}

#[test]
fn restore_returns_to_service_with_empty_targets() {
    let mut elevator = Elevator::new(0, &constraints(8, 1));
    elevator.assign_target(3);
    elevator.start_maintenance();
    assert_eq!(elevator.status, ElevatorStatus::Maintenance);
    assert!(elevator.targets.is_empty());

    elevator.restore_service();
    assert_eq!(elevator.status, ElevatorStatus::InService);
    assert!(elevator.targets.is_empty());
}

#[test]
fn direction_is_derived_from_head_target() {
    let mut elevator = Elevator::new(0, &constraints(8, 1));
    assert_eq!(elevator.direction(), 0);
    elevator.position = 3.0;
    elevator.assign_target(7);
    assert_eq!(elevator.direction(), 1);
    elevator.targets[0] = 1;
    assert_eq!(elevator.direction(), -1);
    elevator.targets[0] = 3;
    assert_eq!(elevator.direction(), 0);
}
