use super::interface::{ElevatorSnapshot, PendingRequest};
use crate::core::types::{Direction, FloorId};

/// Estimate time for an elevator to reach a floor.
///
/// Approximates a trapezoidal velocity profile with symmetric acceleration
/// and deceleration phases. Falls back to distance / speed when no usable
/// acceleration is configured.
pub fn estimate_travel_time(elevator: &ElevatorSnapshot, floor: FloorId) -> f64 {
    let distance = (elevator.position - floor as f64).abs();
    if distance == 0.0 {
        return 0.0;
    }

    if elevator.acceleration <= 0.0 || elevator.cruise_speed <= 0.0 {
        if elevator.cruise_speed > 0.0 {
            return distance / elevator.cruise_speed;
        }
        return f64::INFINITY;
    }

    let time_to_cruise = elevator.cruise_speed / elevator.acceleration;
    let distance_to_cruise = 0.5 * elevator.acceleration * time_to_cruise * time_to_cruise;
    if 2.0 * distance_to_cruise >= distance {
        // Triangular profile: accelerate half-way, then decelerate.
        return 2.0 * (distance / elevator.acceleration).sqrt();
    }

    let cruise_distance = distance - 2.0 * distance_to_cruise;
    2.0 * time_to_cruise + cruise_distance / elevator.cruise_speed
}

/// Sort requests to mirror a one-pass SCAN sweep for the given direction.
pub fn sort_requests_in_direction(requests: &mut Vec<PendingRequest>, direction: Direction) {
    if direction >= 0 {
        requests.sort_by_key(|req| req.origin);
    } else {
        requests.sort_by(|a, b| b.origin.cmp(&a.origin));
    }
}
