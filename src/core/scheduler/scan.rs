use super::interface::{Assignments, ElevatorSnapshot, PendingRequest, Scheduler};
use super::utils::{estimate_travel_time, sort_requests_in_direction};

/// The classic elevator (SCAN) algorithm: each car sweeps in its current
/// direction, picking up calls that lie on or ahead of its position, and
/// leftovers go to the closest car with room.
#[derive(Debug, Default)]
pub struct ScanScheduler;

impl ScanScheduler {
    pub fn new() -> Self {
        Self
    }

    fn is_in_path(elevator: &ElevatorSnapshot, request: &PendingRequest) -> bool {
        if elevator.direction == 0 {
            return true;
        }
        let origin = request.origin as f64;
        (elevator.direction > 0 && origin >= elevator.position)
            || (elevator.direction < 0 && origin <= elevator.position)
    }

    fn closest_elevator(
        elevators: &[ElevatorSnapshot],
        request: &PendingRequest,
    ) -> Option<usize> {
        let mut feasible: Vec<usize> = elevators
            .iter()
            .enumerate()
            .filter(|(_, e)| e.available_capacity() > 0)
            .map(|(i, _)| i)
            .collect();
        if feasible.is_empty() {
            return None;
        }
        feasible.sort_by(|&a, &b| {
            let ea = &elevators[a];
            let eb = &elevators[b];
            (estimate_travel_time(ea, request.origin) + ea.door_dwell as f64)
                .total_cmp(&(estimate_travel_time(eb, request.origin) + eb.door_dwell as f64))
                .then(
                    (ea.direction - request.direction)
                        .abs()
                        .cmp(&(eb.direction - request.direction).abs()),
                )
        });
        feasible.first().copied()
    }
}

impl Scheduler for ScanScheduler {
    fn select_calls(
        &self,
        elevator_state: &[ElevatorSnapshot],
        pending_requests: &[PendingRequest],
    ) -> Assignments {
        let mut assignments = Assignments::new();
        let mut requests: Vec<PendingRequest> = pending_requests.to_vec();

        // Sweep pass: each elevator claims the calls along its direction of
        // travel. The capacity gate reads the cycle-start snapshot value and
        // does not decrement as calls are tentatively added.
        for elevator in elevator_state {
            let direction = if elevator.direction == 0 {
                1
            } else {
                elevator.direction
            };
            let mut in_path: Vec<PendingRequest> = requests
                .iter()
                .filter(|req| Self::is_in_path(elevator, req))
                .cloned()
                .collect();
            sort_requests_in_direction(&mut in_path, direction);

            for request in in_path {
                if elevator.available_capacity() == 0 {
                    break;
                }
                assignments
                    .entry(elevator.elevator_id)
                    .or_default()
                    .push(request.origin);
                if let Some(index) = requests.iter().position(|req| *req == request) {
                    requests.remove(index);
                }
            }
        }

        // Fallback pass: whatever no sweep claimed goes to the closest car
        // that still shows room.
        for request in &requests {
            let chosen = match Self::closest_elevator(elevator_state, request) {
                Some(index) => index,
                None => continue,
            };
            assignments
                .entry(elevator_state[chosen].elevator_id)
                .or_default()
                .push(request.origin);
        }
        assignments
    }

    fn name(&self) -> &'static str {
        "scan"
    }
}
