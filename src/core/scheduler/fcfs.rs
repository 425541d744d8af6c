use super::interface::{Assignments, ElevatorSnapshot, PendingRequest, Scheduler};
use super::utils::estimate_travel_time;

/// Serves the oldest outstanding hall calls first.
///
/// Within one cycle the chosen elevator's snapshot is replaced by an updated
/// value copy (target appended, load bumped), so later requests in the same
/// cycle see the tentatively committed state.
#[derive(Debug, Default)]
pub struct FirstComeFirstServedScheduler;

impl FirstComeFirstServedScheduler {
    pub fn new() -> Self {
        Self
    }

    fn choose_elevator(
        elevators: &[ElevatorSnapshot],
        request: &PendingRequest,
    ) -> Option<usize> {
        let mut candidates: Vec<usize> = elevators
            .iter()
            .enumerate()
            .filter(|(_, e)| e.available_capacity() >= request.passenger_count)
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            candidates = elevators
                .iter()
                .enumerate()
                .filter(|(_, e)| e.available_capacity() > 0)
                .map(|(i, _)| i)
                .collect();
        }
        if candidates.is_empty() {
            return None;
        }
        // Strict lexicographic tie-break; the sort is stable, so equal keys
        // resolve to the lowest snapshot index.
        candidates.sort_by(|&a, &b| {
            let ea = &elevators[a];
            let eb = &elevators[b];
            estimate_travel_time(ea, request.origin)
                .total_cmp(&estimate_travel_time(eb, request.origin))
                .then(ea.targets.len().cmp(&eb.targets.len()))
                .then(
                    (ea.direction - request.direction)
                        .abs()
                        .cmp(&(eb.direction - request.direction).abs()),
                )
        });
        candidates.first().copied()
    }

    fn commit(elevator: &mut ElevatorSnapshot, request: &PendingRequest) {
        if !elevator.targets.contains(&request.origin) {
            elevator.targets.push(request.origin);
        }
        elevator.load += request.passenger_count;
    }
}

impl Scheduler for FirstComeFirstServedScheduler {
    fn select_calls(
        &self,
        elevator_state: &[ElevatorSnapshot],
        pending_requests: &[PendingRequest],
    ) -> Assignments {
        let mut assignments = Assignments::new();
        let mut elevators = elevator_state.to_vec();
        let mut open_requests: Vec<&PendingRequest> = pending_requests.iter().collect();
        open_requests.sort_by_key(|req| req.requested_at);

        for request in open_requests {
            let chosen = match Self::choose_elevator(&elevators, request) {
                Some(index) => index,
                None => continue,
            };
            assignments
                .entry(elevators[chosen].elevator_id)
                .or_default()
                .push(request.origin);
            Self::commit(&mut elevators[chosen], request);
        }
        assignments
    }

    fn name(&self) -> &'static str {
        "fcfs"
    }
}
