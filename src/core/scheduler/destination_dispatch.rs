use std::collections::BTreeMap;

use super::interface::{Assignments, ElevatorSnapshot, PendingRequest, Scheduler};
use super::utils::estimate_travel_time;
use crate::core::types::FloorId;

/// Destination dispatch: requests are bucketed by destination centroid so
/// riders bound for nearby floors share a car, and likely destination stops
/// are pre-seeded onto the chosen car to cut the stop count.
#[derive(Debug)]
pub struct DestinationDispatchScheduler {
    cluster_size: usize,
}

impl DestinationDispatchScheduler {
    pub fn new(cluster_size: usize) -> Self {
        Self {
            cluster_size: cluster_size.max(1),
        }
    }

    /// Bucket key: floor(mean(destinations) / cluster_size), 0 when the
    /// request carries no destinations.
    fn destination_bucket(&self, destinations: &[FloorId]) -> usize {
        if destinations.is_empty() {
            return 0;
        }
        let focus = destinations.iter().sum::<usize>() / destinations.len();
        focus / self.cluster_size
    }

    fn cluster_requests<'a>(
        &self,
        pending_requests: &'a [PendingRequest],
    ) -> BTreeMap<usize, Vec<&'a PendingRequest>> {
        let mut buckets: BTreeMap<usize, Vec<&PendingRequest>> = BTreeMap::new();
        for request in pending_requests {
            buckets
                .entry(self.destination_bucket(&request.destinations))
                .or_default()
                .push(request);
        }
        buckets
    }

    /// Collapse a request's destinations into one stop per run of floors
    /// closer together than the cluster size.
    fn cluster_destinations(&self, destinations: &[FloorId]) -> Vec<FloorId> {
        if destinations.is_empty() {
            return Vec::new();
        }
        let mut unique: Vec<FloorId> = destinations.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let mut clustered = Vec::new();
        let mut run: Vec<FloorId> = Vec::new();
        for destination in unique {
            if run.is_empty() || destination - run[0] < self.cluster_size {
                run.push(destination);
            } else {
                clustered.push(run.iter().sum::<usize>() / run.len());
                run = vec![destination];
            }
        }
        if !run.is_empty() {
            clustered.push(run.iter().sum::<usize>() / run.len());
        }
        clustered
    }

    fn best_elevator(
        elevators: &[ElevatorSnapshot],
        requests: &[&PendingRequest],
    ) -> Option<usize> {
        if requests.is_empty() {
            return None;
        }
        let required_capacity: usize = requests.iter().map(|req| req.passenger_count).sum();
        let mut feasible: Vec<usize> = elevators
            .iter()
            .enumerate()
            .filter(|(_, e)| e.available_capacity() >= required_capacity)
            .map(|(i, _)| i)
            .collect();
        if feasible.is_empty() {
            feasible = elevators
                .iter()
                .enumerate()
                .filter(|(_, e)| e.available_capacity() > 0)
                .map(|(i, _)| i)
                .collect();
        }
        if feasible.is_empty() {
            return None;
        }
        let centroid_floor = requests.iter().map(|req| req.origin).sum::<usize>() / requests.len();
        feasible.sort_by(|&a, &b| {
            let ea = &elevators[a];
            let eb = &elevators[b];
            (estimate_travel_time(ea, centroid_floor) + ea.door_dwell as f64)
                .total_cmp(&(estimate_travel_time(eb, centroid_floor) + eb.door_dwell as f64))
                .then(ea.targets.len().cmp(&eb.targets.len()))
        });
        feasible.first().copied()
    }
}

impl Scheduler for DestinationDispatchScheduler {
    fn select_calls(
        &self,
        elevator_state: &[ElevatorSnapshot],
        pending_requests: &[PendingRequest],
    ) -> Assignments {
        let mut assignments = Assignments::new();

        for grouped_requests in self.cluster_requests(pending_requests).values() {
            let chosen = match Self::best_elevator(elevator_state, grouped_requests) {
                Some(index) => index,
                None => continue,
            };
            let targets = assignments
                .entry(elevator_state[chosen].elevator_id)
                .or_default();
            for request in grouped_requests {
                if !targets.contains(&request.origin) {
                    targets.push(request.origin);
                }
                for destination in self.cluster_destinations(&request.destinations) {
                    if !targets.contains(&destination) {
                        targets.push(destination);
                    }
                }
            }
        }
        assignments
    }

    fn name(&self) -> &'static str {
        "destination_dispatch"
    }
}
