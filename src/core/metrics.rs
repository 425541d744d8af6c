use serde::{Deserialize, Serialize};

use super::passenger::Passenger;
use super::types::Tick;

/// Point-in-time summary of accumulated wait/ride samples and throughput.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsSnapshot {
    pub time_step: Tick,
    pub average_wait: f64,
    pub wait_p95: f64,
    pub average_ride: f64,
    pub ride_p95: f64,
    pub throughput: u64,
}

/// Accumulates raw wait and ride samples as boarding/alighting events occur.
///
/// Samples are never evicted; the tracker grows for the lifetime of the
/// simulation. Throughput counts only passengers that have alighted.
#[derive(Debug, Clone, Default)]
pub struct MetricsTracker {
    wait_times: Vec<Tick>,
    ride_times: Vec<Tick>,
    throughput: u64,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_wait_time(&mut self, passenger: &Passenger) {
        if let Some(wait) = passenger.wait_time() {
            self.wait_times.push(wait);
        }
    }

    pub fn record_ride_time(&mut self, passenger: &Passenger) {
        if let Some(ride) = passenger.ride_time() {
            self.ride_times.push(ride);
            self.throughput += 1;
        }
    }

    pub fn throughput(&self) -> u64 {
        self.throughput
    }

    pub fn snapshot(&self, time_step: Tick) -> MetricsSnapshot {
        MetricsSnapshot {
            time_step,
            average_wait: average(&self.wait_times),
            wait_p95: percentile(&self.wait_times, 0.95),
            average_ride: average(&self.ride_times),
            ride_p95: percentile(&self.ride_times, 0.95),
            throughput: self.throughput,
        }
    }
}

fn average(values: &[Tick]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<u64>() as f64 / values.len() as f64
}

/// Nearest-rank percentile with linear interpolation between order statistics.
fn percentile(values: &[Tick], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let k = (sorted.len() - 1) as f64 * q;
    let lower = k.floor() as usize;
    let upper = k.ceil() as usize;
    if lower == upper {
        return sorted[lower] as f64;
    }
    let d0 = sorted[lower] as f64 * (upper as f64 - k);
    let d1 = sorted[upper] as f64 * (k - lower as f64);
    d0 + d1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boarded(arrival: Tick, board: Tick) -> Passenger {
        let mut passenger = Passenger::new(0, 0, 5, arrival);
        passenger.record_boarding(board);
        passenger
    }

    #[test]
    fn empty_tracker_snapshots_zeroes() {
        let snapshot = MetricsTracker::new().snapshot(7);
        assert_eq!(snapshot.time_step, 7);
        assert_eq!(snapshot.average_wait, 0.0);
        assert_eq!(snapshot.wait_p95, 0.0);
        assert_eq!(snapshot.throughput, 0);
    }

    #[test]
    fn unboarded_passengers_record_nothing() {
        let mut tracker = MetricsTracker::new();
        tracker.record_wait_time(&Passenger::new(0, 0, 5, 0));
        tracker.record_ride_time(&Passenger::new(1, 0, 5, 0));
        let snapshot = tracker.snapshot(0);
        assert_eq!(snapshot.average_wait, 0.0);
        assert_eq!(snapshot.throughput, 0);
    }

    #[test]
    fn throughput_counts_completed_rides_only() {
        let mut tracker = MetricsTracker::new();
        let mut rider = boarded(0, 2);
        tracker.record_wait_time(&rider);
        assert_eq!(tracker.throughput(), 0);
        rider.record_alighting(9);
        tracker.record_ride_time(&rider);
        assert_eq!(tracker.throughput(), 1);
    }

    #[test]
    fn percentile_interpolates_between_ranks() {
        // k = (2 - 1) * 0.95 = 0.95 between 0 and 10 -> 9.5
        assert_eq!(percentile(&[0, 10], 0.95), 9.5);
        // 1..=100: k = 94.05, interpolates 95 and 96 -> 95.05
        let values: Vec<Tick> = (1..=100).collect();
        let p95 = percentile(&values, 0.95);
        assert!((p95 - 95.05).abs() < 1e-9);
    }

    #[test]
    fn average_wait_reflects_samples() {
        let mut tracker = MetricsTracker::new();
        tracker.record_wait_time(&boarded(0, 2));
        tracker.record_wait_time(&boarded(0, 4));
        let snapshot = tracker.snapshot(5);
        assert_eq!(snapshot.average_wait, 3.0);
    }
}
