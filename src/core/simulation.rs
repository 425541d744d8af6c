use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::building::{Building, BuildingSnapshot};
use super::metrics::{MetricsSnapshot, MetricsTracker};
use super::passenger::Passenger;
use super::types::{ElevatorId, FloorId, Tick};

/// A time-bounded, floor-scoped multiplier on the arrival rate, modeling a
/// rush-hour surge. An optional destination focus funnels every passenger
/// spawned in the window toward one floor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MorningRushWindow {
    #[serde(default)]
    pub start_time: Tick,
    #[serde(default)]
    pub end_time: Tick,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    #[serde(default)]
    pub origin_floor: FloorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_focus: Option<FloorId>,
}

fn default_multiplier() -> f64 {
    1.0
}

impl MorningRushWindow {
    pub fn active(&self, time_step: Tick, origin: FloorId) -> bool {
        self.start_time <= time_step && time_step < self.end_time && origin == self.origin_floor
    }
}

/// Observer for per-tick simulation events. All hooks default to no-ops so
/// implementors only override what they listen to.
pub trait SimulationObserver {
    fn on_arrivals(&mut self, _tick: Tick, _count: usize) {}
    fn on_fault(&mut self, _tick: Tick, _elevator_id: ElevatorId, _reason: Option<&str>) {}
    fn on_maintenance(&mut self, _tick: Tick, _elevator_id: ElevatorId) {}
    fn on_restore(&mut self, _tick: Tick, _elevator_id: ElevatorId) {}
    fn on_metrics(&mut self, _snapshot: &MetricsSnapshot, _building: &BuildingSnapshot) {}
}

/// Draw an arrival count from a Poisson distribution via the multiplicative
/// algorithm: multiply uniform(0,1) draws into `p` until `p <= e^(-lambda)`.
///
/// The draw sequence is part of the replay contract: a given seed and rate
/// must reproduce arrivals bit-for-bit.
pub fn poisson_draw<R: Rng>(rng: &mut R, lambda: f64) -> usize {
    if lambda <= 0.0 {
        return 0;
    }
    let threshold = (-lambda).exp();
    let mut count: usize = 0;
    let mut p = 1.0_f64;
    while p > threshold {
        count += 1;
        p *= rng.gen::<f64>();
    }
    count - 1
}

/// Drives one tick of the world: stochastic arrivals, a dispatch cycle,
/// every elevator's state machine, and metrics emission.
///
/// The driver is single-threaded and fully synchronous. Callers invoking it
/// from several threads must serialize every mutating entry point behind one
/// exclusive lock; the core does no locking of its own.
pub struct Simulation {
    building: Building,
    arrival_rate_per_floor: f64,
    morning_bursts: Vec<MorningRushWindow>,
    rng: StdRng,
    current_time: Tick,
    metrics: MetricsTracker,
    metrics_hook_interval: u64,
    observers: Vec<Box<dyn SimulationObserver>>,
    next_passenger_id: u64,
}

impl Simulation {
    pub fn new(building: Building) -> Self {
        Self {
            building,
            arrival_rate_per_floor: 0.05,
            morning_bursts: Vec::new(),
            rng: StdRng::from_entropy(),
            current_time: 0,
            metrics: MetricsTracker::new(),
            metrics_hook_interval: 1,
            observers: Vec::new(),
            next_passenger_id: 0,
        }
    }

    pub fn with_arrival_rate(mut self, rate_per_floor: f64) -> Self {
        self.arrival_rate_per_floor = rate_per_floor;
        self
    }

    pub fn with_morning_bursts(mut self, bursts: Vec<MorningRushWindow>) -> Self {
        self.morning_bursts = bursts;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_metrics_interval(mut self, interval: u64) -> Self {
        self.metrics_hook_interval = interval.max(1);
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    pub fn building(&self) -> &Building {
        &self.building
    }

    pub fn building_mut(&mut self) -> &mut Building {
        &mut self.building
    }

    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    pub fn current_time(&self) -> Tick {
        self.current_time
    }

    pub fn metrics_hook_interval(&self) -> u64 {
        self.metrics_hook_interval
    }

    pub fn run(&mut self, duration: u64) {
        for _ in 0..duration {
            self.step();
        }
    }

    /// Advance one tick: arrivals, dispatch, elevator motion, metrics.
    pub fn step(&mut self) {
        self.generate_passenger_arrivals();
        self.building.dispatch(self.current_time);
        self.building.step_elevators(self.current_time, &mut self.metrics);

        if self.current_time % self.metrics_hook_interval == 0 {
            self.emit_metrics();
        }

        self.current_time += 1;
    }

    /// Inject a batch of passengers at a floor, e.g. from an external
    /// command. Returns descriptors of the created passengers; an unknown
    /// origin yields an empty batch.
    pub fn spawn_passenger_batch(
        &mut self,
        origin: FloorId,
        count: usize,
        destination: Option<FloorId>,
    ) -> Vec<Passenger> {
        let num_floors = self.building.num_floors();
        if origin >= num_floors || num_floors < 2 {
            return Vec::new();
        }
        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            let chosen = match destination {
                Some(d) if d < num_floors && d != origin => d,
                _ => self.random_destination(origin),
            };
            let passenger =
                Passenger::new(self.next_passenger_id, origin, chosen, self.current_time);
            self.next_passenger_id += 1;
            created.push(passenger.clone());
            self.building.deliver_passenger(passenger);
        }
        info!(
            "spawned {} passengers at floor {} (tick {})",
            created.len(),
            origin,
            self.current_time
        );
        let tick = self.current_time;
        let total = created.len();
        for observer in &mut self.observers {
            observer.on_arrivals(tick, total);
        }
        created
    }

    /// Unknown elevator ids are a no-op.
    pub fn trigger_elevator_fault(&mut self, elevator_id: ElevatorId, reason: Option<&str>) {
        match self.building.get_elevator_mut(elevator_id) {
            Some(elevator) => elevator.trigger_fault(),
            None => return,
        }
        info!(
            "elevator {} faulted at tick {} ({})",
            elevator_id,
            self.current_time,
            reason.unwrap_or("unspecified")
        );
        let tick = self.current_time;
        for observer in &mut self.observers {
            observer.on_fault(tick, elevator_id, reason);
        }
    }

    /// Unknown elevator ids are a no-op.
    pub fn start_maintenance(&mut self, elevator_id: ElevatorId) {
        match self.building.get_elevator_mut(elevator_id) {
            Some(elevator) => elevator.start_maintenance(),
            None => return,
        }
        info!(
            "elevator {} entered maintenance at tick {}",
            elevator_id, self.current_time
        );
        let tick = self.current_time;
        for observer in &mut self.observers {
            observer.on_maintenance(tick, elevator_id);
        }
    }

    /// Unknown elevator ids are a no-op.
    pub fn restore_elevator(&mut self, elevator_id: ElevatorId) {
        match self.building.get_elevator_mut(elevator_id) {
            Some(elevator) => elevator.restore_service(),
            None => return,
        }
        info!(
            "elevator {} restored to service at tick {}",
            elevator_id, self.current_time
        );
        let tick = self.current_time;
        for observer in &mut self.observers {
            observer.on_restore(tick, elevator_id);
        }
    }

    fn generate_passenger_arrivals(&mut self) {
        let num_floors = self.building.num_floors();
        if num_floors < 2 {
            return;
        }
        let mut total = 0;
        for origin in 0..num_floors {
            let multiplier = self.burst_multiplier(origin);
            let lambda = self.arrival_rate_per_floor * multiplier;
            let arrivals = poisson_draw(&mut self.rng, lambda);
            for _ in 0..arrivals {
                let destination = self.choose_destination(origin);
                let passenger = Passenger::new(
                    self.next_passenger_id,
                    origin,
                    destination,
                    self.current_time,
                );
                self.next_passenger_id += 1;
                self.building.deliver_passenger(passenger);
                total += 1;
            }
        }
        if total > 0 {
            debug!("tick {}: {} arrivals", self.current_time, total);
            let tick = self.current_time;
            for observer in &mut self.observers {
                observer.on_arrivals(tick, total);
            }
        }
    }

    fn burst_multiplier(&self, origin: FloorId) -> f64 {
        self.morning_bursts
            .iter()
            .find(|burst| burst.active(self.current_time, origin))
            .map(|burst| burst.multiplier)
            .unwrap_or(1.0)
    }

    /// An active burst with a destination focus pins the destination and
    /// consumes no random draw; otherwise the destination is uniform over
    /// every floor except the origin.
    fn choose_destination(&mut self, origin: FloorId) -> FloorId {
        let focus = self
            .morning_bursts
            .iter()
            .find(|burst| burst.active(self.current_time, origin))
            .and_then(|burst| burst.destination_focus);
        match focus {
            Some(destination) => destination,
            None => self.random_destination(origin),
        }
    }

    fn random_destination(&mut self, origin: FloorId) -> FloorId {
        let num_floors = self.building.num_floors();
        let mut destination = self.rng.gen_range(0..num_floors - 1);
        if destination >= origin {
            destination += 1;
        }
        destination
    }

    fn emit_metrics(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.metrics.snapshot(self.current_time);
        let building = self.building.snapshot();
        for observer in &mut self.observers {
            observer.on_metrics(&snapshot, &building);
        }
    }
}
