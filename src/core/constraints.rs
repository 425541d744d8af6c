use serde::{Deserialize, Serialize};

/// Physical constraints shared by every elevator in a building.
///
/// Pushed onto the cars whenever the constraints or the scheduler are
/// (re)configured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElevatorConstraints {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_cruise_speed")]
    pub cruise_speed_floors_per_tick: f64,
    #[serde(default)]
    pub acceleration_floors_per_tick2: f64,
    #[serde(default = "default_door_dwell")]
    pub door_dwell_ticks: u64,
}

fn default_capacity() -> usize {
    8
}

fn default_cruise_speed() -> f64 {
    1.0
}

fn default_door_dwell() -> u64 {
    1
}

impl ElevatorConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_cruise_speed(mut self, floors_per_tick: f64) -> Self {
        self.cruise_speed_floors_per_tick = floors_per_tick;
        self
    }

    pub fn with_acceleration(mut self, floors_per_tick2: f64) -> Self {
        self.acceleration_floors_per_tick2 = floors_per_tick2;
        self
    }

    pub fn with_door_dwell(mut self, ticks: u64) -> Self {
        self.door_dwell_ticks = ticks;
        self
    }
}

impl Default for ElevatorConstraints {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            cruise_speed_floors_per_tick: default_cruise_speed(),
            acceleration_floors_per_tick2: 0.0,
            door_dwell_ticks: default_door_dwell(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constraints() {
        let constraints = ElevatorConstraints::default();
        assert_eq!(constraints.capacity, 8);
        assert_eq!(constraints.cruise_speed_floors_per_tick, 1.0);
        assert_eq!(constraints.acceleration_floors_per_tick2, 0.0);
        assert_eq!(constraints.door_dwell_ticks, 1);
    }

    #[test]
    fn test_constraints_builder() {
        let constraints = ElevatorConstraints::new()
            .with_capacity(12)
            .with_cruise_speed(2.0)
            .with_acceleration(0.5)
            .with_door_dwell(3);
        assert_eq!(constraints.capacity, 12);
        assert_eq!(constraints.cruise_speed_floors_per_tick, 2.0);
        assert_eq!(constraints.acceleration_floors_per_tick2, 0.5);
        assert_eq!(constraints.door_dwell_ticks, 3);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let constraints: ElevatorConstraints = serde_json::from_str("{\"capacity\": 4}").unwrap();
        assert_eq!(constraints.capacity, 4);
        assert_eq!(constraints.cruise_speed_floors_per_tick, 1.0);
        assert_eq!(constraints.door_dwell_ticks, 1);
    }
}
