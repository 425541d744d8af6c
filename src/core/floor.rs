use std::collections::VecDeque;

use super::passenger::Passenger;
use super::types::{Direction, FloorId};

/// A building level with one FIFO queue per travel direction.
#[derive(Debug, Clone, Default)]
pub struct Floor {
    pub number: FloorId,
    up_queue: VecDeque<Passenger>,
    down_queue: VecDeque<Passenger>,
}

impl Floor {
    pub fn new(number: FloorId) -> Self {
        Self {
            number,
            up_queue: VecDeque::new(),
            down_queue: VecDeque::new(),
        }
    }

    /// Append a passenger to the queue matching their direction.
    pub fn add_passenger(&mut self, passenger: Passenger) {
        if passenger.direction() > 0 {
            self.up_queue.push_back(passenger);
        } else {
            self.down_queue.push_back(passenger);
        }
    }

    pub fn has_waiting(&self) -> bool {
        !self.up_queue.is_empty() || !self.down_queue.is_empty()
    }

    pub fn up_queue(&self) -> &VecDeque<Passenger> {
        &self.up_queue
    }

    pub fn down_queue(&self) -> &VecDeque<Passenger> {
        &self.down_queue
    }

    pub fn queue(&self, direction: Direction) -> &VecDeque<Passenger> {
        if direction > 0 {
            &self.up_queue
        } else {
            &self.down_queue
        }
    }

    /// Pop up to `max` passengers from the front of the directional queue.
    /// Arrival order is preserved.
    pub fn board_passengers(&mut self, direction: Direction, max: usize) -> Vec<Passenger> {
        let queue = if direction > 0 {
            &mut self.up_queue
        } else {
            &mut self.down_queue
        };
        let mut boarded = Vec::new();
        while boarded.len() < max {
            match queue.pop_front() {
                Some(passenger) => boarded.push(passenger),
                None => break,
            }
        }
        boarded
    }

    pub fn total_waiting(&self) -> usize {
        self.up_queue.len() + self.down_queue.len()
    }
}
