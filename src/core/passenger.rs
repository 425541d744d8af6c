use serde::{Deserialize, Serialize};

use super::types::{Direction, FloorId, Tick};

/// A rider moving between floors.
///
/// Created when an arrival is generated and mutated exactly twice: once when
/// boarding an elevator and once when alighting at the destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Passenger {
    pub id: u64,
    pub origin: FloorId,
    pub destination: FloorId,
    pub arrival_tick: Tick,
    pub board_tick: Option<Tick>,
    pub alight_tick: Option<Tick>,
}

impl Passenger {
    pub fn new(id: u64, origin: FloorId, destination: FloorId, arrival_tick: Tick) -> Self {
        Self {
            id,
            origin,
            destination,
            arrival_tick,
            board_tick: None,
            alight_tick: None,
        }
    }

    /// +1 for up, -1 for down.
    pub fn direction(&self) -> Direction {
        if self.destination > self.origin {
            1
        } else {
            -1
        }
    }

    pub fn record_boarding(&mut self, tick: Tick) {
        self.board_tick = Some(tick);
    }

    pub fn record_alighting(&mut self, tick: Tick) {
        self.alight_tick = Some(tick);
    }

    /// Ticks spent waiting at the origin floor; `None` until boarded.
    pub fn wait_time(&self) -> Option<Tick> {
        self.board_tick.map(|board| board - self.arrival_tick)
    }

    /// Ticks spent inside the car; `None` until alighted.
    pub fn ride_time(&self) -> Option<Tick> {
        match (self.board_tick, self.alight_tick) {
            (Some(board), Some(alight)) => Some(alight - board),
            _ => None,
        }
    }
}
