pub type ElevatorId = usize;
pub type FloorId = usize;
pub type Tick = u64;

/// Travel direction: +1 up, -1 down, 0 idle.
pub type Direction = i32;
