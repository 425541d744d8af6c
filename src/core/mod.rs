pub mod building;
pub mod constraints;
pub mod elevator;
pub mod error;
pub mod floor;
pub mod metrics;
pub mod passenger;
pub mod scenario;
pub mod scheduler;
pub mod simulation;
pub mod types;

#[cfg(test)]
mod tests;
