use std::error::Error;
use std::fmt;

use super::scheduler::SCHEDULER_NAMES;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A scheduler name that is not in the registry was requested.
    UnknownScheduler { name: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnknownScheduler { name } => write!(
                f,
                "unknown scheduler '{}'. Available: {}",
                name,
                SCHEDULER_NAMES.join(", ")
            ),
        }
    }
}

impl Error for SimError {}
