use thiserror::Error;

/// Fatal instance-validation failures. The run stops before any iteration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error("instance is malformed: {0}")]
    InvalidInstance(String),

    #[error("route from warehouse {warehouse} to region {region} has invalid travel time {hours} h")]
    InvalidTravelTime {
        warehouse: usize,
        region: usize,
        hours: f64,
    },

    #[error("region {region} (destination of order {order}) has no serving route")]
    EmptyCandidateSet { order: usize, region: usize },
}

/// Recoverable failure of a single construction attempt. The search loop
/// discards the attempt and keeps going with the remaining ants.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("no vehicle has remaining capacity for order {order}")]
    CapacityExhausted { order: usize },
}
