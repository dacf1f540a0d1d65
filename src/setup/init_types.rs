use serde::{Deserialize, Serialize};

use crate::config::AcoParams;

/// One km entry of the sparse distance table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DistanceEntry {
    pub warehouse: usize,
    pub region: usize,
    pub km: f64,
}

/// Raw, unvalidated instance as it appears on disk. The same schema is fed
/// to the offline LP validator, so small instances can be cross-checked
/// against the exact optimum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInstance {
    pub order_count: usize,
    pub warehouse_count: usize,
    pub region_count: usize,
    pub vehicle_count: usize,
    /// Uniform travel speed in km/h.
    pub vehicle_speed: f64,
    pub distances: Vec<DistanceEntry>,
    pub order_sizes: Vec<f64>,
    pub order_destinations: Vec<usize>,
    pub vehicle_capacities: Vec<f64>,
    /// ACO hyperparameters travel with the instance so a file fully
    /// determines a run; an omitted block falls back to the project defaults.
    #[serde(default)]
    pub params: AcoParams,
}
