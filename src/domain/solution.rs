use serde::Serialize;

use crate::domain::types::RouteKey;

/// One order routed and loaded: order -> warehouse -> region using vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub order: usize,
    pub warehouse: usize,
    pub region: usize,
    pub vehicle: usize,
}

impl Assignment {
    pub fn route(&self) -> RouteKey {
        RouteKey {
            warehouse: self.warehouse,
            region: self.region,
        }
    }
}

/// A completed feasible construction. Immutable once built; `total_cost` is
/// the sum of the assigned routes' travel times in hours.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub assignments: Vec<Assignment>,
    pub total_cost: f64,
}
