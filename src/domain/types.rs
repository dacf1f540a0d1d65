use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A (warehouse, region) delivery lane. One travel time and one pheromone
/// level exist per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    pub warehouse: usize,
    pub region: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order {
    pub id: usize,
    pub size: f64,
    pub destination: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vehicle {
    pub id: usize,
    pub capacity: f64,
}

/// Static, validated input for one optimization run. Built once by
/// `setup::init::setup` and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInstance {
    pub orders: Vec<Order>,
    pub vehicles: Vec<Vehicle>,
    /// Travel time in hours per existing route.
    pub travel_times: HashMap<RouteKey, f64>,
    /// Routes serving each region, sorted by warehouse id so candidate
    /// iteration order is deterministic.
    pub candidates_by_region: Vec<Vec<RouteKey>>,
}

impl ProblemInstance {
    /// Travel time for a route that exists in the instance. Setup guarantees
    /// an entry for every candidate route, so a plain lookup is safe here.
    pub fn travel_time(&self, route: RouteKey) -> f64 {
        self.travel_times[&route]
    }

    pub fn routes(&self) -> impl Iterator<Item = RouteKey> + '_ {
        self.travel_times.keys().copied()
    }

    pub fn candidate_routes(&self, region: usize) -> &[RouteKey] {
        &self.candidates_by_region[region]
    }
}
