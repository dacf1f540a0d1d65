use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::AcoParams;
use crate::domain::solution::{Assignment, Solution};
use crate::domain::types::{ProblemInstance, RouteKey, Vehicle};
use crate::error::ConstructionError;
use crate::solver::aco::pheromone::{HeuristicMatrix, PheromoneMatrix};

/// Running per-vehicle load for a single construction. Created fresh per
/// attempt; every attempt models a full, independent dispatch plan.
#[derive(Debug)]
pub struct CapacityTracker {
    loads: Vec<f64>,
}

impl CapacityTracker {
    pub fn new(vehicle_count: usize) -> Self {
        CapacityTracker {
            loads: vec![0.0; vehicle_count],
        }
    }

    /// First-fit scan in ascending vehicle index: takes the first vehicle
    /// whose tracked load still has room for `size` and charges it. This is
    /// a feasibility check, not an optimization; no combinations are tried.
    pub fn first_fit(&mut self, vehicles: &[Vehicle], size: f64) -> Option<usize> {
        for vehicle in vehicles {
            if self.loads[vehicle.id] + size <= vehicle.capacity {
                self.loads[vehicle.id] += size;
                return Some(vehicle.id);
            }
        }
        None
    }

    pub fn load(&self, vehicle: usize) -> f64 {
        self.loads[vehicle]
    }
}

/// Builds one complete candidate solution (one ant).
///
/// Orders are processed in ascending id order, independent of the iteration
/// index, so a fixed RNG seed reproduces the construction exactly. Reads the
/// matrices only; all mutable state lives in this call.
pub fn construct(
    instance: &ProblemInstance,
    pheromone: &PheromoneMatrix,
    heuristic: &HeuristicMatrix,
    params: &AcoParams,
    rng: &mut ChaCha8Rng,
) -> Result<Solution, ConstructionError> {
    let mut tracker = CapacityTracker::new(instance.vehicles.len());
    let mut assignments = Vec::with_capacity(instance.orders.len());
    let mut total_cost = 0.0;

    for order in &instance.orders {
        let candidates = instance.candidate_routes(order.destination);
        let route = select_route(
            candidates,
            pheromone,
            heuristic,
            params.alpha,
            params.beta,
            rng,
        );

        let vehicle = tracker
            .first_fit(&instance.vehicles, order.size)
            .ok_or(ConstructionError::CapacityExhausted { order: order.id })?;

        assignments.push(Assignment {
            order: order.id,
            warehouse: route.warehouse,
            region: route.region,
            vehicle,
        });
        total_cost += instance.travel_time(route);
    }

    Ok(Solution {
        assignments,
        total_cost,
    })
}

/// Roulette-wheel selection over pheromone^alpha * heuristic^beta.
///
/// Setup guarantees `candidates` is non-empty and every weight input is
/// positive and finite.
fn select_route(
    candidates: &[RouteKey],
    pheromone: &PheromoneMatrix,
    heuristic: &HeuristicMatrix,
    alpha: f64,
    beta: f64,
    rng: &mut ChaCha8Rng,
) -> RouteKey {
    let weights: Vec<f64> = candidates
        .iter()
        .map(|&route| {
            pheromone.level(route).powf(alpha) * heuristic.desirability(route).powf(beta)
        })
        .collect();

    let sum: f64 = weights.iter().sum();
    if !(sum > 0.0 && sum.is_finite()) {
        // All weights underflowed to zero; the wheel is undefined, so fall
        // back to the lowest-indexed candidate.
        return candidates[0];
    }

    let threshold = rng.gen_range(0.0..sum);
    let mut accumulation = 0.0;
    for (&route, weight) in candidates.iter().zip(&weights) {
        accumulation += weight;
        if accumulation >= threshold {
            return route;
        }
    }
    candidates[candidates.len() - 1]
}
