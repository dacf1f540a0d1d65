use std::collections::HashMap;

use crate::domain::types::{ProblemInstance, RouteKey};

/// Learned desirability per route. Owned by the search loop: shared
/// read-only during the construct phase, mutated only by the update phase.
#[derive(Debug, Clone)]
pub struct PheromoneMatrix {
    levels: HashMap<RouteKey, f64>,
}

impl PheromoneMatrix {
    /// One entry per existing route, uniformly at 1.0. Never reset afterwards.
    pub fn initialize(routes: impl IntoIterator<Item = RouteKey>) -> Self {
        let levels = routes.into_iter().map(|route| (route, 1.0)).collect();
        PheromoneMatrix { levels }
    }

    pub fn level(&self, route: RouteKey) -> f64 {
        self.levels[&route]
    }

    /// Multiplicative decay of every level by (1 - rho). Keeps levels
    /// strictly positive for rho in (0, 1).
    pub fn evaporate(&mut self, rho: f64) {
        debug_assert!(rho > 0.0 && rho < 1.0);
        for level in self.levels.values_mut() {
            *level *= 1.0 - rho;
        }
    }

    /// Additive reinforcement. The amount is computed by the updater and is
    /// never negative.
    pub fn deposit(&mut self, route: RouteKey, amount: f64) {
        debug_assert!(amount >= 0.0 && amount.is_finite());
        if let Some(level) = self.levels.get_mut(&route) {
            *level += amount;
        }
    }

    pub fn levels(&self) -> impl Iterator<Item = (RouteKey, f64)> + '_ {
        self.levels.iter().map(|(route, level)| (*route, *level))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Static per-route desirability: inverse travel time. Computed once from
/// the instance, never mutated.
#[derive(Debug, Clone)]
pub struct HeuristicMatrix {
    desirability: HashMap<RouteKey, f64>,
}

impl HeuristicMatrix {
    /// Setup rejects non-positive travel times, so every desirability is
    /// finite and positive.
    pub fn from_instance(instance: &ProblemInstance) -> Self {
        let desirability = instance
            .travel_times
            .iter()
            .map(|(route, hours)| (*route, 1.0 / hours))
            .collect();
        HeuristicMatrix { desirability }
    }

    pub fn desirability(&self, route: RouteKey) -> f64 {
        self.desirability[&route]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::data_generator::small_demo_instance;
    use crate::setup::init::setup;

    fn route(warehouse: usize, region: usize) -> RouteKey {
        RouteKey { warehouse, region }
    }

    #[test]
    fn initializes_uniformly_over_instance_routes() {
        let instance = setup(&small_demo_instance()).unwrap();
        let pheromone = PheromoneMatrix::initialize(instance.routes());

        assert_eq!(pheromone.len(), instance.travel_times.len());
        assert!(pheromone.levels().all(|(_, level)| level == 1.0));
    }

    #[test]
    fn evaporation_decays_every_level_exactly() {
        let routes = [route(0, 0), route(1, 0), route(2, 3)];
        let mut pheromone = PheromoneMatrix::initialize(routes);
        pheromone.deposit(route(1, 0), 3.0);

        let before: Vec<(RouteKey, f64)> = pheromone.levels().collect();
        pheromone.evaporate(0.1);

        for (key, level) in before {
            assert_eq!(pheromone.level(key), level * 0.9);
        }
    }

    #[test]
    fn levels_stay_strictly_positive_under_repeated_evaporation() {
        let mut pheromone = PheromoneMatrix::initialize([route(0, 0)]);
        for _ in 0..10_000 {
            pheromone.evaporate(0.5);
        }
        assert!(pheromone.level(route(0, 0)) > 0.0);
    }

    #[test]
    fn deposit_accumulates_on_one_route() {
        let mut pheromone = PheromoneMatrix::initialize([route(0, 0), route(1, 0)]);
        pheromone.deposit(route(0, 0), 0.25);
        pheromone.deposit(route(0, 0), 0.25);

        assert_eq!(pheromone.level(route(0, 0)), 1.5);
        assert_eq!(pheromone.level(route(1, 0)), 1.0);
    }

    #[test]
    fn heuristic_is_inverse_travel_time() {
        let instance = setup(&small_demo_instance()).unwrap();
        let heuristic = HeuristicMatrix::from_instance(&instance);

        // 20 km at 40 km/h -> 0.5 h -> desirability 2.0.
        assert_eq!(heuristic.desirability(route(0, 0)), 2.0);
    }
}
