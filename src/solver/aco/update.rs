use crate::domain::solution::Solution;
use crate::solver::aco::pheromone::PheromoneMatrix;

/// Per-iteration pheromone update: evaporate every route by (1 - rho), then
/// reinforce the routes visited by the iteration's feasible solutions.
///
/// The deposit is `q / total_cost` per assignment, so a route used by two
/// orders of the same solution is reinforced twice. Credit is assigned at
/// the solution level: the amount depends on the whole solution's cost, not
/// on the visited route's own travel time.
pub fn update_pheromone(pheromone: &mut PheromoneMatrix, batch: &[Solution], rho: f64, q: f64) {
    pheromone.evaporate(rho);

    for solution in batch {
        let amount = q / solution.total_cost;
        for assignment in &solution.assignments {
            pheromone.deposit(assignment.route(), amount);
        }
    }
}
