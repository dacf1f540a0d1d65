use crate::domain::solution::{Assignment, Solution};
use crate::domain::types::ProblemInstance;

/// Sum of travel times over the assigned routes, in hours.
pub fn total_travel_time(assignments: &[Assignment], instance: &ProblemInstance) -> f64 {
    assignments
        .iter()
        .map(|assignment| instance.travel_time(assignment.route()))
        .sum()
}

/// Load carried by each vehicle under the given assignments.
pub fn vehicle_loads(assignments: &[Assignment], instance: &ProblemInstance) -> Vec<f64> {
    let mut loads = vec![0.0; instance.vehicles.len()];
    for assignment in assignments {
        loads[assignment.vehicle] += instance.orders[assignment.order].size;
    }
    loads
}

/// Checks the two solution invariants: every route serves its order's
/// destination region, and no vehicle exceeds its capacity.
pub fn is_feasible(solution: &Solution, instance: &ProblemInstance) -> bool {
    let regions_match = solution
        .assignments
        .iter()
        .all(|assignment| assignment.region == instance.orders[assignment.order].destination);

    let within_capacity = vehicle_loads(&solution.assignments, instance)
        .iter()
        .zip(&instance.vehicles)
        .all(|(load, vehicle)| *load <= vehicle.capacity);

    regions_match && within_capacity
}
