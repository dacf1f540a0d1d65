use std::env;
use std::error::Error;

use colored::Colorize;
use csv::Writer;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{constant, AcoParams};
use crate::domain::solution::Solution;
use crate::domain::types::ProblemInstance;
use crate::error::ConstructionError;
use crate::evaluation::fitness::vehicle_loads;
use crate::fixtures::data_generator::generate_random_instance;
use crate::setup::init::{load_instance, setup};
use crate::solver::aco::construction::construct;
use crate::solver::aco::pheromone::{HeuristicMatrix, PheromoneMatrix};
use crate::solver::aco::update::update_pheromone;
use crate::utils::ant_seed;

/// Best cost after each iteration; `best_cost` is infinite until the first
/// feasible construction lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationRecord {
    pub iteration: usize,
    pub best_cost: f64,
}

#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Elitist best-so-far; `None` only if every construction of every
    /// iteration failed.
    pub best: Option<Solution>,
    pub progress: Vec<IterationRecord>,
    pub discarded_constructions: usize,
}

/// Initialize tracing
fn init_tracing() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .init();
    Ok(())
}

/// Runs the full optimization: a fixed number of iterations, each a construct
/// phase followed by a pheromone update.
///
/// Constructions only read the matrices, so the construct phase fans out over
/// the ants with rayon; the collect is the barrier before the single-writer
/// update phase. Each ant seeds its own RNG from (run seed, iteration, ant),
/// which makes parallel and sequential runs bit-identical.
pub fn solve(instance: &ProblemInstance, params: &AcoParams) -> SolveReport {
    let heuristic = HeuristicMatrix::from_instance(instance);
    let mut pheromone = PheromoneMatrix::initialize(instance.routes());

    let mut best: Option<Solution> = None;
    let mut progress = Vec::with_capacity(params.iterations);
    let mut discarded_constructions = 0;

    for iteration in 0..params.iterations {
        let iter_span = span!(Level::DEBUG, "iteration", iter = iteration);
        let _iter_guard = iter_span.enter();

        let attempts: Vec<Result<Solution, ConstructionError>> = (0..params.num_ants)
            .into_par_iter()
            .map(|ant| {
                let mut rng = ChaCha8Rng::seed_from_u64(ant_seed(params.seed, iteration, ant));
                construct(instance, &pheromone, &heuristic, params, &mut rng)
            })
            .collect();

        // Infeasible attempts are discarded; they enter neither the batch
        // nor best-so-far, and the run continues.
        let mut batch = Vec::with_capacity(params.num_ants);
        for attempt in attempts {
            match attempt {
                Ok(solution) => {
                    if best
                        .as_ref()
                        .map_or(true, |b| solution.total_cost < b.total_cost)
                    {
                        info!(
                            "New best at iteration {}: cost = {:.2} h",
                            iteration, solution.total_cost
                        );
                        best = Some(solution.clone());
                    }
                    batch.push(solution);
                }
                Err(ConstructionError::CapacityExhausted { order }) => {
                    debug!("Construction discarded: fleet exhausted at order {}", order);
                    discarded_constructions += 1;
                }
            }
        }

        update_pheromone(&mut pheromone, &batch, params.rho, params.q);

        let best_cost = best.as_ref().map_or(f64::INFINITY, |b| b.total_cost);
        info!(
            "Iteration {}/{}: best cost = {:.2} h ({} feasible ants)",
            iteration + 1,
            params.iterations,
            best_cost,
            batch.len()
        );
        progress.push(IterationRecord {
            iteration,
            best_cost,
        });
    }

    SolveReport {
        best,
        progress,
        discarded_constructions,
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing()?;

    let raw = match env::args().nth(1) {
        Some(path) => load_instance(&path)?,
        None => generate_random_instance(
            constant::ORDER_COUNT,
            constant::WAREHOUSE_COUNT,
            constant::REGION_COUNT,
            constant::VEHICLE_COUNT,
            constant::SEED,
        ),
    };

    let instance = {
        let setup_span = span!(Level::INFO, "setup");
        let _guard = setup_span.enter();
        setup(&raw)?
    };

    let params = raw.params.clone();
    info!(
        "Starting ACO solver: {} ants, {} iterations, alpha = {}, beta = {}, rho = {}, Q = {}",
        params.num_ants, params.iterations, params.alpha, params.beta, params.rho, params.q
    );

    let report = {
        let solve_span = span!(
            Level::INFO,
            "optimization_loop",
            total_iterations = params.iterations
        );
        let _guard = solve_span.enter();
        solve(&instance, &params)
    };

    if report.discarded_constructions > 0 {
        warn!(
            "{} constructions were discarded for exhausted fleet capacity",
            report.discarded_constructions
        );
    }

    match &report.best {
        Some(best) => print_solution(best, &instance),
        None => warn!("No feasible solution found: fleet capacity never covered the order batch"),
    }

    save_to_csv(&report.progress, "best_so_far.csv")?;
    Ok(())
}

fn save_to_csv(progress: &[IterationRecord], filename: &str) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;

    wtr.write_record(["iteration", "best_cost"])?;
    for record in progress {
        wtr.write_record([record.iteration.to_string(), record.best_cost.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

fn print_solution(solution: &Solution, instance: &ProblemInstance) {
    println!(
        "{}",
        format_args!("Total delivery time: {:.2} h", solution.total_cost)
            .to_string()
            .green()
    );

    for assignment in &solution.assignments {
        println!(
            "Order {} -> Warehouse {} -> Region {} using Vehicle {}",
            assignment.order, assignment.warehouse, assignment.region, assignment.vehicle
        );
    }

    let loads = vehicle_loads(&solution.assignments, instance);
    for vehicle in &instance.vehicles {
        let orders: Vec<usize> = solution
            .assignments
            .iter()
            .filter(|a| a.vehicle == vehicle.id)
            .map(|a| a.order)
            .collect();
        println!("{} / {} : {:?}", loads[vehicle.id], vehicle.capacity, orders);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::fitness::{is_feasible, total_travel_time};
    use crate::fixtures::data_generator::small_demo_instance;

    fn test_params() -> AcoParams {
        AcoParams {
            num_ants: 8,
            iterations: 30,
            ..AcoParams::default()
        }
    }

    #[test]
    fn best_cost_is_non_increasing() {
        let instance = setup(&small_demo_instance()).unwrap();
        let report = solve(&instance, &test_params());

        for pair in report.progress.windows(2) {
            assert!(pair[1].best_cost <= pair[0].best_cost);
        }
        assert_eq!(report.progress.len(), 30);
    }

    #[test]
    fn best_solution_is_feasible_and_costed_correctly() {
        let instance = setup(&small_demo_instance()).unwrap();
        let report = solve(&instance, &test_params());

        let best = report.best.expect("demo instance is feasible");
        assert!(is_feasible(&best, &instance));

        let recomputed = total_travel_time(&best.assignments, &instance);
        assert!((best.total_cost - recomputed).abs() < 1e-12);
        assert_eq!(
            best.total_cost,
            report.progress.last().unwrap().best_cost
        );
    }

    #[test]
    fn fixed_seed_reproduces_the_whole_run() {
        let instance = setup(&small_demo_instance()).unwrap();
        let params = test_params();

        let first = solve(&instance, &params);
        let second = solve(&instance, &params);

        assert_eq!(first.best, second.best);
        assert_eq!(first.progress, second.progress);
        assert_eq!(
            first.discarded_constructions,
            second.discarded_constructions
        );
    }

    #[test]
    fn infeasible_fleet_discards_every_construction() {
        let mut raw = small_demo_instance();
        raw.vehicle_count = 1;
        raw.vehicle_capacities = vec![20.0];
        let instance = setup(&raw).unwrap();

        let params = test_params();
        let report = solve(&instance, &params);

        assert!(report.best.is_none());
        assert_eq!(
            report.discarded_constructions,
            params.num_ants * params.iterations
        );
        assert!(report
            .progress
            .iter()
            .all(|record| record.best_cost.is_infinite()));
    }
}
