use std::collections::HashMap;
use std::error::Error;
use std::fs;

use tracing::{debug, info};

use crate::config::AcoParams;
use crate::domain::types::{Order, ProblemInstance, RouteKey, Vehicle};
use crate::error::SetupError;
use crate::setup::init_types::RawInstance;

/// Validates a raw instance and precomputes everything the solver reads:
/// travel times (km / speed) and the per-region candidate route index.
///
/// All failures here are fatal; nothing downstream re-checks these
/// conditions.
pub fn setup(raw: &RawInstance) -> Result<ProblemInstance, SetupError> {
    info!(
        "Setting up instance: {} orders, {} warehouses, {} regions, {} vehicles",
        raw.order_count, raw.warehouse_count, raw.region_count, raw.vehicle_count
    );

    check_table_shapes(raw)?;
    check_params(&raw.params)?;

    let mut travel_times: HashMap<RouteKey, f64> = HashMap::with_capacity(raw.distances.len());
    for entry in &raw.distances {
        if entry.warehouse >= raw.warehouse_count || entry.region >= raw.region_count {
            return Err(SetupError::InvalidInstance(format!(
                "distance entry references unknown warehouse {} or region {}",
                entry.warehouse, entry.region
            )));
        }

        let key = RouteKey {
            warehouse: entry.warehouse,
            region: entry.region,
        };
        let hours = entry.km / raw.vehicle_speed;

        // Guards the 1/t heuristic derived later.
        if !(hours.is_finite() && hours > 0.0) {
            return Err(SetupError::InvalidTravelTime {
                warehouse: entry.warehouse,
                region: entry.region,
                hours,
            });
        }

        if travel_times.insert(key, hours).is_some() {
            return Err(SetupError::InvalidInstance(format!(
                "duplicate distance entry for warehouse {} and region {}",
                entry.warehouse, entry.region
            )));
        }
    }

    // Candidate routes per region, sorted by warehouse id so construction
    // iterates them in a fixed order.
    let mut candidates_by_region: Vec<Vec<RouteKey>> = vec![vec![]; raw.region_count];
    for key in travel_times.keys() {
        candidates_by_region[key.region].push(*key);
    }
    for candidates in &mut candidates_by_region {
        candidates.sort_by_key(|key| key.warehouse);
    }

    let orders = build_orders(raw, &candidates_by_region)?;
    let vehicles = build_vehicles(raw)?;

    debug!("Travel time table has {} routes", travel_times.len());
    info!("Setup completed successfully");

    Ok(ProblemInstance {
        orders,
        vehicles,
        travel_times,
        candidates_by_region,
    })
}

/// Out-of-range hyperparameters are fatal here: an rho outside (0, 1) would
/// drive pheromone levels non-positive and a negative Q would deposit
/// negative amounts.
fn check_params(params: &AcoParams) -> Result<(), SetupError> {
    if !(params.rho.is_finite() && params.rho > 0.0 && params.rho < 1.0) {
        return Err(SetupError::InvalidInstance(format!(
            "evaporation rate rho must lie in (0, 1), got {}",
            params.rho
        )));
    }
    if !(params.q.is_finite() && params.q >= 0.0) {
        return Err(SetupError::InvalidInstance(format!(
            "deposit constant Q must be non-negative, got {}",
            params.q
        )));
    }
    Ok(())
}

fn check_table_shapes(raw: &RawInstance) -> Result<(), SetupError> {
    if raw.order_sizes.len() != raw.order_count {
        return Err(SetupError::InvalidInstance(format!(
            "expected {} order sizes, got {}",
            raw.order_count,
            raw.order_sizes.len()
        )));
    }
    if raw.order_destinations.len() != raw.order_count {
        return Err(SetupError::InvalidInstance(format!(
            "expected {} order destinations, got {}",
            raw.order_count,
            raw.order_destinations.len()
        )));
    }
    if raw.vehicle_capacities.len() != raw.vehicle_count {
        return Err(SetupError::InvalidInstance(format!(
            "expected {} vehicle capacities, got {}",
            raw.vehicle_count,
            raw.vehicle_capacities.len()
        )));
    }
    Ok(())
}

fn build_orders(
    raw: &RawInstance,
    candidates_by_region: &[Vec<RouteKey>],
) -> Result<Vec<Order>, SetupError> {
    let mut orders = Vec::with_capacity(raw.order_count);
    for id in 0..raw.order_count {
        let size = raw.order_sizes[id];
        if !(size.is_finite() && size > 0.0) {
            return Err(SetupError::InvalidInstance(format!(
                "order {} has non-positive size {}",
                id, size
            )));
        }

        let destination = raw.order_destinations[id];
        if destination >= raw.region_count {
            return Err(SetupError::InvalidInstance(format!(
                "order {} is destined for unknown region {}",
                id, destination
            )));
        }
        if candidates_by_region[destination].is_empty() {
            return Err(SetupError::EmptyCandidateSet {
                order: id,
                region: destination,
            });
        }

        orders.push(Order {
            id,
            size,
            destination,
        });
    }
    Ok(orders)
}

fn build_vehicles(raw: &RawInstance) -> Result<Vec<Vehicle>, SetupError> {
    let mut vehicles = Vec::with_capacity(raw.vehicle_count);
    for id in 0..raw.vehicle_count {
        let capacity = raw.vehicle_capacities[id];
        if !(capacity.is_finite() && capacity > 0.0) {
            return Err(SetupError::InvalidInstance(format!(
                "vehicle {} has non-positive capacity {}",
                id, capacity
            )));
        }
        vehicles.push(Vehicle { id, capacity });
    }
    Ok(vehicles)
}

/// Reads a raw instance from a JSON file.
pub fn load_instance(path: &str) -> Result<RawInstance, Box<dyn Error>> {
    info!("Loading instance from {}", path);
    let file_content = fs::read_to_string(path)?;
    let raw: RawInstance = serde_json::from_str(&file_content)?;
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::data_generator::small_demo_instance;

    #[test]
    fn valid_instance_builds() {
        let raw = small_demo_instance();
        let instance = setup(&raw).unwrap();

        assert_eq!(instance.orders.len(), raw.order_count);
        assert_eq!(instance.vehicles.len(), raw.vehicle_count);
        assert_eq!(instance.travel_times.len(), raw.distances.len());
        for region in 0..raw.region_count {
            for pair in instance.candidate_routes(region).windows(2) {
                assert!(pair[0].warehouse < pair[1].warehouse);
            }
        }
    }

    #[test]
    fn travel_times_are_distance_over_speed() {
        let raw = small_demo_instance();
        let instance = setup(&raw).unwrap();

        for entry in &raw.distances {
            let key = RouteKey {
                warehouse: entry.warehouse,
                region: entry.region,
            };
            assert_eq!(instance.travel_time(key), entry.km / raw.vehicle_speed);
        }
    }

    #[test]
    fn zero_distance_is_invalid_travel_time() {
        let mut raw = small_demo_instance();
        raw.distances[0].km = 0.0;

        match setup(&raw) {
            Err(SetupError::InvalidTravelTime { hours, .. }) => assert_eq!(hours, 0.0),
            other => panic!("expected InvalidTravelTime, got {:?}", other),
        }
    }

    #[test]
    fn zero_speed_is_invalid_travel_time() {
        let mut raw = small_demo_instance();
        raw.vehicle_speed = 0.0;

        assert!(matches!(
            setup(&raw),
            Err(SetupError::InvalidTravelTime { .. })
        ));
    }

    #[test]
    fn unserved_region_is_empty_candidate_set() {
        let mut raw = small_demo_instance();
        // Drop every route into region 2; order 2 is destined there.
        raw.distances.retain(|entry| entry.region != 2);

        assert_eq!(
            setup(&raw),
            Err(SetupError::EmptyCandidateSet {
                order: 2,
                region: 2
            })
        );
    }

    #[test]
    fn mismatched_tables_are_invalid() {
        let mut raw = small_demo_instance();
        raw.order_sizes.pop();

        assert!(matches!(setup(&raw), Err(SetupError::InvalidInstance(_))));
    }

    #[test]
    fn instance_files_carry_their_own_params() {
        let mut raw = small_demo_instance();
        raw.params.rho = 0.5;
        raw.params.num_ants = 5;

        let json = serde_json::to_string(&raw).unwrap();
        let parsed: RawInstance = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.params.rho, 0.5);
        assert_eq!(parsed.params.num_ants, 5);
        assert!(setup(&parsed).is_ok());
    }

    #[test]
    fn omitted_params_fall_back_to_defaults() {
        let mut value = serde_json::to_value(small_demo_instance()).unwrap();
        value.as_object_mut().unwrap().remove("params");

        let parsed: RawInstance = serde_json::from_value(value).unwrap();
        let defaults = AcoParams::default();
        assert_eq!(parsed.params.num_ants, defaults.num_ants);
        assert_eq!(parsed.params.iterations, defaults.iterations);
        assert_eq!(parsed.params.rho, defaults.rho);
        assert_eq!(parsed.params.seed, defaults.seed);
    }

    #[test]
    fn out_of_range_rho_is_invalid() {
        for rho in [0.0, 1.0, -0.1, f64::NAN] {
            let mut raw = small_demo_instance();
            raw.params.rho = rho;
            assert!(matches!(setup(&raw), Err(SetupError::InvalidInstance(_))));
        }
    }

    #[test]
    fn negative_q_is_invalid() {
        let mut raw = small_demo_instance();
        raw.params.q = -1.0;
        assert!(matches!(setup(&raw), Err(SetupError::InvalidInstance(_))));
    }

    #[test]
    fn duplicate_distance_entries_are_invalid() {
        let mut raw = small_demo_instance();
        let duplicated = raw.distances[0];
        raw.distances.push(duplicated);

        assert!(matches!(setup(&raw), Err(SetupError::InvalidInstance(_))));
    }
}
