use itertools::iproduct;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::constant::{ORDER_SIZE, VEHICLE_CAPACITY, VEHICLE_SPEED};
use crate::config::AcoParams;
use crate::setup::init_types::{DistanceEntry, RawInstance};

/// Generates a random instance with a full warehouse-by-region distance
/// table. Deterministic for a given seed.
///
/// Order sizes, vehicle capacities and travel speed use the project defaults;
/// destinations cycle through the regions so every region receives orders.
pub fn generate_random_instance(
    order_count: usize,
    warehouse_count: usize,
    region_count: usize,
    vehicle_count: usize,
    seed: u64,
) -> RawInstance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let distances: Vec<DistanceEntry> = iproduct!(0..warehouse_count, 0..region_count)
        .map(|(warehouse, region)| DistanceEntry {
            warehouse,
            region,
            // Multiples of 5 km in [15, 75], like the field distance tables.
            km: (rng.gen_range(3..=15) * 5) as f64,
        })
        .collect();

    info!(
        "Generated random instance: {} orders over {} routes",
        order_count,
        distances.len()
    );

    RawInstance {
        order_count,
        warehouse_count,
        region_count,
        vehicle_count,
        vehicle_speed: VEHICLE_SPEED,
        distances,
        order_sizes: vec![ORDER_SIZE; order_count],
        order_destinations: (0..order_count).map(|o| o % region_count).collect(),
        vehicle_capacities: vec![VEHICLE_CAPACITY; vehicle_count],
        params: AcoParams::default(),
    }
}

/// Small fixed instance: 10 orders of size 5, 3 warehouses, 4 regions and
/// 2 vehicles of capacity 30. Small enough to cross-check against the exact
/// LP optimum offline.
pub fn small_demo_instance() -> RawInstance {
    let km_table = [
        [20.0, 35.0, 50.0, 25.0],
        [30.0, 25.0, 20.0, 15.0],
        [45.0, 40.0, 35.0, 30.0],
    ];

    let distances: Vec<DistanceEntry> = iproduct!(0..3usize, 0..4usize)
        .map(|(warehouse, region)| DistanceEntry {
            warehouse,
            region,
            km: km_table[warehouse][region],
        })
        .collect();

    RawInstance {
        order_count: 10,
        warehouse_count: 3,
        region_count: 4,
        vehicle_count: 2,
        vehicle_speed: 40.0,
        distances,
        order_sizes: vec![5.0; 10],
        order_destinations: (0..10).map(|o| o % 4).collect(),
        vehicle_capacities: vec![30.0; 2],
        params: AcoParams::default(),
    }
}
