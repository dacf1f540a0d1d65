use serde::{Deserialize, Serialize};

pub mod constant {
    pub const ITERATIONS: usize = 200;
    pub const NUM_ANTS: usize = 30;
    pub const ALPHA: f64 = 1.0;
    pub const BETA: f64 = 2.0;
    pub const RHO: f64 = 0.1;
    pub const Q: f64 = 1.0;
    pub const SEED: u64 = 64;

    // Default instance shape for the random fixture generator.
    pub const ORDER_COUNT: usize = 100;
    pub const WAREHOUSE_COUNT: usize = 15;
    pub const REGION_COUNT: usize = 4;
    pub const VEHICLE_COUNT: usize = 10;
    pub const VEHICLE_SPEED: f64 = 40.0;
    pub const ORDER_SIZE: f64 = 5.0;
    pub const VEHICLE_CAPACITY: f64 = 50.0;
}

/// ACO hyperparameters.
///
/// `rho` must lie in (0, 1) and `q` must be non-negative; `seed` fixes the
/// whole run since every ant RNG is derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AcoParams {
    pub num_ants: usize,
    pub iterations: usize,
    pub alpha: f64,
    pub beta: f64,
    pub rho: f64,
    pub q: f64,
    pub seed: u64,
}

impl Default for AcoParams {
    fn default() -> Self {
        AcoParams {
            num_ants: constant::NUM_ANTS,
            iterations: constant::ITERATIONS,
            alpha: constant::ALPHA,
            beta: constant::BETA,
            rho: constant::RHO,
            q: constant::Q,
            seed: constant::SEED,
        }
    }
}
