//! # relief-aco
//!
//! Ant Colony Optimization engine for relief-order dispatch: assigns a batch
//! of orders to (warehouse, region) routes and capacity-limited vehicles so
//! the total delivery time is minimized.
//!
//! - [`domain`] — instance and solution types
//! - [`setup`] — input schema, validation, travel-time precomputation
//! - [`solver`] — the ACO solver (pheromone state, construction, search loop)
//! - [`evaluation`] — solution cost and feasibility checks
//! - [`fixtures`] — deterministic random instance generation

pub mod config;
pub mod domain;
pub mod error;
pub mod evaluation;
pub mod fixtures;
pub mod setup;
pub mod solver;
pub mod utils;
