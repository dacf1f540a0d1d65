pub mod construction;
pub mod pheromone;
pub mod search;
pub mod update;
