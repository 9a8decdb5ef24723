pub mod agent;
pub mod behavior;
pub mod config;
pub mod error;
pub mod grid;
pub mod pathfinding;
pub mod perception;
pub mod rng;
pub mod types;

#[cfg(test)]
mod test_support;

pub use agent::Agent;
pub use behavior::{BehaviorVariant, PlanningPolicy};
pub use config::AgentConfig;
pub use error::{AgentError, ConfigError, GridError};
pub use grid::{GridMap, TileGrid};
pub use pathfinding::{Path, find_path, random_path};
pub use perception::{Target, TrackedTarget, perceive};
pub use rng::SimRng;
pub use types::*;
