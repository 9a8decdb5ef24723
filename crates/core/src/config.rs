//! Per-agent tuning, loadable from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::behavior::BehaviorVariant;
use crate::error::ConfigError;

pub const DEFAULT_SPEED: f32 = 1.0;
pub const DEFAULT_VISION_RADIUS: f32 = 5.0;
pub const DEFAULT_MAX_WANDER_STEPS: usize = 20;
pub const DEFAULT_ARRIVAL_TOLERANCE: f32 = 0.05;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// World units per second.
    pub speed: f32,
    pub vision_radius: f32,
    pub max_wander_steps: usize,
    pub behavior: BehaviorVariant,
    pub arrival_tolerance: f32,
    /// Planning rounds a chasing agent keeps heading for the last sighted tile
    /// after the target drops out of view. Zero disables the memory.
    pub lost_sight_grace: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            vision_radius: DEFAULT_VISION_RADIUS,
            max_wander_steps: DEFAULT_MAX_WANDER_STEPS,
            behavior: BehaviorVariant::default(),
            arrival_tolerance: DEFAULT_ARRIVAL_TOLERANCE,
            lost_sight_grace: 0,
        }
    }
}

impl AgentConfig {
    pub fn with_behavior(mut self, behavior: BehaviorVariant) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if !(self.vision_radius.is_finite() && self.vision_radius >= 0.0) {
            return Err(ConfigError::InvalidVisionRadius(self.vision_radius));
        }
        if self.max_wander_steps == 0 {
            return Err(ConfigError::ZeroWanderSteps);
        }
        if !(self.arrival_tolerance.is_finite() && self.arrival_tolerance > 0.0) {
            return Err(ConfigError::InvalidArrivalTolerance(self.arrival_tolerance));
        }
        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
