//! Behaviour variants and the planning policy each one runs.
//!
//! `PerceiveAndChaseA` and `PerceiveAndChaseB` are distinct identifiers for the
//! same policy. Nothing observable separates them; keep them mapped to
//! [`PlanningPolicy::PerceiveOrWander`] until a real divergence is defined.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorVariant {
    /// Wanders forever and never looks for the target.
    #[default]
    Wander,
    PerceiveAndChaseA,
    PerceiveAndChaseB,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanningPolicy {
    WanderOnly,
    /// Chase the target's tile when it is in sight, otherwise wander.
    PerceiveOrWander,
}

impl BehaviorVariant {
    pub const ALL: [Self; 3] = [Self::Wander, Self::PerceiveAndChaseA, Self::PerceiveAndChaseB];

    pub fn policy(self) -> PlanningPolicy {
        match self {
            Self::Wander => PlanningPolicy::WanderOnly,
            Self::PerceiveAndChaseA | Self::PerceiveAndChaseB => PlanningPolicy::PerceiveOrWander,
        }
    }

    pub fn uses_perception(self) -> bool {
        self.policy() == PlanningPolicy::PerceiveOrWander
    }
}
