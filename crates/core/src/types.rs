use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Grid coordinate. Tiles are identified by their coordinate alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
}

/// World-space coordinate. The grid lies on the `x`/`z` plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionState {
    Planning,
    Moving,
}

/// Where the path adopted by a planning round came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanSource {
    /// Fresh bounded random walk.
    Wander,
    /// Next waypoint of a path adopted in an earlier round.
    Pending,
    /// Informed search toward the perceived target tile.
    Chase { goal: Pos },
    /// Informed search toward a remembered tile after losing sight of the target.
    Remembered { goal: Pos },
}

/// What a single `tick` did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// `activate` has not been called, or activation was halted by a fatal error.
    Inactive,
    /// The map is not alive or the target's terminal condition holds.
    Suspended,
    /// A path was adopted and the first waypoint is now in flight.
    Planned { source: PlanSource, remaining: usize },
    /// Planning produced no path; the agent stays put and retries next tick.
    Stalled,
    /// The agent advanced toward its waypoint without reaching it.
    Moved { distance_left: f32 },
    /// The agent reached `tile`; `next` is the waypoint already in flight, if any.
    Arrived { tile: Pos, next: Option<Pos> },
}
