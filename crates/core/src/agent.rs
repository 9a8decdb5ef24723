//! Tick-driven agent controller.
//!
//! An agent alternates between planning (adopting a path from the random-walk or
//! informed planner, chosen by its [`BehaviorVariant`]) and moving (interpolating its
//! world position toward the waypoint in flight). The orchestrator owns the map and
//! the target and hands the agent shared handles to both at spawn; it then calls
//! [`Agent::tick`] once per simulation step.

mod hash;

use std::rc::Rc;
use std::result::Result as StdResult;

use crate::behavior::{BehaviorVariant, PlanningPolicy};
use crate::config::AgentConfig;
use crate::error::{AgentError, ConfigError, Result};
use crate::grid::GridMap;
use crate::pathfinding::{Path, find_path, random_path};
use crate::perception::{Target, TrackedTarget, perceive};
use crate::rng::SimRng;
use crate::types::{MotionState, PlanSource, Pos, TickOutcome, Vec3};

pub struct Agent<M, T = TrackedTarget> {
    map: Rc<M>,
    target: Option<Rc<T>>,
    config: AgentConfig,
    rng: SimRng,
    active: bool,
    current_tile: Pos,
    target_tile: Option<Pos>,
    pending_path: Path,
    motion: MotionState,
    world_position: Vec3,
    velocity: Vec3,
    // Consecutive planning rounds without a sighting while pursuing `last_seen`.
    miss_streak: u32,
    last_seen: Option<Pos>,
}

impl<M: GridMap, T: Target> Agent<M, T> {
    /// Validates `config` and places the agent on a uniformly random walkable tile.
    /// The agent stays inactive until [`Agent::activate`].
    pub fn spawn(map: Rc<M>, target: Option<Rc<T>>, config: AgentConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = SimRng::seed_from_u64(seed);
        let tile = random_walkable_tile(map.as_ref(), &mut rng).ok_or(AgentError::NoWalkableTile)?;
        check_arrival_tolerance(map.as_ref(), tile, &config)?;
        Ok(Self::placed(map, target, config, rng, tile))
    }

    /// Like [`Agent::spawn`] but on a chosen tile.
    pub fn spawn_at(
        map: Rc<M>,
        target: Option<Rc<T>>,
        config: AgentConfig,
        seed: u64,
        tile: Pos,
    ) -> Result<Self> {
        config.validate()?;
        if !map.is_walkable(tile) {
            return Err(AgentError::UnwalkableSpawn(tile));
        }
        check_arrival_tolerance(map.as_ref(), tile, &config)?;
        Ok(Self::placed(map, target, config, SimRng::seed_from_u64(seed), tile))
    }

    fn placed(map: Rc<M>, target: Option<Rc<T>>, config: AgentConfig, rng: SimRng, tile: Pos) -> Self {
        let world_position = map.world_position(tile);
        tracing::debug!(?tile, behavior = ?config.behavior, "agent spawned");
        Self {
            map,
            target,
            config,
            rng,
            active: false,
            current_tile: tile,
            target_tile: None,
            pending_path: Path::new(),
            motion: MotionState::Planning,
            world_position,
            velocity: Vec3::ZERO,
            miss_streak: 0,
            last_seen: None,
        }
    }

    pub fn activate(&mut self) {
        if !self.active {
            tracing::info!(tile = ?self.current_tile, "agent activated");
        }
        self.active = true;
    }

    /// Moves the agent to a fresh random walkable tile and drops any plan in progress.
    ///
    /// A map without walkable tiles is fatal: the agent is deactivated and stays so
    /// until a later reset succeeds and [`Agent::activate`] is called again.
    pub fn reset(&mut self) -> Result<()> {
        let Some(tile) = random_walkable_tile(self.map.as_ref(), &mut self.rng) else {
            self.active = false;
            tracing::warn!("reset found no walkable tile; agent halted");
            return Err(AgentError::NoWalkableTile);
        };
        self.place(tile);
        tracing::info!(?tile, "agent reset");
        Ok(())
    }

    fn place(&mut self, tile: Pos) {
        self.current_tile = tile;
        self.target_tile = None;
        self.pending_path.clear();
        self.motion = MotionState::Planning;
        self.world_position = self.map.world_position(tile);
        self.velocity = Vec3::ZERO;
        self.miss_streak = 0;
        self.last_seen = None;
    }

    pub fn tick(&mut self, elapsed: f32) -> TickOutcome {
        if !self.active {
            return TickOutcome::Inactive;
        }
        if self.is_suspended() {
            self.velocity = Vec3::ZERO;
            return TickOutcome::Suspended;
        }
        match (self.motion, self.target_tile) {
            (MotionState::Moving, Some(waypoint)) => self.advance(waypoint, elapsed),
            _ => self.plan(),
        }
    }

    fn is_suspended(&self) -> bool {
        if !self.map.is_alive() {
            return true;
        }
        self.target
            .as_deref()
            .is_some_and(|target| !target.is_available() || target.is_terminal_condition_met())
    }

    fn plan(&mut self) -> TickOutcome {
        self.motion = MotionState::Planning;
        self.velocity = Vec3::ZERO;

        let source = match self.config.behavior.policy() {
            PlanningPolicy::WanderOnly => self.plan_wander(),
            PlanningPolicy::PerceiveOrWander => {
                self.plan_pursuit().or_else(|| self.plan_wander())
            }
        };
        let Some(source) = source else {
            return TickOutcome::Stalled;
        };
        let Some(waypoint) = self.pending_path.pop_front() else {
            return TickOutcome::Stalled;
        };
        self.begin_step(waypoint);
        tracing::debug!(
            tile = ?self.current_tile,
            ?waypoint,
            ?source,
            remaining = self.pending_path.len(),
            "path adopted"
        );
        TickOutcome::Planned { source, remaining: self.pending_path.len() }
    }

    fn plan_wander(&mut self) -> Option<PlanSource> {
        if !self.pending_path.is_empty() {
            return Some(PlanSource::Pending);
        }
        let path = random_path(
            self.map.as_ref(),
            self.current_tile,
            self.config.max_wander_steps,
            &mut self.rng,
        );
        if path.is_empty() {
            tracing::debug!(tile = ?self.current_tile, "no walkable neighbour to wander to");
            return None;
        }
        self.pending_path = path;
        Some(PlanSource::Wander)
    }

    fn plan_pursuit(&mut self) -> Option<PlanSource> {
        let (goal, source) = self.pursuit_goal()?;
        // Whatever was queued predates this sighting.
        self.pending_path.clear();
        let path = find_path(self.map.as_ref(), self.current_tile, goal);
        if path.is_empty() {
            tracing::debug!(tile = ?self.current_tile, ?goal, "pursuit goal unreachable or reached");
            if goal == self.current_tile {
                self.last_seen = None;
            }
            return None;
        }
        self.pending_path = path;
        Some(source)
    }

    fn pursuit_goal(&mut self) -> Option<(Pos, PlanSource)> {
        let sighted =
            perceive(self.world_position, self.target.as_deref(), self.config.vision_radius);
        if let Some(goal) = sighted {
            self.miss_streak = 0;
            self.last_seen = Some(goal);
            return Some((goal, PlanSource::Chase { goal }));
        }

        match self.last_seen {
            Some(goal) if self.miss_streak < self.config.lost_sight_grace => {
                self.miss_streak += 1;
                Some((goal, PlanSource::Remembered { goal }))
            }
            _ => {
                self.last_seen = None;
                None
            }
        }
    }

    fn begin_step(&mut self, waypoint: Pos) {
        self.target_tile = Some(waypoint);
        self.motion = MotionState::Moving;
    }

    fn advance(&mut self, waypoint: Pos, elapsed: f32) -> TickOutcome {
        let goal = self.map.world_position(waypoint);
        let offset = goal - self.world_position;
        let distance = offset.length();

        let step = if elapsed.is_finite() && elapsed >= 0.0 {
            self.config.speed * elapsed
        } else {
            tracing::warn!(elapsed, "ignoring non-finite or negative elapsed time");
            0.0
        };

        self.velocity = Vec3::ZERO;
        if distance > self.config.arrival_tolerance && step > 0.0 {
            self.velocity = offset * (self.config.speed / distance);
            // Clamp to the waypoint so large steps never overshoot.
            self.world_position =
                if step >= distance { goal } else { self.world_position + offset * (step / distance) };
        }

        let distance_left = self.world_position.distance(goal);
        if distance_left <= self.config.arrival_tolerance {
            return self.arrive(waypoint, goal);
        }
        tracing::trace!(?waypoint, distance_left, "moved");
        TickOutcome::Moved { distance_left }
    }

    fn arrive(&mut self, tile: Pos, goal: Vec3) -> TickOutcome {
        self.world_position = goal;
        self.current_tile = tile;
        self.target_tile = None;
        self.motion = MotionState::Planning;
        self.velocity = Vec3::ZERO;

        // Wanderers chain straight into the next waypoint; pursuers look again first.
        let next = match self.config.behavior.policy() {
            PlanningPolicy::WanderOnly => self.pending_path.pop_front(),
            PlanningPolicy::PerceiveOrWander => None,
        };
        if let Some(waypoint) = next {
            self.begin_step(waypoint);
        }
        tracing::debug!(?tile, ?next, "arrived");
        TickOutcome::Arrived { tile, next }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_tile(&self) -> Pos {
        self.current_tile
    }

    pub fn target_tile(&self) -> Option<Pos> {
        self.target_tile
    }

    pub fn motion_state(&self) -> MotionState {
        self.motion
    }

    pub fn world_position(&self) -> Vec3 {
        self.world_position
    }

    /// Velocity applied by the last tick; zero unless that tick moved the agent
    /// without reaching its waypoint.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn pending_path(&self) -> &Path {
        &self.pending_path
    }

    pub fn behavior(&self) -> BehaviorVariant {
        self.config.behavior
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn map(&self) -> &M {
        self.map.as_ref()
    }
}

/// Rejects tolerances that would count a neighbouring tile as already reached,
/// which would let the agent hop a tile per tick regardless of speed.
fn check_arrival_tolerance<M: GridMap + ?Sized>(
    map: &M,
    tile: Pos,
    config: &AgentConfig,
) -> StdResult<(), ConfigError> {
    let origin = map.world_position(tile);
    let spacing = map
        .neighbors(tile)
        .into_iter()
        .map(|next| origin.distance(map.world_position(next)))
        .fold(f32::INFINITY, f32::min);
    if spacing.is_finite() && config.arrival_tolerance >= spacing / 2.0 {
        return Err(ConfigError::ArrivalToleranceTooLarge {
            tolerance: config.arrival_tolerance,
            spacing,
        });
    }
    Ok(())
}

fn random_walkable_tile<M: GridMap + ?Sized>(map: &M, rng: &mut SimRng) -> Option<Pos> {
    let walkable: Vec<Pos> =
        map.all_tiles().into_iter().filter(|tile| map.is_walkable(*tile)).collect();
    rng.choose(&walkable).copied()
}
