//! Distance-gated sight of the tracked target.

use std::cell::Cell;

use crate::types::{Pos, Vec3};

/// The entity an agent watches for and pursues.
pub trait Target {
    fn current_position(&self) -> Vec3;

    /// Tile the target was last sampled on.
    fn current_tile(&self) -> Pos;

    /// Goal reached, target defeated, or anything else that should freeze pursuers.
    fn is_terminal_condition_met(&self) -> bool;

    /// False while the target entity is despawned or otherwise unreadable.
    fn is_available(&self) -> bool {
        true
    }
}

/// Target handle updated by the orchestrator between ticks.
#[derive(Debug)]
pub struct TrackedTarget {
    position: Cell<Vec3>,
    tile: Cell<Pos>,
    terminal: Cell<bool>,
    available: Cell<bool>,
}

impl TrackedTarget {
    pub fn new(tile: Pos, position: Vec3) -> Self {
        Self {
            position: Cell::new(position),
            tile: Cell::new(tile),
            terminal: Cell::new(false),
            available: Cell::new(true),
        }
    }

    pub fn place(&self, tile: Pos, position: Vec3) {
        self.tile.set(tile);
        self.position.set(position);
    }

    pub fn set_position(&self, position: Vec3) {
        self.position.set(position);
    }

    pub fn set_tile(&self, tile: Pos) {
        self.tile.set(tile);
    }

    pub fn set_terminal(&self, terminal: bool) {
        self.terminal.set(terminal);
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }
}

impl Target for TrackedTarget {
    fn current_position(&self) -> Vec3 {
        self.position.get()
    }

    fn current_tile(&self) -> Pos {
        self.tile.get()
    }

    fn is_terminal_condition_met(&self) -> bool {
        self.terminal.get()
    }

    fn is_available(&self) -> bool {
        self.available.get()
    }
}

/// Target's tile when it stands within `vision_radius` (inclusive) of `agent_position`.
pub fn perceive<T: Target + ?Sized>(
    agent_position: Vec3,
    target: Option<&T>,
    vision_radius: f32,
) -> Option<Pos> {
    let target = target.filter(|target| target.is_available())?;
    let distance = agent_position.distance(target.current_position());
    (distance <= vision_radius).then(|| target.current_tile())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_at(x: f32, z: f32) -> TrackedTarget {
        TrackedTarget::new(Pos { y: z as i32, x: x as i32 }, Vec3::new(x, 0.0, z))
    }

    #[test]
    fn visible_exactly_at_vision_radius() {
        let target = target_at(3.0, 4.0);
        assert_eq!(perceive(Vec3::ZERO, Some(&target), 5.0), Some(Pos { y: 4, x: 3 }));
    }

    #[test]
    fn invisible_just_beyond_vision_radius() {
        let target = target_at(3.0, 4.0);
        let radius = 5.0_f32;
        let just_short = f32::from_bits(radius.to_bits() - 1);
        assert_eq!(perceive(Vec3::ZERO, Some(&target), just_short), None);
        assert_eq!(perceive(Vec3::new(-0.001, 0.0, 0.0), Some(&target), radius), None);
    }

    #[test]
    fn absent_target_is_never_seen() {
        assert_eq!(perceive::<TrackedTarget>(Vec3::ZERO, None, f32::MAX), None);
    }

    #[test]
    fn unavailable_target_is_never_seen() {
        let target = target_at(1.0, 0.0);
        target.set_available(false);
        assert_eq!(perceive(Vec3::ZERO, Some(&target), 5.0), None);
    }

    #[test]
    fn zero_radius_sees_only_a_coincident_target() {
        let target = target_at(0.0, 0.0);
        assert_eq!(perceive(Vec3::ZERO, Some(&target), 0.0), Some(Pos { y: 0, x: 0 }));
        target.set_position(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(perceive(Vec3::ZERO, Some(&target), 0.0), None);
    }

    #[test]
    fn reports_the_sampled_tile_not_the_nearest_one() {
        let target = target_at(1.0, 1.0);
        target.set_tile(Pos { y: 7, x: 7 });
        assert_eq!(perceive(Vec3::ZERO, Some(&target), 10.0), Some(Pos { y: 7, x: 7 }));
    }
}
