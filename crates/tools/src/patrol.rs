//! Scripted target movement for the simulator: walks the route stop to stop
//! along shortest paths, looping forever.

use prowl_core::{GridMap, Path, Pos, Vec3, find_path};

pub struct Patrol {
    route: Vec<Pos>,
    next_stop: usize,
    leg: Path,
    tile: Pos,
    waypoint: Option<Pos>,
    position: Vec3,
    speed: f32,
}

impl Patrol {
    /// `route` must be non-empty; the patrol starts on its first tile.
    pub fn new<M: GridMap>(map: &M, route: &[Pos], speed: f32) -> Self {
        let tile = route[0];
        Self {
            route: route.to_vec(),
            next_stop: 1 % route.len(),
            leg: Path::new(),
            tile,
            waypoint: None,
            position: map.world_position(tile),
            speed,
        }
    }

    pub fn tile(&self) -> Pos {
        self.tile
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Advances by `dt` seconds and returns the tile the target now occupies.
    pub fn step<M: GridMap>(&mut self, map: &M, dt: f32) -> Pos {
        if self.waypoint.is_none() {
            if self.leg.is_empty() {
                let stop = self.route[self.next_stop];
                self.next_stop = (self.next_stop + 1) % self.route.len();
                self.leg = find_path(map, self.tile, stop);
                if self.leg.is_empty() {
                    tracing::debug!(from = ?self.tile, ?stop, "patrol leg has no route; skipping stop");
                }
            }
            self.waypoint = self.leg.pop_front();
        }

        let Some(waypoint) = self.waypoint else {
            return self.tile;
        };
        let goal = map.world_position(waypoint);
        let offset = goal - self.position;
        let distance = offset.length();
        let step = self.speed * dt;
        if step >= distance {
            self.position = goal;
            self.tile = waypoint;
            self.waypoint = None;
        } else {
            self.position = self.position + offset * (step / distance);
        }
        self.tile
    }
}
