//! Stable fingerprint of an agent's observable state for determinism checks.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::Agent;
use crate::types::{MotionState, Pos};

// Positions are compared at millimetre resolution so float noise below that is ignored.
const POSITION_QUANTUM: f32 = 1000.0;

impl<M, T> Agent<M, T> {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        write_pos(&mut hasher, self.current_tile);
        match self.target_tile {
            Some(tile) => {
                hasher.write_u8(1);
                write_pos(&mut hasher, tile);
            }
            None => hasher.write_u8(0),
        }
        hasher.write_u8(match self.motion {
            MotionState::Planning => 0,
            MotionState::Moving => 1,
        });
        hasher.write_usize(self.pending_path.len());
        for tile in self.pending_path.iter() {
            write_pos(&mut hasher, tile);
        }
        for axis in [self.world_position.x, self.world_position.y, self.world_position.z] {
            hasher.write_i64((axis * POSITION_QUANTUM).round() as i64);
        }
        hasher.write_u32(self.miss_streak);
        match self.last_seen {
            Some(tile) => {
                hasher.write_u8(1);
                write_pos(&mut hasher, tile);
            }
            None => hasher.write_u8(0),
        }
        hasher.write_u8(u8::from(self.active));
        hasher.finish()
    }
}

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_i32(pos.y);
    hasher.write_i32(pos.x);
}
