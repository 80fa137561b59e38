//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own replay execution or journal persistence policies.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.state.size as u64);
        hasher.write_u8(match self.status {
            GameStatus::Ongoing => 0,
            GameStatus::PlayerWon => 1,
            GameStatus::WumpusKilled => 2,
            GameStatus::PlayerLostPit => 3,
            GameStatus::PlayerLostWumpus => 4,
        });
        for pos in [self.state.player, self.state.wumpus, self.state.gold] {
            write_pos(&mut hasher, pos);
        }
        hasher.write_usize(self.state.pits.len());
        for &pit in &self.state.pits {
            write_pos(&mut hasher, pit);
        }
        for row in self.scent.rows() {
            hasher.write(&row);
        }
        hasher.write_u8(u8::from(self.scent.pending_trail().is_some()));
        if let Some(trail) = self.scent.pending_trail() {
            write_pos(&mut hasher, trail);
        }
        hasher.write_usize(self.scent.wumpus_visited().len());
        for &visited in self.scent.wumpus_visited() {
            write_pos(&mut hasher, visited);
        }
        hasher.finish()
    }
}

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_i32(pos.x);
    hasher.write_i32(pos.y);
}
