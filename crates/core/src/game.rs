//! The engine aggregate: entity positions, game status and the scent memory they drive.

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;

use crate::scent::ScentMemory;
use crate::types::*;

mod bootstrap;
mod hash;
mod movement;
mod senses;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use bootstrap::{Layout, MAX_BOARD_SIZE, max_pits};

/// Positions of everything on the board. Pits, gold and the Wumpus's spawn are fixed
/// for the lifetime of a board; only the player and the Wumpus move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    pub size: usize,
    pub player: Pos,
    pub wumpus: Pos,
    pub gold: Pos,
    pub pits: BTreeSet<Pos>,
}

/// One game session's simulation state.
///
/// Not internally synchronised: a caller holding several games must give each one a
/// single writer at a time. Games share nothing, so distinct games may run in parallel.
#[derive(Clone)]
pub struct Game {
    seed: u64,
    num_pits: usize,
    rng: ChaCha8Rng,
    state: BoardState,
    scent: ScentMemory,
    status: GameStatus,
}

impl Game {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn size(&self) -> usize {
        self.state.size
    }

    pub fn num_pits(&self) -> usize {
        self.num_pits
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn player_pos(&self) -> Pos {
        self.state.player
    }

    pub fn wumpus_pos(&self) -> Pos {
        self.state.wumpus
    }

    pub fn gold_pos(&self) -> Pos {
        self.state.gold
    }

    pub fn pits(&self) -> &BTreeSet<Pos> {
        &self.state.pits
    }

    pub fn scent(&self) -> &ScentMemory {
        &self.scent
    }

    /// Row-major scent values, indexed `[y][x]`.
    pub fn scent_grid(&self) -> Vec<Vec<u8>> {
        self.scent.rows()
    }

    pub fn wumpus_visited(&self) -> &BTreeSet<Pos> {
        self.scent.wumpus_visited()
    }
}
