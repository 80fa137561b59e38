//! Board construction and reset for a new game.
//! This module exists to make engine construction a single validated step.
//! It does not own movement or terminal-state rules once a game has started.

use std::collections::BTreeSet;

use rand_chacha::rand_core::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::*;
use crate::mapgen::{SpawnLayout, generate_layout};

/// An explicit board, used to rebuild known positions instead of rolling them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub player: Pos,
    pub wumpus: Pos,
    pub gold: Pos,
    pub pits: BTreeSet<Pos>,
}

/// Most pits a board of `size` can hold next to the player, the Wumpus and the gold.
pub fn max_pits(size: usize) -> usize {
    size.checked_mul(size).map_or(usize::MAX, |tiles| tiles.saturating_sub(3))
}

/// Largest board side: coordinates are `i32`.
pub const MAX_BOARD_SIZE: usize = i32::MAX as usize;

fn validate_dimensions(size: usize, num_pits: usize) -> Result<(), ConfigError> {
    if size < 2 {
        return Err(ConfigError::InvalidSize { size });
    }
    if size > MAX_BOARD_SIZE {
        return Err(ConfigError::SizeTooLarge { size, max: MAX_BOARD_SIZE });
    }
    let max = max_pits(size);
    if num_pits > max {
        return Err(ConfigError::TooManyPits { num_pits, max });
    }
    Ok(())
}

impl Game {
    /// Rolls a fresh board. The player starts at the origin; the Wumpus, gold and pits
    /// are placed by the safe-spawn rules from a generator seeded with `seed`.
    pub fn new(size: usize, num_pits: usize, seed: u64) -> Result<Self, ConfigError> {
        validate_dimensions(size, num_pits)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let SpawnLayout { wumpus, gold, pits } = generate_layout(size, num_pits, &mut rng);
        debug!(size, num_pits, seed, ?wumpus, ?gold, "board generated");

        Ok(Self::assemble(
            seed,
            rng,
            BoardState { size, player: Pos::ORIGIN, wumpus, gold, pits },
        ))
    }

    /// Builds a game from fixed positions. Every position must be on the board and no
    /// two entities may share a tile.
    pub fn with_layout(size: usize, seed: u64, layout: Layout) -> Result<Self, ConfigError> {
        validate_dimensions(size, layout.pits.len())?;

        let Layout { player, wumpus, gold, pits } = layout;
        let mut taken = BTreeSet::new();
        for pos in [player, wumpus, gold].into_iter().chain(pits.iter().copied()) {
            if !pos.in_bounds(size) {
                return Err(ConfigError::OutOfBounds { pos });
            }
            if !taken.insert(pos) {
                return Err(ConfigError::OverlappingEntities { pos });
            }
        }

        Ok(Self::assemble(
            seed,
            ChaCha8Rng::seed_from_u64(seed),
            BoardState { size, player, wumpus, gold, pits },
        ))
    }

    /// Current positions as a [`Layout`] that [`Game::with_layout`] rebuilds exactly.
    pub fn layout(&self) -> Layout {
        Layout {
            player: self.state.player,
            wumpus: self.state.wumpus,
            gold: self.state.gold,
            pits: self.state.pits.clone(),
        }
    }

    /// Rerolls the board from the game's own generator, keeping size and pit count.
    /// Scent and the Wumpus's visit history start over.
    pub fn reset(&mut self) {
        let size = self.state.size;
        let SpawnLayout { wumpus, gold, pits } =
            generate_layout(size, self.num_pits, &mut self.rng);
        debug!(size, ?wumpus, ?gold, "board reset");

        self.state = BoardState { size, player: Pos::ORIGIN, wumpus, gold, pits };
        self.scent = ScentMemory::new(size, wumpus);
        self.status = GameStatus::Ongoing;
    }

    fn assemble(seed: u64, rng: ChaCha8Rng, state: BoardState) -> Self {
        let scent = ScentMemory::new(state.size, state.wumpus);
        let mut game = Self {
            seed,
            num_pits: state.pits.len(),
            rng,
            state,
            scent,
            status: GameStatus::Ongoing,
        };
        game.check_game_over();
        game
    }
}
