//! Decaying player scent trail and the Wumpus's visit history.
//! This module exists to keep sensory memory consistent across player moves, Wumpus moves
//! and sensing queries. It does not own entity positions or terminal-state rules.

use std::collections::BTreeSet;

use crate::types::{Pos, Senses};

/// Scent written to a tile the player has just left.
pub const MAX_SCENT: u8 = 3;

#[derive(Clone, Debug)]
pub struct ScentMemory {
    size: usize,
    grid: Vec<u8>,
    wumpus_visited: BTreeSet<Pos>,
    // At most one tile: the player's previous position from the latest move.
    pending_trail: Option<Pos>,
}

impl ScentMemory {
    pub fn new(size: usize, wumpus_start: Pos) -> Self {
        Self {
            size,
            grid: vec![0; size * size],
            wumpus_visited: BTreeSet::from([wumpus_start]),
            pending_trail: None,
        }
    }

    /// Queues `previous` for the next scent tick. A wall bump leaves nothing queued.
    pub fn queue_player_trail(&mut self, previous: Pos, current: Pos) {
        if previous != current {
            self.pending_trail = Some(previous);
        }
    }

    /// Decays every cell by one, then commits the pending trail at full strength.
    pub fn update_scent(&mut self) {
        for cell in &mut self.grid {
            *cell = cell.saturating_sub(1);
        }

        if let Some(trail) = self.pending_trail.take()
            && trail.in_bounds(self.size)
        {
            let idx = self.index(trail);
            self.grid[idx] = MAX_SCENT;
        }
    }

    pub fn record_wumpus_visit(&mut self, pos: Pos) {
        self.wumpus_visited.insert(pos);
    }

    /// Scent at `pos`; off-board tiles read as zero.
    pub fn scent_at(&self, pos: Pos) -> u8 {
        if !pos.in_bounds(self.size) {
            return 0;
        }
        self.grid[self.index(pos)]
    }

    pub(crate) fn set_scent(&mut self, pos: Pos, value: u8) {
        if !pos.in_bounds(self.size) {
            return;
        }
        let idx = self.index(pos);
        self.grid[idx] = value.min(MAX_SCENT);
    }

    /// Row-major copy of the grid, indexed `[y][x]`.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.grid.chunks(self.size).map(<[u8]>::to_vec).collect()
    }

    pub fn wumpus_visited(&self) -> &BTreeSet<Pos> {
        &self.wumpus_visited
    }

    pub fn pending_trail(&self) -> Option<Pos> {
        self.pending_trail
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Adjacency cues at `pos`. Breeze only looks at neighbours: standing on a
    /// pit is a loss, not a sensation. Stench and shine also fire on the tile itself.
    pub fn senses(&self, pos: Pos, pits: &BTreeSet<Pos>, wumpus: Pos, gold: Pos) -> Senses {
        let mut senses = Senses { breeze: false, stench: pos == wumpus, shine: pos == gold };
        for neighbor in pos.neighbors(self.size) {
            senses.breeze |= pits.contains(&neighbor);
            senses.stench |= neighbor == wumpus;
            senses.shine |= neighbor == gold;
        }
        senses
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.size + (pos.x as usize)
    }
}
