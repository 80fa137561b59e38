use serde::{Deserialize, Serialize};

use crate::game::Layout;
use crate::types::{Direction, PlayerAction};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Everything needed to rebuild a session: the board parameters plus every accepted
/// turn. Wumpus moves are recorded so replay does not depend on the policy.
///
/// `layout` pins the starting board. Without it, replay rolls the board from `seed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnJournal {
    pub format_version: u16,
    pub seed: u64,
    pub grid_size: usize,
    pub num_pits: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    pub turns: Vec<TurnRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub seq: u64,
    pub action: PlayerAction,
    /// `None` when the player's action ended the game before the Wumpus acted.
    pub wumpus_move: Option<Direction>,
}

impl TurnJournal {
    pub fn new(seed: u64, grid_size: usize, num_pits: usize) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            seed,
            grid_size,
            num_pits,
            layout: None,
            turns: Vec::new(),
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn append_turn(&mut self, action: PlayerAction, wumpus_move: Option<Direction>) {
        let seq = self.turns.len() as u64;
        self.turns.push(TurnRecord { seq, action, wumpus_move });
    }
}
