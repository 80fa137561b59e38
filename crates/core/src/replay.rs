use thiserror::Error;
use tracing::debug;

use crate::game::Game;
use crate::journal::TurnJournal;
use crate::session::Session;
use crate::types::{ConfigError, Direction, GameStatus, TurnError};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("journal describes an invalid board: {0}")]
    Config(#[from] ConfigError),
    #[error("journal layout has {found} pits but the header says {expected}")]
    PitCountMismatch { expected: usize, found: usize },
    #[error("turn {seq} was rejected: {source}")]
    Turn { seq: u64, source: TurnError },
    #[error("turn {seq} needs a Wumpus move but none was recorded")]
    MissingWumpusMove { seq: u64 },
    #[error("turn {seq} ended the game but a Wumpus move was recorded")]
    UnexpectedWumpusMove { seq: u64 },
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_status: GameStatus,
    pub final_snapshot_hash: u64,
    pub final_turn: u32,
}

/// Rebuilds the starting board, from the recorded layout when there is one and from
/// the seed otherwise, then re-applies every recorded turn.
pub fn replay_to_end(journal: &TurnJournal) -> Result<ReplayResult, ReplayError> {
    let game = match &journal.layout {
        Some(layout) => {
            if layout.pits.len() != journal.num_pits {
                return Err(ReplayError::PitCountMismatch {
                    expected: journal.num_pits,
                    found: layout.pits.len(),
                });
            }
            Game::with_layout(journal.grid_size, journal.seed, layout.clone())?
        }
        None => Game::new(journal.grid_size, journal.num_pits, journal.seed)?,
    };
    let mut session = Session::new(game);

    for record in &journal.turns {
        let mut missing = false;
        let outcome = session
            .resolve(record.action, |_| {
                record.wumpus_move.unwrap_or_else(|| {
                    missing = true;
                    Direction::North
                })
            })
            .map_err(|source| ReplayError::Turn { seq: record.seq, source })?;

        if missing {
            return Err(ReplayError::MissingWumpusMove { seq: record.seq });
        }
        if outcome.wumpus_move.is_none() && record.wumpus_move.is_some() {
            return Err(ReplayError::UnexpectedWumpusMove { seq: record.seq });
        }
        debug!(seq = record.seq, status = outcome.view.status.label(), "replayed turn");
    }

    let game = session.game();
    Ok(ReplayResult {
        final_status: game.status(),
        final_snapshot_hash: game.snapshot_hash(),
        final_turn: session.turn(),
    })
}
