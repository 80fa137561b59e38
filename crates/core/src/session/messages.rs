//! Player-facing text for turn results.

use crate::types::{Direction, GameStatus, Senses};

pub(super) const OPENING: &str = "The hunt begins. Find the gold. Survive.";
pub(super) const ARROW_HIT: &str = "Your arrow finds its mark. The Wumpus is dead.";
pub(super) const CAUGHT_AFTER_STENCH: &str =
    "The stench was overwhelming — the Wumpus was upon you.";

pub(super) fn status(status: GameStatus) -> &'static str {
    match status {
        GameStatus::PlayerWon => "You found the gold and escaped. Victory.",
        GameStatus::WumpusKilled => "The Wumpus is dead. Silence fills the dungeon.",
        GameStatus::PlayerLostPit => "The ground gave way. There was no bottom.",
        GameStatus::PlayerLostWumpus => "The Wumpus found you in the dark.",
        GameStatus::Ongoing => "",
    }
}

/// The single most urgent cue. Shine is only mentioned when nothing is dangerous.
pub(super) fn senses(senses: Senses) -> &'static str {
    match senses {
        Senses { breeze: true, stench: true, .. } => {
            "You feel both a draft and a stench. Tread carefully."
        }
        Senses { breeze: true, .. } => "You feel a cold draft. A pit may be nearby.",
        Senses { stench: true, .. } => "Something foul is close. The Wumpus is near.",
        Senses { shine: true, .. } => "A faint glimmer catches your eye.",
        _ => "",
    }
}

pub(super) fn arrow_miss(direction: Direction) -> String {
    format!("Your arrow flies {} through the corridor but finds nothing.", direction.label())
}
