//! Turn orchestration for one game: arrows, explored tiles, player-facing messages and
//! the Wumpus's reply. This module exists to sequence engine calls into full turns.
//! It does not own board rules, sensing or the Wumpus's strategy.

mod messages;
mod selector;
mod store;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::game::Game;
use crate::journal::TurnJournal;
use crate::policy::{ObservationInput, WumpusPolicy};
use crate::types::*;

pub use selector::PolicySelector;
pub use store::SessionStore;

pub const STARTING_ARROWS: u8 = 1;

/// What a client sees after each turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub status: GameStatus,
    pub grid_size: usize,
    pub turn: u32,
    pub player_pos: Pos,
    pub arrows_remaining: u8,
    pub explored_tiles: Vec<Pos>,
    pub senses: Senses,
    pub message: String,
}

#[derive(Clone, Debug)]
pub(crate) struct TurnOutcome {
    pub(crate) view: SessionView,
    pub(crate) wumpus_move: Option<Direction>,
}

#[derive(Clone)]
pub struct Session {
    game: Game,
    turn: u32,
    arrows_remaining: u8,
    explored_tiles: Vec<Pos>,
    explored: BTreeSet<Pos>,
    message: String,
    journal: TurnJournal,
}

impl Session {
    /// Starts a session on an unplayed game. The journal pins the starting board, so
    /// boards built with [`Game::with_layout`] or rerolled by [`Game::reset`] replay too.
    pub fn new(game: Game) -> Self {
        let start = game.player_pos();
        let journal = TurnJournal::new(game.seed(), game.size(), game.num_pits())
            .with_layout(game.layout());
        Self {
            game,
            turn: 0,
            arrows_remaining: STARTING_ARROWS,
            explored_tiles: vec![start],
            explored: BTreeSet::from([start]),
            message: messages::OPENING.to_string(),
            journal,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn arrows_remaining(&self) -> u8 {
        self.arrows_remaining
    }

    /// Tiles the player has stood on, in first-visit order.
    pub fn explored_tiles(&self) -> &[Pos] {
        &self.explored_tiles
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn journal(&self) -> &TurnJournal {
        &self.journal
    }

    pub fn view(&self) -> SessionView {
        self.view_with(self.game.player_senses())
    }

    /// Resolves one full turn: the player's action, then, if the game is still on,
    /// the policy's Wumpus move and a scent tick.
    pub fn apply_action(
        &mut self,
        action: PlayerAction,
        policy: &mut dyn WumpusPolicy,
    ) -> Result<SessionView, TurnError> {
        let outcome = self.resolve(action, |game| {
            let observation = policy.build_observation(&ObservationInput::from_game(game));
            policy.decide(&observation)
        })?;
        Ok(outcome.view)
    }

    pub(crate) fn resolve(
        &mut self,
        action: PlayerAction,
        decide: impl FnOnce(&Game) -> Direction,
    ) -> Result<TurnOutcome, TurnError> {
        if self.game.is_over() {
            return Err(TurnError::GameOver);
        }
        if matches!(action, PlayerAction::Shoot(_)) && self.arrows_remaining == 0 {
            return Err(TurnError::NoArrows);
        }

        self.turn += 1;
        let mut senses_before_wumpus = None;

        match action {
            PlayerAction::Shoot(direction) => {
                self.arrows_remaining -= 1;
                if arrow_hits_wumpus(self.game.player_pos(), self.game.wumpus_pos(), direction) {
                    self.game.mark_wumpus_killed();
                    self.message = messages::ARROW_HIT.to_string();
                } else {
                    self.game.check_game_over();
                    self.message = messages::arrow_miss(direction);
                }
            }
            PlayerAction::Move(direction) => {
                let status = self.game.move_player(direction);
                self.record_explored(self.game.player_pos());
                self.message = messages::status(status).to_string();
                if !status.is_terminal() {
                    senses_before_wumpus = Some(self.game.player_senses());
                }
            }
        }

        if self.game.is_over() {
            debug!(turn = self.turn, status = self.game.status().label(), "player ended the game");
            self.journal.append_turn(action, None);
            return Ok(TurnOutcome { view: self.view(), wumpus_move: None });
        }

        let wumpus_move = decide(&self.game);
        self.game.move_wumpus(wumpus_move);
        let status = self.game.check_game_over();
        self.game.update_scent();
        trace!(turn = self.turn, ?wumpus_move, wumpus = ?self.game.wumpus_pos(), "wumpus moved");

        let mut senses = self.game.player_senses();
        if !status.is_terminal() {
            let cue = messages::senses(senses);
            if matches!(action, PlayerAction::Move(_)) {
                self.message = cue.to_string();
            } else if !cue.is_empty() {
                self.message = format!("{} {cue}", self.message);
            }
        } else if let Some(before) = senses_before_wumpus
            && status == GameStatus::PlayerLostWumpus
            && before.stench
        {
            self.message = messages::CAUGHT_AFTER_STENCH.to_string();
            senses = before;
        } else {
            self.message = messages::status(status).to_string();
        }

        if status.is_terminal() {
            debug!(turn = self.turn, status = status.label(), "wumpus ended the game");
        }
        self.journal.append_turn(action, Some(wumpus_move));
        Ok(TurnOutcome { view: self.view_with(senses), wumpus_move: Some(wumpus_move) })
    }

    fn record_explored(&mut self, pos: Pos) {
        if self.explored.insert(pos) {
            self.explored_tiles.push(pos);
        }
    }

    fn view_with(&self, senses: Senses) -> SessionView {
        SessionView {
            status: self.game.status(),
            grid_size: self.game.size(),
            turn: self.turn,
            player_pos: self.game.player_pos(),
            arrows_remaining: self.arrows_remaining,
            explored_tiles: self.explored_tiles.clone(),
            senses,
            message: self.message.clone(),
        }
    }
}

/// An arrow flies in a straight line to the board edge; it hits if the Wumpus is
/// anywhere ahead on the player's row or column.
pub fn arrow_hits_wumpus(player: Pos, wumpus: Pos, direction: Direction) -> bool {
    match direction {
        Direction::North => player.x == wumpus.x && wumpus.y < player.y,
        Direction::South => player.x == wumpus.x && wumpus.y > player.y,
        Direction::East => player.y == wumpus.y && wumpus.x > player.x,
        Direction::West => player.y == wumpus.y && wumpus.x < player.x,
    }
}
