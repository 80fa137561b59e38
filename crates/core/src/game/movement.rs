//! Movement resolution and terminal-state checks.

use super::*;

impl Game {
    /// One step in `direction`, clamped to the board. Walking into a wall is a no-op.
    pub fn next_position(&self, pos: Pos, direction: Direction) -> Pos {
        let max = self.state.size as i32 - 1;
        let stepped = pos.step(direction);
        Pos { x: stepped.x.clamp(0, max), y: stepped.y.clamp(0, max) }
    }

    /// Moves the player, queues the vacated tile as scent and re-evaluates the status.
    /// A finished game ignores the move.
    pub fn move_player(&mut self, direction: Direction) -> GameStatus {
        if self.is_over() {
            return self.status;
        }
        let previous = self.state.player;
        let next = self.next_position(previous, direction);
        self.state.player = next;
        self.scent.queue_player_trail(previous, next);
        self.check_game_over()
    }

    /// Moves the Wumpus and remembers the tile. Callers must run
    /// [`Game::check_game_over`] afterwards; this does not touch the status.
    /// A finished game ignores the move.
    pub fn move_wumpus(&mut self, direction: Direction) {
        if self.is_over() {
            return;
        }
        let next = self.next_position(self.state.wumpus, direction);
        self.state.wumpus = next;
        self.scent.record_wumpus_visit(next);
    }

    /// Assigns and returns the status implied by the player's tile. Pits take
    /// precedence over the Wumpus, which takes precedence over the gold.
    /// Once terminal, the status never changes again.
    pub fn check_game_over(&mut self) -> GameStatus {
        if self.status.is_terminal() {
            return self.status;
        }

        let player = self.state.player;
        self.status = if self.state.pits.contains(&player) {
            GameStatus::PlayerLostPit
        } else if player == self.state.wumpus {
            GameStatus::PlayerLostWumpus
        } else if player == self.state.gold {
            GameStatus::PlayerWon
        } else {
            GameStatus::Ongoing
        };
        self.status
    }

    /// Records an arrow hit. Gold and pits no longer matter after this.
    pub fn mark_wumpus_killed(&mut self) {
        self.status = GameStatus::WumpusKilled;
    }

    /// Advances scent memory by one tick. Run once per full turn, after the Wumpus moved.
    pub fn update_scent(&mut self) {
        self.scent.update_scent();
    }
}
