use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::scent::MAX_SCENT;
use crate::types::Pos;

pub const OBSERVATION_LEN: usize = 9;

/// Engine state as the policy sees it. Positions are `[x, y]`; the scent grid is `[y][x]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationInput {
    pub grid_size: usize,
    pub player_pos: [i32; 2],
    pub wumpus_pos: [i32; 2],
    pub scent_grid: Vec<Vec<u8>>,
}

impl ObservationInput {
    pub fn from_game(game: &Game) -> Self {
        let player = game.player_pos();
        let wumpus = game.wumpus_pos();
        Self {
            grid_size: game.size(),
            player_pos: [player.x, player.y],
            wumpus_pos: [wumpus.x, wumpus.y],
            scent_grid: game.scent_grid(),
        }
    }

    fn scent_at(&self, pos: Pos) -> f32 {
        if !pos.in_bounds(self.grid_size) {
            return 0.0;
        }
        let value = self
            .scent_grid
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
            .unwrap_or(0);
        f32::from(value) / f32::from(MAX_SCENT)
    }
}

/// `[wumpus.x, wumpus.y, player.x, player.y, scent(self), scent(N), scent(E), scent(S),
/// scent(W)]`, every entry in `[0, 1]`. Coordinates are divided by `grid_size - 1`,
/// scents by [`MAX_SCENT`]; off-board neighbours read 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation(pub [f32; OBSERVATION_LEN]);

impl Observation {
    pub fn zeros() -> Self {
        Self([0.0; OBSERVATION_LEN])
    }

    pub fn from_input(input: &ObservationInput) -> Self {
        let denom = input.grid_size.saturating_sub(1).max(1) as f32;
        let [wx, wy] = input.wumpus_pos;
        let [px, py] = input.player_pos;
        let wumpus = Pos::new(wx, wy);

        Self([
            wx as f32 / denom,
            wy as f32 / denom,
            px as f32 / denom,
            py as f32 / denom,
            input.scent_at(wumpus),
            input.scent_at(Pos::new(wx, wy - 1)),
            input.scent_at(Pos::new(wx + 1, wy)),
            input.scent_at(Pos::new(wx, wy + 1)),
            input.scent_at(Pos::new(wx - 1, wy)),
        ])
    }

    pub fn values(&self) -> &[f32; OBSERVATION_LEN] {
        &self.0
    }
}
