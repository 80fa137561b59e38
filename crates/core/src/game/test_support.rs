//! Shared fixtures for the `game` test suites.

use super::*;

/// 4x4 board with no pits: player at the origin, Wumpus in the far corner, gold on the
/// top-right tile.
pub(super) fn corner_board() -> Game {
    Game::with_layout(
        4,
        7,
        Layout {
            player: Pos::new(0, 0),
            wumpus: Pos::new(3, 3),
            gold: Pos::new(3, 0),
            pits: BTreeSet::new(),
        },
    )
    .expect("corner board layout is valid")
}

/// Forces positions past layout validation, for precedence checks on overlapping tiles.
pub(super) fn overlap(game: &mut Game, player: Pos, wumpus: Pos, gold: Pos, pits: &[Pos]) {
    game.state.player = player;
    game.state.wumpus = wumpus;
    game.state.gold = gold;
    game.state.pits = pits.iter().copied().collect();
}
