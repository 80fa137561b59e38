use super::test_support::*;
use super::*;
use crate::scent::MAX_SCENT;

#[test]
fn construction_rejects_tiny_boards_and_crowded_pits() {
    assert!(matches!(Game::new(1, 0, 1), Err(ConfigError::InvalidSize { size: 1 })));
    assert!(matches!(Game::new(0, 0, 1), Err(ConfigError::InvalidSize { size: 0 })));
    assert!(matches!(
        Game::new(4, 14, 1),
        Err(ConfigError::TooManyPits { num_pits: 14, max: 13 })
    ));
    assert!(Game::new(4, 13, 1).is_ok());
    assert!(Game::new(2, 1, 1).is_ok());
}

#[test]
fn oversized_boards_are_rejected_without_overflow() {
    assert_eq!(max_pits(usize::MAX), usize::MAX);
    assert!(matches!(
        Game::new(usize::MAX, 0, 1),
        Err(ConfigError::SizeTooLarge { size: usize::MAX, max: MAX_BOARD_SIZE })
    ));
    assert!(matches!(
        Game::new(MAX_BOARD_SIZE + 1, 0, 1),
        Err(ConfigError::SizeTooLarge { .. })
    ));
}

#[test]
fn new_game_starts_ongoing_at_origin() {
    let game = Game::new(6, 3, 99).unwrap();
    assert_eq!(game.player_pos(), Pos::ORIGIN);
    assert_eq!(game.status(), GameStatus::Ongoing);
    assert_eq!(game.pits().len(), 3);
    assert_eq!(game.wumpus_visited().len(), 1);
    assert!(game.wumpus_visited().contains(&game.wumpus_pos()));
}

#[test]
fn with_layout_rejects_overlap_and_off_board() {
    let overlapping = Layout {
        player: Pos::new(0, 0),
        wumpus: Pos::new(2, 2),
        gold: Pos::new(2, 2),
        pits: BTreeSet::new(),
    };
    assert!(matches!(
        Game::with_layout(4, 0, overlapping),
        Err(ConfigError::OverlappingEntities { pos }) if pos == Pos::new(2, 2)
    ));

    let off_board = Layout {
        player: Pos::new(0, 0),
        wumpus: Pos::new(4, 0),
        gold: Pos::new(2, 2),
        pits: BTreeSet::new(),
    };
    assert!(matches!(Game::with_layout(4, 0, off_board), Err(ConfigError::OutOfBounds { .. })));
}

#[test]
fn wall_bump_keeps_position_and_queues_no_trail() {
    let mut game = corner_board();
    for _ in 0..3 {
        assert_eq!(game.move_player(Direction::North), GameStatus::Ongoing);
        assert_eq!(game.player_pos(), Pos::ORIGIN);
    }
    assert_eq!(game.scent().pending_trail(), None);
}

#[test]
fn player_move_queues_previous_tile_until_scent_tick() {
    let mut game = corner_board();
    game.move_player(Direction::East);
    assert_eq!(game.player_pos(), Pos::new(1, 0));
    assert_eq!(game.scent_grid()[0][0], 0);

    game.move_wumpus(Direction::West);
    game.update_scent();
    assert_eq!(game.scent_grid()[0][0], MAX_SCENT);
}

#[test]
fn scent_decays_one_per_turn() {
    let mut game = corner_board();
    game.move_player(Direction::East);
    game.move_wumpus(Direction::West);
    game.update_scent();
    assert_eq!(game.scent_grid()[0][0], MAX_SCENT);

    game.move_player(Direction::South);
    game.move_wumpus(Direction::West);
    game.update_scent();
    assert_eq!(game.scent_grid()[0][0], MAX_SCENT - 1);

    game.move_player(Direction::South);
    game.move_wumpus(Direction::West);
    game.update_scent();
    assert_eq!(game.scent_grid()[0][0], MAX_SCENT - 2);

    for _ in 0..10 {
        game.move_player(Direction::South);
        game.move_wumpus(Direction::West);
        game.update_scent();
    }
    assert_eq!(game.scent_grid()[0][0], 0);
}

#[test]
fn move_player_does_not_touch_existing_scent_before_tick() {
    let mut game = corner_board();
    game.scent.set_scent(Pos::ORIGIN, 1);
    game.move_player(Direction::East);
    assert_eq!(game.scent_grid()[0][0], 1);

    game.move_wumpus(Direction::West);
    game.update_scent();
    assert_eq!(game.scent_grid()[0][0], MAX_SCENT);
}

#[test]
fn wumpus_moves_grow_visit_history() {
    let mut game = corner_board();
    let initial = game.wumpus_visited().len();
    game.move_wumpus(Direction::West);
    assert_eq!(game.wumpus_visited().len(), initial + 1);
    game.move_wumpus(Direction::North);
    assert_eq!(game.wumpus_visited().len(), initial + 2);
    // Stepping back onto a known tile adds nothing.
    game.move_wumpus(Direction::South);
    assert_eq!(game.wumpus_visited().len(), initial + 2);
}

#[test]
fn wumpus_move_leaves_status_for_caller() {
    let mut game = corner_board();
    overlap(&mut game, Pos::new(2, 3), Pos::new(3, 3), Pos::new(3, 0), &[]);
    game.move_wumpus(Direction::West);
    assert_eq!(game.wumpus_pos(), game.player_pos());
    assert_eq!(game.status(), GameStatus::Ongoing);
    assert_eq!(game.check_game_over(), GameStatus::PlayerLostWumpus);
}

#[test]
fn player_on_pit_loses() {
    let mut game = corner_board();
    let pit = Pos::new(2, 2);
    overlap(&mut game, pit, Pos::new(3, 3), Pos::new(3, 0), &[pit]);
    assert_eq!(game.check_game_over(), GameStatus::PlayerLostPit);
}

#[test]
fn player_on_wumpus_loses() {
    let mut game = corner_board();
    let tile = Pos::new(1, 1);
    overlap(&mut game, tile, tile, Pos::new(3, 0), &[Pos::new(3, 1)]);
    assert_eq!(game.check_game_over(), GameStatus::PlayerLostWumpus);
}

#[test]
fn player_on_gold_wins() {
    let mut game = corner_board();
    game.move_player(Direction::East);
    game.move_player(Direction::East);
    assert_eq!(game.move_player(Direction::East), GameStatus::PlayerWon);
}

#[test]
fn pit_beats_wumpus_beats_gold() {
    let tile = Pos::new(2, 2);

    let mut game = corner_board();
    overlap(&mut game, tile, Pos::new(3, 3), tile, &[tile]);
    assert_eq!(game.check_game_over(), GameStatus::PlayerLostPit, "pit over gold");

    let mut game = corner_board();
    overlap(&mut game, tile, tile, Pos::new(3, 0), &[tile]);
    assert_eq!(game.check_game_over(), GameStatus::PlayerLostPit, "pit over wumpus");

    let mut game = corner_board();
    overlap(&mut game, tile, tile, tile, &[]);
    assert_eq!(game.check_game_over(), GameStatus::PlayerLostWumpus, "wumpus over gold");

    let mut game = corner_board();
    overlap(&mut game, tile, tile, tile, &[tile]);
    assert_eq!(game.check_game_over(), GameStatus::PlayerLostPit, "pit over both");
}

#[test]
fn check_game_over_is_idempotent() {
    let mut game = corner_board();
    overlap(&mut game, Pos::new(1, 1), Pos::new(1, 1), Pos::new(3, 0), &[]);
    let first = game.check_game_over();
    let second = game.check_game_over();
    assert_eq!(first, second);
    assert_eq!(game.status(), first);
}

#[test]
fn killed_wumpus_survives_status_checks() {
    let mut game = corner_board();
    game.mark_wumpus_killed();
    assert_eq!(game.check_game_over(), GameStatus::WumpusKilled);
    assert!(game.is_over());
}

/// Drives `game` into `expected`, then checks that no engine call can leave it.
fn assert_terminal_is_final(mut game: Game, expected: GameStatus) {
    assert_eq!(game.status(), expected);
    let player = game.player_pos();
    let wumpus = game.wumpus_pos();
    for direction in Direction::ALL {
        assert_eq!(game.move_player(direction), expected);
        game.move_wumpus(direction);
        assert_eq!(game.check_game_over(), expected);
    }
    assert_eq!(game.player_pos(), player);
    assert_eq!(game.wumpus_pos(), wumpus);
    assert_eq!(game.status(), expected);
}

#[test]
fn won_game_stays_won() {
    let mut game = corner_board();
    game.state.gold = Pos::new(1, 0);
    assert_eq!(game.move_player(Direction::East), GameStatus::PlayerWon);
    assert_terminal_is_final(game, GameStatus::PlayerWon);
}

#[test]
fn pit_loss_stays_lost() {
    let mut game = corner_board();
    game.state.pits = BTreeSet::from([Pos::new(0, 1)]);
    assert_eq!(game.move_player(Direction::South), GameStatus::PlayerLostPit);
    assert_terminal_is_final(game, GameStatus::PlayerLostPit);
}

#[test]
fn caught_player_stays_caught() {
    let mut game = corner_board();
    game.state.wumpus = Pos::new(1, 0);
    assert_eq!(game.move_player(Direction::East), GameStatus::PlayerLostWumpus);
    assert_terminal_is_final(game, GameStatus::PlayerLostWumpus);
}

#[test]
fn killed_wumpus_stays_killed_through_moves() {
    let mut game = corner_board();
    game.mark_wumpus_killed();
    assert_terminal_is_final(game, GameStatus::WumpusKilled);
}

#[test]
fn senses_follow_adjacency_rules() {
    let mut game = corner_board();
    overlap(&mut game, Pos::ORIGIN, Pos::new(3, 3), Pos::new(3, 0), &[Pos::new(2, 1)]);
    assert!(game.senses_at(Pos::new(2, 0)).breeze);
    assert!(game.senses_at(Pos::new(2, 0)).shine);
    assert!(!game.senses_at(Pos::new(2, 0)).stench);

    game.state.pits = BTreeSet::from([Pos::new(2, 2)]);
    assert!(!game.senses_at(Pos::new(1, 1)).breeze);

    game.state.wumpus = Pos::new(1, 1);
    assert!(game.senses_at(Pos::new(1, 1)).stench);
    assert_eq!(game.player_senses(), Senses::default());
}

#[test]
fn reset_rerolls_board_and_clears_memory() {
    let mut game = Game::new(5, 2, 4242).unwrap();
    game.move_player(Direction::South);
    game.update_scent();
    game.mark_wumpus_killed();

    game.reset();
    assert_eq!(game.player_pos(), Pos::ORIGIN);
    assert_eq!(game.status(), GameStatus::Ongoing);
    assert_eq!(game.pits().len(), 2);
    assert!(game.scent_grid().iter().flatten().all(|&value| value == 0));
    assert_eq!(game.wumpus_visited().len(), 1);
}

#[test]
fn snapshot_hash_tracks_state() {
    let a = Game::new(5, 2, 17).unwrap();
    let b = Game::new(5, 2, 17).unwrap();
    assert_eq!(a.snapshot_hash(), b.snapshot_hash());

    let mut c = Game::new(5, 2, 17).unwrap();
    c.move_wumpus(Direction::North);
    c.move_wumpus(Direction::West);
    c.update_scent();
    let mut d = c.clone();
    assert_eq!(c.snapshot_hash(), d.snapshot_hash());
    d.update_scent();
    d.move_player(Direction::East);
    assert_ne!(c.snapshot_hash(), d.snapshot_hash());
}
