use anyhow::{Result, ensure};
use clap::Parser;
use hunter_core::seed::derive_stream_seed;
use hunter_core::{
    Direction, Game, GameStatus, MAX_SCENT, PlayerAction, Session, UniformRandomPolicy, max_pits,
    replay_to_end,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 10_000)]
    turns: u32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

fn check_invariants(game: &Game) -> Result<()> {
    let size = game.size();
    ensure!(game.player_pos().in_bounds(size), "Invariant failed: player off the board");
    ensure!(game.wumpus_pos().in_bounds(size), "Invariant failed: wumpus off the board");
    ensure!(
        game.scent_grid().iter().flatten().all(|&value| value <= MAX_SCENT),
        "Invariant failed: scent above maximum"
    );
    ensure!(
        game.wumpus_visited().contains(&game.wumpus_pos()),
        "Invariant failed: wumpus position missing from visit history"
    );

    if game.status() == GameStatus::Ongoing {
        let player = game.player_pos();
        ensure!(!game.pits().contains(&player), "Invariant failed: ongoing game on a pit");
        ensure!(player != game.wumpus_pos(), "Invariant failed: ongoing game with the wumpus");
        ensure!(player != game.gold_pos(), "Invariant failed: ongoing game on the gold");
        ensure!(
            game.scent().pending_trail().is_none(),
            "Invariant failed: trail left pending after a full turn"
        );
    }
    Ok(())
}

/// A finished game must shrug off every further engine call.
fn check_terminal_is_final(game: &Game) -> Result<()> {
    let status = game.status();
    let mut finished = game.clone();
    for direction in Direction::ALL {
        finished.move_player(direction);
        finished.move_wumpus(direction);
        ensure!(
            finished.check_game_over() == status,
            "Invariant failed: status left {} after the game ended",
            status.label()
        );
    }
    ensure!(
        finished.snapshot_hash() == game.snapshot_hash(),
        "Invariant failed: finished game changed under further moves"
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let args = Args::parse();
    println!("Starting fuzz harness on seed {} for {} turns...", args.seed, args.turns);

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut policy = UniformRandomPolicy::new(derive_stream_seed(args.seed, 1));
    let mut total_turns = 0;
    let mut games = 0_u64;

    while total_turns < args.turns {
        let size = 2 + rng.next_u64() as usize % 11;
        let num_pits = rng.next_u64() as usize % (max_pits(size) + 1);
        let board_seed = derive_stream_seed(args.seed, games);
        let mut session = Session::new(Game::new(size, num_pits, board_seed)?);
        check_invariants(session.game())?;

        while !session.game().is_over() && total_turns < args.turns {
            let direction = choose(&mut rng, &Direction::ALL);
            let action = if session.arrows_remaining() > 0 && rng.next_u64() % 8 == 0 {
                PlayerAction::Shoot(direction)
            } else {
                PlayerAction::Move(direction)
            };
            let before = session.turn();
            session.apply_action(action, &mut policy)?;
            ensure!(session.turn() == before + 1, "Invariant failed: turn counter skipped");
            check_invariants(session.game())?;
            total_turns += 1;
        }

        if session.game().is_over() {
            check_terminal_is_final(session.game())?;
        }

        let replayed = replay_to_end(session.journal())?;
        ensure!(
            replayed.final_snapshot_hash == session.game().snapshot_hash(),
            "Invariant failed: replay diverged for board seed {board_seed}"
        );
        debug!(games, size, num_pits, status = session.game().status().label(), "game checked");
        games += 1;
    }

    println!("Fuzzing completed successfully across {games} games.");
    Ok(())
}
