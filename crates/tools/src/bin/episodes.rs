//! Plays many games with a random player against the configured Wumpus policy and
//! prints how they ended.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hunter_core::journal_file::write_journal_file;
use hunter_core::seed::{derive_stream_seed, generate_runtime_seed};
use hunter_core::{Direction, Game, GameConfig, GameStatus, PlayerAction, PolicySelector, Session};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 100)]
    episodes: u32,
    /// TOML game config; the flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    grid_size: Option<usize>,
    #[arg(short, long)]
    seed: Option<u64>,
    /// Trained model JSON; falls back to `MODEL_PATH`, then the default location
    #[arg(short, long)]
    model: Option<PathBuf>,
    #[arg(long, default_value_t = 500)]
    max_turns: u32,
    /// Write each episode's hash-chained journal here as `episode-<n>.jsonl`
    #[arg(long)]
    journal_dir: Option<PathBuf>,
}

fn resolve_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(grid_size) = args.grid_size {
        config.grid_size = grid_size;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.model.is_some() {
        config.model_path.clone_from(&args.model);
    }
    Ok(config)
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

/// Shoots blindly on a stench while an arrow is left, otherwise wanders.
fn player_action(session: &Session, rng: &mut ChaCha8Rng) -> PlayerAction {
    let direction = choose(rng, &Direction::ALL);
    if session.arrows_remaining() > 0 && session.game().player_senses().stench {
        PlayerAction::Shoot(direction)
    } else {
        PlayerAction::Move(direction)
    }
}

#[derive(Default)]
struct Summary {
    outcomes: BTreeMap<&'static str, u32>,
    lengths: Vec<u32>,
}

impl Summary {
    fn record(&mut self, outcome: &'static str, turns: u32) {
        *self.outcomes.entry(outcome).or_default() += 1;
        self.lengths.push(turns);
    }

    fn print(&self) {
        let total = self.lengths.len().max(1) as f64;
        println!("Episodes: {}", self.lengths.len());
        for (outcome, count) in &self.outcomes {
            println!("  {outcome:<18} {count:>6}  ({:.1}%)", f64::from(*count) * 100.0 / total);
        }

        let mean = self.lengths.iter().map(|&len| f64::from(len)).sum::<f64>() / total;
        let variance =
            self.lengths.iter().map(|&len| (f64::from(len) - mean).powi(2)).sum::<f64>() / total;
        let min = self.lengths.iter().min().copied().unwrap_or(0);
        let max = self.lengths.iter().max().copied().unwrap_or(0);
        println!(
            "Episode length: mean {mean:.2}, std {:.2}, min {min}, max {max}",
            variance.sqrt()
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;
    let seed = config.seed.unwrap_or_else(generate_runtime_seed);
    let grid_size = config.grid_size;
    let num_pits = config.pit_count();

    let mut selector =
        PolicySelector::new(config.resolved_model_path(), derive_stream_seed(seed, u64::MAX));
    let mut player_rng = ChaCha8Rng::seed_from_u64(seed);
    let mut summary = Summary::default();
    if let Some(dir) = &args.journal_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create journal dir: {}", dir.display()))?;
    }

    info!(episodes = args.episodes, grid_size, num_pits, seed, "starting episodes");
    for episode in 0..args.episodes {
        let board_seed = derive_stream_seed(seed, u64::from(episode));
        let mut session = Session::new(Game::new(grid_size, num_pits, board_seed)?);

        while !session.game().is_over() && session.turn() < args.max_turns {
            let action = player_action(&session, &mut player_rng);
            session.apply_action(action, selector.active())?;
        }

        if let Some(dir) = &args.journal_dir {
            let path = dir.join(format!("episode-{episode}.jsonl"));
            write_journal_file(&path, session.journal())
                .with_context(|| format!("Failed to write journal: {}", path.display()))?;
        }

        let status = session.game().status();
        let outcome = if status == GameStatus::Ongoing { "TurnLimit" } else { status.label() };
        debug!(episode, outcome, turns = session.turn(), "episode finished");
        summary.record(outcome, session.turn());
    }

    println!("Seed: {seed}");
    println!("Wumpus policy: {}", if selector.is_trained() { "trained" } else { "random" });
    summary.print();
    Ok(())
}
