use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use hunter_core::journal_file::load_journal_from_file;
use hunter_core::{TurnJournal, replay_to_end};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Replay a recorded Hunter Wumpus session", long_about = None)]
struct Args {
    /// Journal to replay: a `.jsonl` hash-chained file or a plain JSON journal
    #[arg(short, long)]
    journal: PathBuf,
}

fn read_journal(path: &Path) -> Result<TurnJournal> {
    if path.extension().is_some_and(|ext| ext == "jsonl") {
        let loaded = load_journal_from_file(path)
            .with_context(|| format!("Failed to load journal file: {}", path.display()))?;
        return Ok(loaded.journal);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read journal file: {}", path.display()))?;
    serde_json::from_str(&data).context("Failed to deserialize journal JSON")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let args = Args::parse();
    let journal = read_journal(&args.journal)?;
    let result = replay_to_end(&journal).context("Replay failed")?;

    println!("Replay complete.");
    println!("Grid: {}x{} with {} pits", journal.grid_size, journal.grid_size, journal.num_pits);
    println!("Final Turn: {}", result.final_turn);
    println!("Status: {}", result.final_status.label());
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
