//! Append-only JSONL turn journal with a SHA-256 hash chain.
//!
//! - Line 1: header with `format_version`, `seed`, `grid_size`, `num_pits` and, when
//!   the board was pinned, `layout`.
//! - Lines 2+: one accepted turn each, chained through `prev_sha256_hex` and `sha256_hex`.
//!
//! Every line is flushed as it is written, so a crash can tear at most the final line.
//! Loading is all-or-nothing: the first malformed, incomplete or hash-broken line
//! fails the whole load with the line number in the error.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::game::Layout;
use crate::journal::{TurnJournal, TurnRecord};
use crate::types::{Direction, PlayerAction};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct FileHeader {
    format_version: u16,
    seed: u64,
    grid_size: usize,
    num_pits: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    layout: Option<Layout>,
}

/// Canonical hash input for one record, before the previous hash is appended.
#[derive(Serialize)]
struct RecordBody<'a> {
    seq: u64,
    action: &'a PlayerAction,
    wumpus_move: &'a Option<Direction>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    action: PlayerAction,
    wumpus_move: Option<Direction>,
    prev_sha256_hex: String,
    sha256_hex: String,
}

const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// `hex(SHA-256(body_json || prev_sha256_hex))`
fn compute_record_sha256(body_json: &str, prev_sha256_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    format!("{:064x}", hasher.finalize())
}

fn record_body_json(record: &TurnRecord) -> serde_json::Result<String> {
    serde_json::to_string(&RecordBody {
        seq: record.seq,
        action: &record.action,
        wumpus_move: &record.wumpus_move,
    })
}

pub struct JournalWriter {
    writer: BufWriter<File>,
    last_sha256_hex: String,
    next_seq: u64,
}

impl JournalWriter {
    /// Creates the file (and missing parent directories) and writes the header from
    /// `journal`. Turns already in `journal` are not written; append them explicitly.
    pub fn create(path: &Path, journal: &TurnJournal) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        let header = FileHeader {
            format_version: journal.format_version,
            seed: journal.seed,
            grid_size: journal.grid_size,
            num_pits: journal.num_pits,
            layout: journal.layout.clone(),
        };
        let header_json = serde_json::to_string(&header).map_err(io::Error::other)?;
        writeln!(writer, "{header_json}")?;
        writer.flush()?;

        Ok(Self { writer, last_sha256_hex: INITIAL_HASH.to_string(), next_seq: 0 })
    }

    /// Reopens a journal for appending. `last_sha256_hex` and `next_seq` come from
    /// [`LoadedJournal`].
    pub fn resume(path: &Path, last_sha256_hex: String, next_seq: u64) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Self { writer: BufWriter::new(file), last_sha256_hex, next_seq })
    }

    /// Appends one turn. The record's own `seq` is ignored in favour of the writer's
    /// counter so the file stays gap-free.
    pub fn append(&mut self, record: &TurnRecord) -> io::Result<()> {
        let record = TurnRecord { seq: self.next_seq, ..record.clone() };
        let body_json = record_body_json(&record).map_err(io::Error::other)?;
        let sha256_hex = compute_record_sha256(&body_json, &self.last_sha256_hex);

        let line = FileRecord {
            seq: record.seq,
            action: record.action,
            wumpus_move: record.wumpus_move,
            prev_sha256_hex: self.last_sha256_hex.clone(),
            sha256_hex: sha256_hex.clone(),
        };
        let line_json = serde_json::to_string(&line).map_err(io::Error::other)?;
        writeln!(self.writer, "{line_json}")?;
        self.writer.flush()?;

        self.last_sha256_hex = sha256_hex;
        self.next_seq += 1;
        Ok(())
    }

    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }
}

/// Writes a complete journal in one go.
pub fn write_journal_file(path: &Path, journal: &TurnJournal) -> io::Result<()> {
    let mut writer = JournalWriter::create(path, journal)?;
    for record in &journal.turns {
        writer.append(record)?;
    }
    Ok(())
}

#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: TurnJournal,
    /// Hash of the last valid record, or the initial hash if there are none.
    pub last_sha256_hex: String,
    pub next_seq: u64,
}

#[derive(Debug, Error)]
pub enum JournalLoadError {
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("journal file is empty")]
    EmptyFile,
    #[error("invalid journal header at line {line}: {message}")]
    InvalidHeader { line: usize, message: String },
    #[error("invalid journal record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
    /// The file ended without a trailing newline.
    #[error("incomplete journal line at line {line}")]
    IncompleteLine { line: usize },
    #[error("SHA-256 hash chain broken at line {line}")]
    HashChainBroken { line: usize },
}

pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(JournalLoadError::EmptyFile);
    }
    if !content.ends_with('\n') {
        return Err(JournalLoadError::IncompleteLine { line: lines.len() });
    }

    let header: FileHeader = serde_json::from_str(lines[0])
        .map_err(|e| JournalLoadError::InvalidHeader { line: 1, message: e.to_string() })?;
    let mut journal = TurnJournal::new(header.seed, header.grid_size, header.num_pits);
    journal.format_version = header.format_version;
    journal.layout = header.layout;

    let mut prev_sha256_hex = INITIAL_HASH.to_string();
    for (index, line) in lines.iter().enumerate().skip(1) {
        let line_number = index + 1;
        let invalid = |message: String| JournalLoadError::InvalidRecord { line: line_number, message };

        if line.is_empty() {
            return Err(invalid("empty line".to_string()));
        }
        let stored: FileRecord = serde_json::from_str(line).map_err(|e| invalid(e.to_string()))?;

        let expected_seq = journal.turns.len() as u64;
        if stored.seq != expected_seq {
            return Err(invalid(format!("expected seq {expected_seq}, found {}", stored.seq)));
        }
        if stored.prev_sha256_hex != prev_sha256_hex {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }

        let record =
            TurnRecord { seq: stored.seq, action: stored.action, wumpus_move: stored.wumpus_move };
        let body_json = record_body_json(&record).map_err(|e| invalid(e.to_string()))?;
        if stored.sha256_hex != compute_record_sha256(&body_json, &prev_sha256_hex) {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }

        journal.turns.push(record);
        prev_sha256_hex = stored.sha256_hex;
    }

    let next_seq = journal.turns.len() as u64;
    Ok(LoadedJournal { journal, last_sha256_hex: prev_sha256_hex, next_seq })
}
