pub mod config;
pub mod game;
pub mod journal;
pub mod journal_file;
pub mod mapgen;
pub mod policy;
pub mod replay;
pub mod scent;
pub mod seed;
pub mod session;
pub mod types;

pub use config::GameConfig;
pub use game::{BoardState, Game, Layout, MAX_BOARD_SIZE, max_pits};
pub use journal::{TurnJournal, TurnRecord};
pub use policy::{
    LinearPolicy, OBSERVATION_LEN, Observation, ObservationInput, PolicyError,
    UniformRandomPolicy, WumpusPolicy,
};
pub use replay::{ReplayError, ReplayResult, replay_to_end};
pub use scent::{MAX_SCENT, ScentMemory};
pub use session::{PolicySelector, Session, SessionStore, SessionView, arrow_hits_wumpus};
pub use types::*;
