use std::collections::BTreeMap;

use tracing::info;

use super::{Session, SessionView};
use crate::config::GameConfig;
use crate::game::Game;
use crate::policy::WumpusPolicy;
use crate::seed::generate_runtime_seed;
use crate::types::{ConfigError, PlayerAction, SessionId, TurnError};

/// Owns every live session. Mutation takes `&mut self`, so each session sees at most
/// one turn in flight; a server shares the store behind whatever lock it chooses.
#[derive(Default)]
pub struct SessionStore {
    sessions: BTreeMap<SessionId, Session>,
    next_id: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, config: &GameConfig) -> Result<(SessionId, SessionView), ConfigError> {
        config.validate_session_grid()?;
        let seed = config.seed.unwrap_or_else(generate_runtime_seed);
        let game = Game::new(config.grid_size, config.pit_count(), seed)?;

        let id = SessionId(self.next_id);
        self.next_id += 1;
        let session = Session::new(game);
        let view = session.view();
        self.sessions.insert(id, session);
        info!(session = id.0, grid_size = config.grid_size, seed, "session started");
        Ok((id, view))
    }

    pub fn apply(
        &mut self,
        id: SessionId,
        action: PlayerAction,
        policy: &mut dyn WumpusPolicy,
    ) -> Result<SessionView, TurnError> {
        let session = self.sessions.get_mut(&id).ok_or(TurnError::UnknownSession(id))?;
        session.apply_action(action, policy)
    }

    pub fn view(&self, id: SessionId) -> Result<SessionView, TurnError> {
        self.sessions.get(&id).map(Session::view).ok_or(TurnError::UnknownSession(id))
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn remove(&mut self, id: SessionId) -> Option<Session> {
        self.sessions.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
