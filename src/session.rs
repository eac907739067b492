//! Game session management for shared access.
//!
//! [`Game`] has no internal locking. When several callers drive the same game
//! (for example concurrent UI events), route them through a
//! [`SessionManager`]: every command holds the session map lock for its whole
//! duration, so moves, rewinds and resets on a session never interleave.

use crate::config::GameConfig;
use crate::games::morpion::{Game, GameError, GameStatus, Snapshot};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Session management error.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum SessionError {
    /// No session with this id.
    #[display("Session {} not found", _0)]
    NotFound(SessionId),

    /// A session with this id already exists.
    #[display("Session {} already exists", _0)]
    AlreadyExists(SessionId),

    /// Another thread panicked while holding the session lock.
    #[display("Session lock poisoned")]
    LockPoisoned,

    /// The game rejected the command.
    #[display("{}", _0)]
    #[from]
    Game(GameError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Game(e) => Some(e),
            _ => None,
        }
    }
}

/// A named game.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Session ID.
    pub id: SessionId,
    /// The game state.
    pub game: Game,
}

impl GameSession {
    /// Creates a new game session.
    #[instrument(skip(config))]
    pub fn new(id: SessionId, config: &GameConfig) -> Result<Self, GameError> {
        info!(session_id = %id, "Creating new game session");
        Ok(Self {
            id,
            game: Game::from_config(config)?,
        })
    }
}

/// Manages all game sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
}

impl SessionManager {
    /// Creates a new session manager.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, GameSession>>, SessionError> {
        self.sessions.lock().map_err(|_| {
            warn!("Session lock poisoned");
            SessionError::LockPoisoned
        })
    }

    /// Runs `f` against one session while holding the lock.
    fn with_session<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut GameSession) -> Result<R, GameError>,
    ) -> Result<R, SessionError> {
        let mut sessions = self.lock()?;
        let session = sessions.get_mut(id).ok_or_else(|| {
            debug!(session_id = id, "Session not found");
            SessionError::NotFound(id.to_string())
        })?;
        Ok(f(session)?)
    }

    /// Creates a new game session.
    #[instrument(skip(self, config))]
    pub fn create_session(&self, id: SessionId, config: &GameConfig) -> Result<SessionId, SessionError> {
        let mut sessions = self.lock()?;

        if sessions.contains_key(&id) {
            warn!(session_id = %id, "Session already exists");
            return Err(SessionError::AlreadyExists(id));
        }

        let session = GameSession::new(id.clone(), config)?;
        sessions.insert(id.clone(), session);

        info!(session_id = %id, "Created new session");
        Ok(id)
    }

    /// Removes a session.
    #[instrument(skip(self))]
    pub fn remove_session(&self, id: &str) -> Result<(), SessionError> {
        let mut sessions = self.lock()?;
        match sessions.remove(id) {
            Some(_) => {
                info!(session_id = id, "Removed session");
                Ok(())
            }
            None => Err(SessionError::NotFound(id.to_string())),
        }
    }

    /// Lists all active session IDs, sorted.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Result<Vec<SessionId>, SessionError> {
        let sessions = self.lock()?;
        let mut ids: Vec<_> = sessions.keys().cloned().collect();
        ids.sort();
        debug!(count = ids.len(), "Listed sessions");
        Ok(ids)
    }

    /// Returns a copy of the session's current snapshot.
    #[instrument(skip(self))]
    pub fn snapshot(&self, id: &str) -> Result<Snapshot, SessionError> {
        self.with_session(id, |session| Ok(session.game.current().clone()))
    }

    /// Returns the number of snapshots in the session's history.
    #[instrument(skip(self))]
    pub fn history_len(&self, id: &str) -> Result<usize, SessionError> {
        self.with_session(id, |session| Ok(session.game.history_len()))
    }

    /// Plays a move atomically.
    #[instrument(skip(self))]
    pub fn play_move(&self, id: &str, x: usize, y: usize) -> Result<GameStatus, SessionError> {
        self.with_session(id, |session| session.game.play_move(x, y))
    }

    /// Rewinds a session atomically.
    #[instrument(skip(self))]
    pub fn rewind_to(&self, id: &str, index: usize) -> Result<GameStatus, SessionError> {
        self.with_session(id, |session| session.game.rewind_to(index))
    }

    /// Resets a session atomically.
    #[instrument(skip(self))]
    pub fn reset(&self, id: &str) -> Result<(), SessionError> {
        self.with_session(id, |session| {
            session.game.reset();
            Ok(())
        })
    }
}
