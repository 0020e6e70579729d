//! Per-session locking and the id → session registry.
//!
//! A [`Session`] owns its [`Game`] behind one `RwLock`; every operation holds
//! the lock for its whole duration, so validation, mutation and any response
//! built from the result are one atomic step. The [`SessionRegistry`] only
//! guards the map itself.

use dashmap::DashMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

use crate::game::{
    error::GameError,
    state::Game,
    types::{GameState, Location},
};

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    game: RwLock<Game>,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Session {
            id: game.id,
            game: RwLock::new(game),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Run `f` under the shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&Game) -> R) -> R {
        let game = self.game.read().unwrap_or_else(PoisonError::into_inner);
        f(&game)
    }

    /// Run `f` under the exclusive lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut Game) -> R) -> R {
        let mut game = self.game.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut game)
    }

    pub fn add_player(&self, name: &str) -> Result<Uuid, GameError> {
        self.write(|g| g.add_player(name))
    }

    pub fn start(&self) -> Result<(), GameError> {
        self.write(Game::start_game)
    }

    pub fn play_card(
        &self,
        player_id: Uuid,
        card_id: &str,
        location: Location,
    ) -> Result<(), GameError> {
        self.write(|g| g.play_card(player_id, card_id, location))
    }

    pub fn attack(&self, attacker_id: Uuid, target_id: Uuid) -> Result<(), GameError> {
        self.write(|g| g.attack(attacker_id, target_id))
    }

    pub fn pass_turn(&self, player_id: Uuid) -> Result<(), GameError> {
        self.write(|g| g.pass_turn(player_id))
    }

    pub fn is_full(&self) -> bool {
        self.read(Game::is_full)
    }

    pub fn has_started(&self) -> bool {
        self.read(Game::has_started)
    }
}

/// In-memory map of live sessions: game_id → session.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<Uuid, Arc<Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> Arc<Session> {
        let session = Arc::new(Session::new(Game::new()));
        self.sessions.insert(session.id(), Arc::clone(&session));
        log::info!(
            "session {} created ({} live)",
            session.id(),
            self.sessions.len()
        );
        session
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<Session>, GameError> {
        self.sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(GameError::SessionNotFound(id))
    }

    /// Drop a session from the registry. Handles already given out keep
    /// working until they are released.
    pub fn remove(&self, id: Uuid) -> Result<Arc<Session>, GameError> {
        let (_, session) = self
            .sessions
            .remove(&id)
            .ok_or(GameError::SessionNotFound(id))?;
        log::info!("session {id} removed ({} live)", self.sessions.len());
        Ok(session)
    }

    /// Remove every session whose game is over; returns how many went.
    pub fn evict_finished(&self) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.read(|game| game.state != GameState::GameOver));
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            log::info!("evicted {evicted} finished sessions");
        }
        evicted
    }

    pub fn list(&self) -> Vec<Arc<Session>> {
        self.sessions
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
