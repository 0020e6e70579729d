//! Typed failures returned by every engine operation.

use thiserror::Error;
use uuid::Uuid;

use crate::game::types::{GameState, Location};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("session {0} not found")]
    SessionNotFound(Uuid),
    #[error("player {0} not found in this session")]
    PlayerNotFound(Uuid),
    #[error("card {card_id} not found in {player}'s hand")]
    CardNotFound { card_id: String, player: String },
    #[error("{0}")]
    InvalidArgument(String),
    #[error("cannot {action} while the game is {state}")]
    InvalidState {
        action: &'static str,
        state: GameState,
    },
    #[error("session already has the maximum of {max} players")]
    CapacityExceeded { max: usize },
    #[error("not enough players to start the game ({present} present, {needed} required)")]
    InsufficientPlayers { needed: usize, present: usize },
    #[error("it is {expected}'s turn")]
    NotYourTurn { expected: String },
    #[error("player {0} is eliminated")]
    PlayerEliminated(String),
    #[error("{0} slot is already occupied")]
    SlotOccupied(Location),
    #[error("{0}")]
    InvalidMove(String),
    #[error("{0} has no delivery system in play")]
    MissingDeliverySystem(String),
    #[error("{0} has no warhead in play")]
    MissingWarhead(String),
    #[error("not enough cards left to deal")]
    DeckExhausted,
}

impl GameError {
    /// Stable tag the dispatcher reports alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::SessionNotFound(_)
            | GameError::PlayerNotFound(_)
            | GameError::CardNotFound { .. } => "not_found",
            GameError::InvalidArgument(_) => "invalid_argument",
            GameError::InvalidState { .. } => "invalid_state",
            GameError::CapacityExceeded { .. } => "capacity_exceeded",
            GameError::InsufficientPlayers { .. } => "insufficient_players",
            GameError::NotYourTurn { .. } => "not_your_turn",
            GameError::PlayerEliminated(_) => "player_eliminated",
            GameError::SlotOccupied(_) => "slot_occupied",
            GameError::InvalidMove(_) => "invalid_move",
            GameError::MissingDeliverySystem(_) => "missing_delivery_system",
            GameError::MissingWarhead(_) => "missing_warhead",
            GameError::DeckExhausted => "deck_exhausted",
        }
    }
}
