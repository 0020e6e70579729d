//! Serializable projections of a [`Game`].
//!
//! Nothing here owns cards: every view borrows from the game and must be
//! serialized while the session lock is held. Hands are only ever exposed to
//! their owner, face-down cards only to the player who placed them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::game::{
    error::GameError,
    state::{Game, MIN_PLAYERS},
    types::{Card, GameState, Placemat, Player},
};

#[derive(Debug, Serialize)]
pub struct PlacematView<'a> {
    pub active_cards: &'a [Card],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_down_1: Option<&'a Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_down_2: Option<&'a Card>,
    pub face_down_1_occupied: bool,
    pub face_down_2_occupied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deterrent_1: Option<&'a Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deterrent_2: Option<&'a Card>,
}

impl<'a> PlacematView<'a> {
    /// What the owner sees, face-down cards included.
    pub fn owner(placemat: &'a Placemat) -> Self {
        PlacematView {
            face_down_1: placemat.face_down_1.as_ref(),
            face_down_2: placemat.face_down_2.as_ref(),
            ..Self::public(placemat)
        }
    }

    /// What everyone else sees.
    pub fn public(placemat: &'a Placemat) -> Self {
        PlacematView {
            active_cards: &placemat.active_cards,
            face_down_1: None,
            face_down_2: None,
            face_down_1_occupied: placemat.face_down_1.is_some(),
            face_down_2_occupied: placemat.face_down_2.is_some(),
            deterrent_1: placemat.deterrent_1.as_ref(),
            deterrent_2: placemat.deterrent_2.as_ref(),
        }
    }
}

/// A player as seen by anyone but themselves: hand reduced to its size.
#[derive(Debug, Serialize)]
pub struct PlayerSummary<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub population: i64,
    pub hand_size: usize,
    pub placemat: PlacematView<'a>,
    pub is_active: bool,
    pub is_eliminated: bool,
}

impl<'a> PlayerSummary<'a> {
    pub fn of(player: &'a Player) -> Self {
        PlayerSummary {
            id: player.id,
            name: &player.name,
            population: player.population,
            hand_size: player.hand.len(),
            placemat: PlacematView::public(&player.placemat),
            is_active: player.is_active,
            is_eliminated: player.is_eliminated,
        }
    }
}

/// Public state of a whole session, returned when no player is named.
#[derive(Debug, Serialize)]
pub struct SessionState<'a> {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub state: GameState,
    pub players: Vec<PlayerSummary<'a>>,
    pub player_order: &'a [Uuid],
    pub current_player_index: usize,
    pub current_player_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Uuid>,
    pub deck_size: usize,
    pub discard_size: usize,
    pub turn_log: &'a [String],
}

impl<'a> SessionState<'a> {
    pub fn of(game: &'a Game) -> Self {
        SessionState {
            id: game.id,
            created_at: game.created_at,
            state: game.state,
            players: game
                .player_order
                .iter()
                .filter_map(|id| game.players.get(id))
                .map(PlayerSummary::of)
                .collect(),
            player_order: &game.player_order,
            current_player_index: game.current_player_index,
            current_player_id: game.current_player_id(),
            winner: game.winner,
            deck_size: game.deck.len(),
            discard_size: game.discard_pile.len(),
            turn_log: &game.turn_log,
        }
    }
}

/// A command the player may issue right now.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
}

const START: Command = Command {
    name: "start",
    description: "Start the game (2+ players required)",
};
const PLAY: Command = Command {
    name: "play",
    description: "Play a card (e.g., play <card_id> <location>)",
};
const PASS: Command = Command {
    name: "pass",
    description: "Pass your turn",
};
const ATTACK: Command = Command {
    name: "attack",
    description: "Attack a player (e.g., attack <target_player_id>)",
};

/// Everything one player is allowed to know about the session.
#[derive(Debug, Serialize)]
pub struct PlayerView<'a> {
    pub game_id: Uuid,
    pub player_id: Uuid,
    pub player_name: &'a str,
    pub player_population: i64,
    pub player_hand: &'a [Card],
    pub player_placemat: PlacematView<'a>,
    pub is_eliminated: bool,
    pub opponents: Vec<PlayerSummary<'a>>,
    pub current_turn_player_id: Option<Uuid>,
    pub current_turn_player: Option<&'a str>,
    pub state: GameState,
    pub winner: Option<&'a str>,
    pub turn_log: &'a [String],
    pub available_commands: Vec<Command>,
}

impl<'a> PlayerView<'a> {
    /// Keep only the most recent `limit` turn-log entries.
    pub fn with_log_limit(mut self, limit: usize) -> Self {
        let skip = self.turn_log.len().saturating_sub(limit);
        self.turn_log = &self.turn_log[skip..];
        self
    }
}

impl Game {
    pub fn project_view(&self, player_id: Uuid) -> Result<PlayerView<'_>, GameError> {
        let me = self.player(player_id)?;
        let current = self.current_player();

        Ok(PlayerView {
            game_id: self.id,
            player_id,
            player_name: &me.name,
            player_population: me.population,
            player_hand: &me.hand,
            player_placemat: PlacematView::owner(&me.placemat),
            is_eliminated: me.is_eliminated,
            opponents: self
                .player_order
                .iter()
                .filter(|id| **id != player_id)
                .filter_map(|id| self.players.get(id))
                .map(PlayerSummary::of)
                .collect(),
            current_turn_player_id: current.map(|p| p.id),
            current_turn_player: current.map(|p| p.name.as_str()),
            state: self.state,
            winner: self
                .winner
                .and_then(|id| self.players.get(&id))
                .map(|p| p.name.as_str()),
            turn_log: &self.turn_log,
            available_commands: self.available_commands(player_id),
        })
    }

    pub fn available_commands(&self, player_id: Uuid) -> Vec<Command> {
        let Some(player) = self.players.get(&player_id) else {
            return Vec::new();
        };
        let my_turn = self.current_player_id() == Some(player_id);

        match self.state {
            GameState::WaitingForPlayers if self.players.len() >= MIN_PLAYERS => vec![START],
            GameState::OpeningRound if player.placemat.face_down_1.is_none() => {
                if my_turn {
                    vec![PLAY, PASS]
                } else {
                    vec![PLAY]
                }
            }
            GameState::OpeningRound if my_turn => vec![PASS],
            GameState::InProgress if my_turn && !player.is_eliminated => {
                vec![PLAY, PASS, ATTACK]
            }
            GameState::FinalStrike if my_turn => vec![PLAY, ATTACK, PASS],
            _ => Vec::new(),
        }
    }
}
