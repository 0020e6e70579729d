//! The per-session game aggregate: players, turn order, decks and log.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

use crate::game::{
    cards,
    error::GameError,
    types::{Card, GameState, Player},
};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;
/// One Secret plus eight regular cards, whatever the player count.
pub const HAND_SIZE: usize = 9;

/// Population cards dealt to each player for a given table size.
pub fn population_cards_per_player(players: usize) -> Option<usize> {
    match players {
        2 => Some(10),
        3 => Some(6),
        4 => Some(5),
        5 => Some(4),
        6 => Some(3),
        _ => None,
    }
}

#[derive(Debug)]
pub struct Game {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub players: HashMap<Uuid, Player>,
    pub player_order: Vec<Uuid>,
    pub current_player_index: usize,
    pub deck: VecDeque<Card>,
    pub population_deck: VecDeque<Card>,
    pub discard_pile: Vec<Card>,
    /// Secret cards left over after the opening deal; never drawn.
    pub set_aside: Vec<Card>,
    pub population_bank: i64,
    pub state: GameState,
    pub winner: Option<Uuid>,
    pub turn_log: Vec<String>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Fresh session with both decks shuffled and the full population bank.
    pub fn new() -> Self {
        let mut population_deck = cards::population_deck();
        let mut deck = cards::main_deck();
        cards::shuffle(&mut population_deck);
        cards::shuffle(&mut deck);

        let population_bank = population_deck.iter().map(Card::population_value).sum();

        Game {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            players: HashMap::new(),
            player_order: Vec::with_capacity(MAX_PLAYERS),
            current_player_index: 0,
            deck: deck.into(),
            population_deck: population_deck.into(),
            discard_pile: Vec::new(),
            set_aside: Vec::new(),
            population_bank,
            state: GameState::WaitingForPlayers,
            winner: None,
            turn_log: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    pub fn has_started(&self) -> bool {
        self.state != GameState::WaitingForPlayers
    }

    pub fn player(&self, id: Uuid) -> Result<&Player, GameError> {
        self.players.get(&id).ok_or(GameError::PlayerNotFound(id))
    }

    pub fn player_mut(&mut self, id: Uuid) -> Result<&mut Player, GameError> {
        self.players.get_mut(&id).ok_or(GameError::PlayerNotFound(id))
    }

    /// Whose turn it is, if anyone has joined.
    pub fn current_player_id(&self) -> Option<Uuid> {
        self.player_order.get(self.current_player_index).copied()
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current_player_id().and_then(|id| self.players.get(&id))
    }

    pub fn survivors(&self) -> Vec<Uuid> {
        self.player_order
            .iter()
            .copied()
            .filter(|id| self.players.get(id).is_some_and(|p| !p.is_eliminated))
            .collect()
    }

    /// Append to the public turn log and mirror it to the process log.
    pub(crate) fn record(&mut self, event: String) {
        log::info!("[game {}] {event}", self.id);
        self.turn_log.push(event);
    }

    pub fn add_player(&mut self, name: &str) -> Result<Uuid, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::InvalidArgument(
                "player name cannot be empty".into(),
            ));
        }
        if self.state != GameState::WaitingForPlayers {
            return Err(GameError::InvalidState {
                action: "join",
                state: self.state,
            });
        }
        if self.is_full() {
            return Err(GameError::CapacityExceeded { max: MAX_PLAYERS });
        }

        let player = Player::new(name);
        let id = player.id;
        self.players.insert(id, player);
        self.player_order.push(id);
        self.record(format!(
            "{name} joined the game ({} players)",
            self.player_order.len()
        ));
        Ok(id)
    }

    /// Deal population and hands, then open the secret round.
    ///
    /// Every deck requirement is checked up front so a failure leaves the
    /// session untouched.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.state != GameState::WaitingForPlayers {
            return Err(GameError::InvalidState {
                action: "start",
                state: self.state,
            });
        }
        let seats = self.player_order.len();
        if seats < MIN_PLAYERS {
            return Err(GameError::InsufficientPlayers {
                needed: MIN_PLAYERS,
                present: seats,
            });
        }
        let per_player = population_cards_per_player(seats)
            .ok_or(GameError::CapacityExceeded { max: MAX_PLAYERS })?;
        if per_player * seats > self.population_deck.len() {
            return Err(GameError::DeckExhausted);
        }

        let secret_count = self.deck.iter().filter(|c| c.is_secret()).count();
        let regular_needed = seats * (HAND_SIZE - 1) + seats.saturating_sub(secret_count);
        let regular_available = self.deck.len() - secret_count + self.discard_pile.len();
        if regular_needed > regular_available {
            return Err(GameError::DeckExhausted);
        }

        let order = self.player_order.clone();

        for &id in &order {
            let mut dealt = 0;
            for _ in 0..per_player {
                let card = self
                    .population_deck
                    .pop_front()
                    .ok_or(GameError::DeckExhausted)?;
                dealt += card.population_value();
            }
            self.population_bank -= dealt;
            self.player_mut(id)?.population += dealt;
        }

        let (mut secrets, mut regular): (Vec<Card>, Vec<Card>) =
            std::mem::take(&mut self.deck)
                .into_iter()
                .partition(Card::is_secret);
        cards::shuffle(&mut secrets);
        cards::shuffle(&mut regular);
        self.deck = regular.into();

        let mut secrets = secrets.into_iter();
        for &id in &order {
            let mut hand = Vec::with_capacity(HAND_SIZE);
            match secrets.next() {
                Some(secret) => hand.push(secret),
                None => {
                    log::warn!(
                        "[game {}] not enough secret cards, dealing a regular card instead",
                        self.id
                    );
                    hand.push(self.draw_card()?);
                }
            }
            for _ in 1..HAND_SIZE {
                hand.push(self.draw_card()?);
            }
            self.player_mut(id)?.hand = hand;
        }
        self.set_aside.extend(secrets);

        self.state = GameState::OpeningRound;
        self.record(format!(
            "Game started with {seats} players; everyone commits a secret face down"
        ));
        Ok(())
    }

    /// Take the top card, recycling the discard pile when the deck runs dry.
    pub fn draw_card(&mut self) -> Result<Card, GameError> {
        if self.deck.is_empty() {
            if self.discard_pile.is_empty() {
                return Err(GameError::DeckExhausted);
            }
            let mut recycled = std::mem::take(&mut self.discard_pile);
            cards::shuffle(&mut recycled);
            log::debug!(
                "[game {}] reshuffled {} discarded cards into the deck",
                self.id,
                recycled.len()
            );
            self.deck = recycled.into();
        }
        self.deck.pop_front().ok_or(GameError::DeckExhausted)
    }
}
