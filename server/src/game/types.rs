use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::game::error::GameError;

/// Card type tag plus the attributes that only make sense for that type.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum CardKind {
    Population {
        value: i64,
    },
    Propaganda,
    #[serde(rename = "Delivery System")]
    DeliverySystem {
        carrying_capacity: u32,
    },
    Warhead {
        warhead_size: u32, // megatons
    },
    #[serde(rename = "Anti-Missile")]
    AntiMissile {
        intercepts: Vec<String>,
    },
    Secret,
    #[serde(rename = "Top Secret")]
    TopSecret,
}

/// One physical card. Cards are moved between containers, never cloned.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(flatten)]
    pub kind: CardKind,
}

impl Card {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: CardKind) -> Self {
        Card {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_secret(&self) -> bool {
        matches!(self.kind, CardKind::Secret)
    }

    pub fn is_delivery_system(&self) -> bool {
        matches!(self.kind, CardKind::DeliverySystem { .. })
    }

    pub fn is_warhead(&self) -> bool {
        matches!(self.kind, CardKind::Warhead { .. })
    }

    pub fn is_anti_missile(&self) -> bool {
        matches!(self.kind, CardKind::AntiMissile { .. })
    }

    /// Population carried by a population card, zero for everything else.
    pub fn population_value(&self) -> i64 {
        match self.kind {
            CardKind::Population { value } => value,
            _ => 0,
        }
    }

    /// Warhead yield in megatons, zero for non-warheads.
    pub fn megatons(&self) -> u32 {
        match self.kind {
            CardKind::Warhead { warhead_size } => warhead_size,
            _ => 0,
        }
    }
}

/// Where a played card lands on the placemat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    FaceUp,
    FaceDown1,
    FaceDown2,
    Deterrent1,
    Deterrent2,
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Location::FaceUp => "face_up",
            Location::FaceDown1 => "face_down_1",
            Location::FaceDown2 => "face_down_2",
            Location::Deterrent1 => "deterrent_1",
            Location::Deterrent2 => "deterrent_2",
        }
    }

    pub fn is_face_down(self) -> bool {
        matches!(self, Location::FaceDown1 | Location::FaceDown2)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "face_up" => Ok(Location::FaceUp),
            "face_down_1" => Ok(Location::FaceDown1),
            "face_down_2" => Ok(Location::FaceDown2),
            "deterrent_1" => Ok(Location::Deterrent1),
            "deterrent_2" => Ok(Location::Deterrent2),
            other => Err(GameError::InvalidArgument(format!(
                "invalid card location: {other}"
            ))),
        }
    }
}

/// Cards a player has in play.
#[derive(Debug, Default)]
pub struct Placemat {
    pub active_cards: Vec<Card>,
    pub face_down_1: Option<Card>,
    pub face_down_2: Option<Card>,
    pub deterrent_1: Option<Card>,
    pub deterrent_2: Option<Card>,
}

impl Placemat {
    fn slot_mut(&mut self, location: Location) -> Option<&mut Option<Card>> {
        match location {
            Location::FaceUp => None,
            Location::FaceDown1 => Some(&mut self.face_down_1),
            Location::FaceDown2 => Some(&mut self.face_down_2),
            Location::Deterrent1 => Some(&mut self.deterrent_1),
            Location::Deterrent2 => Some(&mut self.deterrent_2),
        }
    }

    /// `face_up` always has room; the other locations hold one card each.
    pub fn is_free(&self, location: Location) -> bool {
        match location {
            Location::FaceUp => true,
            Location::FaceDown1 => self.face_down_1.is_none(),
            Location::FaceDown2 => self.face_down_2.is_none(),
            Location::Deterrent1 => self.deterrent_1.is_none(),
            Location::Deterrent2 => self.deterrent_2.is_none(),
        }
    }

    /// Caller checks [`Placemat::is_free`] first.
    pub fn place(&mut self, location: Location, card: Card) {
        match self.slot_mut(location) {
            Some(slot) => {
                debug_assert!(slot.is_none(), "{location} already occupied");
                *slot = Some(card);
            }
            None => self.active_cards.push(card),
        }
    }
}

/// A participant in one session.
#[derive(Debug)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub population: i64,
    pub hand: Vec<Card>,
    pub placemat: Placemat,
    pub is_active: bool,
    pub is_eliminated: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Player {
            id: Uuid::new_v4(),
            name: name.into(),
            population: 0,
            hand: Vec::new(),
            placemat: Placemat::default(),
            is_active: true,
            is_eliminated: false,
        }
    }
}

/// Session life-cycle.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    WaitingForPlayers,
    OpeningRound,
    InProgress,
    FinalStrike,
    GameOver,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameState::WaitingForPlayers => "waiting_for_players",
            GameState::OpeningRound => "opening_round",
            GameState::InProgress => "in_progress",
            GameState::FinalStrike => "final_strike",
            GameState::GameOver => "game_over",
        })
    }
}
