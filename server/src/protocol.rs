//! JSON bodies exchanged over the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::types::GameState;

// ---------- client → server ----------
//
// Field aliases accept the camelCase names older clients send.

#[derive(Debug, Serialize, Deserialize)]
pub struct JoinRequest {
    #[serde(alias = "playerName")]
    pub player_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayCardRequest {
    #[serde(alias = "playerID")]
    pub player_id: Uuid,
    #[serde(alias = "cardID")]
    pub card_id: String,
    /// `face_up`, `face_down_1`, `face_down_2`, `deterrent_1` or `deterrent_2`.
    pub location: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttackRequest {
    #[serde(alias = "attackerID", alias = "playerID")]
    pub attacker_id: Uuid,
    #[serde(alias = "targetID")]
    pub target_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PassRequest {
    #[serde(alias = "playerID")]
    pub player_id: Uuid,
}

/// `?player_id=` on the state endpoint.
#[derive(Debug, Deserialize)]
pub struct StateQuery {
    #[serde(alias = "playerID")]
    pub player_id: Option<Uuid>,
}

// ---------- server → client ----------

/// One row of the session listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub state: GameState,
    pub players: usize,
    pub created_at: DateTime<Utc>,
}

/// Body of every rejected request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub error: String,
}
