//! Session endpoints: create, join, start, play, attack, pass and state.
//!
//! Each handler resolves the session, then runs the engine operation and
//! serializes the response inside one lock acquisition.

use actix_web::{delete, get, http::StatusCode, post, web, HttpResponse, Responder, ResponseError};
use uuid::Uuid;

use crate::{
    config::settings,
    game::{
        types::Location,
        view::{PlayerSummary, SessionState},
        GameError, SessionRegistry,
    },
    protocol::{
        AttackRequest, ErrorBody, JoinRequest, PassRequest, PlayCardRequest, SessionSummary,
        StateQuery,
    },
};

impl ResponseError for GameError {
    fn status_code(&self) -> StatusCode {
        match self {
            GameError::SessionNotFound(_)
            | GameError::PlayerNotFound(_)
            | GameError::CardNotFound { .. } => StatusCode::NOT_FOUND,
            GameError::CapacityExceeded { .. }
            | GameError::InvalidState { .. }
            | GameError::NotYourTurn { .. }
            | GameError::PlayerEliminated(_)
            | GameError::SlotOccupied(_) => StatusCode::CONFLICT,
            GameError::InvalidArgument(_)
            | GameError::InsufficientPlayers { .. }
            | GameError::InvalidMove(_)
            | GameError::MissingDeliverySystem(_)
            | GameError::MissingWarhead(_)
            | GameError::DeckExhausted => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            kind: self.kind().to_string(),
            error: self.to_string(),
        })
    }
}

/// POST /api/games
#[post("/games")]
pub async fn create(registry: web::Data<SessionRegistry>) -> impl Responder {
    let session = registry.create();
    session.read(|game| HttpResponse::Created().json(SessionState::of(game)))
}

/// GET /api/games
#[get("/games")]
pub async fn list(registry: web::Data<SessionRegistry>) -> impl Responder {
    let mut rows: Vec<SessionSummary> = registry
        .list()
        .iter()
        .map(|session| {
            session.read(|game| SessionSummary {
                id: game.id,
                state: game.state,
                players: game.players.len(),
                created_at: game.created_at,
            })
        })
        .collect();
    rows.sort_by_key(|row| row.created_at);
    HttpResponse::Ok().json(rows)
}

/// GET /api/games/{game_id}?player_id=
#[get("/games/{game_id}")]
pub async fn state(
    path: web::Path<Uuid>,
    query: web::Query<StateQuery>,
    registry: web::Data<SessionRegistry>,
) -> Result<HttpResponse, GameError> {
    let session = registry.get(path.into_inner())?;
    session.read(|game| match query.player_id {
        Some(player_id) => {
            let view = game
                .project_view(player_id)?
                .with_log_limit(settings().turn_log_limit);
            Ok(HttpResponse::Ok().json(view))
        }
        None => Ok(HttpResponse::Ok().json(SessionState::of(game))),
    })
}

/// POST /api/games/{game_id}/join
#[post("/games/{game_id}/join")]
pub async fn join(
    path: web::Path<Uuid>,
    body: web::Json<JoinRequest>,
    registry: web::Data<SessionRegistry>,
) -> Result<HttpResponse, GameError> {
    let session = registry.get(path.into_inner())?;
    session.write(|game| {
        let player_id = game.add_player(&body.player_name)?;
        let player = game.player(player_id)?;
        Ok(HttpResponse::Ok().json(PlayerSummary::of(player)))
    })
}

/// POST /api/games/{game_id}/start
#[post("/games/{game_id}/start")]
pub async fn start(
    path: web::Path<Uuid>,
    registry: web::Data<SessionRegistry>,
) -> Result<HttpResponse, GameError> {
    let session = registry.get(path.into_inner())?;
    session.write(|game| {
        game.start_game()?;
        Ok(HttpResponse::Ok().json(SessionState::of(game)))
    })
}

/// POST /api/games/{game_id}/play
#[post("/games/{game_id}/play")]
pub async fn play(
    path: web::Path<Uuid>,
    body: web::Json<PlayCardRequest>,
    registry: web::Data<SessionRegistry>,
) -> Result<HttpResponse, GameError> {
    let location: Location = body.location.parse()?;
    let session = registry.get(path.into_inner())?;
    session.write(|game| {
        game.play_card(body.player_id, &body.card_id, location)?;
        Ok(HttpResponse::Ok().json(SessionState::of(game)))
    })
}

/// POST /api/games/{game_id}/attack
#[post("/games/{game_id}/attack")]
pub async fn attack(
    path: web::Path<Uuid>,
    body: web::Json<AttackRequest>,
    registry: web::Data<SessionRegistry>,
) -> Result<HttpResponse, GameError> {
    let session = registry.get(path.into_inner())?;
    session.write(|game| {
        game.attack(body.attacker_id, body.target_id)?;
        Ok(HttpResponse::Ok().json(SessionState::of(game)))
    })
}

/// POST /api/games/{game_id}/pass
#[post("/games/{game_id}/pass")]
pub async fn pass(
    path: web::Path<Uuid>,
    body: web::Json<PassRequest>,
    registry: web::Data<SessionRegistry>,
) -> Result<HttpResponse, GameError> {
    let session = registry.get(path.into_inner())?;
    session.write(|game| {
        game.pass_turn(body.player_id)?;
        Ok(HttpResponse::Ok().json(SessionState::of(game)))
    })
}

/// DELETE /api/games/{game_id}
#[delete("/games/{game_id}")]
pub async fn remove(
    path: web::Path<Uuid>,
    registry: web::Data<SessionRegistry>,
) -> Result<HttpResponse, GameError> {
    registry.remove(path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/games/prune
#[post("/games/prune")]
pub async fn prune(registry: web::Data<SessionRegistry>) -> impl Responder {
    let evicted = registry.evict_finished();
    HttpResponse::Ok().json(serde_json::json!({ "evicted": evicted }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create)
        .service(list)
        .service(prune)
        .service(remove)
        .service(state)
        .service(join)
        .service(start)
        .service(play)
        .service(attack)
        .service(pass);
}
