//! End-to-end tests of the HTTP dispatcher.

use actix_web::{http::StatusCode, test, web, App};
use nuclear_war_server::{game::SessionRegistry, http::routes::init_routes};
use serde_json::{json, Value};

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(SessionRegistry::new()))
                .configure(init_routes),
        )
        .await
    };
}

#[actix_rt::test]
async fn healthz_reports_ok() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/healthz").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}

#[actix_rt::test]
async fn unknown_session_is_not_found() {
    let app = app!();
    let id = uuid::Uuid::new_v4();
    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{id}/start"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "not_found");
}

#[actix_rt::test]
async fn full_game_flow_over_http() {
    let app = app!();

    // Create
    let req = test::TestRequest::post().uri("/api/games").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["state"], "waiting_for_players");
    let game_id = created["id"].as_str().unwrap().to_string();

    // Join
    let mut players = Vec::new();
    for name in ["Alice", "Bob"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/games/{game_id}/join"))
            .set_json(json!({ "player_name": name }))
            .to_request();
        let player: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(player["name"], name);
        assert_eq!(player["population"], 0);
        players.push(player["id"].as_str().unwrap().to_string());
    }

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/join"))
        .set_json(json!({ "player_name": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "invalid_argument");

    // Listing
    let req = test::TestRequest::get().uri("/api/games").to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing[0]["players"], 2);

    // Start
    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/start"))
        .to_request();
    let started: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(started["state"], "opening_round");

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/start"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Each player commits their secret.
    for player_id in &players {
        let req = test::TestRequest::get()
            .uri(&format!("/api/games/{game_id}?player_id={player_id}"))
            .to_request();
        let view: Value = test::call_and_read_body_json(&app, req).await;
        let hand = view["player_hand"].as_array().unwrap();
        assert_eq!(hand.len(), 9);
        assert_eq!(view["opponents"][0]["hand_size"], 9);
        assert!(view["opponents"][0].get("hand").is_none());

        let secret = hand
            .iter()
            .find(|c| c["type"] == "Secret")
            .and_then(|c| c["id"].as_str())
            .unwrap()
            .to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/games/{game_id}/play"))
            .set_json(json!({
                "player_id": player_id,
                "card_id": secret,
                "location": "nowhere",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri(&format!("/api/games/{game_id}/play"))
            .set_json(json!({
                "player_id": player_id,
                "card_id": secret,
                "location": "face_down_1",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}"))
        .to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["state"], "in_progress");
    assert_eq!(state["current_player_id"], players[0].as_str());

    // Bob cannot pass on Alice's turn.
    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/pass"))
        .set_json(json!({ "player_id": players[1] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "not_your_turn");

    // Alice has nothing in play yet.
    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/attack"))
        .set_json(json!({ "attacker_id": players[0], "target_id": players[1] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "missing_delivery_system");

    // Alice passes.
    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/pass"))
        .set_json(json!({ "player_id": players[0] }))
        .to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["current_player_id"], players[1].as_str());
}

#[actix_rt::test]
async fn unknown_player_view_is_not_found() {
    let app = app!();
    let req = test::TestRequest::post().uri("/api/games").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let game_id = created["id"].as_str().unwrap();

    let stranger = uuid::Uuid::new_v4();
    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}?player_id={stranger}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn malformed_ids_are_invalid_arguments() {
    let app = app!();
    let req = test::TestRequest::post().uri("/api/games").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let game_id = created["id"].as_str().unwrap().to_string();

    let requests = [
        test::TestRequest::get()
            .uri("/api/games/not-a-uuid")
            .to_request(),
        test::TestRequest::get()
            .uri(&format!("/api/games/{game_id}?player_id=bogus"))
            .to_request(),
        test::TestRequest::post()
            .uri(&format!("/api/games/{game_id}/pass"))
            .set_json(json!({ "player_id": "bogus" }))
            .to_request(),
    ];

    for req in requests {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "invalid_argument");
        assert!(body["error"].is_string());
    }
}

#[actix_rt::test]
async fn camel_case_field_names_are_accepted() {
    let app = app!();
    let req = test::TestRequest::post().uri("/api/games").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let game_id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/join"))
        .set_json(json!({ "playerName": "Alice" }))
        .to_request();
    let player: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(player["name"], "Alice");
    let player_id = player["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}?playerID={player_id}"))
        .to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["player_name"], "Alice");

    // Not started yet, so the pass reaches the engine and is refused there.
    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/pass"))
        .set_json(json!({ "playerID": player_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "invalid_state");
}

#[actix_rt::test]
async fn deleted_session_is_gone() {
    let app = app!();
    let req = test::TestRequest::post().uri("/api/games").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let game_id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/games/{game_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/games/prune")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["evicted"], 0);
}
