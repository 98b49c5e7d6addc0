//! REST surface end to end: envelopes, status codes and Problem Details.

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use card_table::domain::labels;
use card_table_test_support::{assert_problem_details, read_data};
use common::{db, init_app, seed_cards, seed_game, seed_stack, sqlite_state};
use serde_json::{json, Value};

#[actix_web::test]
async fn health_reports_ok() {
    let app = init_app(sqlite_state().await).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert!(resp.headers().contains_key("x-trace-id"));
    let data = read_data(resp, StatusCode::OK).await;

    assert_eq!(data["status"], "ok");
    assert_eq!(data["db"], "ok");
    assert_eq!(data["migrations"], "m20261016_000001_init");
}

#[actix_web::test]
async fn game_lifecycle() {
    let app = init_app(sqlite_state().await).await;

    let req = test::TestRequest::post()
        .uri("/games")
        .set_json(json!({"name": "poker night"}))
        .to_request();
    let game = read_data(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(game["state"], "forming");
    assert_eq!(game["name"], "poker night");
    let id = game["id"].as_i64().expect("numeric id");
    assert!(game["created_at"].as_str().is_some_and(|t| t.contains('T')));

    let req = test::TestRequest::patch()
        .uri(&format!("/games/{id}"))
        .set_json(json!({"state": "playing"}))
        .to_request();
    let patched = read_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(patched["state"], "playing");
    assert_eq!(patched["name"], "poker night");

    let req = test::TestRequest::get().uri("/games?state=playing").to_request();
    let listed = read_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete().uri(&format!("/games/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&format!("/games/{id}")).to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "GAME_NOT_FOUND",
        None,
    )
    .await;

    let req = test::TestRequest::delete().uri(&format!("/games/{id}")).to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "GAME_NOT_FOUND",
        None,
    )
    .await;
}

#[actix_web::test]
async fn protected_fields_are_not_modifiable() {
    let state = sqlite_state().await;
    let game = seed_game(db(&state)).await;
    let stack = seed_stack(db(&state), game.id, labels::HAND).await;
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/games")
        .set_json(json!({"id": 77, "name": "sneaky"}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "INVALID_PARAMETER",
        Some("not modifiable"),
    )
    .await;

    let req = test::TestRequest::patch()
        .uri(&format!("/stacks/{}", stack.id))
        .set_json(json!({"game_id": game.id}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "INVALID_PARAMETER",
        Some("game_id"),
    )
    .await;
}

#[actix_web::test]
async fn stacks_and_cards_require_their_parent() {
    let state = sqlite_state().await;
    let game = seed_game(db(&state)).await;
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/stacks")
        .set_json(json!({"label": "hand"}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_PARAMETER",
        Some("game_id"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/stacks")
        .set_json(json!({"game_id": 4040, "label": "hand"}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "INVALID_PARAMETER",
        Some("game_id"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/stacks")
        .set_json(json!({"game_id": game.id, "owner_id": 3, "label": "hand", "size_visibility": 0}))
        .to_request();
    let stack = read_data(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(stack["game_id"], game.id);
    assert_eq!(stack["owner_id"], 3);
    assert_eq!(stack["size_visibility"], 0);
    assert_eq!(stack["size_limit"], Value::Null);

    let req = test::TestRequest::post()
        .uri("/cards")
        .set_json(json!({"position": 0}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_PARAMETER",
        Some("stack_id"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/cards")
        .set_json(json!({"stack_id": stack["id"], "suit": "heart", "rank": "queen", "owner_facing": "up"}))
        .to_request();
    let card = read_data(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(card["owner_facing"], "up");
    assert_eq!(card["other_facing"], "down");
    assert_eq!(card["position"], 0);
}

#[actix_web::test]
async fn create_deck_command_fills_the_stack() {
    let state = sqlite_state().await;
    let game = seed_game(db(&state)).await;
    let stack = seed_stack(db(&state), game.id, labels::DRAW_PILE).await;
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/commands")
        .set_json(json!({
            "game_id": game.id,
            "actor_id": 1,
            "operation": "create-deck",
            "changes": format!(r#"{{"stack_id": {}, "ace": "high"}}"#, stack.id),
        }))
        .to_request();
    let command = read_data(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(command["operation"], "create-deck");
    assert_eq!(command["changes"], json!({"stack_id": stack.id, "ace": "high"}));
    assert_eq!(command["cards"].as_array().map(Vec::len), Some(52));

    let req = test::TestRequest::get()
        .uri(&format!("/cards?stack_id={}", stack.id))
        .to_request();
    let cards = read_data(test::call_service(&app, req).await, StatusCode::OK).await;
    let cards = cards.as_array().expect("card list");
    assert_eq!(cards.len(), 52);
    let positions: Vec<i64> = cards.iter().filter_map(|c| c["position"].as_i64()).collect();
    assert_eq!(positions, (0..52).collect::<Vec<_>>());
    assert_eq!(cards[12]["rank"], "ace");
    assert_eq!(cards[12]["rank_value"], 14);
}

#[actix_web::test]
async fn failed_command_leaves_nothing_behind() {
    let state = sqlite_state().await;
    let game = seed_game(db(&state)).await;
    let stack = seed_stack(db(&state), game.id, labels::HAND).await;
    let cards = seed_cards(db(&state), stack.id, 2).await;
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/commands")
        .set_json(json!({
            "game_id": game.id,
            "actor_id": 2,
            "operation": "move-cards",
            "changes": {"cards": [
                {"id": cards[0].id, "position": 1},
                {"id": cards[1].id, "updated_at": "2020-01-01T00:00:00Z"},
            ]},
        }))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "INVALID_PARAMETER",
        Some("not modifiable"),
    )
    .await;

    let req = test::TestRequest::get().uri("/commands").to_request();
    let commands = read_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(commands, json!([]));

    let req = test::TestRequest::get()
        .uri(&format!("/cards/{}", cards[0].id))
        .to_request();
    let first = read_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(first["position"], 0);
}

#[actix_web::test]
async fn command_validation_errors() {
    let state = sqlite_state().await;
    let game = seed_game(db(&state)).await;
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/commands")
        .set_json(json!({"game_id": game.id, "operation": "no-op", "changes": {}}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_PARAMETER",
        Some("actor_id"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/commands")
        .set_json(json!({"game_id": game.id, "actor_id": 1, "operation": "invalid", "changes": "{}"}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "UNKNOWN_OPERATION",
        Some("invalid"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/commands")
        .set_json(json!({"game_id": game.id, "actor_id": 1, "operation": "no-op"}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_PARAMETER",
        Some("changes"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/commands")
        .set_json(json!({"game_id": game.id, "actor_id": 1, "operation": "no-op", "changes": "{not json"}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "INVALID_PARAMETER",
        Some("Invalid JSON"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/commands")
        .insert_header(("content-type", "application/json"))
        .set_payload("[1, 2")
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
        None,
    )
    .await;
}

#[actix_web::test]
async fn commands_keep_their_owner() {
    let state = sqlite_state().await;
    let game = seed_game(db(&state)).await;
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/commands")
        .set_json(json!({
            "game_id": game.id,
            "actor_id": 5,
            "operation": "no-op",
            "changes": {"note": "hello"},
            "memo": "first",
        }))
        .to_request();
    let command = read_data(test::call_service(&app, req).await, StatusCode::CREATED).await;
    let id = command["id"].as_i64().expect("numeric id");
    assert!(command.get("cards").is_none());

    let req = test::TestRequest::patch()
        .uri(&format!("/commands/{id}"))
        .set_json(json!({"actor_id": 6}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "INVALID_PARAMETER",
        Some("not modifiable"),
    )
    .await;

    let req = test::TestRequest::patch()
        .uri(&format!("/commands/{id}"))
        .set_json(json!({"memo": "edited"}))
        .to_request();
    let patched = read_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(patched["memo"], "edited");
    assert_eq!(patched["actor_id"], 5);
    assert_eq!(patched["changes"], json!({"note": "hello"}));

    let req = test::TestRequest::get()
        .uri(&format!("/commands?game_id={}&actor_id=5", game.id))
        .to_request();
    let listed = read_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn deleting_a_parent_removes_its_children() {
    let state = sqlite_state().await;
    let game = seed_game(db(&state)).await;
    let hand = seed_stack(db(&state), game.id, labels::HAND).await;
    let discards = seed_stack(db(&state), game.id, labels::DISCARDS).await;
    seed_cards(db(&state), hand.id, 3).await;
    let kept = seed_cards(db(&state), discards.id, 2).await;
    let app = init_app(state).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/stacks/{}", hand.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/cards?stack_id={}", hand.id))
        .to_request();
    let orphans = read_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(orphans, json!([]));

    let req = test::TestRequest::get().uri("/cards").to_request();
    let remaining = read_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(remaining.as_array().map(Vec::len), Some(kept.len()));

    let req = test::TestRequest::delete()
        .uri(&format!("/games/{}", game.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/stacks/{}", discards.id))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "STACK_NOT_FOUND",
        None,
    )
    .await;

    let req = test::TestRequest::get().uri("/cards").to_request();
    let remaining = read_data(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(remaining, json!([]));
}
