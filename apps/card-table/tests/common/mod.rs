#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use card_table::config::db::DbKind;
use card_table::entities::{cards, commands, games, stacks};
use card_table::infra::state::build_state;
use card_table::services::{CardService, GameService, StackService};
use card_table::{routes, AppState, RequestTrace};
use sea_orm::DatabaseConnection;
use serde_json::{json, Map, Value};
use time::OffsetDateTime;

// Logging is auto-installed for every test binary that includes this module
#[ctor::ctor]
fn init_logging() {
    card_table_test_support::logging::init();
}

/// Fresh, migrated in-memory database per call.
pub async fn sqlite_state() -> AppState {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .build()
        .await
        .expect("in-memory state should build")
}

pub fn db(state: &AppState) -> &DatabaseConnection {
    state.db().expect("state should carry a database")
}

pub async fn init_app(
    state: AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}

pub fn obj(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub async fn seed_game(conn: &DatabaseConnection) -> games::Model {
    GameService::new()
        .create(conn, &obj(json!({"name": "friday night"})))
        .await
        .expect("game should be created")
}

pub async fn seed_stack(conn: &DatabaseConnection, game_id: i64, label: &str) -> stacks::Model {
    StackService::new()
        .create(conn, &obj(json!({"game_id": game_id, "label": label})))
        .await
        .expect("stack should be created")
}

/// `count` plain cards at positions 0..count; suit and rank are left empty.
pub async fn seed_cards(
    conn: &DatabaseConnection,
    stack_id: i64,
    count: usize,
) -> Vec<cards::Model> {
    let mut created = Vec::with_capacity(count);
    for position in 0..count {
        let card = CardService::new()
            .create(conn, &obj(json!({"stack_id": stack_id, "position": position})))
            .await
            .expect("card should be created");
        created.push(card);
    }
    created
}

/// A command row as the dispatcher sees it after persistence.
pub fn command(operation: &str, changes: Option<&str>) -> commands::Model {
    let now = OffsetDateTime::now_utc();
    commands::Model {
        id: 1,
        game_id: 1,
        actor_id: 1,
        operation: operation.to_string(),
        changes: changes.map(str::to_string),
        memo: None,
        created_at: now,
        updated_at: now,
    }
}
