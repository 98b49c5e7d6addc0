//! `with_txn` under the default commit policy.

mod common;

use std::sync::Arc;

use actix_web::test::TestRequest;
use actix_web::HttpMessage;
use card_table::db::txn::{with_txn, SharedTxn};
use card_table::db::txn_policy::{current, TxnPolicy};
use card_table::error::AppError;
use card_table::errors::ErrorCode;
use card_table::repos::games as games_repo;
use card_table::services::GameService;
use card_table::AppState;
use common::{db, obj, sqlite_state};
use sea_orm::TransactionTrait;
use serde_json::json;

#[actix_web::test]
async fn commits_on_ok() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(current(), TxnPolicy::CommitOnOk);
    let state = sqlite_state().await;

    let game = with_txn(None, &state, |txn| {
        Box::pin(async move {
            GameService::new()
                .create(txn, &obj(json!({"name": "kept"})))
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    let stored = games_repo::find_by_id(db(&state), game.id).await?;
    assert_eq!(stored, Some(game));
    Ok(())
}

#[actix_web::test]
async fn rolls_back_every_write_on_err() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await;

    let result: Result<(), AppError> = with_txn(None, &state, |txn| {
        Box::pin(async move {
            GameService::new()
                .create(txn, &obj(json!({"name": "discarded"})))
                .await
                .map_err(AppError::from)?;
            Err::<(), _>(AppError::internal(ErrorCode::Internal, "late failure"))
        })
    })
    .await;

    assert!(matches!(result, Err(AppError::Internal { .. })));
    let games = games_repo::list(db(&state), &Default::default()).await?;
    assert!(games.is_empty());
    Ok(())
}

#[actix_web::test]
async fn without_db_is_unavailable() {
    let state = AppState::new_without_db();

    let result = with_txn(None, &state, |_txn| {
        Box::pin(async move { Ok::<_, AppError>(()) })
    })
    .await;

    assert!(matches!(result, Err(AppError::DbUnavailable { .. })));
}

#[actix_web::test]
async fn shared_txn_is_left_open_for_its_owner() -> Result<(), Box<dyn std::error::Error>> {
    let state = sqlite_state().await;
    let shared = Arc::new(db(&state).begin().await?);

    let req = TestRequest::default().to_http_request();
    req.extensions_mut().insert(SharedTxn(shared.clone()));

    let game = with_txn(Some(&req), &state, |txn| {
        Box::pin(async move {
            GameService::new()
                .create(txn, &obj(json!({"name": "shared"})))
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    // visible inside the still-open transaction
    let inside = games_repo::find_by_id(shared.as_ref(), game.id).await?;
    assert_eq!(inside, Some(game));

    req.extensions_mut().remove::<SharedTxn>();
    let txn = Arc::try_unwrap(shared).map_err(|_| "shared transaction still referenced")?;
    txn.rollback().await?;

    let games = games_repo::list(db(&state), &Default::default()).await?;
    assert!(games.is_empty());
    Ok(())
}
