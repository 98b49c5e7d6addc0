//! `with_txn` when the process policy is `RollbackOnOk`.

mod common;

use card_table::db::txn::with_txn;
use card_table::db::txn_policy::{current, set_txn_policy, TxnPolicy};
use card_table::error::AppError;
use card_table::repos::games as games_repo;
use card_table::services::GameService;
use common::{db, obj, sqlite_state};
use serde_json::json;

#[ctor::ctor]
fn init_txn_policy() {
    set_txn_policy(TxnPolicy::RollbackOnOk);
}

#[actix_web::test]
async fn successful_work_is_not_persisted() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(current(), TxnPolicy::RollbackOnOk);
    let state = sqlite_state().await;

    let game = with_txn(None, &state, |txn| {
        Box::pin(async move {
            GameService::new()
                .create(txn, &obj(json!({"name": "ephemeral"})))
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    assert_eq!(game.name.as_deref(), Some("ephemeral"));
    assert_eq!(games_repo::find_by_id(db(&state), game.id).await?, None);
    Ok(())
}
