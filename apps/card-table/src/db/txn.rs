use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use futures::future::BoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::debug;

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// A shared transaction that tests inject into request extensions
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }
}

/// Execute a unit of work within a database transaction.
///
/// 1) A `SharedTxn` in the request extensions is used as-is (no commit/rollback here).
/// 2) Otherwise begin a transaction, run the closure, apply the policy on `Ok` and
///    roll back on `Err`. Every write the closure staged is discarded on error,
///    including writes made before the failing step.
pub async fn with_txn<R, F>(req: Option<&HttpRequest>, state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'t> FnOnce(&'t DatabaseTransaction) -> BoxFuture<'t, Result<R, AppError>>,
{
    // clone out of the extensions before awaiting; the RefCell borrow must not be held
    let shared_txn: Option<SharedTxn> = req.and_then(|r| r.extensions().get::<SharedTxn>().cloned());

    if let Some(shared) = shared_txn {
        return f(shared.transaction()).await;
    }

    let db = require_db(state)?;
    let txn = db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => match txn_policy::current() {
            txn_policy::TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            txn_policy::TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            debug!(error = %err, "rolling back transaction");
            // best-effort rollback; the body's error wins
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
