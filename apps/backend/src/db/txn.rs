use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::warn;

use super::txn_policy::{self, TxnPolicy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Boxed future returned by `with_txn` closures; borrows the transaction.
pub type TxnFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + Send + 'a>>;

/// Execute a closure within a database transaction.
///
/// Begins a transaction on the state's pool, runs the closure, then applies
/// the process transaction policy on `Ok` and rolls back on `Err`. A failed
/// commit surfaces as `AppError::PersistenceFailure` and leaves nothing applied.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R> + Send,
    R: Send,
{
    let txn = state.db().begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => match txn_policy::current() {
            TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            // Best-effort rollback; preserve original error
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback after failed operation also failed");
            }
            Err(err)
        }
    }
}
