//! Single-unit write transactions.
//!
//! Every service mutation runs through [`write_in_transaction`]: the callback
//! performs its writes on the transaction, which commits when the callback
//! succeeds and rolls back otherwise. Failures are logged with a generated
//! transaction id and surfaced as the matching `ServiceError` variant.

use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionError, TransactionTrait};
use tracing::{debug, error};
use uuid::Uuid;

use crate::shared::errors::{ServiceError, ServiceResult};

/// What kind of write a transaction performs; selects the error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
    Delete,
}

impl WriteKind {
    fn into_error(self, entity: &'static str, transaction_id: Uuid, source: DbErr) -> ServiceError {
        match self {
            Self::Create => ServiceError::Create {
                entity,
                transaction_id,
                source,
            },
            Self::Update => ServiceError::Update {
                entity,
                transaction_id,
                source,
            },
            Self::Delete => ServiceError::Delete {
                entity,
                transaction_id,
                source,
            },
        }
    }
}

pub async fn write_in_transaction<T, F>(
    db: &DatabaseConnection,
    kind: WriteKind,
    entity: &'static str,
    scope: &'static str,
    write: F,
) -> ServiceResult<T>
where
    T: Send,
    F: for<'c> FnOnce(
            &'c DatabaseTransaction,
        ) -> Pin<Box<dyn Future<Output = Result<T, DbErr>> + Send + 'c>>
        + Send,
{
    let transaction_id = Uuid::new_v4();
    debug!(%transaction_id, scope, "transaction started");

    match db.transaction(write).await {
        Ok(value) => {
            debug!(%transaction_id, scope, "transaction committed");
            Ok(value)
        }
        Err(err) => {
            let source = match err {
                TransactionError::Connection(e) | TransactionError::Transaction(e) => e,
            };
            error!(%transaction_id, error = %source, "[{}] transaction rolled back", scope);
            Err(kind.into_error(entity, transaction_id, source))
        }
    }
}
