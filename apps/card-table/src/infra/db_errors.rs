//! SeaORM -> DomainError translation.
//!
//! Repos convert `sea_orm::DbErr` into `DomainError` here (via `From`), and the
//! web boundary then maps `DomainError` to `AppError`.

use tracing::{error, warn};

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Translate a `DbErr` into a `DomainError` with a client-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Record, "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        sea_orm::DbErr::Json(_) | sea_orm::DbErr::Type(_) | sea_orm::DbErr::TryIntoErr { .. } => {
            error!(trace_id = %trace_id, raw_error = %error_msg, "Stored row could not be decoded");
            return DomainError::infra(InfraErrorKind::DataCorruption, "Stored data is corrupt");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::infra(
            InfraErrorKind::Other("ForeignKey".into()),
            "Foreign key constraint violation",
        );
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(InfraErrorKind::Other("DbErr".into()), "Database operation failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_becomes_not_found() {
        let err = map_db_err(sea_orm::DbErr::RecordNotFound("cards".into()));
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::Record, _)));
    }

    #[test]
    fn custom_errors_are_opaque_infra_failures() {
        let err = map_db_err(sea_orm::DbErr::Custom("boom".into()));
        match err {
            DomainError::Infra(InfraErrorKind::Other(_), detail) => {
                assert_eq!(detail, "Database operation failed");
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
