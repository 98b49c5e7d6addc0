//! Domain-level error type used across the command engine, repos and services.
//!
//! This error type is HTTP- and DB-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Records addressed directly by a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    Game,
    Stack,
    Card,
    Command,
    Record,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A required key is absent from a change-set or request body
    MissingParameter(String),
    /// A key is present but empty, malformed, dangling or not writable
    InvalidParameter { name: String, detail: String },
    /// `operation` is not a member of the command vocabulary
    UnknownOperation(String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::MissingParameter(name) => {
                write!(f, "Missing parameter: the \"{name}\" parameter is required")
            }
            DomainError::InvalidParameter { name, detail } => {
                write!(f, "Invalid parameter: the \"{name}\" parameter is invalid. {detail}")
            }
            DomainError::UnknownOperation(op) => write!(f, "Unknown operation: {op}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }
    pub fn invalid(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            detail: detail.into(),
        }
    }
    pub fn unknown_operation(op: impl Into<String>) -> Self {
        Self::UnknownOperation(op.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Name of the offending parameter for the validation kinds.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            DomainError::MissingParameter(name) => Some(name),
            DomainError::InvalidParameter { name, .. } => Some(name),
            DomainError::UnknownOperation(_) => Some("operation"),
            _ => None,
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_message_names_param() {
        let err = DomainError::missing("stack_id");
        assert!(err.to_string().contains("Missing"));
        assert!(err.to_string().contains("stack_id"));
        assert_eq!(err.param_name(), Some("stack_id"));
    }

    #[test]
    fn invalid_parameter_message_carries_detail() {
        let err = DomainError::invalid("changes", "Invalid JSON");
        let msg = err.to_string();
        assert!(msg.contains("Invalid"));
        assert!(msg.contains("changes"));
        assert!(msg.contains("Invalid JSON"));
    }

    #[test]
    fn unknown_operation_points_at_operation() {
        let err = DomainError::unknown_operation("invalid");
        assert_eq!(err.param_name(), Some("operation"));
        assert!(err.to_string().contains("invalid"));
    }
}
