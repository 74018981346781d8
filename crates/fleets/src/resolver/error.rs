//! Resolver errors and their stable codes.

use thiserror::Error;

use crate::table::TableError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolverError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Fleet not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ResolverResult<T> = Result<T, ResolverError>;

impl ResolverError {
    /// Stable machine-readable code, used as the Lambda `errorType`
    /// and the GraphQL `code` extension.
    pub fn code(&self) -> &'static str {
        match self {
            ResolverError::Validation(_) => "VALIDATION_ERROR",
            ResolverError::NotFound(_) => "NOT_FOUND",
            ResolverError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            ResolverError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Mapping rules:
/// - `NotFound` → `NotFound`
/// - `Unavailable` / `Rejected` → `StorageUnavailable`
/// - `Codec` → `Internal` (a stored item no longer matches the record shape)
impl From<TableError> for ResolverError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::NotFound(id) => ResolverError::NotFound(id),
            TableError::Unavailable(msg) | TableError::Rejected(msg) => {
                ResolverError::StorageUnavailable(msg)
            }
            TableError::Codec(msg) => ResolverError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_not_found() {
        let err: ResolverError = TableError::NotFound("f-1".to_string()).into();
        assert_eq!(err, ResolverError::NotFound("f-1".to_string()));
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_map_unavailable_and_rejected() {
        let err: ResolverError = TableError::Unavailable("throttled".to_string()).into();
        assert_eq!(err.code(), "STORAGE_UNAVAILABLE");
        assert!(err.to_string().contains("throttled"));

        let err: ResolverError = TableError::Rejected("AccessDenied".to_string()).into();
        assert_eq!(err.code(), "STORAGE_UNAVAILABLE");
    }

    #[test]
    fn test_map_codec() {
        let err: ResolverError = TableError::Codec("missing field".to_string()).into();
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }
}
