use async_graphql::ErrorExtensions;
use fleets::resolver::ResolverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Fleet not found: {0}")]
    FleetNotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ResolverError> for ApiError {
    fn from(err: ResolverError) -> Self {
        match err {
            ResolverError::Validation(msg) => ApiError::InvalidRequest(msg),
            ResolverError::NotFound(id) => ApiError::FleetNotFound(id),
            ResolverError::StorageUnavailable(msg) => ApiError::StorageUnavailable(msg),
            ResolverError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl ApiError {
    /// Convert ApiError to async_graphql::Error with the resolver's error codes.
    /// Storage and internal details stay in the server log.
    pub fn extend(self) -> async_graphql::Error {
        let (code, message) = match &self {
            ApiError::InvalidRequest(_) => ("VALIDATION_ERROR", self.to_string()),
            ApiError::FleetNotFound(_) => ("NOT_FOUND", self.to_string()),
            ApiError::StorageUnavailable(ref detail) => {
                tracing::error!("Storage unavailable: {}", detail);
                ("STORAGE_UNAVAILABLE", "The fleet store is unavailable".to_string())
            }
            ApiError::Internal(ref detail) => {
                tracing::error!("Internal error: {}", detail);
                ("INTERNAL_ERROR", "An internal error occurred".to_string())
            }
        };

        async_graphql::Error::new(message).extend_with(|_err, e| e.set("code", code))
    }
}
