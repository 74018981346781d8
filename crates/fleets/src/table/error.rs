//! Error: failures surfaced by any [`FleetTable`](super::FleetTable) implementation.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The item addressed by a conditional write does not exist.
    #[error("Fleet not found: {0}")]
    NotFound(String),
    /// The store could not be reached or asked us to back off.
    #[error("Table unavailable: {0}")]
    Unavailable(String),
    /// The store answered but refused the request.
    #[error("Table rejected request: {0}")]
    Rejected(String),
    #[error("Item conversion failed: {0}")]
    Codec(String),
}

impl From<serde_dynamo::Error> for TableError {
    fn from(err: serde_dynamo::Error) -> Self {
        TableError::Codec(err.to_string())
    }
}
