//! Error types for view-model operations.

use roster_client::{ClientError, UserId};
use thiserror::Error;

/// Outcome of a failed view-model operation.
#[derive(Error, Debug)]
pub enum ViewError {
    /// The request to the collection resource failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// No record with this id is in the list
    #[error("User not found: {0}")]
    UnknownUser(UserId),

    /// An update or delete for this id is still outstanding
    #[error("Request already in flight for user {0}")]
    Busy(UserId),

    /// The view was torn down before the response arrived
    #[error("View has been unmounted")]
    Unmounted,
}

/// Result type for view-model operations.
pub type Result<T> = std::result::Result<T, ViewError>;
