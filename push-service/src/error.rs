/// Error types for push-service
use thiserror::Error;

use crate::repository::RepositoryError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Subscription store error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
