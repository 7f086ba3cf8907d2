//! Service layer coordinating viewers, fetches and page data.

use thiserror::Error;

pub mod api;
pub mod main;
pub mod viewers;

/// Errors surfaced by service functions to the route handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// User input failed validation; the message is shown to the user.
    #[error("{0}")]
    Form(String),

    #[error("invalid value: {0}")]
    TypeConstraint(String),

    /// The character API could not serve the request.
    #[error("{0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
