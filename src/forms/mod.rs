//! Form definitions backing the create-only collaborators.

use thiserror::Error;
use validator::ValidationErrors;

pub mod address;
pub mod client;
pub mod goal;
pub mod product_request;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid url")]
    InvalidUrl,

    #[error("invalid product request")]
    InvalidProductRequest,

    #[error("invalid sales goal")]
    InvalidGoal,
}
