//! Carts service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("not signed in")]
    Unauthorized,

    #[error("cart resource not found")]
    NotFound(Option<String>),

    #[error("request rejected")]
    Rejected(Option<String>),

    #[error("promo code rejected")]
    InvalidPromoCode(Option<String>),

    #[error("transport error")]
    Transport(#[source] ApiError),
}

impl CartsServiceError {
    /// Message from the remote error payload, if it carried one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NotFound(message) | Self::Rejected(message) | Self::InvalidPromoCode(message) => {
                message.as_deref()
            }
            Self::Transport(error) => error.message(),
            Self::Unauthorized => None,
        }
    }
}

impl From<ApiError> for CartsServiceError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status {
                status: 401 | 403, ..
            } => Self::Unauthorized,
            ApiError::Status {
                status: 404,
                message,
            } => Self::NotFound(message),
            ApiError::Status {
                status: 400 | 409 | 422,
                message,
            } => Self::Rejected(message),
            error => Self::Transport(error),
        }
    }
}
