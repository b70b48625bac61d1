//! Wishlist service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum WishlistServiceError {
    #[error("not signed in")]
    Unauthorized,

    #[error("wishlist entry not found")]
    NotFound(Option<String>),

    #[error("request rejected")]
    Rejected(Option<String>),

    #[error("transport error")]
    Transport(#[source] ApiError),
}

impl WishlistServiceError {
    /// Message from the remote error payload, if it carried one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NotFound(message) | Self::Rejected(message) => message.as_deref(),
            Self::Transport(error) => error.message(),
            Self::Unauthorized => None,
        }
    }
}

impl From<ApiError> for WishlistServiceError {
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
