//! Auth session.
//!
//! Holds the bearer token for the signed-in shopper. Stores consult [`AuthSession`] before every
//! mutation; the HTTP client reads the token from [`TokenSession`].

use std::{
    fmt,
    sync::{PoisonError, RwLock},
};

use mockall::automock;
use tracing::debug;
use zeroize::Zeroizing;

#[automock]
pub trait AuthSession: Send + Sync {
    /// Whether a shopper is signed in. Must not block.
    fn is_authenticated(&self) -> bool;
}

/// Bearer token holder. The token is zeroized when replaced, cleared, or dropped.
#[derive(Default)]
pub struct TokenSession {
    token: RwLock<Option<Zeroizing<String>>>,
}

impl fmt::Debug for TokenSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSession")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl TokenSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with an already issued access token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.sign_in(token);
        session
    }

    /// Replace the current token. Blank tokens sign the shopper out.
    pub fn sign_in(&self, token: impl Into<String>) {
        let token = Zeroizing::new(token.into());
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);

        *guard = if token.trim().is_empty() {
            None
        } else {
            Some(token)
        };

        debug!(authenticated = guard.is_some(), "session token replaced");
    }

    pub fn sign_out(&self) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);

        *guard = None;

        debug!("session token cleared");
    }

    /// Value for the `Authorization` header, if signed in.
    #[must_use]
    pub fn bearer(&self) -> Option<Zeroizing<String>> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|token| Zeroizing::new(format!("Bearer {}", token.as_str())))
    }
}

impl AuthSession for TokenSession {
    fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_anonymous() {
        let session = TokenSession::new();

        assert!(!session.is_authenticated());
        assert!(session.bearer().is_none());
    }

    #[test]
    fn sign_in_then_out() {
        let session = TokenSession::with_token("abc.def.ghi");

        assert!(session.is_authenticated());
        assert_eq!(
            session.bearer().as_deref().map(String::as_str),
            Some("Bearer abc.def.ghi")
        );

        session.sign_out();

        assert!(!session.is_authenticated());
    }

    #[test]
    fn debug_output_hides_token() {
        let session = TokenSession::with_token("abc.def.ghi");

        let rendered = format!("{session:?}");

        assert!(!rendered.contains("abc.def.ghi"), "token leaked: {rendered}");
    }

    #[test]
    fn blank_token_is_not_a_session() {
        let session = TokenSession::with_token("   ");

        assert!(!session.is_authenticated());
    }
}
