use std::collections::HashMap;
use std::sync::Arc;

use loadout_core::{CoreError, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing credential")]
    MissingCredential,

    #[error("malformed credential")]
    MalformedCredential,

    #[error("credential rejected")]
    Rejected,

    #[error("invalid identity format: {0}")]
    InvalidIdentity(#[from] CoreError),
}

/// A `token=user` table that could not be read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenTableError {
    #[error("expected token=user, got {0:?}")]
    MalformedEntry(String),
}

/// Maps a bearer token to the user it was issued for. Token validation
/// belongs to the identity provider behind this trait.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, token: &str) -> Result<UserId, AuthError>;
}

impl<R: IdentityResolver + ?Sized> IdentityResolver for Arc<R> {
    fn resolve(&self, token: &str) -> Result<UserId, AuthError> {
        (**self).resolve(token)
    }
}

/// Extracts the token from an `Authorization` header value. The scheme is
/// matched case-insensitively.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.map(str::trim).filter(|h| !h.is_empty());
    let header = header.ok_or(AuthError::MissingCredential)?;
    let (scheme, token) = header
        .split_once(' ')
        .ok_or(AuthError::MalformedCredential)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::MalformedCredential);
    }
    Ok(token)
}

/// Fixed token table, used for local runs and tests.
#[derive(Debug, Default, Clone)]
pub struct StaticTokenResolver {
    tokens: HashMap<String, String>,
}

impl StaticTokenResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` for `user_id`. The id is checked on resolve, so a
    /// bad entry surfaces as an invalid identity rather than at startup.
    pub fn with_token(mut self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), user_id.into());
        self
    }

    /// Parses `token=user,token=user` pairs. Blank entries are skipped.
    pub fn parse(pairs: &str) -> Result<Self, TokenTableError> {
        let mut resolver = Self::new();
        for entry in pairs.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (token, user) = entry
                .split_once('=')
                .ok_or_else(|| TokenTableError::MalformedEntry(entry.to_string()))?;
            resolver = resolver.with_token(token.trim(), user.trim());
        }
        Ok(resolver)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl IdentityResolver for StaticTokenResolver {
    fn resolve(&self, token: &str) -> Result<UserId, AuthError> {
        let user = self.tokens.get(token).ok_or(AuthError::Rejected)?;
        Ok(UserId::parse(user)?)
    }
}
