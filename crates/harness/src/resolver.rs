use std::collections::HashMap;
use std::sync::RwLock;

use loadout_core::UserId;
use loadout_engine::{AuthError, IdentityResolver};

/// Token table that can grow while a service is running, so tests can
/// register players after the backend is built.
#[derive(Default)]
pub struct SharedResolver {
    tokens: RwLock<HashMap<String, UserId>>,
}

impl SharedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, token: &str, user_id: UserId) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.to_string(), user_id);
        }
    }

    pub fn revoke(&self, token: &str) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.remove(token);
        }
    }
}

impl IdentityResolver for SharedResolver {
    fn resolve(&self, token: &str) -> Result<UserId, AuthError> {
        let tokens = self.tokens.read().map_err(|_| AuthError::Rejected)?;
        tokens.get(token).cloned().ok_or(AuthError::Rejected)
    }
}
