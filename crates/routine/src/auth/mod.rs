//! Identity resolution and capability checks.
//!
//! Write operations require the caller's identity to carry the "admin" role.
//! The role lives in an opaque metadata bag so the concrete identity backend
//! stays swappable; the bundled backend is a static token table from the
//! server configuration.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::config::TokenIdentity;

/// Authorization failures, kept distinct so the UI can render the right
/// call-to-action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No identity at all
    #[error("sign in required")]
    Unauthenticated,

    /// Identity present but lacks the required role
    #[error("admin access required")]
    Forbidden,
}

/// A resolved caller identity with its provider metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: String,
    /// Opaque provider metadata; role assignments live under the "role" key.
    pub metadata: HashMap<String, String>,
}

/// Checks a role attribute in the identity's metadata bag.
pub fn has_role(user: &UserIdentity, role: &str) -> bool {
    user.metadata.get("role").is_some_and(|r| r == role)
}

/// Maps opaque bearer tokens to identities.
pub trait IdentityProvider: Send + Sync {
    fn resolve(&self, token: &str) -> Option<UserIdentity>;
}

/// Token table sourced from the server configuration.
pub struct StaticTokenProvider {
    tokens: HashMap<String, UserIdentity>,
}

impl StaticTokenProvider {
    pub fn from_config(tokens: &HashMap<String, TokenIdentity>) -> Self {
        let tokens = tokens
            .iter()
            .map(|(token, identity)| {
                (
                    token.clone(),
                    UserIdentity {
                        user_id: identity.user_id.clone(),
                        metadata: identity.metadata.clone(),
                    },
                )
            })
            .collect();
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl IdentityProvider for StaticTokenProvider {
    fn resolve(&self, token: &str) -> Option<UserIdentity> {
        self.tokens.get(token).cloned()
    }
}

/// The caller attached to a request by the identity middleware.
#[derive(Debug, Clone)]
pub enum Caller {
    Anonymous,
    Known(UserIdentity),
}

impl Caller {
    /// Admits only authenticated admins.
    ///
    /// Anonymous callers get `Unauthenticated`; known callers without the
    /// admin role get `Forbidden`. The two are never merged.
    pub fn require_admin(&self) -> Result<&UserIdentity, AuthError> {
        match self {
            Caller::Anonymous => Err(AuthError::Unauthenticated),
            Caller::Known(user) if has_role(user, "admin") => Ok(user),
            Caller::Known(_) => Err(AuthError::Forbidden),
        }
    }
}

/// A hashed stand-in for a bearer token, safe to log.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct TokenFingerprint(String);

impl TokenFingerprint {
    pub fn from_token(token: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        let result = hasher.finalize();
        Self(hex::encode(&result[..16]))
    }
}

impl fmt::Display for TokenFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only show the first 8 chars
        write!(f, "{}...", &self.0[..8.min(self.0.len())])
    }
}

/// Helper module for hex encoding (avoiding extra dependency).
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
