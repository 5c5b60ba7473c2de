//! Shared application state.

use crate::auth::{IdentityProvider, StaticTokenProvider};
use crate::config::ServerConfig;
use crate::db::cache::ListingCache;
use crate::db::RoutineDbManager;

/// State shared by every request handler, behind an `Arc`.
pub struct AppState {
    pub db: RoutineDbManager,
    /// Identity backend; boxed so it stays swappable.
    pub identity: Box<dyn IdentityProvider>,
    pub listing_cache: ListingCache,
}

impl AppState {
    pub fn new(config: &ServerConfig, db: RoutineDbManager) -> Self {
        Self {
            db,
            identity: Box::new(StaticTokenProvider::from_config(&config.api_tokens)),
            listing_cache: ListingCache::with_default_ttl(),
        }
    }
}
