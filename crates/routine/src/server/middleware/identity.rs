//! Resolves the caller's identity from the Authorization header.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::{Caller, TokenFingerprint};
use crate::types::AppState;

/// Attaches a [`Caller`] extension to the request.
///
/// A missing or unrecognized bearer token yields `Caller::Anonymous`;
/// handlers decide what that caller may do. Raw tokens never reach the
/// logs, only their fingerprints.
pub async fn resolve_caller(
    State(s): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let caller = match bearer_token(req.headers()) {
        None => Caller::Anonymous,
        Some(token) => {
            let fingerprint = TokenFingerprint::from_token(token);
            match s.identity.resolve(token) {
                Some(user) => {
                    debug!("Resolved caller {} (token {})", user.user_id, fingerprint);
                    Caller::Known(user)
                }
                None => {
                    warn!("Unrecognized API token {}", fingerprint);
                    Caller::Anonymous
                }
            }
        }
    };

    req.extensions_mut().insert(caller);
    next.run(req).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
