use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::{middleware as mw, Router};

use crate::server::endpoints::{classes, exams, grid, status};
use crate::server::middleware::identity;
use crate::types::AppState;

mod endpoints;
mod middleware;
mod types;
mod util;

pub use types::{ApiErrorType, ApiFailure};

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Write endpoints resolve the caller's identity; the handlers enforce
    // the admin capability themselves so 401 and 403 stay distinct.
    let admin_router = Router::new()
        .route("/classes", post(classes::post_class))
        .route(
            "/classes/:id",
            put(classes::put_class).delete(classes::delete_class),
        )
        .route("/exams", post(exams::post_exam))
        .layer(mw::from_fn_with_state(
            app_state.clone(),
            identity::resolve_caller,
        ));

    Router::new()
        .route("/health", get(status::get_health))
        .route("/classes", get(classes::get_classes))
        .route("/classes/:id", get(classes::get_class))
        .route("/exams", get(exams::get_exams))
        .route("/grid", get(grid::get_grid))
        .route("/ongoing", get(grid::get_ongoing))
        .merge(admin_router)
        .with_state(app_state)
}
