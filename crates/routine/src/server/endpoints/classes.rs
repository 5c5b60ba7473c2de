//! CRUD endpoints for class entries.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::auth::Caller;
use crate::schedule::filter::{self, FilterState};
use crate::schedule::occupancy::Moment;
use crate::schedule::ClassDraft;
use crate::server::types::ApiFailure;
use crate::server::util::fetch_classes;
use crate::types::AppState;

/// GET /classes
/// Returns the filtered listing, sorted (day, startTime) ascending.
pub async fn get_classes(
    State(s): State<Arc<AppState>>,
    Query(filters): Query<FilterState>,
) -> Result<Response, ApiFailure> {
    info!(
        "GET /classes (department={:?}, batch={:?}, section={:?}, search={:?}, ongoing={})",
        filters.department, filters.batch, filters.section, filters.search, filters.ongoing_only
    );

    let at = Moment::now();
    let classes = fetch_classes(&s, &filters)?;
    let classes = filter::apply(classes, &filters, &at);

    Ok((StatusCode::OK, Json(json!({ "classes": classes }))).into_response())
}

/// GET /classes/:id
pub async fn get_class(
    Path(id): Path<i64>,
    State(s): State<Arc<AppState>>,
) -> Result<Response, ApiFailure> {
    info!("GET /classes/{}", id);

    match s.db.get_class(id)? {
        Some(class) => Ok((StatusCode::OK, Json(json!({ "class": class }))).into_response()),
        None => Err(ApiFailure::NotFound(id)),
    }
}

/// POST /classes
/// Admin only; validates the draft before it reaches the store.
pub async fn post_class(
    State(s): State<Arc<AppState>>,
    Extension(caller): Extension<Caller>,
    Json(draft): Json<ClassDraft>,
) -> Result<Response, ApiFailure> {
    let user = caller.require_admin()?;
    info!("POST /classes by {} ({})", user.user_id, draft.course_code);

    let day = draft.validate()?;
    let class = s.db.insert_class(&draft, day)?;
    s.listing_cache.clear();

    Ok((StatusCode::CREATED, Json(json!({ "class": class }))).into_response())
}

/// PUT /classes/:id
/// Admin only; full replacement of the entry's fields.
pub async fn put_class(
    Path(id): Path<i64>,
    State(s): State<Arc<AppState>>,
    Extension(caller): Extension<Caller>,
    Json(draft): Json<ClassDraft>,
) -> Result<Response, ApiFailure> {
    let user = caller.require_admin()?;
    info!("PUT /classes/{} by {}", id, user.user_id);

    let day = draft.validate()?;
    match s.db.update_class(id, &draft, day)? {
        Some(class) => {
            s.listing_cache.clear();
            Ok((StatusCode::OK, Json(json!({ "class": class }))).into_response())
        }
        None => Err(ApiFailure::NotFound(id)),
    }
}

/// DELETE /classes/:id
/// Admin only.
pub async fn delete_class(
    Path(id): Path<i64>,
    State(s): State<Arc<AppState>>,
    Extension(caller): Extension<Caller>,
) -> Result<Response, ApiFailure> {
    let user = caller.require_admin()?;
    info!("DELETE /classes/{} by {}", id, user.user_id);

    if !s.db.delete_class(id)? {
        return Err(ApiFailure::NotFound(id));
    }
    s.listing_cache.clear();

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Class deleted successfully" })),
    )
        .into_response())
}
