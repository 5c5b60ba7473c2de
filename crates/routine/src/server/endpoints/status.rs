//! Health endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::server::types::ApiFailure;
use crate::types::AppState;

/// GET /health
pub async fn get_health(State(s): State<Arc<AppState>>) -> Result<Response, ApiFailure> {
    let classes = s.db.count_classes()?;
    let exams = s.db.count_exams()?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "classes": classes,
            "exams": exams,
        })),
    )
        .into_response())
}
