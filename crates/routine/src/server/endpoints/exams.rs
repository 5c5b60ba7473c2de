//! Listing and creation endpoints for exam entries.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::auth::Caller;
use crate::schedule::filter::{self, ExamFilter};
use crate::schedule::{ExamDraft, ExamType};
use crate::server::types::ApiFailure;
use crate::types::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExamQueryParams {
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, rename = "type")]
    pub exam_type: Option<String>,
}

/// GET /exams
/// Returns exams filtered by department and type, sorted (date, startTime).
pub async fn get_exams(
    State(s): State<Arc<AppState>>,
    Query(params): Query<ExamQueryParams>,
) -> Result<Response, ApiFailure> {
    info!(
        "GET /exams (department={:?}, type={:?})",
        params.department, params.exam_type
    );

    // An unknown type is a caller error, not an empty result.
    let exam_type = params
        .exam_type
        .as_deref()
        .map(ExamType::parse)
        .transpose()
        .map_err(ApiFailure::InvalidEntry)?;

    let exams = s.db.list_exams()?;
    let exams = filter::apply_exams(
        exams,
        &ExamFilter {
            department: params.department.as_deref(),
            exam_type,
        },
    );

    Ok((StatusCode::OK, Json(json!({ "exams": exams }))).into_response())
}

/// POST /exams
/// Admin only.
pub async fn post_exam(
    State(s): State<Arc<AppState>>,
    Extension(caller): Extension<Caller>,
    Json(draft): Json<ExamDraft>,
) -> Result<Response, ApiFailure> {
    let user = caller.require_admin()?;
    info!("POST /exams by {} ({})", user.user_id, draft.course_code);

    draft.validate()?;
    let exam = s.db.insert_exam(&draft)?;

    Ok((StatusCode::CREATED, Json(json!({ "exam": exam }))).into_response())
}
