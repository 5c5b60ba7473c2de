//! Weekly grid and ongoing-class views.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::schedule::filter::{self, FilterState};
use crate::schedule::occupancy::{self, Moment};
use crate::schedule::slots::build_week_grid;
use crate::schedule::time::format_hhmm;
use crate::schedule::ClassEntry;
use crate::server::types::ApiFailure;
use crate::server::util::fetch_classes;
use crate::types::AppState;

/// GET /grid
/// The weekly slot grid over the filtered listing, with cells whose class
/// is running at request time marked current.
pub async fn get_grid(
    State(s): State<Arc<AppState>>,
    Query(filters): Query<FilterState>,
) -> Result<Response, ApiFailure> {
    info!(
        "GET /grid (department={:?}, batch={:?}, section={:?})",
        filters.department, filters.batch, filters.section
    );

    let at = Moment::now();
    let classes = fetch_classes(&s, &filters)?;
    let classes = filter::apply(classes, &filters, &at);
    let grid = build_week_grid(&classes, &at);

    Ok((StatusCode::OK, Json(grid)).into_response())
}

#[derive(Debug, Serialize)]
struct OngoingClass {
    #[serde(flatten)]
    entry: ClassEntry,
    remaining: String,
}

/// GET /ongoing
/// Classes running right now, each with its remaining-time label.
pub async fn get_ongoing(
    State(s): State<Arc<AppState>>,
    Query(filters): Query<FilterState>,
) -> Result<Response, ApiFailure> {
    info!(
        "GET /ongoing (department={:?}, batch={:?}, section={:?}, search={:?})",
        filters.department, filters.batch, filters.section, filters.search
    );

    let at = Moment::now();
    let classes = fetch_classes(&s, &filters)?;
    let classes = filter::apply(classes, &filters, &at);

    let ongoing: Vec<OngoingClass> = occupancy::ongoing_set(&classes, &at)
        .into_iter()
        .filter_map(|entry| {
            occupancy::remaining(entry, &at).map(|remaining| OngoingClass {
                entry: entry.clone(),
                remaining: remaining.to_string(),
            })
        })
        .collect();

    Ok((
        StatusCode::OK,
        Json(json!({
            "day": at.day,
            "time": format_hhmm(at.minutes),
            "classes": ongoing,
        })),
    )
        .into_response())
}
