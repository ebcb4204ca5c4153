use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;

use crate::error::AppError;
use crate::models::job::JobListing;
use crate::models::query::JobSearchQuery;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub data: Vec<JobListing>,
    pub count: usize,
}

impl From<Vec<JobListing>> for SearchResponse {
    fn from(data: Vec<JobListing>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// POST /api/v1/search
///
/// Scrape the requested sources and return the merged listings. When a
/// database is configured every listing is upserted; a failed save is
/// logged and does not fail the request.
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<JobSearchQuery>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(query) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    query.validate().map_err(AppError::BadRequest)?;

    let jobs = state.search.search_jobs(&query).await;

    if let Some(pool) = &state.pool {
        JobListing::save_all(pool, &jobs).await;
    }

    Ok(Json(jobs.into()))
}
