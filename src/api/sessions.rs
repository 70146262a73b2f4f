use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::{
    ApiError, AppState, PageQuery, SessionDto, SessionResultDto, SessionSearchDto,
    UpdateResultRequest, UpsertSearchRequest,
};
use crate::api::validation::{validate_result_id, validate_session_id};

pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionDto>, ApiError> {
    let session = state.store().create_session().await?;
    Ok(Json(session.into()))
}

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<SessionDto>>, ApiError> {
    let sessions = state.store().list_sessions(page.offset, page.limit).await?;
    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

pub async fn upsert_session_search(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<i32>,
    Json(body): Json<UpsertSearchRequest>,
) -> Result<Json<SessionSearchDto>, ApiError> {
    validate_session_id(session_id)?;

    if !state.store().session_exists(session_id).await? {
        return Err(ApiError::session_not_found(session_id));
    }

    let search = state
        .store()
        .upsert_search(session_id, &body.query, &body.issues, body.max_results)
        .await?;

    Ok(Json(search.into()))
}

pub async fn get_session_search(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<i32>,
) -> Result<Json<SessionSearchDto>, ApiError> {
    validate_session_id(session_id)?;

    let search = state
        .store()
        .get_search(session_id)
        .await?
        .ok_or_else(|| ApiError::search_not_configured(session_id))?;

    Ok(Json(search.into()))
}

/// No existence check on the session here: an unknown session lists as
/// empty. That asymmetry matches the original contract for this endpoint.
pub async fn list_session_results(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<i32>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<SessionResultDto>>, ApiError> {
    validate_session_id(session_id)?;

    let results = state
        .store()
        .list_results(session_id, page.offset, page.limit)
        .await?;

    Ok(Json(results.into_iter().map(Into::into).collect()))
}

pub async fn update_session_result(
    State(state): State<Arc<AppState>>,
    Path((session_id, result_id)): Path<(i32, i32)>,
    Json(body): Json<UpdateResultRequest>,
) -> Result<Json<SessionResultDto>, ApiError> {
    validate_session_id(session_id)?;
    validate_result_id(result_id)?;

    let result = state
        .store()
        .update_result(session_id, result_id, body.tier, body.status)
        .await?
        .ok_or_else(|| ApiError::result_not_found(session_id, result_id))?;

    Ok(Json(result.into()))
}
