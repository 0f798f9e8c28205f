use super::dto::{ApiJson, ApiPath, CreateLabelRequest, UpdateLabelRequest};
use super::error::ApiErrorResponse;
use super::{blocking, AppState};
use crate::db::tags::{Tag, TagWithCount};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagWithCount>>, ApiErrorResponse> {
    let service = state.tags.clone();
    Ok(Json(blocking(move || service.list()).await?))
}

pub async fn get_tag(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<Json<Tag>, ApiErrorResponse> {
    let service = state.tags.clone();
    Ok(Json(blocking(move || service.get_by_id(id)).await?))
}

pub async fn create_tag(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateLabelRequest>,
) -> Result<(StatusCode, Json<Tag>), ApiErrorResponse> {
    let input = request.into_input()?;
    let service = state.tags.clone();
    let tag = blocking(move || service.create(input)).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn update_tag(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateLabelRequest>,
) -> Result<Json<Tag>, ApiErrorResponse> {
    let service = state.tags.clone();
    Ok(Json(blocking(move || service.update(id, request.into())).await?))
}

pub async fn delete_tag(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<StatusCode, ApiErrorResponse> {
    let service = state.tags.clone();
    blocking(move || service.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
