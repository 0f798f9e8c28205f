use super::dto::{ApiJson, ApiPath, CreateLabelRequest, UpdateLabelRequest};
use super::error::ApiErrorResponse;
use super::{blocking, AppState};
use crate::db::categories::{Category, CategoryWithCount};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryWithCount>>, ApiErrorResponse> {
    let service = state.categories.clone();
    Ok(Json(blocking(move || service.list()).await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Category>, ApiErrorResponse> {
    let service = state.categories.clone();
    Ok(Json(blocking(move || service.get_by_id(id)).await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateLabelRequest>,
) -> Result<(StatusCode, Json<Category>), ApiErrorResponse> {
    let input = request.into_input()?;
    let service = state.categories.clone();
    let category = blocking(move || service.create(input)).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateLabelRequest>,
) -> Result<Json<Category>, ApiErrorResponse> {
    let service = state.categories.clone();
    Ok(Json(blocking(move || service.update(id, request.into())).await?))
}

pub async fn delete_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiErrorResponse> {
    let service = state.categories.clone();
    blocking(move || service.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
