use super::dto::{ApiJson, ApiPath, ApiQuery, CreateTaskRequest, UpdateTaskRequest};
use super::error::ApiErrorResponse;
use super::{blocking, AppState};
use crate::libs::error::FieldError;
use crate::libs::filter::TaskQueryParams;
use crate::libs::task::{Task, TaskWithRelations};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

/// `GET /tasks`. Without parameters the list comes back newest first,
/// otherwise it is filtered and sorted like the board does.
pub async fn list_tasks(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TaskQueryParams>,
) -> Result<Json<Vec<TaskWithRelations>>, ApiErrorResponse> {
    let query = if params.is_empty() {
        None
    } else {
        let query = params.parse().map_err(|errors| {
            errors
                .into_iter()
                .map(|(field, message)| FieldError::new(field, message))
                .collect::<Vec<_>>()
        })?;
        Some(query)
    };

    let service = state.tasks.clone();
    let tasks = blocking(move || service.list()).await?;

    Ok(Json(match query {
        Some(query) => query.apply_owned(tasks),
        None => tasks,
    }))
}

pub async fn get_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TaskWithRelations>, ApiErrorResponse> {
    let service = state.tasks.clone();
    let task = blocking(move || service.get_by_id(id)).await?;
    Ok(Json(task))
}

pub async fn create_task(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiErrorResponse> {
    let input = request.into_new_task()?;
    let service = state.tasks.clone();
    let task = blocking(move || service.create(input)).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiErrorResponse> {
    let patch = request.into_patch()?;
    let service = state.tasks.clone();
    let task = blocking(move || service.update(id, patch)).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiErrorResponse> {
    let service = state.tasks.clone();
    blocking(move || service.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Task>, ApiErrorResponse> {
    let service = state.tasks.clone();
    let task = blocking(move || service.toggle_completed(id)).await?;
    Ok(Json(task))
}
