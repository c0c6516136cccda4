//! Task endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use clinic_core::{DoctorRepository, NewTask, Task, TaskRepository, UpdateTask};
use serde_json::{json, Value};

use crate::{error::ApiError, server::AppState};

/// `GET /tasks/` → `{"tasks": [...]}`
pub async fn list_tasks<T, D>(State(state): State<AppState<T, D>>) -> Result<Json<Value>, ApiError>
where
    T: TaskRepository + 'static,
    D: DoctorRepository + 'static,
{
    let tasks = state.tasks.list().await.map_err(ApiError::read)?;
    Ok(Json(json!({ "tasks": tasks })))
}

/// `GET /tasks/:id` → `{"ID", "Title", "Body"}`
pub async fn get_task<T, D>(
    State(state): State<AppState<T, D>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError>
where
    T: TaskRepository + 'static,
    D: DoctorRepository + 'static,
{
    let task = state.tasks.get_by_id(&id).await.map_err(ApiError::read)?;
    Ok(Json(task))
}

/// `POST /tasks/` → `{"id": "<hex>"}`
pub async fn create_task<T, D>(
    State(state): State<AppState<T, D>>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<Json<Value>, ApiError>
where
    T: TaskRepository + 'static,
    D: DoctorRepository + 'static,
{
    let Json(task) = payload?;
    let id = state.tasks.create(task).await.map_err(ApiError::write)?;
    Ok(Json(json!({ "id": id })))
}

/// `PUT /tasks/` → `{"task": {...}}` holding the post-update document
pub async fn update_task<T, D>(
    State(state): State<AppState<T, D>>,
    payload: Result<Json<UpdateTask>, JsonRejection>,
) -> Result<Json<Value>, ApiError>
where
    T: TaskRepository + 'static,
    D: DoctorRepository + 'static,
{
    let Json(update) = payload?;
    let task = state.tasks.update(update).await.map_err(ApiError::write)?;
    Ok(Json(json!({ "task": task })))
}
