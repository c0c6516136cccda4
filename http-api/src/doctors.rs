//! Doctor endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use clinic_core::{
    Doctor, DoctorPage, DoctorQuery, DoctorRepository, NewDoctor, TaskRepository, UpdateDoctor,
};
use serde_json::{json, Value};

use crate::{error::ApiError, server::AppState};

/// `GET /doctors/?limit&page&name&servicerole&gender` → `{"pages", "doctors"}`
pub async fn list_doctors<T, D>(
    State(state): State<AppState<T, D>>,
    query: Result<Query<DoctorQuery>, QueryRejection>,
) -> Result<Json<DoctorPage>, ApiError>
where
    T: TaskRepository + 'static,
    D: DoctorRepository + 'static,
{
    let Query(query) = query?;
    let page = state.doctors.list(query).await.map_err(ApiError::read)?;
    Ok(Json(page))
}

/// `GET /doctors/:id` → the full doctor document
pub async fn get_doctor<T, D>(
    State(state): State<AppState<T, D>>,
    Path(id): Path<String>,
) -> Result<Json<Doctor>, ApiError>
where
    T: TaskRepository + 'static,
    D: DoctorRepository + 'static,
{
    let doctor = state.doctors.get_by_id(&id).await.map_err(ApiError::read)?;
    Ok(Json(doctor))
}

/// `POST /doctors/` → `{"id": "<hex>"}`
pub async fn create_doctor<T, D>(
    State(state): State<AppState<T, D>>,
    payload: Result<Json<NewDoctor>, JsonRejection>,
) -> Result<Json<Value>, ApiError>
where
    T: TaskRepository + 'static,
    D: DoctorRepository + 'static,
{
    let Json(doctor) = payload?;
    let id = state.doctors.create(doctor).await.map_err(ApiError::write)?;
    Ok(Json(json!({ "id": id })))
}

/// `PUT /doctors/` → `{"task": {...}}`
///
/// The envelope key is `task` for compatibility with existing clients.
pub async fn update_doctor<T, D>(
    State(state): State<AppState<T, D>>,
    payload: Result<Json<UpdateDoctor>, JsonRejection>,
) -> Result<Json<Value>, ApiError>
where
    T: TaskRepository + 'static,
    D: DoctorRepository + 'static,
{
    let Json(update) = payload?;
    let doctor = state
        .doctors
        .update(update)
        .await
        .map_err(ApiError::write)?;
    Ok(Json(json!({ "task": doctor })))
}
