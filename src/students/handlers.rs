use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{Ack, StudentFields};
use super::repo::Student;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students))
        .route("/students/:id", get(get_student))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/students", post(create_student))
        .route("/students/:id", put(update_student).delete(delete_student))
}

#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state.repo.list().await?;
    Ok(Json(students))
}

#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, ApiError> {
    match state.repo.get(id).await? {
        Some(student) => Ok(Json(student)),
        None => Err(ApiError::NotFound(id)),
    }
}

#[instrument(skip(state, fields))]
pub async fn create_student(
    State(state): State<AppState>,
    Json(fields): Json<StudentFields>,
) -> Result<Json<Student>, ApiError> {
    fields.validate()?;
    let student = state.repo.create(fields).await?;
    tracing::info!(id = %student.id, "student created");
    Ok(Json(student))
}

#[instrument(skip(state, fields))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(fields): Json<StudentFields>,
) -> Result<Json<Ack>, ApiError> {
    fields.validate()?;
    if !state.repo.update(id, fields).await? {
        return Err(ApiError::NotFound(id));
    }
    Ok(Json(Ack {
        message: "Student updated",
    }))
}

#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ApiError> {
    if !state.repo.delete(id).await? {
        return Err(ApiError::NotFound(id));
    }
    Ok(Json(Ack {
        message: "Student deleted",
    }))
}
