use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    Json,
};

use crate::http::response::{rejected, respond, ApiResponse};
use crate::http::server::AppState;
use crate::store::{NewStudent, StudentUpdate};

pub async fn list_students(State(state): State<AppState>) -> Response {
    let start = Instant::now();

    let body = match state.store.list().await {
        Ok(rows) => ApiResponse::ok("Students fetched successfully", rows),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch students");
            ApiResponse::fail("Failed to fetch students")
        }
    };

    respond("list_students", start, body)
}

pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let Json(student) = match payload {
        Ok(p) => p,
        Err(rejection) => return respond("create_student", start, rejected("create_student", rejection)),
    };

    let body = match state.store.insert(&student).await {
        Ok(rows) => ApiResponse::ok("Student added successfully", rows),
        Err(e) => {
            tracing::error!(roll = ?student.roll, error = %e, "Failed to add student");
            ApiResponse::fail("Failed to add student")
        }
    };

    respond("create_student", start, body)
}

/// Zero matched rows still counts as success.
pub async fn update_student(
    State(state): State<AppState>,
    Path(roll): Path<String>,
    payload: Result<Json<StudentUpdate>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let Json(update) = match payload {
        Ok(p) => p,
        Err(rejection) => return respond("update_student", start, rejected("update_student", rejection)),
    };

    let body = match state.store.update(&roll, &update).await {
        Ok(rows) => ApiResponse::ok("Student updated successfully", rows),
        Err(e) => {
            tracing::error!(roll = %roll, error = %e, "Failed to update student");
            ApiResponse::fail("Failed to update student")
        }
    };

    respond("update_student", start, body)
}

/// Deleting an unknown roll still counts as success.
pub async fn delete_student(State(state): State<AppState>, Path(roll): Path<String>) -> Response {
    let start = Instant::now();

    let body = match state.store.delete(&roll).await {
        Ok(rows) => ApiResponse::ok("Student deleted successfully", rows),
        Err(e) => {
            tracing::error!(roll = %roll, error = %e, "Failed to delete student");
            ApiResponse::fail("Failed to delete student")
        }
    };

    respond("delete_student", start, body)
}
