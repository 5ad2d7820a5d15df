use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreateDoctorRequest, DoctorError};
use crate::services::DoctorService;

fn map_doctor_error(err: DoctorError) -> AppError {
    match err {
        DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        DoctorError::AlreadyExists { email } => {
            AppError::Conflict(format!("Doctor with email {} already exists", email))
        }
        DoctorError::Validation { message } => AppError::BadRequest(message),
        DoctorError::Database { message } => AppError::Database(message),
    }
}

#[axum::debug_handler]
pub async fn list_doctors(State(state): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let doctors = DoctorService::new(&state)
        .list_doctors()
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!(doctors)))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    debug!("Admin adding doctor: {}", request.email);

    let doctor = DoctorService::new(&state)
        .create_doctor(&request)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    debug!("Admin removing doctor: {}", email);

    let doctor = DoctorService::new(&state)
        .delete_doctor(&email)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!({ "success": true, "doctor": doctor })))
}
