use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{CreateDoctorRequest, Doctor, DoctorError};

pub struct DoctorService {
    supabase: SupabaseClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        debug!("Listing doctors");

        let doctors: Vec<Doctor> = self
            .supabase
            .request(Method::GET, "/rest/v1/doctors?order=name.asc", None)
            .await?;

        Ok(doctors)
    }

    /// Add a doctor to the roster. The email is the natural key, so an
    /// existing row with the same email turns the request into a conflict.
    pub async fn create_doctor(
        &self,
        request: &CreateDoctorRequest,
    ) -> Result<Doctor, DoctorError> {
        validate_doctor_request(request)?;

        debug!("Creating doctor profile for: {}", request.email);

        let existing_path = format!("/rest/v1/doctors?email=eq.{}", request.email);
        let existing: Vec<Doctor> = self
            .supabase
            .request(Method::GET, &existing_path, None)
            .await?;

        if !existing.is_empty() {
            return Err(DoctorError::AlreadyExists {
                email: request.email.clone(),
            });
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Doctor> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/doctors",
                Some(json!({
                    "name": request.name,
                    "email": request.email,
                    "specialty": request.specialty,
                })),
                Some(headers),
            )
            .await?;

        let doctor = result.into_iter().next().ok_or_else(|| DoctorError::Database {
            message: "Insert returned no doctor row".to_string(),
        })?;

        info!("Doctor {} added to the roster", doctor.email);
        Ok(doctor)
    }

    /// Remove a doctor by email. The returned representation tells us
    /// whether anything was actually deleted.
    pub async fn delete_doctor(&self, email: &str) -> Result<Doctor, DoctorError> {
        debug!("Deleting doctor: {}", email);

        let path = format!("/rest/v1/doctors?email=eq.{}", email);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let deleted: Vec<Doctor> = self
            .supabase
            .request_with_headers(Method::DELETE, &path, None, Some(headers))
            .await?;

        let doctor = deleted.into_iter().next().ok_or(DoctorError::NotFound)?;

        info!("Doctor {} removed from the roster", doctor.email);
        Ok(doctor)
    }
}

fn validate_doctor_request(request: &CreateDoctorRequest) -> Result<(), DoctorError> {
    if request.name.trim().is_empty() {
        return Err(DoctorError::Validation {
            message: "Doctor name must not be empty".to_string(),
        });
    }
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(DoctorError::Validation {
            message: format!("Invalid doctor email: {}", request.email),
        });
    }
    if request.specialty.trim().is_empty() {
        return Err(DoctorError::Validation {
            message: "Specialty must not be empty".to_string(),
        });
    }

    Ok(())
}
