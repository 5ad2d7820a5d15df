use axum::extract::{Path, State};
use serde_json::json;
use uuid::Uuid;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{body_partial_json, method, path, query_param};

use doctor_cell::handlers::{create_doctor, delete_doctor, list_doctors};
use doctor_cell::models::CreateDoctorRequest;
use shared_models::error::AppError;
use shared_utils::test_utils::{MockSupabaseResponses, TestConfig};

fn config_with_store(store_url: &str) -> shared_config::AppConfig {
    let mut config = TestConfig::default().to_app_config();
    config.supabase_url = store_url.to_string();
    config
}

fn doctor_request() -> CreateDoctorRequest {
    CreateDoctorRequest {
        name: "Dr. Caudi".to_string(),
        email: "caudi@doctorsportal.example".to_string(),
        specialty: "Teeth Orthodontics".to_string(),
    }
}

#[tokio::test]
async fn test_list_doctors_returns_roster() {
    let mock_server = MockServer::start().await;
    let config = config_with_store(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::doctor_row(
                Uuid::new_v4(),
                "Dr. Caudi",
                "caudi@doctorsportal.example",
                "Teeth Orthodontics",
            ),
            MockSupabaseResponses::doctor_row(
                Uuid::new_v4(),
                "Dr. Smith",
                "smith@doctorsportal.example",
                "Cavity Protection",
            ),
        ])))
        .mount(&mock_server)
        .await;

    let result = list_doctors(State(std::sync::Arc::new(config))).await;

    assert!(result.is_ok());
    let doctors = result.unwrap().0;
    assert_eq!(doctors.as_array().unwrap().len(), 2);
    assert_eq!(doctors[0]["name"], "Dr. Caudi");
}

#[tokio::test]
async fn test_create_doctor_inserts_new_profile() {
    let mock_server = MockServer::start().await;
    let config = config_with_store(&mock_server.uri());
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("email", "eq.caudi@doctorsportal.example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .and(body_partial_json(json!({
            "email": "caudi@doctorsportal.example",
            "specialty": "Teeth Orthodontics",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::doctor_row(
                id,
                "Dr. Caudi",
                "caudi@doctorsportal.example",
                "Teeth Orthodontics",
            )
        ])))
        .mount(&mock_server)
        .await;

    let result = create_doctor(
        State(std::sync::Arc::new(config)),
        axum::Json(doctor_request()),
    )
    .await;

    assert!(result.is_ok());
    let doctor = result.unwrap().0;
    assert_eq!(doctor["id"], json!(id));
    assert_eq!(doctor["email"], "caudi@doctorsportal.example");
}

#[tokio::test]
async fn test_create_doctor_duplicate_email_is_conflict() {
    let mock_server = MockServer::start().await;
    let config = config_with_store(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("email", "eq.caudi@doctorsportal.example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::doctor_row(
                Uuid::new_v4(),
                "Dr. Caudi",
                "caudi@doctorsportal.example",
                "Teeth Orthodontics",
            )
        ])))
        .mount(&mock_server)
        .await;

    let result = create_doctor(
        State(std::sync::Arc::new(config)),
        axum::Json(doctor_request()),
    )
    .await;

    assert!(result.is_err());
    match result.unwrap_err() {
        AppError::Conflict(_) => {}
        other => panic!("Expected Conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_doctor_rejects_invalid_email() {
    let config = TestConfig::default().to_arc();
    let mut request = doctor_request();
    request.email = "not-an-email".to_string();

    let result = create_doctor(State(config), axum::Json(request)).await;

    assert!(result.is_err());
    match result.unwrap_err() {
        AppError::BadRequest(_) => {}
        other => panic!("Expected BadRequest, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_doctor_removes_profile() {
    let mock_server = MockServer::start().await;
    let config = config_with_store(&mock_server.uri());

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("email", "eq.caudi@doctorsportal.example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::doctor_row(
                Uuid::new_v4(),
                "Dr. Caudi",
                "caudi@doctorsportal.example",
                "Teeth Orthodontics",
            )
        ])))
        .mount(&mock_server)
        .await;

    let result = delete_doctor(
        State(std::sync::Arc::new(config)),
        Path("caudi@doctorsportal.example".to_string()),
    )
    .await;

    assert!(result.is_ok());
    let body = result.unwrap().0;
    assert_eq!(body["success"], true);
    assert_eq!(body["doctor"]["email"], "caudi@doctorsportal.example");
}

#[tokio::test]
async fn test_delete_unknown_doctor_is_not_found() {
    let mock_server = MockServer::start().await;
    let config = config_with_store(&mock_server.uri());

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = delete_doctor(
        State(std::sync::Arc::new(config)),
        Path("ghost@doctorsportal.example".to_string()),
    )
    .await;

    assert!(result.is_err());
    match result.unwrap_err() {
        AppError::NotFound(_) => {}
        other => panic!("Expected NotFound, got {:?}", other),
    }
}
