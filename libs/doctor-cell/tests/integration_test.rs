use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path, query_param};

use doctor_cell::router::doctor_routes;
use shared_utils::test_utils::{JwtTestUtils, MockSupabaseResponses, TestConfig};

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn app_with_store(store_url: &str) -> (axum::Router, String) {
    let test_config = TestConfig::default();
    let mut config = test_config.to_app_config();
    config.supabase_url = store_url.to_string();
    (
        doctor_routes(std::sync::Arc::new(config)),
        test_config.jwt_secret,
    )
}

/// The admin middleware resolves the caller's role from the users table.
async fn mount_role_lookup(mock_server: &MockServer, email: &str, role: Option<&str>) {
    let rows = json!([MockSupabaseResponses::user_row(email, role)]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", format!("eq.{}", email)))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_list_doctors_without_token_is_unauthorized() {
    let mock_server = MockServer::start().await;
    let (app, _) = app_with_store(&mock_server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/doctor")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_doctors_with_invalid_token_is_forbidden() {
    let mock_server = MockServer::start().await;
    let (app, _) = app_with_store(&mock_server.uri());
    let token = JwtTestUtils::create_invalid_signature_token("boss@example.com");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/doctor")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_doctors_as_regular_user_is_forbidden() {
    let mock_server = MockServer::start().await;
    let (app, secret) = app_with_store(&mock_server.uri());
    let token = JwtTestUtils::create_test_token("patient@example.com", &secret, None);

    mount_role_lookup(&mock_server, "patient@example.com", None).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/doctor")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_doctors_with_unknown_requester_is_forbidden() {
    let mock_server = MockServer::start().await;
    let (app, secret) = app_with_store(&mock_server.uri());
    let token = JwtTestUtils::create_test_token("ghost@example.com", &secret, None);

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.ghost@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/doctor")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_doctors_as_admin_returns_roster() {
    let mock_server = MockServer::start().await;
    let (app, secret) = app_with_store(&mock_server.uri());
    let token = JwtTestUtils::create_test_token("boss@example.com", &secret, None);

    mount_role_lookup(&mock_server, "boss@example.com", Some("admin")).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
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

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/doctor")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_doctor_as_admin_succeeds() {
    let mock_server = MockServer::start().await;
    let (app, secret) = app_with_store(&mock_server.uri());
    let token = JwtTestUtils::create_test_token("boss@example.com", &secret, None);
    let id = Uuid::new_v4();

    mount_role_lookup(&mock_server, "boss@example.com", Some("admin")).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("email", "eq.caudi@doctorsportal.example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
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

    let request = Request::builder()
        .method("POST")
        .uri("/doctor")
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .body(Body::from(
            json!({
                "name": "Dr. Caudi",
                "email": "caudi@doctorsportal.example",
                "specialty": "Teeth Orthodontics",
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["id"], json!(id));
}

#[tokio::test]
async fn test_create_duplicate_doctor_is_conflict() {
    let mock_server = MockServer::start().await;
    let (app, secret) = app_with_store(&mock_server.uri());
    let token = JwtTestUtils::create_test_token("boss@example.com", &secret, None);

    mount_role_lookup(&mock_server, "boss@example.com", Some("admin")).await;

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

    let request = Request::builder()
        .method("POST")
        .uri("/doctor")
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .body(Body::from(
            json!({
                "name": "Dr. Caudi",
                "email": "caudi@doctorsportal.example",
                "specialty": "Teeth Orthodontics",
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_doctor_as_admin_succeeds() {
    let mock_server = MockServer::start().await;
    let (app, secret) = app_with_store(&mock_server.uri());
    let token = JwtTestUtils::create_test_token("boss@example.com", &secret, None);

    mount_role_lookup(&mock_server, "boss@example.com", Some("admin")).await;

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

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/doctor/caudi@doctorsportal.example")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_delete_unknown_doctor_is_not_found() {
    let mock_server = MockServer::start().await;
    let (app, secret) = app_with_store(&mock_server.uri());
    let token = JwtTestUtils::create_test_token("boss@example.com", &secret, None);

    mount_role_lookup(&mock_server, "boss@example.com", Some("admin")).await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/doctor/ghost@doctorsportal.example")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
