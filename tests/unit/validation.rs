use axum::{body::Body, extract::FromRequest, http::Request};
use taskboard_backend::db::models::auth::RegisterRequest;
use taskboard_backend::db::models::task::CreateTaskRequest;
use taskboard_backend::error::AppError;
use taskboard_backend::validation::ValidatedJson;

fn json_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn extract<T>(body: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned + validator::Validate,
{
    tokio_test::block_on(ValidatedJson::<T>::from_request(json_request(body), &()))
        .map(|ValidatedJson(value)| value)
}

#[test]
fn valid_register_payload_passes() {
    let req: RegisterRequest = extract(
        r#"{"username":"alice","email":"alice@example.com","password":"secret1"}"#,
    )
    .unwrap_or_else(|e| panic!("rejected: {:?}", e));
    assert_eq!(req.username, "alice");
}

#[test]
fn invalid_email_is_a_validation_error_on_its_field() {
    match extract::<RegisterRequest>(r#"{"username":"alice","email":"nope","password":"secret1"}"#) {
        Err(AppError::Validation { field, .. }) => assert_eq!(field.as_deref(), Some("email")),
        Err(other) => panic!("unexpected error: {:?}", other),
        Ok(_) => panic!("invalid email accepted"),
    }
}

#[test]
fn malformed_json_is_a_validation_error() {
    assert!(matches!(
        extract::<RegisterRequest>("{not json"),
        Err(AppError::Validation { .. })
    ));
}

#[test]
fn unknown_task_status_is_rejected() {
    assert!(matches!(
        extract::<CreateTaskRequest>(r#"{"title":"Ship","status":"BLOCKED"}"#),
        Err(AppError::Validation { .. })
    ));
    let ok: CreateTaskRequest = extract(r#"{"title":"Ship","status":"DOING"}"#)
        .unwrap_or_else(|e| panic!("rejected: {:?}", e));
    assert!(ok.status.is_some());
}
