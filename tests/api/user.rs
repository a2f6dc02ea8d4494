use crate::helpers::spawn_app;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use marketplace_order_service::schemas::{GenericResponse, RequestState};
use reqwest::Method;
use serde_json::{json, Value};

#[actix_web::test]
async fn register_rejects_invalid_body() {
    let app = spawn_app().await;
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    let test_cases = vec![
        (json!({"name": "", "email": email, "password": "secret123"}), "missing name"),
        (json!({"name": name, "email": "not-an-email", "password": "secret123"}), "invalid email"),
        (json!({"name": name, "email": email, "password": "123"}), "short password"),
        (json!({"email": email}), "missing fields"),
    ];
    for (body, description) in test_cases {
        let response = app
            .send_json(Method::POST, "/user/register", &body, None)
            .await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
        let body: GenericResponse<Value> = response.json().await.expect("Failed to parse response");
        assert!(!body.status);
        assert_eq!(body.code, "400");
        let state = RequestState::from_response(body);
        assert!(state.error_message().is_some());
    }
}

#[actix_web::test]
async fn authenticate_rejects_invalid_email() {
    let app = spawn_app().await;
    let response = app
        .send_json(
            Method::POST,
            "/user/authenticate",
            &json!({"email": "nobody", "password": "secret123"}),
            None,
        )
        .await;
    assert_eq!(400, response.status().as_u16());
}

#[actix_web::test]
async fn profile_routes_require_token() {
    let app = spawn_app().await;

    let response = app
        .get(&format!("/user/{}", uuid::Uuid::new_v4()), None)
        .await;
    assert_eq!(401, response.status().as_u16());

    let response = app
        .send_json(
            Method::PUT,
            "/user/profile",
            &json!({"name": "Jane", "email": "jane@example.com"}),
            None,
        )
        .await;
    assert_eq!(401, response.status().as_u16());

    let response = app
        .send_json(
            Method::PUT,
            "/user/profile",
            &json!({"name": "Jane", "email": "jane@example.com"}),
            Some("not-a-jwt"),
        )
        .await;
    assert_eq!(401, response.status().as_u16());
    let body: GenericResponse<Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(body.code, "401");
}
