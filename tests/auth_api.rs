use actix_web::{test, web, App};
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use session_auth_server::{configure_routes, AppState, InMemoryCredentialStore, Settings};
use serde_json::json;
use std::sync::Arc;

fn test_state() -> web::Data<AppState> {
    let config = Settings::new_for_test().expect("Failed to load test config");
    web::Data::new(AppState::with_store(config, Arc::new(InMemoryCredentialStore::new())))
}

fn response_cookie(resp: &ServiceResponse, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

fn register_body() -> serde_json::Value {
    json!({
        "fullname": "Test User",
        "email": "test@example.com",
        "password": "password123",
        "confirm_password": "password123"
    })
}

#[actix_web::test]
async fn test_register_and_login() {
    let app = test::init_service(App::new().app_data(test_state()).configure(configure_routes)).await;

    let register_response = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body())
        .send_request(&app)
        .await;

    assert_eq!(register_response.status(), 201);
    let access = response_cookie(&register_response, "access_token").expect("access cookie");
    let refresh = response_cookie(&register_response, "refresh_token").expect("refresh cookie");
    assert_eq!(access.http_only(), Some(true));
    assert_eq!(refresh.http_only(), Some(true));
    assert!(!access.value().is_empty());

    let register_body: serde_json::Value = test::read_body_json(register_response).await;
    assert_eq!(register_body["user"]["email"], "test@example.com");
    assert!(register_body["user"].get("password").is_none());

    let login_response = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({
            "email": "test@example.com",
            "password": "password123"
        }))
        .send_request(&app)
        .await;

    assert_eq!(login_response.status(), 200);
    assert!(response_cookie(&login_response, "access_token").is_some());
    assert!(response_cookie(&login_response, "refresh_token").is_some());
    let login_body: serde_json::Value = test::read_body_json(login_response).await;
    assert_eq!(login_body["user"]["fullname"], "Test User");
}

#[actix_web::test]
async fn test_register_accepts_camel_case_confirm() {
    let app = test::init_service(App::new().app_data(test_state()).configure(configure_routes)).await;

    let response = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "fullname": "Test User",
            "email": "camel@example.com",
            "password": "password123",
            "confirmPassword": "password123"
        }))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 201);
}

#[actix_web::test]
async fn test_invalid_login() {
    let app = test::init_service(App::new().app_data(test_state()).configure(configure_routes)).await;

    let response = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({
            "email": "nonexistent@example.com",
            "password": "wrongpassword"
        }))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["error"]["status"], 401);
    assert_eq!(body["error"]["message"], "Authentication error: Invalid credentials");
}

#[actix_web::test]
async fn test_invalid_registration() {
    let app = test::init_service(App::new().app_data(test_state()).configure(configure_routes)).await;

    let response = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "fullname": "Test User",
            "email": "test@example.com",
            "password": "password123",
            "confirm_password": "different123"
        }))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 400);
    assert!(response_cookie(&response, "access_token").is_none());
}

#[actix_web::test]
async fn test_duplicate_registration() {
    let app = test::init_service(App::new().app_data(test_state()).configure(configure_routes)).await;

    let first = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body())
        .send_request(&app)
        .await;
    assert_eq!(first.status(), 201);

    let second = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body())
        .send_request(&app)
        .await;
    assert_eq!(second.status(), 409);
}

#[actix_web::test]
async fn test_refresh_with_cookie() {
    let app = test::init_service(App::new().app_data(test_state()).configure(configure_routes)).await;

    let register_response = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_body())
        .send_request(&app)
        .await;
    let refresh = response_cookie(&register_response, "refresh_token").expect("refresh cookie");

    let response = test::TestRequest::post()
        .uri("/auth/refresh")
        .cookie(Cookie::new("refresh_token", refresh.value().to_string()))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 200);
    let access = response_cookie(&response, "access_token").expect("access cookie");
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["access_token"], access.value());
}

#[actix_web::test]
async fn test_refresh_without_cookie() {
    let app = test::init_service(App::new().app_data(test_state()).configure(configure_routes)).await;

    let response = test::TestRequest::post()
        .uri("/auth/refresh")
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 401);

    let response = test::TestRequest::post()
        .uri("/auth/refresh")
        .cookie(Cookie::new("refresh_token", "not.a.jwt"))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 401);
}

#[actix_web::test]
async fn test_logout() {
    let app = test::init_service(App::new().app_data(test_state()).configure(configure_routes)).await;

    // Logout succeeds without any prior session
    let logout_response = test::TestRequest::post()
        .uri("/auth/logout")
        .send_request(&app)
        .await;

    assert_eq!(logout_response.status(), 200);
    for name in ["access_token", "refresh_token"] {
        let cookie = response_cookie(&logout_response, name).expect("removal cookie");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(actix_web::cookie::time::Duration::ZERO));
    }

    let body: serde_json::Value = test::read_body_json(logout_response).await;
    assert_eq!(body["message"], "User is logged out");
}
