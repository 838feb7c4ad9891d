use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::json;
use tower::ServiceExt;

use appointment_cell::services::FixedClock;
use doctor_cell::services::DoctorCatalog;
use doctor_point_api::{router::create_router, ApiState};
use shared_utils::test_utils::{json_request, memory_backend, response_json, TestConfig};

fn app() -> Router {
    let state = ApiState::with_clock(
        &TestConfig::default().to_app_config(),
        memory_backend(),
        DoctorCatalog::builtin(),
        Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())),
    );
    create_router(state)
}

#[tokio::test]
async fn test_liveness() {
    let response = app()
        .oneshot(json_request(Method::GET, "/", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_page_resolution() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/pages/resolve?path=/", None))
        .await
        .unwrap();
    assert_eq!(
        response_json(response).await,
        json!({"kind": "redirect", "to": "/login"})
    );

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/pages/resolve?path=/dashboard/profile", None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["kind"], "page");
    assert_eq!(body["label"], "Profile");
    assert_eq!(body["menu"][3]["active"], true);

    let response = app
        .oneshot(json_request(Method::GET, "/pages/resolve?path=/dashboard/nope", None))
        .await
        .unwrap();
    assert_eq!(response_json(response).await["kind"], "not_found");
}

#[tokio::test]
async fn test_end_to_end_session() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/auth/register",
            Some(json!({
                "userName": "Alice",
                "email": "alice@x.com",
                "password": "p1",
                "confirmPassword": "p1"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/auth/login",
            Some(json!({"email": "alice@x.com", "password": "p1"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/doctors?specialty=All&day=Sat", None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["total"], 4);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/appointments",
            Some(json!({
                "doctorId": "2",
                "slot": {"day": "Sat", "start": "15:00", "end": "16:00"}
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/dashboard/summary", None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["greeting"], "Welcome to Doctor point, Alice!");
    assert_eq!(body["activeAppointments"], 1);
    assert_eq!(body["totalDoctors"], 8);
    assert_eq!(body["availableDoctors"], 8);
    assert_eq!(body["specialties"], 8);

    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/auth/logout", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(Method::GET, "/dashboard/summary", None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["greeting"], "Welcome to Doctor point!");
    assert!(body.get("user").is_none());
    assert_eq!(body["activeAppointments"], 1);
}
