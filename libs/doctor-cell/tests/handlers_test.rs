use std::sync::Arc;

use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use doctor_cell::router::doctor_routes;
use doctor_cell::services::DoctorCatalog;
use shared_utils::test_utils::{json_request, response_json};

fn app() -> axum::Router {
    doctor_routes(Arc::new(DoctorCatalog::builtin()))
}

#[tokio::test]
async fn test_list_without_filters_is_unfiltered() {
    let response = app()
        .oneshot(json_request(Method::GET, "/", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "unfiltered");
    assert_eq!(body["total"], 8);
}

#[tokio::test]
async fn test_list_with_filters() {
    let response = app()
        .oneshot(json_request(Method::GET, "/?specialty=Pediatrics&day=Tue", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "matches");
    assert_eq!(body["total"], 1);
    assert_eq!(body["doctors"][0]["name"], "Dr. Michael Chen");
    assert_eq!(body["doctors"][0]["timeSlots"][0]["day"], "Tue");
}

#[tokio::test]
async fn test_list_with_no_matches() {
    let response = app()
        .oneshot(json_request(Method::GET, "/?specialty=Pediatrics&day=Mon", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "no_matches");
    assert_eq!(body["message"], "No doctors match your selected filters.");
}

#[tokio::test]
async fn test_unknown_day_is_rejected() {
    let response = app()
        .oneshot(json_request(Method::GET, "/?day=Funday", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Unknown weekday code: Funday");
}

#[tokio::test]
async fn test_get_doctor_and_not_found() {
    let response = app()
        .oneshot(json_request(Method::GET, "/5", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["specialty"], "Neurology");

    let response = app()
        .oneshot(json_request(Method::GET, "/99", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_options() {
    let response = app()
        .oneshot(json_request(Method::GET, "/options", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["specialties"][0], "All");
    assert_eq!(body["availability"][1]["label"], "Monday");
}
