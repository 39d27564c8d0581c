//! Gateway integration tests
//!
//! The service is replaced by a mocked forwarder, so these cover local
//! validation, path mapping and relaying of the service's answers.

use actix_web::{http::StatusCode, test as actix_test, web, App};
use async_trait::async_trait;
use gateway::client::{Clients, ForwardRequest, ForwardResponse, Forwarder};
use gateway::error::{GatewayError, GatewayResult};
use gateway::routes;
use mockall::mock;
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;

mock! {
    pub Forward {}

    #[async_trait]
    impl Forwarder for Forward {
        async fn forward(&self, request: ForwardRequest) -> GatewayResult<ForwardResponse>;
    }
}

macro_rules! init_app {
    ($mock:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new(Clients::new(Arc::new($mock))))
                .configure(routes::configure),
        )
        .await
    };
}

/// A forwarder that must never be called
fn untouched() -> MockForward {
    let mut mock = MockForward::new();
    mock.expect_forward().times(0);
    mock
}

#[actix_web::test]
async fn test_health_does_not_reach_service() {
    let app = init_app!(untouched());

    let req = actix_test::TestRequest::get().uri("/health").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_create_user_is_forwarded() {
    let mut mock = MockForward::new();
    mock.expect_forward()
        .withf(|req| {
            req.method == Method::POST
                && req.path == "/admin/users"
                && req.body == Some(json!({"email": "ann@example.com", "name": "Ann"}))
        })
        .times(1)
        .returning(|_| {
            Ok(ForwardResponse::json(
                201,
                &json!({"id": 1, "email": "ann@example.com", "name": "Ann"}),
            ))
        });
    let app = init_app!(mock);

    let req = actix_test::TestRequest::post()
        .uri("/admin/users")
        .set_json(json!({"email": "ann@example.com", "name": "Ann"}))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["id"], 1);
}

#[actix_web::test]
async fn test_invalid_email_is_rejected_locally() {
    let app = init_app!(untouched());

    let req = actix_test::TestRequest::post()
        .uri("/admin/users")
        .set_json(json!({"email": "not-an-email", "name": "Ann"}))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
}

#[actix_web::test]
async fn test_malformed_json_is_rejected_locally() {
    let app = init_app!(untouched());

    let req = actix_test::TestRequest::post()
        .uri("/admin/categories")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\":")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_public_search_forwards_query_string() {
    let mut mock = MockForward::new();
    mock.expect_forward()
        .withf(|req| {
            req.method == Method::GET
                && req.path == "/events"
                && req.query == "text=jazz&from=0&size=5"
        })
        .times(1)
        .returning(|_| Ok(ForwardResponse::json(200, &json!([]))));
    let app = init_app!(mock);

    let req = actix_test::TestRequest::get()
        .uri("/events?text=jazz&from=0&size=5")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_inverted_range_is_rejected_locally() {
    let app = init_app!(untouched());

    let req = actix_test::TestRequest::get()
        .uri("/events?rangeStart=2030-01-02%2010:00:00&rangeEnd=2030-01-01%2010:00:00")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_bad_page_is_rejected_locally() {
    let app = init_app!(untouched());

    let req = actix_test::TestRequest::get()
        .uri("/compilations?from=0&size=0")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_bad_admin_state_is_rejected_locally() {
    let app = init_app!(untouched());

    let req = actix_test::TestRequest::get()
        .uri("/admin/events?states=PENDING,SLEEPING")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_service_errors_are_relayed() {
    let mut mock = MockForward::new();
    mock.expect_forward()
        .withf(|req| req.method == Method::GET && req.path == "/events/42")
        .times(1)
        .returning(|_| {
            Ok(ForwardResponse::json(
                404,
                &json!({"error": "not_found", "message": "Event with id=42 was not found"}),
            ))
        });
    let app = init_app!(mock);

    let req = actix_test::TestRequest::get().uri("/events/42").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["message"], "Event with id=42 was not found");
}

#[actix_web::test]
async fn test_unreachable_service_answers_502() {
    let mut mock = MockForward::new();
    mock.expect_forward()
        .times(1)
        .returning(|_| Err(GatewayError::unavailable("connection refused")));
    let app = init_app!(mock);

    let req = actix_test::TestRequest::get().uri("/categories/1").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "bad_gateway");
}

#[actix_web::test]
async fn test_subscribe_without_body_defaults_friendship() {
    let mut mock = MockForward::new();
    mock.expect_forward()
        .withf(|req| {
            req.method == Method::POST
                && req.path == "/users/1/subscriptions/2"
                && req.body == Some(json!({"friendship": false}))
        })
        .times(1)
        .returning(|_| Ok(ForwardResponse::json(201, &json!({"id": 9}))));
    let app = init_app!(mock);

    let req = actix_test::TestRequest::post()
        .uri("/users/1/subscriptions/2")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_incoming_subscriptions_route_before_id() {
    let mut mock = MockForward::new();
    mock.expect_forward()
        .withf(|req| req.path == "/users/3/subscriptions/incoming" && req.query == "status=WAITING")
        .times(1)
        .returning(|_| Ok(ForwardResponse::json(200, &json!([]))));
    let app = init_app!(mock);

    let req = actix_test::TestRequest::get()
        .uri("/users/3/subscriptions/incoming?status=WAITING")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_confirm_request_path_is_mapped() {
    let mut mock = MockForward::new();
    mock.expect_forward()
        .withf(|req| {
            req.method == Method::PATCH && req.path == "/users/1/events/5/requests/8/confirm"
        })
        .times(1)
        .returning(|_| Ok(ForwardResponse::json(200, &json!({"id": 8, "status": "CONFIRMED"}))));
    let app = init_app!(mock);

    let req = actix_test::TestRequest::patch()
        .uri("/users/1/events/5/requests/8/confirm")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_non_numeric_id_is_rejected_locally() {
    let app = init_app!(untouched());

    let req = actix_test::TestRequest::delete()
        .uri("/admin/users/abc")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
