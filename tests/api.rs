use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{App, test};
use serde_json::{Value, json};

use hr_desk::config::{Config, StateBackend};
use hr_desk::routes;
use hr_desk::state::AppState;
use hr_desk::store::LocalStore;
use hr_desk::store::kv::MemoryKv;

fn test_config() -> Config {
    Config {
        state_backend: StateBackend::Memory,
        chat_typing_delay: Duration::ZERO,
        ..Config::default()
    }
}

fn peer() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

async fn test_app(
    store: Arc<LocalStore>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let config = test_config();
    let state = Data::new(AppState::load(store, &config));
    test::init_service(
        App::new()
            .app_data(state)
            .configure(|cfg| routes::configure(cfg, &config)),
    )
    .await
}

fn memory_store() -> Arc<LocalStore> {
    Arc::new(LocalStore::new(Box::new(MemoryKv::new())))
}

async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    req: test::TestRequest,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, req.peer_addr(peer()).to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, value)
}

fn login(role: &str, username: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/session/login")
        .set_json(json!({ "role": role, "username": username }))
}

fn submit(reason: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/api/leave").set_json(json!({
        "type": "sick",
        "reason": reason,
        "startDate": "2024-01-10",
        "endDate": "2024-01-11"
    }))
}

#[actix_web::test]
async fn employee_submits_and_admin_approves() {
    let app = test_app(memory_store()).await;

    let (status, identity) = send(&app, login("employee", "Alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(identity, json!({ "role": "employee", "username": "Alice" }));

    let (status, created) = send(&app, submit("doctor appointment")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["employeeName"], "Alice");
    assert_eq!(created["status"], "pending");
    assert_eq!(created["classification"], "leave");
    let id = created["id"].as_str().unwrap().to_string();

    send(&app, login("admin", "Boss")).await;
    let (status, approved) = send(
        &app,
        test::TestRequest::put().uri(&format!("/api/leave/{id}/approve")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "approved");
    assert_eq!(approved["classification"], "leave");
    assert_eq!(approved["submittedAt"], created["submittedAt"]);

    let (status, summary) = send(
        &app,
        test::TestRequest::get().uri("/api/analytics/summary"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["by_status"]["approved"], 1);
    assert_eq!(summary["by_classification"]["leave"], 1);
    assert_eq!(summary["approval_rate"], 100);
}

#[actix_web::test]
async fn second_decision_is_a_conflict() {
    let app = test_app(memory_store()).await;
    send(&app, login("employee", "Alice")).await;
    let (_, created) = send(&app, submit("travel cost reimbursement")).await;
    assert_eq!(created["classification"], "expense");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        test::TestRequest::put().uri(&format!("/api/leave/{id}/reject")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        test::TestRequest::put().uri(&format!("/api/leave/{id}/approve")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        format!("Leave request {id} is already rejected")
    );

    let (status, _) = send(
        &app,
        test::TestRequest::put().uri("/api/leave/does-not-exist/approve"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn submitting_requires_a_session_and_all_fields() {
    let app = test_app(memory_store()).await;

    let (status, _) = send(&app, submit("flu")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    send(&app, login("employee", "Alice")).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/api/leave").set_json(json!({
            "type": "sick",
            "startDate": "2024-01-10",
            "endDate": "2024-01-11"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please fill in all required fields.");

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/api/leave").set_json(json!({
            "type": "vacation",
            "reason": "trip",
            "startDate": "2024-02-10",
            "endDate": "2024-02-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "start_date cannot be after end_date");

    let (_, list) = send(&app, test::TestRequest::get().uri("/api/leave")).await;
    assert_eq!(list["total"], 0);
}

#[actix_web::test]
async fn my_requests_only_shows_my_own() {
    let app = test_app(memory_store()).await;

    send(&app, login("employee", "Alice")).await;
    let (_, first) = send(&app, submit("flu")).await;
    send(&app, login("employee", "Bob")).await;
    send(&app, submit("move to another department")).await;
    send(&app, login("employee", "Alice")).await;
    let (_, second) = send(&app, submit("dentist")).await;

    let (status, mine) = send(&app, test::TestRequest::get().uri("/api/leave/mine")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = mine
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].clone())
        .collect();
    assert_eq!(ids, vec![first["id"].clone(), second["id"].clone()]);

    let (_, transfers) = send(
        &app,
        test::TestRequest::get().uri("/api/leave?classification=transfer"),
    )
    .await;
    assert_eq!(transfers["total"], 1);
    assert_eq!(transfers["data"][0]["employeeName"], "Bob");

    let (_, paged) = send(
        &app,
        test::TestRequest::get().uri("/api/leave?page=2&per_page=2"),
    )
    .await;
    assert_eq!(paged["total"], 3);
    assert_eq!(paged["data"].as_array().unwrap().len(), 1);
    assert_eq!(paged["data"][0]["id"], second["id"]);
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let app = test_app(memory_store()).await;

    let (status, _) = send(&app, test::TestRequest::get().uri("/session")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, login("user", "  carol  ")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, current) = send(&app, test::TestRequest::get().uri("/session")).await;
    assert_eq!(current, json!({ "role": "employee", "username": "carol" }));

    let (status, _) = send(&app, test::TestRequest::post().uri("/session/logout")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, test::TestRequest::get().uri("/session")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, login("admin", "   ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username must not be empty");
}

#[actix_web::test]
async fn state_outlives_the_app() {
    let store = memory_store();
    let id = {
        let app = test_app(store.clone()).await;
        send(&app, login("employee", "Alice")).await;
        let (_, created) = send(&app, submit("role change request")).await;
        created["id"].clone()
    };

    let app = test_app(store).await;
    let (status, current) = send(&app, test::TestRequest::get().uri("/session")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current["username"], "Alice");

    let (status, fetched) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/leave/{}", id.as_str().unwrap())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["classification"], "transfer");
}

#[actix_web::test]
async fn chatbot_answers_by_keyword() {
    let app = test_app(memory_store()).await;

    let (status, welcome) = send(&app, test::TestRequest::get().uri("/api/chat/welcome")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(welcome["sender"], "bot");

    let (status, exchange) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/chat")
            .set_json(json!({ "message": "I need help with vacation" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exchange["user"]["sender"], "user");
    assert_eq!(exchange["user"]["content"], "I need help with vacation");
    assert!(
        exchange["bot"]["content"]
            .as_str()
            .unwrap()
            .starts_with("Vacation requests can be submitted")
    );

    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/chat")
            .set_json(json!({ "message": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn blank_form_fields_are_reported_as_missing() {
    let app = test_app(memory_store()).await;
    send(&app, login("employee", "Alice")).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/api/leave").set_json(json!({
            "type": "",
            "reason": "x",
            "startDate": "",
            "endDate": ""
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please fill in all required fields.");

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/api/leave").set_json(json!({
            "type": "holiday",
            "reason": "x",
            "startDate": "2024-01-10",
            "endDate": "2024-01-11"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid leave type: `holiday`");

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/api/leave").set_json(json!({
            "type": "sick",
            "reason": "x",
            "startDate": "10/01/2024",
            "endDate": "2024-01-11"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid startDate: `10/01/2024`");

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/leave")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"type\": 5"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn huge_page_numbers_return_an_empty_page() {
    let app = test_app(memory_store()).await;
    send(&app, login("employee", "Alice")).await;
    send(&app, submit("flu")).await;

    let (status, paged) = send(
        &app,
        test::TestRequest::get().uri("/api/leave?page=18446744073709551615&per_page=100"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paged["total"], 1);
    assert_eq!(paged["page"], json!(18446744073709551615u64));
    assert_eq!(paged["data"], json!([]));

    let (status, paged) = send(&app, test::TestRequest::get().uri("/api/leave?page=4294967297")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paged["page"], json!(4294967297u64));
    assert_eq!(paged["data"], json!([]));
}
