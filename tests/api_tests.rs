use auditarr::config::Config;
use auditarr::db::Store;
use auditarr::models::issue::IssueTag;
use auditarr::models::result::{ResultInput, ResultStatus};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app() -> (Router, Store) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let state = auditarr::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    let store = state.store.clone();

    (auditarr::api::router(state), store)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json_body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

fn audited_website(session_id: i32, domain: &str, issues: Vec<IssueTag>) -> ResultInput {
    ResultInput {
        session_id,
        url: format!("https://{domain}/"),
        domain: domain.to_string(),
        page_count: 12,
        tier: 2.0,
        issues_detected: issues,
        lighthouse_json: None,
        contact_email: Some(format!("info@{domain}")),
        status: ResultStatus::Pending,
    }
}

#[tokio::test]
async fn test_create_session_defaults() {
    let (app, _store) = spawn_app().await;

    let (status, body) = send(&app, "POST", "/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Untitled session");
    assert_eq!(body["is_configured"], false);
    assert_eq!(body["is_completed"], false);
    assert!(body["created_at"].is_string());
    let first_id = body["id"].as_i64().unwrap();

    let (status, body) = send(&app, "POST", "/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["id"].as_i64().unwrap(), first_id);
}

#[tokio::test]
async fn test_list_sessions_flags_and_order() {
    let (app, store) = spawn_app().await;

    for _ in 0..3 {
        send(&app, "POST", "/sessions", None).await;
    }

    let search_body = json!({
        "query": "plumbers",
        "issues": ["missing-title"],
        "max_results": 20
    });
    let (status, _) = send(&app, "PUT", "/sessions/2/search", Some(search_body)).await;
    assert_eq!(status, StatusCode::OK);
    store.complete_search(2, Utc::now()).await.unwrap();

    let (status, body) = send(&app, "GET", "/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    let sessions = body.as_array().unwrap();
    assert_eq!(sessions.len(), 3);

    // Newest first.
    let ids: Vec<i64> = sessions.iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    for session in sessions {
        let configured = session["id"] == 2;
        assert_eq!(session["is_configured"], configured);
        assert_eq!(session["is_completed"], configured);
    }
}

#[tokio::test]
async fn test_list_sessions_pagination() {
    let (app, _store) = spawn_app().await;

    for _ in 0..5 {
        send(&app, "POST", "/sessions", None).await;
    }

    let (status, body) = send(&app, "GET", "/sessions?offset=1&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![4, 3]);

    let (status, body) = send(&app, "GET", "/sessions?offset=50", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_upsert_search_creates_then_replaces() {
    let (app, store) = spawn_app().await;
    send(&app, "POST", "/sessions", None).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/sessions/1/search",
        Some(json!({
            "query": "plumbers",
            "issues": ["missing-title"],
            "max_results": 20
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], 1);
    assert_eq!(body["query"], "plumbers");
    assert_eq!(body["issues"], json!(["missing-title"]));
    assert_eq!(body["max_results_requested"], 20);
    assert_eq!(body["checked_websites_count"], 0);
    assert_eq!(body["last_search_cursor"], Value::Null);
    assert_eq!(body["is_completed"], false);

    // Worker makes progress between the two configuration calls.
    store
        .record_search_progress(1, 7, Some("cursor-a"))
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        "/sessions/1/search",
        Some(json!({
            "query": "electricians",
            "issues": ["seo-issues", "slow-performance"],
            "max_results": 40
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "electricians");
    assert_eq!(body["issues"], json!(["seo-issues", "slow-performance"]));
    assert_eq!(body["max_results_requested"], 40);
    // Worker-owned fields survive reconfiguration.
    assert_eq!(body["checked_websites_count"], 7);
    assert_eq!(body["last_search_cursor"], "cursor-a");
    assert_eq!(body["is_completed"], false);

    let (status, body) = send(&app, "GET", "/sessions/1/search", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "electricians");
    assert_eq!(body["checked_websites_count"], 7);
}

#[tokio::test]
async fn test_upsert_search_unknown_tag_rejected_without_write() {
    let (app, _store) = spawn_app().await;
    send(&app, "POST", "/sessions", None).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/sessions/1/search",
        Some(json!({
            "query": "plumbers",
            "issues": ["broken-links"],
            "max_results": 20
        })),
    )
    .await;
    assert!(status.is_client_error());

    // Nothing was stored.
    let (status, _) = send(&app, "GET", "/sessions/1/search", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upsert_search_unknown_session() {
    let (app, _store) = spawn_app().await;

    let (status, body) = send(
        &app,
        "PUT",
        "/sessions/42/search",
        Some(json!({
            "query": "plumbers",
            "issues": [],
            "max_results": 20
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("42"));
}

#[tokio::test]
async fn test_get_search_unconfigured_is_not_found() {
    let (app, _store) = spawn_app().await;
    send(&app, "POST", "/sessions", None).await;

    let (status, body) = send(&app, "GET", "/sessions/1/search", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_results_decodes_and_orders() {
    let (app, store) = spawn_app().await;
    send(&app, "POST", "/sessions", None).await;
    send(&app, "POST", "/sessions", None).await;

    store
        .insert_result(&audited_website(1, "alpha.example", vec![IssueTag::MissingH1]))
        .await
        .unwrap();
    store
        .insert_result(&audited_website(
            1,
            "beta.example",
            vec![
                IssueTag::SeoIssues,
                IssueTag::SeoIssues,
                IssueTag::SlowPerformance,
            ],
        ))
        .await
        .unwrap();
    store
        .insert_result(&audited_website(2, "other.example", vec![]))
        .await
        .unwrap();

    let (status, body) = send(&app, "GET", "/sessions/1/results", None).await;
    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);

    // Newest first, only this session's rows.
    assert_eq!(results[0]["domain"], "beta.example");
    assert_eq!(results[1]["domain"], "alpha.example");

    // Tag sequences round-trip with order and duplicates intact.
    assert_eq!(
        results[0]["issues_detected"],
        json!(["seo-issues", "seo-issues", "slow-performance"])
    );
    assert_eq!(results[1]["issues_detected"], json!(["missing-h1"]));
    assert_eq!(results[0]["status"], "pending");
    assert_eq!(results[0]["contact_email"], "info@beta.example");
}

#[tokio::test]
async fn test_list_results_unknown_session_is_empty() {
    let (app, _store) = spawn_app().await;

    let (status, body) = send(&app, "GET", "/sessions/99/results", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_patch_result_partial_updates() {
    let (app, store) = spawn_app().await;
    send(&app, "POST", "/sessions", None).await;
    store
        .insert_result(&audited_website(1, "alpha.example", vec![]))
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        "PATCH",
        "/sessions/1/results/1",
        Some(json!({"tier": 3.5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], 3.5);
    assert_eq!(body["status"], "pending");

    let (status, body) = send(
        &app,
        "PATCH",
        "/sessions/1/results/1",
        Some(json!({"status": "error"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], 3.5);
    assert_eq!(body["status"], "error");

    // Empty body is a read: nothing changes.
    let (status, body) = send(&app, "PATCH", "/sessions/1/results/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], 3.5);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_patch_result_status_accepted_verbatim() {
    let (app, store) = spawn_app().await;
    send(&app, "POST", "/sessions", None).await;
    store
        .insert_result(&audited_website(1, "alpha.example", vec![]))
        .await
        .unwrap();

    // Backward transitions are allowed: completed -> pending.
    let (status, _) = send(
        &app,
        "PATCH",
        "/sessions/1/results/1",
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "PATCH",
        "/sessions/1/results/1",
        Some(json!({"status": "pending"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn test_patch_result_unknown_status_rejected() {
    let (app, store) = spawn_app().await;
    send(&app, "POST", "/sessions", None).await;
    store
        .insert_result(&audited_website(1, "alpha.example", vec![]))
        .await
        .unwrap();

    let (status, _) = send(
        &app,
        "PATCH",
        "/sessions/1/results/1",
        Some(json!({"status": "done"})),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_patch_result_not_found() {
    let (app, store) = spawn_app().await;
    send(&app, "POST", "/sessions", None).await;
    send(&app, "POST", "/sessions", None).await;
    store
        .insert_result(&audited_website(1, "alpha.example", vec![]))
        .await
        .unwrap();

    // Unknown result id.
    let (status, _) = send(
        &app,
        "PATCH",
        "/sessions/1/results/999",
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Result exists, but under a different session.
    let (status, _) = send(
        &app,
        "PATCH",
        "/sessions/2/results/1",
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
