//! End-to-end tests of both call forms against a loopback `axum` server.

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use client::api::{flow, job, variable};
use client::{Client, ClientConfig, ClientError};
use models::flow::FlowModuleValue;
use models::job::CompletedJobFilter;
use models::variable::CreateVariable;
use models::{ItemPath, JobId, Maybe, Model, Pagination, WorkspaceId};
use serde_json::{json, Value};
use std::collections::HashMap;
use url::Url;

const TOKEN: &str = "test-token";

fn app() -> Router {
    Router::new()
        .route("/api/w/:workspace/jobs/completed/get/:id", get(completed_job))
        .route("/api/w/:workspace/jobs/completed/delete/:id", post(delete_job))
        .route("/api/w/:workspace/jobs/completed/list", get(list_jobs))
        .route("/api/w/:workspace/flows/get/*path", get(flow_by_path))
        .route("/api/w/:workspace/variables/exists/*path", get(variable_exists))
        .route("/api/w/:workspace/variables/create", post(create_variable))
}

async fn completed_job(Path((workspace, id)): Path<(String, String)>) -> Response {
    if workspace == "demo" && id == "01HXYZ" {
        Json(json!({ "id": "01HXYZ", "success": true, "result": { "x": 1 } })).into_response()
    } else {
        (StatusCode::NOT_FOUND, format!("job {id} not found")).into_response()
    }
}

async fn delete_job() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response()
}

async fn list_jobs(Query(query): Query<HashMap<String, String>>) -> Response {
    let success = query.get("success").map(String::as_str) == Some("true");
    Json(json!([
        { "id": "a", "success": success, "script_path": query.get("script_path_start") },
        { "id": "b", "success": success, "per_page": query.get("per_page") }
    ]))
    .into_response()
}

async fn flow_by_path(Path((_, path)): Path<(String, String)>) -> Response {
    Json(json!({
        "path": path,
        "summary": "etl",
        "edited_by": "admin",
        "edited_at": "2024-05-01T10:00:00Z",
        "archived": false,
        "extra_perms": {},
        "value": {
            "modules": [
                {
                    "input_transforms": { "n": { "type": "static", "value": 3 } },
                    "value": { "type": "rawscript", "content": "export async function main(n) { return n }", "language": "deno" }
                },
                {
                    "input_transforms": {},
                    "value": { "type": "script", "path": "u/admin/load" }
                },
                {
                    "input_transforms": {},
                    "value": {
                        "type": "forloopflow",
                        "iterator": { "type": "javascript", "expr": "result" },
                        "skip_failures": true,
                        "modules": []
                    }
                }
            ]
        },
        "visible_to_runner_only": false
    }))
    .into_response()
}

async fn variable_exists(headers: HeaderMap) -> Response {
    let expected = format!("Bearer {TOKEN}");
    match headers.get("authorization") {
        Some(value) if value == expected.as_str() => Json(json!(true)).into_response(),
        _ => (StatusCode::UNAUTHORIZED, "missing token").into_response(),
    }
}

async fn create_variable(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if headers.get("content-type").map(|v| v.as_bytes()) != Some(b"application/json".as_slice()) {
        return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
    }
    let path = body["path"].as_str().unwrap_or_default().to_string();
    (StatusCode::CREATED, path).into_response()
}

async fn spawn() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/api")).unwrap()
}

fn demo() -> WorkspaceId {
    WorkspaceId::new("demo").unwrap()
}

fn job_id() -> JobId {
    JobId::new("01HXYZ").unwrap()
}

// ---------------------------------------------------------------------------
// Async form
// ---------------------------------------------------------------------------

#[tokio::test]
async fn completed_job_is_decoded() {
    let client = Client::new(ClientConfig::new(spawn().await)).unwrap();

    let response = job::get_completed_job::detailed(&client, &demo(), &job_id())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let job = response.parsed().unwrap().unwrap();
    assert_eq!(job.id.as_str(), "01HXYZ");
    assert!(job.success);
    assert_eq!(job.result, Maybe::Set(json!({ "x": 1 })));
}

#[tokio::test]
async fn undocumented_status_is_empty_by_default() {
    let client = Client::new(ClientConfig::new(spawn().await)).unwrap();
    let missing = JobId::new("nope").unwrap();

    let response = job::get_completed_job::detailed(&client, &demo(), &missing)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.content().as_ref(), b"job nope not found");
    assert!(response.parsed().unwrap().is_none());
}

#[tokio::test]
async fn delete_failure_raises_with_status_and_body() {
    let config = ClientConfig::new(spawn().await).with_raise_on_unexpected_status(true);
    let client = Client::new(config).unwrap();

    let err = job::delete_completed_job::parsed(&client, &demo(), &job_id())
        .await
        .unwrap_err();

    match err {
        ClientError::UnexpectedStatus { status, content } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(content.as_ref(), b"database unavailable");
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn list_sends_filters_as_query() {
    let client = Client::new(ClientConfig::new(spawn().await)).unwrap();
    let filter = CompletedJobFilter {
        success: Some(true),
        script_path_start: Some("f/etl".into()),
        ..Default::default()
    };

    let jobs = job::list_completed_jobs::parsed(&client, &demo(), &filter, Pagination::new(1, 25))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|j| j.success));
    assert_eq!(jobs[0].script_path, Maybe::Set("f/etl".to_string()));
    assert_eq!(jobs[1].additional_properties().get("per_page"), Some(&json!("25")));
}

#[tokio::test]
async fn flow_modules_decode_by_variant_priority() {
    let client = Client::new(ClientConfig::new(spawn().await)).unwrap();
    let path = ItemPath::new("f/etl/nightly").unwrap();

    let flow = flow::get_flow_by_path::parsed(&client, &demo(), &path)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(flow.path, "f/etl/nightly");
    let kinds: Vec<_> = flow
        .value
        .modules
        .iter()
        .map(|m| match &m.value {
            FlowModuleValue::RawScript(_) => "raw",
            FlowModuleValue::Script(_) => "script",
            FlowModuleValue::ForLoop(_) => "loop",
            FlowModuleValue::Flow(_) => "flow",
        })
        .collect();
    assert_eq!(kinds, vec!["raw", "script", "loop"]);
    assert_eq!(flow.additional_keys(), vec!["visible_to_runner_only"]);
}

#[tokio::test]
async fn token_is_sent_as_bearer() {
    let base = spawn().await;
    let path = ItemPath::new("u/admin/api_key").unwrap();

    let anonymous = Client::new(ClientConfig::new(base.clone())).unwrap();
    let response = variable::exists_variable::detailed(&anonymous, &demo(), &path)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let authed = Client::new(ClientConfig::new(base).with_token(TOKEN)).unwrap();
    let exists = variable::exists_variable::parsed(&authed, &demo(), &path)
        .await
        .unwrap();
    assert_eq!(exists, Some(true));
}

// ---------------------------------------------------------------------------
// Blocking form
// ---------------------------------------------------------------------------

#[test]
fn blocking_completed_job_is_decoded() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let base = rt.block_on(spawn());
    let client = Client::new(ClientConfig::new(base)).unwrap();

    let job = job::get_completed_job::blocking(&client, &demo(), &job_id())
        .unwrap()
        .unwrap();

    assert_eq!(job.id.as_str(), "01HXYZ");
    assert_eq!(job.result, Maybe::Set(json!({ "x": 1 })));
}

#[test]
fn blocking_delete_failure_raises_with_status_and_body() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let base = rt.block_on(spawn());
    let client =
        Client::new(ClientConfig::new(base).with_raise_on_unexpected_status(true)).unwrap();

    let err = job::delete_completed_job::blocking_detailed(&client, &demo(), &job_id())
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(err.content().map(|b| b.as_ref()), Some(&b"database unavailable"[..]));
}

#[test]
fn blocking_create_posts_json_and_reads_text() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let base = rt.block_on(spawn());
    let client = Client::new(ClientConfig::new(base)).unwrap();
    let body = CreateVariable::new("u/admin/api_key", "s3cr3t", true);

    let response = variable::create_variable::blocking_detailed(&client, &demo(), &body, None)
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.into_parsed().unwrap().as_deref(), Some("u/admin/api_key"));
}
