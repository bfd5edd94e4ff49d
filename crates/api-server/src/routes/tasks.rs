//! Task API endpoints
//!
//! RESTful API over the task lifecycle service. The transport validates
//! headers and payloads; business invariants live in the service.

use std::collections::HashSet;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

use tm_core::task::{QueryParams, TaskDetails, TaskRequest, TaskSummary};
use tm_core::TaskError;

use crate::envelope::{ErrorResponse, ServiceResponse};
use crate::headers::AuthorizationHeaders;
use crate::state::AppState;

/// Wire format for due dates.
const DUE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

type RouteError = (StatusCode, Json<ServiceResponse<()>>);

#[derive(Debug, Serialize)]
pub struct TaskIdResponse {
    pub id: String,
}

fn route_error(status: StatusCode, message: impl Into<String>) -> RouteError {
    (
        status,
        Json(ServiceResponse::failed(ErrorResponse {
            status: status.as_u16(),
            message: message.into(),
        })),
    )
}

fn bad_request(message: impl Into<String>) -> RouteError {
    route_error(StatusCode::BAD_REQUEST, message)
}

fn task_error(err: TaskError) -> RouteError {
    let status = match &err {
        TaskError::Conflict(_) => StatusCode::CONFLICT,
        TaskError::NotFound(_) => StatusCode::NOT_FOUND,
        TaskError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    route_error(status, err.to_string())
}

fn authorize(headers: &HeaderMap) -> Result<AuthorizationHeaders, RouteError> {
    let auth = AuthorizationHeaders::from_headers(headers).map_err(bad_request)?;
    tracing::debug!(
        request_id = %auth.request_id,
        request_date = %auth.request_date,
        user_id = %auth.user_id,
        "request headers validated"
    );
    Ok(auth)
}

/// Reject payloads the service must not see; the service itself does not
/// re-validate.
fn validate_request(req: &TaskRequest, require_future_due_date: bool) -> Result<(), RouteError> {
    if req.title.trim().is_empty() {
        return Err(bad_request("Title is mandatory"));
    }
    if req.due_date.trim().is_empty() {
        return Err(bad_request("Due date is mandatory"));
    }
    let due = NaiveDateTime::parse_from_str(&req.due_date, DUE_DATE_FORMAT)
        .map_err(|_| bad_request("Due date must be yyyy-MM-ddTHH:mm:ss"))?;
    if require_future_due_date && due.date() <= Utc::now().date_naive() {
        return Err(bad_request("Due date must be in the future"));
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<TaskRequest>,
) -> Result<(StatusCode, Json<TaskIdResponse>), RouteError> {
    let auth = authorize(&headers)?;
    validate_request(&req, true)?;

    let id = state
        .task_service()
        .create_task(&auth.user_id, req)
        .await
        .map_err(task_error)?;

    Ok((StatusCode::CREATED, Json(TaskIdResponse { id })))
}

/// GET /api/v1/tasks - List the caller's tasks
async fn list_tasks(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<QueryParams>,
) -> Result<Json<ServiceResponse<HashSet<TaskSummary>>>, RouteError> {
    let auth = authorize(&headers)?;

    let page = state
        .task_service()
        .get_tasks(&auth.user_id, &query)
        .await
        .map_err(task_error)?;

    Ok(Json(ServiceResponse::query_response(
        page.tasks,
        page.paging,
    )))
}

/// GET /api/v1/tasks/{id} - Get a single task
async fn get_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<TaskDetails>, RouteError> {
    authorize(&headers)?;

    let task = state
        .task_service()
        .get_task_by_id(&id)
        .await
        .map_err(task_error)?;

    Ok(Json(task))
}

/// PUT /api/v1/tasks/{id} - Replace a task
async fn update_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<TaskRequest>,
) -> Result<Json<TaskDetails>, RouteError> {
    authorize(&headers)?;
    validate_request(&req, false)?;

    let task = state
        .task_service()
        .update_task(&id, req)
        .await
        .map_err(task_error)?;

    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id} - Soft-delete a task
async fn delete_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, RouteError> {
    authorize(&headers)?;

    state
        .task_service()
        .delete_task(&id)
        .await
        .map_err(task_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/v1/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tm_core::task::{FileTaskStore, TaskService};
    use tower::ServiceExt;

    async fn test_app() -> (Router, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(
            FileTaskStore::new(temp.path().join("tasks.json"))
                .await
                .unwrap(),
        );
        let state = AppState::with_service(TaskService::new(store));
        (super::router().with_state(state), temp)
    }

    fn request(method: &str, uri: &str, user: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("X-Request-Id", "7f1050f1-3a75-4a27-9500-6a9f0ecf2c8a")
            .header("X-Request-Date", "2026-08-06T10:00:00")
            .header("X-User-Id", user);
        match body {
            Some(value) => builder
                .header("content-type", "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    fn future_due_date() -> String {
        (Utc::now() + chrono::Duration::days(7))
            .format(DUE_DATE_FORMAT)
            .to_string()
    }

    fn task_body(title: &str) -> Value {
        json!({ "title": title, "dueDate": future_due_date() })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, user: &str, title: &str) -> String {
        let response = app
            .clone()
            .oneshot(request("POST", "/api/v1/tasks", user, Some(task_body(title))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn create_then_get_roundtrip() {
        let (app, _temp) = test_app().await;

        let id = create(&app, "u1", "Buy milk").await;

        let response = app
            .clone()
            .oneshot(request("GET", &format!("/api/v1/tasks/{id}"), "u1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let task = body_json(response).await;
        assert_eq!(task["title"], "Buy milk");
        assert_eq!(task["status"], "PENDING");
        assert_eq!(task["createdBy"], "u1");
        assert_eq!(task["deleted"], false);
    }

    #[tokio::test]
    async fn duplicate_create_is_a_conflict() {
        let (app, _temp) = test_app().await;

        create(&app, "u1", "Buy milk").await;
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/v1/tasks",
                "u1",
                Some(task_body("Buy milk")),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["error"]["status"], 409);
        assert_eq!(body["error"]["message"], "Task already exists");
    }

    #[tokio::test]
    async fn missing_user_header_is_a_bad_request() {
        let (app, _temp) = test_app().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/tasks")
                    .header("X-Request-Id", "7f1050f1-3a75-4a27-9500-6a9f0ecf2c8a")
                    .header("X-Request-Date", "2026-08-06T10:00:00")
                    .header("content-type", "application/json")
                    .body(Body::from(task_body("Buy milk").to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Header X-User-Id is mandatory");
    }

    #[tokio::test]
    async fn malformed_request_id_is_a_bad_request() {
        let (app, _temp) = test_app().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/tasks")
                    .header("X-Request-Id", "not-a-uuid")
                    .header("X-Request-Date", "2026-08-06T10:00:00")
                    .header("X-User-Id", "u1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(
            body["error"]["message"],
            "Header X-Request-Id must be UUID format"
        );
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let (app, _temp) = test_app().await;

        let body = json!({ "title": "   ", "dueDate": future_due_date() });
        let response = app
            .clone()
            .oneshot(request("POST", "/api/v1/tasks", "u1", Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Title is mandatory");
    }

    #[tokio::test]
    async fn past_due_date_is_rejected_on_create() {
        let (app, _temp) = test_app().await;

        let body = json!({ "title": "Buy milk", "dueDate": "2020-01-01T00:00:00" });
        let response = app
            .clone()
            .oneshot(request("POST", "/api/v1/tasks", "u1", Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Due date must be in the future");
    }

    #[tokio::test]
    async fn past_due_date_is_accepted_on_update() {
        let (app, _temp) = test_app().await;

        let id = create(&app, "u1", "Buy milk").await;

        let body = json!({
            "title": "Buy milk",
            "dueDate": "2020-01-01T00:00:00",
            "userId": "u1"
        });
        let response = app
            .clone()
            .oneshot(request("PUT", &format!("/api/v1/tasks/{id}"), "u1", Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn list_wraps_results_in_the_envelope() {
        let (app, _temp) = test_app().await;

        create(&app, "u1", "a").await;
        create(&app, "u1", "b").await;
        create(&app, "u1", "c").await;

        let response = app
            .clone()
            .oneshot(request("GET", "/api/v1/tasks?size=2", "u1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["paging"]["totalElements"], 3);
        assert_eq!(body["paging"]["totalPages"], 2);
        assert_eq!(body["paging"]["currentPage"], 0);
        assert_eq!(body["paging"]["numberOfElements"], 2);
        // Abbreviated shape: no due date or stamps in list items.
        assert!(body["data"][0].get("dueDate").is_none());
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let (app, _temp) = test_app().await;

        create(&app, "u1", "a").await;
        create(&app, "u1", "b").await;

        let response = app
            .clone()
            .oneshot(request(
                "GET",
                "/api/v1/tasks?status=IN_PROGRESS",
                "u1",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
        assert_eq!(body["paging"]["totalElements"], 0);
    }

    #[tokio::test]
    async fn get_missing_task_is_not_found() {
        let (app, _temp) = test_app().await;

        let response = app
            .clone()
            .oneshot(request("GET", "/api/v1/tasks/nope", "u1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["status"], 404);
        assert_eq!(body["error"]["message"], "Task not found");
    }

    #[tokio::test]
    async fn update_replaces_and_returns_the_full_task() {
        let (app, _temp) = test_app().await;

        let id = create(&app, "u1", "Buy milk").await;

        let body = json!({
            "title": "Buy oat milk",
            "dueDate": future_due_date(),
            "status": "IN_PROGRESS",
            "userId": "u1"
        });
        let response = app
            .clone()
            .oneshot(request("PUT", &format!("/api/v1/tasks/{id}"), "u1", Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let task = body_json(response).await;
        assert_eq!(task["id"], id.as_str());
        assert_eq!(task["title"], "Buy oat milk");
        assert_eq!(task["status"], "IN_PROGRESS");
        assert_eq!(task["lastModifiedBy"], "u1");
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (app, _temp) = test_app().await;

        let id = create(&app, "u1", "Buy milk").await;

        let response = app
            .clone()
            .oneshot(request("DELETE", &format!("/api/v1/tasks/{id}"), "u1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(request("GET", &format!("/api/v1/tasks/{id}"), "u1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
