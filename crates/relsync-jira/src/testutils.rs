//! In-process Jira stand-in for client tests.

use axum::extract::{Path, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Default)]
struct MockState {
    /// "METHOD /path" and the Authorization header of every request.
    requests: Mutex<Vec<(String, String)>>,
    /// "METHOD /path" and the JSON body of every write.
    bodies: Mutex<Vec<(String, Value)>>,
    /// (id, name) of created versions.
    versions: Mutex<Vec<(String, String)>>,
}

impl MockState {
    fn body(&self, route: String, body: Value) {
        self.bodies.lock().unwrap().push((route, body));
    }
}

pub struct MockJira {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockJira {
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/rest/api/3/project/{key}", get(project))
            .route("/rest/api/3/project/{key}/versions", get(versions))
            .route("/rest/api/3/version", post(create_version))
            .route("/rest/api/3/version/{id}", put(update_version))
            .route("/rest/api/3/issue/{key}", get(issue).put(edit_issue))
            .route(
                "/rest/api/3/issue/{key}/transitions",
                get(transitions).post(transition),
            )
            .layer(middleware::from_fn_with_state(Arc::clone(&state), record))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn host(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<String> {
        let requests = self.state.requests.lock().unwrap();
        requests.iter().map(|(route, _)| route.clone()).collect()
    }

    pub fn authorizations(&self) -> Vec<String> {
        let requests = self.state.requests.lock().unwrap();
        requests.iter().map(|(_, auth)| auth.clone()).collect()
    }

    pub fn bodies(&self, route: &str) -> Vec<Value> {
        let bodies = self.state.bodies.lock().unwrap();
        bodies
            .iter()
            .filter(|(r, _)| r == route)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

async fn record(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    let route = format!("{} {}", request.method(), request.uri().path());
    let auth = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.requests.lock().unwrap().push((route, auth));
    next.run(request).await
}

fn jira_error(status: StatusCode, messages: &[&str], errors: Value) -> Response {
    (
        status,
        Json(json!({ "errorMessages": messages, "errors": errors })),
    )
        .into_response()
}

async fn project(Path(key): Path<String>) -> Response {
    Json(json!({ "id": "10000", "key": key, "name": "Alpha Beta Charlie" })).into_response()
}

async fn versions(State(state): State<Arc<MockState>>) -> Json<Value> {
    let versions = state.versions.lock().unwrap();
    Json(Value::Array(
        versions
            .iter()
            .map(|(id, name)| json!({ "id": id, "name": name, "released": false }))
            .collect(),
    ))
}

async fn create_version(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.body("POST /rest/api/3/version".to_string(), body.clone());
    let name = body["name"].as_str().unwrap_or_default().to_string();

    if name == "forbidden" {
        return jira_error(
            StatusCode::FORBIDDEN,
            &["You do not have permission to manage versions"],
            json!({}),
        );
    }

    let mut versions = state.versions.lock().unwrap();
    if versions.iter().any(|(_, existing)| *existing == name) {
        return jira_error(
            StatusCode::BAD_REQUEST,
            &[],
            json!({ "name": "A version with this name already exists in this project." }),
        );
    }

    let id = (versions.len() + 1).to_string();
    versions.push((id.clone(), name.clone()));
    (
        StatusCode::CREATED,
        Json(json!({ "id": id, "name": name, "released": false, "projectId": 10000 })),
    )
        .into_response()
}

async fn update_version(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.body(format!("PUT /rest/api/3/version/{id}"), body.clone());
    Json(json!({ "id": id, "released": body["released"] }))
}

async fn issue(Path(key): Path<String>) -> Response {
    let fields = match key.as_str() {
        "ABC-1" => json!({
            "issuetype": { "name": "Story", "subtask": false },
            "fixVersions": [],
            "status": { "name": "To Do", "id": "1" },
            "components": []
        }),
        "ABC-2" => json!({
            "issuetype": { "name": "Sub-task", "subtask": true },
            "fixVersions": [{ "id": "9", "name": "v0.9.0" }],
            "status": { "name": "In Progress", "id": "3" },
            "components": [{ "name": "backend" }],
            "parent": { "id": "10001", "key": "ABC-1" }
        }),
        _ => {
            return jira_error(
                StatusCode::NOT_FOUND,
                &["Issue does not exist or you do not have permission to see it."],
                json!({}),
            );
        }
    };

    Json(json!({ "id": "10002", "key": key, "fields": fields })).into_response()
}

async fn edit_issue(
    State(state): State<Arc<MockState>>,
    Path(key): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if key == "ABC-403" {
        return jira_error(
            StatusCode::FORBIDDEN,
            &["You do not have permission to edit issues"],
            json!({}),
        );
    }
    state.body(format!("PUT /rest/api/3/issue/{key}"), body);
    StatusCode::NO_CONTENT.into_response()
}

async fn transitions() -> Json<Value> {
    Json(json!({
        "transitions": [
            { "id": "11", "name": "Reopen", "to": { "name": "To Do", "id": "1" } },
            { "id": "21", "name": "Start work", "to": { "name": "In Progress", "id": "3" } },
            { "id": "31", "name": "Finish", "to": { "name": "Done", "id": "4" } }
        ]
    }))
}

async fn transition(
    State(state): State<Arc<MockState>>,
    Path(key): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    state.body(format!("POST /rest/api/3/issue/{key}/transitions"), body);
    StatusCode::NO_CONTENT
}
