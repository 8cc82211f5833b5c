//! HTTP API of the stub host
//!
//! - `POST /v1/group/` `{"groupId": ...}` creates a group (201)
//! - `DELETE /v1/group/` `{"groupId": ...}` deletes it (200, 404 if absent)
//! - `GET /v1/group/{groupId}/` reports presence (200 or 404)

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use tower_http::trace::TraceLayer;

use crate::common::GROUP_PATH;

/// In-memory group registry of one host
#[derive(Clone, Default)]
pub struct NodeState {
    groups: Arc<RwLock<HashSet<String>>>,
}

impl NodeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the group already existed.
    pub fn insert(&self, group_id: &str) -> bool {
        self.groups
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(group_id.to_string())
    }

    /// Returns false if the group was absent.
    pub fn remove(&self, group_id: &str) -> bool {
        self.groups
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(group_id)
    }

    pub fn contains(&self, group_id: &str) -> bool {
        self.groups
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains(group_id)
    }

    pub fn len(&self) -> usize {
        self.groups.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn message(status: StatusCode, text: impl Into<String>) -> Response {
    let text: String = text.into();
    (status, Json(json!({ "message": text }))).into_response()
}

/// Extract `groupId` from a JSON body, or the 400 to answer with
fn parse_group_id(body: &[u8]) -> Result<String, Response> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| message(StatusCode::BAD_REQUEST, "Invalid JSON format"))?;

    value
        .get("groupId")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            message(
                StatusCode::BAD_REQUEST,
                "groupId is required in the request body",
            )
        })
}

async fn create_group(State(state): State<NodeState>, body: Bytes) -> Response {
    let group_id = match parse_group_id(&body) {
        Ok(group_id) => group_id,
        Err(response) => return response,
    };

    if !state.insert(&group_id) {
        tracing::debug!("Group {} already present", group_id);
    }
    tracing::info!("Group {} created", group_id);

    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Group created successfully",
            "group": { "groupId": group_id },
        })),
    )
        .into_response()
}

async fn delete_group(State(state): State<NodeState>, body: Bytes) -> Response {
    let group_id = match parse_group_id(&body) {
        Ok(group_id) => group_id,
        Err(response) => return response,
    };

    if state.remove(&group_id) {
        tracing::info!("Group {} deleted", group_id);
        message(
            StatusCode::OK,
            format!("Group with groupId {} deleted successfully", group_id),
        )
    } else {
        message(
            StatusCode::NOT_FOUND,
            format!("Group with groupId {} not found", group_id),
        )
    }
}

async fn get_group(State(state): State<NodeState>, Path(group_id): Path<String>) -> Response {
    if state.contains(&group_id) {
        (StatusCode::OK, Json(json!({ "groupId": group_id }))).into_response()
    } else {
        message(
            StatusCode::NOT_FOUND,
            format!("Group with groupId {} not found", group_id),
        )
    }
}

async fn health(State(state): State<NodeState>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "groups": state.len() }))
}

async fn not_found() -> Response {
    message(StatusCode::NOT_FOUND, "Endpoint not found")
}

pub fn create_router(state: NodeState) -> Router {
    Router::new()
        .route(GROUP_PATH, post(create_group).delete(delete_group))
        .route("/v1/group/:group_id/", get(get_group))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
