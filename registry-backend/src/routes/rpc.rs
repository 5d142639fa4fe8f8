//! Read-only JSON endpoints, wrapped in the `RpcResponse` envelope.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use registry_types::*;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::aggregate::dashboard_summary;
use crate::error::{RegistryError, Result};
use crate::store::Record;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

fn parse_kind(slug: &str) -> Result<EntityKind> {
    EntityKind::from_slug(slug).ok_or_else(|| RegistryError::UnknownKind(slug.to_string()))
}

fn respond<T: Serialize>(result: Result<T>) -> (StatusCode, Json<RpcResponse<T>>) {
    match result {
        Ok(data) => (StatusCode::OK, Json(RpcResponse::ok(data))),
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                log::error!("[HTTP] RPC failed: {}", e);
            }
            (status, Json(RpcResponse::err(e.to_string())))
        }
    }
}

fn service_status(state: &AppState) -> Result<ServiceStatus> {
    Ok(ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
        clients: state.repo.count(EntityKind::Clients)?,
        employees: state.repo.count(EntityKind::Employees)?,
        data_dir: state.repo.store().data_dir().display().to_string(),
    })
}

// GET /rpc/status
pub async fn status(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<ServiceStatus>>) {
    respond(service_status(&state))
}

// GET /rpc/records/:kind
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(query): Query<SearchQuery>,
) -> (StatusCode, Json<RpcResponse<Vec<Record>>>) {
    let result = parse_kind(&kind).and_then(|kind| state.repo.list(kind, query.search.as_deref()));
    respond(result)
}

// GET /rpc/records/:kind/:idx
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    Path((kind, index)): Path<(String, usize)>,
) -> (StatusCode, Json<RpcResponse<Record>>) {
    let kind = match parse_kind(&kind) {
        Ok(k) => k,
        Err(e) => return respond(Err(e)),
    };

    match state.repo.get(kind, index) {
        Ok(Some(record)) => respond(Ok(record)),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(RpcResponse::err(format!("no {} record at index {}", kind, index))),
        ),
        Err(e) => respond(Err(e)),
    }
}

// GET /rpc/dashboard/:kind
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> (StatusCode, Json<RpcResponse<DashboardSummary>>) {
    let result = parse_kind(&kind).and_then(|kind| {
        let records = state.repo.list(kind, None)?;
        Ok(dashboard_summary(kind, &records))
    });
    respond(result)
}
