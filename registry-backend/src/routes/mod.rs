//! Axum routing: HTML pages for people, `/rpc/*` JSON for tools.

pub mod pages;
pub mod rpc;

use std::sync::Arc;
use std::time::Instant;

use axum::routing::get;
use axum::Router;

use crate::repository::RecordRepository;
use crate::store::CsvStore;

pub struct AppState {
    pub repo: RecordRepository<CsvStore>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: CsvStore) -> Self {
        Self {
            repo: RecordRepository::new(store),
            start_time: Instant::now(),
        }
    }
}

/// Page paths per record kind. Kept identical to the URLs of the existing app.
pub mod paths {
    use registry_types::EntityKind;

    pub fn list(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Clients => "/",
            EntityKind::Employees => "/funcionarios",
        }
    }

    pub fn form(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Clients => "/form_cliente",
            EntityKind::Employees => "/form_funcionario",
        }
    }

    pub fn delete(kind: EntityKind, index: usize) -> String {
        match kind {
            EntityKind::Clients => format!("/delete_cliente/{}", index),
            EntityKind::Employees => format!("/delete_funcionario/{}", index),
        }
    }

    pub fn dashboard(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Clients => "/dashboard_clientes",
            EntityKind::Employees => "/dashboard_funcionarios",
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Clients
        .route("/", get(pages::client_list))
        .route(
            "/form_cliente",
            get(pages::client_form).post(pages::client_submit),
        )
        .route("/delete_cliente/:idx", get(pages::client_delete))
        .route("/dashboard_clientes", get(pages::client_dashboard))
        // Employees
        .route("/funcionarios", get(pages::employee_list))
        .route(
            "/form_funcionario",
            get(pages::employee_form).post(pages::employee_submit),
        )
        .route("/delete_funcionario/:idx", get(pages::employee_delete))
        .route("/dashboard_funcionarios", get(pages::employee_dashboard))
        // RPC
        .route("/rpc/status", get(rpc::status))
        .route("/rpc/records/:kind", get(rpc::list_records))
        .route("/rpc/records/:kind/:idx", get(rpc::get_record))
        .route("/rpc/dashboard/:kind", get(rpc::dashboard))
        .with_state(state)
}
