//! HTML route handlers. Each request is a single load -> (mutate) -> respond cycle.

use std::sync::Arc;

use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, Redirect};
use registry_types::{ClientForm, EmployeeForm, EntityKind};
use serde::Deserialize;

use super::{paths, AppState};
use crate::error::{RegistryError, Result};
use crate::store::Record;
use crate::views::{self, Notice};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub notice: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FormQuery {
    pub id: Option<String>,
}

/// Current local date as stored in RegisteredDate
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Absent or empty `id` means "new record"
fn parse_index(raw: Option<&str>) -> Result<Option<usize>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| RegistryError::InvalidIndex(s.to_string())),
    }
}

fn render_list(state: &AppState, kind: EntityKind, query: ListQuery) -> Result<Html<String>> {
    let search = query.search.unwrap_or_default();
    let records = state.repo.list(kind, Some(&search))?;
    let notice = query.notice.as_deref().and_then(Notice::from_query);
    Ok(Html(views::list_page(kind, &records, &search, notice)))
}

fn render_form(state: &AppState, kind: EntityKind, query: FormQuery) -> Result<Html<String>> {
    // An out-of-range id falls back to an empty create form
    let existing = match parse_index(query.id.as_deref())? {
        Some(index) => state.repo.get(kind, index)?,
        None => None,
    };
    Ok(Html(views::form_page(kind, existing.as_ref())))
}

fn save_record(
    state: &AppState,
    kind: EntityKind,
    index: Option<usize>,
    record: &Record,
) -> Result<Redirect> {
    let notice = match index {
        Some(index) => state
            .repo
            .update(kind, index, record)?
            .then_some(Notice::Updated),
        None => {
            state.repo.create(kind, record)?;
            Some(Notice::Created)
        }
    };
    Ok(redirect_to_list(kind, notice))
}

fn delete_record(state: &AppState, kind: EntityKind, index: usize) -> Result<Redirect> {
    let notice = state.repo.delete(kind, index)?.then_some(Notice::Deleted);
    Ok(redirect_to_list(kind, notice))
}

fn redirect_to_list(kind: EntityKind, notice: Option<Notice>) -> Redirect {
    match notice {
        Some(notice) => Redirect::to(&format!(
            "{}?notice={}",
            paths::list(kind),
            notice.as_query()
        )),
        None => Redirect::to(paths::list(kind)),
    }
}

fn render_dashboard(state: &AppState, kind: EntityKind) -> Result<Html<String>> {
    let records = state.repo.list(kind, None)?;
    Ok(Html(views::dashboard_page(kind, &records)))
}

// ── Clients ─────────────────────────────────────────

// GET /
pub async fn client_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>> {
    render_list(&state, EntityKind::Clients, query)
}

// GET /form_cliente
pub async fn client_form(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FormQuery>,
) -> Result<Html<String>> {
    render_form(&state, EntityKind::Clients, query)
}

// POST /form_cliente
pub async fn client_submit(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FormQuery>,
    Form(form): Form<ClientForm>,
) -> Result<Redirect> {
    let index = parse_index(query.id.as_deref())?;
    let fields = form.validate()?;
    let record = Record::from_pairs(fields.into_pairs(&today()));
    save_record(&state, EntityKind::Clients, index, &record)
}

// GET /delete_cliente/:idx
pub async fn client_delete(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Redirect> {
    delete_record(&state, EntityKind::Clients, index)
}

// GET /dashboard_clientes
pub async fn client_dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    render_dashboard(&state, EntityKind::Clients)
}

// ── Employees ───────────────────────────────────────

// GET /funcionarios
pub async fn employee_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>> {
    render_list(&state, EntityKind::Employees, query)
}

// GET /form_funcionario
pub async fn employee_form(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FormQuery>,
) -> Result<Html<String>> {
    render_form(&state, EntityKind::Employees, query)
}

// POST /form_funcionario
pub async fn employee_submit(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FormQuery>,
    Form(form): Form<EmployeeForm>,
) -> Result<Redirect> {
    let index = parse_index(query.id.as_deref())?;
    let fields = form.validate()?;
    let record = Record::from_pairs(fields.into_pairs());
    save_record(&state, EntityKind::Employees, index, &record)
}

// GET /delete_funcionario/:idx
pub async fn employee_delete(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Redirect> {
    delete_record(&state, EntityKind::Employees, index)
}

// GET /dashboard_funcionarios
pub async fn employee_dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    render_dashboard(&state, EntityKind::Employees)
}
