//! Shared types for the registry service and its RPC clients.

use serde::{Deserialize, Serialize};
use std::fmt;

// =====================================================
// Column Schema
// =====================================================

/// Column names as they appear in the CSV header row
pub mod columns {
    pub const NAME: &str = "Name";
    pub const PHONE: &str = "Phone";
    pub const EMAIL: &str = "Email";
    pub const COMPANY: &str = "Company";
    pub const NOTES: &str = "Notes";
    pub const REGISTERED_DATE: &str = "RegisteredDate";
    pub const STATUS: &str = "Status";
    pub const ROLE: &str = "Role";
    pub const ASSIGNMENTS: &str = "Assignments";
}

pub const CLIENT_COLUMNS: [&str; 7] = [
    columns::NAME,
    columns::PHONE,
    columns::EMAIL,
    columns::COMPANY,
    columns::NOTES,
    columns::REGISTERED_DATE,
    columns::STATUS,
];

pub const EMPLOYEE_COLUMNS: [&str; 7] = [
    columns::NAME,
    columns::ROLE,
    columns::EMAIL,
    columns::PHONE,
    columns::ASSIGNMENTS,
    columns::NOTES,
    columns::STATUS,
];

/// Headers of data files written before the columns were renamed, in the same
/// order as `CLIENT_COLUMNS`.
pub const LEGACY_CLIENT_COLUMNS: [&str; 7] = [
    "Nome",
    "Telefone",
    "Email",
    "Empresa",
    "Observacoes",
    "DataCadastro",
    "Status",
];

pub const LEGACY_EMPLOYEE_COLUMNS: [&str; 7] = [
    "Nome",
    "Cargo",
    "Email",
    "Telefone",
    "Atribuicoes",
    "Observacoes",
    "Status",
];

/// The two record kinds the registry manages, one CSV file each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Clients,
    Employees,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Clients, EntityKind::Employees];

    /// Declared columns, in header order
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            EntityKind::Clients => &CLIENT_COLUMNS,
            EntityKind::Employees => &EMPLOYEE_COLUMNS,
        }
    }

    /// Legacy header name for each entry of `columns()`
    pub fn legacy_columns(self) -> &'static [&'static str] {
        match self {
            EntityKind::Clients => &LEGACY_CLIENT_COLUMNS,
            EntityKind::Employees => &LEGACY_EMPLOYEE_COLUMNS,
        }
    }

    /// URL/JSON identifier ("clients", "employees")
    pub fn slug(self) -> &'static str {
        match self {
            EntityKind::Clients => "clients",
            EntityKind::Employees => "employees",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Clients => "Client",
            EntityKind::Employees => "Employee",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Clients => "Clients",
            EntityKind::Employees => "Employees",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

// =====================================================
// Status
// =====================================================

/// Record status. Stored in CSV using the labels of the existing data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Ativo", alias = "Active")]
    Active,
    #[serde(rename = "Inativo", alias = "Inactive")]
    Inactive,
}

impl Status {
    /// Lenient parse: accepts stored and English labels, any case.
    /// Anything else is not a status (and is never rejected on write).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "ativo" | "active" => Some(Status::Active),
            "inativo" | "inactive" => Some(Status::Inactive),
            _ => None,
        }
    }

    pub fn stored_label(self) -> &'static str {
        match self {
            Status::Active => "Ativo",
            Status::Inactive => "Inativo",
        }
    }

    pub fn display_label(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }
}

// =====================================================
// Form Input Types
// =====================================================

/// A required form field was absent from the submitted input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField(pub &'static str);

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing field: {}", self.0)
    }
}

impl std::error::Error for MissingField {}

fn required(value: Option<String>, field: &'static str) -> Result<String, MissingField> {
    value.ok_or(MissingField(field))
}

/// Submitted client form (urlencoded or JSON). Field names match the columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientForm {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "Company")]
    pub company: Option<String>,
    #[serde(rename = "Notes")]
    pub notes: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
}

/// Validated client input; RegisteredDate is assigned by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub notes: String,
    pub status: String,
}

impl ClientForm {
    /// Check field presence. Notes is optional and defaults to empty.
    pub fn validate(self) -> Result<ClientFields, MissingField> {
        Ok(ClientFields {
            name: required(self.name, columns::NAME)?,
            phone: required(self.phone, columns::PHONE)?,
            email: required(self.email, columns::EMAIL)?,
            company: required(self.company, columns::COMPANY)?,
            notes: self.notes.unwrap_or_default(),
            status: required(self.status, columns::STATUS)?,
        })
    }
}

impl ClientFields {
    /// Column/value pairs in declared column order
    pub fn into_pairs(self, registered_date: &str) -> Vec<(&'static str, String)> {
        vec![
            (columns::NAME, self.name),
            (columns::PHONE, self.phone),
            (columns::EMAIL, self.email),
            (columns::COMPANY, self.company),
            (columns::NOTES, self.notes),
            (columns::REGISTERED_DATE, registered_date.to_string()),
            (columns::STATUS, self.status),
        ]
    }
}

/// Submitted employee form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeForm {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Role")]
    pub role: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    /// Semicolon-delimited list
    #[serde(rename = "Assignments")]
    pub assignments: Option<String>,
    #[serde(rename = "Notes")]
    pub notes: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFields {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub assignments: String,
    pub notes: String,
    pub status: String,
}

impl EmployeeForm {
    pub fn validate(self) -> Result<EmployeeFields, MissingField> {
        Ok(EmployeeFields {
            name: required(self.name, columns::NAME)?,
            role: required(self.role, columns::ROLE)?,
            email: required(self.email, columns::EMAIL)?,
            phone: required(self.phone, columns::PHONE)?,
            assignments: required(self.assignments, columns::ASSIGNMENTS)?,
            notes: self.notes.unwrap_or_default(),
            status: required(self.status, columns::STATUS)?,
        })
    }
}

impl EmployeeFields {
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        vec![
            (columns::NAME, self.name),
            (columns::ROLE, self.role),
            (columns::EMAIL, self.email),
            (columns::PHONE, self.phone),
            (columns::ASSIGNMENTS, self.assignments),
            (columns::NOTES, self.notes),
            (columns::STATUS, self.status),
        ]
    }
}

// =====================================================
// RPC Response Types
// =====================================================

/// JSON envelope for every `/rpc/*` reply
#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> RpcResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// =====================================================
// Dashboard Types
// =====================================================

/// Active vs inactive split. Records with an unrecognized status count in neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTally {
    pub active: usize,
    pub inactive: usize,
}

/// Number of assignments held by one employee record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentCount {
    pub index: usize,
    pub name: String,
    pub count: usize,
    /// Raw stored status value
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub kind: EntityKind,
    pub total: usize,
    pub tally: StatusTally,
    /// Per-record assignment counts (employees only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignments: Option<Vec<AssignmentCount>>,
}

/// Service health status
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    pub clients: usize,
    pub employees: usize,
    pub data_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_lenient() {
        assert_eq!(Status::parse("Ativo"), Some(Status::Active));
        assert_eq!(Status::parse(" inactive "), Some(Status::Inactive));
        assert_eq!(Status::parse("INATIVO"), Some(Status::Inactive));
        assert_eq!(Status::parse("Pending"), None);
        assert_eq!(Status::parse(""), None);
    }

    #[test]
    fn test_status_serde_uses_stored_labels() {
        assert_eq!(serde_json::to_string(&Status::Active).unwrap(), "\"Ativo\"");
        let parsed: Status = serde_json::from_str("\"Inactive\"").unwrap();
        assert_eq!(parsed, Status::Inactive);
    }

    #[test]
    fn test_kind_slugs() {
        assert_eq!(EntityKind::from_slug("clients"), Some(EntityKind::Clients));
        assert_eq!(EntityKind::from_slug("employees"), Some(EntityKind::Employees));
        assert_eq!(EntityKind::from_slug("users"), None);
        assert_eq!(EntityKind::Clients.columns().len(), 7);
        assert_eq!(EntityKind::Employees.columns()[4], "Assignments");
    }

    #[test]
    fn test_client_form_notes_optional() {
        let form: ClientForm = serde_json::from_value(serde_json::json!({
            "Name": "Ana",
            "Phone": "123",
            "Email": "a@x.com",
            "Company": "X",
            "Status": "Ativo"
        }))
        .unwrap();
        let fields = form.validate().unwrap();
        assert_eq!(fields.notes, "");

        let pairs = fields.into_pairs("2024-01-02");
        let names: Vec<&str> = pairs.iter().map(|(c, _)| *c).collect();
        assert_eq!(names, CLIENT_COLUMNS);
        assert_eq!(pairs[5].1, "2024-01-02");
    }

    #[test]
    fn test_client_form_missing_field() {
        let form = ClientForm {
            name: Some("Ana".to_string()),
            phone: Some("123".to_string()),
            email: None,
            company: Some("X".to_string()),
            notes: None,
            status: Some("Ativo".to_string()),
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err, MissingField("Email"));
        assert_eq!(err.to_string(), "missing field: Email");
    }

    #[test]
    fn test_employee_form_requires_assignments() {
        let form = EmployeeForm {
            name: Some("Bia".to_string()),
            role: Some("Dev".to_string()),
            email: Some("b@x.com".to_string()),
            phone: Some("9".to_string()),
            assignments: None,
            notes: None,
            status: Some("Ativo".to_string()),
        };
        assert_eq!(form.validate().unwrap_err(), MissingField("Assignments"));
    }

    #[test]
    fn test_rpc_response_skips_empty_fields() {
        let json = serde_json::to_value(RpcResponse::<()>::err("nope")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "nope");
        assert!(json.get("data").is_none());
    }
}
