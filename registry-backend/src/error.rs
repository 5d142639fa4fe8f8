use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use registry_types::MissingField;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{path} has none of the expected columns (found: {header})")]
    UnrecognizedHeader { path: String, header: String },

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid record index: {0}")]
    InvalidIndex(String),

    #[error("unknown record kind: {0}")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

impl From<MissingField> for RegistryError {
    fn from(e: MissingField) -> Self {
        RegistryError::MissingField(e.0)
    }
}

impl RegistryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistryError::Io(_) | RegistryError::Csv(_) | RegistryError::UnrecognizedHeader { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RegistryError::MissingField(_) | RegistryError::InvalidIndex(_) => {
                StatusCode::BAD_REQUEST
            }
            RegistryError::UnknownKind(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("[HTTP] Request failed: {}", self);
        } else {
            log::warn!("[HTTP] Rejected request: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
