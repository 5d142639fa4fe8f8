//! Registry service: client and employee records kept in flat CSV files.
//!
//! Serves list/search pages, create/edit forms and chart dashboards over a
//! positional record repository. Default: http://127.0.0.1:9110/

pub mod aggregate;
pub mod charts;
pub mod config;
pub mod error;
pub mod repository;
pub mod routes;
pub mod store;
pub mod views;

pub use error::{RegistryError, Result};
