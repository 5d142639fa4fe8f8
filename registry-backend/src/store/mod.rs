//! Tabular store: whole-table load/save per record kind.
//!
//! Every load reads the full file and every save rewrites it. The trait is the
//! seam where an indexed store could replace the CSV files.

pub mod csv_store;
pub mod table;

pub use csv_store::CsvStore;
pub use table::{Record, Table};

use crate::error::Result;
use registry_types::EntityKind;

pub trait TableStore: Send + Sync {
    /// Read the full table for `kind`. A missing or empty backing file yields
    /// an empty table with the kind's declared columns.
    fn load(&self, kind: EntityKind) -> Result<Table>;

    /// Replace the stored table. Readers never observe a partial write.
    fn save(&self, kind: EntityKind, table: &Table) -> Result<()>;
}
