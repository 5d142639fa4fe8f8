//! Record repository: positional CRUD and name search over a `TableStore`.
//!
//! Records are addressed by their index in the current table. Mutations run a
//! full load-mutate-save cycle under the per-kind writer lock.

use std::sync::{Mutex, MutexGuard, PoisonError};

use registry_types::{columns, EntityKind};

use crate::error::Result;
use crate::store::{Record, TableStore};

pub struct RecordRepository<S> {
    store: S,
    client_lock: Mutex<()>,
    employee_lock: Mutex<()>,
}

impl<S: TableStore> RecordRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            client_lock: Mutex::new(()),
            employee_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn write_lock(&self, kind: EntityKind) -> MutexGuard<'_, ()> {
        let lock = match kind {
            EntityKind::Clients => &self.client_lock,
            EntityKind::Employees => &self.employee_lock,
        };
        // Guards no data, so a poisoned lock is still usable
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All records in file order, optionally narrowed to those whose Name
    /// contains `search` (case-insensitive). An empty search matches everything.
    pub fn list(&self, kind: EntityKind, search: Option<&str>) -> Result<Vec<Record>> {
        let table = self.store.load(kind)?;
        let needle = search.filter(|s| !s.is_empty()).map(str::to_lowercase);

        let records = table
            .records()
            .filter(|record| match &needle {
                Some(needle) => name_contains(record, needle),
                None => true,
            })
            .collect();
        Ok(records)
    }

    /// The record at `index`, or `None` when out of range
    pub fn get(&self, kind: EntityKind, index: usize) -> Result<Option<Record>> {
        Ok(self.store.load(kind)?.record(index))
    }

    pub fn count(&self, kind: EntityKind) -> Result<usize> {
        Ok(self.store.load(kind)?.len())
    }

    /// Append a record at the end of the table. Returns its index.
    pub fn create(&self, kind: EntityKind, record: &Record) -> Result<usize> {
        let _guard = self.write_lock(kind);
        let mut table = self.store.load(kind)?;
        let index = table.push(record);
        self.store.save(kind, &table)?;

        log::info!("[REPO] Created {} record at index {}", kind, index);
        Ok(index)
    }

    /// Overwrite the record at `index`. Out of range is a no-op and nothing
    /// is written; the return value says whether the update happened.
    pub fn update(&self, kind: EntityKind, index: usize, record: &Record) -> Result<bool> {
        let _guard = self.write_lock(kind);
        let mut table = self.store.load(kind)?;
        if !table.replace(index, record) {
            log::debug!("[REPO] Update of {} index {} ignored (len {})", kind, index, table.len());
            return Ok(false);
        }
        self.store.save(kind, &table)?;

        log::info!("[REPO] Updated {} record at index {}", kind, index);
        Ok(true)
    }

    /// Remove the record at `index`; later records move down one position.
    /// Out of range is a no-op.
    pub fn delete(&self, kind: EntityKind, index: usize) -> Result<bool> {
        let _guard = self.write_lock(kind);
        let mut table = self.store.load(kind)?;
        if !table.remove(index) {
            log::debug!("[REPO] Delete of {} index {} ignored (len {})", kind, index, table.len());
            return Ok(false);
        }
        self.store.save(kind, &table)?;

        log::info!("[REPO] Deleted {} record at index {}", kind, index);
        Ok(true)
    }
}

fn name_contains(record: &Record, needle: &str) -> bool {
    match record.get(columns::NAME) {
        Some(name) if !name.is_empty() => name.to_lowercase().contains(needle),
        _ => false,
    }
}
