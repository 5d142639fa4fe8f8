//! CSV file backend: one UTF-8 file per record kind, header row first.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use registry_types::EntityKind;

use super::{Table, TableStore};
use crate::config::{defaults, Config};
use crate::error::{RegistryError, Result};

pub struct CsvStore {
    data_dir: PathBuf,
    clients_file: String,
    employees_file: String,
}

impl CsvStore {
    /// Store rooted at `data_dir` with the default file names
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            clients_file: defaults::CLIENTS_FILE.to_string(),
            employees_file: defaults::EMPLOYEES_FILE.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            clients_file: config.file_name(EntityKind::Clients).to_string(),
            employees_file: config.file_name(EntityKind::Employees).to_string(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, kind: EntityKind) -> PathBuf {
        let file_name = match kind {
            EntityKind::Clients => &self.clients_file,
            EntityKind::Employees => &self.employees_file,
        };
        self.data_dir.join(file_name)
    }
}

impl TableStore for CsvStore {
    fn load(&self, kind: EntityKind) -> Result<Table> {
        let path = self.path_for(kind);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("[STORE] {} not found, starting empty", path.display());
                return Ok(Table::empty(kind.columns()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let header: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in reader.records() {
            let row = result?;
            rows.push(row.iter().map(String::from).collect());
        }

        if header.is_empty() || rows.is_empty() {
            return Ok(Table::empty(kind.columns()));
        }

        let layout = column_layout(kind, &header);
        if layout.iter().all(Option::is_none) {
            return Err(RegistryError::UnrecognizedHeader {
                path: path.display().to_string(),
                header: header.join(","),
            });
        }
        let ignored: Vec<&str> = header
            .iter()
            .enumerate()
            .filter(|(i, _)| !layout.contains(&Some(*i)))
            .map(|(_, h)| h.as_str())
            .collect();
        if !ignored.is_empty() {
            log::warn!(
                "[STORE] {} has unknown columns {:?}; they are dropped on the next save",
                path.display(),
                ignored
            );
        }

        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| {
                layout
                    .iter()
                    .map(|slot| slot.and_then(|i| row.get(i)).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        log::debug!("[STORE] Loaded {} {} rows", rows.len(), kind);
        Ok(Table::new(
            kind.columns().iter().map(|c| c.to_string()).collect(),
            rows,
        ))
    }

    fn save(&self, kind: EntityKind, table: &Table) -> Result<()> {
        let path = self.path_for(kind);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write a sibling file then rename it over the target
        let tmp_path = temp_path(&path);
        if let Err(e) = write_table(&tmp_path, table) {
            fs::remove_file(&tmp_path).ok();
            return Err(e);
        }
        fs::rename(&tmp_path, &path)?;

        log::debug!("[STORE] Saved {} {} rows to {}", table.len(), kind, path.display());
        Ok(())
    }
}

/// For each declared column, its position in the file header. The current
/// name wins over the legacy one when a file carries both.
fn column_layout(kind: EntityKind, header: &[String]) -> Vec<Option<usize>> {
    kind.columns()
        .iter()
        .zip(kind.legacy_columns())
        .map(|(column, legacy)| {
            header
                .iter()
                .position(|h| h == column)
                .or_else(|| header.iter().position(|h| h == legacy))
        })
        .collect()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    let file = writer
        .into_inner()
        .map_err(|e| RegistryError::Io(e.into_error()))?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_load_missing_file_has_declared_columns() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path());

        for kind in EntityKind::ALL {
            let table = store.load(kind).unwrap();
            assert!(table.is_empty());
            assert_eq!(table.columns(), kind.columns());
        }
    }

    #[test]
    fn test_load_empty_and_header_only_files() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path());

        fs::write(store.path_for(EntityKind::Clients), "").unwrap();
        let table = store.load(EntityKind::Clients).unwrap();
        assert_eq!(table.columns(), EntityKind::Clients.columns());

        // Header-only with a foreign schema still falls back to the declared one
        fs::write(store.path_for(EntityKind::Employees), "Nome,Cargo\n").unwrap();
        let table = store.load(EntityKind::Employees).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns(), EntityKind::Employees.columns());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("nested"));

        let columns: Vec<String> = EntityKind::Clients
            .columns()
            .iter()
            .map(|c| c.to_string())
            .collect();
        let table = Table::new(
            columns,
            vec![
                row(&["Ana", "123", "a@x.com", "X", "", "2024-01-02", "Ativo"]),
                row(&[
                    "Silva, Bruno",
                    "456",
                    "b@x.com",
                    "Say \"hi\"",
                    "line one\nline two",
                    "2024-02-03",
                    "Inativo",
                ]),
            ],
        );

        store.save(EntityKind::Clients, &table).unwrap();
        let loaded = store.load(EntityKind::Clients).unwrap();
        assert_eq!(loaded, table);

        // No temp file left behind
        let leftovers: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_file_columns_mapped_by_name() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        fs::write(
            store.path_for(EntityKind::Clients),
            "Status,Name\nAtivo,Ana\nInativo\n",
        )
        .unwrap();

        let table = store.load(EntityKind::Clients).unwrap();
        assert_eq!(table.columns(), EntityKind::Clients.columns());
        let ana = table.record(0).unwrap();
        assert_eq!(ana.value("Name"), "Ana");
        assert_eq!(ana.value("Status"), "Ativo");
        assert_eq!(ana.value("Phone"), "");
        assert_eq!(table.record(1).unwrap().value("Status"), "Inativo");
        assert_eq!(table.record(1).unwrap().value("Name"), "");
    }

    #[test]
    fn test_unknown_columns_dropped_on_save() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        let path = store.path_for(EntityKind::Employees);
        fs::write(&path, "Name,Legacy,Status\nBia,old,Ativo\n").unwrap();

        let table = store.load(EntityKind::Employees).unwrap();
        store.save(EntityKind::Employees, &table).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Name,Role,Email,Phone,Assignments,Notes,Status\nBia,,,,,,Ativo\n"
        );
    }

    #[test]
    fn test_load_rejects_file_without_declared_columns() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        fs::write(
            store.path_for(EntityKind::Clients),
            "Cliente,Fone,Correio\nJoao,1,j@x.com\n",
        )
        .unwrap();

        let err = store.load(EntityKind::Clients).unwrap_err();
        assert!(matches!(err, RegistryError::UnrecognizedHeader { .. }));
    }

    #[test]
    fn test_legacy_headers_are_recognized() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        fs::write(
            store.path_for(EntityKind::Employees),
            "Nome,Cargo,Email,Telefone,Atribuicoes,Observacoes,Status\n\
             Bia,Dev,b@x.com,1,a;b,,Ativo\n",
        )
        .unwrap();

        let table = store.load(EntityKind::Employees).unwrap();
        assert_eq!(table.columns(), EntityKind::Employees.columns());
        let bia = table.record(0).unwrap();
        assert_eq!(bia.value("Name"), "Bia");
        assert_eq!(bia.value("Role"), "Dev");
        assert_eq!(bia.value("Assignments"), "a;b");
        assert_eq!(bia.value("Status"), "Ativo");
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        let path = store.path_for(EntityKind::Clients);
        fs::write(&path, "Name,Status\nAna,Ativo\n").unwrap();
        let before = fs::read(&path).unwrap();

        // A directory where the temp file should go makes File::create fail
        fs::create_dir(temp_path(&path)).unwrap();

        let table = Table::empty(EntityKind::Clients.columns());
        assert!(store.save(EntityKind::Clients, &table).is_err());
        assert_eq!(fs::read(&path).unwrap(), before);
        assert!(temp_path(&path).is_dir());
    }

    #[test]
    fn test_save_writes_header_first() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        let table = Table::empty(EntityKind::Employees.columns());

        store.save(EntityKind::Employees, &table).unwrap();
        let content = fs::read_to_string(store.path_for(EntityKind::Employees)).unwrap();
        assert_eq!(content, "Name,Role,Email,Phone,Assignments,Notes,Status\n");
    }

    #[test]
    fn test_custom_file_names_from_config() {
        let mut config = Config::with_data_dir("/tmp/registry");
        config.clients_file = "clientes.csv".to_string();
        let store = CsvStore::from_config(&config);
        assert_eq!(
            store.path_for(EntityKind::Clients),
            PathBuf::from("/tmp/registry/clientes.csv")
        );
        assert_eq!(
            store.path_for(EntityKind::Employees),
            PathBuf::from("/tmp/registry/employees.csv")
        );
    }
}
