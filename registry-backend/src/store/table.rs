//! In-memory table: an ordered sequence of rows sharing one column schema.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// One row as an ordered column -> value mapping.
///
/// Records read from a table carry their position in it; records built from
/// input have none until they are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    position: Option<usize>,
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            position: None,
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Positional index in the table this record was read from
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Like `get`, with a missing column read as empty
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Record", 2)?;
        s.serialize_field("index", &self.position)?;
        s.serialize_field("fields", &OrderedFields(&self.fields))?;
        s.end()
    }
}

struct OrderedFields<'a>(&'a [(String, String)]);

impl Serialize for OrderedFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (column, value) in self.0 {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Rows are padded or truncated to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn empty(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<Record> {
        self.rows.get(index).map(|row| self.to_record(index, row))
    }

    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| self.to_record(i, row))
    }

    /// Append at the end; returns the new row's index
    pub fn push(&mut self, record: &Record) -> usize {
        let row = self.align(record);
        self.rows.push(row);
        self.rows.len() - 1
    }

    /// Overwrite the row at `index`. False if out of bounds.
    pub fn replace(&mut self, index: usize, record: &Record) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        self.rows[index] = self.align(record);
        true
    }

    /// Remove the row at `index`; later rows shift down by one
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    fn to_record(&self, index: usize, row: &[String]) -> Record {
        Record {
            position: Some(index),
            fields: self.columns.iter().cloned().zip(row.iter().cloned()).collect(),
        }
    }

    // Unknown fields are dropped, missing ones become empty cells
    fn align(&self, record: &Record) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| record.value(c).to_string())
            .collect()
    }
}
