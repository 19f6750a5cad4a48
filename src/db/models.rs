// db/models.rs
// Data structures shared by the gateway, inspector and exporter.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One cell as it came back from the database driver, before any
/// declared-type coercion is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// One result row, cells in select-list order.
pub type RawRow = Vec<RawValue>;

/// Name and declared type of one column, as reported by the catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

/// Transient in-memory unit for one table while it is being exported.
/// Never outlives the per-table step; its only durable form is the
/// JSON file written from it.
#[derive(Debug, Clone)]
pub struct TableExport {
    pub table: String,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<RawRow>,
}

/// Outcome of a full run.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub exported: usize,
    pub failed: usize,
    pub output_dir: PathBuf,
}
