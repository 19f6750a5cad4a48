// export/exporter.rs
// Drives the pipeline: enumerate tables, fetch schema and rows per
// table, coerce cells by declared type, write one JSON file per table.

use crate::db::gateway::DbGateway;
use crate::db::inspector::SchemaInspector;
use crate::db::models::{ExportSummary, TableExport};
use crate::format::{format_value, FormatMode};
use anyhow::{bail, Context, Result};
use chrono::Local;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct TableExporter {
    gateway: Box<dyn DbGateway>,
    mode: FormatMode,
    output_dir: PathBuf,
    timestamped: bool,
}

impl TableExporter {
    pub fn new(
        gateway: Box<dyn DbGateway>,
        mode: FormatMode,
        output_dir: impl Into<PathBuf>,
        timestamped: bool,
    ) -> Self {
        Self {
            gateway,
            mode,
            output_dir: output_dir.into(),
            timestamped,
        }
    }

    /// Runs the whole export, strictly sequentially. One table failing
    /// is logged and counted but never aborts the run; only preparing
    /// the output directory is fatal.
    pub async fn run(&self) -> Result<ExportSummary> {
        info!("Starting...");
        let out_dir = self.prepare_output_dir()?;

        let inspector = SchemaInspector::new(self.gateway.as_ref());
        let tables = inspector.list_tables().await;
        info!("{} table(s) found", tables.len());

        let mut summary = ExportSummary {
            output_dir: out_dir.clone(),
            ..Default::default()
        };
        for table in &tables {
            match self.export_table(&inspector, table, &out_dir).await {
                Ok(rows) => {
                    info!("{rows} row(s) exported for {table}");
                    summary.exported += 1;
                }
                Err(err) => {
                    warn!("export of table {table} failed: {err:#}");
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Ending... {} table(s) exported, {} failed",
            summary.exported, summary.failed
        );
        Ok(summary)
    }

    /// Creates the output directory, with a per-run timestamp subfolder
    /// unless disabled.
    fn prepare_output_dir(&self) -> Result<PathBuf> {
        let dir = if self.timestamped {
            self.output_dir
                .join(Local::now().format("%Y-%m-%d_%H-%M-%S").to_string())
        } else {
            self.output_dir.clone()
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        Ok(dir)
    }

    async fn export_table(
        &self,
        inspector: &SchemaInspector<'_>,
        table: &str,
        out_dir: &Path,
    ) -> Result<usize> {
        info!("Retrieving columns for {table}...");
        let columns = inspector.list_columns(table).await;
        info!("{} column(s) found", columns.len());

        info!("Retrieving data for {table}...");
        // The table name comes from the catalog listing, nowhere else;
        // the gateway quotes it for its backend.
        let rows = self.gateway.read(&self.gateway.select_query(table)).await;
        info!("{} data row(s) found", rows.len());

        let unit = TableExport {
            table: table.to_string(),
            columns,
            rows,
        };
        let objects = self.render(&unit)?;
        let row_count = objects.len();

        let path = write_table_file(out_dir, table, &Value::Array(objects))?;
        info!("{} created", path.display());
        Ok(row_count)
    }

    /// Turns one table's rows into JSON objects, zipping each row with
    /// the column list positionally. A row whose width differs from the
    /// column count fails the table rather than truncating or padding.
    fn render(&self, unit: &TableExport) -> Result<Vec<Value>> {
        let mut objects = Vec::with_capacity(unit.rows.len());
        for row in &unit.rows {
            if row.len() != unit.columns.len() {
                bail!(
                    "table {}: row has {} cell(s) but the catalog lists {} column(s)",
                    unit.table,
                    row.len(),
                    unit.columns.len()
                );
            }
            let mut object = Map::with_capacity(row.len());
            for (column, cell) in unit.columns.iter().zip(row) {
                let value = format_value(self.mode, &column.data_type, cell)
                    .with_context(|| format!("table {}, column {}", unit.table, column.name))?;
                object.insert(column.name.clone(), value);
            }
            objects.push(Value::Object(object));
        }
        Ok(objects)
    }
}

/// Writes `<dir>/<table>.json`, replacing any previous run's file. The
/// content goes to a temp file first and is renamed into place, so an
/// interrupted run never leaves a truncated JSON file under the final
/// name.
fn write_table_file(dir: &Path, table: &str, content: &Value) -> Result<PathBuf> {
    let path = dir.join(format!("{table}.json"));
    let tmp = dir.join(format!("{table}.json.tmp"));
    let body = serde_json::to_string(content)?;
    fs::write(&tmp, body).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, &path)
        .with_context(|| format!("failed to move {} into place", tmp.display()))?;
    Ok(path)
}
