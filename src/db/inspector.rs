// db/inspector.rs
// Catalog introspection on top of the gateway.

use super::gateway::DbGateway;
use super::models::{ColumnDescriptor, RawValue};

/// Reads table and column metadata through the gateway's catalog
/// queries. Shares the gateway's failure behavior: an unreachable
/// database yields empty listings, already logged downstream.
pub struct SchemaInspector<'a> {
    gateway: &'a dyn DbGateway,
}

impl<'a> SchemaInspector<'a> {
    pub fn new(gateway: &'a dyn DbGateway) -> Self {
        Self { gateway }
    }

    /// All table names the catalog reports for the connected database.
    pub async fn list_tables(&self) -> Vec<String> {
        let rows = self.gateway.read(&self.gateway.tables_query()).await;
        rows.into_iter()
            .filter_map(|row| match row.into_iter().next() {
                Some(RawValue::Text(name)) => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Column names and declared types for one table, in catalog
    /// (ordinal) order. `table` must come from `list_tables` -- the
    /// gateway interpolates it into SQL text.
    pub async fn list_columns(&self, table: &str) -> Vec<ColumnDescriptor> {
        let rows = self.gateway.read(&self.gateway.columns_query(table)).await;
        rows.into_iter()
            .filter_map(|row| {
                let mut cells = row.into_iter();
                match (cells.next(), cells.next()) {
                    (Some(RawValue::Text(name)), Some(RawValue::Text(data_type))) => {
                        Some(ColumnDescriptor { name, data_type })
                    }
                    _ => None,
                }
            })
            .collect()
    }
}
