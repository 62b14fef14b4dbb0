use std::fmt;

use tracing::debug;

use crate::connection::Connection;
use crate::errors::*;
use crate::sql::validate_identifier;

/// One catalog probe per run, parameterized so the schema/table values
/// never touch the statement text.
const CATALOG_QUERY: &str = "SELECT count(*) FROM pg_tables WHERE schemaname = ? AND tablename = ?";

/// A schema-qualified table reference, immutable once resolved at the
/// start of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRef {
    schema: String,
    table: String,
}

impl TableRef {
    pub fn new(schema: &str, table: &str) -> Result<Self> {
        validate_identifier(schema)?;
        validate_identifier(table)?;
        Ok(TableRef {
            schema: schema.to_string(),
            table: table.to_string(),
        })
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn qualified(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// The source table the host has bound this run to: its reference plus
/// the ordered column list reported by the host's table metadata.
#[derive(Clone, Debug)]
pub struct SourceBinding {
    table: TableRef,
    columns: Vec<String>,
}

impl SourceBinding {
    pub fn new(table: TableRef, columns: Vec<String>) -> Result<Self> {
        for column in &columns {
            validate_identifier(column)?;
        }
        Ok(SourceBinding { table, columns })
    }

    pub fn table(&self) -> &TableRef {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Probes the table catalog for the target. Read-only; the run's only
/// non-mutating statement.
pub fn target_exists<C: Connection>(conn: &mut C, target: &TableRef) -> Result<bool> {
    debug!("checking catalog for {}", target);
    let count = conn.query_scalar(CATALOG_QUERY, &[target.schema(), target.table()])?;

    Ok(count > 0)
}
