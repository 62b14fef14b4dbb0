//! Scripted in-memory stand-in for the host session, used by unit and
//! integration tests. It recognizes exactly the statement shapes this
//! crate builds and tracks per-table row counts so multi-step effects
//! (truncate-then-insert, repeated loads) behave like a real database.

use std::collections::{HashMap, HashSet};

use super::{Connection, ConnectionError};

pub struct MockConnection {
    catalog: HashSet<(String, String)>,
    row_counts: HashMap<String, u64>,
    fail_on: Option<String>,
    pub executed: Vec<String>,
    pub commits: usize,
}

impl MockConnection {
    pub fn new() -> Self {
        MockConnection {
            catalog: HashSet::new(),
            row_counts: HashMap::new(),
            fail_on: None,
            executed: Vec::new(),
            commits: 0,
        }
    }

    /// Registers a table in the mock catalog with an initial row count.
    pub fn with_table(mut self, schema: &str, table: &str, rows: u64) -> Self {
        self.catalog.insert((schema.to_string(), table.to_string()));
        self.row_counts.insert(format!("{}.{}", schema, table), rows);
        self
    }

    /// Any statement containing `fragment` fails with a database error.
    pub fn fail_on(mut self, fragment: &str) -> Self {
        self.fail_on = Some(fragment.to_string());
        self
    }

    pub fn rows(&self, schema: &str, table: &str) -> u64 {
        self.row_counts
            .get(&format!("{}.{}", schema, table))
            .copied()
            .unwrap_or(0)
    }

    fn lookup(&self, fqn: &str) -> Result<u64, ConnectionError> {
        self.row_counts
            .get(fqn)
            .copied()
            .ok_or_else(|| ConnectionError::Database(format!("relation '{}' does not exist", fqn)))
    }
}

impl Default for MockConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection for MockConnection {
    fn query_scalar(&mut self, sql: &str, params: &[&str]) -> Result<i64, ConnectionError> {
        if !sql.contains("pg_tables") || params.len() != 2 {
            return Err(ConnectionError::Database(format!(
                "unsupported query: {}",
                sql
            )));
        }
        let key = (params[0].to_string(), params[1].to_string());
        Ok(i64::from(self.catalog.contains(&key)))
    }

    fn execute(&mut self, sql: &str) -> Result<u64, ConnectionError> {
        if let Some(fragment) = &self.fail_on {
            if sql.contains(fragment.as_str()) {
                return Err(ConnectionError::Database(format!(
                    "forced failure on: {}",
                    sql
                )));
            }
        }
        self.executed.push(sql.to_string());

        if let Some(target) = sql.strip_prefix("TRUNCATE TABLE ") {
            self.lookup(target)?;
            self.row_counts.insert(target.to_string(), 0);
            // TRUNCATE reports no affected rows
            return Ok(0);
        }
        if let Some(rest) = sql.strip_prefix("INSERT INTO ") {
            let (target, source) = rest
                .split_once(" SELECT * FROM ")
                .ok_or_else(|| ConnectionError::Database(format!("malformed insert: {}", sql)))?;
            let moved = self.lookup(source)?;
            let existing = self.lookup(target)?;
            self.row_counts.insert(target.to_string(), existing + moved);
            return Ok(moved);
        }
        if let Some(rest) = sql.strip_prefix("UPDATE ") {
            let (target, rest) = rest
                .split_once(" SET ")
                .ok_or_else(|| ConnectionError::Database(format!("malformed update: {}", sql)))?;
            let (set_clause, rest) = rest
                .split_once(" FROM ")
                .ok_or_else(|| ConnectionError::Database(format!("malformed update: {}", sql)))?;
            if set_clause.trim().is_empty() {
                return Err(ConnectionError::Database(
                    "syntax error at or near \"FROM\"".to_string(),
                ));
            }
            let source = rest.split(' ').next().unwrap_or_default();
            let touched = self.lookup(target)?.min(self.lookup(source)?);
            return Ok(touched);
        }
        if let Some(target) = sql.strip_prefix("ANALYZE ") {
            self.lookup(target)?;
            return Ok(0);
        }

        Err(ConnectionError::Database(format!(
            "unsupported statement: {}",
            sql
        )))
    }

    fn commit(&mut self) -> Result<(), ConnectionError> {
        self.commits += 1;
        Ok(())
    }
}
