use tracing::info;

use crate::catalog::{SourceBinding, TableRef};
use crate::connection::Connection;
use crate::errors::*;
use crate::execution::executor::{check_target, run_statements, Executor};
use crate::execution::RunOutcome;
use crate::params::{self, Parameters};
use crate::sql;

const RESULT_TITLE: &str = "Greenplum Insert Result";

/// Appends the bound source table's rows into the configured target via
/// `INSERT INTO .. SELECT *`, optionally truncating the target first and
/// analyzing it afterwards.
///
/// No column validation is performed; a source/target mismatch surfaces
/// as a native database error from the insert itself.
#[derive(Debug)]
pub struct InsertInto {
    target: TableRef,
    source: TableRef,
    truncate: bool,
    analyze: bool,
}

impl InsertInto {
    pub fn from_parameters(source: &SourceBinding, parameters: &Parameters) -> Result<Self> {
        let target = TableRef::new(
            parameters.required(params::TARGET_SCHEMA)?,
            parameters.required(params::TARGET_TABLE)?,
        )?;

        Ok(InsertInto {
            target,
            source: source.table().clone(),
            truncate: parameters.flag(params::TRUNCATE_BEFORE_INSERT)?,
            analyze: parameters.flag(params::ANALYZE_AFTER_INSERT)?,
        })
    }
}

impl<C: Connection> Executor<C> for InsertInto {
    fn execute(self, conn: &mut C) -> Result<RunOutcome> {
        let InsertInto {
            target,
            source,
            truncate,
            analyze,
        } = self;
        info!("insert into {} from {}", target, source);

        let mut ledger = check_target(conn, &target)?;
        let statements = sql::insert_statements(&target, &source, truncate, analyze);
        run_statements(conn, &statements, &mut ledger)?;

        Ok(RunOutcome::from_ledger(RESULT_TITLE, ledger))
    }
}
