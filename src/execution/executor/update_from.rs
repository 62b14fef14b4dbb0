use tracing::info;

use crate::catalog::{SourceBinding, TableRef};
use crate::connection::Connection;
use crate::errors::*;
use crate::execution::executor::{check_target, run_statements, Executor};
use crate::execution::RunOutcome;
use crate::params::{self, Parameters};
use crate::sql;

const RESULT_TITLE: &str = "Greenplum Update Result";

/// Updates the configured target from the bound source table's current
/// contents via `UPDATE .. SET .. FROM .. WHERE`, correlating rows on a
/// user-supplied join-key column set. Every source column outside the
/// join key is assigned; the key columns themselves are assumed to exist
/// in both tables and are not verified here.
#[derive(Debug)]
pub struct UpdateFrom {
    target: TableRef,
    source: SourceBinding,
    join_key: Vec<String>,
    analyze: bool,
}

impl UpdateFrom {
    pub fn from_parameters(source: &SourceBinding, parameters: &Parameters) -> Result<Self> {
        let target = TableRef::new(
            parameters.required(params::TARGET_SCHEMA)?,
            parameters.required(params::TARGET_TABLE)?,
        )?;
        let join_key = sql::parse_join_key(parameters.required(params::JOIN_KEY)?)?;

        Ok(UpdateFrom {
            target,
            source: source.clone(),
            join_key,
            analyze: parameters.flag(params::ANALYZE_AFTER_INSERT)?,
        })
    }
}

impl<C: Connection> Executor<C> for UpdateFrom {
    fn execute(self, conn: &mut C) -> Result<RunOutcome> {
        let UpdateFrom {
            target,
            source,
            join_key,
            analyze,
        } = self;
        info!("update {} from {} on {:?}", target, source.table(), join_key);

        let mut ledger = check_target(conn, &target)?;
        let statements = sql::update_statements(&target, &source, &join_key, analyze);
        run_statements(conn, &statements, &mut ledger)?;

        Ok(RunOutcome::from_ledger(RESULT_TITLE, ledger))
    }
}
