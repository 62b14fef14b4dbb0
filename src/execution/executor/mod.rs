pub(crate) mod insert_into;
pub(crate) mod update_from;

pub use insert_into::InsertInto;
pub use update_from::UpdateFrom;

use tracing::debug;

use crate::catalog::{self, TableRef};
use crate::connection::Connection;
use crate::errors::*;
use crate::execution::StepResult;
use crate::sql::Statement;

/// An operator borrows the host session for one run and produces the
/// step ledger as its output.
pub trait Executor<C: Connection> {
    fn execute(self, conn: &mut C) -> Result<crate::execution::RunOutcome>;
}

/// Aborts the run before any statement is built when the target is not
/// in the catalog; otherwise opens the ledger.
pub(crate) fn check_target<C: Connection>(
    conn: &mut C,
    target: &TableRef,
) -> Result<Vec<StepResult>> {
    if !catalog::target_exists(conn, target)? {
        return Err(OperatorError::TargetNotFound(target.qualified()));
    }
    Ok(vec![StepResult::target_exists()])
}

/// Runs the built statements in order, committing after each one and
/// recording its affected-row count. The first failure aborts the
/// remaining steps; already-committed effects are not compensated and
/// the partial ledger is discarded with the run.
pub(crate) fn run_statements<C: Connection>(
    conn: &mut C,
    statements: &[Statement],
    ledger: &mut Vec<StepResult>,
) -> Result<()> {
    for statement in statements {
        debug!(step = statement.step, sql = %statement.sql, "executing step");
        let affected = conn
            .execute(&statement.sql)
            .and_then(|affected| conn.commit().map(|_| affected))
            .map_err(|source| OperatorError::StepFailed {
                step: statement.step.to_string(),
                source,
            })?;

        ledger.push(StepResult::new(statement.step, affected));
    }
    Ok(())
}
