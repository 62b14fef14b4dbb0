use serde::Serialize;

pub mod mock;

/// Error raised by the host-owned database session. The host surfaces
/// native database errors as text; this crate never inspects them.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Serialize)]
pub enum ConnectionError {
    #[error("database error: {0}")]
    Database(String),
}

/// The seam to the host-managed database session.
///
/// The connection is opened, positioned, and closed by the host; operators
/// only borrow it for the duration of a run. All calls are synchronous and
/// blocking, and every mutating statement is followed by an explicit
/// [`commit`](Connection::commit) by the caller.
pub trait Connection {
    /// Runs a parameterized read-only query expected to yield a single
    /// integer, such as a catalog count.
    fn query_scalar(&mut self, sql: &str, params: &[&str]) -> Result<i64, ConnectionError>;

    /// Executes a mutating statement, returning the affected-row count.
    fn execute(&mut self, sql: &str) -> Result<u64, ConnectionError>;

    /// Commits the session's current transaction.
    fn commit(&mut self) -> Result<(), ConnectionError>;
}
