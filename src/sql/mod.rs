//! Statement construction for both operators.
//!
//! These are identifier positions in a dialect that does not accept bind
//! parameters for them, so the texts are assembled from identifiers that
//! have already passed [`validate_identifier`]. Values that can travel as
//! bind parameters (the catalog probe) do so in [`crate::catalog`].

use crate::catalog::{SourceBinding, TableRef};
use crate::errors::*;

pub const STEP_TARGET_EXISTS: &str = "Target Exists";
pub const STEP_TRUNCATE: &str = "Truncate Target";
pub const STEP_INSERT: &str = "Insert Into";
pub const STEP_UPDATE: &str = "Update FROM";
pub const STEP_ANALYZE: &str = "Analyze Target";

/// A built statement paired with the ledger name of its step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub step: &'static str,
    pub sql: String,
}

impl Statement {
    fn new(step: &'static str, sql: String) -> Self {
        Statement { step, sql }
    }
}

/// Allow-list check for every identifier interpolated into statement
/// text: ASCII alphanumerics and underscores, not starting with a digit.
pub fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if !valid {
        return Err(OperatorError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

/// Splits the free-text join-key parameter on runs of spaces and commas.
/// Empty tokens from consecutive separators are dropped; an input with
/// no usable column names is rejected here rather than producing a
/// degenerate predicate.
pub fn parse_join_key(raw: &str) -> Result<Vec<String>> {
    let columns: Vec<String> = raw
        .split([' ', ','])
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    if columns.is_empty() {
        return Err(OperatorError::EmptyJoinKey);
    }
    for column in &columns {
        validate_identifier(column)?;
    }
    Ok(columns)
}

/// Source columns minus join-key columns, order preserved.
pub fn set_columns(source_columns: &[String], join_key: &[String]) -> Vec<String> {
    source_columns
        .iter()
        .filter(|column| !join_key.contains(column))
        .cloned()
        .collect()
}

/// Statements for the insert operator, in execution order:
/// optional truncate, the insert-select, optional analyze.
pub fn insert_statements(
    target: &TableRef,
    source: &TableRef,
    truncate: bool,
    analyze: bool,
) -> Vec<Statement> {
    let mut statements = Vec::new();

    if truncate {
        statements.push(Statement::new(
            STEP_TRUNCATE,
            format!("TRUNCATE TABLE {}", target.qualified()),
        ));
    }
    // no column list on either side: correspondence is positional, and a
    // mismatch surfaces as a native database error
    statements.push(Statement::new(
        STEP_INSERT,
        format!(
            "INSERT INTO {} SELECT * FROM {}",
            target.qualified(),
            source.qualified()
        ),
    ));
    if analyze {
        statements.push(Statement::new(
            STEP_ANALYZE,
            format!("ANALYZE {}", target.qualified()),
        ));
    }

    statements
}

/// Statements for the update operator: the UPDATE..SET..FROM..WHERE text
/// and an optional analyze.
///
/// The join predicate correlates on bare table names, so source and
/// target must resolve unqualified in the session's search path. When the
/// join key covers every source column the SET clause comes out empty and
/// the statement fails at execution with a native syntax error; that
/// degenerate shape is deliberate.
pub fn update_statements(
    target: &TableRef,
    source: &SourceBinding,
    join_key: &[String],
    analyze: bool,
) -> Vec<Statement> {
    let source_table = source.table().table();
    let target_table = target.table();

    let mut predicate = String::from("1=1");
    for key in join_key {
        predicate.push_str(&format!(
            " AND {}.{} = {}.{}",
            source_table, key, target_table, key
        ));
    }

    let set_clause = set_columns(source.columns(), join_key)
        .iter()
        .map(|column| format!("{} = {}.{}", column, source_table, column))
        .collect::<Vec<_>>()
        .join(" , ");

    let mut statements = vec![Statement::new(
        STEP_UPDATE,
        format!(
            "UPDATE {} SET {} FROM {} WHERE {}",
            target.qualified(),
            set_clause,
            source.table().qualified(),
            predicate
        ),
    )];
    if analyze {
        statements.push(Statement::new(
            STEP_ANALYZE,
            format!("ANALYZE {}", target.qualified()),
        ));
    }

    statements
}
