//! End-to-end runs of both operators against the scripted mock session.

use gpmover::catalog::{SourceBinding, TableRef};
use gpmover::connection::mock::MockConnection;
use gpmover::errors::OperatorError;
use gpmover::execution::executor::{Executor, InsertInto, UpdateFrom};
use gpmover::params::{self, Parameters};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn source_binding() -> SourceBinding {
    let table = TableRef::new("staging", "sales_load").unwrap();
    SourceBinding::new(
        table,
        vec!["id".to_string(), "qty".to_string(), "price".to_string()],
    )
    .unwrap()
}

fn base_parameters() -> Parameters {
    let mut parameters = Parameters::new();
    parameters.set(params::TARGET_SCHEMA, "public");
    parameters.set(params::TARGET_TABLE, "sales");
    parameters
}

#[test]
fn insert_with_truncate_and_analyze_ledger() {
    init_tracing();
    let mut conn = MockConnection::new()
        .with_table("public", "sales", 100)
        .with_table("staging", "sales_load", 25);

    let mut parameters = base_parameters();
    parameters.set(params::TRUNCATE_BEFORE_INSERT, "true");
    parameters.set(params::ANALYZE_AFTER_INSERT, "true");

    let operator = InsertInto::from_parameters(&source_binding(), &parameters).unwrap();
    let outcome = operator.execute(&mut conn).unwrap();

    assert_eq!(outcome.column_names(), ["Step", "Result"]);
    assert_eq!(
        outcome.rows(),
        [
            vec!["Target Exists".to_string(), "true".to_string()],
            vec!["Truncate Target".to_string(), "0".to_string()],
            vec!["Insert Into".to_string(), "25".to_string()],
            vec!["Analyze Target".to_string(), "0".to_string()],
        ]
    );
    assert_eq!(conn.rows("public", "sales"), 25);
    assert_eq!(conn.commits, 3);
}

#[test]
fn missing_target_fails_naming_the_fqn() {
    init_tracing();
    let mut conn = MockConnection::new().with_table("staging", "sales_load", 25);

    let operator = InsertInto::from_parameters(&source_binding(), &base_parameters()).unwrap();
    let err = operator.execute(&mut conn).unwrap_err();

    match err {
        OperatorError::TargetNotFound(fqn) => assert_eq!(fqn, "public.sales"),
        other => panic!("unexpected error: {other}"),
    }
    // the run never issued a mutating statement
    assert!(conn.executed.is_empty());
    assert_eq!(conn.commits, 0);
}

#[test]
fn update_from_ledger() {
    init_tracing();
    let mut conn = MockConnection::new()
        .with_table("public", "sales", 100)
        .with_table("staging", "sales_load", 25);

    let mut parameters = base_parameters();
    parameters.set(params::JOIN_KEY, "id");
    parameters.set(params::ANALYZE_AFTER_INSERT, "false");

    let operator = UpdateFrom::from_parameters(&source_binding(), &parameters).unwrap();
    let outcome = operator.execute(&mut conn).unwrap();

    assert_eq!(
        outcome.rows(),
        [
            vec!["Target Exists".to_string(), "true".to_string()],
            vec!["Update FROM".to_string(), "25".to_string()],
        ]
    );
    assert_eq!(
        conn.executed,
        ["UPDATE public.sales SET qty = sales_load.qty , price = sales_load.price \
          FROM staging.sales_load WHERE 1=1 AND sales_load.id = sales.id"]
    );
}

#[test]
fn failed_insert_keeps_committed_truncate() {
    init_tracing();
    let mut conn = MockConnection::new()
        .with_table("public", "sales", 100)
        .with_table("staging", "sales_load", 25)
        .fail_on("INSERT INTO");

    let mut parameters = base_parameters();
    parameters.set(params::TRUNCATE_BEFORE_INSERT, "true");

    let operator = InsertInto::from_parameters(&source_binding(), &parameters).unwrap();
    let err = operator.execute(&mut conn).unwrap_err();

    assert!(matches!(err, OperatorError::StepFailed { ref step, .. } if step == "Insert Into"));
    // no rollback of the committed truncate, and no ledger is produced
    assert_eq!(conn.rows("public", "sales"), 0);
    assert_eq!(conn.commits, 1);
}
