pub mod executor;

use serde::Serialize;

use crate::sql::STEP_TARGET_EXISTS;

/// One entry of the step ledger: the step's display name and its result,
/// a row count for mutating steps and a boolean for the existence check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepResult {
    pub step: String,
    pub result: String,
}

impl StepResult {
    pub fn new(step: &str, result: impl ToString) -> Self {
        StepResult {
            step: step.to_string(),
            result: result.to_string(),
        }
    }

    pub(crate) fn target_exists() -> Self {
        StepResult::new(STEP_TARGET_EXISTS, "true")
    }
}

/// The run's output artifact: a fixed two-column text table with one row
/// per executed step, handed to the host's result-reporting facility.
/// Built once after all steps complete; a failed run produces none.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    title: String,
    column_names: Vec<String>,
    column_types: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RunOutcome {
    pub(crate) fn from_ledger(title: &str, ledger: Vec<StepResult>) -> Self {
        RunOutcome {
            title: title.to_string(),
            column_names: vec!["Step".to_string(), "Result".to_string()],
            column_types: vec!["text".to_string(), "text".to_string()],
            rows: ledger
                .into_iter()
                .map(|entry| vec![entry.step, entry.result])
                .collect(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn column_types(&self) -> &[String] {
        &self.column_types
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn outcome_preserves_ledger_order() {
        let ledger = vec![
            StepResult::target_exists(),
            StepResult::new("Insert Into", 42u64),
        ];
        let outcome = RunOutcome::from_ledger("Greenplum Insert Result", ledger);

        assert_eq!(outcome.column_names(), ["Step", "Result"]);
        assert_eq!(outcome.column_types(), ["text", "text"]);
        assert_eq!(
            outcome.rows(),
            [
                vec!["Target Exists".to_string(), "true".to_string()],
                vec!["Insert Into".to_string(), "42".to_string()],
            ]
        );
    }
}
