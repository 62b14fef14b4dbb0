//! Named string parameters as delivered by the host's parameter layer.
//! The host validates types and required-ness in its UI; this layer
//! re-checks what the builders depend on.

use std::collections::HashMap;

use crate::errors::*;

pub const TARGET_SCHEMA: &str = "Target Schema";
pub const TARGET_TABLE: &str = "Target Table";
pub const TRUNCATE_BEFORE_INSERT: &str = "Truncate Before Insert";
pub const JOIN_KEY: &str = "Join Key (ex: col1,col2)";
pub const ANALYZE_AFTER_INSERT: &str = "Analyze After Insert";

#[derive(Clone, Debug, Default)]
pub struct Parameters {
    values: HashMap<String, String>,
}

impl Parameters {
    pub fn new() -> Self {
        Parameters::default()
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    /// Required string parameter; missing or blank values abort the run.
    pub fn required(&self, name: &str) -> Result<&str> {
        match self.values.get(name).map(String::as_str) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(OperatorError::MissingParameter(name.to_string())),
        }
    }

    /// Boolean flag delivered as the literal "true" or "false".
    /// Omitted flags default to false, matching the host's declared
    /// parameter defaults.
    pub fn flag(&self, name: &str) -> Result<bool> {
        match self.values.get(name).map(String::as_str) {
            None => Ok(false),
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(other) => Err(OperatorError::InvalidParameter(
                name.to_string(),
                other.to_string(),
            )),
        }
    }
}

impl FromIterator<(String, String)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Parameters {
            values: iter.into_iter().collect(),
        }
    }
}
