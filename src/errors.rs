use crate::connection::ConnectionError;

pub type Result<T> = std::result::Result<T, OperatorError>;

#[derive(thiserror::Error, Debug)]
pub enum OperatorError {
    #[error("required parameter '{0}' is missing")]
    MissingParameter(String),
    #[error("parameter '{0}' has invalid value '{1}'")]
    InvalidParameter(String, String),
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),
    #[error("join key contains no usable column names")]
    EmptyJoinKey,
    #[error("target table '{0}' does not exist")]
    TargetNotFound(String),
    #[error("catalog lookup failed: {0}")]
    Catalog(
        #[source]
        #[from]
        ConnectionError,
    ),
    #[error("step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: ConnectionError,
    },
}
