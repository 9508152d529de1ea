use thiserror::Error;

/// A required field was left blank at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
}

/// A field update that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{field}` expects a number, got `{value}`")]
    InvalidNumber { field: &'static str, value: String },
}
