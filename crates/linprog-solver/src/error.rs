use thiserror::Error;

use crate::model::VarId;

/// Errors raised while building a [`Model`](crate::Model).
///
/// Construction fails fast: the model is left exactly as it was before the
/// failing call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("[VARIABLE_DUPLICATE_NAME] Variable '{0}' is already registered")]
    DuplicateName(String),
    #[error("[VARIABLE_UNKNOWN] Variable {0} is not registered in this model")]
    UnknownVariable(VarId),
    #[error("[VARIABLE_INVALID_BOUNDS] Variable '{name}' has empty or invalid bounds [{lower}, {upper}]")]
    InvalidBounds { name: String, lower: f64, upper: f64 },
    #[error("[COEFFICIENT_NOT_FINITE] Coefficients, constants and right-hand sides must be finite (got {0})")]
    NonFiniteCoefficient(f64),
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::DuplicateName(_) => "VARIABLE_DUPLICATE_NAME",
            ModelError::UnknownVariable(_) => "VARIABLE_UNKNOWN",
            ModelError::InvalidBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            ModelError::NonFiniteCoefficient(_) => "COEFFICIENT_NOT_FINITE",
        }
    }
}
