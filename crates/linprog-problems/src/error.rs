use linprog_solver::ModelError;
use thiserror::Error;

/// Errors raised while turning exercise parameters into a model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("[PARAMETER_SHAPE] {what}: expected {expected} entries, got {found}")]
    Shape {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("[PARAMETER_UNKNOWN_NODE] Node '{0}' is not part of the network")]
    UnknownNode(String),
}

impl ProblemError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ProblemError::Model(err) => err.code(),
            ProblemError::Shape { .. } => "PARAMETER_SHAPE",
            ProblemError::UnknownNode(_) => "PARAMETER_UNKNOWN_NODE",
        }
    }
}

/// Errors raised by the example catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("[SCENARIO_UNKNOWN] No scenario named '{0}'")]
    UnknownScenario(String),
}

impl CatalogError {
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::UnknownScenario(_) => "SCENARIO_UNKNOWN",
        }
    }
}

/// Fails with [`ProblemError::Shape`] unless `found == expected`.
pub(crate) fn check_len(what: &'static str, expected: usize, found: usize) -> Result<(), ProblemError> {
    if expected == found {
        Ok(())
    } else {
        Err(ProblemError::Shape { what, expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_keep_their_code() {
        let err = ProblemError::from(ModelError::DuplicateName("x".into()));
        assert_eq!(err.code(), "VARIABLE_DUPLICATE_NAME");
        assert!(err.to_string().starts_with("[VARIABLE_DUPLICATE_NAME]"));
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let err = check_len("weights", 3, 2).unwrap_err();
        assert_eq!(err.code(), "PARAMETER_SHAPE");
        assert_eq!(err.to_string(), "[PARAMETER_SHAPE] weights: expected 3 entries, got 2");
        assert!(check_len("weights", 2, 2).is_ok());
    }

    #[test]
    fn unknown_scenario_message() {
        let err = CatalogError::UnknownScenario("nope".into());
        assert_eq!(err.to_string(), "[SCENARIO_UNKNOWN] No scenario named 'nope'");
        assert_eq!(err.code(), "SCENARIO_UNKNOWN");
    }
}
