//! Solver configuration.

use std::time::Duration;

pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;
pub const DEFAULT_TOLERANCE: f64 = 1e-9;
pub const DEFAULT_INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// Configuration options for solver behavior.
///
/// Every field is optional; `None` means the solver default. Node and time
/// limits only apply to branch-and-bound and are off by default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverConfig {
    /// Simplex pivots allowed per relaxation (both phases together).
    pub max_iterations: Option<usize>,
    /// Magnitude below which a value counts as zero in pivoting tests.
    pub tolerance: Option<f64>,
    /// Distance from the nearest integer accepted as integral.
    pub integrality_tolerance: Option<f64>,
    /// Branch-and-bound nodes to evaluate before giving up.
    pub max_nodes: Option<usize>,
    /// Wall-clock budget for branch-and-bound.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = Some(tol);
        self
    }

    pub fn with_integrality_tolerance(mut self, tol: f64) -> Self {
        self.integrality_tolerance = Some(tol);
        self
    }

    pub fn with_max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = Some(max);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn iteration_limit(&self) -> usize {
        self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS)
    }

    pub fn zero_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }

    pub fn integer_tolerance(&self) -> f64 {
        self.integrality_tolerance.unwrap_or(DEFAULT_INTEGRALITY_TOLERANCE)
    }

    /// Check if this configuration is completely empty (all defaults).
    pub fn is_empty(&self) -> bool {
        self.max_iterations.is_none()
            && self.tolerance.is_none()
            && self.integrality_tolerance.is_none()
            && self.max_nodes.is_none()
            && self.time_limit.is_none()
    }
}
