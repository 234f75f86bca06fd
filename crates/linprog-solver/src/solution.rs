use std::fmt;

use crate::model::{ConstraintOp, Model, VarId};

/// Slack magnitude under which a constraint is reported as binding.
const BINDING_TOLERANCE: f64 = 1e-6;
/// Continuous values this close to zero are reported as exactly zero.
const ZERO_CLEANUP: f64 = 1e-9;

/// The result of solving a model
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: SolutionStatus,
    /// Variable names in declaration order
    pub variables: Vec<String>,
    /// Value per variable, parallel to `variables`; empty when there is no solution
    pub values: Vec<f64>,
    /// Objective value, constant term included
    pub objective_value: Option<f64>,
    /// Activity of each constraint at `values`; empty when there is no solution
    pub constraints: Vec<ConstraintActivity>,
    pub stats: SolveStats,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// A node or time limit stopped the search; values are the best integral solution found
    Suboptimal,
    /// The problem is infeasible (no solution exists)
    Infeasible,
    /// The problem is unbounded
    Unbounded,
    /// The solver stopped before reaching any conclusion
    NotSolved,
}

impl SolutionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SolutionStatus::Optimal => "optimal",
            SolutionStatus::Suboptimal => "suboptimal",
            SolutionStatus::Infeasible => "infeasible",
            SolutionStatus::Unbounded => "unbounded",
            SolutionStatus::NotSolved => "not-solved",
        }
    }

    /// Whether a solution with this status carries variable values.
    pub fn has_solution(self) -> bool {
        matches!(self, SolutionStatus::Optimal | SolutionStatus::Suboptimal)
    }
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Left-hand side of a constraint evaluated at the reported solution.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintActivity {
    pub name: Option<String>,
    pub activity: f64,
    pub op: ConstraintOp,
    pub rhs: f64,
    /// Distance to the bound; negative when violated
    pub slack: f64,
    pub binding: bool,
}

/// Search effort and diagnostics gathered during a solve.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveStats {
    /// Branch-and-bound nodes whose relaxation was solved
    pub nodes: usize,
    /// Simplex pivots over all relaxations
    pub simplex_iterations: usize,
    /// Objective of the root relaxation as the simplex computed it; bounds
    /// every integral solution from above (maximize) or below (minimize)
    pub root_bound: Option<f64>,
    pub warnings: Vec<SolverWarning>,
}

/// Non-fatal conditions met while solving.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum SolverWarning {
    /// The ratio test kept producing degenerate or near-zero pivots
    NumericInstability { suspicious_pivots: usize },
    /// A relaxation hit the pivot limit
    IterationLimit { iterations: usize },
    /// Branch-and-bound stopped at the node limit
    NodeLimit { nodes: usize },
    /// Branch-and-bound stopped at the time limit
    TimeLimit { elapsed_ms: u64 },
}

impl fmt::Display for SolverWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverWarning::NumericInstability { suspicious_pivots } => write!(
                f,
                "possible degeneracy: {} consecutive degenerate or near-zero pivots",
                suspicious_pivots
            ),
            SolverWarning::IterationLimit { iterations } => {
                write!(f, "simplex stopped after {} pivots", iterations)
            }
            SolverWarning::NodeLimit { nodes } => {
                write!(f, "branch-and-bound stopped after {} nodes", nodes)
            }
            SolverWarning::TimeLimit { elapsed_ms } => {
                write!(f, "branch-and-bound stopped after {} ms", elapsed_ms)
            }
        }
    }
}

impl Solution {
    /// A solution record without values (infeasible, unbounded, not solved).
    pub(crate) fn without_values(model: &Model, status: SolutionStatus, stats: SolveStats) -> Self {
        Self {
            status,
            variables: variable_names(model),
            values: Vec::new(),
            objective_value: None,
            constraints: Vec::new(),
            stats,
        }
    }

    /// Build the caller-facing record from raw relaxation values.
    ///
    /// Integer and binary values are rounded to the nearest integer, tiny
    /// continuous values are snapped to zero, and the objective is evaluated
    /// on the reported values.
    pub(crate) fn report(model: &Model, status: SolutionStatus, raw: &[f64], stats: SolveStats) -> Self {
        let values = model
            .variables()
            .iter()
            .zip(raw)
            .map(|(var, &v)| if var.domain.is_integral() { v.round() + 0.0 } else { snap(v) })
            .collect();
        Self::with_values(model, status, values, stats)
    }

    /// Like [`Solution::report`], but integral variables keep their
    /// fractional relaxation values.
    pub(crate) fn report_relaxation(model: &Model, raw: &[f64], stats: SolveStats) -> Self {
        let values = raw.iter().map(|&v| snap(v)).collect();
        Self::with_values(model, SolutionStatus::Optimal, values, stats)
    }

    fn with_values(model: &Model, status: SolutionStatus, values: Vec<f64>, stats: SolveStats) -> Self {
        let objective_value = model.objective().expr.evaluate(&values);

        let constraints = model
            .constraints()
            .iter()
            .map(|c| {
                let activity = c.activity(&values);
                let slack = match c.op {
                    ConstraintOp::Le => c.rhs - activity,
                    ConstraintOp::Ge => activity - c.rhs,
                    ConstraintOp::Eq => -(activity - c.rhs).abs(),
                };
                ConstraintActivity {
                    name: c.name.clone(),
                    activity,
                    op: c.op,
                    rhs: c.rhs,
                    slack,
                    binding: slack.abs() <= BINDING_TOLERANCE,
                }
            })
            .collect();

        Self {
            status,
            variables: variable_names(model),
            values,
            objective_value: Some(objective_value),
            constraints,
            stats,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    pub fn has_solution(&self) -> bool {
        self.status.has_solution()
    }

    pub fn value(&self, var: VarId) -> Option<f64> {
        self.values.get(var.index()).copied()
    }

    pub fn value_of(&self, name: &str) -> Option<f64> {
        let index = self.variables.iter().position(|n| n == name)?;
        self.values.get(index).copied()
    }

    /// (name, value) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.variables
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Constraints whose slack is zero at the reported solution.
    pub fn binding_constraints(&self) -> impl Iterator<Item = &ConstraintActivity> + '_ {
        self.constraints.iter().filter(|c| c.binding)
    }
}

fn snap(v: f64) -> f64 {
    // Adding zero also normalizes -0.0
    if v.abs() < ZERO_CLEANUP { 0.0 } else { v + 0.0 }
}

fn variable_names(model: &Model) -> Vec<String> {
    model.variables().iter().map(|v| v.name.clone()).collect()
}
