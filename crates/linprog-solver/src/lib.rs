//! Linear and mixed-integer programming.
//!
//! Build a [`Model`], hand it to a [`Solver`] and read the [`Solution`]:
//! continuous models are solved with a two-phase simplex method, models with
//! integer or binary variables by depth-first branch-and-bound on top of it.

mod branch;
mod config;
mod error;
mod model;
mod simplex;
mod solution;
mod solver;

pub use config::SolverConfig;
pub use error::ModelError;
pub use model::{Constraint, ConstraintOp, Domain, LinearExpr, Model, Objective, Sense, VarId, Variable};
pub use solution::{ConstraintActivity, SolveStats, Solution, SolutionStatus, SolverWarning};
pub use solver::{Solver, solve};
