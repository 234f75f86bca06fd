//! Model builders for classic operations research exercises.
//!
//! Each exercise takes a plain parameter struct and returns a
//! [`linprog_solver::Model`] with predictable variable names, documented on
//! the struct. [`catalog()`] lists ready-made instances.

pub mod blending;
pub mod catalog;
pub mod coloring;
pub mod covering;
mod error;
pub mod location;
pub mod network;
pub mod selection;

pub use catalog::{Scenario, catalog, find};
pub use error::{CatalogError, ProblemError};
