use std::time::Duration;

use crate::branch::BranchAndBound;
use crate::config::SolverConfig;
use crate::model::Model;
use crate::simplex::{RelaxationStatus, Simplex};
use crate::solution::{Solution, SolutionStatus, SolveStats};

/// Entry point for solving linear and mixed-integer models
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = Some(max);
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.config.tolerance = Some(tol);
        self
    }

    pub fn with_integrality_tolerance(mut self, tol: f64) -> Self {
        self.config.integrality_tolerance = Some(tol);
        self
    }

    pub fn with_max_nodes(mut self, max: usize) -> Self {
        self.config.max_nodes = Some(max);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.config.time_limit = Some(limit);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve the model, enforcing integrality by branch-and-bound.
    ///
    /// Continuous models finish at the root node. The model is not modified,
    /// so solving the same model twice gives the same result.
    pub fn solve(&self, model: &Model) -> Solution {
        tracing::debug!(
            component = "solver",
            model = model.name(),
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            integral = model.num_integral(),
            "Solving model"
        );

        let solution = BranchAndBound::new(model, &self.config).run();

        tracing::debug!(
            component = "solver",
            model = model.name(),
            status = %solution.status,
            objective = ?solution.objective_value,
            nodes = solution.stats.nodes,
            iterations = solution.stats.simplex_iterations,
            "Solve finished"
        );
        solution
    }

    /// Solve the continuous relaxation only, ignoring integrality.
    ///
    /// Values are reported as-is, without rounding integral variables.
    pub fn solve_relaxation(&self, model: &Model) -> Solution {
        let bounds: Vec<(f64, f64)> = model.variables().iter().map(|v| (v.lower, v.upper)).collect();
        let relaxation = Simplex::new(&self.config).solve(model, &bounds);
        let stats = SolveStats {
            nodes: 1,
            simplex_iterations: relaxation.iterations,
            root_bound: (relaxation.status == RelaxationStatus::Optimal).then_some(relaxation.objective),
            warnings: relaxation.warnings,
        };

        match relaxation.status {
            RelaxationStatus::Optimal => Solution::report_relaxation(model, &relaxation.values, stats),
            RelaxationStatus::Infeasible => Solution::without_values(model, SolutionStatus::Infeasible, stats),
            RelaxationStatus::Unbounded => Solution::without_values(model, SolutionStatus::Unbounded, stats),
            RelaxationStatus::IterationLimit => Solution::without_values(model, SolutionStatus::NotSolved, stats),
        }
    }
}

/// Solve `model` with the default configuration.
pub fn solve(model: &Model) -> Solution {
    Solver::new().solve(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConstraintOp, LinearExpr};
    use crate::solution::SolverWarning;

    fn knapsack() -> Model {
        // Values 60, 100, 120; weights 10, 20, 30; capacity 50
        let mut model = Model::new("knapsack");
        let items: Vec<_> = (0..3).map(|i| model.binary(format!("x_{i}")).unwrap()).collect();
        let value = [60.0, 100.0, 120.0];
        let weight = [10.0, 20.0, 30.0];
        model
            .maximize(items.iter().zip(value).map(|(&x, v)| (x, v)).collect())
            .unwrap();
        model
            .add_constraint(
                items.iter().zip(weight).map(|(&x, w)| (x, w)).collect(),
                ConstraintOp::Le,
                50.0,
                Some("capacity"),
            )
            .unwrap();
        model
    }

    #[test]
    fn solves_knapsack() {
        let model = knapsack();
        let solution = solve(&model);
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!(solution.objective_value, Some(220.0));
        assert_eq!(solution.values, vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn relaxation_is_fractional() {
        let model = knapsack();
        let solution = Solver::new().solve_relaxation(&model);
        assert_eq!(solution.status, SolutionStatus::Optimal);
        let objective = solution.objective_value.unwrap();
        assert!((objective - 240.0).abs() < 1e-6, "objective = {objective}");
        assert_eq!(solution.variables, vec!["x_0", "x_1", "x_2"]);
        assert_eq!(solution.stats.nodes, 1);
    }

    #[test]
    fn solving_twice_is_identical() {
        let model = knapsack();
        let solver = Solver::new();
        assert_eq!(solver.solve(&model), solver.solve(&model));
    }

    #[test]
    fn iteration_limit_at_root_is_not_solved() {
        let model = knapsack();
        let solution = Solver::new().with_max_iterations(0).solve(&model);
        assert_eq!(solution.status, SolutionStatus::NotSolved);
        assert!(solution
            .stats
            .warnings
            .contains(&SolverWarning::IterationLimit { iterations: 0 }));
    }

    #[test]
    fn builder_fills_config() {
        let solver = Solver::new()
            .with_max_iterations(5)
            .with_tolerance(1e-8)
            .with_integrality_tolerance(1e-5)
            .with_max_nodes(7)
            .with_time_limit(Duration::from_secs(1));
        let config = solver.config();
        assert_eq!(config.iteration_limit(), 5);
        assert_eq!(config.zero_tolerance(), 1e-8);
        assert_eq!(config.integer_tolerance(), 1e-5);
        assert_eq!(config.max_nodes, Some(7));
        assert_eq!(config.time_limit, Some(Duration::from_secs(1)));
        assert_eq!(Solver::with_config(config.clone()).config(), config);
    }

    #[test]
    fn empty_model_is_optimal() {
        let model = Model::new("empty");
        let solution = solve(&model);
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!(solution.objective_value, Some(0.0));
        assert!(solution.values.is_empty());
    }
}
