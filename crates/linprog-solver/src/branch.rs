//! Depth-first branch-and-bound over simplex relaxations.

use std::time::Instant;

use crate::config::SolverConfig;
use crate::model::Model;
use crate::simplex::{RelaxationStatus, Simplex};
use crate::solution::{Solution, SolutionStatus, SolveStats, SolverWarning};

/// A subproblem: the model with tightened variable bounds.
#[derive(Debug, Clone)]
struct Node {
    id: usize,
    parent: Option<usize>,
    depth: usize,
    bounds: Vec<(f64, f64)>,
    /// Parent relaxation objective in minimization form; a lower bound for
    /// every solution in this subtree
    bound: f64,
}

/// Best integral solution so far, objective in minimization form.
struct Incumbent {
    key: f64,
    values: Vec<f64>,
}

pub(crate) struct BranchAndBound<'a> {
    model: &'a Model,
    config: &'a SolverConfig,
    simplex: Simplex,
}

impl<'a> BranchAndBound<'a> {
    pub fn new(model: &'a Model, config: &'a SolverConfig) -> Self {
        Self {
            model,
            config,
            simplex: Simplex::new(config),
        }
    }

    pub fn run(&self) -> Solution {
        let started = Instant::now();
        let sign = self.model.objective().sense.sign();
        let int_tol = self.config.integer_tolerance();
        let integral_objective = has_integral_objective(self.model);
        // Lower bound on any solution below a node with relaxed value `key`
        let bound_of = |key: f64| if integral_objective { (key - int_tol).ceil() } else { key };

        let mut stats = SolveStats::default();
        let mut incumbent: Option<Incumbent> = None;
        let mut cutoff = false;
        let mut incomplete = false;
        let mut next_id = 1;

        let root = Node {
            id: 0,
            parent: None,
            depth: 0,
            bounds: self.model.variables().iter().map(|v| v.relaxed_bounds()).collect(),
            bound: f64::NEG_INFINITY,
        };
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            if let Some(max) = self.config.max_nodes
                && stats.nodes >= max
            {
                tracing::warn!(component = "branch", nodes = stats.nodes, "Node limit reached");
                stats.warnings.push(SolverWarning::NodeLimit { nodes: stats.nodes });
                cutoff = true;
                break;
            }
            if let Some(limit) = self.config.time_limit
                && started.elapsed() >= limit
            {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                tracing::warn!(component = "branch", elapsed_ms, "Time limit reached");
                stats.warnings.push(SolverWarning::TimeLimit { elapsed_ms });
                cutoff = true;
                break;
            }

            if let Some(best) = &incumbent
                && bound_of(node.bound) >= best.key - prune_tolerance(best.key)
            {
                continue;
            }

            let relaxation = self.simplex.solve(self.model, &node.bounds);
            stats.nodes += 1;
            stats.simplex_iterations += relaxation.iterations;
            stats.warnings.extend(relaxation.warnings);

            tracing::trace!(
                component = "branch",
                node = node.id,
                parent = ?node.parent,
                depth = node.depth,
                status = ?relaxation.status,
                "Node relaxation solved"
            );

            match relaxation.status {
                RelaxationStatus::Optimal => {}
                RelaxationStatus::Infeasible => {
                    if node.parent.is_none() {
                        return Solution::without_values(self.model, SolutionStatus::Infeasible, stats);
                    }
                    continue;
                }
                RelaxationStatus::Unbounded => {
                    return Solution::without_values(self.model, SolutionStatus::Unbounded, stats);
                }
                RelaxationStatus::IterationLimit => {
                    if node.parent.is_none() {
                        return Solution::without_values(self.model, SolutionStatus::NotSolved, stats);
                    }
                    incomplete = true;
                    continue;
                }
            }

            if node.parent.is_none() {
                stats.root_bound = Some(relaxation.objective);
            }
            let key = sign * relaxation.objective;
            if let Some(best) = &incumbent
                && bound_of(key) >= best.key - prune_tolerance(best.key)
            {
                continue;
            }

            let Some((var, value)) = self.branching_variable(&relaxation.values, int_tol) else {
                tracing::debug!(
                    component = "branch",
                    node = node.id,
                    objective = relaxation.objective,
                    "New incumbent"
                );
                incumbent = Some(Incumbent {
                    key,
                    values: relaxation.values,
                });
                continue;
            };

            let (lower, upper) = node.bounds[var];
            let up = Node {
                id: next_id,
                parent: Some(node.id),
                depth: node.depth + 1,
                bounds: with_bounds(&node.bounds, var, (value.ceil(), upper)),
                bound: key,
            };
            let down = Node {
                id: next_id + 1,
                parent: Some(node.id),
                depth: node.depth + 1,
                bounds: with_bounds(&node.bounds, var, (lower, value.floor())),
                bound: key,
            };
            next_id += 2;

            // The down branch is explored first
            if up.bounds[var].0 <= upper {
                stack.push(up);
            }
            if lower <= down.bounds[var].1 {
                stack.push(down);
            }
        }

        match incumbent {
            Some(best) => {
                let status = if cutoff || incomplete {
                    SolutionStatus::Suboptimal
                } else {
                    SolutionStatus::Optimal
                };
                Solution::report(self.model, status, &best.values, stats)
            }
            None if cutoff || incomplete => Solution::without_values(self.model, SolutionStatus::NotSolved, stats),
            None => Solution::without_values(self.model, SolutionStatus::Infeasible, stats),
        }
    }

    /// The integral variable farthest from an integer; lowest index on ties.
    fn branching_variable(&self, values: &[f64], int_tol: f64) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64, f64)> = None;
        for (i, (var, &v)) in self.model.variables().iter().zip(values).enumerate() {
            if !var.domain.is_integral() {
                continue;
            }
            let frac = (v - v.floor()).min(v.ceil() - v);
            if frac > int_tol && best.is_none_or(|(_, _, f)| frac > f) {
                best = Some((i, v, frac));
            }
        }
        best.map(|(i, v, _)| (i, v))
    }
}

/// Whether every solution has an integer objective value, so relaxation
/// bounds can be rounded up before pruning.
fn has_integral_objective(model: &Model) -> bool {
    let expr = &model.objective().expr;
    let variables = model.variables();
    expr.constant().fract() == 0.0
        && expr
            .terms()
            .iter()
            .all(|&(var, a)| a.fract() == 0.0 && variables[var.index()].domain.is_integral())
}

fn with_bounds(bounds: &[(f64, f64)], var: usize, new: (f64, f64)) -> Vec<(f64, f64)> {
    let mut bounds = bounds.to_vec();
    bounds[var] = new;
    bounds
}

fn prune_tolerance(best: f64) -> f64 {
    1e-9 * (1.0 + best.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConstraintOp, LinearExpr};
    use std::time::Duration;

    fn run(model: &Model, config: &SolverConfig) -> Solution {
        BranchAndBound::new(model, config).run()
    }

    /// max 5x + 4y, 6x + 4y <= 24, x + 2y <= 6, x, y integer.
    /// LP optimum (3, 1.5) = 21; integer optimum (4, 0) = 20.
    fn small_mip() -> Model {
        let mut model = Model::new("small");
        let x = model.integer("x").unwrap();
        let y = model.integer("y").unwrap();
        model.maximize(LinearExpr::term(x, 5.0).with_term(y, 4.0)).unwrap();
        model
            .add_constraint(LinearExpr::term(x, 6.0).with_term(y, 4.0), ConstraintOp::Le, 24.0, None)
            .unwrap();
        model
            .add_constraint(LinearExpr::term(x, 1.0).with_term(y, 2.0), ConstraintOp::Le, 6.0, None)
            .unwrap();
        model
    }

    #[test]
    fn finds_integer_optimum() {
        let model = small_mip();
        let solution = run(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!(solution.objective_value, Some(20.0));
        assert_eq!(solution.values, vec![4.0, 0.0]);
        assert!(solution.stats.nodes > 1);
    }

    #[test]
    fn continuous_model_needs_one_node() {
        let mut model = Model::new("lp");
        let x = model.continuous("x").unwrap();
        model.maximize(LinearExpr::term(x, 1.0)).unwrap();
        model
            .add_constraint(LinearExpr::term(x, 2.0), ConstraintOp::Le, 5.0, None)
            .unwrap();

        let solution = run(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!(solution.values, vec![2.5]);
        assert_eq!(solution.stats.nodes, 1);
    }

    #[test]
    fn integer_infeasible_with_feasible_relaxation() {
        // 2x = 3 has the relaxed solution 1.5 and no integer solution
        let mut model = Model::new("odd");
        let x = model.integer("x").unwrap();
        model.minimize(LinearExpr::term(x, 1.0)).unwrap();
        model
            .add_constraint(LinearExpr::term(x, 2.0), ConstraintOp::Eq, 3.0, None)
            .unwrap();

        let solution = run(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert!(solution.values.is_empty());
        assert_eq!(solution.stats.nodes, 3);
    }

    #[test]
    fn node_limit_without_incumbent_is_not_solved() {
        let model = small_mip();
        let solution = run(&model, &SolverConfig::new().with_max_nodes(1));
        assert_eq!(solution.status, SolutionStatus::NotSolved);
        assert_eq!(solution.stats.nodes, 1);
        assert!(solution
            .stats
            .warnings
            .contains(&SolverWarning::NodeLimit { nodes: 1 }));
    }

    #[test]
    fn node_limit_with_incumbent_is_suboptimal() {
        let mut model = Model::new("suboptimal");
        let x = model.integer("x").unwrap();
        model.maximize(LinearExpr::term(x, 1.0)).unwrap();
        model
            .add_constraint(LinearExpr::term(x, 2.0), ConstraintOp::Le, 7.0, None)
            .unwrap();

        // Root 3.5 -> down child x <= 3 is integral (incumbent), up child
        // x >= 4 is left on the stack when the limit hits.
        let solution = run(&model, &SolverConfig::new().with_max_nodes(2));
        assert_eq!(solution.status, SolutionStatus::Suboptimal);
        assert_eq!(solution.values, vec![3.0]);
    }

    #[test]
    fn zero_time_limit_stops_before_the_root() {
        let model = small_mip();
        let solution = run(&model, &SolverConfig::new().with_time_limit(Duration::ZERO));
        assert_eq!(solution.status, SolutionStatus::NotSolved);
        assert_eq!(solution.stats.nodes, 0);
        assert!(matches!(
            solution.stats.warnings[..],
            [SolverWarning::TimeLimit { .. }]
        ));
    }

    #[test]
    fn integral_objective_detection() {
        let mut model = Model::new("objective");
        let n = model.integer("n").unwrap();
        let x = model.continuous("x").unwrap();

        model.minimize(LinearExpr::term(n, 3.0).with_constant(2.0)).unwrap();
        assert!(has_integral_objective(&model));

        model.minimize(LinearExpr::term(n, 1.5)).unwrap();
        assert!(!has_integral_objective(&model));

        model.minimize(LinearExpr::term(n, 1.0).with_term(x, 1.0)).unwrap();
        assert!(!has_integral_objective(&model));
    }

    #[test]
    fn most_fractional_variable_is_chosen() {
        let mut model = Model::new("frac");
        model.integer("a").unwrap();
        model.integer("b").unwrap();
        model.integer("c").unwrap();
        model.continuous("d").unwrap();
        let config = SolverConfig::default();
        let bb = BranchAndBound::new(&model, &config);

        assert_eq!(bb.branching_variable(&[1.2, 2.5, 3.5, 0.5], 1e-6), Some((1, 2.5)));
        assert_eq!(bb.branching_variable(&[1.0, 2.0, 3.0000001, 0.5], 1e-6), None);
    }
}
