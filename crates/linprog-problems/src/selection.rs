//! Selection exercises: 0/1 knapsack, cutting patterns and maximum clique.

use linprog_solver::{ConstraintOp, LinearExpr, Model};

use crate::error::{ProblemError, check_len};

/// Most valuable subset of items within a weight capacity.
///
/// Variables: `x_<i>` binary, items indexed from zero.
/// Constraints: `capacity`.
#[derive(Debug, Clone, PartialEq)]
pub struct Knapsack {
    pub values: Vec<f64>,
    pub weights: Vec<f64>,
    pub capacity: f64,
}

impl Knapsack {
    pub fn model(&self) -> Result<Model, ProblemError> {
        check_len("weights", self.values.len(), self.weights.len())?;

        let mut model = Model::new("knapsack");
        let take = (0..self.values.len())
            .map(|i| model.binary(format!("x_{i}")))
            .collect::<Result<Vec<_>, _>>()?;

        model.maximize(take.iter().copied().zip(self.values.iter().copied()).collect())?;
        model.add_constraint(
            take.iter().copied().zip(self.weights.iter().copied()).collect(),
            ConstraintOp::Le,
            self.capacity,
            Some("capacity"),
        )?;

        Ok(model)
    }
}

/// A product cut from the shared material.
#[derive(Debug, Clone, PartialEq)]
pub struct CutProduct {
    pub name: String,
    pub material: f64,
    pub profit: f64,
}

impl CutProduct {
    pub fn new(name: &str, material: f64, profit: f64) -> Self {
        Self {
            name: name.to_string(),
            material,
            profit,
        }
    }
}

/// Whole units of each product to cut from a material budget.
///
/// Variables: `x_<product>` integer.
/// Constraints: `material`.
#[derive(Debug, Clone, PartialEq)]
pub struct CuttingPatterns {
    pub products: Vec<CutProduct>,
    pub material: f64,
}

impl CuttingPatterns {
    pub fn model(&self) -> Result<Model, ProblemError> {
        let mut model = Model::new("cutting-patterns");
        let units = self
            .products
            .iter()
            .map(|p| model.integer(format!("x_{}", p.name)))
            .collect::<Result<Vec<_>, _>>()?;

        model.maximize(units.iter().zip(&self.products).map(|(&x, p)| (x, p.profit)).collect())?;
        model.add_constraint(
            units.iter().zip(&self.products).map(|(&x, p)| (x, p.material)).collect(),
            ConstraintOp::Le,
            self.material,
            Some("material"),
        )?;

        Ok(model)
    }
}

/// Largest set of pairwise adjacent vertices in an undirected graph.
///
/// Variables: `x_<vertex>` binary.
/// Constraints: `exclude_<u>_<v>` for every non-adjacent pair, at most one of
/// the two may be chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxClique {
    pub vertices: Vec<String>,
    pub edges: Vec<(String, String)>,
}

impl MaxClique {
    pub fn adjacent(&self, u: &str, v: &str) -> bool {
        self.edges
            .iter()
            .any(|(a, b)| (a == u && b == v) || (a == v && b == u))
    }

    pub fn model(&self) -> Result<Model, ProblemError> {
        let mut model = Model::new("max-clique");
        let pick = self
            .vertices
            .iter()
            .map(|v| model.binary(format!("x_{v}")))
            .collect::<Result<Vec<_>, _>>()?;

        model.maximize(LinearExpr::sum(pick.iter().copied()))?;

        for (i, u) in self.vertices.iter().enumerate() {
            for (j, v) in self.vertices.iter().enumerate().skip(i + 1) {
                if self.adjacent(u, v) {
                    continue;
                }
                model.add_constraint(
                    LinearExpr::sum([pick[i], pick[j]]),
                    ConstraintOp::Le,
                    1.0,
                    Some(&format!("exclude_{u}_{v}")),
                )?;
            }
        }

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linprog_solver::{SolutionStatus, solve};

    #[test]
    fn knapsack_second_instance() {
        let knapsack = Knapsack {
            values: vec![90.0, 20.0, 60.0, 40.0, 30.0],
            weights: vec![15.0, 5.0, 10.0, 8.0, 6.0],
            capacity: 25.0,
        };
        let solution = solve(&knapsack.model().unwrap());

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!(solution.objective_value, Some(150.0));
        let weight: f64 = solution.values.iter().zip(&knapsack.weights).map(|(x, w)| x * w).sum();
        assert!(weight <= 25.0);
    }

    #[test]
    fn knapsack_length_mismatch() {
        let knapsack = Knapsack {
            values: vec![1.0, 2.0],
            weights: vec![1.0],
            capacity: 1.0,
        };
        assert!(matches!(
            knapsack.model(),
            Err(ProblemError::Shape { what: "weights", expected: 2, found: 1 })
        ));
    }

    #[test]
    fn patterns_favor_best_ratio() {
        let patterns = CuttingPatterns {
            products: vec![
                CutProduct::new("small", 2.0, 1.0),
                CutProduct::new("medium", 3.0, 2.0),
                CutProduct::new("large", 5.0, 4.0),
            ],
            material: 1000.0,
        };
        let solution = solve(&patterns.model().unwrap());

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!(solution.objective_value, Some(800.0));
        assert_eq!(solution.value_of("x_large"), Some(200.0));
    }

    #[test]
    fn clique_excludes_non_adjacent_pairs() {
        let edge = |u: &str, v: &str| (u.to_string(), v.to_string());
        let clique = MaxClique {
            vertices: ["A", "B", "C", "D"].map(String::from).to_vec(),
            edges: vec![edge("A", "B"), edge("B", "C"), edge("C", "D"), edge("A", "C")],
        };
        let model = clique.model().unwrap();
        // A-D and B-D are the only non-edges
        assert_eq!(model.num_constraints(), 2);

        let solution = solve(&model);
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!(solution.objective_value, Some(3.0));
        assert_eq!(solution.value_of("x_D"), Some(0.0));
    }
}
