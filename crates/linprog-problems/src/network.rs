//! Network exercises: transportation, maximum flow and assignment.

use std::collections::BTreeSet;

use linprog_solver::{ConstraintOp, LinearExpr, Model, VarId};

use crate::error::{ProblemError, check_len};

/// Ship goods from factories to depots at minimum cost.
///
/// Variables: `x_<factory>_<depot>`, continuous amount shipped.
/// Constraints: `supply_<factory>` (`<=`) and `demand_<depot>` (`>=`).
#[derive(Debug, Clone, PartialEq)]
pub struct Transport {
    pub factories: Vec<String>,
    pub depots: Vec<String>,
    pub supply: Vec<f64>,
    pub demand: Vec<f64>,
    /// `costs[f][d]`: unit cost from factory `f` to depot `d`
    pub costs: Vec<Vec<f64>>,
}

impl Transport {
    pub fn model(&self) -> Result<Model, ProblemError> {
        check_len("supply", self.factories.len(), self.supply.len())?;
        check_len("demand", self.depots.len(), self.demand.len())?;
        check_len("cost rows", self.factories.len(), self.costs.len())?;
        for row in &self.costs {
            check_len("cost columns", self.depots.len(), row.len())?;
        }

        let mut model = Model::new("transport");
        let mut ship: Vec<Vec<VarId>> = Vec::with_capacity(self.factories.len());
        for factory in &self.factories {
            let row = self
                .depots
                .iter()
                .map(|depot| model.continuous(format!("x_{factory}_{depot}")))
                .collect::<Result<Vec<_>, _>>()?;
            ship.push(row);
        }

        let cost = ship
            .iter()
            .zip(&self.costs)
            .flat_map(|(row, costs)| row.iter().copied().zip(costs.iter().copied()))
            .collect();
        model.minimize(cost)?;

        for ((factory, row), &supply) in self.factories.iter().zip(&ship).zip(&self.supply) {
            model.add_constraint(
                LinearExpr::sum(row.iter().copied()),
                ConstraintOp::Le,
                supply,
                Some(&format!("supply_{factory}")),
            )?;
        }
        for (d, (depot, &demand)) in self.depots.iter().zip(&self.demand).enumerate() {
            model.add_constraint(
                LinearExpr::sum(ship.iter().map(|row| row[d])),
                ConstraintOp::Ge,
                demand,
                Some(&format!("demand_{depot}")),
            )?;
        }

        Ok(model)
    }
}

/// A directed arc with a flow capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowArc {
    pub from: String,
    pub to: String,
    pub capacity: f64,
}

impl FlowArc {
    pub fn new(from: &str, to: &str, capacity: f64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            capacity,
        }
    }
}

/// Largest flow from `source` to `sink`.
///
/// Variables: `x_<from>_<to>` per arc, bounded by its capacity.
/// Constraints: `balance_<node>` equalities for every node except the source
/// and the sink. The objective is the net flow out of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxFlow {
    pub arcs: Vec<FlowArc>,
    pub source: String,
    pub sink: String,
}

impl MaxFlow {
    /// Every node touched by an arc, in name order.
    pub fn nodes(&self) -> BTreeSet<&str> {
        self.arcs
            .iter()
            .flat_map(|arc| [arc.from.as_str(), arc.to.as_str()])
            .collect()
    }

    pub fn model(&self) -> Result<Model, ProblemError> {
        let nodes = self.nodes();
        for terminal in [&self.source, &self.sink] {
            if !nodes.contains(terminal.as_str()) {
                return Err(ProblemError::UnknownNode(terminal.clone()));
            }
        }

        let mut model = Model::new("max-flow");
        let flow = self
            .arcs
            .iter()
            .map(|arc| model.bounded(format!("x_{}_{}", arc.from, arc.to), 0.0, arc.capacity))
            .collect::<Result<Vec<_>, _>>()?;

        model.maximize(self.net_outflow(&flow, &self.source))?;

        for node in nodes {
            if node == self.source || node == self.sink {
                continue;
            }
            model.add_constraint(
                self.net_outflow(&flow, node),
                ConstraintOp::Eq,
                0.0,
                Some(&format!("balance_{node}")),
            )?;
        }

        Ok(model)
    }

    /// Flow leaving `node` minus flow entering it.
    fn net_outflow(&self, flow: &[VarId], node: &str) -> LinearExpr {
        let mut expr = LinearExpr::new();
        for (arc, &x) in self.arcs.iter().zip(flow) {
            if arc.from == node {
                expr.add_term(x, 1.0);
            }
            if arc.to == node {
                expr.add_term(x, -1.0);
            }
        }
        expr
    }
}

/// Assign each agent to exactly one task at minimum total cost.
///
/// Variables: `x_<agent>_<task>` binary, indices from zero.
/// Constraints: `agent_<i>` and `task_<j>` equalities.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Square matrix, `costs[agent][task]`
    pub costs: Vec<Vec<f64>>,
}

impl Assignment {
    pub fn model(&self) -> Result<Model, ProblemError> {
        let n = self.costs.len();
        for row in &self.costs {
            check_len("assignment cost row", n, row.len())?;
        }

        let mut model = Model::new("assignment");
        let mut assign: Vec<Vec<VarId>> = Vec::with_capacity(n);
        for i in 0..n {
            let row = (0..n)
                .map(|j| model.binary(format!("x_{i}_{j}")))
                .collect::<Result<Vec<_>, _>>()?;
            assign.push(row);
        }

        let cost = assign
            .iter()
            .zip(&self.costs)
            .flat_map(|(row, costs)| row.iter().copied().zip(costs.iter().copied()))
            .collect();
        model.minimize(cost)?;

        for (i, row) in assign.iter().enumerate() {
            model.add_constraint(
                LinearExpr::sum(row.iter().copied()),
                ConstraintOp::Eq,
                1.0,
                Some(&format!("agent_{i}")),
            )?;
        }
        for j in 0..n {
            model.add_constraint(
                LinearExpr::sum(assign.iter().map(|row| row[j])),
                ConstraintOp::Eq,
                1.0,
                Some(&format!("task_{j}")),
            )?;
        }

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linprog_solver::{SolutionStatus, solve};

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn transport_balanced_instance() {
        let transport = Transport {
            factories: names(&["1", "2", "3"]),
            depots: names(&["1", "2", "3"]),
            supply: vec![120.0, 80.0, 80.0],
            demand: vec![70.0, 60.0, 150.0],
            costs: vec![vec![8.0, 5.0, 6.0], vec![15.0, 10.0, 12.0], vec![3.0, 9.0, 10.0]],
        };
        let solution = solve(&transport.model().unwrap());

        assert_eq!(solution.status, SolutionStatus::Optimal);
        // Supply equals demand, so every row is tight
        assert!(solution.constraints.iter().all(|c| c.binding), "{:?}", solution.constraints);
    }

    #[test]
    fn transport_short_supply_is_infeasible() {
        let transport = Transport {
            factories: names(&["a"]),
            depots: names(&["b"]),
            supply: vec![10.0],
            demand: vec![20.0],
            costs: vec![vec![1.0]],
        };
        assert_eq!(solve(&transport.model().unwrap()).status, SolutionStatus::Infeasible);
    }

    #[test]
    fn max_flow_small_network() {
        let flow = MaxFlow {
            arcs: vec![
                FlowArc::new("s", "a", 20.0),
                FlowArc::new("s", "b", 10.0),
                FlowArc::new("a", "b", 5.0),
                FlowArc::new("a", "t", 10.0),
                FlowArc::new("b", "t", 20.0),
            ],
            source: "s".into(),
            sink: "t".into(),
        };
        let model = flow.model().unwrap();
        assert_eq!(model.num_constraints(), 2);

        let solution = solve(&model);
        assert_eq!(solution.status, SolutionStatus::Optimal);
        let value = solution.objective_value.unwrap();
        assert!((value - 25.0).abs() < 1e-6, "flow = {value}");
    }

    #[test]
    fn max_flow_unknown_sink() {
        let flow = MaxFlow {
            arcs: vec![FlowArc::new("s", "a", 1.0)],
            source: "s".into(),
            sink: "t".into(),
        };
        assert_eq!(flow.model().unwrap_err(), ProblemError::UnknownNode("t".into()));
    }

    #[test]
    fn assignment_three_by_three() {
        let assignment = Assignment {
            costs: vec![vec![9.0, 2.0, 7.0], vec![6.0, 4.0, 3.0], vec![5.0, 8.0, 1.0]],
        };
        let solution = solve(&assignment.model().unwrap());

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!(solution.objective_value, Some(9.0));
        assert_eq!(solution.value_of("x_0_1"), Some(1.0));
        assert_eq!(solution.value_of("x_1_0"), Some(1.0));
        assert_eq!(solution.value_of("x_2_2"), Some(1.0));
    }

    #[test]
    fn assignment_requires_square_costs() {
        let assignment = Assignment {
            costs: vec![vec![1.0, 2.0], vec![3.0]],
        };
        assert_eq!(assignment.model().unwrap_err().code(), "PARAMETER_SHAPE");
    }
}
