//! Frequency assignment as minimum graph coloring.

use linprog_solver::{ConstraintOp, LinearExpr, Model, VarId};

use crate::error::ProblemError;

/// Give every transmitter (vertex) a frequency (color) so that interfering
/// transmitters (edges) differ, using as few frequencies as possible.
///
/// Variables: `x_<vertex>_<color>` binary (vertex uses color) and `y_<color>`
/// binary (color in use), colors numbered from zero.
///
/// Constraints:
/// - `assign_<vertex>`: exactly one color per vertex
/// - `conflict_<u>_<v>_<color>`: adjacent vertices never share a color
/// - `use_<vertex>_<color>`: `x <= y`
/// - `order_<color>`: `y_c >= y_(c+1)`, so used colors form a prefix
///
/// The first vertex is fixed to color zero. Together with the ordering rows
/// this removes color permutations without excluding any optimum.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyAssignment {
    pub vertices: Vec<String>,
    pub edges: Vec<(String, String)>,
    pub colors: usize,
}

impl FrequencyAssignment {
    pub fn model(&self) -> Result<Model, ProblemError> {
        let position = |name: &str| {
            self.vertices
                .iter()
                .position(|v| v == name)
                .ok_or_else(|| ProblemError::UnknownNode(name.to_string()))
        };
        let edges = self
            .edges
            .iter()
            .map(|(u, v)| Ok((position(u)?, position(v)?)))
            .collect::<Result<Vec<_>, ProblemError>>()?;

        let mut model = Model::new("frequency-assignment");
        let mut uses: Vec<Vec<VarId>> = Vec::with_capacity(self.vertices.len());
        for v in &self.vertices {
            let row = (0..self.colors)
                .map(|c| model.binary(format!("x_{v}_{c}")))
                .collect::<Result<Vec<_>, _>>()?;
            uses.push(row);
        }
        let used = (0..self.colors)
            .map(|c| model.binary(format!("y_{c}")))
            .collect::<Result<Vec<_>, _>>()?;

        model.minimize(LinearExpr::sum(used.iter().copied()))?;

        for (v, row) in self.vertices.iter().zip(&uses) {
            model.add_constraint(
                LinearExpr::sum(row.iter().copied()),
                ConstraintOp::Eq,
                1.0,
                Some(&format!("assign_{v}")),
            )?;
        }
        for &(u, v) in &edges {
            for c in 0..self.colors {
                model.add_constraint(
                    LinearExpr::sum([uses[u][c], uses[v][c]]),
                    ConstraintOp::Le,
                    1.0,
                    Some(&format!("conflict_{}_{}_{c}", self.vertices[u], self.vertices[v])),
                )?;
            }
        }
        for (v, row) in self.vertices.iter().zip(&uses) {
            for (c, (&x, &y)) in row.iter().zip(&used).enumerate() {
                model.add_constraint(
                    LinearExpr::term(x, 1.0).with_term(y, -1.0),
                    ConstraintOp::Le,
                    0.0,
                    Some(&format!("use_{v}_{c}")),
                )?;
            }
        }
        for (c, pair) in used.windows(2).enumerate() {
            model.add_constraint(
                LinearExpr::term(pair[0], 1.0).with_term(pair[1], -1.0),
                ConstraintOp::Ge,
                0.0,
                Some(&format!("order_{c}")),
            )?;
        }

        if let Some(&first) = uses.first().and_then(|row| row.first()) {
            model.set_bounds(first, 1.0, 1.0)?;
        }

        Ok(model)
    }
}
