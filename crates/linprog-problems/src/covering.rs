//! Covering exercises: set covering and cyclic shift scheduling.

use linprog_solver::{ConstraintOp, LinearExpr, Model};

use crate::error::ProblemError;

/// A named subset of the elements to cover.
#[derive(Debug, Clone, PartialEq)]
pub struct Subset {
    pub name: String,
    pub elements: Vec<String>,
}

impl Subset {
    pub fn new(name: &str, elements: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            elements: elements.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Fewest subsets whose union contains every element.
///
/// Variables: `x_<subset>` binary.
/// Constraints: `cover_<element>`, one `>= 1` row per element. An element no
/// subset contains yields an unsatisfiable row.
#[derive(Debug, Clone, PartialEq)]
pub struct SetCover {
    pub elements: Vec<String>,
    pub subsets: Vec<Subset>,
}

impl SetCover {
    pub fn model(&self) -> Result<Model, ProblemError> {
        let mut model = Model::new("set-cover");
        let pick = self
            .subsets
            .iter()
            .map(|s| model.binary(format!("x_{}", s.name)))
            .collect::<Result<Vec<_>, _>>()?;

        model.minimize(LinearExpr::sum(pick.iter().copied()))?;

        for element in &self.elements {
            let covering = self
                .subsets
                .iter()
                .zip(&pick)
                .filter(|(s, _)| s.elements.contains(element))
                .map(|(_, &x)| x);
            model.add_constraint(
                LinearExpr::sum(covering),
                ConstraintOp::Ge,
                1.0,
                Some(&format!("cover_{element}")),
            )?;
        }

        Ok(model)
    }
}

/// Fewest nurses covering each day's demand, every nurse working
/// `shift_length` consecutive days of a repeating week.
///
/// Variables: `x_<d>` integer, nurses starting on day `d` (from zero).
/// Constraints: `day_<d>`, nurses on duty that day `>=` demand.
#[derive(Debug, Clone, PartialEq)]
pub struct NurseSchedule {
    pub demand: Vec<f64>,
    pub shift_length: usize,
}

impl NurseSchedule {
    pub fn model(&self) -> Result<Model, ProblemError> {
        let days = self.demand.len();
        let mut model = Model::new("nurse-schedule");
        let start = (0..days)
            .map(|d| model.integer(format!("x_{d}")))
            .collect::<Result<Vec<_>, _>>()?;

        model.minimize(LinearExpr::sum(start.iter().copied()))?;

        for (d, &demand) in self.demand.iter().enumerate() {
            // Started on one of the previous `shift_length` days, wrapping around the week
            let on_duty = (0..self.shift_length.min(days)).map(|back| start[(d + days - back) % days]);
            model.add_constraint(
                LinearExpr::sum(on_duty),
                ConstraintOp::Ge,
                demand,
                Some(&format!("day_{d}")),
            )?;
        }

        Ok(model)
    }
}
