//! Uncapacitated facility location.

use linprog_solver::{ConstraintOp, LinearExpr, Model, VarId};

use crate::error::{ProblemError, check_len};

#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub name: String,
    pub fixed_cost: f64,
    /// Cost of serving each customer from this site, parallel to the customers
    pub service_costs: Vec<f64>,
}

/// Choose which sites to open and which open site serves each customer,
/// minimizing fixed plus service cost.
///
/// Variables: `y_<site>` binary (open), `x_<site>_<customer>` binary (serves).
/// Constraints: `serve_<customer>` equalities and `open_<site>_<customer>`
/// linking rows `x <= y`.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityLocation {
    pub sites: Vec<Site>,
    pub customers: Vec<String>,
}

impl FacilityLocation {
    pub fn model(&self) -> Result<Model, ProblemError> {
        for site in &self.sites {
            check_len("service costs", self.customers.len(), site.service_costs.len())?;
        }

        let mut model = Model::new("facility-location");
        let open = self
            .sites
            .iter()
            .map(|s| model.binary(format!("y_{}", s.name)))
            .collect::<Result<Vec<_>, _>>()?;
        let mut serve: Vec<Vec<VarId>> = Vec::with_capacity(self.sites.len());
        for site in &self.sites {
            let row = self
                .customers
                .iter()
                .map(|c| model.binary(format!("x_{}_{c}", site.name)))
                .collect::<Result<Vec<_>, _>>()?;
            serve.push(row);
        }

        let mut cost = LinearExpr::new();
        for ((site, &y), row) in self.sites.iter().zip(&open).zip(&serve) {
            cost.add_term(y, site.fixed_cost);
            for (&x, &c) in row.iter().zip(&site.service_costs) {
                cost.add_term(x, c);
            }
        }
        model.minimize(cost)?;

        for (c, customer) in self.customers.iter().enumerate() {
            model.add_constraint(
                LinearExpr::sum(serve.iter().map(|row| row[c])),
                ConstraintOp::Eq,
                1.0,
                Some(&format!("serve_{customer}")),
            )?;
        }
        for ((site, &y), row) in self.sites.iter().zip(&open).zip(&serve) {
            for (&x, customer) in row.iter().zip(&self.customers) {
                model.add_constraint(
                    LinearExpr::term(x, 1.0).with_term(y, -1.0),
                    ConstraintOp::Le,
                    0.0,
                    Some(&format!("open_{}_{customer}", site.name)),
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

    fn site(name: &str, fixed_cost: f64, service_costs: &[f64]) -> Site {
        Site {
            name: name.to_string(),
            fixed_cost,
            service_costs: service_costs.to_vec(),
        }
    }

    #[test]
    fn opens_the_cheapest_single_site() {
        let problem = FacilityLocation {
            sites: vec![
                site("Local1", 100.0, &[20.0, 24.0, 18.0]),
                site("Local2", 120.0, &[28.0, 20.0, 26.0]),
                site("Local3", 90.0, &[22.0, 23.0, 20.0]),
            ],
            customers: vec!["A".into(), "B".into(), "C".into()],
        };
        let model = problem.model().unwrap();
        assert_eq!(model.num_variables(), 3 + 9);
        assert_eq!(model.num_constraints(), 3 + 9);

        let solution = solve(&model);
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!(solution.objective_value, Some(155.0));
        assert_eq!(solution.value_of("y_Local3"), Some(1.0));
        assert_eq!(solution.value_of("y_Local1"), Some(0.0));
        assert_eq!(solution.value_of("y_Local2"), Some(0.0));
    }

    #[test]
    fn customer_without_costs_is_rejected() {
        let problem = FacilityLocation {
            sites: vec![site("S", 1.0, &[1.0])],
            customers: vec!["A".into(), "B".into()],
        };
        assert_eq!(problem.model().unwrap_err().code(), "PARAMETER_SHAPE");
    }
}
