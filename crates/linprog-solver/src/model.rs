use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::ModelError;

/// Handle to a variable registered in a [`Model`].
///
/// Ids are dense indices in declaration order; they are only meaningful for
/// the model that issued them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Real-valued within its bounds
    Continuous,
    /// Integer-valued within its bounds
    Integer,
    /// Integer-valued in {0, 1}
    Binary,
}

impl Domain {
    /// Whether branch-and-bound must drive this variable to an integer value.
    pub fn is_integral(self) -> bool {
        matches!(self, Domain::Integer | Domain::Binary)
    }
}

/// A decision variable.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub domain: Domain,
    pub lower: f64,
    pub upper: f64,
}

impl Variable {
    /// Bounds of the continuous relaxation.
    ///
    /// Integer bounds are rounded inwards so the relaxation never admits a
    /// region without integer points at its edges.
    pub fn relaxed_bounds(&self) -> (f64, f64) {
        match self.domain {
            Domain::Continuous => (self.lower, self.upper),
            Domain::Integer | Domain::Binary => (
                (self.lower - INTEGER_BOUND_SLACK).ceil(),
                (self.upper + INTEGER_BOUND_SLACK).floor(),
            ),
        }
    }
}

const INTEGER_BOUND_SLACK: f64 = 1e-9;

/// A linear expression: `sum(coefficient * variable) + constant`.
///
/// A variable appears at most once; adding a term for a variable that is
/// already present accumulates into the existing coefficient.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Just a constant, no variable terms.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant,
        }
    }

    /// Single term: `coefficient * var`.
    pub fn term(var: VarId, coefficient: f64) -> Self {
        Self {
            terms: vec![(var, coefficient)],
            constant: 0.0,
        }
    }

    /// Sum of variables with coefficient 1.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        vars.into_iter().map(|v| (v, 1.0)).collect()
    }

    pub fn add_term(&mut self, var: VarId, coefficient: f64) -> &mut Self {
        match self.terms.iter_mut().find(|(v, _)| *v == var) {
            Some((_, c)) => *c += coefficient,
            None => self.terms.push((var, coefficient)),
        }
        self
    }

    pub fn add_constant(&mut self, constant: f64) -> &mut Self {
        self.constant += constant;
        self
    }

    /// Builder form of [`add_term`](Self::add_term).
    pub fn with_term(mut self, var: VarId, coefficient: f64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    /// Builder form of [`add_constant`](Self::add_constant).
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant += constant;
        self
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn coefficient(&self, var: VarId) -> f64 {
        self.terms
            .iter()
            .find(|(v, _)| *v == var)
            .map_or(0.0, |(_, c)| *c)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate against values indexed by [`VarId::index`].
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(v, c)| c * values.get(v.index()).copied().unwrap_or(0.0))
            .sum::<f64>()
            + self.constant
    }
}

impl FromIterator<(VarId, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        let mut expr = LinearExpr::new();
        for (var, coefficient) in iter {
            expr.add_term(var, coefficient);
        }
        expr
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

impl ConstraintOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ConstraintOp::Le => "<=",
            ConstraintOp::Ge => ">=",
            ConstraintOp::Eq => "=",
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Name/label for the constraint (for diagnostics)
    pub name: Option<String>,
    pub expr: LinearExpr,
    pub op: ConstraintOp,
    pub rhs: f64,
}

impl Constraint {
    /// Left-hand side evaluated at `values`, constant term included.
    pub fn activity(&self, values: &[f64]) -> f64 {
        self.expr.evaluate(values)
    }

    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.activity(values);
        match self.op {
            ConstraintOp::Le => lhs <= self.rhs + tolerance,
            ConstraintOp::Ge => lhs >= self.rhs - tolerance,
            ConstraintOp::Eq => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    /// Multiplier that turns this sense into minimization.
    pub(crate) fn sign(self) -> f64 {
        match self {
            Sense::Minimize => 1.0,
            Sense::Maximize => -1.0,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub expr: LinearExpr,
    pub sense: Sense,
}

/// A linear or mixed-integer optimization model.
///
/// Variables keep their declaration order, which is also the order of
/// [`Solution`](crate::Solution) values. Every expression handed to the model
/// is checked against the registered variables.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    variables: Vec<Variable>,
    by_name: HashMap<String, VarId>,
    objective: Objective,
    constraints: Vec<Constraint>,
    constraint_names: HashSet<String>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            by_name: HashMap::new(),
            objective: Objective {
                expr: LinearExpr::new(),
                sense: Sense::Minimize,
            },
            constraints: Vec::new(),
            constraint_names: HashSet::new(),
        }
    }

    /// Register a variable.
    ///
    /// Binary variables are clipped to `[0, 1]`.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        domain: Domain,
        lower: f64,
        upper: f64,
    ) -> Result<VarId, ModelError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(ModelError::DuplicateName(name));
        }
        let (lower, upper) = checked_bounds(&name, domain, lower, upper)?;

        let id = VarId(self.variables.len());
        self.by_name.insert(name.clone(), id);
        self.variables.push(Variable {
            name,
            domain,
            lower,
            upper,
        });
        Ok(id)
    }

    /// Continuous variable in `[0, +inf)`.
    pub fn continuous(&mut self, name: impl Into<String>) -> Result<VarId, ModelError> {
        self.add_variable(name, Domain::Continuous, 0.0, f64::INFINITY)
    }

    /// Continuous variable with explicit bounds; either side may be infinite.
    pub fn bounded(
        &mut self,
        name: impl Into<String>,
        lower: f64,
        upper: f64,
    ) -> Result<VarId, ModelError> {
        self.add_variable(name, Domain::Continuous, lower, upper)
    }

    /// Integer variable in `[0, +inf)`.
    pub fn integer(&mut self, name: impl Into<String>) -> Result<VarId, ModelError> {
        self.add_variable(name, Domain::Integer, 0.0, f64::INFINITY)
    }

    pub fn binary(&mut self, name: impl Into<String>) -> Result<VarId, ModelError> {
        self.add_variable(name, Domain::Binary, 0.0, 1.0)
    }

    pub fn set_bounds(&mut self, var: VarId, lower: f64, upper: f64) -> Result<(), ModelError> {
        let variable = self
            .variables
            .get(var.0)
            .ok_or(ModelError::UnknownVariable(var))?;
        let (lower, upper) = checked_bounds(&variable.name, variable.domain, lower, upper)?;
        let variable = &mut self.variables[var.0];
        variable.lower = lower;
        variable.upper = upper;
        Ok(())
    }

    /// Change a variable's domain, keeping its bounds (clipped for binary).
    pub fn set_domain(&mut self, var: VarId, domain: Domain) -> Result<(), ModelError> {
        let variable = self
            .variables
            .get(var.0)
            .ok_or(ModelError::UnknownVariable(var))?;
        let (lower, upper) = checked_bounds(&variable.name, domain, variable.lower, variable.upper)?;
        let variable = &mut self.variables[var.0];
        variable.domain = domain;
        variable.lower = lower;
        variable.upper = upper;
        Ok(())
    }

    /// Replace the objective.
    pub fn set_objective(&mut self, expr: LinearExpr, sense: Sense) -> Result<(), ModelError> {
        self.check_expr(&expr)?;
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            model = %self.name,
            sense = ?sense,
            terms = expr.terms().len(),
            "Set objective function"
        );
        self.objective = Objective { expr, sense };
        Ok(())
    }

    pub fn minimize(&mut self, expr: LinearExpr) -> Result<(), ModelError> {
        self.set_objective(expr, Sense::Minimize)
    }

    pub fn maximize(&mut self, expr: LinearExpr) -> Result<(), ModelError> {
        self.set_objective(expr, Sense::Maximize)
    }

    /// Append a constraint and return its position.
    ///
    /// Duplicate names are accepted and logged.
    pub fn add_constraint(
        &mut self,
        expr: LinearExpr,
        op: ConstraintOp,
        rhs: f64,
        name: Option<&str>,
    ) -> Result<usize, ModelError> {
        self.check_expr(&expr)?;
        if !rhs.is_finite() {
            return Err(ModelError::NonFiniteCoefficient(rhs));
        }
        if let Some(name) = name {
            if !self.constraint_names.insert(name.to_string()) {
                tracing::warn!(
                    component = "model",
                    operation = "add_constraint",
                    model = %self.name,
                    constraint = name,
                    "Duplicate constraint name"
                );
            }
        }
        self.constraints.push(Constraint {
            name: name.map(str::to_string),
            expr,
            op,
            rhs,
        });
        Ok(self.constraints.len() - 1)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, var: VarId) -> Option<&Variable> {
        self.variables.get(var.0)
    }

    /// Look up a variable by name.
    pub fn find(&self, name: &str) -> Option<VarId> {
        self.by_name.get(name).copied()
    }

    pub fn var_ids(&self) -> impl Iterator<Item = VarId> + '_ {
        (0..self.variables.len()).map(VarId)
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn num_integral(&self) -> usize {
        self.variables.iter().filter(|v| v.domain.is_integral()).count()
    }

    pub fn is_mixed_integer(&self) -> bool {
        self.num_integral() > 0
    }

    fn check_expr(&self, expr: &LinearExpr) -> Result<(), ModelError> {
        if !expr.constant().is_finite() {
            return Err(ModelError::NonFiniteCoefficient(expr.constant()));
        }
        for &(var, coefficient) in expr.terms() {
            if var.0 >= self.variables.len() {
                return Err(ModelError::UnknownVariable(var));
            }
            if !coefficient.is_finite() {
                return Err(ModelError::NonFiniteCoefficient(coefficient));
            }
        }
        Ok(())
    }
}

fn checked_bounds(name: &str, domain: Domain, lower: f64, upper: f64) -> Result<(f64, f64), ModelError> {
    let (lower, upper) = match domain {
        Domain::Binary => (lower.max(0.0), upper.min(1.0)),
        Domain::Continuous | Domain::Integer => (lower, upper),
    };
    if lower.is_nan()
        || upper.is_nan()
        || lower > upper
        || lower == f64::INFINITY
        || upper == f64::NEG_INFINITY
    {
        return Err(ModelError::InvalidBounds {
            name: name.to_string(),
            lower,
            upper,
        });
    }
    Ok((lower, upper))
}

/// LP-file style listing.
impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\\ {}", self.name)?;
        match self.objective.sense {
            Sense::Minimize => writeln!(f, "Minimize")?,
            Sense::Maximize => writeln!(f, "Maximize")?,
        }
        write!(f, " obj: ")?;
        self.write_expr(f, &self.objective.expr, true)?;
        writeln!(f)?;

        writeln!(f, "Subject To")?;
        for (i, c) in self.constraints.iter().enumerate() {
            match &c.name {
                Some(name) => write!(f, " {}: ", name)?,
                None => write!(f, " c{}: ", i + 1)?,
            }
            self.write_expr(f, &c.expr, false)?;
            writeln!(f, " {} {}", c.op.symbol(), c.rhs - c.expr.constant())?;
        }

        let bounded: Vec<&Variable> = self
            .variables
            .iter()
            .filter(|v| v.domain != Domain::Binary && !(v.lower == 0.0 && v.upper == f64::INFINITY))
            .collect();
        if !bounded.is_empty() {
            writeln!(f, "Bounds")?;
            for v in bounded {
                match (v.lower.is_finite(), v.upper.is_finite()) {
                    (false, false) => writeln!(f, " {} free", v.name)?,
                    (true, false) => writeln!(f, " {} >= {}", v.name, v.lower)?,
                    (false, true) => writeln!(f, " -inf <= {} <= {}", v.name, v.upper)?,
                    (true, true) => writeln!(f, " {} <= {} <= {}", v.lower, v.name, v.upper)?,
                }
            }
        }

        for (header, domain) in [("General", Domain::Integer), ("Binary", Domain::Binary)] {
            let names: Vec<&str> = self
                .variables
                .iter()
                .filter(|v| v.domain == domain)
                .map(|v| v.name.as_str())
                .collect();
            if !names.is_empty() {
                writeln!(f, "{}", header)?;
                writeln!(f, " {}", names.join(" "))?;
            }
        }
        writeln!(f, "End")
    }
}

impl Model {
    fn write_expr(&self, f: &mut fmt::Formatter<'_>, expr: &LinearExpr, with_constant: bool) -> fmt::Result {
        let mut first = true;
        for &(var, coefficient) in expr.terms() {
            let name = &self.variables[var.0].name;
            let sign = if coefficient < 0.0 { "-" } else { "+" };
            let magnitude = coefficient.abs();
            if first {
                if coefficient < 0.0 {
                    write!(f, "- ")?;
                }
            } else {
                write!(f, " {} ", sign)?;
            }
            if magnitude == 1.0 {
                write!(f, "{}", name)?;
            } else {
                write!(f, "{} {}", magnitude, name)?;
            }
            first = false;
        }
        if with_constant && (expr.constant() != 0.0 || first) {
            if first {
                write!(f, "{}", expr.constant())?;
            } else if expr.constant() < 0.0 {
                write!(f, " - {}", -expr.constant())?;
            } else {
                write!(f, " + {}", expr.constant())?;
            }
        }
        Ok(())
    }
}
