//! Two-phase tableau simplex for the continuous relaxation of a model.
//!
//! Model variables are mapped onto non-negative structural columns:
//! `x = l + x'` for a finite lower bound, `x = u - x'` when only the upper
//! bound is finite, and `x = x+ - x-` for free variables. Finite upper bounds
//! on shifted variables become ordinary `<=` rows.
//!
//! The objective row holds reduced costs of the minimization form, so a column
//! may enter when its entry is negative.
//!
//! Every constraint row is scaled so its largest coefficient is 1, and the
//! phase 2 costs so the largest is 1. Zero tests then compare magnitudes
//! relative to the row rather than absolute values.

use crate::config::SolverConfig;
use crate::model::{ConstraintOp, Model};
use crate::solution::SolverWarning;

/// Pivot elements smaller than this are counted as numerically suspicious.
const SMALL_PIVOT: f64 = 1e-7;
/// Consecutive suspicious pivots before a warning is raised and entering
/// selection falls back to the lowest eligible index.
const SUSPICIOUS_STREAK: usize = 50;
/// Phase 1 residual accepted as feasible, relative to the largest |rhs|.
const PHASE1_TOLERANCE: f64 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RelaxationStatus {
    Optimal,
    Infeasible,
    Unbounded,
    IterationLimit,
}

/// Result of one relaxation solve.
#[derive(Debug, Clone)]
pub(crate) struct Relaxation {
    pub status: RelaxationStatus,
    /// Values per model variable; empty unless optimal
    pub values: Vec<f64>,
    /// Objective in the model's own sense, constant included
    pub objective: f64,
    pub iterations: usize,
    pub warnings: Vec<SolverWarning>,
}

impl Relaxation {
    fn without_values(status: RelaxationStatus, iterations: usize, warnings: Vec<SolverWarning>) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective: f64::NAN,
            iterations,
            warnings,
        }
    }
}

pub(crate) struct Simplex {
    max_iterations: usize,
    tolerance: f64,
}

impl Simplex {
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            max_iterations: config.iteration_limit(),
            tolerance: config.zero_tolerance(),
        }
    }

    /// Solve the relaxation of `model` with per-variable `bounds` replacing the
    /// declared ones. The model itself is never modified.
    pub fn solve(&self, model: &Model, bounds: &[(f64, f64)]) -> Relaxation {
        let Some(form) = StandardForm::build(model, bounds, self.tolerance) else {
            return Relaxation::without_values(RelaxationStatus::Infeasible, 0, Vec::new());
        };

        let mut tableau = Tableau::new(&form);
        let mut run = Run {
            iterations: 0,
            streak: 0,
            warned: false,
            warnings: Vec::new(),
        };

        if tableau.n_artificial > 0 {
            match self.phase1(&mut tableau, &mut run) {
                Phase::Done => {}
                Phase::Limit => return self.iteration_limit(run),
                // Phase 1 is bounded below by zero
                Phase::Unbounded => {
                    return Relaxation::without_values(RelaxationStatus::Infeasible, run.iterations, run.warnings);
                }
            }
            let scale = 1.0 + tableau.max_rhs();
            let residual = -tableau.objective_rhs();
            if residual > PHASE1_TOLERANCE * scale {
                tracing::trace!(
                    component = "simplex",
                    operation = "phase1",
                    residual,
                    "Relaxation infeasible"
                );
                return Relaxation::without_values(RelaxationStatus::Infeasible, run.iterations, run.warnings);
            }
            self.drive_out_artificials(&mut tableau);
        }

        match self.phase2(&mut tableau, &form.costs, &mut run) {
            Phase::Done => {}
            Phase::Unbounded => {
                return Relaxation::without_values(RelaxationStatus::Unbounded, run.iterations, run.warnings);
            }
            Phase::Limit => return self.iteration_limit(run),
        }

        let values = form.recover(&tableau.structural_values());
        let objective = model.objective().sense.sign() * tableau.minimized_objective() + form.objective_offset;
        Relaxation {
            status: RelaxationStatus::Optimal,
            values,
            objective,
            iterations: run.iterations,
            warnings: run.warnings,
        }
    }

    fn iteration_limit(&self, mut run: Run) -> Relaxation {
        tracing::warn!(
            component = "simplex",
            iterations = run.iterations,
            "Pivot limit reached before the relaxation was solved"
        );
        run.warnings.push(SolverWarning::IterationLimit {
            iterations: run.iterations,
        });
        Relaxation::without_values(RelaxationStatus::IterationLimit, run.iterations, run.warnings)
    }

    /// Minimize the sum of artificial variables.
    fn phase1(&self, tableau: &mut Tableau, run: &mut Run) -> Phase {
        let m = tableau.n_rows();
        let art_start = tableau.artificial_start();
        let n_cols = tableau.n_cols();
        let n_artificial = tableau.n_artificial;

        let obj = &mut tableau.data[m];
        obj.iter_mut().for_each(|v| *v = 0.0);
        obj[art_start..art_start + n_artificial].fill(1.0);
        // Price out the artificial basis
        for i in 0..m {
            if tableau.basic_vars[i] >= art_start {
                for j in 0..n_cols {
                    tableau.data[m][j] -= tableau.data[i][j];
                }
            }
        }

        self.iterate(tableau, n_cols - 1, run)
    }

    /// Pivot basic artificials at zero level out of the basis. Rows where no
    /// structural or slack column is available are redundant and keep their
    /// artificial, which can no longer enter.
    fn drive_out_artificials(&self, tableau: &mut Tableau) {
        let art_start = tableau.artificial_start();
        let rhs = tableau.n_cols() - 1;
        for i in 0..tableau.n_rows() {
            if tableau.basic_vars[i] < art_start {
                continue;
            }
            tableau.data[i][rhs] = 0.0;
            if let Some(j) = (0..art_start).find(|&j| tableau.data[i][j].abs() > self.tolerance) {
                self.pivot(tableau, i, j);
            }
        }
    }

    fn phase2(&self, tableau: &mut Tableau, costs: &[f64], run: &mut Run) -> Phase {
        let m = tableau.n_rows();
        let n_cols = tableau.n_cols();

        let cost_scale = costs.iter().fold(0.0, |acc: f64, c| acc.max(c.abs()));
        tableau.cost_scale = if cost_scale > 0.0 { cost_scale } else { 1.0 };
        let scaled: Vec<f64> = costs.iter().map(|c| c / tableau.cost_scale).collect();

        let obj = &mut tableau.data[m];
        obj.iter_mut().for_each(|v| *v = 0.0);
        obj[..scaled.len()].copy_from_slice(&scaled);
        for i in 0..m {
            let basic = tableau.basic_vars[i];
            let cost = scaled.get(basic).copied().unwrap_or(0.0);
            if cost != 0.0 {
                for j in 0..n_cols {
                    tableau.data[m][j] -= cost * tableau.data[i][j];
                }
            }
        }

        // Artificial columns never re-enter
        let eligible = tableau.artificial_start();
        self.iterate(tableau, eligible, run)
    }

    fn iterate(&self, tableau: &mut Tableau, eligible: usize, run: &mut Run) -> Phase {
        loop {
            let bland = run.streak >= SUSPICIOUS_STREAK;
            let Some(col) = self.find_pivot_column(tableau, eligible, bland) else {
                return Phase::Done;
            };
            let Some((row, ratio)) = self.find_pivot_row(tableau, col) else {
                return Phase::Unbounded;
            };
            if run.iterations >= self.max_iterations {
                return Phase::Limit;
            }

            let element = tableau.data[row][col];
            if ratio.abs() <= self.tolerance || element < SMALL_PIVOT {
                run.streak += 1;
                if run.streak == SUSPICIOUS_STREAK && !run.warned {
                    run.warned = true;
                    tracing::warn!(
                        component = "simplex",
                        operation = "ratio_test",
                        pivots = run.streak,
                        "Repeated degenerate or near-zero pivots; switching to lowest-index entering rule"
                    );
                    run.warnings.push(SolverWarning::NumericInstability {
                        suspicious_pivots: run.streak,
                    });
                }
            } else {
                run.streak = 0;
            }

            self.pivot(tableau, row, col);
            run.iterations += 1;
        }
    }

    /// Most negative reduced cost among the first `eligible` columns, lowest
    /// index on ties. With `bland` set, the lowest eligible index wins.
    fn find_pivot_column(&self, tableau: &Tableau, eligible: usize, bland: bool) -> Option<usize> {
        let obj = &tableau.data[tableau.n_rows()];
        let mut best = -self.tolerance;
        let mut best_col = None;

        for (j, &d) in obj.iter().enumerate().take(eligible) {
            if d < best {
                if bland {
                    return Some(j);
                }
                best = d;
                best_col = Some(j);
            }
        }

        best_col
    }

    /// Minimum ratio over rows with a positive entry in `col`; ties go to the
    /// row whose basic variable has the lowest index.
    fn find_pivot_row(&self, tableau: &Tableau, col: usize) -> Option<(usize, f64)> {
        let rhs = tableau.n_cols() - 1;
        let mut best: Option<(usize, f64)> = None;

        for i in 0..tableau.n_rows() {
            let val = tableau.data[i][col];
            if val <= self.tolerance {
                continue;
            }
            let ratio = tableau.data[i][rhs] / val;
            best = match best {
                None => Some((i, ratio)),
                Some((row, min)) => {
                    let tied = (ratio - min).abs() <= self.tolerance;
                    if (!tied && ratio < min) || (tied && tableau.basic_vars[i] < tableau.basic_vars[row]) {
                        Some((i, ratio))
                    } else {
                        Some((row, min))
                    }
                }
            };
        }

        best
    }

    fn pivot(&self, tableau: &mut Tableau, row: usize, col: usize) {
        let n_rows = tableau.data.len();
        let n_cols = tableau.n_cols();

        // Update basic variable
        tableau.basic_vars[row] = col;

        // Scale pivot row
        let pivot_val = tableau.data[row][col];
        for j in 0..n_cols {
            tableau.data[row][j] /= pivot_val;
        }
        tableau.data[row][col] = 1.0;

        // Eliminate column in other rows
        let pivot_row = tableau.data[row].clone();
        for i in 0..n_rows {
            if i == row {
                continue;
            }
            let factor = tableau.data[i][col];
            if factor == 0.0 {
                continue;
            }
            for (cell, &p) in tableau.data[i].iter_mut().zip(&pivot_row) {
                let delta = factor * p;
                let before = *cell;
                *cell -= delta;
                // Round away cancellation only
                if cell.abs() < self.tolerance * before.abs().max(delta.abs()) {
                    *cell = 0.0;
                }
            }
            tableau.data[i][col] = 0.0;
        }
    }
}

enum Phase {
    Done,
    Unbounded,
    Limit,
}

struct Run {
    iterations: usize,
    /// Consecutive degenerate or near-zero pivots
    streak: usize,
    warned: bool,
    warnings: Vec<SolverWarning>,
}

/// How a model variable is expressed in structural columns:
/// `x = offset + sum(sign * column)`.
#[derive(Debug, Clone)]
struct ColumnMap {
    offset: f64,
    columns: Vec<(usize, f64)>,
}

#[derive(Debug, Clone)]
struct Row {
    coefficients: Vec<f64>,
    op: ConstraintOp,
    rhs: f64,
}

/// The relaxation rewritten over non-negative structural columns.
#[derive(Debug, Clone)]
struct StandardForm {
    maps: Vec<ColumnMap>,
    n_cols: usize,
    rows: Vec<Row>,
    /// Minimization-form cost per structural column
    costs: Vec<f64>,
    /// Objective contribution of the column offsets plus the objective constant
    objective_offset: f64,
}

impl StandardForm {
    /// `None` when some variable's bounds are empty.
    fn build(model: &Model, bounds: &[(f64, f64)], tolerance: f64) -> Option<Self> {
        let mut maps = Vec::with_capacity(bounds.len());
        let mut upper_rows = Vec::new();
        let mut n_cols = 0;

        for &(lower, upper) in bounds {
            if lower > upper + tolerance {
                return None;
            }
            let map = if lower.is_finite() {
                let col = n_cols;
                n_cols += 1;
                if upper.is_finite() {
                    upper_rows.push((col, (upper - lower).max(0.0)));
                }
                ColumnMap {
                    offset: lower,
                    columns: vec![(col, 1.0)],
                }
            } else if upper.is_finite() {
                let col = n_cols;
                n_cols += 1;
                ColumnMap {
                    offset: upper,
                    columns: vec![(col, -1.0)],
                }
            } else {
                let col = n_cols;
                n_cols += 2;
                ColumnMap {
                    offset: 0.0,
                    columns: vec![(col, 1.0), (col + 1, -1.0)],
                }
            };
            maps.push(map);
        }

        let mut rows = Vec::with_capacity(model.num_constraints() + upper_rows.len());
        for c in model.constraints() {
            let mut coefficients = vec![0.0; n_cols];
            let mut rhs = c.rhs - c.expr.constant();
            for &(var, a) in c.expr.terms() {
                let map = &maps[var.index()];
                rhs -= a * map.offset;
                for &(col, sign) in &map.columns {
                    coefficients[col] += a * sign;
                }
            }
            rows.push(Row {
                coefficients,
                op: c.op,
                rhs,
            });
        }
        for (col, limit) in upper_rows {
            let mut coefficients = vec![0.0; n_cols];
            coefficients[col] = 1.0;
            rows.push(Row {
                coefficients,
                op: ConstraintOp::Le,
                rhs: limit,
            });
        }

        let objective = model.objective();
        let sign = objective.sense.sign();
        let mut costs = vec![0.0; n_cols];
        let mut objective_offset = objective.expr.constant();
        for &(var, a) in objective.expr.terms() {
            let map = &maps[var.index()];
            objective_offset += a * map.offset;
            for &(col, s) in &map.columns {
                costs[col] += sign * a * s;
            }
        }

        Some(Self {
            maps,
            n_cols,
            rows,
            costs,
            objective_offset,
        })
    }

    /// Map structural column values back to model variables.
    fn recover(&self, structural: &[f64]) -> Vec<f64> {
        self.maps
            .iter()
            .map(|map| {
                map.offset
                    + map
                        .columns
                        .iter()
                        .map(|&(col, sign)| sign * structural[col])
                        .sum::<f64>()
            })
            .collect()
    }
}

struct Tableau {
    /// Constraint rows followed by the objective row; the last column is the rhs
    data: Vec<Vec<f64>>,
    basic_vars: Vec<usize>,
    n_struct: usize,
    n_slack: usize,
    n_artificial: usize,
    /// Factor dividing the phase 2 costs
    cost_scale: f64,
}

impl Tableau {
    fn new(form: &StandardForm) -> Self {
        let m = form.rows.len();

        // Rows with a negative rhs are negated, which flips the inequality
        let ops: Vec<(f64, ConstraintOp)> = form
            .rows
            .iter()
            .map(|r| {
                if r.rhs < 0.0 {
                    let flipped = match r.op {
                        ConstraintOp::Le => ConstraintOp::Ge,
                        ConstraintOp::Ge => ConstraintOp::Le,
                        ConstraintOp::Eq => ConstraintOp::Eq,
                    };
                    (-1.0, flipped)
                } else {
                    (1.0, r.op)
                }
            })
            .collect();

        let mut n_slack = 0;
        let mut n_artificial = 0;
        for (_, op) in &ops {
            match op {
                ConstraintOp::Le => n_slack += 1,
                ConstraintOp::Ge => {
                    n_slack += 1; // surplus
                    n_artificial += 1;
                }
                ConstraintOp::Eq => n_artificial += 1,
            }
        }

        let total_cols = form.n_cols + n_slack + n_artificial + 1; // +1 for RHS
        let mut tableau = Tableau {
            data: vec![vec![0.0; total_cols]; m + 1],
            basic_vars: vec![0; m],
            n_struct: form.n_cols,
            n_slack,
            n_artificial,
            cost_scale: 1.0,
        };

        let mut slack_idx = form.n_cols;
        let mut artificial_idx = form.n_cols + n_slack;

        for (i, (row, &(sign, op))) in form.rows.iter().zip(&ops).enumerate() {
            let largest = row.coefficients.iter().fold(0.0, |acc: f64, c| acc.max(c.abs()));
            let factor = if largest > 0.0 { sign / largest } else { sign };
            for (j, &coef) in row.coefficients.iter().enumerate() {
                tableau.data[i][j] = factor * coef;
            }
            tableau.data[i][total_cols - 1] = factor * row.rhs;

            match op {
                ConstraintOp::Le => {
                    tableau.data[i][slack_idx] = 1.0;
                    tableau.basic_vars[i] = slack_idx;
                    slack_idx += 1;
                }
                ConstraintOp::Ge => {
                    tableau.data[i][slack_idx] = -1.0;
                    slack_idx += 1;
                    tableau.data[i][artificial_idx] = 1.0;
                    tableau.basic_vars[i] = artificial_idx;
                    artificial_idx += 1;
                }
                ConstraintOp::Eq => {
                    tableau.data[i][artificial_idx] = 1.0;
                    tableau.basic_vars[i] = artificial_idx;
                    artificial_idx += 1;
                }
            }
        }

        tableau
    }

    fn n_rows(&self) -> usize {
        self.basic_vars.len()
    }

    fn n_cols(&self) -> usize {
        self.data[0].len()
    }

    fn artificial_start(&self) -> usize {
        self.n_struct + self.n_slack
    }

    fn objective_rhs(&self) -> f64 {
        self.data[self.n_rows()][self.n_cols() - 1]
    }

    /// Phase 2 objective of the current basis, unscaled.
    fn minimized_objective(&self) -> f64 {
        -self.objective_rhs() * self.cost_scale
    }

    fn max_rhs(&self) -> f64 {
        let rhs = self.n_cols() - 1;
        self.data[..self.n_rows()].iter().fold(0.0, |acc: f64, row| acc.max(row[rhs].abs()))
    }

    fn structural_values(&self) -> Vec<f64> {
        let rhs = self.n_cols() - 1;
        let mut values = vec![0.0; self.n_struct];
        for (i, &basic) in self.basic_vars.iter().enumerate() {
            if basic < self.n_struct {
                values[basic] = self.data[i][rhs];
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinearExpr, Model, Sense};

    fn relax(model: &Model) -> Relaxation {
        let bounds: Vec<(f64, f64)> = model.variables().iter().map(|v| v.relaxed_bounds()).collect();
        Simplex::new(&SolverConfig::default()).solve(model, &bounds)
    }

    #[test]
    fn test_simple_maximization() {
        // Maximize: 3x + 2y
        // Subject to:
        //   x + y <= 4
        //   x <= 3
        //   y <= 3
        // Optimal: x=3, y=1, obj=11
        let mut model = Model::new("max");
        let x = model.continuous("x").unwrap();
        let y = model.continuous("y").unwrap();
        model.maximize(LinearExpr::term(x, 3.0).with_term(y, 2.0)).unwrap();
        model.add_constraint(LinearExpr::sum([x, y]), ConstraintOp::Le, 4.0, Some("sum")).unwrap();
        model.add_constraint(LinearExpr::term(x, 1.0), ConstraintOp::Le, 3.0, Some("x_max")).unwrap();
        model.add_constraint(LinearExpr::term(y, 1.0), ConstraintOp::Le, 3.0, Some("y_max")).unwrap();

        let result = relax(&model);

        assert_eq!(result.status, RelaxationStatus::Optimal);
        assert!((result.values[0] - 3.0).abs() < 1e-6, "x = {} (expected 3)", result.values[0]);
        assert!((result.values[1] - 1.0).abs() < 1e-6, "y = {} (expected 1)", result.values[1]);
        assert!((result.objective - 11.0).abs() < 1e-6, "obj = {} (expected 11)", result.objective);
    }

    #[test]
    fn test_minimization_with_ge() {
        // Minimize: 2x + 3y
        // Subject to:
        //   x + y >= 4
        //   x <= 3
        //   y <= 3
        // Optimal: x=3, y=1, obj=9
        let mut model = Model::new("min");
        let x = model.continuous("x").unwrap();
        let y = model.continuous("y").unwrap();
        model.minimize(LinearExpr::term(x, 2.0).with_term(y, 3.0)).unwrap();
        model.add_constraint(LinearExpr::sum([x, y]), ConstraintOp::Ge, 4.0, None).unwrap();
        model.add_constraint(LinearExpr::term(x, 1.0), ConstraintOp::Le, 3.0, None).unwrap();
        model.add_constraint(LinearExpr::term(y, 1.0), ConstraintOp::Le, 3.0, None).unwrap();

        let result = relax(&model);

        assert_eq!(result.status, RelaxationStatus::Optimal);
        assert!((result.values[0] - 3.0).abs() < 1e-6, "x = {} (expected 3)", result.values[0]);
        assert!((result.values[1] - 1.0).abs() < 1e-6, "y = {} (expected 1)", result.values[1]);
        assert!((result.objective - 9.0).abs() < 1e-6, "obj = {} (expected 9)", result.objective);
    }

    #[test]
    fn test_infeasible() {
        // x >= 5
        // x <= 3
        let mut model = Model::new("infeasible");
        let x = model.continuous("x").unwrap();
        model.minimize(LinearExpr::term(x, 1.0)).unwrap();
        model.add_constraint(LinearExpr::term(x, 1.0), ConstraintOp::Ge, 5.0, Some("lower")).unwrap();
        model.add_constraint(LinearExpr::term(x, 1.0), ConstraintOp::Le, 3.0, Some("upper")).unwrap();

        assert_eq!(relax(&model).status, RelaxationStatus::Infeasible);
    }

    #[test]
    fn unconstrained_maximization_is_unbounded() {
        let mut model = Model::new("unbounded");
        let x = model.continuous("x").unwrap();
        model.maximize(LinearExpr::term(x, 1.0)).unwrap();

        assert_eq!(relax(&model).status, RelaxationStatus::Unbounded);
    }

    #[test]
    fn equality_rows_and_negative_rhs() {
        // Minimize x - y
        //   x + y = 10
        //   x - y <= -2  (stored with a negative rhs, flipped internally)
        // Optimal: x=0, y=10, obj=-10
        let mut model = Model::new("eq");
        let x = model.continuous("x").unwrap();
        let y = model.continuous("y").unwrap();
        model.minimize(LinearExpr::term(x, 1.0).with_term(y, -1.0)).unwrap();
        model.add_constraint(LinearExpr::sum([x, y]), ConstraintOp::Eq, 10.0, None).unwrap();
        model
            .add_constraint(LinearExpr::term(x, 1.0).with_term(y, -1.0), ConstraintOp::Le, -2.0, None)
            .unwrap();

        let result = relax(&model);
        assert_eq!(result.status, RelaxationStatus::Optimal);
        assert!(result.values[0].abs() < 1e-9);
        assert!((result.values[1] - 10.0).abs() < 1e-9);
        assert!((result.objective + 10.0).abs() < 1e-9);
    }

    #[test]
    fn shifted_mirrored_and_free_variables() {
        // Minimize 2a + b - c with a in [2, 5], b in (-inf, 3], c free
        //   c <= a + b
        //   b >= -4
        // The objective equals a + (a + b - c) >= a, so the optimum is 2 with
        // a = 2 and c = a + b for any admissible b.
        let mut model = Model::new("bounds");
        let a = model.bounded("a", 2.0, 5.0).unwrap();
        let b = model.bounded("b", f64::NEG_INFINITY, 3.0).unwrap();
        let c = model.bounded("c", f64::NEG_INFINITY, f64::INFINITY).unwrap();
        model
            .minimize(LinearExpr::term(a, 2.0).with_term(b, 1.0).with_term(c, -1.0))
            .unwrap();
        model
            .add_constraint(
                LinearExpr::term(c, 1.0).with_term(a, -1.0).with_term(b, -1.0),
                ConstraintOp::Le,
                0.0,
                None,
            )
            .unwrap();
        model.add_constraint(LinearExpr::term(b, 1.0), ConstraintOp::Ge, -4.0, None).unwrap();

        let result = relax(&model);
        assert_eq!(result.status, RelaxationStatus::Optimal);
        let (va, vb, vc) = (result.values[0], result.values[1], result.values[2]);
        assert!((va - 2.0).abs() < 1e-9, "a = {va}");
        assert!((-4.0 - 1e-9..=3.0 + 1e-9).contains(&vb), "b = {vb}");
        assert!((vc - (va + vb)).abs() < 1e-9, "c = {vc}");
        assert!((result.objective - 2.0).abs() < 1e-9, "obj = {}", result.objective);
    }

    #[test]
    fn objective_constant_is_reported() {
        let mut model = Model::new("constant");
        let x = model.bounded("x", 0.0, 4.0).unwrap();
        model
            .set_objective(LinearExpr::term(x, 1.0).with_constant(100.0), Sense::Maximize)
            .unwrap();

        let result = relax(&model);
        assert_eq!(result.status, RelaxationStatus::Optimal);
        assert!((result.objective - 104.0).abs() < 1e-9);
    }

    #[test]
    fn empty_bounds_are_infeasible() {
        let mut model = Model::new("empty");
        let x = model.continuous("x").unwrap();
        model.minimize(LinearExpr::term(x, 1.0)).unwrap();

        let result = Simplex::new(&SolverConfig::default()).solve(&model, &[(3.0, 2.0)]);
        assert_eq!(result.status, RelaxationStatus::Infeasible);
    }

    #[test]
    fn redundant_equalities_are_tolerated() {
        // The second row repeats the first; its artificial stays basic at zero.
        let mut model = Model::new("redundant");
        let x = model.continuous("x").unwrap();
        let y = model.continuous("y").unwrap();
        model.maximize(LinearExpr::term(x, 1.0)).unwrap();
        model.add_constraint(LinearExpr::sum([x, y]), ConstraintOp::Eq, 6.0, None).unwrap();
        model.add_constraint(LinearExpr::term(x, 2.0).with_term(y, 2.0), ConstraintOp::Eq, 12.0, None).unwrap();

        let result = relax(&model);
        assert_eq!(result.status, RelaxationStatus::Optimal);
        assert!((result.values[0] - 6.0).abs() < 1e-9);
        assert!(result.values[1].abs() < 1e-9);
    }

    #[test]
    fn tiny_coefficients_are_not_truncated() {
        // x + 2y <= 4 and 3x + y <= 6 scaled down by 1e10, objective too.
        // Optimal: x=1.6, y=1.2, obj=2.8e-10
        let mut model = Model::new("tiny");
        let x = model.continuous("x").unwrap();
        let y = model.continuous("y").unwrap();
        model.maximize(LinearExpr::term(x, 1e-10).with_term(y, 1e-10)).unwrap();
        model
            .add_constraint(LinearExpr::term(x, 1e-10).with_term(y, 2e-10), ConstraintOp::Le, 4e-10, None)
            .unwrap();
        model
            .add_constraint(LinearExpr::term(x, 3e-10).with_term(y, 1e-10), ConstraintOp::Le, 6e-10, None)
            .unwrap();

        let result = relax(&model);

        assert_eq!(result.status, RelaxationStatus::Optimal);
        assert!((result.values[0] - 1.6).abs() < 1e-9, "x = {}", result.values[0]);
        assert!((result.values[1] - 1.2).abs() < 1e-9, "y = {}", result.values[1]);
        assert!((result.objective - 2.8e-10).abs() < 1e-18, "obj = {}", result.objective);
    }

    #[test]
    fn tableau_objective_matches_values() {
        let mut model = Model::new("offsets");
        let a = model.bounded("a", 2.0, 5.0).unwrap();
        let b = model.bounded("b", f64::NEG_INFINITY, 4.0).unwrap();
        let c = model.bounded("c", f64::NEG_INFINITY, f64::INFINITY).unwrap();
        model
            .minimize(LinearExpr::term(a, 3.0).with_term(b, -1.0).with_term(c, 2.0).with_constant(7.0))
            .unwrap();
        model
            .add_constraint(LinearExpr::term(a, 1.0).with_term(c, 1.0), ConstraintOp::Ge, 1.0, None)
            .unwrap();

        let result = relax(&model);

        // a=2, b=4, c=-1: 6 - 4 - 2 + 7
        assert_eq!(result.status, RelaxationStatus::Optimal);
        assert!((result.objective - 7.0).abs() < 1e-9, "obj = {}", result.objective);
        let evaluated = model.objective().expr.evaluate(&result.values);
        assert!((result.objective - evaluated).abs() < 1e-9);
    }

    #[test]
    fn iteration_limit_is_reported() {
        let mut model = Model::new("limit");
        let x = model.continuous("x").unwrap();
        let y = model.continuous("y").unwrap();
        model.maximize(LinearExpr::term(x, 3.0).with_term(y, 2.0)).unwrap();
        model.add_constraint(LinearExpr::sum([x, y]), ConstraintOp::Le, 4.0, None).unwrap();
        model.add_constraint(LinearExpr::term(x, 1.0), ConstraintOp::Le, 3.0, None).unwrap();

        let bounds = vec![(0.0, f64::INFINITY); 2];
        let config = SolverConfig::new().with_max_iterations(1);
        let result = Simplex::new(&config).solve(&model, &bounds);
        assert_eq!(result.status, RelaxationStatus::IterationLimit);
        assert_eq!(result.iterations, 1);
        assert!(matches!(result.warnings[..], [SolverWarning::IterationLimit { iterations: 1 }]));
    }
}
