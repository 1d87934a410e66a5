use std::time::Duration;

use good_lp::{
    constraint, variable, Expression, ProblemVariables, Solution, SolverModel, Variable,
};

/// Opaque handle to a decision variable, returned by [`CpSatModel::add_binary_var`]
/// and accepted everywhere a variable reference is needed. Hides the underlying
/// `good_lp::Variable` so callers never depend on the backing solver crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(usize);

/// Result of a completed solve.
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unknown(String),
}

/// A solved model: holds the variable values so callers can look them up by
/// [`VarId`] without re-touching the solver. `objective_value` is `None` when
/// [`SolveStatus`] is `Infeasible` or `Unknown`.
pub struct SolvedModel {
    status: SolveStatus,
    objective_value: Option<f64>,
    values: Vec<f64>,
}

impl SolvedModel {
    pub fn status(&self) -> &SolveStatus {
        &self.status
    }

    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    /// The solved value of `var`, rounded to the nearest integer — every variable
    /// in this model is binary, so any fractional residue is solver floating-point
    /// noise rather than a meaningful value.
    pub fn value(&self, var: VarId) -> f64 {
        self.values[var.0].round()
    }

    pub fn is_set(&self, var: VarId) -> bool {
        self.value(var) >= 0.5
    }
}

/// Thin builder wrapping `good_lp`/HiGHS behind a small, solver-agnostic
/// interface: `add_binary_var`, `add_linear_leq`, `add_linear_eq`,
/// `set_objective_max`, `solve(deadline, seed, workers)`, `value(var)`. Buffers
/// variables, constraints and the objective so they can be declared in any
/// order and only handed to the underlying solver once, at `solve` time
/// (`good_lp` otherwise requires the objective before constraints can be
/// attached).
pub struct CpSatModel {
    vars: ProblemVariables,
    handles: Vec<Variable>,
    constraints: Vec<good_lp::Constraint>,
    objective: Expression,
}

impl CpSatModel {
    pub fn new() -> Self {
        Self {
            vars: ProblemVariables::new(),
            handles: Vec::new(),
            constraints: Vec::new(),
            objective: Expression::default(),
        }
    }

    pub fn add_binary_var(&mut self) -> VarId {
        let handle = self.vars.add(variable().binary());
        self.handles.push(handle);
        VarId(self.handles.len() - 1)
    }

    fn expr(&self, terms: &[(VarId, f64)]) -> Expression {
        terms
            .iter()
            .map(|&(var, coeff)| coeff * self.handles[var.0])
            .sum()
    }

    pub fn add_linear_leq(&mut self, terms: &[(VarId, f64)], bound: f64) {
        let expr = self.expr(terms);
        self.constraints.push(constraint!(expr <= bound));
    }

    pub fn add_linear_eq(&mut self, terms: &[(VarId, f64)], bound: f64) {
        let expr = self.expr(terms);
        self.constraints.push(constraint!(expr == bound));
    }

    pub fn set_objective_max(&mut self, terms: &[(VarId, f64)]) {
        self.objective = self.expr(terms);
    }

    /// Hands the buffered problem to HiGHS, bounded by `deadline` and using
    /// `workers` threads. `seed` is accepted to keep this entry point stable for
    /// callers even though HiGHS has nothing to seed here; with `workers == 1`
    /// HiGHS is already deterministic, which is the only reproducibility
    /// guarantee this crate makes.
    pub fn solve(self, deadline: Duration, _seed: i64, workers: u32) -> SolvedModel {
        let num_vars = self.handles.len();
        let handles = self.handles;
        let objective = self.objective.clone();
        let mut problem = self
            .vars
            .maximise(self.objective)
            .using(good_lp::solvers::highs::highs);
        // HiGHS exposes its tunables through a generic name/value option table
        // rather than typed setters; `good_lp`'s HiGHS wrapper passes these
        // straight through.
        problem.set_option("time_limit", deadline.as_secs_f64());
        problem.set_option("threads", workers.max(1) as i32);

        let mut with_constraints = problem;
        for c in self.constraints {
            with_constraints = with_constraints.with(c);
        }

        let start = std::time::Instant::now();
        match with_constraints.solve() {
            Ok(solution) => {
                let values: Vec<f64> = handles.iter().map(|&v| solution.value(v)).collect();
                let objective_value = Some(solution.eval(&objective));
                // `good_lp` does not surface HiGHS's own optimal/time-limit distinction;
                // treat a solve that ran out the deadline as an unproven `Feasible` result.
                let status = if start.elapsed() >= deadline {
                    SolveStatus::Feasible
                } else {
                    SolveStatus::Optimal
                };
                SolvedModel {
                    status,
                    objective_value,
                    values,
                }
            }
            Err(good_lp::ResolutionError::Infeasible) => SolvedModel {
                status: SolveStatus::Infeasible,
                objective_value: None,
                values: vec![0.0; num_vars],
            },
            Err(err) => SolvedModel {
                status: SolveStatus::Unknown(err.to_string()),
                objective_value: None,
                values: vec![0.0; num_vars],
            },
        }
    }
}
