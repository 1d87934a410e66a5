use thiserror::Error;

use crate::diagnostics::SaturationWitness;

/// The error taxonomy surfaced distinctly to callers. A session with no
/// eligible physician has no variant here: it is non-fatal and is recorded as
/// a `SessionDiagnostic` inside `Schedule` rather than returned as an error.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("{source} row {row}, column '{column}': {reason}")]
    InputMalformed {
        source: String,
        row: usize,
        column: String,
        reason: String,
    },

    #[error("{source} row {row}: {reason}")]
    InputInconsistent {
        source: String,
        row: usize,
        reason: String,
    },

    #[error("no assignment satisfies the hard constraints (tightest saturation: {witness})")]
    ModelInfeasible { witness: SaturationWitness },

    #[error("solver exhausted its time budget with no feasible assignment: {message}")]
    SolverTimeout { message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl PlannerError {
    /// Maps each variant to its CLI exit code: 1 invalid input, 2 infeasible,
    /// 3 solver timeout, 4 internal error.
    pub fn exit_code(&self) -> i32 {
        let code = match self {
            PlannerError::InputMalformed { .. } | PlannerError::InputInconsistent { .. } => 1,
            PlannerError::ModelInfeasible { .. } => 2,
            PlannerError::SolverTimeout { .. } => 3,
            PlannerError::Internal(_) => 4,
        };
        tracing::error!(exit_code = code, "{self}");
        code
    }
}
