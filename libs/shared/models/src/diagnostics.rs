use std::collections::HashMap;

/// Which eligibility predicate removed a physician from a session's candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EliminationReason {
    Unavailable,
    MissingSkill,
    WorkdayMismatch,
    WeekRuleMismatch,
}

/// Emitted for every session whose eligible set turned out empty after §4.3.
/// A physician can appear in more than one reason bucket — the histogram counts
/// per-predicate eliminations independently, not a partition of the physician pool.
#[derive(Debug, Clone, Default)]
pub struct SessionDiagnostic {
    pub session_id: String,
    pub reason_histogram: HashMap<EliminationReason, usize>,
}

/// Minimal (date-or-horizon, required, available) triple explaining a `ModelInfeasible`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaturationWitness {
    /// Either an ISO date (`YYYY-MM-DD`) or the literal `"horizon"`.
    pub scope: String,
    pub required: usize,
    pub available: usize,
}

impl std::fmt::Display for SaturationWitness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} requires {} physicians but only {} are available",
            self.scope, self.required, self.available
        )
    }
}
