use std::collections::HashMap;

use shared_models::{
    entities::{week_of_month, weekday_of},
    EliminationReason, PhysicianIdx, PlanningInput, Session, SessionDiagnostic, SessionIdx,
};
use tracing::debug;

/// Eligibility for every session after applying the four hard-filter predicates.
/// Sessions with an empty eligible set are dropped from `eligible` and recorded
/// in `diagnostics` instead — the constraint builder never sees them.
#[derive(Debug, Default)]
pub struct EligibilityReport {
    pub eligible: HashMap<SessionIdx, Vec<PhysicianIdx>>,
    pub diagnostics: Vec<SessionDiagnostic>,
}

fn passes_unavailability(input: &PlanningInput, physician: PhysicianIdx, session: &Session) -> bool {
    !input.physician(physician).unavailable_dates.contains(&session.date)
}

fn passes_skill(input: &PlanningInput, physician: PhysicianIdx, session: &Session) -> bool {
    match &session.required_skill {
        Some(skill) => input.physician(physician).skills.contains(skill),
        None => true,
    }
}

fn passes_workday(input: &PlanningInput, physician: PhysicianIdx, session: &Session) -> bool {
    input.workday_allows(physician, weekday_of(session.date))
}

fn passes_week_rule(input: &PlanningInput, physician: PhysicianIdx, session: &Session) -> bool {
    match input.week_rule_location(physician, week_of_month(session.date), weekday_of(session.date)) {
        Some(required_location) => required_location == session.location,
        None => true,
    }
}

/// Funnel-filters the physician arena against every hard predicate for a single
/// session, counting which predicate eliminated which candidates independently
/// (a physician removed by two predicates is counted in both buckets).
fn eligible_for_session(
    input: &PlanningInput,
    session: &Session,
) -> (Vec<PhysicianIdx>, HashMap<EliminationReason, usize>) {
    let mut eligible = Vec::new();
    let mut histogram = HashMap::new();

    for physician in &input.physicians {
        let checks = [
            (passes_unavailability(input, physician.idx, session), EliminationReason::Unavailable),
            (passes_skill(input, physician.idx, session), EliminationReason::MissingSkill),
            (passes_workday(input, physician.idx, session), EliminationReason::WorkdayMismatch),
            (passes_week_rule(input, physician.idx, session), EliminationReason::WeekRuleMismatch),
        ];

        let mut passed_all = true;
        for (passed, reason) in checks {
            if !passed {
                passed_all = false;
                *histogram.entry(reason).or_insert(0) += 1;
            }
        }
        if passed_all {
            eligible.push(physician.idx);
        }
    }

    (eligible, histogram)
}

/// Computes eligibility for every session in `input`. This is the only place the
/// four hard-filter predicates are evaluated; the constraint builder consumes the
/// result and never re-derives it.
pub fn compute_eligibility(input: &PlanningInput) -> EligibilityReport {
    let mut report = EligibilityReport::default();

    for session in &input.sessions {
        let (candidates, histogram) = eligible_for_session(input, session);
        if candidates.is_empty() {
            debug!(session_id = %session.id, ?histogram, "no eligible physician for session");
            report.diagnostics.push(SessionDiagnostic {
                session_id: session.id.clone(),
                reason_histogram: histogram,
            });
        } else {
            report.eligible.insert(session.idx, candidates);
        }
    }

    report
}
