use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::NaiveDate;
use eligibility_cell::EligibilityReport;
use shared_models::{PhysicianIdx, PlanningInput, SaturationWitness, SessionIdx};
use tracing::{debug, info};

use crate::model::{CpSatModel, SolveStatus, VarId};

/// Outcome of a solve. `Feasible` covers both a solve that ran out its time
/// budget and one HiGHS reports optimal without this crate being able to tell
/// the difference; `bound` is `None` unless the solver actually reported a
/// dual bound distinct from the achieved score, so callers never mistake an
/// unproven result for a proof of optimality.
pub enum SolveOutcome {
    Optimal {
        assignment: HashMap<SessionIdx, PhysicianIdx>,
        total_score: i64,
    },
    Feasible {
        assignment: HashMap<SessionIdx, PhysicianIdx>,
        total_score: i64,
        bound: Option<i64>,
    },
    Infeasible {
        witness: SaturationWitness,
    },
    Unknown {
        message: String,
    },
}

/// Builds the constraint model from the eligibility report, grounded on the
/// teacher's `ConflictDetectionService` (pairwise overlap over one physician's
/// sessions) and `AdvancedSchedulerService` (per-physician daily capacity
/// reasoning), then hands it to HiGHS.
pub fn solve(
    input: &PlanningInput,
    eligibility: &EligibilityReport,
    deadline: Duration,
    seed: i64,
    workers: u32,
) -> SolveOutcome {
    let mut model = CpSatModel::new();
    let mut vars: HashMap<(SessionIdx, PhysicianIdx), VarId> = HashMap::new();

    for (&session_idx, candidates) in &eligibility.eligible {
        for &physician_idx in candidates {
            vars.insert((session_idx, physician_idx), model.add_binary_var());
        }
    }

    // Exactly one physician per modeled session.
    for (&session_idx, candidates) in &eligibility.eligible {
        let terms: Vec<(VarId, f64)> = candidates
            .iter()
            .map(|&p| (vars[&(session_idx, p)], 1.0))
            .collect();
        model.add_linear_eq(&terms, 1.0);
    }

    // Monthly capacity per physician, over the sessions they are eligible for.
    let mut sessions_by_physician: HashMap<PhysicianIdx, Vec<SessionIdx>> = HashMap::new();
    for (&session_idx, candidates) in &eligibility.eligible {
        for &physician_idx in candidates {
            sessions_by_physician.entry(physician_idx).or_default().push(session_idx);
        }
    }
    for physician in &input.physicians {
        let Some(sessions) = sessions_by_physician.get(&physician.idx) else {
            continue;
        };
        let terms: Vec<(VarId, f64)> = sessions
            .iter()
            .map(|&s| (vars[&(s, physician.idx)], 1.0))
            .collect();
        model.add_linear_leq(&terms, physician.max_sessions as f64);
    }

    // No same-day overlap per physician.
    for physician in &input.physicians {
        let Some(sessions) = sessions_by_physician.get(&physician.idx) else {
            continue;
        };
        let mut by_date: HashMap<NaiveDate, Vec<SessionIdx>> = HashMap::new();
        for &s in sessions {
            by_date.entry(input.session(s).date).or_default().push(s);
        }
        for same_day in by_date.values() {
            for i in 0..same_day.len() {
                for j in (i + 1)..same_day.len() {
                    let (s1, s2) = (same_day[i], same_day[j]);
                    if input.session(s1).overlaps(input.session(s2)) {
                        let terms = [
                            (vars[&(s1, physician.idx)], 1.0),
                            (vars[&(s2, physician.idx)], 1.0),
                        ];
                        model.add_linear_leq(&terms, 1.0);
                    }
                }
            }
        }
    }

    // Objective: maximize total preference score.
    let objective_terms: Vec<(VarId, f64)> = vars
        .iter()
        .map(|(&(session_idx, physician_idx), &var)| {
            let location = input.session(session_idx).location;
            (var, input.preference_score(physician_idx, location) as f64)
        })
        .collect();
    model.set_objective_max(&objective_terms);

    debug!(variables = vars.len(), "handing model to HiGHS");
    let solved = model.solve(deadline, seed, workers);

    match solved.status() {
        SolveStatus::Optimal | SolveStatus::Feasible => {
            let mut assignment = HashMap::new();
            for (&(session_idx, physician_idx), &var) in &vars {
                if solved.is_set(var) {
                    assignment.insert(session_idx, physician_idx);
                }
            }
            let total_score = solved.objective_value().unwrap_or(0.0).round() as i64;
            info!(assigned = assignment.len(), total_score, "solve finished");
            match solved.status() {
                SolveStatus::Optimal => SolveOutcome::Optimal { assignment, total_score },
                _ => SolveOutcome::Feasible { assignment, total_score, bound: None },
            }
        }
        SolveStatus::Infeasible => {
            let witness = saturation_witness(input, eligibility);
            info!(scope = %witness.scope, required = witness.required, available = witness.available, "model is infeasible");
            SolveOutcome::Infeasible { witness }
        }
        SolveStatus::Unknown(message) => {
            info!(%message, "solver returned an unclassified result");
            SolveOutcome::Unknown { message: message.clone() }
        }
    }
}

/// Greedily finds the tightest over-saturated (date-or-horizon, required,
/// available) triple explaining an infeasible model. Not an exact minimal
/// witness — a greedy scan over the horizon and each individual date, picking
/// the largest required-minus-available deficit.
fn saturation_witness(input: &PlanningInput, eligibility: &EligibilityReport) -> SaturationWitness {
    let mut per_physician_load: HashMap<PhysicianIdx, usize> = HashMap::new();
    for candidates in eligibility.eligible.values() {
        for &physician_idx in candidates {
            *per_physician_load.entry(physician_idx).or_insert(0) += 1;
        }
    }
    let available_horizon: usize = per_physician_load
        .iter()
        .map(|(&physician_idx, &load)| (input.physician(physician_idx).max_sessions as usize).min(load))
        .sum();
    let mut candidates = vec![SaturationWitness {
        scope: "horizon".to_string(),
        required: eligibility.eligible.len(),
        available: available_horizon,
    }];

    let mut sessions_by_date: HashMap<NaiveDate, Vec<SessionIdx>> = HashMap::new();
    for &session_idx in eligibility.eligible.keys() {
        sessions_by_date
            .entry(input.session(session_idx).date)
            .or_default()
            .push(session_idx);
    }
    for (date, sessions) in &sessions_by_date {
        let mut physicians: HashSet<PhysicianIdx> = HashSet::new();
        for &s in sessions {
            physicians.extend(eligibility.eligible.get(&s).into_iter().flatten().copied());
        }
        candidates.push(SaturationWitness {
            scope: date.format("%Y-%m-%d").to_string(),
            required: sessions.len(),
            available: physicians.len(),
        });
    }

    candidates
        .into_iter()
        .max_by_key(|w| w.required as i64 - w.available as i64)
        .expect("candidates always has at least the horizon entry")
}
