use std::collections::HashMap;

use shared_models::{PhysicianIdx, PlannerError, PlanningInput, Schedule, ScheduleRow, SessionDiagnostic, SessionIdx};

use crate::driver::SolveOutcome;

/// Reconstructs the final typed schedule from a solver outcome. Every session
/// in `input`, including structurally infeasible ones, gets exactly
/// one row; unassigned sessions carry `None` physician fields and a zero
/// contribution. Recomputes the total from the materialized rows and rejects a
/// mismatch against the solver's reported objective as `PlannerError::Internal` —
/// the one place this pipeline refuses to trust its own solver layer blindly.
pub fn materialize(
    input: &PlanningInput,
    outcome: &SolveOutcome,
    structurally_infeasible: &[SessionDiagnostic],
) -> Result<Schedule, PlannerError> {
    let (assignment, reported_total): (HashMap<SessionIdx, PhysicianIdx>, i64) = match outcome {
        SolveOutcome::Optimal { assignment, total_score } => (assignment.clone(), *total_score),
        SolveOutcome::Feasible { assignment, total_score, .. } => (assignment.clone(), *total_score),
        SolveOutcome::Infeasible { .. } | SolveOutcome::Unknown { .. } => {
            return Err(PlannerError::Internal(
                "materialize called on a non-assignable solve outcome".to_string(),
            ));
        }
    };

    let mut rows = Vec::with_capacity(input.sessions.len());
    for session in &input.sessions {
        let location = input.location(session.location);
        let assigned = assignment.get(&session.idx).copied();

        let (physician_id, physician_name, preference_score) = match assigned {
            Some(physician_idx) => {
                let physician = input.physician(physician_idx);
                (
                    Some(physician.id.clone()),
                    Some(physician.name.clone()),
                    input.preference_score(physician_idx, session.location),
                )
            }
            None => (None, None, 0),
        };

        rows.push(ScheduleRow {
            session_id: session.id.clone(),
            date: session.date,
            location_id: location.id.clone(),
            room: session.room.clone(),
            start: session.start,
            end: session.end,
            required_skill: session.required_skill.clone(),
            physician_id,
            physician_name,
            preference_score,
        });
    }

    let travel_time_diagnostics = input
        .travel_times
        .iter()
        .map(|(&(from, to), &minutes)| {
            ((input.location(from).id.clone(), input.location(to).id.clone()), minutes)
        })
        .collect();

    let mut schedule = Schedule {
        rows,
        total_score: reported_total,
        infeasible_sessions: structurally_infeasible.to_vec(),
        travel_time_diagnostics,
    };
    schedule.sort();

    let recomputed = schedule.recomputed_total();
    if recomputed != reported_total {
        return Err(PlannerError::Internal(format!(
            "objective mismatch: solver reported {reported_total} but materialized rows sum to {recomputed}"
        )));
    }

    Ok(schedule)
}
