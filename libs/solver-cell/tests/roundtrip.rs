use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use eligibility_cell::compute_eligibility;
use shared_models::{Location, LocationIdx, Physician, PhysicianIdx, PlanningInput, Session, SessionIdx};
use solver_cell::{materialize, solve};

fn location(idx: usize, id: &str) -> Location {
    Location {
        idx: LocationIdx(idx),
        id: id.to_string(),
        name: id.to_string(),
        default_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        default_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    }
}

fn physician(idx: usize, id: &str) -> Physician {
    Physician {
        idx: PhysicianIdx(idx),
        id: id.to_string(),
        name: format!("Dr. {id}"),
        max_sessions: 5,
        unavailable_dates: HashSet::new(),
        skills: HashSet::new(),
    }
}

fn session(idx: usize, id: &str, date: NaiveDate, start: (u32, u32), end: (u32, u32)) -> Session {
    Session {
        idx: SessionIdx(idx),
        id: id.to_string(),
        date,
        location: LocationIdx(0),
        start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        required_skill: None,
        room: None,
    }
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, day).unwrap()
}

fn solve_input(input: &PlanningInput) -> HashMap<SessionIdx, PhysicianIdx> {
    let eligibility = compute_eligibility(input);
    let outcome = solve(input, &eligibility, Duration::from_secs(5), 1, 1);
    let schedule = materialize(input, &outcome, &eligibility.diagnostics).unwrap();
    schedule
        .rows
        .iter()
        .filter_map(|row| {
            let physician_id = row.physician_id.as_deref()?;
            let physician_idx = input
                .physicians
                .iter()
                .find(|p| p.id == physician_id)
                .map(|p| p.idx)?;
            let session_idx = input
                .sessions
                .iter()
                .find(|s| s.id == row.session_id)
                .map(|s| s.idx)?;
            Some((session_idx, physician_idx))
        })
        .collect()
}

/// Writes a schedule, then rebuilds an input where each session's required
/// skill names only the physician the first solve assigned it to — the same
/// hard-filter mechanism already used for real skill requirements, used here
/// to pin eligibility down to a single doctor per session. Re-solving against
/// that input must reproduce the first solve's assignment exactly, since there
/// is no longer any other feasible choice for any session.
#[test]
fn replanning_against_the_written_schedule_with_pinned_doctors_reproduces_the_assignment() {
    let physicians = vec![physician(0, "A"), physician(1, "B"), physician(2, "C")];
    let sessions = vec![
        session(0, "s1", date(27), (9, 0), (10, 0)),
        session(1, "s2", date(28), (9, 0), (10, 0)),
        session(2, "s3", date(29), (9, 0), (10, 0)),
        session(3, "s4", date(30), (9, 0), (10, 0)),
    ];
    let first_input = PlanningInput {
        physicians: physicians.clone(),
        locations: vec![location(0, "L1")],
        sessions: sessions.clone(),
        ..Default::default()
    };

    let first_assignment = solve_input(&first_input);
    assert_eq!(first_assignment.len(), sessions.len(), "every session should be covered");

    let mut pinned_physicians = physicians;
    for physician in &mut pinned_physicians {
        physician.skills.clear();
    }
    let mut pinned_sessions = sessions;
    for session in &mut pinned_sessions {
        let assigned = first_assignment[&session.idx];
        let pin = format!("only-doctor-{}", assigned.index());
        pinned_physicians[assigned.index()].skills.insert(pin.clone());
        session.required_skill = Some(pin);
    }

    let second_input = PlanningInput {
        physicians: pinned_physicians,
        locations: vec![location(0, "L1")],
        sessions: pinned_sessions,
        ..Default::default()
    };
    let second_assignment = solve_input(&second_input);

    assert_eq!(second_assignment, first_assignment);
}
