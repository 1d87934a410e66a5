use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use eligibility_cell::compute_eligibility;
use shared_models::{Location, LocationIdx, Physician, PhysicianIdx, PlanningInput, Session, SessionIdx};
use solver_cell::{materialize, solve, SolveOutcome};

fn location(idx: usize, id: &str) -> Location {
    Location {
        idx: LocationIdx(idx),
        id: id.to_string(),
        name: id.to_string(),
        default_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        default_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    }
}

fn physician(idx: usize, id: &str, max_sessions: u32) -> Physician {
    Physician {
        idx: PhysicianIdx(idx),
        id: id.to_string(),
        name: format!("Dr. {id}"),
        max_sessions,
        unavailable_dates: HashSet::new(),
        skills: HashSet::new(),
    }
}

fn session(
    idx: usize,
    id: &str,
    date: NaiveDate,
    location: LocationIdx,
    start: (u32, u32),
    end: (u32, u32),
) -> Session {
    Session {
        idx: SessionIdx(idx),
        id: id.to_string(),
        date,
        location,
        start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        required_skill: None,
        room: None,
    }
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, day).unwrap()
}

fn run(input: &PlanningInput) -> (SolveOutcome, eligibility_cell::EligibilityReport) {
    let eligibility = compute_eligibility(input);
    let outcome = solve(input, &eligibility, Duration::from_secs(5), 1, 1);
    (outcome, eligibility)
}

#[test]
fn single_physician_covers_all_sessions_in_one_week() {
    let mut input = PlanningInput {
        physicians: vec![physician(0, "p1", 5)],
        locations: vec![location(0, "L1")],
        sessions: vec![
            session(0, "s1", date(27), LocationIdx(0), (9, 0), (10, 0)),
            session(1, "s2", date(28), LocationIdx(0), (9, 0), (10, 0)),
            session(2, "s3", date(29), LocationIdx(0), (9, 0), (10, 0)),
        ],
        ..Default::default()
    };
    input.rooms = Vec::new();

    let (outcome, eligibility) = run(&input);
    match outcome {
        SolveOutcome::Optimal { assignment, total_score } => {
            assert_eq!(assignment.len(), 3);
            assert_eq!(total_score, 0);
        }
        _ => panic!("expected Optimal"),
    }
    assert!(eligibility.diagnostics.is_empty());
}

#[test]
fn exceeding_total_physician_capacity_reports_a_horizon_witness() {
    let input = PlanningInput {
        physicians: vec![physician(0, "p1", 1), physician(1, "p2", 1)],
        locations: vec![location(0, "L1")],
        sessions: vec![
            session(0, "s1", date(27), LocationIdx(0), (9, 0), (10, 0)),
            session(1, "s2", date(28), LocationIdx(0), (9, 0), (10, 0)),
            session(2, "s3", date(29), LocationIdx(0), (9, 0), (10, 0)),
        ],
        ..Default::default()
    };

    let (outcome, _) = run(&input);
    match outcome {
        SolveOutcome::Infeasible { witness } => {
            assert_eq!(witness.scope, "horizon");
            assert_eq!(witness.required, 3);
            assert_eq!(witness.available, 2);
        }
        _ => panic!("expected Infeasible"),
    }
}

#[test]
fn required_skill_routes_the_session_to_the_physician_who_holds_it() {
    let mut a = physician(0, "A", 5);
    a.skills.insert("algemeen".into());
    let mut b = physician(1, "B", 5);
    b.skills.insert("algemeen".into());
    b.skills.insert("cardio".into());

    let mut required = session(0, "s1", date(27), LocationIdx(0), (9, 0), (10, 0));
    required.required_skill = Some("cardio".into());

    let input = PlanningInput {
        physicians: vec![a, b],
        locations: vec![location(0, "L1")],
        sessions: vec![required],
        ..Default::default()
    };

    let (outcome, _) = run(&input);
    match outcome {
        SolveOutcome::Optimal { assignment, .. } => {
            assert_eq!(assignment.get(&SessionIdx(0)), Some(&PhysicianIdx(1)));
        }
        _ => panic!("expected Optimal"),
    }
}

#[test]
fn overlapping_sessions_on_the_same_day_go_to_different_physicians() {
    let input = PlanningInput {
        physicians: vec![physician(0, "A", 2), physician(1, "B", 2)],
        locations: vec![location(0, "L1")],
        sessions: vec![
            session(0, "s1", date(27), LocationIdx(0), (9, 0), (10, 0)),
            session(1, "s2", date(27), LocationIdx(0), (9, 30), (10, 30)),
        ],
        ..Default::default()
    };

    let (outcome, _) = run(&input);
    match outcome {
        SolveOutcome::Optimal { assignment, .. } => {
            let p1 = assignment[&SessionIdx(0)];
            let p2 = assignment[&SessionIdx(1)];
            assert_ne!(p1, p2);
        }
        _ => panic!("expected Optimal"),
    }
}

#[test]
fn week_rule_pinning_a_physician_to_one_location_excludes_sessions_elsewhere() {
    let physician_a = physician(0, "A", 5);
    let l1 = location(0, "L1");
    let l2 = location(1, "L2");

    // Second Tuesday of July 2026 is 2026-07-14.
    let target = date(14);
    assert_eq!(shared_models::entities::weekday_of(target), 2);
    assert_eq!(shared_models::entities::week_of_month(target), 2);

    let mut week_rules = HashMap::new();
    week_rules.insert((PhysicianIdx(0), 2u8, 2u8), LocationIdx(0));

    let input = PlanningInput {
        physicians: vec![physician_a],
        locations: vec![l1, l2],
        sessions: vec![session(0, "s1", target, LocationIdx(1), (9, 0), (10, 0))],
        week_rules,
        ..Default::default()
    };

    let eligibility = compute_eligibility(&input);
    assert!(eligibility.eligible.is_empty());
    assert_eq!(eligibility.diagnostics.len(), 1);
}

#[test]
fn higher_preference_score_wins_the_session_over_a_negative_scorer() {
    let a = physician(0, "A", 5);
    let b = physician(1, "B", 5);
    let l1 = location(0, "L1");

    let mut preferences = HashMap::new();
    preferences.insert((PhysicianIdx(0), LocationIdx(0)), 5);
    preferences.insert((PhysicianIdx(1), LocationIdx(0)), -3);

    let input = PlanningInput {
        physicians: vec![a, b],
        locations: vec![l1],
        sessions: vec![session(0, "s1", date(27), LocationIdx(0), (9, 0), (10, 0))],
        preferences,
        ..Default::default()
    };

    let (outcome, eligibility) = run(&input);
    match outcome {
        SolveOutcome::Optimal { assignment, total_score } => {
            assert_eq!(assignment.get(&SessionIdx(0)), Some(&PhysicianIdx(0)));
            assert_eq!(total_score, 5);
            let schedule = materialize(&input, &SolveOutcome::Optimal { assignment, total_score }, &eligibility.diagnostics).unwrap();
            assert_eq!(schedule.total_score, 5);
            assert_eq!(schedule.rows[0].physician_id.as_deref(), Some("A"));
        }
        _ => panic!("expected Optimal"),
    }
}
