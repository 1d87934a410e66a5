use std::path::Path;

use input_cell::{load_csv_tables, normalize, InputPaths};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn loads_and_normalizes_a_small_fixture_set() {
    let doctors = fixture("doctors.csv");
    let locations = fixture("locations.csv");
    let sessions = fixture("sessions.csv");
    let preferences = fixture("preferences.csv");

    let paths = InputPaths {
        doctors: &doctors,
        locations: &locations,
        sessions: &sessions,
        rooms: None,
        preferences: Some(&preferences),
        travel_times: None,
        doctor_workdays: None,
        doctor_week_rules: None,
    };

    let tables = load_csv_tables(&paths).expect("fixture tables should load cleanly");
    let input = normalize(tables, 0).expect("fixture tables should normalize cleanly");

    assert_eq!(input.physicians.len(), 2);
    assert_eq!(input.locations.len(), 1);
    assert_eq!(input.sessions.len(), 3);

    let p1 = input.physicians.iter().find(|p| p.id == "p1").unwrap();
    let p2 = input.physicians.iter().find(|p| p.id == "p2").unwrap();
    let l1 = input.locations.iter().find(|l| l.id == "L1").unwrap();

    assert_eq!(input.preference_score(p1.idx, l1.idx), 5);
    assert_eq!(input.preference_score(p2.idx, l1.idx), -3);

    let s2 = input.sessions.iter().find(|s| s.id == "s2").unwrap();
    assert_eq!(s2.required_skill.as_deref(), Some("cardio"));
    assert!(p1.skills.contains("algemeen") && !p1.skills.contains("cardio"));
    assert!(p2.skills.contains("cardio"));

    let s3 = input.sessions.iter().find(|s| s.id == "s3").unwrap();
    assert_eq!(s3.room.as_deref(), Some("R1"));

    assert!(p2.unavailable_dates.contains(&s3.date));
}

#[test]
fn missing_required_file_is_a_malformed_input_error() {
    let doctors = fixture("doctors.csv");
    let locations = fixture("locations.csv");
    let missing = fixture("does_not_exist.csv");

    let paths = InputPaths {
        doctors: &doctors,
        locations: &locations,
        sessions: &missing,
        rooms: None,
        preferences: None,
        travel_times: None,
        doctor_workdays: None,
        doctor_week_rules: None,
    };

    let err = load_csv_tables(&paths).unwrap_err();
    assert_eq!(err.exit_code(), 1);
}
