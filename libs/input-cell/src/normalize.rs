use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime};
use shared_models::{
    Location, LocationIdx, PhysicianIdx, PlannerError, PlanningInput, Physician, Room, Session,
};
use shared_utils::{parse_weekday_token, split_multivalue};
use tracing::warn;

use crate::index::IdIndex;
use crate::raw::{
    DoctorRow, LocationRow, PreferenceRow, RoomRow, SessionRow, TravelTimeRow, WeekRuleRow,
    WorkdayRow,
};

/// Raw rows for every entity family, each paired with its 0-based row index for
/// error attribution. Ancillary tables are `Option` because they are optional
/// CLI inputs.
#[derive(Debug, Default)]
pub struct RawTables {
    pub physicians: Vec<(usize, DoctorRow)>,
    pub locations: Vec<(usize, LocationRow)>,
    pub rooms: Option<Vec<(usize, RoomRow)>>,
    pub sessions: Vec<(usize, SessionRow)>,
    pub preferences: Option<Vec<(usize, PreferenceRow)>>,
    pub travel_times: Option<Vec<(usize, TravelTimeRow)>>,
    pub workday_rules: Option<Vec<(usize, WorkdayRow)>>,
    pub week_rules: Option<Vec<(usize, WeekRuleRow)>>,
}

fn malformed(source: &str, row: usize, column: &str, reason: impl Into<String>) -> PlannerError {
    PlannerError::InputMalformed {
        source: source.to_string(),
        row,
        column: column.to_string(),
        reason: reason.into(),
    }
}

fn inconsistent(source: &str, row: usize, reason: impl Into<String>) -> PlannerError {
    PlannerError::InputInconsistent {
        source: source.to_string(),
        row,
        reason: reason.into(),
    }
}

fn parse_date(source: &str, row: usize, column: &str, raw: &str) -> Result<NaiveDate, PlannerError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| malformed(source, row, column, format!("invalid date '{raw}': {e}")))
}

fn parse_time(source: &str, row: usize, column: &str, raw: &str) -> Result<NaiveTime, PlannerError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|e| malformed(source, row, column, format!("invalid HH:MM time '{raw}': {e}")))
}

fn parse_u32(source: &str, row: usize, column: &str, raw: &str) -> Result<u32, PlannerError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| malformed(source, row, column, format!("expected a non-negative integer, got '{raw}'")))
}

fn parse_u8(source: &str, row: usize, column: &str, raw: &str) -> Result<u8, PlannerError> {
    raw.trim()
        .parse::<u8>()
        .map_err(|_| malformed(source, row, column, format!("expected a small integer, got '{raw}'")))
}

fn parse_i64(source: &str, row: usize, column: &str, raw: &str) -> Result<i64, PlannerError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| malformed(source, row, column, format!("expected an integer, got '{raw}'")))
}

fn parse_locations(
    rows: &[(usize, LocationRow)],
    index: &mut IdIndex,
) -> Result<Vec<Location>, PlannerError> {
    const SOURCE: &str = "locations.csv";
    let mut locations = Vec::with_capacity(rows.len());
    for (row, raw) in rows {
        if index.locations.contains_key(&raw.location_id) {
            return Err(malformed(SOURCE, *row, "location_id", "duplicate location_id"));
        }
        let idx = LocationIdx(locations.len());
        let default_start = parse_time(SOURCE, *row, "default_start_time", &raw.default_start_time)?;
        let default_end = parse_time(SOURCE, *row, "default_end_time", &raw.default_end_time)?;
        index.locations.insert(raw.location_id.clone(), idx);
        locations.push(Location {
            idx,
            id: raw.location_id.clone(),
            name: raw.name.clone(),
            default_start,
            default_end,
        });
    }
    Ok(locations)
}

fn parse_rooms(rows: &[(usize, RoomRow)], index: &IdIndex) -> Vec<Room> {
    const SOURCE: &str = "rooms.csv";
    let mut seen: HashSet<(LocationIdx, String)> = HashSet::new();
    let mut rooms = Vec::new();
    for (row, raw) in rows {
        let Some(&location) = index.locations.get(&raw.location_id) else {
            warn!("{SOURCE} row {row}: unknown location_id '{}', skipping orphan room", raw.location_id);
            continue;
        };
        let key = (location, raw.name.clone());
        if !seen.insert(key) {
            warn!("{SOURCE} row {row}: duplicate (location_id, name), skipping");
            continue;
        }
        rooms.push(Room {
            idx: shared_models::RoomIdx(rooms.len()),
            id: raw.room_id.clone(),
            location,
            name: raw.name.clone(),
        });
    }
    rooms
}

fn parse_physicians(
    rows: &[(usize, DoctorRow)],
    index: &mut IdIndex,
) -> Result<Vec<Physician>, PlannerError> {
    const SOURCE: &str = "doctors.csv";
    let mut physicians = Vec::with_capacity(rows.len());
    for (row, raw) in rows {
        if index.physicians.contains_key(&raw.doctor_id) {
            return Err(malformed(SOURCE, *row, "doctor_id", "duplicate doctor_id"));
        }
        let idx = PhysicianIdx(physicians.len());
        let max_sessions = parse_u32(SOURCE, *row, "max_sessions", &raw.max_sessions)?;

        let mut unavailable_dates = HashSet::new();
        for token in split_multivalue(&raw.unavailable_dates) {
            unavailable_dates.insert(parse_date(SOURCE, *row, "unavailable_dates", &token)?);
        }

        let skills: HashSet<String> = split_multivalue(&raw.skills).into_iter().collect();

        index.physicians.insert(raw.doctor_id.clone(), idx);
        physicians.push(Physician {
            idx,
            id: raw.doctor_id.clone(),
            name: raw.name.clone(),
            max_sessions,
            unavailable_dates,
            skills,
        });
    }
    Ok(physicians)
}

fn parse_sessions(
    rows: &[(usize, SessionRow)],
    index: &mut IdIndex,
) -> Result<Vec<Session>, PlannerError> {
    const SOURCE: &str = "sessions.csv";
    let mut sessions = Vec::with_capacity(rows.len());
    for (row, raw) in rows {
        if index.sessions.contains_key(&raw.session_id) {
            return Err(malformed(SOURCE, *row, "session_id", "duplicate session_id"));
        }
        let location = *index
            .locations
            .get(&raw.location_id)
            .ok_or_else(|| inconsistent(SOURCE, *row, format!("unknown location_id '{}'", raw.location_id)))?;

        let date = parse_date(SOURCE, *row, "date", &raw.date)?;
        let start = parse_time(SOURCE, *row, "start_time", &raw.start_time)?;
        let end = parse_time(SOURCE, *row, "end_time", &raw.end_time)?;
        if end <= start {
            return Err(malformed(SOURCE, *row, "end_time", "end_time must be after start_time"));
        }

        let idx = shared_models::SessionIdx(sessions.len());
        index.sessions.insert(raw.session_id.clone(), idx);
        sessions.push(Session {
            idx,
            id: raw.session_id.clone(),
            date,
            location,
            start,
            end,
            required_skill: non_empty(&raw.required_skill),
            room: non_empty(&raw.room),
        });
    }
    Ok(sessions)
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_preferences(
    rows: &[(usize, PreferenceRow)],
    index: &IdIndex,
) -> Result<HashMap<(PhysicianIdx, LocationIdx), i64>, PlannerError> {
    const SOURCE: &str = "preferences.csv";
    let mut preferences = HashMap::new();
    for (row, raw) in rows {
        let Some(&physician) = index.physicians.get(&raw.doctor_id) else {
            warn!("{SOURCE} row {row}: unknown doctor_id '{}', skipping", raw.doctor_id);
            continue;
        };
        let Some(&location) = index.locations.get(&raw.location_id) else {
            warn!("{SOURCE} row {row}: unknown location_id '{}', skipping", raw.location_id);
            continue;
        };
        let score = parse_i64(SOURCE, *row, "score", &raw.score)?;
        if let std::collections::hash_map::Entry::Vacant(entry) = preferences.entry((physician, location)) {
            entry.insert(score);
        } else {
            warn!(
                "{SOURCE} row {row}: duplicate (doctor_id, location_id) pair, keeping the first score seen"
            );
        }
    }
    Ok(preferences)
}

fn parse_travel_times(
    rows: &[(usize, TravelTimeRow)],
    index: &IdIndex,
) -> Result<HashMap<(LocationIdx, LocationIdx), u32>, PlannerError> {
    const SOURCE: &str = "travel_times.csv";
    let mut travel_times = HashMap::new();
    for (row, raw) in rows {
        let Some(&from) = index.locations.get(&raw.from_location_id) else {
            warn!("{SOURCE} row {row}: unknown from_location_id '{}', skipping", raw.from_location_id);
            continue;
        };
        let Some(&to) = index.locations.get(&raw.to_location_id) else {
            warn!("{SOURCE} row {row}: unknown to_location_id '{}', skipping", raw.to_location_id);
            continue;
        };
        let minutes = parse_u32(SOURCE, *row, "minutes", &raw.minutes)?;
        travel_times.insert((from, to), minutes);
    }
    Ok(travel_times)
}

fn parse_workday_rules(
    rows: &[(usize, WorkdayRow)],
    index: &IdIndex,
) -> Result<HashMap<PhysicianIdx, HashSet<u8>>, PlannerError> {
    const SOURCE: &str = "doctor_workdays.csv";
    let mut rules: HashMap<PhysicianIdx, HashSet<u8>> = HashMap::new();
    for (row, raw) in rows {
        let Some(&physician) = index.physicians.get(&raw.doctor_id) else {
            warn!("{SOURCE} row {row}: unknown doctor_id '{}', skipping", raw.doctor_id);
            continue;
        };
        let weekday = parse_weekday_token(&raw.weekday)
            .map_err(|e| malformed(SOURCE, *row, "weekday", e.to_string()))?;
        rules.entry(physician).or_default().insert(weekday);
    }
    Ok(rules)
}

fn parse_week_rules(
    rows: &[(usize, WeekRuleRow)],
    index: &IdIndex,
) -> Result<HashMap<(PhysicianIdx, u8, u8), LocationIdx>, PlannerError> {
    const SOURCE: &str = "doctor_week_rules.csv";
    let mut rules: HashMap<(PhysicianIdx, u8, u8), LocationIdx> = HashMap::new();
    for (row, raw) in rows {
        let Some(&physician) = index.physicians.get(&raw.doctor_id) else {
            warn!("{SOURCE} row {row}: unknown doctor_id '{}', skipping", raw.doctor_id);
            continue;
        };
        let Some(&location) = index.locations.get(&raw.location_id) else {
            warn!("{SOURCE} row {row}: unknown location_id '{}', skipping", raw.location_id);
            continue;
        };
        let week = parse_u8(SOURCE, *row, "week_of_month", &raw.week_of_month)?;
        if !(1..=5).contains(&week) {
            return Err(malformed(SOURCE, *row, "week_of_month", format!("must be 1-5, got {week}")));
        }
        let weekday = parse_weekday_token(&raw.weekday)
            .map_err(|e| malformed(SOURCE, *row, "weekday", e.to_string()))?;

        let key = (physician, week, weekday);
        match rules.get(&key) {
            None => {
                rules.insert(key, location);
            }
            Some(&existing) if existing == location => {
                // Identical duplicate: repeating the same rule is harmless, not a conflict.
            }
            Some(_) => {
                warn!(
                    "{SOURCE} row {row}: conflicting week rule for doctor '{}' (week {week}, weekday {weekday}) \
                     names a different location than an earlier row; keeping the first",
                    raw.doctor_id
                );
            }
        }
    }
    Ok(rules)
}

/// Converts raw tabular rows into the typed, arena-indexed `PlanningInput` every
/// later stage reads by reference. Fails fast on malformed rows; silently accepts
/// nothing — every skip is logged.
pub fn normalize(tables: RawTables, default_preference_score: i64) -> Result<PlanningInput, PlannerError> {
    let mut index = IdIndex::default();

    let locations = parse_locations(&tables.locations, &mut index)?;
    let rooms = tables
        .rooms
        .as_deref()
        .map(|rows| parse_rooms(rows, &index))
        .unwrap_or_default();
    let physicians = parse_physicians(&tables.physicians, &mut index)?;
    let sessions = parse_sessions(&tables.sessions, &mut index)?;

    let preferences = tables
        .preferences
        .as_deref()
        .map(|rows| parse_preferences(rows, &index))
        .transpose()?
        .unwrap_or_default();
    let travel_times = tables
        .travel_times
        .as_deref()
        .map(|rows| parse_travel_times(rows, &index))
        .transpose()?
        .unwrap_or_default();
    let workday_rules = tables
        .workday_rules
        .as_deref()
        .map(|rows| parse_workday_rules(rows, &index))
        .transpose()?
        .unwrap_or_default();
    let week_rules = tables
        .week_rules
        .as_deref()
        .map(|rows| parse_week_rules(rows, &index))
        .transpose()?
        .unwrap_or_default();

    Ok(PlanningInput {
        physicians,
        locations,
        rooms,
        sessions,
        preferences,
        travel_times,
        workday_rules,
        week_rules,
        default_preference_score,
    })
}
