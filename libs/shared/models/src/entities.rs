use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime};

use crate::ids::{LocationIdx, PhysicianIdx, RoomIdx, SessionIdx};

/// Monday = 1 .. Sunday = 7.
pub type Weekday = u8;
/// Bucket 1..5, days-of-month 1-7 -> 1, 8-14 -> 2, 15-21 -> 3, 22-28 -> 4, 29-31 -> 5.
pub type WeekOfMonth = u8;

#[derive(Debug, Clone)]
pub struct Physician {
    pub idx: PhysicianIdx,
    pub id: String,
    pub name: String,
    pub max_sessions: u32,
    pub unavailable_dates: HashSet<NaiveDate>,
    pub skills: HashSet<String>,
}

#[derive(Debug, Clone)]
pub struct Location {
    pub idx: LocationIdx,
    pub id: String,
    pub name: String,
    pub default_start: NaiveTime,
    pub default_end: NaiveTime,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub idx: RoomIdx,
    pub id: String,
    pub location: LocationIdx,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub idx: SessionIdx,
    pub id: String,
    pub date: NaiveDate,
    pub location: LocationIdx,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub required_skill: Option<String>,
    /// Free-text room label as it appears in the source row — carried straight
    /// through to output. Not resolved against the `Room` arena: a session's room
    /// is a label, not a foreign key (the `Room` entity exists to validate
    /// `rooms.csv` itself, validated for its own `(location_id, name)` uniqueness).
    pub room: Option<String>,
}

impl Session {
    /// `s1.start < s2.end && s2.start < s1.end` — touching at the boundary is allowed.
    pub fn overlaps(&self, other: &Session) -> bool {
        self.date == other.date && self.start < other.end && other.start < self.end
    }
}

/// All entities produced by normalization, arena-indexed and immutable for the
/// remainder of the planning run. Owned by reference by every downstream stage.
#[derive(Debug, Clone, Default)]
pub struct PlanningInput {
    pub physicians: Vec<Physician>,
    pub locations: Vec<Location>,
    pub rooms: Vec<Room>,
    pub sessions: Vec<Session>,
    pub preferences: HashMap<(PhysicianIdx, LocationIdx), i64>,
    pub travel_times: HashMap<(LocationIdx, LocationIdx), u32>,
    pub workday_rules: HashMap<PhysicianIdx, HashSet<Weekday>>,
    pub week_rules: HashMap<(PhysicianIdx, WeekOfMonth, Weekday), LocationIdx>,
    pub default_preference_score: i64,
}

impl PlanningInput {
    pub fn preference_score(&self, physician: PhysicianIdx, location: LocationIdx) -> i64 {
        self.preferences
            .get(&(physician, location))
            .copied()
            .unwrap_or(self.default_preference_score)
    }

    pub fn travel_time_minutes(&self, from: LocationIdx, to: LocationIdx) -> Option<u32> {
        self.travel_times.get(&(from, to)).copied()
    }

    /// Absence of any rule for a physician means all weekdays are allowed.
    pub fn workday_allows(&self, physician: PhysicianIdx, weekday: Weekday) -> bool {
        match self.workday_rules.get(&physician) {
            Some(days) => days.contains(&weekday),
            None => true,
        }
    }

    pub fn week_rule_location(
        &self,
        physician: PhysicianIdx,
        week: WeekOfMonth,
        weekday: Weekday,
    ) -> Option<LocationIdx> {
        self.week_rules.get(&(physician, week, weekday)).copied()
    }

    pub fn physician(&self, idx: PhysicianIdx) -> &Physician {
        &self.physicians[idx.index()]
    }

    pub fn location(&self, idx: LocationIdx) -> &Location {
        &self.locations[idx.index()]
    }

    pub fn room(&self, idx: RoomIdx) -> &Room {
        &self.rooms[idx.index()]
    }

    pub fn session(&self, idx: SessionIdx) -> &Session {
        &self.sessions[idx.index()]
    }
}

/// Buckets days 1-7/8-14/15-21/22-28/29-31 into weeks 1-5; bucket 5 holds at
/// most 3 days and is empty for any month with 28 days (e.g. February outside
/// a leap year).
pub fn week_of_month(date: NaiveDate) -> WeekOfMonth {
    use chrono::Datelike;
    (((date.day() - 1) / 7) + 1) as WeekOfMonth
}

/// Monday = 1 .. Sunday = 7.
pub fn weekday_of(date: NaiveDate) -> Weekday {
    use chrono::Datelike;
    date.weekday().number_from_monday() as Weekday
}
