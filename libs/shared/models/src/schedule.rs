use chrono::{NaiveDate, NaiveTime};

use crate::diagnostics::SessionDiagnostic;

#[derive(Debug, Clone)]
pub struct ScheduleRow {
    pub session_id: String,
    pub date: NaiveDate,
    pub location_id: String,
    pub room: Option<String>,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub required_skill: Option<String>,
    pub physician_id: Option<String>,
    pub physician_name: Option<String>,
    pub preference_score: i64,
}

/// The materializer's output: one row per session, sorted (date ASC, start ASC,
/// session_id ASC), plus the diagnostics a caller needs to act on an incomplete
/// roster (structurally infeasible sessions, and travel-time data that is
/// ingested but not yet consulted by any constraint).
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub rows: Vec<ScheduleRow>,
    pub total_score: i64,
    pub infeasible_sessions: Vec<SessionDiagnostic>,
    pub travel_time_diagnostics: Vec<((String, String), u32)>,
}

impl Schedule {
    pub fn sort(&mut self) {
        self.rows.sort_by(|a, b| {
            (a.date, a.start, &a.session_id).cmp(&(b.date, b.start, &b.session_id))
        });
    }

    pub fn recomputed_total(&self) -> i64 {
        self.rows.iter().map(|r| r.preference_score).sum()
    }
}
