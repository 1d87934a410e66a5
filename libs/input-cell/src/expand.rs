use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::HashMap;

use crate::raw::SessionRow;

/// One weekly recurrence rule: "every `weekday`, at `location_id`, from `start` to
/// `end`". Deliberately thin — it is the one place weekly recurrence is turned
/// into concrete `sessions.csv` rows before normalization ever sees them, and
/// nothing else in this crate depends on how a rule set was authored.
#[derive(Debug, Clone)]
pub struct WeeklyTemplate {
    pub weekday: u8,
    pub location_id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub required_skill: Option<String>,
    pub room: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Walks every calendar day in `[range.from, range.to]` and emits one session row
/// per template whose weekday matches that day. Deterministic: the same templates
/// and range always produce the same sequence in the same order, which is what lets
/// session ids collide predictably and get a stable `-<n>` suffix.
pub fn expand(templates: &[WeeklyTemplate], range: DateRange) -> Vec<SessionRow> {
    let mut rows = Vec::new();
    let mut seen_prefixes: HashMap<String, u32> = HashMap::new();

    let mut day = range.from;
    while day <= range.to {
        let weekday = shared_models::weekday_of(day);
        for template in templates {
            if template.weekday != weekday {
                continue;
            }
            let prefix = format!(
                "{}-{}-{}",
                day.format("%Y%m%d"),
                template.location_id,
                template.start_time.format("%H%M")
            );
            let count = seen_prefixes.entry(prefix.clone()).or_insert(0);
            let session_id = if *count == 0 {
                prefix.clone()
            } else {
                format!("{prefix}-{count}")
            };
            *count += 1;

            rows.push(SessionRow {
                session_id,
                date: day.format("%Y-%m-%d").to_string(),
                location_id: template.location_id.clone(),
                start_time: template.start_time.format("%H:%M").to_string(),
                end_time: template.end_time.format("%H:%M").to_string(),
                required_skill: template.required_skill.clone().unwrap_or_default(),
                room: template.room.clone().unwrap_or_default(),
            });
        }
        day += Duration::days(1);
    }

    rows
}
