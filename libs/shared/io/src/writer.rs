use std::path::Path;

use anyhow::{Context, Result};
use shared_models::Schedule;
use tracing::debug;

/// Writes the output CSV shape:
/// `session_id, date, start_time, end_time, location_id, room, required_skill,
/// doctor_id, doctor_name, preference_score`.
///
/// Rows are written in the order `schedule.rows` already holds them — the
/// materializer is responsible for sorting; this function never reorders, which
/// is what makes the output byte-identical for identical inputs.
pub fn write_schedule_csv(schedule: &Schedule, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer.write_record([
        "session_id",
        "date",
        "start_time",
        "end_time",
        "location_id",
        "room",
        "required_skill",
        "doctor_id",
        "doctor_name",
        "preference_score",
    ])?;

    for row in &schedule.rows {
        writer.write_record([
            row.session_id.as_str(),
            &row.date.format("%Y-%m-%d").to_string(),
            &row.start.format("%H:%M").to_string(),
            &row.end.format("%H:%M").to_string(),
            row.location_id.as_str(),
            row.room.as_deref().unwrap_or(""),
            row.required_skill.as_deref().unwrap_or(""),
            row.physician_id.as_deref().unwrap_or(""),
            row.physician_name.as_deref().unwrap_or(""),
            &row.preference_score.to_string(),
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    debug!(rows = schedule.rows.len(), path = %path.display(), "wrote schedule csv");
    Ok(())
}
