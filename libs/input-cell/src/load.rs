use std::path::Path;

use shared_models::PlannerError;

use crate::normalize::RawTables;
use crate::raw::{
    DoctorRow, LocationRow, PreferenceRow, RoomRow, SessionRow, TravelTimeRow, WeekRuleRow,
    WorkdayRow,
};

fn io_failure(source: &str, err: anyhow::Error) -> PlannerError {
    PlannerError::InputMalformed {
        source: source.to_string(),
        row: 0,
        column: "<file>".to_string(),
        reason: err.to_string(),
    }
}

/// File paths for every CLI input table. Only `doctors`, `locations` and
/// `sessions` are required; the rest mirror the `plan` command's optional flags.
#[derive(Debug, Clone)]
pub struct InputPaths<'a> {
    pub doctors: &'a Path,
    pub locations: &'a Path,
    pub sessions: &'a Path,
    pub rooms: Option<&'a Path>,
    pub preferences: Option<&'a Path>,
    pub travel_times: Option<&'a Path>,
    pub doctor_workdays: Option<&'a Path>,
    pub doctor_week_rules: Option<&'a Path>,
}

/// Reads every CSV table named in `paths` into a `RawTables`, ready for
/// [`crate::normalize::normalize`]. Each file is read independently; a missing
/// required file or unparsable row surfaces as `InputMalformed` naming the file.
pub fn load_csv_tables(paths: &InputPaths<'_>) -> Result<RawTables, PlannerError> {
    let physicians: Vec<(usize, DoctorRow)> = shared_io::read_csv_rows(paths.doctors)
        .map_err(|e| io_failure("doctors.csv", e))?;
    let locations: Vec<(usize, LocationRow)> = shared_io::read_csv_rows(paths.locations)
        .map_err(|e| io_failure("locations.csv", e))?;
    let sessions: Vec<(usize, SessionRow)> = shared_io::read_csv_rows(paths.sessions)
        .map_err(|e| io_failure("sessions.csv", e))?;

    let rooms = paths
        .rooms
        .map(|p| -> Result<Vec<(usize, RoomRow)>, PlannerError> {
            shared_io::read_csv_rows(p).map_err(|e| io_failure("rooms.csv", e))
        })
        .transpose()?;
    let preferences = paths
        .preferences
        .map(|p| -> Result<Vec<(usize, PreferenceRow)>, PlannerError> {
            shared_io::read_csv_rows(p).map_err(|e| io_failure("preferences.csv", e))
        })
        .transpose()?;
    let travel_times = paths
        .travel_times
        .map(|p| -> Result<Vec<(usize, TravelTimeRow)>, PlannerError> {
            shared_io::read_csv_rows(p).map_err(|e| io_failure("travel_times.csv", e))
        })
        .transpose()?;
    let workday_rules = paths
        .doctor_workdays
        .map(|p| -> Result<Vec<(usize, WorkdayRow)>, PlannerError> {
            shared_io::read_csv_rows(p).map_err(|e| io_failure("doctor_workdays.csv", e))
        })
        .transpose()?;
    let week_rules = paths
        .doctor_week_rules
        .map(|p| -> Result<Vec<(usize, WeekRuleRow)>, PlannerError> {
            shared_io::read_csv_rows(p).map_err(|e| io_failure("doctor_week_rules.csv", e))
        })
        .transpose()?;

    Ok(RawTables {
        physicians,
        locations,
        rooms,
        sessions,
        preferences,
        travel_times,
        workday_rules,
        week_rules,
    })
}

/// Reads every table from one workbook's tabs — `Doctors, Locations, Rooms,
/// Sessions, Preferences, TravelTimes, DoctorWorkdays, DoctorWeekRules`.
/// Ancillary tabs are optional; a missing ancillary tab yields an empty table
/// rather than an error, matching how a missing ancillary CSV path behaves in
/// [`load_csv_tables`].
pub fn load_xlsx_tables(path: &Path) -> Result<RawTables, PlannerError> {
    let physicians: Vec<(usize, DoctorRow)> = shared_io::read_xlsx_sheet(path, "Doctors")
        .map_err(|e| io_failure("Doctors", e))?;
    let locations: Vec<(usize, LocationRow)> = shared_io::read_xlsx_sheet(path, "Locations")
        .map_err(|e| io_failure("Locations", e))?;
    let sessions: Vec<(usize, SessionRow)> = shared_io::read_xlsx_sheet(path, "Sessions")
        .map_err(|e| io_failure("Sessions", e))?;

    let rooms = shared_io::read_xlsx_sheet_optional(path, "Rooms")
        .map_err(|e| io_failure("Rooms", e))?;
    let preferences = shared_io::read_xlsx_sheet_optional(path, "Preferences")
        .map_err(|e| io_failure("Preferences", e))?;
    let travel_times = shared_io::read_xlsx_sheet_optional(path, "TravelTimes")
        .map_err(|e| io_failure("TravelTimes", e))?;
    let workday_rules = shared_io::read_xlsx_sheet_optional(path, "DoctorWorkdays")
        .map_err(|e| io_failure("DoctorWorkdays", e))?;
    let week_rules = shared_io::read_xlsx_sheet_optional(path, "DoctorWeekRules")
        .map_err(|e| io_failure("DoctorWeekRules", e))?;

    Ok(RawTables {
        physicians,
        locations,
        rooms,
        sessions,
        preferences,
        travel_times,
        workday_rules,
        week_rules,
    })
}
