use serde::Deserialize;

/// One wire struct per inbound CSV/Excel row shape: permissive, string- and
/// primitive-typed, validated and converted downstream in `normalize`.
#[derive(Debug, Clone, Deserialize)]
pub struct DoctorRow {
    pub doctor_id: String,
    pub name: String,
    pub max_sessions: String,
    #[serde(default)]
    pub unavailable_dates: String,
    #[serde(default)]
    pub skills: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationRow {
    pub location_id: String,
    pub name: String,
    pub default_start_time: String,
    pub default_end_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomRow {
    pub room_id: String,
    pub location_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionRow {
    pub session_id: String,
    pub date: String,
    pub location_id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub required_skill: String,
    #[serde(default)]
    pub room: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceRow {
    pub doctor_id: String,
    pub location_id: String,
    pub score: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TravelTimeRow {
    pub from_location_id: String,
    pub to_location_id: String,
    pub minutes: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkdayRow {
    pub doctor_id: String,
    pub weekday: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeekRuleRow {
    pub doctor_id: String,
    pub week_of_month: String,
    pub weekday: String,
    pub location_id: String,
}
