use std::collections::HashMap;

use shared_models::{LocationIdx, PhysicianIdx, SessionIdx};

/// String id -> arena index, built once while each table is parsed and consulted
/// by every later table that references the earlier one (Location before Room and
/// Session; Physician and Location before Preference/TravelTime/WorkdayRule/WeekRule).
#[derive(Debug, Default)]
pub struct IdIndex {
    pub physicians: HashMap<String, PhysicianIdx>,
    pub locations: HashMap<String, LocationIdx>,
    pub sessions: HashMap<String, SessionIdx>,
}
