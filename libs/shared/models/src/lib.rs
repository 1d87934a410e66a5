pub mod diagnostics;
pub mod entities;
pub mod error;
pub mod ids;
pub mod schedule;

pub use diagnostics::{EliminationReason, SaturationWitness, SessionDiagnostic};
pub use entities::{
    week_of_month, weekday_of, Location, PlanningInput, Physician, Room, Session, Weekday,
    WeekOfMonth,
};
pub use error::PlannerError;
pub use ids::{LocationIdx, PhysicianIdx, RoomIdx, SessionIdx};
pub use schedule::{Schedule, ScheduleRow};
