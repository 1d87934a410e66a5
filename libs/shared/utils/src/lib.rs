pub mod calendar;
pub mod multivalue;

pub use calendar::{parse_weekday_token, WeekdayParseError};
pub use multivalue::split_multivalue;
