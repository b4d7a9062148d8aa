pub mod error;
pub mod params;
pub mod recurrence;
