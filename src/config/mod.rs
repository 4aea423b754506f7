//! Configuration data structures for simulation runs.

mod schedule;
mod settings;

pub use schedule::{DEFAULT_STEPS, Schedule, ScheduleError, ScheduleRecord, default_steps};
pub use settings::{Settings, SettingsError};
