//! Error types for the schedule core.

use thiserror::Error;

/// Errors raised while validating or interpreting schedule data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Time string is not zero-padded 24-hour "HH:MM"
    #[error("invalid time {input:?}, expected zero-padded \"HH:MM\"")]
    InvalidTimeFormat { input: String },

    /// Day name is not one of the seven weekdays
    #[error("unknown weekday {input:?}")]
    UnknownWeekday { input: String },

    /// Date string is not ISO "YYYY-MM-DD"
    #[error("invalid date {input:?}, expected \"YYYY-MM-DD\"")]
    InvalidDate { input: String },

    /// Exam type is neither "Mid-term" nor "Final"
    #[error("unknown exam type {input:?}")]
    UnknownExamType { input: String },

    /// A class must start before it ends
    #[error("class starts at {start} but ends at {end}")]
    EmptyInterval { start: String, end: String },

    /// A required draft field was absent or blank
    #[error("missing required field {field:?}")]
    MissingField { field: &'static str },
}
