//! Domain records for class and exam schedules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ScheduleError;
use super::time::parse_hhmm;

/// Days of the academic week, in display and sort order.
///
/// The week starts on Saturday; all (day, startTime) orderings use this
/// index rather than alphabetical day names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weekday {
    Saturday,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

/// The seven weekdays in week order.
pub const WEEK: [Weekday; 7] = [
    Weekday::Saturday,
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
];

impl Weekday {
    /// Parses a weekday name, ignoring case ("monday" == "Monday").
    pub fn parse(input: &str) -> Result<Self, ScheduleError> {
        match input.to_ascii_lowercase().as_str() {
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            _ => Err(ScheduleError::UnknownWeekday {
                input: input.to_string(),
            }),
        }
    }

    /// Position within [`WEEK`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
        }
    }
}

/// A stored weekly class entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub id: i64,
    pub course_name: String,
    pub course_code: String,
    pub faculty: String,
    pub room: String,
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub department: String,
    pub batch: String,
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ClassEntry {
    /// Sort key for (day, startTime) ascending listings.
    ///
    /// Unparsable start times sort last; ties break on insertion id.
    pub fn chronological_key(&self) -> (usize, u16, i64) {
        let start = parse_hhmm(&self.start_time).unwrap_or(u16::MAX);
        (self.day.index(), start, self.id)
    }
}

/// Fields supplied by a caller creating or updating a class entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDraft {
    pub course_name: String,
    pub course_code: String,
    pub faculty: String,
    pub room: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub department: String,
    pub batch: String,
    pub section: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

impl ClassDraft {
    /// Validates required fields, day, and the time interval.
    ///
    /// # Returns
    /// * `Ok(Weekday)` - the canonical weekday to store
    /// * `Err(ScheduleError)` - first failed check
    pub fn validate(&self) -> Result<Weekday, ScheduleError> {
        require_field("courseName", &self.course_name)?;
        require_field("courseCode", &self.course_code)?;
        require_field("faculty", &self.faculty)?;
        require_field("room", &self.room)?;
        require_field("department", &self.department)?;
        require_field("batch", &self.batch)?;
        require_field("section", &self.section)?;

        let day = Weekday::parse(&self.day)?;
        let start = parse_hhmm(&self.start_time)?;
        let end = parse_hhmm(&self.end_time)?;
        if start >= end {
            return Err(ScheduleError::EmptyInterval {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }

        Ok(day)
    }
}

/// Exam classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamType {
    #[serde(rename = "Mid-term")]
    MidTerm,
    Final,
}

impl ExamType {
    /// Parses an exam type name, ignoring case.
    pub fn parse(input: &str) -> Result<Self, ScheduleError> {
        match input.to_ascii_lowercase().as_str() {
            "mid-term" | "midterm" => Ok(ExamType::MidTerm),
            "final" => Ok(ExamType::Final),
            _ => Err(ScheduleError::UnknownExamType {
                input: input.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExamType::MidTerm => "Mid-term",
            ExamType::Final => "Final",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored exam entry. Exams are listed by date, never gridded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamEntry {
    pub id: i64,
    pub course_name: String,
    pub course_code: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
    pub department: String,
    #[serde(rename = "type")]
    pub exam_type: ExamType,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields supplied by a caller creating an exam entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamDraft {
    pub course_name: String,
    pub course_code: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
    pub department: String,
    #[serde(rename = "type")]
    pub exam_type: ExamType,
}

impl ExamDraft {
    pub fn validate(&self) -> Result<(), ScheduleError> {
        require_field("courseName", &self.course_name)?;
        require_field("courseCode", &self.course_code)?;
        require_field("room", &self.room)?;
        require_field("department", &self.department)?;

        if NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() {
            return Err(ScheduleError::InvalidDate {
                input: self.date.clone(),
            });
        }
        let start = parse_hhmm(&self.start_time)?;
        let end = parse_hhmm(&self.end_time)?;
        if start >= end {
            return Err(ScheduleError::EmptyInterval {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }

        Ok(())
    }
}

fn require_field(field: &'static str, value: &str) -> Result<(), ScheduleError> {
    if value.trim().is_empty() {
        Err(ScheduleError::MissingField { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ClassDraft {
        ClassDraft {
            course_name: "Data Structures".into(),
            course_code: "CSE-201".into(),
            faculty: "Dr. Fatema Khatun".into(),
            room: "Room 302".into(),
            day: "Monday".into(),
            start_time: "09:00".into(),
            end_time: "10:20".into(),
            department: "CSE".into(),
            batch: "63rd Batch".into(),
            section: "Section A".into(),
            subject: None,
            semester: None,
            year: None,
        }
    }

    #[test]
    fn test_weekday_parse_is_case_insensitive() {
        assert_eq!(Weekday::parse("monday"), Ok(Weekday::Monday));
        assert_eq!(Weekday::parse("MONDAY"), Ok(Weekday::Monday));
        assert!(matches!(
            Weekday::parse("Someday"),
            Err(ScheduleError::UnknownWeekday { .. })
        ));
    }

    #[test]
    fn test_week_order_starts_saturday() {
        assert_eq!(Weekday::Saturday.index(), 0);
        assert_eq!(Weekday::Friday.index(), 6);
        assert!(Weekday::Saturday < Weekday::Monday);
    }

    #[test]
    fn test_valid_draft_yields_canonical_day() {
        let mut d = draft();
        d.day = "monday".into();
        assert_eq!(d.validate(), Ok(Weekday::Monday));
    }

    #[test]
    fn test_draft_rejects_blank_required_field() {
        let mut d = draft();
        d.faculty = "  ".into();
        assert_eq!(
            d.validate(),
            Err(ScheduleError::MissingField { field: "faculty" })
        );
    }

    #[test]
    fn test_draft_rejects_inverted_interval() {
        let mut d = draft();
        d.start_time = "10:20".into();
        d.end_time = "09:00".into();
        assert!(matches!(
            d.validate(),
            Err(ScheduleError::EmptyInterval { .. })
        ));
    }

    #[test]
    fn test_draft_rejects_malformed_time() {
        let mut d = draft();
        d.start_time = "9:00".into();
        assert!(matches!(
            d.validate(),
            Err(ScheduleError::InvalidTimeFormat { .. })
        ));
    }

    #[test]
    fn test_exam_draft_rejects_bad_date() {
        let e = ExamDraft {
            course_name: "Data Structures".into(),
            course_code: "CSE-201".into(),
            date: "14-10-2025".into(),
            start_time: "10:00".into(),
            end_time: "11:30".into(),
            room: "Hall B".into(),
            department: "CSE".into(),
            exam_type: ExamType::MidTerm,
        };
        assert!(matches!(
            e.validate(),
            Err(ScheduleError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_exam_type_serde_names() {
        assert_eq!(
            serde_json::to_string(&ExamType::MidTerm).unwrap(),
            "\"Mid-term\""
        );
        assert_eq!(ExamType::parse("mid-term"), Ok(ExamType::MidTerm));
        assert_eq!(ExamType::parse("Final"), Ok(ExamType::Final));
    }
}
