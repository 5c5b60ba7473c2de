//! Composable listing filters: attribute equality, free-text search, and
//! the ongoing-only predicate.

use serde::Deserialize;

use super::occupancy::{is_active, Moment};
use super::types::{ClassEntry, ExamEntry, ExamType};

/// Sentinel filter values meaning "no filtering on this attribute".
pub const ALL_DEPARTMENTS: &str = "All Departments";
pub const ALL_BATCHES: &str = "All Batches";
pub const ALL_SECTIONS: &str = "All Sections";

/// One viewing session's class filters. Absent or empty values and the
/// "All X" sentinels are no-ops.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default, rename = "ongoing")]
    pub ongoing_only: bool,
}

fn effective<'a>(value: Option<&'a str>, sentinel: &str) -> Option<&'a str> {
    value.filter(|v| !v.is_empty() && *v != sentinel)
}

impl FilterState {
    pub fn department(&self) -> Option<&str> {
        effective(self.department.as_deref(), ALL_DEPARTMENTS)
    }

    pub fn batch(&self) -> Option<&str> {
        effective(self.batch.as_deref(), ALL_BATCHES)
    }

    pub fn section(&self) -> Option<&str> {
        effective(self.section.as_deref(), ALL_SECTIONS)
    }

    fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// All active predicates ANDed, cheapest first: attribute equality,
    /// then substring search, then time containment.
    pub fn matches(&self, entry: &ClassEntry, at: &Moment) -> bool {
        if self.department().is_some_and(|d| entry.department != d) {
            return false;
        }
        if self.batch().is_some_and(|b| entry.batch != b) {
            return false;
        }
        if self.section().is_some_and(|s| entry.section != s) {
            return false;
        }
        if let Some(term) = self.search() {
            if !search_matches(entry, term) {
                return false;
            }
        }
        if self.ongoing_only && !is_active(entry, at) {
            return false;
        }
        true
    }
}

/// Case-insensitive substring match against course name, course code, or
/// faculty; a hit on any one field includes the record.
fn search_matches(entry: &ClassEntry, term: &str) -> bool {
    let term = term.to_lowercase();
    entry.course_name.to_lowercase().contains(&term)
        || entry.course_code.to_lowercase().contains(&term)
        || entry.faculty.to_lowercase().contains(&term)
}

/// Filters a listing in place, preserving order.
pub fn apply(mut entries: Vec<ClassEntry>, filter: &FilterState, at: &Moment) -> Vec<ClassEntry> {
    entries.retain(|entry| filter.matches(entry, at));
    entries
}

/// Exam listings filter only by department and exam type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExamFilter<'a> {
    pub department: Option<&'a str>,
    pub exam_type: Option<ExamType>,
}

impl ExamFilter<'_> {
    pub fn matches(&self, exam: &ExamEntry) -> bool {
        if effective(self.department, ALL_DEPARTMENTS).is_some_and(|d| exam.department != d) {
            return false;
        }
        if self.exam_type.is_some_and(|t| exam.exam_type != t) {
            return false;
        }
        true
    }
}

/// Filters an exam listing in place, preserving order.
pub fn apply_exams(mut exams: Vec<ExamEntry>, filter: &ExamFilter<'_>) -> Vec<ExamEntry> {
    exams.retain(|exam| filter.matches(exam));
    exams
}
