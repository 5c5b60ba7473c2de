//! Wall-clock occupancy: which classes are running right now, and for how
//! much longer.

use chrono::{Datelike, Local, Timelike};
use std::fmt;

use super::time::parse_hhmm;
use super::types::{ClassEntry, Weekday};

/// A sampled instant: weekday plus minute-of-day.
///
/// Sampled once per evaluation and passed explicitly so a single filter or
/// grid pass stays internally time-consistent even if real time advances
/// during it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub day: Weekday,
    pub minutes: u16,
}

impl Moment {
    pub const fn new(day: Weekday, minutes: u16) -> Self {
        Self { day, minutes }
    }

    /// Samples the local wall clock.
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            day: now.weekday().into(),
            minutes: (now.hour() * 60 + now.minute()) as u16,
        }
    }
}

/// True iff the entry's day matches `at` and `at` falls inside the entry's
/// time interval, inclusive on both ends.
///
/// The inclusive end boundary means a class at its exact end minute still
/// counts as active, as does an adjacent class at its exact start minute.
/// Entries with unparsable times are never active.
pub fn is_active(entry: &ClassEntry, at: &Moment) -> bool {
    if entry.day != at.day {
        return false;
    }
    let (Ok(start), Ok(end)) = (parse_hhmm(&entry.start_time), parse_hhmm(&entry.end_time))
    else {
        return false;
    };
    start <= at.minutes && at.minutes <= end
}

/// Time left until a class ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    /// The end minute has been reached or passed
    Ending,
    Left { hours: u16, minutes: u16 },
}

impl Remaining {
    /// Remaining time from `now` until `end`, both minute-of-day offsets.
    pub fn until(end: u16, now: u16) -> Self {
        if end <= now {
            return Remaining::Ending;
        }
        let left = end - now;
        Remaining::Left {
            hours: left / 60,
            minutes: left % 60,
        }
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Remaining::Ending => write!(f, "Ending soon"),
            Remaining::Left { hours: 0, minutes } => write!(f, "{minutes}m remaining"),
            Remaining::Left { hours, minutes } => write!(f, "{hours}h {minutes}m remaining"),
        }
    }
}

/// Remaining time for an entry at `at`, `None` when its end time is
/// unparsable.
pub fn remaining(entry: &ClassEntry, at: &Moment) -> Option<Remaining> {
    let end = parse_hhmm(&entry.end_time).ok()?;
    Some(Remaining::until(end, at.minutes))
}

/// All entries active at `at`, in input order.
pub fn ongoing_set<'a>(entries: &'a [ClassEntry], at: &Moment) -> Vec<&'a ClassEntry> {
    entries.iter().filter(|entry| is_active(entry, at)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: Weekday, start: &str, end: &str) -> ClassEntry {
        ClassEntry {
            id: 1,
            course_name: "Structured Programming".into(),
            course_code: "CSE-103".into(),
            faculty: "Dr. Mahmudul Hasan".into(),
            room: "Room 301".into(),
            day,
            start_time: start.into(),
            end_time: end.into(),
            department: "CSE".into(),
            batch: "64th Batch".into(),
            section: "Section A".into(),
            subject: None,
            semester: None,
            year: None,
            created_at: "2025-01-01 00:00:00".into(),
            updated_at: "2025-01-01 00:00:00".into(),
        }
    }

    #[test]
    fn test_active_during_class() {
        // Monday 09:00-10:20 at Monday 09:30
        let e = entry(Weekday::Monday, "09:00", "10:20");
        let at = Moment::new(Weekday::Monday, 9 * 60 + 30);
        assert!(is_active(&e, &at));
        assert_eq!(
            remaining(&e, &at).unwrap().to_string(),
            "50m remaining"
        );
    }

    #[test]
    fn test_inactive_on_other_day() {
        let e = entry(Weekday::Monday, "09:00", "10:20");
        let at = Moment::new(Weekday::Tuesday, 9 * 60 + 30);
        assert!(!is_active(&e, &at));
    }

    #[test]
    fn test_boundaries_are_inclusive_on_both_ends() {
        let e = entry(Weekday::Monday, "09:00", "10:20");
        assert!(is_active(&e, &Moment::new(Weekday::Monday, 9 * 60)));
        assert!(is_active(&e, &Moment::new(Weekday::Monday, 10 * 60 + 20)));
        assert!(!is_active(&e, &Moment::new(Weekday::Monday, 8 * 60 + 59)));
        assert!(!is_active(&e, &Moment::new(Weekday::Monday, 10 * 60 + 21)));
    }

    #[test]
    fn test_remaining_at_end_is_terminal() {
        let e = entry(Weekday::Monday, "09:00", "10:20");
        let at = Moment::new(Weekday::Monday, 10 * 60 + 20);
        assert_eq!(remaining(&e, &at), Some(Remaining::Ending));
        assert_eq!(Remaining::Ending.to_string(), "Ending soon");
    }

    #[test]
    fn test_remaining_formats_hours_and_minutes() {
        assert_eq!(Remaining::until(16 * 60 + 20, 15 * 60).to_string(), "1h 20m remaining");
        assert_eq!(Remaining::until(16 * 60, 15 * 60).to_string(), "1h 0m remaining");
        assert_eq!(Remaining::until(15 * 60 + 5, 15 * 60).to_string(), "5m remaining");
    }

    #[test]
    fn test_unparsable_times_never_active() {
        let e = entry(Weekday::Monday, "9am", "10:20");
        assert!(!is_active(&e, &Moment::new(Weekday::Monday, 9 * 60 + 30)));
    }

    #[test]
    fn test_ongoing_set_preserves_input_order() {
        let mut a = entry(Weekday::Monday, "09:00", "10:20");
        a.id = 10;
        let mut b = entry(Weekday::Monday, "09:00", "13:10");
        b.id = 3;
        let c = entry(Weekday::Tuesday, "09:00", "10:20");
        let entries = vec![a, b, c];

        let at = Moment::new(Weekday::Monday, 9 * 60 + 30);
        let ongoing = ongoing_set(&entries, &at);
        let ids: Vec<i64> = ongoing.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![10, 3]);
    }
}
