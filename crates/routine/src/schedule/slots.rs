//! The fixed weekly slot grid and slot assignment.
//!
//! The slot catalog is configuration, not data: it is the coordinate system
//! the weekly grid is drawn against. Six slots per day (five teaching periods
//! plus the lunch break), identical across all seven weekdays.

use serde::Serialize;

use super::occupancy::{is_active, Moment};
use super::time::parse_hhmm;
use super::types::{ClassEntry, Weekday, WEEK};

/// One cell of the fixed weekly time grid.
#[derive(Debug, Clone, Copy)]
pub struct TimeSlot {
    pub label: &'static str,
    /// Minute-of-day the slot opens
    pub start: u16,
    /// Minute-of-day the slot closes
    pub end: u16,
    pub is_break: bool,
}

const fn at(hour: u16, minute: u16) -> u16 {
    hour * 60 + minute
}

/// The per-day slot catalog, disjoint and sorted ascending by start.
pub const DAY_SLOTS: [TimeSlot; 6] = [
    TimeSlot { label: "9:00 - 10:20", start: at(9, 0), end: at(10, 20), is_break: false },
    TimeSlot { label: "10:25 - 11:45", start: at(10, 25), end: at(11, 45), is_break: false },
    TimeSlot { label: "11:50 - 1:10", start: at(11, 50), end: at(13, 10), is_break: false },
    TimeSlot { label: "1:10 - 1:30", start: at(13, 10), end: at(13, 30), is_break: true },
    TimeSlot { label: "1:30 - 2:50", start: at(13, 30), end: at(14, 50), is_break: false },
    TimeSlot { label: "3:00 - 4:20", start: at(15, 0), end: at(16, 20), is_break: false },
];

/// Assigns a (start, end) interval to the first slot that fully contains it.
///
/// Containment, not overlap: a class that only partially overlaps a slot
/// boundary is not assigned and will be absent from the grid.
pub fn assign_slot(start: u16, end: u16) -> Option<usize> {
    DAY_SLOTS
        .iter()
        .position(|slot| start >= slot.start && end <= slot.end)
}

/// Slot index for a class entry, `None` when its times are unparsable or
/// align with no catalog slot. Unassigned entries stay visible in raw
/// listings; only the grid omits them.
pub fn slot_index(entry: &ClassEntry) -> Option<usize> {
    let start = parse_hhmm(&entry.start_time).ok()?;
    let end = parse_hhmm(&entry.end_time).ok()?;
    assign_slot(start, end)
}

/// First entry in collection order occupying (day, slot).
///
/// Duplicates targeting the same cell are a data-entry error; this layer
/// does not resolve them beyond first-found-wins.
pub fn cell_for(entries: &[ClassEntry], day: Weekday, slot: usize) -> Option<&ClassEntry> {
    entries
        .iter()
        .filter(|entry| entry.day == day)
        .find(|entry| slot_index(entry) == Some(slot))
}

/// A rendered weekly grid: one row per catalog slot, one cell per weekday.
#[derive(Debug, Serialize)]
pub struct WeekGrid {
    pub days: Vec<&'static str>,
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub label: &'static str,
    pub is_break: bool,
    pub cells: Vec<GridCell>,
}

/// Cell payload. Unoccupied break slots render as `break`, other
/// unoccupied slots as `free`.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridCell {
    Class {
        #[serde(flatten)]
        entry: ClassEntry,
        current: bool,
    },
    Break,
    Free,
}

/// Builds the weekly grid for a set of entries, marking cells whose class
/// is active at `at`.
pub fn build_week_grid(entries: &[ClassEntry], at: &Moment) -> WeekGrid {
    let rows = DAY_SLOTS
        .iter()
        .enumerate()
        .map(|(slot_idx, slot)| {
            let cells = WEEK
                .iter()
                .map(|&day| match cell_for(entries, day, slot_idx) {
                    Some(entry) => GridCell::Class {
                        current: is_active(entry, at),
                        entry: entry.clone(),
                    },
                    None if slot.is_break => GridCell::Break,
                    None => GridCell::Free,
                })
                .collect();

            GridRow {
                label: slot.label,
                is_break: slot.is_break,
                cells,
            }
        })
        .collect();

    WeekGrid {
        days: WEEK.iter().map(|day| day.name()).collect(),
        rows,
    }
}
