//! SQLite store for class and exam schedule entries.

pub mod cache;

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};
use std::sync::Mutex;
use tracing::warn;

use crate::schedule::{ClassDraft, ClassEntry, ExamDraft, ExamEntry, ExamType, Weekday};

const SCHEMA_SQL: &str = include_str!("../../../../sql/init_routines.sql");
const SEED_JSON: &str = include_str!("../../data/seed.json");

const CLASS_COLUMNS: &str = "class_id, course_name, course_code, faculty, room, day, \
     start_time, end_time, department, batch, section, subject, semester, year, \
     created_at, updated_at";

const EXAM_COLUMNS: &str = "exam_id, course_name, course_code, exam_date, start_time, \
     end_time, room, department, exam_type, created_at, updated_at";

/// Bundled default data set used to initialize an empty store.
#[derive(Debug, serde::Deserialize)]
struct SeedData {
    classes: Vec<ClassDraft>,
    exams: Vec<ExamDraft>,
}

pub struct RoutineDbManager {
    db: Mutex<Connection>,
}

impl RoutineDbManager {
    /// Opens (or creates) the database and applies the schema.
    pub fn new(db_path: &str) -> Self {
        let conn = Connection::open(db_path).expect("Failed to open database");

        conn.execute_batch(SCHEMA_SQL)
            .expect("Failed to initialize database schema");

        Self {
            db: Mutex::new(conn),
        }
    }

    /// In-memory store, used by tests.
    pub fn new_in_memory() -> Self {
        let conn = Connection::open_in_memory().expect("Failed to open in-memory database");

        conn.execute_batch(SCHEMA_SQL)
            .expect("Failed to initialize database schema");

        Self {
            db: Mutex::new(conn),
        }
    }

    pub fn count_classes(&self) -> Result<i64> {
        let db = self.db.lock().unwrap();
        db.query_row("SELECT COUNT(*) FROM classes", [], |row| row.get(0))
    }

    pub fn count_exams(&self) -> Result<i64> {
        let db = self.db.lock().unwrap();
        db.query_row("SELECT COUNT(*) FROM exams", [], |row| row.get(0))
    }

    /// Seeds the store from the bundled data set, once per table.
    ///
    /// Guarded by a count check so the step is idempotent; invalid seed rows
    /// are skipped rather than aborting the startup.
    ///
    /// # Returns
    /// * `Ok((classes, exams))` - number of rows inserted per table
    pub fn seed_if_empty(&self) -> Result<(usize, usize)> {
        let seed: SeedData =
            serde_json::from_str(SEED_JSON).expect("Failed to parse bundled seed data");

        let mut classes_inserted = 0;
        if self.count_classes()? == 0 {
            for draft in &seed.classes {
                match draft.validate() {
                    Ok(day) => {
                        self.insert_class(draft, day)?;
                        classes_inserted += 1;
                    }
                    Err(e) => warn!("Skipping invalid seed class {}: {}", draft.course_code, e),
                }
            }
        }

        let mut exams_inserted = 0;
        if self.count_exams()? == 0 {
            for draft in &seed.exams {
                match draft.validate() {
                    Ok(()) => {
                        self.insert_exam(draft)?;
                        exams_inserted += 1;
                    }
                    Err(e) => warn!("Skipping invalid seed exam {}: {}", draft.course_code, e),
                }
            }
        }

        Ok((classes_inserted, exams_inserted))
    }

    /// Inserts a validated class draft and returns the stored entry.
    pub fn insert_class(&self, draft: &ClassDraft, day: Weekday) -> Result<ClassEntry> {
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO classes (
                course_name, course_code, faculty, room, day, start_time, end_time,
                department, batch, section, subject, semester, year, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                      datetime('now'), datetime('now'))",
            params![
                draft.course_name,
                draft.course_code,
                draft.faculty,
                draft.room,
                day.name(),
                draft.start_time,
                draft.end_time,
                draft.department,
                draft.batch,
                draft.section,
                draft.subject,
                draft.semester,
                draft.year,
            ],
        )?;

        let id = db.last_insert_rowid();
        fetch_class(&db, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
    }

    pub fn get_class(&self, id: i64) -> Result<Option<ClassEntry>> {
        let db = self.db.lock().unwrap();
        fetch_class(&db, id)
    }

    /// Replaces a class entry's fields, refreshing updated_at.
    ///
    /// # Returns
    /// * `Ok(Some(entry))` - the updated entry
    /// * `Ok(None)` - no row with that id
    pub fn update_class(
        &self,
        id: i64,
        draft: &ClassDraft,
        day: Weekday,
    ) -> Result<Option<ClassEntry>> {
        let db = self.db.lock().unwrap();
        let changed = db.execute(
            "UPDATE classes SET
                course_name = ?1, course_code = ?2, faculty = ?3, room = ?4, day = ?5,
                start_time = ?6, end_time = ?7, department = ?8, batch = ?9, section = ?10,
                subject = ?11, semester = ?12, year = ?13, updated_at = datetime('now')
             WHERE class_id = ?14",
            params![
                draft.course_name,
                draft.course_code,
                draft.faculty,
                draft.room,
                day.name(),
                draft.start_time,
                draft.end_time,
                draft.department,
                draft.batch,
                draft.section,
                draft.subject,
                draft.semester,
                draft.year,
                id,
            ],
        )?;

        if changed == 0 {
            return Ok(None);
        }
        fetch_class(&db, id)
    }

    /// Deletes a class entry.
    ///
    /// # Returns
    /// * `Ok(true)` - a row was removed
    /// * `Ok(false)` - no row with that id
    pub fn delete_class(&self, id: i64) -> Result<bool> {
        let db = self.db.lock().unwrap();
        let removed = db.execute("DELETE FROM classes WHERE class_id = ?", [id])?;
        Ok(removed > 0)
    }

    /// Lists class entries, optionally narrowed by attribute equality,
    /// sorted (day, startTime) ascending in week order.
    pub fn list_classes(
        &self,
        department: Option<&str>,
        batch: Option<&str>,
        section: Option<&str>,
    ) -> Result<Vec<ClassEntry>> {
        let db = self.db.lock().unwrap();

        // Build the WHERE clause from whichever filters are present.
        let mut sql = format!("SELECT {CLASS_COLUMNS} FROM classes");
        let mut clauses: Vec<&str> = Vec::new();
        let mut params: Vec<&dyn rusqlite::ToSql> = Vec::new();
        if let Some(department) = department.as_ref() {
            clauses.push("department = ?");
            params.push(department);
        }
        if let Some(batch) = batch.as_ref() {
            clauses.push("batch = ?");
            params.push(batch);
        }
        if let Some(section) = section.as_ref() {
            clauses.push("section = ?");
            params.push(section);
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        let mut stmt = db.prepare(&sql)?;
        let mut classes: Vec<ClassEntry> = stmt
            .query_map(&params[..], row_to_class)?
            .collect::<Result<_>>()?;

        // Week order is Saturday-first, so ordering happens here rather
        // than in SQL over the day names.
        classes.sort_by_key(ClassEntry::chronological_key);
        Ok(classes)
    }

    /// Inserts a validated exam draft and returns the stored entry.
    pub fn insert_exam(&self, draft: &ExamDraft) -> Result<ExamEntry> {
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO exams (
                course_name, course_code, exam_date, start_time, end_time,
                room, department, exam_type, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, datetime('now'), datetime('now'))",
            params![
                draft.course_name,
                draft.course_code,
                draft.date,
                draft.start_time,
                draft.end_time,
                draft.room,
                draft.department,
                draft.exam_type.name(),
            ],
        )?;

        let id = db.last_insert_rowid();
        let mut stmt = db.prepare(&format!(
            "SELECT {EXAM_COLUMNS} FROM exams WHERE exam_id = ?"
        ))?;
        stmt.query_row([id], row_to_exam)
    }

    /// Lists all exam entries sorted by (date, startTime) ascending.
    pub fn list_exams(&self) -> Result<Vec<ExamEntry>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(&format!(
            "SELECT {EXAM_COLUMNS} FROM exams ORDER BY exam_date, start_time"
        ))?;
        let exams = stmt.query_map([], row_to_exam)?;
        exams.collect()
    }
}

fn fetch_class(db: &Connection, id: i64) -> Result<Option<ClassEntry>> {
    let mut stmt = db.prepare(&format!(
        "SELECT {CLASS_COLUMNS} FROM classes WHERE class_id = ?"
    ))?;
    stmt.query_row([id], row_to_class).optional()
}

fn row_to_class(row: &Row<'_>) -> Result<ClassEntry> {
    let day_raw: String = row.get(5)?;
    let day = Weekday::parse(&day_raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(ClassEntry {
        id: row.get(0)?,
        course_name: row.get(1)?,
        course_code: row.get(2)?,
        faculty: row.get(3)?,
        room: row.get(4)?,
        day,
        start_time: row.get(6)?,
        end_time: row.get(7)?,
        department: row.get(8)?,
        batch: row.get(9)?,
        section: row.get(10)?,
        subject: row.get(11)?,
        semester: row.get(12)?,
        year: row.get(13)?,
        created_at: row.get(14)?,
        updated_at: row.get(15)?,
    })
}

fn row_to_exam(row: &Row<'_>) -> Result<ExamEntry> {
    let type_raw: String = row.get(8)?;
    let exam_type = ExamType::parse(&type_raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e)))?;

    Ok(ExamEntry {
        id: row.get(0)?,
        course_name: row.get(1)?,
        course_code: row.get(2)?,
        date: row.get(3)?,
        start_time: row.get(4)?,
        end_time: row.get(5)?,
        room: row.get(6)?,
        department: row.get(7)?,
        exam_type,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(day: &str, start: &str, end: &str, department: &str) -> ClassDraft {
        ClassDraft {
            course_name: "Data Structures".into(),
            course_code: "CSE-201".into(),
            faculty: "Dr. Fatema Khatun".into(),
            room: "Room 302".into(),
            day: day.into(),
            start_time: start.into(),
            end_time: end.into(),
            department: department.into(),
            batch: "63rd Batch".into(),
            section: "Section A".into(),
            subject: None,
            semester: None,
            year: None,
        }
    }

    fn insert(db: &RoutineDbManager, d: &ClassDraft) -> ClassEntry {
        let day = d.validate().unwrap();
        db.insert_class(d, day).unwrap()
    }

    #[test]
    fn test_seed_is_idempotent() {
        let db = RoutineDbManager::new_in_memory();

        let (classes, exams) = db.seed_if_empty().unwrap();
        assert!(classes > 0);
        assert!(exams > 0);
        assert_eq!(db.count_classes().unwrap(), classes as i64);

        let (again_classes, again_exams) = db.seed_if_empty().unwrap();
        assert_eq!((again_classes, again_exams), (0, 0));
        assert_eq!(db.count_classes().unwrap(), classes as i64);
    }

    #[test]
    fn test_insert_assigns_id_and_timestamps() {
        let db = RoutineDbManager::new_in_memory();
        let entry = insert(&db, &draft("monday", "09:00", "10:20", "CSE"));

        assert!(entry.id > 0);
        assert_eq!(entry.day, Weekday::Monday);
        assert!(!entry.created_at.is_empty());
        assert_eq!(entry.created_at, entry.updated_at);
    }

    #[test]
    fn test_listing_is_week_ordered() {
        let db = RoutineDbManager::new_in_memory();
        insert(&db, &draft("Friday", "09:00", "10:20", "CSE"));
        insert(&db, &draft("Saturday", "10:25", "11:45", "CSE"));
        insert(&db, &draft("Saturday", "09:00", "10:20", "CSE"));

        let listed = db.list_classes(None, None, None).unwrap();
        let order: Vec<(Weekday, String)> = listed
            .iter()
            .map(|e| (e.day, e.start_time.clone()))
            .collect();
        assert_eq!(
            order,
            vec![
                (Weekday::Saturday, "09:00".to_string()),
                (Weekday::Saturday, "10:25".to_string()),
                (Weekday::Friday, "09:00".to_string()),
            ]
        );
    }

    #[test]
    fn test_listing_filters_by_attributes() {
        let db = RoutineDbManager::new_in_memory();
        insert(&db, &draft("Monday", "09:00", "10:20", "CSE"));
        insert(&db, &draft("Monday", "10:25", "11:45", "EEE"));

        let cse = db.list_classes(Some("CSE"), None, None).unwrap();
        assert_eq!(cse.len(), 1);
        assert_eq!(cse[0].department, "CSE");

        let narrowed = db
            .list_classes(Some("CSE"), Some("63rd Batch"), Some("Section A"))
            .unwrap();
        assert_eq!(narrowed.len(), 1);

        let none = db
            .list_classes(Some("CSE"), Some("99th Batch"), None)
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_get_and_delete_missing_rows() {
        let db = RoutineDbManager::new_in_memory();
        assert!(db.get_class(42).unwrap().is_none());
        assert!(!db.delete_class(42).unwrap());

        let entry = insert(&db, &draft("Monday", "09:00", "10:20", "CSE"));
        assert!(db.delete_class(entry.id).unwrap());
        assert_eq!(db.count_classes().unwrap(), 0);
    }

    #[test]
    fn test_update_replaces_fields() {
        let db = RoutineDbManager::new_in_memory();
        let entry = insert(&db, &draft("Monday", "09:00", "10:20", "CSE"));

        let mut changed = draft("Tuesday", "10:25", "11:45", "CSE");
        changed.room = "Lab 2".into();
        let day = changed.validate().unwrap();
        let updated = db.update_class(entry.id, &changed, day).unwrap().unwrap();

        assert_eq!(updated.id, entry.id);
        assert_eq!(updated.day, Weekday::Tuesday);
        assert_eq!(updated.room, "Lab 2");

        assert!(db.update_class(9999, &changed, day).unwrap().is_none());
    }

    #[test]
    fn test_exams_listed_by_date_then_start() {
        let db = RoutineDbManager::new_in_memory();
        let mk = |date: &str, start: &str| ExamDraft {
            course_name: "Data Structures".into(),
            course_code: "CSE-201".into(),
            date: date.into(),
            start_time: start.into(),
            end_time: "17:00".into(),
            room: "Hall B".into(),
            department: "CSE".into(),
            exam_type: ExamType::MidTerm,
        };
        db.insert_exam(&mk("2025-10-15", "10:00")).unwrap();
        db.insert_exam(&mk("2025-10-14", "14:00")).unwrap();
        db.insert_exam(&mk("2025-10-14", "10:00")).unwrap();

        let exams = db.list_exams().unwrap();
        let order: Vec<(String, String)> = exams
            .iter()
            .map(|e| (e.date.clone(), e.start_time.clone()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("2025-10-14".to_string(), "10:00".to_string()),
                ("2025-10-14".to_string(), "14:00".to_string()),
                ("2025-10-15".to_string(), "10:00".to_string()),
            ]
        );
    }
}
