//! SQLite implementation of `StudentStore`.
//!
//! # Responsibility
//! - Keep SQL details for the `students` table inside the persistence boundary.
//! - Translate unique-index violations on `students.email` into
//!   `StoreError::DuplicateEmail`.
//!
//! # Invariants
//! - Write paths call `Student::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Email comparison uses SQLite `BINARY` collation (exact match).

use crate::db::migrations::latest_version;
use crate::model::student::{Gender, Student, StudentId};
use crate::repo::student_store::{StoreError, StoreResult, StudentStore};
use log::debug;
use rusqlite::{params, Connection, ErrorCode, Row};

const STUDENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    gender
FROM students";

const REQUIRED_COLUMNS: &[&str] = &["id", "name", "email", "gender", "created_at", "updated_at"];

/// SQLite-backed student store over a borrowed, migrated connection.
pub struct SqliteStudentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentStore<'conn> {
    /// Constructs a store from a migrated connection.
    ///
    /// # Errors
    /// - `Unavailable` when the schema version or `students` table shape does
    ///   not match this binary.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StudentStore for SqliteStudentStore<'_> {
    fn find_all(&self) -> StoreResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();

        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        debug!(
            "event=student_find_all module=repo status=ok count={}",
            students.len()
        );
        Ok(students)
    }

    fn find_by_id(&self, id: StudentId) -> StoreResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, student: &Student) -> StoreResult<Student> {
        student.validate()?;

        let id = match student.id {
            None => {
                self.conn
                    .execute(
                        "INSERT INTO students (name, email, gender) VALUES (?1, ?2, ?3);",
                        params![
                            student.name.as_str(),
                            student.email.as_str(),
                            student.gender.as_str(),
                        ],
                    )
                    .map_err(|err| map_write_error(err, &student.email))?;
                self.conn.last_insert_rowid()
            }
            Some(id) => {
                self.conn
                    .execute(
                        "INSERT INTO students (id, name, email, gender)
                         VALUES (?1, ?2, ?3, ?4)
                         ON CONFLICT(id) DO UPDATE SET
                            name = excluded.name,
                            email = excluded.email,
                            gender = excluded.gender,
                            updated_at = (strftime('%s', 'now') * 1000);",
                        params![
                            id,
                            student.name.as_str(),
                            student.email.as_str(),
                            student.gender.as_str(),
                        ],
                    )
                    .map_err(|err| map_write_error(err, &student.email))?;
                id
            }
        };

        debug!("event=student_save module=repo status=ok id={id}");
        self.find_by_id(id)?.ok_or_else(|| {
            StoreError::InvalidData(format!("saved student {id} not found in read-back"))
        })
    }

    fn exists_email(&self, email: &str) -> StoreResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM students
                WHERE email = ?1
            );",
            [email],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn count(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM students;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| StoreError::InvalidData(format!("negative student count `{count}`")))
    }

    fn delete_all(&self) -> StoreResult<()> {
        let removed = self.conn.execute("DELETE FROM students;", [])?;
        debug!("event=student_delete_all module=repo status=ok removed={removed}");
        Ok(())
    }
}

fn parse_student_row(row: &Row<'_>) -> StoreResult<Student> {
    let gender_text: String = row.get("gender")?;
    let gender = Gender::from_db(&gender_text).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid gender `{gender_text}` in students.gender"))
    })?;

    let id: StudentId = row.get("id")?;
    let student = Student::with_id(
        id,
        row.get::<_, String>("name")?,
        row.get::<_, String>("email")?,
        gender,
    );
    student.validate().map_err(|err| {
        StoreError::InvalidData(format!("row {id} failed validation: {err}"))
    })?;
    Ok(student)
}

fn map_write_error(err: rusqlite::Error, email: &str) -> StoreError {
    if is_email_unique_violation(&err) {
        return StoreError::DuplicateEmail(email.to_string());
    }
    err.into()
}

fn is_email_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, message) => {
            failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                && message
                    .as_deref()
                    .is_some_and(|text| text.contains("students.email"))
        }
        _ => false,
    }
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::Unavailable(format!(
            "connection schema version {actual_version} does not match expected {expected_version}"
        )));
    }

    let columns = table_columns(conn, "students")?;
    if columns.is_empty() {
        return Err(StoreError::Unavailable(
            "missing required table `students`".to_string(),
        ));
    }
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !columns.iter().any(|current| current == *column))
    {
        return Err(StoreError::Unavailable(format!(
            "missing required column `students.{missing}`"
        )));
    }

    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> StoreResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::is_email_unique_violation;
    use rusqlite::Connection;

    #[test]
    fn unique_violation_detection_is_scoped_to_email_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE students (id INTEGER PRIMARY KEY, email TEXT NOT NULL UNIQUE);
             CREATE TABLE other (code TEXT NOT NULL UNIQUE);
             INSERT INTO students (id, email) VALUES (1, 'a@b.c');
             INSERT INTO other (code) VALUES ('x');",
        )
        .unwrap();

        let email_err = conn
            .execute("INSERT INTO students (id, email) VALUES (2, 'a@b.c');", [])
            .unwrap_err();
        assert!(is_email_unique_violation(&email_err));

        let other_err = conn
            .execute("INSERT INTO other (code) VALUES ('x');", [])
            .unwrap_err();
        assert!(!is_email_unique_violation(&other_err));
    }
}
