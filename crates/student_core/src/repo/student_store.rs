//! Student store contract and its error type.
//!
//! # Responsibility
//! - Describe storage and lookup of `Student` records independent of backend.
//! - Classify storage failures for the service layer.
//!
//! # Invariants
//! - `exists_email` reflects every prior successful `save`.
//! - A `save` that would duplicate a stored email fails with
//!   `StoreError::DuplicateEmail` and leaves storage unchanged.

use crate::db::DbError;
use crate::model::student::{Student, StudentId, StudentValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for student persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(StudentValidationError),
    Db(DbError),
    /// Another stored record already uses this email.
    DuplicateEmail(String),
    InvalidData(String),
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => write!(f, "student email already stored: {email}"),
            Self::InvalidData(message) => write!(f, "invalid persisted student data: {message}"),
            Self::Unavailable(message) => write!(f, "student store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateEmail(_) | Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<StudentValidationError> for StoreError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for student records.
///
/// Every call may block on the backing engine; no timeout or retry is applied
/// at this layer.
pub trait StudentStore {
    /// Returns every stored record.
    fn find_all(&self) -> StoreResult<Vec<Student>>;
    /// Returns the record with `id`, if stored.
    fn find_by_id(&self, id: StudentId) -> StoreResult<Option<Student>>;
    /// Persists `student`, assigning an id when absent, and returns the stored record.
    fn save(&self, student: &Student) -> StoreResult<Student>;
    /// Exact-match email lookup.
    fn exists_email(&self, email: &str) -> StoreResult<bool>;
    /// Number of stored records.
    fn count(&self) -> StoreResult<u64>;
    /// Removes every stored record.
    fn delete_all(&self) -> StoreResult<()>;
}

impl<S: StudentStore + ?Sized> StudentStore for &S {
    fn find_all(&self) -> StoreResult<Vec<Student>> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: StudentId) -> StoreResult<Option<Student>> {
        (**self).find_by_id(id)
    }

    fn save(&self, student: &Student) -> StoreResult<Student> {
        (**self).save(student)
    }

    fn exists_email(&self, email: &str) -> StoreResult<bool> {
        (**self).exists_email(email)
    }

    fn count(&self) -> StoreResult<u64> {
        (**self).count()
    }

    fn delete_all(&self) -> StoreResult<()> {
        (**self).delete_all()
    }
}
