//! Student use-case service.
//!
//! # Responsibility
//! - Guard email uniqueness before any write.
//! - Delegate reads and accepted writes to the store unchanged.
//!
//! # Invariants
//! - `add_student` never calls `save` once `exists_email` reports a conflict.
//! - The service holds no state besides its store; nothing is cached.
//! - Storage-level uniqueness conflicts surface as `DuplicateEmail` too, so a
//!   concurrent writer that wins the race between check and save is reported
//!   the same way as a conflict found by the check.

use crate::model::student::Student;
use crate::repo::student_store::{StoreError, StudentStore};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for student use-cases.
#[derive(Debug)]
pub enum StudentServiceError {
    /// Another stored student already uses this email.
    DuplicateEmail(String),
    /// Opaque storage failure, propagated unchanged.
    Store(StoreError),
}

impl Display for StudentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail(email) => write!(f, "Email {email} taken"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StudentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DuplicateEmail(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for StudentServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            other => Self::Store(other),
        }
    }
}

/// Student service facade over a store implementation.
pub struct StudentService<S: StudentStore> {
    store: S,
}

impl<S: StudentStore> StudentService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns every stored student exactly as the store reports them.
    ///
    /// # Errors
    /// - `Store` for any storage failure.
    pub fn get_all_students(&self) -> Result<Vec<Student>, StudentServiceError> {
        Ok(self.store.find_all()?)
    }

    /// Persists a new student after checking its email is free.
    ///
    /// # Contract
    /// - Calls `exists_email` once, then `save` at most once.
    /// - `student` reaches the store unchanged.
    ///
    /// # Errors
    /// - `DuplicateEmail` when the email is already stored; storage is untouched.
    /// - `Store` for any other storage failure.
    pub fn add_student(&self, student: &Student) -> Result<Student, StudentServiceError> {
        if self.store.exists_email(&student.email)? {
            return Err(StudentServiceError::DuplicateEmail(student.email.clone()));
        }

        let saved = self.store.save(student)?;
        debug!(
            "event=student_add module=service status=ok id={}",
            saved.id.map_or_else(|| "none".to_string(), |id| id.to_string())
        );
        Ok(saved)
    }
}
