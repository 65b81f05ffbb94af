//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical student record shared by store and service layers.
//! - Validate field shape before any persistence.
//!
//! # Invariants
//! - `id` is assigned by a store at persistence time and never changes.
//! - `email` is compared by exact match; validation never rewrites it.
//! - `name` is non-empty after trimming.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static EMAIL_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email shape regex"));

/// Store-assigned identifier of a persisted student.
pub type StudentId = i64;

/// Closed gender enumeration. Stable text form is `MALE` / `FEMALE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Stable text form used in storage and serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }

    /// Parses the stable text form exactly, as persisted by the stores.
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "MALE" => Some(Self::Male),
            "FEMALE" => Some(Self::Female),
            _ => None,
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = StudentValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_db(value.trim().to_ascii_uppercase().as_str())
            .ok_or_else(|| StudentValidationError::UnknownGender(value.to_string()))
    }
}

/// Field-level validation failures for student records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    InvalidId(StudentId),
    EmptyName,
    InvalidEmail(String),
    UnknownGender(String),
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(id) => write!(f, "student id must be positive, got {id}"),
            Self::EmptyName => write!(f, "student name cannot be empty"),
            Self::InvalidEmail(email) => write!(f, "invalid student email `{email}`"),
            Self::UnknownGender(value) => {
                write!(f, "unknown gender `{value}`; expected MALE|FEMALE")
            }
        }
    }
}

impl Error for StudentValidationError {}

/// One enrolled person.
///
/// Equality is field-for-field, including `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// `None` while transient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StudentId>,
    pub name: String,
    /// Unique across all stored students.
    pub email: String,
    pub gender: Gender,
}

impl Student {
    /// Creates a transient student that has not been persisted yet.
    pub fn new(name: impl Into<String>, email: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            gender,
        }
    }

    /// Creates a student carrying an already-known identity.
    ///
    /// Used by store backends when materializing persisted rows.
    pub fn with_id(
        id: StudentId,
        name: impl Into<String>,
        email: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, email, gender)
        }
    }

    /// Returns whether a store has assigned an identity to this value.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Checks field shape without normalizing any value.
    ///
    /// # Errors
    /// - `InvalidId` when an assigned id is not positive.
    /// - `EmptyName` when `name` is blank.
    /// - `InvalidEmail` when `email` is not a single `local@domain` token.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if let Some(id) = self.id.filter(|id| *id <= 0) {
            return Err(StudentValidationError::InvalidId(id));
        }
        if self.name.trim().is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        if !EMAIL_SHAPE_RE.is_match(&self.email) {
            return Err(StudentValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}
