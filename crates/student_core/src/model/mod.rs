//! Domain model for student records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep field-level validation next to the data it guards.
//!
//! # Invariants
//! - A `Student` without an id is transient; only a store assigns ids.
//! - `Gender` is a closed set.

pub mod student;
