//! Core use-case services.
//!
//! # Responsibility
//! - Enforce business invariants before delegating to stores.
//! - Keep callers decoupled from storage details.

pub mod student_service;
