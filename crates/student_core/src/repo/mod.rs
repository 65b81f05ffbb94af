//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the `StudentStore` data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths call `Student::validate()` before mutating storage.
//! - Email uniqueness is enforced at the storage boundary by every backend.

pub mod memory_store;
pub mod sqlite_store;
pub mod student_store;
