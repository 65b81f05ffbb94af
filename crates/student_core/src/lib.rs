//! Core domain logic for student records.
//! This crate is the single source of truth for the email-uniqueness invariant.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::student::{Gender, Student, StudentId, StudentValidationError};
pub use repo::memory_store::InMemoryStudentStore;
pub use repo::sqlite_store::SqliteStudentStore;
pub use repo::student_store::{StoreError, StoreResult, StudentStore};
pub use service::student_service::{StudentService, StudentServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
