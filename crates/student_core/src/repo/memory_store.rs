//! In-memory implementation of `StudentStore`.
//!
//! # Invariants
//! - Ids are assigned from a sequence starting at 1 and are never reused.
//! - Once `i64::MAX` is stored the sequence is exhausted and auto-assignment
//!   fails; explicit ids are still accepted.
//! - The email check and the insert in `save` happen under one lock.

use crate::model::student::{Student, StudentId};
use crate::repo::student_store::{StoreError, StoreResult, StudentStore};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct MemoryState {
    /// `None` once the id space is exhausted.
    next_id: Option<StudentId>,
    records: BTreeMap<StudentId, Student>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            next_id: Some(1),
            records: BTreeMap::new(),
        }
    }
}

/// Process-local student store backed by an ordered map.
#[derive(Debug, Default)]
pub struct InMemoryStudentStore {
    state: Mutex<MemoryState>,
}

impl InMemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory student store lock poisoned".into()))
    }
}

impl StudentStore for InMemoryStudentStore {
    fn find_all(&self) -> StoreResult<Vec<Student>> {
        Ok(self.lock()?.records.values().cloned().collect())
    }

    fn find_by_id(&self, id: StudentId) -> StoreResult<Option<Student>> {
        Ok(self.lock()?.records.get(&id).cloned())
    }

    fn save(&self, student: &Student) -> StoreResult<Student> {
        student.validate()?;

        let mut state = self.lock()?;
        let taken = state
            .records
            .values()
            .any(|stored| stored.email == student.email && stored.id != student.id);
        if taken {
            return Err(StoreError::DuplicateEmail(student.email.clone()));
        }

        let id = match student.id {
            Some(id) => id,
            None => state.next_id.ok_or_else(|| {
                StoreError::Unavailable("in-memory student id sequence exhausted".into())
            })?,
        };
        state.next_id = match (state.next_id, id.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };

        let stored = Student {
            id: Some(id),
            ..student.clone()
        };
        state.records.insert(id, stored.clone());
        Ok(stored)
    }

    fn exists_email(&self, email: &str) -> StoreResult<bool> {
        Ok(self
            .lock()?
            .records
            .values()
            .any(|stored| stored.email == email))
    }

    fn count(&self) -> StoreResult<u64> {
        Ok(self.lock()?.records.len() as u64)
    }

    fn delete_all(&self) -> StoreResult<()> {
        self.lock()?.records.clear();
        Ok(())
    }
}
