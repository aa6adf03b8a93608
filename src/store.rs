//! In-memory grade store
//!
//! Reference implementation of the persistence seam the submission state
//! machine requires: the read-modify-write on a (student, module) entry
//! runs under one lock, so concurrent submissions against the same entry
//! serialize and at most one can cross a lock transition.

use crate::error::{Error, Result};
use crate::extract::GradeRecord;
use crate::submission::SubmissionState;
use crate::vocab::GradeVocabulary;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

type Key = (String, String); // (index number, module code)

/// Thread-safe map of submission states keyed by (student, module)
#[derive(Default)]
pub struct GradeStore {
    inner: Mutex<HashMap<Key, SubmissionState>>,
}

/// Outcome of merging one extraction into the store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutcome {
    /// Records applied (inserted or updated)
    pub applied: usize,
    /// Index numbers whose entry was already locked and left untouched
    pub skipped_locked: Vec<String>,
}

impl GradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically submit a grade for one (student, module) pair.
    ///
    /// The check-then-transition runs under the store lock; a concurrent
    /// submission that locked the entry first causes this one to fail
    /// with `GradeLocked`.
    pub fn submit(
        &self,
        index_number: &str,
        module_code: &str,
        grade: &str,
        vocab: &GradeVocabulary,
    ) -> Result<SubmissionState> {
        let key = (index_number.to_string(), module_code.to_string());
        let mut inner = self.inner.lock();

        let current = inner.get(&key).cloned().unwrap_or_default();
        let next = current.submit(module_code, grade, vocab)?;
        inner.insert(key, next.clone());
        Ok(next)
    }

    /// Upsert extractor output for one module, keyed by (student, module).
    ///
    /// Locked entries are skipped and reported rather than failing the
    /// whole merge; the caller surfaces them for manual review.
    pub fn merge_extraction(
        &self,
        records: &[GradeRecord],
        module_code: &str,
        vocab: &GradeVocabulary,
    ) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();

        for record in records {
            match self.submit(&record.index_number, module_code, &record.grade, vocab) {
                Ok(_) => outcome.applied += 1,
                Err(Error::GradeLocked { .. }) => {
                    tracing::warn!(
                        index = %record.index_number,
                        module = module_code,
                        "skipping locked entry during merge"
                    );
                    outcome.skipped_locked.push(record.index_number.clone());
                }
                Err(err) => {
                    // Extractor output is vocabulary-filtered, so this is
                    // unexpected; log and keep merging.
                    tracing::warn!(
                        index = %record.index_number,
                        module = module_code,
                        error = %err,
                        "record rejected during merge"
                    );
                }
            }
        }

        outcome
    }

    /// Current state of one entry, if present
    pub fn state(&self, index_number: &str, module_code: &str) -> Option<SubmissionState> {
        self.inner
            .lock()
            .get(&(index_number.to_string(), module_code.to_string()))
            .cloned()
    }

    /// Number of entries in the store
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Snapshot of every entry, for read-side aggregation
    pub fn snapshot(&self) -> Vec<(String, String, SubmissionState)> {
        self.inner
            .lock()
            .iter()
            .map(|((index, module), state)| (index.clone(), module.clone(), state.clone()))
            .collect()
    }
}
