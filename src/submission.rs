//! One-time grade-submission state machine
//!
//! `Pending -> Submitted(grade) -> Locked(grade)`. A grade at C or better
//! (2.0 points) locks the module permanently; anything below stays
//! resubmittable to support repeat/resit workflows. The threshold lives
//! here and nowhere else. There is no unlock path.
//!
//! Transitions are pure; callers that persist the state must apply the
//! returned value under a compare-and-swap on the current state (see
//! [`crate::store::GradeStore`]) so two concurrent submissions for the
//! same module cannot both succeed past a lock.

use crate::error::{Error, Result};
use crate::vocab::GradeVocabulary;
use serde::{Deserialize, Serialize};

/// Grade points at or above which a submitted grade becomes immutable
pub const LOCK_THRESHOLD: f64 = 2.0;

/// Submission state of one (student, module) pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    /// No grade submitted yet; excluded from completed-credit counts
    #[default]
    Pending,
    /// Graded below the lock threshold; may be resubmitted
    Submitted { grade: String },
    /// Terminal: graded at C or better, permanently immutable
    Locked { grade: String },
}

impl SubmissionState {
    /// Attempt a grade submission, returning the successor state.
    ///
    /// Fails with `GradeLocked` on a locked module and with
    /// `InvalidGradeToken` when the grade is outside the vocabulary.
    /// Each resubmission re-checks the threshold and locks once crossed.
    pub fn submit(
        &self,
        module_code: &str,
        raw_grade: &str,
        vocab: &GradeVocabulary,
    ) -> Result<SubmissionState> {
        if let SubmissionState::Locked { grade } = self {
            return Err(Error::GradeLocked {
                module_code: module_code.to_string(),
                grade: grade.clone(),
            });
        }

        let grade = vocab.normalize(raw_grade);
        let Some(entry) = vocab.entry(&grade) else {
            return Err(Error::InvalidGradeToken { token: grade });
        };

        if entry.points >= LOCK_THRESHOLD {
            Ok(SubmissionState::Locked { grade })
        } else {
            Ok(SubmissionState::Submitted { grade })
        }
    }

    /// Whether a further submission can succeed
    pub fn is_editable(&self) -> bool {
        !matches!(self, SubmissionState::Locked { .. })
    }

    /// The submitted grade, if any
    pub fn current_grade(&self) -> Option<&str> {
        match self {
            SubmissionState::Pending => None,
            SubmissionState::Submitted { grade } | SubmissionState::Locked { grade } => {
                Some(grade.as_str())
            }
        }
    }
}
