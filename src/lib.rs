//! Result-Sheet Engine
//!
//! This crate implements the computational core of a university grading
//! system:
//! - `extract`: turn a result-sheet PDF into `(index number, grade)`
//!   records, tolerant of layout variants and noisy whitespace
//! - `engine`: compute SGPA/CGPA, honors classification and cohort
//!   ranking over a student's module grades
//! - `submission`: the one-time grade-submission state machine
//! - `store`: in-memory grade store with atomic submission transitions
//!
//! The surrounding web application (auth, upload UI, persistence) is an
//! external collaborator; everything here is pure computation over bytes
//! and in-memory collections.

pub mod engine;
pub mod error;
pub mod extract;
pub mod store;
pub mod submission;
pub mod vocab;

pub use engine::{
    calculate_cgpa, calculate_sgpa, grade_to_points, rank_cohort, round_cgpa, round_display,
    Classification, ModuleGrade, RankedStudent, SemesterSummary, StudentAcademicRecord,
};
pub use error::{Error, Result};
pub use extract::{
    parse_result_sheet, parse_sheet_document, parse_sheet_text, Extraction, ExtractorConfig,
    GradeRecord, SheetReader, TaggedExtraction,
};
pub use store::{GradeStore, MergeOutcome};
pub use submission::{SubmissionState, LOCK_THRESHOLD};
pub use vocab::{GradeEntry, GradeVocabulary};
