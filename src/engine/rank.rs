//! Cohort ranking
//!
//! A cohort is the set of students sharing a batch and degree; ranking is
//! recomputed fully on each query because any single grade change
//! anywhere in the cohort can shift every position.

use crate::engine::{round_cgpa, StudentAcademicRecord};
use crate::vocab::GradeVocabulary;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One row of a cohort ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStudent {
    /// 1-based position
    pub rank: usize,
    pub index_number: String,
    /// CGPA rounded to 4 decimal places
    pub cgpa: f64,
    /// GPA-bearing credits completed
    pub total_credits: f64,
}

/// Rank a cohort by CGPA.
///
/// Ordering is total and stable across runs: CGPA descending, then
/// bearing credits descending, then index number ascending. Comparison
/// runs on full-precision CGPA; the returned figure is rounded for
/// presentation.
pub fn rank_cohort(
    cohort: &[StudentAcademicRecord],
    vocab: &GradeVocabulary,
) -> Vec<RankedStudent> {
    let mut scored: Vec<(f64, f64, &StudentAcademicRecord)> = cohort
        .iter()
        .map(|record| (record.cgpa(vocab), record.total_credits(vocab), record))
        .collect();

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
            .then_with(|| a.2.index_number.cmp(&b.2.index_number))
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (cgpa, total_credits, record))| RankedStudent {
            rank: i + 1,
            index_number: record.index_number.clone(),
            cgpa: round_cgpa(cgpa),
            total_credits,
        })
        .collect()
}
