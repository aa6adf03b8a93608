//! Per-student academic record

use crate::engine::{
    bearing_credits, calculate_cgpa, Classification, ModuleGrade, SemesterSummary,
};
use crate::vocab::GradeVocabulary;
use serde::{Deserialize, Serialize};

/// All of one student's module grades.
///
/// Read-side view over data owned by the persistence layer; nothing here
/// mutates grades. Rank is deliberately absent: it only exists relative
/// to a cohort and is computed by [`crate::engine::rank_cohort`] per
/// query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAcademicRecord {
    pub index_number: String,
    pub modules: Vec<ModuleGrade>,
}

impl StudentAcademicRecord {
    pub fn new(index_number: impl Into<String>, modules: Vec<ModuleGrade>) -> Self {
        Self {
            index_number: index_number.into(),
            modules,
        }
    }

    /// Recompute every cached point value from the vocabulary. Run after
    /// deserializing externally-supplied module lists.
    pub fn refresh_points(&mut self, vocab: &GradeVocabulary) {
        for module in &mut self.modules {
            module.refresh_points(vocab);
        }
    }

    /// Cumulative GPA at full precision
    pub fn cgpa(&self, vocab: &GradeVocabulary) -> f64 {
        calculate_cgpa(&self.modules, vocab)
    }

    /// GPA-bearing credits completed (latest attempt per module)
    pub fn total_credits(&self, vocab: &GradeVocabulary) -> f64 {
        bearing_credits(&self.modules, vocab)
    }

    /// Modules assigned, including pending and withdrawn ones
    pub fn assigned_modules(&self) -> usize {
        self.modules.len()
    }

    /// Predicted classification from the current CGPA
    pub fn classification(&self, vocab: &GradeVocabulary) -> Classification {
        Classification::from_cgpa(self.cgpa(vocab))
    }

    /// Per-semester summaries, recomputed fresh from the module list
    pub fn semester_summaries(&self, vocab: &GradeVocabulary) -> Vec<SemesterSummary> {
        SemesterSummary::from_modules(&self.modules, vocab)
    }
}
