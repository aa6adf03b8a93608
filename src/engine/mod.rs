//! GPA/CGPA aggregation engine
//!
//! Pure read-side computation over in-memory grade collections: no I/O,
//! no persistence, safe to invoke concurrently for different students or
//! cohorts. All accumulation runs at full f64 precision; rounding happens
//! exactly once, at presentation, via [`round_display`] / [`round_cgpa`].
//!
//! Denominator policy: SGPA and CGPA divide by the credits of GPA-bearing
//! modules only. A genuine F counts (0.0 points over counted credits);
//! PENDING/W/I/N/P modules contribute neither numerator nor denominator.

mod classify;
mod rank;
mod record;

pub use classify::Classification;
pub use rank::{rank_cohort, RankedStudent};
pub use record::StudentAcademicRecord;

use crate::vocab::GradeVocabulary;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One student's result in one module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleGrade {
    pub module_code: String,
    pub module_name: String,
    /// Credit weight; fractional credits (e.g. 2.5) are valid
    pub credits: f64,
    /// Normalized grade token
    pub grade: String,
    /// Cached point value; always a pure function of `grade`
    pub grade_points: f64,
    pub year: u32,
    pub semester: u32,
}

impl ModuleGrade {
    /// Build a module grade, normalizing the grade token and deriving its
    /// point value from the vocabulary
    pub fn new(
        module_code: impl Into<String>,
        module_name: impl Into<String>,
        credits: f64,
        grade: &str,
        year: u32,
        semester: u32,
        vocab: &GradeVocabulary,
    ) -> Self {
        let grade = vocab.normalize(grade);
        let grade_points = vocab.points(&grade);
        // Credits must be a positive finite weight; anything else would
        // propagate NaN through the Σ/Σ, so invalid input degrades to a
        // weightless module, matching the lenient unknown-grade policy.
        let credits = if credits.is_finite() && credits > 0.0 {
            credits
        } else {
            0.0
        };
        Self {
            module_code: module_code.into(),
            module_name: module_name.into(),
            credits,
            grade,
            grade_points,
            year,
            semester,
        }
    }

    /// Change the grade, recomputing the cached point value.
    /// The cached value must never survive a grade change.
    pub fn set_grade(&mut self, grade: &str, vocab: &GradeVocabulary) {
        self.grade = vocab.normalize(grade);
        self.grade_points = vocab.points(&self.grade);
    }

    /// Recompute the cached point value from the current grade. Called
    /// after deserializing externally-supplied data so a stale or
    /// hand-edited `gradePoints` field cannot drift from the grade.
    pub fn refresh_points(&mut self, vocab: &GradeVocabulary) {
        self.grade_points = vocab.points(&self.grade);
    }
}

/// Grade points for a single token. Thin forwarding wrapper kept as the
/// engine's public point-mapping entry; total over all strings.
pub fn grade_to_points(grade: &str, vocab: &GradeVocabulary) -> f64 {
    vocab.points(grade)
}

/// Repeat-module policy: when a module code appears more than once for
/// one student (resit attempts), only the latest occurrence counts toward
/// averages and credit totals. Earlier attempts stay in the record for
/// display but are skipped here. The latest occurrence wins even when it
/// carries a sentinel grade: withdrawing from a resit removes the module
/// from the sums entirely, it does not revive the earlier attempt.
fn latest_attempts(modules: &[ModuleGrade]) -> Vec<&ModuleGrade> {
    let mut last_index: HashMap<&str, usize> = HashMap::new();
    for (i, m) in modules.iter().enumerate() {
        last_index.insert(m.module_code.as_str(), i);
    }
    modules
        .iter()
        .enumerate()
        .filter(|(i, m)| last_index[m.module_code.as_str()] == *i)
        .map(|(_, m)| m)
        .collect()
}

/// Whether a module contributes to the GPA sums: a GPA-bearing grade
/// and a positive finite credit weight. Deserialized data can carry
/// credits the constructor never saw, so the check runs here too.
fn countable(module: &ModuleGrade, vocab: &GradeVocabulary) -> bool {
    vocab.is_gpa_bearing(&module.grade) && module.credits.is_finite() && module.credits > 0.0
}

/// Credit-weighted grade point average over a module list, at full
/// precision. Returns 0.0 when no GPA-bearing credits are present.
fn weighted_average(modules: &[&ModuleGrade], vocab: &GradeVocabulary) -> f64 {
    let mut quality_points = 0.0;
    let mut credit_hours = 0.0;

    for module in modules {
        if countable(module, vocab) {
            quality_points += vocab.points(&module.grade) * module.credits;
            credit_hours += module.credits;
        }
    }

    if credit_hours == 0.0 {
        0.0
    } else {
        quality_points / credit_hours
    }
}

/// Semester GPA over the given modules, at full precision
pub fn calculate_sgpa(modules: &[ModuleGrade], vocab: &GradeVocabulary) -> f64 {
    let latest = latest_attempts(modules);
    weighted_average(&latest, vocab)
}

/// Cumulative GPA over a student's full module list, at full precision.
///
/// This is a single sum-over-sums across every GPA-bearing credit-hour,
/// not an average of per-semester SGPAs; semesters with heavier credit
/// loads weigh proportionally more.
pub fn calculate_cgpa(all_modules: &[ModuleGrade], vocab: &GradeVocabulary) -> f64 {
    let latest = latest_attempts(all_modules);
    weighted_average(&latest, vocab)
}

/// Sum of GPA-bearing credits across the latest attempt of each module
pub fn bearing_credits(modules: &[ModuleGrade], vocab: &GradeVocabulary) -> f64 {
    latest_attempts(modules)
        .iter()
        .filter(|m| countable(m, vocab))
        .map(|m| m.credits)
        .sum()
}

/// Round for display: 2 decimal places
pub fn round_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round for stored/ranked CGPA figures: 4 decimal places
pub fn round_cgpa(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Computed view of one semester's results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterSummary {
    pub year: u32,
    pub semester: u32,
    /// Display-rounded SGPA (2 decimal places)
    pub sgpa: f64,
    /// GPA-bearing credits in this semester
    pub total_credits: f64,
    /// Modules ordered by module code
    pub modules: Vec<ModuleGrade>,
}

impl SemesterSummary {
    /// Derive per-semester summaries from a full module list.
    ///
    /// Always computed fresh from the complete list, never patched
    /// incrementally, so a grade mutation cannot leave a stale figure.
    pub fn from_modules(all_modules: &[ModuleGrade], vocab: &GradeVocabulary) -> Vec<Self> {
        let mut buckets: HashMap<(u32, u32), Vec<ModuleGrade>> = HashMap::new();
        for module in all_modules {
            buckets
                .entry((module.year, module.semester))
                .or_default()
                .push(module.clone());
        }

        let mut keys: Vec<(u32, u32)> = buckets.keys().copied().collect();
        keys.sort_unstable();

        keys.into_iter()
            .map(|(year, semester)| {
                let mut modules = buckets.remove(&(year, semester)).unwrap_or_default();
                modules.sort_by(|a, b| a.module_code.cmp(&b.module_code));
                let sgpa = round_display(calculate_sgpa(&modules, vocab));
                let total_credits = bearing_credits(&modules, vocab);
                Self {
                    year,
                    semester,
                    sgpa,
                    total_credits,
                    modules,
                }
            })
            .collect()
    }
}
