//! Integration tests for the aggregation engine, submission flow and store

use pretty_assertions::assert_eq;
use resultsheet_engine::{
    calculate_cgpa, calculate_sgpa, parse_sheet_text, rank_cohort, round_display, Classification,
    Error, GradeStore, GradeVocabulary, ModuleGrade, StudentAcademicRecord, SubmissionState,
};

fn vocab() -> GradeVocabulary {
    GradeVocabulary::standard()
}

fn module(code: &str, credits: f64, grade: &str, year: u32, semester: u32) -> ModuleGrade {
    ModuleGrade::new(code, code, credits, grade, year, semester, &vocab())
}

// ============================================================================
// GPA computation
// ============================================================================

#[test]
fn cgpa_is_not_the_mean_of_sgpas() {
    let v = vocab();
    let sem1 = vec![module("IT1010", 2.0, "A", 1, 1)];
    let sem2 = vec![
        module("IT2010", 4.0, "C", 1, 2),
        module("IT2020", 4.0, "C+", 1, 2),
    ];

    let sgpa1 = calculate_sgpa(&sem1, &v);
    let sgpa2 = calculate_sgpa(&sem2, &v);
    let naive_mean = (sgpa1 + sgpa2) / 2.0;

    let all: Vec<ModuleGrade> = sem1.into_iter().chain(sem2).collect();
    let cgpa = calculate_cgpa(&all, &v);

    // (4.0x2 + 2.0x4 + 2.3x4) / 10 = 2.52 vs mean (4.0 + 2.15) / 2 = 3.075
    assert!((cgpa - 2.52).abs() < 1e-9);
    assert!((cgpa - naive_mean).abs() > 0.1);
}

#[test]
fn fractional_credits_are_weighted_exactly() {
    let v = vocab();
    let modules = vec![
        module("IT1010", 2.5, "A", 1, 1),
        module("IT1020", 1.5, "B", 1, 1),
    ];
    // (4.0 x 2.5 + 3.0 x 1.5) / 4.0 = 3.625
    let sgpa = calculate_sgpa(&modules, &v);
    assert!((sgpa - 3.625).abs() < 1e-9);
    assert_eq!(round_display(sgpa), 3.63);
}

#[test]
fn unknown_historical_grade_degrades_to_zero_not_error() {
    let v = vocab();
    let modules = vec![
        module("IT1010", 3.0, "A", 1, 1),
        module("IT1020", 3.0, "X9", 1, 1), // legacy token outside the table
    ];
    // The unknown token is non-bearing: it neither fails nor drags the average
    let sgpa = calculate_sgpa(&modules, &v);
    assert!((sgpa - 4.0).abs() < 1e-9);
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn classification_tracks_computed_cgpa() {
    let v = vocab();
    let first = StudentAcademicRecord::new(
        "IT/20/101",
        vec![module("IT1010", 3.0, "A", 1, 1), module("IT1020", 3.0, "A-", 1, 1)],
    );
    // (4.0 + 3.7) / 2 = 3.85
    assert_eq!(first.classification(&v), Classification::FirstClass);

    let pass = StudentAcademicRecord::new("IT/20/102", vec![module("IT1010", 3.0, "C", 1, 1)]);
    assert_eq!(pass.classification(&v), Classification::General);
}

// ============================================================================
// Ranking
// ============================================================================

#[test]
fn ranking_is_deterministic_across_runs() {
    let v = vocab();
    let cohort = vec![
        StudentAcademicRecord::new("IT/20/105", vec![module("IT1010", 3.0, "B", 1, 1)]),
        StudentAcademicRecord::new("IT/20/103", vec![module("IT1010", 3.0, "B", 1, 1)]),
        StudentAcademicRecord::new("IT/20/104", vec![module("IT1010", 3.0, "A", 1, 1)]),
    ];

    let first_run = rank_cohort(&cohort, &v);
    for _ in 0..5 {
        assert_eq!(rank_cohort(&cohort, &v), first_run);
    }

    let order: Vec<&str> = first_run.iter().map(|r| r.index_number.as_str()).collect();
    // Tied students order by index number ascending
    assert_eq!(order, vec!["IT/20/104", "IT/20/103", "IT/20/105"]);
    assert_eq!(first_run[0].rank, 1);
    assert_eq!(first_run[1].rank, 2);
    assert_eq!(first_run[2].rank, 3);
}

// ============================================================================
// Submission and locking
// ============================================================================

#[test]
fn submission_lifecycle_b_locks() {
    let v = vocab();
    let locked = SubmissionState::Pending.submit("IT1010", "B", &v).unwrap();
    assert_eq!(
        locked,
        SubmissionState::Locked {
            grade: "B".to_string()
        }
    );
    assert!(matches!(
        locked.submit("IT1010", "A+", &v),
        Err(Error::GradeLocked { .. })
    ));
}

#[test]
fn submission_lifecycle_d_then_improvement() {
    let v = vocab();
    let submitted = SubmissionState::Pending.submit("IT1010", "D", &v).unwrap();
    assert!(submitted.is_editable());

    let locked = submitted.submit("IT1010", "B+", &v).unwrap();
    assert_eq!(locked.current_grade(), Some("B+"));
    assert!(!locked.is_editable());
}

// ============================================================================
// End-to-end: extraction -> store -> aggregation
// ============================================================================

#[test]
fn sheet_text_flows_into_store_and_gpa() {
    let v = vocab();
    let sheet = "\
Index No        Marks   Grade
IT/20/101       82      A
IT/20/102       74      B+
IT/20/103       45      D";

    let extraction = parse_sheet_text(sheet, &v);
    assert_eq!(extraction.records.len(), 3);

    let store = GradeStore::new();
    let outcome = store.merge_extraction(&extraction.records, "IT1010", &v);
    assert_eq!(outcome.applied, 3);
    assert!(outcome.skipped_locked.is_empty());

    // A and B+ locked on merge; the D remains open for a resit
    assert!(!store.state("IT/20/101", "IT1010").unwrap().is_editable());
    assert!(store.state("IT/20/103", "IT1010").unwrap().is_editable());

    // Aggregate the merged grades into records and rank the cohort
    let cohort: Vec<StudentAcademicRecord> = store
        .snapshot()
        .into_iter()
        .map(|(index, module_code, state)| {
            let grade = state.current_grade().unwrap_or("PENDING").to_string();
            StudentAcademicRecord::new(
                index,
                vec![ModuleGrade::new(
                    module_code,
                    "Programming I",
                    3.0,
                    &grade,
                    1,
                    1,
                    &v,
                )],
            )
        })
        .collect();

    let ranked = rank_cohort(&cohort, &v);
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].index_number, "IT/20/101");
    assert_eq!(ranked[0].cgpa, 4.0);
    assert_eq!(ranked[2].index_number, "IT/20/103");
}

#[test]
fn re_uploading_a_sheet_cannot_overwrite_locked_grades() {
    let v = vocab();
    let store = GradeStore::new();

    let first = parse_sheet_text("IT/20/101  B", &v);
    store.merge_extraction(&first.records, "IT1010", &v);

    // Corrected sheet arrives with a different grade for the same student
    let second = parse_sheet_text("IT/20/101  A", &v);
    let outcome = store.merge_extraction(&second.records, "IT1010", &v);

    assert_eq!(outcome.applied, 0);
    assert_eq!(outcome.skipped_locked, vec!["IT/20/101".to_string()]);
    assert_eq!(
        store.state("IT/20/101", "IT1010").unwrap().current_grade(),
        Some("B")
    );
}

// ============================================================================
// Record JSON round-trip (CLI wire format)
// ============================================================================

#[test]
fn student_records_round_trip_through_json() {
    let v = vocab();
    let record = StudentAcademicRecord::new(
        "IT/20/123",
        vec![module("IT1010", 2.5, "A-", 1, 1)],
    );
    let json = serde_json::to_string(&record).expect("serialize");
    assert!(json.contains("\"indexNumber\""));
    assert!(json.contains("\"moduleCode\""));

    let mut back: StudentAcademicRecord = serde_json::from_str(&json).expect("deserialize");
    back.refresh_points(&v);
    assert_eq!(back, record);
}
