//! Result-sheet engine - CLI entry point
//!
//! Operates the extraction and aggregation core without the surrounding
//! web application: extract records from a PDF, or compute GPA figures
//! and cohort rankings from a JSON grade dump.

use anyhow::Context;
use clap::{Parser, Subcommand};
use resultsheet_engine::{
    parse_result_sheet, rank_cohort, round_cgpa, Classification, Error, ExtractorConfig,
    GradeVocabulary, SemesterSummary, StudentAcademicRecord,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "resultsheet", version, about = "Result-sheet extraction and GPA aggregation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract (index number, grade) records from a result-sheet PDF
    Extract {
        /// Path to the PDF file
        file: PathBuf,
        /// Module code the sheet was uploaded for; tagged onto the output
        #[arg(long)]
        module: Option<String>,
        /// Maximum accepted file size in bytes
        #[arg(long)]
        max_bytes: Option<usize>,
    },
    /// Compute CGPA, classification and per-semester SGPA for each student
    Gpa {
        /// JSON file: array of student academic records
        file: PathBuf,
    },
    /// Rank a cohort of students by CGPA
    Rank {
        /// JSON file: array of student academic records
        file: PathBuf,
    },
}

/// Per-student figures emitted by `gpa`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StudentReport {
    index_number: String,
    cgpa: f64,
    total_credits: f64,
    classification: Classification,
    semesters: Vec<SemesterSummary>,
}

fn load_records(path: &Path, vocab: &GradeVocabulary) -> anyhow::Result<Vec<StudentAcademicRecord>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut records: Vec<StudentAcademicRecord> =
        serde_json::from_str(&data).context("grade file is not a valid record array")?;
    for record in &mut records {
        record.refresh_points(vocab);
    }
    Ok(records)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resultsheet_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let vocab = GradeVocabulary::standard();

    match cli.command {
        Command::Extract {
            file,
            module,
            max_bytes,
        } => {
            let data = std::fs::read(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;

            let mut config = ExtractorConfig::default();
            if let Some(max) = max_bytes {
                config.max_bytes = max;
            }

            let extraction = match parse_result_sheet(&data, &vocab, &config) {
                Ok(extraction) => extraction,
                Err(Error::NoRecordsFound { warnings }) => {
                    for warning in &warnings {
                        tracing::warn!("{}", warning);
                    }
                    anyhow::bail!("no grade records were recognized in the document");
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    anyhow::bail!(e.user_message());
                }
            };

            for warning in &extraction.warnings {
                tracing::warn!("{}", warning);
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&extraction.tagged(module))?
            );
        }
        Command::Gpa { file } => {
            let records = load_records(&file, &vocab)?;
            let reports: Vec<StudentReport> = records
                .iter()
                .map(|record| StudentReport {
                    index_number: record.index_number.clone(),
                    cgpa: round_cgpa(record.cgpa(&vocab)),
                    total_credits: record.total_credits(&vocab),
                    classification: record.classification(&vocab),
                    semesters: record.semester_summaries(&vocab),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        Command::Rank { file } => {
            let records = load_records(&file, &vocab)?;
            let ranked = rank_cohort(&records, &vocab);
            println!("{}", serde_json::to_string_pretty(&ranked)?);
        }
    }

    Ok(())
}
