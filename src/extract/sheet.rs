//! Result-sheet line parsing
//!
//! A result sheet is a table of student rows surrounded by letterhead,
//! page numbers and signature lines. A row is recognized by its index
//! number (e.g. `IT/20/123`) followed, somewhere on the same line, by a
//! token from the grade vocabulary. Known layout variants differ in
//! column order (index-first vs name-first), whitespace run length, and
//! whether a numeric raw-mark column precedes the letter grade, so the
//! parser keys on the index pattern and takes the *last* recognizable
//! grade token on the line rather than the first.

use crate::error::{Error, Result};
use crate::extract::reader::SheetReader;
use crate::vocab::GradeVocabulary;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One extracted `(index number, grade)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    /// Normalized student index number, e.g. `IT/20/123`
    pub index_number: String,
    /// Normalized grade token from the vocabulary, e.g. `B+`
    pub grade: String,
}

/// Extraction result: records plus non-fatal per-line warnings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    pub records: Vec<GradeRecord>,
    pub warnings: Vec<String>,
}

/// Extraction tagged with the upload context it was parsed for.
///
/// The upload handler knows which module a sheet belongs to; carrying
/// the code alongside the records lets downstream consumers key their
/// (student, module) upserts without re-threading the context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedExtraction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_code: Option<String>,
    #[serde(flatten)]
    pub extraction: Extraction,
}

impl Extraction {
    /// Tag this extraction with the module it was uploaded for
    pub fn tagged(self, module_code: Option<String>) -> TaggedExtraction {
        TaggedExtraction {
            module_code,
            extraction: self,
        }
    }
}

/// Configuration for result-sheet extraction
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Maximum accepted input size in bytes
    pub max_bytes: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            // Matches the upload handler's 5MB per-file cap
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Fixed-format student identifier: 2-4 letter faculty prefix, two-digit
/// intake year, 3-4 digit serial, e.g. `IT/20/123` or `ENG/19/1042`.
fn index_pattern() -> &'static Regex {
    static INDEX_RE: OnceLock<Regex> = OnceLock::new();
    INDEX_RE.get_or_init(|| {
        Regex::new(r"(?i)\b[A-Z]{2,4}/\d{2}/\d{3,4}\b").expect("index pattern is valid")
    })
}

/// Parse already-extracted sheet text into grade records.
///
/// Pure function over text: lines without an index number are discarded;
/// index-bearing lines with no resolvable grade token become warnings.
pub fn parse_sheet_text(text: &str, vocab: &GradeVocabulary) -> Extraction {
    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let Some(index_match) = index_pattern().find(line) else {
            continue;
        };
        let index_number = index_match.as_str().to_ascii_uppercase();

        // Columns after the index number; the grade is the last token the
        // vocabulary recognizes, so numeric mark columns and name initials
        // never shadow it.
        let rest = &line[index_match.end()..];
        let grade = rest
            .split_whitespace()
            .filter(|token| vocab.is_recognized(token))
            .next_back();

        match grade {
            Some(token) => records.push(GradeRecord {
                index_number,
                grade: vocab.normalize(token),
            }),
            None => warnings.push(format!(
                "line {}: index {} has no recognizable grade token: {:?}",
                line_no + 1,
                index_number,
                line.trim()
            )),
        }
    }

    Extraction { records, warnings }
}

/// Parse full-document text, applying the whole-document failure rule:
/// zero records across the entire text is `NoRecordsFound`, with the
/// accumulated per-line warnings attached so a layout mismatch can be
/// diagnosed. Distinct from `UnreadableDocument`, which means the file
/// itself could not be read.
pub fn parse_sheet_document(text: &str, vocab: &GradeVocabulary) -> Result<Extraction> {
    let extraction = parse_sheet_text(text, vocab);
    if extraction.records.is_empty() {
        return Err(Error::NoRecordsFound {
            warnings: extraction.warnings,
        });
    }
    Ok(extraction)
}

/// Extract grade records from a raw result-sheet PDF.
///
/// Fails with `UnreadableDocument` when the bytes cannot be parsed as a
/// PDF at all, and with `NoRecordsFound` (warnings attached) when the
/// document parsed but no grade-bearing line matched. Per-line failures
/// on an otherwise productive document are returned as warnings.
pub fn parse_result_sheet(
    data: &[u8],
    vocab: &GradeVocabulary,
    config: &ExtractorConfig,
) -> Result<Extraction> {
    if data.len() > config.max_bytes {
        return Err(Error::SheetTooLarge {
            size: data.len(),
            max_size: config.max_bytes,
        });
    }

    let reader = SheetReader::from_bytes(data)?;
    let text = reader.full_text();
    let extraction = parse_sheet_document(&text, vocab)?;

    tracing::debug!(
        pages = reader.page_count(),
        records = extraction.records.len(),
        warnings = extraction.warnings.len(),
        "parsed result sheet"
    );

    Ok(extraction)
}
