//! Grade vocabulary
//!
//! The closed set of valid grade tokens shared by the extractor (token
//! matching) and the aggregation engine (point mapping). The table is a
//! frozen, versioned configuration object injected into both subsystems so
//! they cannot drift apart when grades are added.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Point value and GPA treatment for one grade token
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    /// Grade points in [0.0, 4.0]
    pub points: f64,
    /// Whether the grade counts toward the GPA credit denominator.
    /// A true F is bearing (0.0 points, credits counted); sentinels such
    /// as W/I/N/P/PENDING are not.
    pub bearing: bool,
}

/// Versioned grade table mapping normalized tokens to point values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeVocabulary {
    version: u32,
    entries: HashMap<String, GradeEntry>,
}

/// Characters shed from token edges: table borders and OCR artifacts
/// leave trailing periods, commas and pipe characters on grade cells.
const EDGE_PUNCTUATION: &[char] = &['.', ',', ';', ':', '|', '(', ')', '*'];

impl GradeVocabulary {
    /// The standard 4.0-scale table used by the faculty result sheets
    pub fn standard() -> Self {
        let letter = |points| GradeEntry {
            points,
            bearing: true,
        };
        let sentinel = GradeEntry {
            points: 0.0,
            bearing: false,
        };

        let mut entries = HashMap::new();
        entries.insert("A+".to_string(), letter(4.0));
        entries.insert("A".to_string(), letter(4.0));
        entries.insert("A-".to_string(), letter(3.7));
        entries.insert("B+".to_string(), letter(3.3));
        entries.insert("B".to_string(), letter(3.0));
        entries.insert("B-".to_string(), letter(2.7));
        entries.insert("C+".to_string(), letter(2.3));
        entries.insert("C".to_string(), letter(2.0));
        entries.insert("C-".to_string(), letter(1.7));
        entries.insert("D+".to_string(), letter(1.3));
        entries.insert("D".to_string(), letter(1.0));
        entries.insert("E".to_string(), letter(0.5));
        entries.insert("F".to_string(), letter(0.0));

        // Non-GPA sentinels: withdrawn, incomplete, audit, pass, not yet graded
        entries.insert("W".to_string(), sentinel);
        entries.insert("I".to_string(), sentinel);
        entries.insert("N".to_string(), sentinel);
        entries.insert("P".to_string(), sentinel);
        entries.insert("PENDING".to_string(), sentinel);

        Self {
            version: 1,
            entries,
        }
    }

    /// Table version, bumped whenever the token set changes
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Normalize a raw token: trim whitespace, strip edge punctuation,
    /// uppercase
    pub fn normalize(&self, raw: &str) -> String {
        raw.trim()
            .trim_matches(EDGE_PUNCTUATION)
            .to_ascii_uppercase()
    }

    /// Whether a token (after normalization) is in the vocabulary
    pub fn is_recognized(&self, raw: &str) -> bool {
        self.entries.contains_key(&self.normalize(raw))
    }

    /// Whether a token's credits count toward the GPA denominator
    pub fn is_gpa_bearing(&self, raw: &str) -> bool {
        self.entries
            .get(&self.normalize(raw))
            .is_some_and(|e| e.bearing)
    }

    /// Grade points for a token. Total over all strings: unknown tokens
    /// map to 0.0 rather than failing, so one malformed historical record
    /// never blocks a whole transcript from rendering.
    pub fn points(&self, raw: &str) -> f64 {
        self.entries
            .get(&self.normalize(raw))
            .map_or(0.0, |e| e.points)
    }

    /// Entry for a normalized token, if present
    pub fn entry(&self, raw: &str) -> Option<GradeEntry> {
        self.entries.get(&self.normalize(raw)).copied()
    }

    /// All tokens in the table, in no particular order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for GradeVocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_total_over_vocabulary() {
        let vocab = GradeVocabulary::standard();
        for token in vocab.tokens() {
            let points = vocab.points(token);
            assert!(
                (0.0..=4.0).contains(&points),
                "{} maps to {} outside [0, 4]",
                token,
                points
            );
        }
    }

    #[test]
    fn unknown_tokens_map_to_zero() {
        let vocab = GradeVocabulary::standard();
        assert_eq!(vocab.points("Z?"), 0.0);
        assert_eq!(vocab.points("72"), 0.0);
        assert_eq!(vocab.points(""), 0.0);
        assert!(!vocab.is_recognized("Z?"));
    }

    #[test]
    fn normalization_strips_border_punctuation() {
        let vocab = GradeVocabulary::standard();
        assert_eq!(vocab.normalize(" b+. "), "B+");
        assert_eq!(vocab.normalize("|A-|"), "A-");
        assert_eq!(vocab.points("b+."), 3.3);
    }

    #[test]
    fn sentinels_are_zero_point_and_non_bearing() {
        let vocab = GradeVocabulary::standard();
        for token in ["W", "I", "N", "P", "PENDING"] {
            assert_eq!(vocab.points(token), 0.0);
            assert!(!vocab.is_gpa_bearing(token), "{} should not bear credits", token);
        }
        // A genuine F is distinguishable: zero points but bearing
        assert_eq!(vocab.points("F"), 0.0);
        assert!(vocab.is_gpa_bearing("F"));
    }

    #[test]
    fn case_insensitive_lookup() {
        let vocab = GradeVocabulary::standard();
        assert_eq!(vocab.points("a+"), 4.0);
        assert_eq!(vocab.points("pending"), 0.0);
        assert!(vocab.is_recognized("w"));
    }
}
