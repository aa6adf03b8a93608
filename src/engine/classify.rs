//! Honors classification from CGPA

use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicted honors classification.
///
/// Thresholds are inclusive on the lower bound and exclusive on the
/// upper: exactly 3.70 is First Class, not Upper Division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    FirstClass,
    SecondUpper,
    SecondLower,
    General,
    Fail,
}

impl Classification {
    /// Classify a CGPA value
    pub fn from_cgpa(cgpa: f64) -> Self {
        if cgpa >= 3.70 {
            Classification::FirstClass
        } else if cgpa >= 3.30 {
            Classification::SecondUpper
        } else if cgpa >= 3.00 {
            Classification::SecondLower
        } else if cgpa >= 2.00 {
            Classification::General
        } else {
            Classification::Fail
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Classification::FirstClass => "First Class",
            Classification::SecondUpper => "Second Class - Upper Division",
            Classification::SecondLower => "Second Class - Lower Division",
            Classification::General => "General",
            Classification::Fail => "Fail",
        };
        f.write_str(label)
    }
}
