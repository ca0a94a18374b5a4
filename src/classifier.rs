//! Human-readable bands for similarity scores.
//!
//! Two independent classifications exist: a five-band Spanish [`label`] and a
//! four-band presentation [`tier`]. They share the 0.90/0.75/0.60 cut-offs,
//! but only the label has a 0.40 cut-off, so a score of 0.5 reads "Baja"
//! while rendering in the neutral [`SimilarityTier::Default`] style. The two
//! scales are kept separate on purpose and must not be unified.
//!
//! Both functions are total: any `f64`, including negatives, values above
//! one and NaN, maps to a band. Bands are lower-bound inclusive.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Five-band label for a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimilarityLabel {
    /// `>= 0.90`
    VeryHigh,
    /// `>= 0.75`
    High,
    /// `>= 0.60`
    Medium,
    /// `>= 0.40`
    Low,
    /// everything else
    VeryLow,
}

impl SimilarityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityLabel::VeryHigh => "Muy alta",
            SimilarityLabel::High => "Alta",
            SimilarityLabel::Medium => "Media",
            SimilarityLabel::Low => "Baja",
            SimilarityLabel::VeryLow => "Muy baja",
        }
    }
}

impl fmt::Display for SimilarityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four-band presentation tier for a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityTier {
    High,
    Medium,
    Low,
    Default,
}

impl SimilarityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityTier::High => "high",
            SimilarityTier::Medium => "medium",
            SimilarityTier::Low => "low",
            SimilarityTier::Default => "default",
        }
    }
}

impl fmt::Display for SimilarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a similarity score into one of five labels.
///
/// ```
/// use vinculo::classifier::label;
///
/// assert_eq!(label(0.95).as_str(), "Muy alta");
/// assert_eq!(label(0.45).as_str(), "Baja");
/// ```
pub fn label(similarity: f64) -> SimilarityLabel {
    if similarity >= 0.9 {
        SimilarityLabel::VeryHigh
    } else if similarity >= 0.75 {
        SimilarityLabel::High
    } else if similarity >= 0.6 {
        SimilarityLabel::Medium
    } else if similarity >= 0.4 {
        SimilarityLabel::Low
    } else {
        SimilarityLabel::VeryLow
    }
}

/// Classify a similarity score into one of four presentation tiers.
pub fn tier(similarity: f64) -> SimilarityTier {
    if similarity >= 0.9 {
        SimilarityTier::High
    } else if similarity >= 0.75 {
        SimilarityTier::Medium
    } else if similarity >= 0.6 {
        SimilarityTier::Low
    } else {
        SimilarityTier::Default
    }
}

/// Render a score as `"<label> (<percent>%)"`, e.g. `"Alta (80%)"`.
/// Half percentages round away from zero.
pub fn format_score(similarity: f64) -> String {
    format!("{} ({}%)", label(similarity), (similarity * 100.0).round())
}
