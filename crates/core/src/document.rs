use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Format a document was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Pdf,
    Text,
}

impl SourceFormat {
    /// Pick the format from a file name's extension. Only `.pdf` is special;
    /// everything else is read as text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => SourceFormat::Pdf,
            _ => SourceFormat::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Pdf => "pdf",
            SourceFormat::Text => "text",
        }
    }
}

/// Raw text of a document as read from disk or an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Original filename.
    pub filename: String,
    pub format: SourceFormat,
    pub text: String,
}

impl Document {
    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }
}

/// Whitespace-separated word count, the unit every statistic is reported in.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

// ── Compression rate ──────────────────────────────────────────

/// Target summary length as a fraction of the source, strictly between 0 and 1.
///
/// The rate is only ever an instruction to the model. Nothing measures or
/// enforces it on the generated text.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CompressionRate(f64);

impl CompressionRate {
    pub fn new(rate: f64) -> Result<Self, CoreError> {
        if rate.is_finite() && rate > 0.0 && rate < 1.0 {
            Ok(Self(rate))
        } else {
            Err(CoreError::InvalidCompressionRate(rate))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whole-number percentage embedded in prompts (0.3 -> 30).
    pub fn percent(&self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl Default for CompressionRate {
    fn default() -> Self {
        Self(0.3)
    }
}

impl TryFrom<f64> for CompressionRate {
    type Error = CoreError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        Self::new(rate)
    }
}

impl From<CompressionRate> for f64 {
    fn from(rate: CompressionRate) -> Self {
        rate.0
    }
}

impl fmt::Display for CompressionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

// ── Statistics ────────────────────────────────────────────────

/// Word-count statistics reported back to the user after a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub source_words: usize,
    pub summary_words: usize,
    pub requested_rate: f64,
    /// `summary_words / source_words`; 0 when the source has no words.
    pub actual_rate: f64,
}

impl SummaryStats {
    pub fn compute(source: &str, summary: &str, requested: CompressionRate) -> Self {
        let source_words = word_count(source);
        let summary_words = word_count(summary);
        let actual_rate = if source_words == 0 {
            0.0
        } else {
            summary_words as f64 / source_words as f64
        };
        Self {
            source_words,
            summary_words,
            requested_rate: requested.value(),
            actual_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_bounds_are_exclusive() {
        assert!(CompressionRate::new(0.0).is_err());
        assert!(CompressionRate::new(1.0).is_err());
        assert!(CompressionRate::new(-0.2).is_err());
        assert!(CompressionRate::new(f64::NAN).is_err());
        assert!(CompressionRate::new(0.5).is_ok());
    }

    #[test]
    fn percent_rounds_float_noise() {
        assert_eq!(CompressionRate::new(0.3).unwrap().percent(), 30);
        assert_eq!(CompressionRate::new(0.6).unwrap().percent(), 60);
        assert_eq!(CompressionRate::new(0.29).unwrap().percent(), 29);
        assert_eq!(CompressionRate::new(0.7).unwrap().to_string(), "70%");
    }

    #[test]
    fn rate_deserialization_validates() {
        let ok: CompressionRate = serde_json::from_str("0.4").unwrap();
        assert_eq!(ok.percent(), 40);
        assert!(serde_json::from_str::<CompressionRate>("1.5").is_err());
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("book.PDF")), SourceFormat::Pdf);
        assert_eq!(SourceFormat::from_path(Path::new("notes.txt")), SourceFormat::Text);
        assert_eq!(SourceFormat::from_path(Path::new("report.docx")), SourceFormat::Text);
        assert_eq!(SourceFormat::from_path(Path::new("README")), SourceFormat::Text);
    }

    #[test]
    fn stats_compute_ratio() {
        let rate = CompressionRate::new(0.5).unwrap();
        let stats = SummaryStats::compute("one two three four", "one two", rate);
        assert_eq!(stats.source_words, 4);
        assert_eq!(stats.summary_words, 2);
        assert!((stats.actual_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_empty_source_has_zero_ratio() {
        let stats = SummaryStats::compute("   ", "anything", CompressionRate::default());
        assert_eq!(stats.actual_rate, 0.0);
    }
}
