//! Core journal types without I/O operations.
//!
//! This module contains the data model shared by the classification pipeline and
//! the entry store: the `Sentiment` label, the `AnalysisResult` attached to an entry,
//! and the `JournalEntry` record itself, along with the pure validation rules for
//! entry text.
//!
//! The serde representation of `JournalEntry` is the persistence format: a JSON
//! object with `id`, `text`, `createdAt`, `sentiment`, `summary` and `advice` fields.

use crate::constants::MAX_ENTRY_CHARS;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The emotional tone assigned to a journal entry.
///
/// This is a closed set; classifier output that does not match any known
/// vocabulary normalizes to `Neutral`.
///
/// # Examples
///
/// ```
/// use mood_journal::journal_core::Sentiment;
///
/// assert_eq!(Sentiment::Positive.to_string(), "positive");
/// assert_eq!(Sentiment::Negative.display_name(), "Negatif");
/// assert_eq!(Sentiment::default(), Sentiment::Neutral);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Every sentiment value, in display order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// The wire name, as stored in the persistence format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// The badge shown to the user next to an entry.
    pub fn display_name(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Pozitif",
            Sentiment::Negative => "Negatif",
            Sentiment::Neutral => "Nötr",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of analyzing a piece of text.
///
/// `summary` and `advice` depend only on `sentiment`, never on the text itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    pub summary: String,
    pub advice: String,
}

/// A single journal entry as held in memory and persisted to storage.
///
/// Entries are created once by the entry store and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Unique, time-ordered identifier (UUIDv7).
    pub id: String,
    /// The trimmed entry text.
    pub text: String,
    /// Creation time, written as UTC with millisecond precision.
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    pub sentiment: Sentiment,
    pub summary: String,
    pub advice: String,
}

impl JournalEntry {
    /// Builds a new entry from validated text and an analysis result.
    ///
    /// The text is trimmed and checked with [`validate_entry_text`] and a fresh
    /// id is generated. `created_at` is truncated to whole milliseconds so an
    /// entry equals its stored form.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Journal` if the text is empty after trimming or exceeds
    /// the maximum entry length.
    pub fn new(text: &str, analysis: &AnalysisResult, created_at: DateTime<Utc>) -> AppResult<Self> {
        let text = validate_entry_text(text)?;

        Ok(JournalEntry {
            id: Uuid::now_v7().to_string(),
            text: text.to_string(),
            created_at: created_at.trunc_subsecs(3),
            sentiment: analysis.sentiment,
            summary: analysis.summary.clone(),
            advice: analysis.advice.clone(),
        })
    }

    /// The analysis fields of this entry.
    pub fn analysis(&self) -> AnalysisResult {
        AnalysisResult {
            sentiment: self.sentiment,
            summary: self.summary.clone(),
            advice: self.advice.clone(),
        }
    }
}

/// Trims entry text and checks it against the entry rules.
///
/// Entry text must be non-empty after trimming and at most 500 characters
/// (counted as Unicode scalar values, so Turkish letters count once).
///
/// # Errors
///
/// Returns `AppError::Journal` describing which rule was violated.
///
/// # Examples
///
/// ```
/// use mood_journal::journal_core::validate_entry_text;
///
/// assert_eq!(validate_entry_text("  bugün güzeldi \n").unwrap(), "bugün güzeldi");
/// assert!(validate_entry_text("   ").is_err());
/// ```
pub fn validate_entry_text(text: &str) -> AppResult<&str> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(AppError::Journal("Entry text is empty".to_string()));
    }

    let length = trimmed.chars().count();
    if length > MAX_ENTRY_CHARS {
        return Err(AppError::Journal(format!(
            "Entry text is {} characters long; the limit is {}",
            length, MAX_ENTRY_CHARS
        )));
    }

    Ok(trimmed)
}

/// Serializes timestamps the way JavaScript's `toISOString` does
/// (`2024-01-15T09:30:00.000Z`) and accepts any RFC 3339 timestamp on input.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn analysis(sentiment: Sentiment) -> AnalysisResult {
        AnalysisResult {
            sentiment,
            summary: "summary".to_string(),
            advice: "advice".to_string(),
        }
    }

    #[test]
    fn test_sentiment_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            "\"positive\""
        );
        let parsed: Sentiment = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(parsed, Sentiment::Negative);
        assert!(serde_json::from_str::<Sentiment>("\"angry\"").is_err());
    }

    #[test]
    fn test_sentiment_display_names() {
        assert_eq!(Sentiment::Positive.display_name(), "Pozitif");
        assert_eq!(Sentiment::Negative.display_name(), "Negatif");
        assert_eq!(Sentiment::Neutral.display_name(), "Nötr");
    }

    #[test]
    fn test_validate_entry_text_trims() {
        assert_eq!(validate_entry_text("\n\t hello \n").unwrap(), "hello");
    }

    #[test]
    fn test_validate_entry_text_rejects_blank() {
        match validate_entry_text(" \n\t ") {
            Err(AppError::Journal(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected Journal error for blank text"),
        }
    }

    #[test]
    fn test_validate_entry_text_length_limit_counts_chars() {
        // 500 two-byte characters are within the limit
        let at_limit = "ş".repeat(MAX_ENTRY_CHARS);
        assert!(validate_entry_text(&at_limit).is_ok());

        let over_limit = "a".repeat(MAX_ENTRY_CHARS + 1);
        match validate_entry_text(&over_limit) {
            Err(AppError::Journal(msg)) => assert!(msg.contains("501")),
            _ => panic!("Expected Journal error for oversized text"),
        }

        // Surrounding whitespace does not count against the limit
        let padded = format!("   {}   ", "a".repeat(MAX_ENTRY_CHARS));
        assert!(validate_entry_text(&padded).is_ok());
    }

    #[test]
    fn test_new_entry_copies_analysis() {
        let now = Utc::now();
        let entry = JournalEntry::new("  a calm day ", &analysis(Sentiment::Neutral), now).unwrap();

        assert_eq!(entry.text, "a calm day");
        assert_eq!(entry.created_at, now.trunc_subsecs(3));
        assert_eq!(entry.analysis(), analysis(Sentiment::Neutral));
        assert!(Uuid::parse_str(&entry.id).is_ok());
    }

    #[test]
    fn test_new_entry_ids_are_distinct_and_ordered() {
        let now = Utc::now();
        let first = JournalEntry::new("one", &analysis(Sentiment::Positive), now).unwrap();
        let second = JournalEntry::new("two", &analysis(Sentiment::Positive), now).unwrap();

        assert_ne!(first.id, second.id);
        assert!(first.id < second.id);
    }

    #[test]
    fn test_entry_persistence_format() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        let entry = JournalEntry {
            id: "1705311000000".to_string(),
            text: "harika bir gün geçirdim".to_string(),
            created_at,
            sentiment: Sentiment::Positive,
            summary: "s".to_string(),
            advice: "a".to_string(),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], "1705311000000");
        assert_eq!(value["createdAt"], "2024-01-15T09:30:00.000Z");
        assert_eq!(value["sentiment"], "positive");
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_entry_accepts_offset_timestamps() {
        let json = r#"{
            "id": "abc",
            "text": "t",
            "createdAt": "2024-01-15T12:30:00+03:00",
            "sentiment": "neutral",
            "summary": "s",
            "advice": "a"
        }"#;

        let entry: JournalEntry = serde_json::from_str(json).unwrap();
        assert_eq!(
            entry.created_at,
            Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()
        );
    }
}
