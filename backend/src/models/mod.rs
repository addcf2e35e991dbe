//! Domain models for speech statistics.
//!
//! - [`SpeechRecord`] - One parsed CSV row
//! - [`RecordSet`] - Deduplicated records collected from all sources
//! - [`Criteria`] - Target year and topic of the evaluation
//! - [`Evaluation`] - Answers to the three questions

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::hash_set;
use std::collections::HashSet;
use utoipa::ToSchema;

/// Year for the "most speeches" question.
pub const TARGET_YEAR: i32 = 2013;

/// Topic for the "most on topic" question, compared case-insensitively.
pub const TARGET_TOPIC: &str = "internal security";

// =============================================================================
// Speech Record
// =============================================================================

/// A single speech as read from a CSV row.
///
/// Equality and hashing cover all four fields, so two rows describing the
/// same speech collapse to one inside a [`RecordSet`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeechRecord {
    speaker: String,
    topic: String,
    date: NaiveDate,
    words: i32,
}

impl SpeechRecord {
    pub fn new(
        speaker: impl Into<String>,
        topic: impl Into<String>,
        date: NaiveDate,
        words: i32,
    ) -> Self {
        Self {
            speaker: speaker.into(),
            topic: topic.into(),
            date,
            words,
        }
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Word count as written in the source. Zero and negative counts are
    /// kept but never enter a word total.
    pub fn words(&self) -> i32 {
        self.words
    }

    /// Whether the speech was given in `year`.
    pub fn held_in(&self, year: i32) -> bool {
        self.date.year() == year
    }

    /// Case-insensitive topic comparison.
    pub fn is_about(&self, topic: &str) -> bool {
        self.topic.to_lowercase() == topic.to_lowercase()
    }
}

// =============================================================================
// Record Set
// =============================================================================

/// Records with set semantics. Iteration order is unspecified.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: HashSet<SpeechRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. Returns `false` if an identical record was present.
    pub fn insert(&mut self, record: SpeechRecord) -> bool {
        self.records.insert(record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, SpeechRecord> {
        self.records.iter()
    }
}

impl Extend<SpeechRecord> for RecordSet {
    fn extend<I: IntoIterator<Item = SpeechRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl FromIterator<SpeechRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = SpeechRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a SpeechRecord;
    type IntoIter = hash_set::Iter<'a, SpeechRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// Criteria
// =============================================================================

/// What the evaluation looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    pub year: i32,
    pub topic: String,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            year: TARGET_YEAR,
            topic: TARGET_TOPIC.to_string(),
        }
    }
}

// =============================================================================
// Evaluation
// =============================================================================

/// Answers to the three questions. A field is `None` when no unique answer
/// exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Speaker with the most speeches in the target year.
    pub most_speeches: Option<String>,
    /// Speaker with the most speeches on the target topic.
    pub most_security: Option<String>,
    /// Speaker with the fewest words overall.
    pub least_wordy: Option<String>,
}
