//! Aggregation of speech records into the three answers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ url params  │────▶│  Validation │────▶│   Ingest    │────▶│  RecordSet  │
//! │  (ordered)  │     │ (url1..urlN)│     │ (CSV → rec) │     │   (dedup)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                    │
//!                                                             ┌──────▼──────┐
//!                                                             │  evaluate   │
//!                                                             └─────────────┘
//! ```
//!
//! [`evaluate`] is a single fold over the record set. The result does not
//! depend on iteration order.

pub mod leader;
pub mod pipeline;

use std::collections::HashMap;

use crate::models::{Criteria, Evaluation, RecordSet, SpeechRecord};
use leader::{unique_minimum, Leader};

pub use pipeline::{evaluate_params, evaluate_sources, Report};

/// Per-speaker counters collected during one pass.
#[derive(Debug, Default)]
struct Tallies {
    speeches_in_year: HashMap<String, u64>,
    topic_count: HashMap<String, u64>,
    total_words: HashMap<String, u64>,
    most_speeches: Leader,
    most_topic: Leader,
}

impl Tallies {
    fn record(mut self, record: &SpeechRecord, criteria: &Criteria) -> Self {
        let speaker = record.speaker();

        if record.held_in(criteria.year) {
            let count = bump(&mut self.speeches_in_year, speaker, 1);
            self.most_speeches = self.most_speeches.observe(speaker, count);
        }

        if record.is_about(&criteria.topic) {
            let count = bump(&mut self.topic_count, speaker, 1);
            self.most_topic = self.most_topic.observe(speaker, count);
        }

        // Speeches without a positive word count never enter the word tally.
        if let Ok(words) = u64::try_from(record.words()) {
            if words > 0 {
                bump(&mut self.total_words, speaker, words);
            }
        }

        self
    }

    fn finish(self) -> Evaluation {
        Evaluation {
            most_speeches: self.most_speeches.into_speaker(),
            most_security: self.most_topic.into_speaker(),
            least_wordy: unique_minimum(&self.total_words),
        }
    }
}

fn bump(tally: &mut HashMap<String, u64>, speaker: &str, by: u64) -> u64 {
    let entry = tally.entry(speaker.to_string()).or_insert(0);
    *entry += by;
    *entry
}

/// Answer the three questions for `records`.
pub fn evaluate(records: &RecordSet, criteria: &Criteria) -> Evaluation {
    records
        .iter()
        .fold(Tallies::default(), |tallies, record| tallies.record(record, criteria))
        .finish()
}
