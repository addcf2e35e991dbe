//! Unique-leader tracking over per-speaker tallies.
//!
//! A tie for first place never resolves to a list of speakers: it resolves to
//! no answer at all.

use std::collections::HashMap;

/// Running leader of a tally that only ever grows.
///
/// `count` is the highest tally seen so far. `speaker` names its holder, or is
/// `None` while two or more speakers share that value. A later, strictly
/// higher tally produces a unique leader again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leader {
    speaker: Option<String>,
    count: u64,
}

impl Leader {
    /// Fold step: `speaker`'s tally has just become `count`.
    pub fn observe(self, speaker: &str, count: u64) -> Self {
        if count > self.count {
            Self {
                speaker: Some(speaker.to_string()),
                count,
            }
        } else if count == self.count {
            Self {
                speaker: None,
                count,
            }
        } else {
            self
        }
    }

    pub fn speaker(&self) -> Option<&str> {
        self.speaker.as_deref()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn into_speaker(self) -> Option<String> {
        self.speaker
    }
}

/// Speaker holding the strictly smallest total.
///
/// A single entry is its own unique minimum. Ties and empty tallies give
/// `None`.
pub fn unique_minimum(totals: &HashMap<String, u64>) -> Option<String> {
    let mut sorted: Vec<(&String, &u64)> = totals.iter().collect();
    sorted.sort_unstable_by_key(|(_, total)| **total);

    match sorted.as_slice() {
        [] => None,
        [(speaker, _)] => Some((*speaker).clone()),
        [(speaker, first), (_, second), ..] => (first < second).then(|| (*speaker).clone()),
    }
}
