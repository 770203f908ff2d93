use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::alignment::overlap::OverlapStats;
use crate::error::CaptionError;

/// One word as delivered by the speech recognizer, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AsrWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

impl AsrWord {
    pub fn new(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start,
            end,
        }
    }

    /// Parse the recognizer's `[{"word", "start", "end"}, ...]` list.
    pub fn list_from_json_str(data: &str) -> Result<Vec<Self>, CaptionError> {
        serde_json::from_str(data).map_err(|e| CaptionError::json("parse recognized words", e))
    }
}

#[derive(Debug, Clone)]
pub struct CaptionInput {
    pub narration: String,
    pub words: Vec<AsrWord>,
    /// Total audio duration in seconds; only the fallback tiers read it.
    pub total_duration_s: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationToken {
    pub raw: String,
    pub normalized: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedWord {
    pub raw: String,
    pub normalized: String,
    pub start: f64,
    /// Always strictly greater than `start`.
    pub end: f64,
    pub index: usize,
}

/// Narration-index → recognized-index correspondence for one document.
///
/// Holds exactly one entry per narration token; matched recognized indices
/// never decrease as the narration index grows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlignmentMap {
    entries: Vec<Option<usize>>,
}

impl AlignmentMap {
    /// Wraps raw entries without checking them; see [`AlignmentMap::first_disorder`].
    pub fn from_entries(entries: Vec<Option<usize>>) -> Self {
        Self { entries }
    }

    pub fn unmatched(len: usize) -> Self {
        Self {
            entries: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, narration_index: usize) -> Option<usize> {
        self.entries.get(narration_index).copied().flatten()
    }

    pub fn entries(&self) -> &[Option<usize>] {
        &self.entries
    }

    /// Matched recognized indices inside `range`, clamped to the map length.
    pub fn matched_in(&self, range: Range<usize>) -> impl Iterator<Item = usize> + '_ {
        let end = range.end.min(self.entries.len());
        let start = range.start.min(end);
        self.entries[start..end].iter().copied().flatten()
    }

    /// Narration index of the first matched entry whose recognized index is
    /// smaller than an earlier match, if any.
    pub fn first_disorder(&self) -> Option<usize> {
        let mut prev = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            if let Some(j) = *entry {
                if prev.is_some_and(|p| j < p) {
                    return Some(idx);
                }
                prev = Some(j);
            }
        }
        None
    }

    pub fn matched_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Matched narration tokens / total narration tokens; 0 for an empty map.
    pub fn coverage_ratio(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.matched_count() as f64 / self.entries.len() as f64
    }
}

/// A display-sized run of narration tokens, before timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionChunk {
    pub start_token: usize,
    pub token_count: usize,
    /// Original words (punctuation and casing intact) joined by single spaces.
    pub text: String,
}

impl CaptionChunk {
    pub fn token_range(&self) -> Range<usize> {
        self.start_token..self.start_token + self.token_count
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingMethod {
    /// Bounds come from the chunk's first and last matched recognized words.
    Direct,
    /// Window proportional to character count, laid out from document start.
    Proportional,
    /// Total duration split evenly across chunks.
    EvenSplit,
    /// Zero-token chunk parked at the document end.
    Degenerate,
}

impl TimingMethod {
    pub const ALL: [TimingMethod; 4] = [
        TimingMethod::Direct,
        TimingMethod::Proportional,
        TimingMethod::EvenSplit,
        TimingMethod::Degenerate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimingMethod::Direct => "direct",
            TimingMethod::Proportional => "proportional",
            TimingMethod::EvenSplit => "even_split",
            TimingMethod::Degenerate => "degenerate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedChunk {
    pub text: String,
    /// Seconds.
    pub start: f64,
    /// Seconds.
    pub end: f64,
    pub start_token: usize,
    pub token_count: usize,
    pub method: TimingMethod,
}

impl TimedChunk {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone)]
pub struct CaptionOutput {
    pub captions: Vec<TimedChunk>,
    pub alignment: AlignmentMap,
    pub coverage_ratio: f64,
    /// True when coverage was below the configured threshold.
    pub low_coverage: bool,
    pub overlap: OverlapStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_ratio_counts_matched_entries() {
        let map = AlignmentMap::from_entries(vec![Some(0), None, Some(2), Some(3)]);
        assert_eq!(map.len(), 4);
        assert_eq!(map.matched_count(), 3);
        assert!((map.coverage_ratio() - 0.75).abs() < 1e-12);
        assert_eq!(AlignmentMap::default().coverage_ratio(), 0.0);
    }

    #[test]
    fn matched_in_clamps_out_of_range() {
        let map = AlignmentMap::from_entries(vec![Some(0), None, Some(4)]);
        assert_eq!(map.matched_in(1..10).collect::<Vec<_>>(), vec![4]);
        assert_eq!(map.matched_in(5..9).count(), 0);
    }

    #[test]
    fn first_disorder_finds_backwards_match() {
        let ordered = AlignmentMap::from_entries(vec![Some(0), None, Some(2), Some(2)]);
        assert_eq!(ordered.first_disorder(), None);
        let backwards = AlignmentMap::from_entries(vec![Some(1), None, Some(3), Some(0)]);
        assert_eq!(backwards.first_disorder(), Some(3));
    }

    #[test]
    fn asr_words_parse_from_json() {
        let json = r#"[{"word": " Hello,", "start": 0.0, "end": 0.4},
                       {"word": "world", "start": 0.4, "end": 0.9}]"#;
        let words = AsrWord::list_from_json_str(json).expect("valid word list");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0], AsrWord::new(" Hello,", 0.0, 0.4));
        assert!(AsrWord::list_from_json_str(r#"[{"word": "x"}]"#).is_err());
    }

    #[test]
    fn timing_method_labels() {
        let labels: Vec<_> = TimingMethod::ALL.iter().map(|m| m.as_str()).collect();
        assert_eq!(labels, ["direct", "proportional", "even_split", "degenerate"]);
    }
}
