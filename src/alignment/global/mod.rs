use crate::config::CaptionConfig;
use crate::types::{AlignmentMap, NarrationToken, RecognizedWord};

mod scoring;
mod table;

use scoring::ScoringParams;
use table::ScoreTable;

/// Document-wide Needleman-Wunsch alignment of narration tokens against
/// recognized words.
///
/// Every narration token gets a decision from a single pass over the whole
/// document, so a bad match early on cannot drag later chunks off course.
/// Never fails on poor input: an empty recognized list yields an all-unmatched
/// map.
pub fn align_global(
    narration: &[NarrationToken],
    recognized: &[RecognizedWord],
    config: &CaptionConfig,
) -> AlignmentMap {
    if narration.is_empty() || recognized.is_empty() {
        return AlignmentMap::unmatched(narration.len());
    }

    let params = ScoringParams::from(config);
    let narration_chars: Vec<Vec<char>> =
        narration.iter().map(|t| t.normalized.chars().collect()).collect();
    let recognized_chars: Vec<Vec<char>> =
        recognized.iter().map(|w| w.normalized.chars().collect()).collect();

    let table = ScoreTable::fill(&narration_chars, &recognized_chars, &params);
    let map = AlignmentMap::from_entries(table.backtrace());

    tracing::debug!(
        narration_tokens = narration.len(),
        recognized_words = recognized.len(),
        table_cells = (narration.len() + 1) * (recognized.len() + 1),
        matched = map.matched_count(),
        coverage = format!("{:.3}", map.coverage_ratio()),
        "alignment: global table filled"
    );
    map
}
