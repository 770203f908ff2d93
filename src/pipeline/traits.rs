use crate::config::CaptionConfig;
use crate::types::{AlignmentMap, CaptionChunk, NarrationToken, RecognizedWord};

/// Canonical comparison form for words from both streams.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, word: &str) -> String;
}

/// Document-wide narration → recognized correspondence.
///
/// Implementations must return one entry per narration token with
/// non-decreasing matched indices, and must not fail on poor matches.
pub trait SequenceAligner: Send + Sync {
    fn align(
        &self,
        narration: &[NarrationToken],
        recognized: &[RecognizedWord],
        config: &CaptionConfig,
    ) -> AlignmentMap;
}

/// Splits narration into chunks that partition its whitespace tokens in order.
pub trait ChunkSegmenter: Send + Sync {
    fn segment(&self, narration: &str, max_chars: usize) -> Vec<CaptionChunk>;
}
