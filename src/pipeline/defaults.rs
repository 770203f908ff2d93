use crate::alignment::global::align_global;
use crate::alignment::segmentation::segment_narration;
use crate::alignment::tokenization::normalize_word;
use crate::config::{CaptionConfig, InternalPunctuation};
use crate::pipeline::traits::{ChunkSegmenter, Normalizer, SequenceAligner};
use crate::types::{AlignmentMap, CaptionChunk, NarrationToken, RecognizedWord};

#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationNormalizer {
    pub policy: InternalPunctuation,
}

impl Normalizer for PunctuationNormalizer {
    fn normalize(&self, word: &str) -> String {
        normalize_word(word, self.policy)
    }
}

pub struct NeedlemanWunschAligner;

impl SequenceAligner for NeedlemanWunschAligner {
    fn align(
        &self,
        narration: &[NarrationToken],
        recognized: &[RecognizedWord],
        config: &CaptionConfig,
    ) -> AlignmentMap {
        align_global(narration, recognized, config)
    }
}

pub struct SentenceSegmenter;

impl ChunkSegmenter for SentenceSegmenter {
    fn segment(&self, narration: &str, max_chars: usize) -> Vec<CaptionChunk> {
        segment_narration(narration, max_chars)
    }
}
