use crate::config::CaptionConfig;
use crate::error::CaptionError;
use crate::pipeline::defaults::{NeedlemanWunschAligner, PunctuationNormalizer, SentenceSegmenter};
use crate::pipeline::runtime::{CaptionAligner, CaptionAlignerParts};
use crate::pipeline::traits::{ChunkSegmenter, Normalizer, SequenceAligner};

pub struct CaptionAlignerBuilder {
    config: CaptionConfig,
    normalizer: Option<Box<dyn Normalizer>>,
    sequence_aligner: Option<Box<dyn SequenceAligner>>,
    segmenter: Option<Box<dyn ChunkSegmenter>>,
}

impl CaptionAlignerBuilder {
    pub fn new(config: CaptionConfig) -> Self {
        Self {
            config,
            normalizer: None,
            sequence_aligner: None,
            segmenter: None,
        }
    }

    pub fn with_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn with_sequence_aligner(mut self, sequence_aligner: Box<dyn SequenceAligner>) -> Self {
        self.sequence_aligner = Some(sequence_aligner);
        self
    }

    pub fn with_segmenter(mut self, segmenter: Box<dyn ChunkSegmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    pub fn build(self) -> Result<CaptionAligner, CaptionError> {
        self.config.validate()?;
        let policy = self.config.internal_punctuation;

        Ok(CaptionAligner::from_parts(CaptionAlignerParts {
            config: self.config,
            normalizer: self
                .normalizer
                .unwrap_or_else(|| Box::new(PunctuationNormalizer { policy })),
            sequence_aligner: self
                .sequence_aligner
                .unwrap_or_else(|| Box::new(NeedlemanWunschAligner)),
            segmenter: self
                .segmenter
                .unwrap_or_else(|| Box::new(SentenceSegmenter)),
        }))
    }
}
