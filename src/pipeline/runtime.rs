use crate::alignment::overlap::normalize_overlaps;
use crate::alignment::timing::{resolve_timings, TimingContext};
use crate::alignment::tokenization::{build_recognized_words, tokenize_narration};
use crate::config::CaptionConfig;
use crate::error::CaptionError;
use crate::pipeline::traits::{ChunkSegmenter, Normalizer, SequenceAligner};
use crate::types::{AlignmentMap, CaptionChunk, CaptionInput, CaptionOutput};

pub struct CaptionAligner {
    config: CaptionConfig,
    normalizer: Box<dyn Normalizer>,
    sequence_aligner: Box<dyn SequenceAligner>,
    segmenter: Box<dyn ChunkSegmenter>,
}

pub(crate) struct CaptionAlignerParts {
    pub config: CaptionConfig,
    pub normalizer: Box<dyn Normalizer>,
    pub sequence_aligner: Box<dyn SequenceAligner>,
    pub segmenter: Box<dyn ChunkSegmenter>,
}

impl CaptionAligner {
    pub(crate) fn from_parts(parts: CaptionAlignerParts) -> Self {
        Self {
            config: parts.config,
            normalizer: parts.normalizer,
            sequence_aligner: parts.sequence_aligner,
            segmenter: parts.segmenter,
        }
    }

    pub fn config(&self) -> &CaptionConfig {
        &self.config
    }

    /// Time one document's narration against its recognized words.
    ///
    /// Fails only on structurally invalid input; poor recognition quality
    /// degrades to fallback timing and shows up in `coverage_ratio`.
    pub fn align(&self, input: &CaptionInput) -> Result<CaptionOutput, CaptionError> {
        validate_input(input)?;

        let normalize = |word: &str| self.normalizer.normalize(word);
        let narration = tokenize_narration(&input.narration, normalize);
        let recognized = build_recognized_words(&input.words, normalize)?;

        let alignment = self
            .sequence_aligner
            .align(&narration, &recognized, &self.config);
        check_alignment(&alignment, narration.len(), recognized.len())?;
        let coverage_ratio = alignment.coverage_ratio();
        let low_coverage = coverage_ratio < self.config.coverage_threshold;

        let chunks = self
            .segmenter
            .segment(&input.narration, self.config.max_chars_per_chunk);
        check_partition(&chunks, narration.len())?;

        let ctx = TimingContext {
            alignment: &alignment,
            recognized: &recognized,
            total_duration_s: input.total_duration_s,
            config: &self.config,
        };
        let mut captions = resolve_timings(&chunks, &ctx)?;
        let overlap = normalize_overlaps(&mut captions, &self.config);

        tracing::info!(
            narration_tokens = narration.len(),
            recognized_words = recognized.len(),
            coverage = format!("{:.3}", coverage_ratio),
            low_coverage,
            chunks = captions.len(),
            clamped = overlap.clamped,
            residual_overlaps = overlap.residual_overlaps,
            "captions: document aligned"
        );

        Ok(CaptionOutput {
            captions,
            alignment,
            coverage_ratio,
            low_coverage,
            overlap,
        })
    }
}

fn validate_input(input: &CaptionInput) -> Result<(), CaptionError> {
    if input.narration.trim().is_empty() {
        return Err(CaptionError::invalid_input("narration text is empty"));
    }
    if let Some(duration) = input.total_duration_s {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(CaptionError::invalid_input(format!(
                "total duration must be a positive number of seconds, got {duration}"
            )));
        }
    }
    if input.words.is_empty() && input.total_duration_s.is_none() {
        return Err(CaptionError::invalid_input(
            "no recognized words and no total duration; nothing to time captions against",
        ));
    }
    Ok(())
}

/// One entry per token, every index in range, matches never moving backwards.
fn check_alignment(
    alignment: &AlignmentMap,
    narration_len: usize,
    recognized_len: usize,
) -> Result<(), CaptionError> {
    if alignment.len() != narration_len {
        return Err(CaptionError::invalid_input(format!(
            "sequence aligner returned {} entries for {} narration tokens",
            alignment.len(),
            narration_len
        )));
    }
    if let Some((idx, j)) = alignment
        .entries()
        .iter()
        .enumerate()
        .find_map(|(idx, e)| (*e).filter(|j| *j >= recognized_len).map(|j| (idx, j)))
    {
        return Err(CaptionError::invalid_input(format!(
            "sequence aligner mapped narration token {idx} to recognized word {j}, \
             but only {recognized_len} words exist"
        )));
    }
    if let Some(idx) = alignment.first_disorder() {
        return Err(CaptionError::invalid_input(format!(
            "sequence aligner mapped narration token {idx} to an earlier recognized word \
             than a preceding token"
        )));
    }
    Ok(())
}

/// Chunks must cover `0..token_count` in order with no gaps or overlaps.
fn check_partition(chunks: &[CaptionChunk], token_count: usize) -> Result<(), CaptionError> {
    let mut next = 0usize;
    for (idx, chunk) in chunks.iter().enumerate() {
        if chunk.start_token != next {
            return Err(CaptionError::invalid_input(format!(
                "segmenter chunk {idx} starts at token {}, expected {next}",
                chunk.start_token
            )));
        }
        next = next.saturating_add(chunk.token_count);
    }
    if next != token_count {
        return Err(CaptionError::invalid_input(format!(
            "segmenter chunks cover {next} tokens, narration has {token_count}"
        )));
    }
    Ok(())
}
