use crate::config::CaptionConfig;
use crate::error::CaptionError;
use crate::types::{AlignmentMap, CaptionChunk, RecognizedWord, TimedChunk, TimingMethod};

/// Read-only inputs shared by every chunk's resolution.
#[derive(Debug, Clone, Copy)]
pub struct TimingContext<'a> {
    pub alignment: &'a AlignmentMap,
    pub recognized: &'a [RecognizedWord],
    /// Caller-supplied audio duration in seconds.
    pub total_duration_s: Option<f64>,
    pub config: &'a CaptionConfig,
}

/// Document-level quantities the fallback tiers need, computed once.
struct FallbackPlan {
    /// `char_offsets[k]` is the narration character count before chunk `k`.
    char_offsets: Vec<usize>,
    total_chars: usize,
    /// Duration for proportional layout: supplied, or the end of the last recognized word.
    proportional_span_s: Option<f64>,
    chunk_count: usize,
    document_end_s: f64,
    force_fallback: bool,
}

/// Assign start/end to each chunk.
///
/// A chunk takes its bounds from the first and last matched recognized words
/// in its token range. Unmatched tokens between them are ignored. When a chunk
/// has no match, or document coverage is below `coverage_threshold`, the
/// fallback tiers run in order: proportional by character count (needs
/// recognized words to anchor the span), then an even split of the supplied
/// duration. Zero-token chunks are parked at the document end with the
/// minimum duration.
pub fn resolve_timings(
    chunks: &[CaptionChunk],
    ctx: &TimingContext<'_>,
) -> Result<Vec<TimedChunk>, CaptionError> {
    let plan = FallbackPlan::new(chunks, ctx);
    if plan.force_fallback {
        tracing::warn!(
            coverage = format!("{:.3}", ctx.alignment.coverage_ratio()),
            threshold = ctx.config.coverage_threshold,
            "timing: coverage below threshold; all chunks use fallback timing"
        );
    }

    chunks
        .iter()
        .enumerate()
        .map(|(idx, chunk)| resolve_chunk(idx, chunk, ctx, &plan))
        .collect()
}

fn resolve_chunk(
    idx: usize,
    chunk: &CaptionChunk,
    ctx: &TimingContext<'_>,
    plan: &FallbackPlan,
) -> Result<TimedChunk, CaptionError> {
    let (start, end, method) = if chunk.token_count == 0 {
        let end = plan.document_end_s.max(ctx.config.min_duration_s);
        (end - ctx.config.min_duration_s, end, TimingMethod::Degenerate)
    } else if let Some(window) = direct_window(chunk, ctx).filter(|_| !plan.force_fallback) {
        (window.0, window.1, TimingMethod::Direct)
    } else if let Some(window) = plan.proportional_window(idx) {
        (window.0, window.1, TimingMethod::Proportional)
    } else if let Some(window) = plan.even_window(idx, ctx.total_duration_s) {
        (window.0, window.1, TimingMethod::EvenSplit)
    } else {
        return Err(CaptionError::NoTimingSource { chunk_index: idx });
    };

    tracing::debug!(
        chunk = idx,
        method = method.as_str(),
        start = format!("{:.3}", start),
        end = format!("{:.3}", end),
        text = chunk.text.as_str(),
        "timing: resolved chunk"
    );
    Ok(TimedChunk {
        text: chunk.text.clone(),
        start,
        end,
        start_token: chunk.start_token,
        token_count: chunk.token_count,
        method,
    })
}

fn direct_window(chunk: &CaptionChunk, ctx: &TimingContext<'_>) -> Option<(f64, f64)> {
    let mut matched = ctx.alignment.matched_in(chunk.token_range());
    let first = matched.next()?;
    let last = matched.last().unwrap_or(first);
    let start = ctx.recognized.get(first)?.start;
    let end = ctx.recognized.get(last)?.end;
    Some((start, end))
}

impl FallbackPlan {
    fn new(chunks: &[CaptionChunk], ctx: &TimingContext<'_>) -> Self {
        let mut char_offsets = Vec::with_capacity(chunks.len() + 1);
        let mut total_chars = 0usize;
        char_offsets.push(0);
        for chunk in chunks {
            total_chars += chunk.char_count();
            char_offsets.push(total_chars);
        }

        let last_recognized_end = ctx
            .recognized
            .iter()
            .map(|w| w.end)
            .fold(None, |acc: Option<f64>, end| Some(acc.map_or(end, |a| a.max(end))));
        let proportional_span_s = if ctx.recognized.is_empty() {
            None
        } else {
            ctx.total_duration_s.or(last_recognized_end)
        };

        Self {
            char_offsets,
            total_chars,
            proportional_span_s,
            chunk_count: chunks.len(),
            document_end_s: ctx.total_duration_s.or(last_recognized_end).unwrap_or(0.0),
            force_fallback: ctx.alignment.coverage_ratio() < ctx.config.coverage_threshold,
        }
    }

    fn proportional_window(&self, idx: usize) -> Option<(f64, f64)> {
        let span = self.proportional_span_s.filter(|s| *s > 0.0)?;
        if self.total_chars == 0 {
            return None;
        }
        let total = self.total_chars as f64;
        let start = self.char_offsets[idx] as f64 / total * span;
        let end = self.char_offsets[idx + 1] as f64 / total * span;
        Some((start, end))
    }

    fn even_window(&self, idx: usize, total_duration_s: Option<f64>) -> Option<(f64, f64)> {
        let duration = total_duration_s.filter(|d| *d > 0.0)?;
        if self.chunk_count == 0 {
            return None;
        }
        let slot = duration / self.chunk_count as f64;
        Some((idx as f64 * slot, (idx + 1) as f64 * slot))
    }
}
