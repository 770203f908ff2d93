use serde::Serialize;

use crate::config::{CaptionConfig, OverlapStrategy};
use crate::types::TimedChunk;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OverlapStats {
    /// Chunks whose end was raised to `start + min_duration_s`.
    pub lifted: u32,
    /// Chunks whose end was pulled back because it ran past the next start.
    pub clamped: u32,
    /// Clamps that hit the minimum-duration floor and still overlap the next chunk.
    pub residual_overlaps: u32,
    /// Next-chunk starts moved forward (`PushStart` only).
    pub pushed: u32,
}

/// Single forward pass enforcing minimum duration and non-overlap.
///
/// Must run sequentially over chunks in output order: each decision reads the
/// already-final end of the previous chunk. Each chunk is first lifted to at
/// least `min_duration_s`; then, if it runs past the next chunk's start, its
/// end becomes `max(start + min_duration_s, next.start - gap_s)`.
///
/// With [`OverlapStrategy::ClampEnd`] starts are never touched and the floor
/// can leave a residual overlap. With [`OverlapStrategy::PushStart`] the next
/// chunk's start is pushed to `end + gap_s` instead, and that correction
/// cascades through the rest of the pass. Running the pass twice changes
/// nothing the second time.
pub fn normalize_overlaps(chunks: &mut [TimedChunk], config: &CaptionConfig) -> OverlapStats {
    let mut stats = OverlapStats::default();
    let min = config.min_duration_s;
    let gap = config.gap_s;

    for i in 0..chunks.len() {
        let floor = chunks[i].start + min;
        if chunks[i].end < floor {
            chunks[i].end = floor;
            stats.lifted += 1;
        }

        let Some(next_start) = chunks.get(i + 1).map(|next| next.start) else {
            continue;
        };
        if chunks[i].end <= next_start {
            continue;
        }

        chunks[i].end = floor.max(next_start - gap);
        stats.clamped += 1;
        if chunks[i].end <= next_start {
            continue;
        }

        match config.overlap_strategy {
            OverlapStrategy::ClampEnd => {
                stats.residual_overlaps += 1;
                tracing::warn!(
                    chunk = i,
                    end = format!("{:.3}", chunks[i].end),
                    next_start = format!("{:.3}", next_start),
                    "overlap: minimum duration leaves a residual overlap"
                );
            }
            OverlapStrategy::PushStart => {
                chunks[i + 1].start = chunks[i].end + gap;
                stats.pushed += 1;
                tracing::debug!(
                    chunk = i + 1,
                    from = format!("{:.3}", next_start),
                    to = format!("{:.3}", chunks[i + 1].start),
                    "overlap: pushed next chunk start"
                );
            }
        }
    }

    stats
}
