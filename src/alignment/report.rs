use serde::Serialize;

use crate::alignment::overlap::OverlapStats;
use crate::config::CaptionConfig;
use crate::error::CaptionError;
use crate::types::{CaptionOutput, TimedChunk, TimingMethod};

pub const REPORT_SCHEMA_VERSION: u32 = 1;
const EPS_DURATION_SEC: f64 = 1e-9;

#[derive(Debug, Clone, Serialize)]
pub struct CaptionReport {
    pub schema_version: u32,
    pub coverage_ratio: f64,
    pub coverage_threshold: f64,
    pub low_coverage: bool,
    pub narration_token_count: u32,
    pub matched_token_count: u32,
    pub chunk_count: u32,
    pub methods: MethodCounts,
    pub structural: StructuralMetrics,
    pub overlap: OverlapStats,
    /// Set when any caption was estimated rather than directly matched, or overlaps remain.
    pub needs_review: bool,
    pub notes: Vec<String>,
    pub chunks: Vec<ChunkReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MethodCounts {
    pub direct: u32,
    pub proportional: u32,
    pub even_split: u32,
    pub degenerate: u32,
}

impl MethodCounts {
    fn record(&mut self, method: TimingMethod) {
        match method {
            TimingMethod::Direct => self.direct += 1,
            TimingMethod::Proportional => self.proportional += 1,
            TimingMethod::EvenSplit => self.even_split += 1,
            TimingMethod::Degenerate => self.degenerate += 1,
        }
    }

    pub fn estimated(&self) -> u32 {
        self.proportional + self.even_split + self.degenerate
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StructuralMetrics {
    pub overlap_count: u32,
    pub short_duration_count: u32,
    pub non_monotonic_start_count: u32,
    /// Fraction of the first-start..last-end span not covered by any caption.
    pub gap_ratio: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkReport {
    pub index: u32,
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub method: TimingMethod,
    pub token_count: u32,
    pub matched_token_count: u32,
}

impl CaptionReport {
    pub fn to_json_pretty(&self) -> Result<String, CaptionError> {
        serde_json::to_string_pretty(self).map_err(|e| CaptionError::json("serialize caption report", e))
    }
}

pub fn compute_caption_report(output: &CaptionOutput, config: &CaptionConfig) -> CaptionReport {
    let mut methods = MethodCounts::default();
    let chunks: Vec<ChunkReport> = output
        .captions
        .iter()
        .enumerate()
        .map(|(idx, caption)| {
            methods.record(caption.method);
            let range = caption.start_token..caption.start_token + caption.token_count;
            ChunkReport {
                index: to_u32(idx),
                text: caption.text.clone(),
                start: caption.start,
                end: caption.end,
                duration: caption.duration(),
                method: caption.method,
                token_count: to_u32(caption.token_count),
                matched_token_count: to_u32(output.alignment.matched_in(range).count()),
            }
        })
        .collect();

    let structural = compute_structural_metrics(&output.captions, config.min_duration_s);

    let mut notes = Vec::new();
    if output.low_coverage {
        notes.push(format!(
            "low_coverage:ratio={:.3} threshold={:.3}",
            output.coverage_ratio, config.coverage_threshold
        ));
    }
    if methods.estimated() > 0 {
        notes.push(format!("estimated_chunks={}", methods.estimated()));
    }
    if output.overlap.residual_overlaps > 0 {
        notes.push(format!("residual_overlaps={}", output.overlap.residual_overlaps));
    }
    if structural.non_monotonic_start_count > 0 {
        notes.push(format!(
            "non_monotonic_starts={}",
            structural.non_monotonic_start_count
        ));
    }

    let needs_review = output.low_coverage
        || methods.estimated() > 0
        || structural.overlap_count > 0
        || structural.non_monotonic_start_count > 0;

    CaptionReport {
        schema_version: REPORT_SCHEMA_VERSION,
        coverage_ratio: output.coverage_ratio,
        coverage_threshold: config.coverage_threshold,
        low_coverage: output.low_coverage,
        narration_token_count: to_u32(output.alignment.len()),
        matched_token_count: to_u32(output.alignment.matched_count()),
        chunk_count: to_u32(output.captions.len()),
        methods,
        structural,
        overlap: output.overlap,
        needs_review,
        notes,
        chunks,
    }
}

fn compute_structural_metrics(captions: &[TimedChunk], min_duration_s: f64) -> StructuralMetrics {
    let mut overlap_count = 0u32;
    let mut non_monotonic_start_count = 0u32;
    let mut uncovered_s = 0.0f64;
    for pair in captions.windows(2) {
        let (cur, next) = (&pair[0], &pair[1]);
        if cur.end > next.start + EPS_DURATION_SEC {
            overlap_count += 1;
        }
        if next.start + EPS_DURATION_SEC < cur.start {
            non_monotonic_start_count += 1;
        }
        uncovered_s += (next.start - cur.end).max(0.0);
    }
    let short_duration_count = captions
        .iter()
        .filter(|c| c.duration() + EPS_DURATION_SEC < min_duration_s)
        .count();

    let span = match (captions.first(), captions.last()) {
        (Some(first), Some(last)) => (last.end - first.start).max(0.0),
        _ => 0.0,
    };
    let gap_ratio = if span > 0.0 {
        (uncovered_s / span).clamp(0.0, 1.0) as f32
    } else {
        0.0
    };

    StructuralMetrics {
        overlap_count,
        short_duration_count: to_u32(short_duration_count),
        non_monotonic_start_count,
        gap_ratio,
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
