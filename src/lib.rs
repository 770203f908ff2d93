pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use alignment::global::align_global;
pub use alignment::overlap::{normalize_overlaps, OverlapStats};
pub use alignment::report::{compute_caption_report, CaptionReport};
pub use alignment::segmentation::segment_narration;
pub use alignment::srt::{format_srt_timestamp, to_srt};
pub use alignment::timing::{resolve_timings, TimingContext};
pub use alignment::tokenization::{build_recognized_words, normalize_word, tokenize_narration};
pub use config::{CaptionConfig, InternalPunctuation, OverlapStrategy};
pub use error::CaptionError;
pub use pipeline::builder::CaptionAlignerBuilder;
pub use pipeline::runtime::CaptionAligner;
pub use pipeline::traits::{ChunkSegmenter, Normalizer, SequenceAligner};
pub use types::{
    AlignmentMap, AsrWord, CaptionChunk, CaptionInput, CaptionOutput, NarrationToken,
    RecognizedWord, TimedChunk, TimingMethod,
};
