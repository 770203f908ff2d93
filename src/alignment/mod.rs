pub mod global;
pub mod overlap;
pub mod report;
pub mod segmentation;
pub mod srt;
pub mod timing;
pub mod tokenization;
