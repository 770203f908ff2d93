use serde::Deserialize;

use crate::error::CaptionError;

/// How characters inside a word (not at its edges) are treated by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InternalPunctuation {
    /// Drop every non-alphanumeric character, so "don't" and "don’t" both become "dont".
    #[default]
    Strip,
    /// Trim leading/trailing punctuation only; "don't" stays "don't".
    Keep,
}

/// Resolution of an overlap that cannot be clamped without violating the minimum duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapStrategy {
    /// Only end times shrink; a residual overlap is accepted when the floor wins.
    #[default]
    ClampEnd,
    /// Push the next chunk's start forward instead, cascading through later chunks.
    PushStart,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaptionConfig {
    #[serde(default = "default_max_chars")]
    pub max_chars_per_chunk: usize,
    #[serde(default = "default_min_duration")]
    pub min_duration_s: f64,
    #[serde(default = "default_gap")]
    pub gap_s: f64,
    #[serde(default = "default_match_score")]
    pub match_score: i32,
    #[serde(default = "default_mismatch_penalty")]
    pub mismatch_penalty: i32,
    #[serde(default = "default_gap_penalty")]
    pub gap_penalty: i32,
    /// Fuzzy credit is given when edit distance ≤ this fraction of the longer token.
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    /// Coverage below this ratio sends every chunk through the fallback tiers.
    #[serde(default = "default_coverage_threshold")]
    pub coverage_threshold: f64,
    #[serde(default)]
    pub internal_punctuation: InternalPunctuation,
    #[serde(default)]
    pub overlap_strategy: OverlapStrategy,
}

impl CaptionConfig {
    pub const DEFAULT_MAX_CHARS: usize = 60;
    pub const DEFAULT_MIN_DURATION_S: f64 = 0.1;
    pub const DEFAULT_GAP_S: f64 = 0.05;
    pub const DEFAULT_MATCH_SCORE: i32 = 10;
    pub const DEFAULT_MISMATCH_PENALTY: i32 = -5;
    pub const DEFAULT_GAP_PENALTY: i32 = -3;
    pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.30;
    /// Largest absolute value accepted for any of the three alignment scores.
    pub const MAX_SCORE_MAGNITUDE: i32 = 1000;
    pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 0.5;

    pub fn from_json_str(data: &str) -> Result<Self, CaptionError> {
        let config: Self =
            serde_json::from_str(data).map_err(|e| CaptionError::json("parse caption config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CaptionError> {
        if self.max_chars_per_chunk == 0 {
            return Err(CaptionError::invalid_config(
                "max_chars_per_chunk must be at least 1",
            ));
        }
        if !self.min_duration_s.is_finite() || self.min_duration_s < 0.0 {
            return Err(CaptionError::invalid_config(format!(
                "min_duration_s must be a non-negative number, got {}",
                self.min_duration_s
            )));
        }
        if !self.gap_s.is_finite() || self.gap_s < 0.0 {
            return Err(CaptionError::invalid_config(format!(
                "gap_s must be a non-negative number, got {}",
                self.gap_s
            )));
        }
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(CaptionError::invalid_config(format!(
                "fuzzy_threshold must be within [0, 1], got {}",
                self.fuzzy_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.coverage_threshold) {
            return Err(CaptionError::invalid_config(format!(
                "coverage_threshold must be within [0, 1], got {}",
                self.coverage_threshold
            )));
        }
        for (name, value) in [
            ("match_score", self.match_score),
            ("mismatch_penalty", self.mismatch_penalty),
            ("gap_penalty", self.gap_penalty),
        ] {
            if !(-Self::MAX_SCORE_MAGNITUDE..=Self::MAX_SCORE_MAGNITUDE).contains(&value) {
                return Err(CaptionError::invalid_config(format!(
                    "{name} must be within ±{}, got {value}",
                    Self::MAX_SCORE_MAGNITUDE
                )));
            }
        }
        if self.gap_penalty > 0 {
            return Err(CaptionError::invalid_config(format!(
                "gap_penalty must not be positive, got {}",
                self.gap_penalty
            )));
        }
        if self.match_score <= self.mismatch_penalty {
            return Err(CaptionError::invalid_config(format!(
                "match_score ({}) must exceed mismatch_penalty ({})",
                self.match_score, self.mismatch_penalty
            )));
        }
        Ok(())
    }
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            max_chars_per_chunk: Self::DEFAULT_MAX_CHARS,
            min_duration_s: Self::DEFAULT_MIN_DURATION_S,
            gap_s: Self::DEFAULT_GAP_S,
            match_score: Self::DEFAULT_MATCH_SCORE,
            mismatch_penalty: Self::DEFAULT_MISMATCH_PENALTY,
            gap_penalty: Self::DEFAULT_GAP_PENALTY,
            fuzzy_threshold: Self::DEFAULT_FUZZY_THRESHOLD,
            coverage_threshold: Self::DEFAULT_COVERAGE_THRESHOLD,
            internal_punctuation: InternalPunctuation::default(),
            overlap_strategy: OverlapStrategy::default(),
        }
    }
}

fn default_max_chars() -> usize {
    CaptionConfig::DEFAULT_MAX_CHARS
}
fn default_min_duration() -> f64 {
    CaptionConfig::DEFAULT_MIN_DURATION_S
}
fn default_gap() -> f64 {
    CaptionConfig::DEFAULT_GAP_S
}
fn default_match_score() -> i32 {
    CaptionConfig::DEFAULT_MATCH_SCORE
}
fn default_mismatch_penalty() -> i32 {
    CaptionConfig::DEFAULT_MISMATCH_PENALTY
}
fn default_gap_penalty() -> i32 {
    CaptionConfig::DEFAULT_GAP_PENALTY
}
fn default_fuzzy_threshold() -> f64 {
    CaptionConfig::DEFAULT_FUZZY_THRESHOLD
}
fn default_coverage_threshold() -> f64 {
    CaptionConfig::DEFAULT_COVERAGE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_config_default() {
        let config = CaptionConfig::default();
        assert_eq!(config.max_chars_per_chunk, 60);
        assert!((config.min_duration_s - 0.1).abs() < 1e-12);
        assert!((config.gap_s - 0.05).abs() < 1e-12);
        assert_eq!(config.match_score, 10);
        assert_eq!(config.mismatch_penalty, -5);
        assert_eq!(config.gap_penalty, -3);
        assert!((config.fuzzy_threshold - 0.30).abs() < 1e-12);
        assert!((config.coverage_threshold - 0.5).abs() < 1e-12);
        assert_eq!(config.internal_punctuation, InternalPunctuation::Strip);
        assert_eq!(config.overlap_strategy, OverlapStrategy::ClampEnd);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{
            "max_chars_per_chunk": 42,
            "gap_penalty": -2,
            "internal_punctuation": "keep",
            "overlap_strategy": "push_start"
        }"#;
        let config = CaptionConfig::from_json_str(json).expect("valid config json");
        assert_eq!(config.max_chars_per_chunk, 42);
        assert_eq!(config.gap_penalty, -2);
        assert_eq!(config.match_score, CaptionConfig::DEFAULT_MATCH_SCORE);
        assert_eq!(config.internal_punctuation, InternalPunctuation::Keep);
        assert_eq!(config.overlap_strategy, OverlapStrategy::PushStart);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = CaptionConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CaptionError::Json { .. }));
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let zero_chars = CaptionConfig {
            max_chars_per_chunk: 0,
            ..CaptionConfig::default()
        };
        assert!(zero_chars.validate().is_err());

        let negative_gap = CaptionConfig {
            gap_s: -0.01,
            ..CaptionConfig::default()
        };
        assert!(negative_gap.validate().is_err());

        let coverage = CaptionConfig {
            coverage_threshold: 1.5,
            ..CaptionConfig::default()
        };
        assert!(coverage.validate().is_err());

        let fuzzy = CaptionConfig {
            fuzzy_threshold: f64::NAN,
            ..CaptionConfig::default()
        };
        assert!(fuzzy.validate().is_err());

        let scores = CaptionConfig {
            match_score: -5,
            ..CaptionConfig::default()
        };
        assert!(matches!(
            scores.validate(),
            Err(CaptionError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn validate_bounds_alignment_scores() {
        let huge_match = CaptionConfig {
            match_score: i32::MAX,
            ..CaptionConfig::default()
        };
        assert!(matches!(
            huge_match.validate(),
            Err(CaptionError::InvalidConfig { .. })
        ));

        let huge_mismatch = CaptionConfig {
            mismatch_penalty: i32::MIN,
            ..CaptionConfig::default()
        };
        assert!(huge_mismatch.validate().is_err());

        let positive_gap = CaptionConfig {
            gap_penalty: 1,
            ..CaptionConfig::default()
        };
        assert!(positive_gap.validate().is_err());

        let at_limit = CaptionConfig {
            match_score: CaptionConfig::MAX_SCORE_MAGNITUDE,
            mismatch_penalty: -CaptionConfig::MAX_SCORE_MAGNITUDE,
            gap_penalty: -CaptionConfig::MAX_SCORE_MAGNITUDE,
            ..CaptionConfig::default()
        };
        assert!(at_limit.validate().is_ok());
    }
}
