use crate::config::InternalPunctuation;
use crate::error::CaptionError;
use crate::types::{AsrWord, NarrationToken, RecognizedWord};

/// Canonical comparison form of one word.
///
/// Lowercases (Unicode-aware) and trims non-alphanumeric characters from both
/// edges. Characters inside the word are kept or dropped according to `policy`.
pub fn normalize_word(word: &str, policy: InternalPunctuation) -> String {
    let trimmed = word.trim_matches(|c: char| !c.is_alphanumeric());
    match policy {
        InternalPunctuation::Keep => trimmed.to_lowercase(),
        InternalPunctuation::Strip => trimmed
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect(),
    }
}

/// Whitespace-split narration tokens, normalized with `normalize`.
pub fn tokenize_narration(
    narration: &str,
    normalize: impl Fn(&str) -> String,
) -> Vec<NarrationToken> {
    narration
        .split_whitespace()
        .enumerate()
        .map(|(index, raw)| NarrationToken {
            raw: raw.to_string(),
            normalized: normalize(raw),
            index,
        })
        .collect()
}

/// Validate and normalize recognizer output.
///
/// Every word needs finite, non-negative times with `end > start`, and starts
/// must never move backwards. The first offending index is reported.
pub fn build_recognized_words(
    words: &[AsrWord],
    normalize: impl Fn(&str) -> String,
) -> Result<Vec<RecognizedWord>, CaptionError> {
    let mut out = Vec::with_capacity(words.len());
    let mut prev_start = f64::NEG_INFINITY;
    for (index, w) in words.iter().enumerate() {
        if !w.start.is_finite() || !w.end.is_finite() {
            return Err(CaptionError::invalid_word(
                index,
                format!("non-finite timestamp ({}..{})", w.start, w.end),
            ));
        }
        if w.start < 0.0 {
            return Err(CaptionError::invalid_word(
                index,
                format!("negative start time {}", w.start),
            ));
        }
        if w.end <= w.start {
            return Err(CaptionError::invalid_word(
                index,
                format!("end {} is not after start {}", w.end, w.start),
            ));
        }
        if w.start < prev_start {
            return Err(CaptionError::invalid_word(
                index,
                format!("start {} precedes previous start {}", w.start, prev_start),
            ));
        }
        prev_start = w.start;
        out.push(RecognizedWord {
            raw: w.word.clone(),
            normalized: normalize(&w.word),
            start: w.start,
            end: w.end,
            index,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(word: &str) -> String {
        normalize_word(word, InternalPunctuation::Strip)
    }

    #[test]
    fn normalize_lowercases_and_trims_edges() {
        assert_eq!(strip("Hello,"), "hello");
        assert_eq!(strip("\"Quick!\""), "quick");
        assert_eq!(strip("  fox "), "fox");
        assert_eq!(strip("ÉCOLE."), "école");
    }

    #[test]
    fn internal_policy_controls_contractions() {
        assert_eq!(normalize_word("Don't", InternalPunctuation::Strip), "dont");
        assert_eq!(normalize_word("Don’t", InternalPunctuation::Strip), "dont");
        assert_eq!(normalize_word("Don't.", InternalPunctuation::Keep), "don't");
        assert_eq!(
            normalize_word("(state-of-the-art)", InternalPunctuation::Keep),
            "state-of-the-art"
        );
    }

    #[test]
    fn pure_punctuation_normalizes_to_empty() {
        assert_eq!(strip("—"), "");
        assert_eq!(normalize_word("...", InternalPunctuation::Keep), "");
    }

    #[test]
    fn tokenize_narration_indexes_whitespace_words() {
        let tokens = tokenize_narration("  The quick,\n brown  fox. ", strip);
        let raws: Vec<_> = tokens.iter().map(|t| t.raw.as_str()).collect();
        assert_eq!(raws, ["The", "quick,", "brown", "fox."]);
        let norms: Vec<_> = tokens.iter().map(|t| t.normalized.as_str()).collect();
        assert_eq!(norms, ["the", "quick", "brown", "fox"]);
        assert!(tokens.iter().enumerate().all(|(i, t)| t.index == i));
    }

    #[test]
    fn recognized_words_are_normalized_and_indexed() {
        let words = vec![AsrWord::new(" Hello", 0.0, 0.5), AsrWord::new("there.", 0.5, 0.9)];
        let out = build_recognized_words(&words, strip).expect("valid words");
        assert_eq!(out[0].normalized, "hello");
        assert_eq!(out[1].normalized, "there");
        assert_eq!(out[1].index, 1);
    }

    #[test]
    fn malformed_timestamps_report_offending_index() {
        let cases = [
            vec![AsrWord::new("a", 0.0, 0.2), AsrWord::new("b", f64::NAN, 0.5)],
            vec![AsrWord::new("a", 0.0, 0.2), AsrWord::new("b", -0.1, 0.5)],
            vec![AsrWord::new("a", 0.0, 0.2), AsrWord::new("b", 0.5, 0.5)],
            vec![AsrWord::new("a", 1.0, 1.2), AsrWord::new("b", 0.5, 0.9)],
        ];
        for words in cases {
            match build_recognized_words(&words, strip) {
                Err(CaptionError::InvalidWord { index, .. }) => assert_eq!(index, 1),
                other => panic!("expected InvalidWord, got {other:?}"),
            }
        }
    }

    #[test]
    fn equal_starts_are_accepted() {
        let words = vec![AsrWord::new("a", 0.5, 0.6), AsrWord::new("b", 0.5, 0.7)];
        assert!(build_recognized_words(&words, strip).is_ok());
    }
}
