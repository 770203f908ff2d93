use crate::config::CaptionConfig;

/// Slack for comparing an integer distance against a fractional budget.
const FUZZY_EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScoringParams {
    pub match_score: i32,
    pub mismatch_penalty: i32,
    pub gap_penalty: i32,
    pub fuzzy_threshold: f64,
}

impl From<&CaptionConfig> for ScoringParams {
    fn from(config: &CaptionConfig) -> Self {
        Self {
            match_score: config.match_score,
            mismatch_penalty: config.mismatch_penalty,
            gap_penalty: config.gap_penalty,
            fuzzy_threshold: config.fuzzy_threshold,
        }
    }
}

/// Score for aligning narration token `a` with recognized word `b`.
///
/// Exact equality earns the full match score. A near miss (edit distance at
/// most `fuzzy_threshold` of the longer token) earns the match score minus the
/// distance. Anything else, including any empty token, is a mismatch.
pub(crate) fn pair_score(a: &[char], b: &[char], params: &ScoringParams) -> i32 {
    if a.is_empty() || b.is_empty() {
        return params.mismatch_penalty;
    }
    if a == b {
        return params.match_score;
    }
    let max_len = a.len().max(b.len());
    let budget = params.fuzzy_threshold * max_len as f64 + FUZZY_EPS;
    // Distance is at least the length difference; skip the quadratic pass when that already fails.
    if (a.len().abs_diff(b.len()) as f64) > budget {
        return params.mismatch_penalty;
    }
    let dist = edit_distance(a, b);
    if dist as f64 <= budget {
        params
            .match_score
            .saturating_sub(i32::try_from(dist).unwrap_or(i32::MAX))
    } else {
        params.mismatch_penalty
    }
}

/// Levenshtein distance over chars, two rolling rows.
pub(crate) fn edit_distance(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];
    for (i, &lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let substitution = prev[j] + usize::from(lc != sc);
            let insertion = prev[j + 1] + 1;
            let deletion = curr[j] + 1;
            curr[j + 1] = substitution.min(insertion).min(deletion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[short.len()]
}
