use super::scoring::{pair_score, ScoringParams};

/// Predecessor that produced a cell's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Origin,
    /// Narration token paired with a recognized word.
    Diagonal,
    /// Narration token skipped.
    Up,
    /// Recognized word skipped.
    Left,
}

/// (N+1)×(M+1) Needleman-Wunsch table in row-major flat storage.
///
/// Row `i` is narration prefix length, column `j` recognized prefix length.
pub(crate) struct ScoreTable {
    rows: usize,
    cols: usize,
    scores: Vec<i32>,
    steps: Vec<Step>,
}

impl ScoreTable {
    pub(crate) fn fill(
        narration: &[Vec<char>],
        recognized: &[Vec<char>],
        params: &ScoringParams,
    ) -> Self {
        let rows = narration.len() + 1;
        let cols = recognized.len() + 1;
        let mut scores = vec![0i32; rows * cols];
        let mut steps = vec![Step::Origin; rows * cols];

        for i in 1..rows {
            scores[i * cols] = scores[(i - 1) * cols].saturating_add(params.gap_penalty);
            steps[i * cols] = Step::Up;
        }
        for j in 1..cols {
            scores[j] = scores[j - 1].saturating_add(params.gap_penalty);
            steps[j] = Step::Left;
        }

        for i in 1..rows {
            let token = &narration[i - 1];
            let row = i * cols;
            let prev_row = (i - 1) * cols;
            for j in 1..cols {
                let diagonal =
                    scores[prev_row + j - 1].saturating_add(pair_score(token, &recognized[j - 1], params));
                let up = scores[prev_row + j].saturating_add(params.gap_penalty);
                let left = scores[row + j - 1].saturating_add(params.gap_penalty);
                let (best, step) = best_transition(diagonal, up, left);
                scores[row + j] = best;
                steps[row + j] = step;
            }
        }

        Self {
            rows,
            cols,
            scores,
            steps,
        }
    }

    #[cfg(test)]
    pub(crate) fn score(&self, i: usize, j: usize) -> i32 {
        self.scores[i * self.cols + j]
    }

    pub(crate) fn step(&self, i: usize, j: usize) -> Step {
        self.steps[i * self.cols + j]
    }

    /// Walk from (N, M) back to (0, 0) and emit one entry per narration token.
    pub(crate) fn backtrace(&self) -> Vec<Option<usize>> {
        let mut entries = vec![None; self.rows - 1];
        let mut i = self.rows - 1;
        let mut j = self.cols - 1;
        while i > 0 || j > 0 {
            match self.step(i, j) {
                Step::Diagonal => {
                    entries[i - 1] = Some(j - 1);
                    i -= 1;
                    j -= 1;
                }
                Step::Up => i -= 1,
                Step::Left => j -= 1,
                Step::Origin => break,
            }
        }
        entries
    }
}

/// Highest-scoring predecessor; ties resolve diagonal, then up, then left.
#[inline(always)]
fn best_transition(diagonal: i32, up: i32, left: i32) -> (i32, Step) {
    let mut best = diagonal;
    let mut step = Step::Diagonal;
    if up > best {
        best = up;
        step = Step::Up;
    }
    if left > best {
        best = left;
        step = Step::Left;
    }
    (best, step)
}
