use crate::types::CaptionChunk;

const SENTENCE_TERMINATORS: [char; 6] = ['.', '!', '?', '。', '！', '？'];
const TRAILING_CLOSERS: [char; 8] = ['"', '\'', ')', ']', '}', '”', '’', '»'];

/// Split narration into display-sized caption chunks.
///
/// Sentences end at a word whose last non-closing character is a terminator
/// (abbreviations are not special-cased). A sentence longer than `max_chars`
/// is packed greedily word by word, so breaks always fall on whitespace; a
/// single word longer than `max_chars` becomes its own chunk. Chunks partition
/// the whitespace tokens in order, and joining their texts with single spaces
/// gives back the narration with whitespace collapsed.
pub fn segment_narration(narration: &str, max_chars: usize) -> Vec<CaptionChunk> {
    let words: Vec<&str> = narration.split_whitespace().collect();
    let mut chunks = Vec::new();
    let mut sentence_start = 0usize;
    for (idx, word) in words.iter().enumerate() {
        let is_last = idx + 1 == words.len();
        if ends_sentence(word) || is_last {
            pack_sentence(&words[sentence_start..=idx], sentence_start, max_chars, &mut chunks);
            sentence_start = idx + 1;
        }
    }
    chunks
}

fn ends_sentence(word: &str) -> bool {
    word.trim_end_matches(&TRAILING_CLOSERS[..])
        .ends_with(&SENTENCE_TERMINATORS[..])
}

fn pack_sentence(
    sentence: &[&str],
    first_token: usize,
    max_chars: usize,
    out: &mut Vec<CaptionChunk>,
) {
    let mut chunk_start = 0usize;
    let mut chunk_len = 0usize;
    for (offset, word) in sentence.iter().enumerate() {
        let word_len = word.chars().count();
        let candidate = if offset == chunk_start {
            word_len
        } else {
            chunk_len + 1 + word_len
        };
        if candidate > max_chars && offset > chunk_start {
            out.push(make_chunk(sentence, chunk_start, offset, first_token));
            chunk_start = offset;
            chunk_len = word_len;
        } else {
            chunk_len = candidate;
        }
    }
    if chunk_start < sentence.len() {
        out.push(make_chunk(sentence, chunk_start, sentence.len(), first_token));
    }
}

fn make_chunk(sentence: &[&str], from: usize, to: usize, first_token: usize) -> CaptionChunk {
    CaptionChunk {
        start_token: first_token + from,
        token_count: to - from,
        text: sentence[from..to].join(" "),
    }
}
