use crate::types::TimedChunk;

/// `HH:MM:SS,mmm`, rounded to the nearest millisecond. Negative input clamps to zero.
pub fn format_srt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let secs = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}

/// SubRip document: 1-based cue numbers, cues separated by a blank line.
pub fn to_srt(captions: &[TimedChunk]) -> String {
    captions
        .iter()
        .enumerate()
        .map(|(idx, caption)| {
            format!(
                "{}\n{} --> {}\n{}\n",
                idx + 1,
                format_srt_timestamp(caption.start),
                format_srt_timestamp(caption.end),
                caption.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimingMethod;

    #[test]
    fn timestamp_formatting() {
        assert_eq!(format_srt_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_srt_timestamp(1.4), "00:00:01,400");
        assert_eq!(format_srt_timestamp(0.3), "00:00:00,300");
        assert_eq!(format_srt_timestamp(61.0625), "00:01:01,063");
        assert_eq!(format_srt_timestamp(3725.5), "01:02:05,500");
        assert_eq!(format_srt_timestamp(-2.0), "00:00:00,000");
    }

    #[test]
    fn srt_document_layout() {
        let captions = vec![
            TimedChunk {
                text: "The quick brown fox.".to_string(),
                start: 0.0,
                end: 1.4,
                start_token: 0,
                token_count: 4,
                method: TimingMethod::Direct,
            },
            TimedChunk {
                text: "Jumps!".to_string(),
                start: 1.45,
                end: 2.0,
                start_token: 4,
                token_count: 1,
                method: TimingMethod::Direct,
            },
        ];
        let expected = "1\n00:00:00,000 --> 00:00:01,400\nThe quick brown fox.\n\n\
                        2\n00:00:01,450 --> 00:00:02,000\nJumps!\n";
        assert_eq!(to_srt(&captions), expected);
    }

    #[test]
    fn empty_caption_list_is_empty_document() {
        assert_eq!(to_srt(&[]), "");
    }
}
