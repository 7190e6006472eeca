use regex::Regex;
use std::sync::OnceLock;

use crate::{model::TimedText, transcript::time::hms_to_secs};

fn block_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").unwrap())
}

fn timestamp_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3})\s*-->\s*(\d{2}):(\d{2}):(\d{2}),(\d{3})")
            .unwrap()
    })
}

/// Parse SRT-formatted caption text into timed cues.
///
/// Blocks are separated by blank lines; a well-formed block has an index
/// line, a `HH:MM:SS,mmm --> HH:MM:SS,mmm` timestamp line, and one or more
/// text lines. Malformed blocks contribute nothing to the output and are
/// never an error: transcription providers routinely emit a few garbled
/// blocks in otherwise usable captions.
pub fn parse_srt(input: &str) -> Vec<TimedText> {
    let mut cues = Vec::new();

    for block in block_separator().split(input.trim()) {
        let lines: Vec<&str> = block.trim().lines().map(str::trim_end).collect();
        if lines.len() < 3 {
            continue;
        }

        let Some(caps) = timestamp_line().captures(lines[1]) else {
            tracing::debug!(line = lines[1], "skipping block with bad timestamp line");
            continue;
        };

        // Capture groups are digit-only, so these parses cannot fail.
        let n = |i: usize| caps[i].parse::<u32>().unwrap_or(0);
        let start = hms_to_secs(n(1), n(2), n(3), n(4));
        let end = hms_to_secs(n(5), n(6), n(7), n(8));

        let text = lines[2..].join(" ").trim().to_string();

        cues.push(TimedText::from_parts(Some(start), Some(end), Some(&text)));
    }

    cues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block() {
        let cues = parse_srt("1\n00:00:00,000 --> 00:00:02,500\nHello world.\n");
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start, 0.0);
        assert_eq!(cues[0].end, 2.5);
        assert_eq!(cues[0].text, "Hello world.");
    }

    #[test]
    fn multi_line_text_joined() {
        let cues = parse_srt("1\n00:00:01,000 --> 00:00:03,000\nfirst line\nsecond line\n");
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "first line second line");
    }

    #[test]
    fn malformed_timestamp_block_skipped() {
        let input = "1\n00:00:00,000 --> 00:00:01,000\ngood\n\n\
                     2\nnot a timestamp\nbad\n\n\
                     3\n00:00:02,000 --> 00:00:03,000\nalso good\n";
        let cues = parse_srt(input);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "good");
        assert_eq!(cues[1].text, "also good");
    }

    #[test]
    fn short_block_skipped() {
        let cues = parse_srt("1\n00:00:00,000 --> 00:00:01,000\n");
        assert!(cues.is_empty());
    }

    #[test]
    fn empty_input() {
        assert!(parse_srt("").is_empty());
        assert!(parse_srt("\n\n\n").is_empty());
    }

    #[test]
    fn crlf_input() {
        let cues = parse_srt("1\r\n00:00:00,000 --> 00:00:02,000\r\nwindows line\r\n");
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "windows line");
    }

    #[test]
    fn hour_component() {
        let cues = parse_srt("1\n01:02:03,400 --> 01:02:04,500\nlate cue\n");
        assert_eq!(cues[0].start, 3723.4);
        assert_eq!(cues[0].end, 3724.5);
    }
}
