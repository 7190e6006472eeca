use serde::{Deserialize, Serialize};

/// One unit of transcript (a word or a caption line) anchored to a time
/// range in the source recording. Always fully populated: construction goes
/// through [`TimedText::from_parts`], so downstream code never sees missing
/// or inverted timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedText {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl TimedText {
    /// Coerce possibly-absent fields into a well-formed record: absent start
    /// becomes 0, absent end becomes the (coerced) start, absent text becomes
    /// the empty string. Negative starts clamp to 0 and an end before the
    /// start clamps to a zero-width range.
    pub fn from_parts(start: Option<f64>, end: Option<f64>, text: Option<&str>) -> Self {
        let start = start.unwrap_or(0.0).max(0.0);
        let end = end.unwrap_or(start).max(start);
        let text = text.unwrap_or("").trim().to_string();
        Self { start, end, text }
    }
}

/// One output clip: its time range and the transcript text whose timing
/// overlaps that range. Produced by the materializer, consumed by file
/// export and the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentDescriptor {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub text: String,
}

/// Last cue end, or 0 for an empty transcript.
pub fn transcript_duration(timed: &[TimedText]) -> f64 {
    timed.last().map(|t| t.end).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_defaults() {
        let t = TimedText::from_parts(None, None, None);
        assert_eq!(t.start, 0.0);
        assert_eq!(t.end, 0.0);
        assert_eq!(t.text, "");
    }

    #[test]
    fn missing_end_collapses_to_start() {
        let t = TimedText::from_parts(Some(4.2), None, Some("hi"));
        assert_eq!(t.start, 4.2);
        assert_eq!(t.end, 4.2);
    }

    #[test]
    fn inverted_range_clamps() {
        let t = TimedText::from_parts(Some(5.0), Some(3.0), Some("x"));
        assert_eq!(t.end, 5.0);
        let t = TimedText::from_parts(Some(-1.0), None, Some("x"));
        assert_eq!(t.start, 0.0);
    }

    #[test]
    fn text_is_trimmed() {
        let t = TimedText::from_parts(Some(0.0), Some(1.0), Some("  hello "));
        assert_eq!(t.text, "hello");
    }

    #[test]
    fn duration_of_empty_transcript_is_zero() {
        assert_eq!(transcript_duration(&[]), 0.0);
    }
}
