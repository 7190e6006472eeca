use anyhow::{bail, Result};

use crate::model::{transcript_duration, TimedText};

/// Minimum number of words that must precede a punctuation mark before it is
/// eligible as a split point, so very short fragments like "Yes." never
/// justify a cut on their own.
const MIN_WORDS_BEFORE_SPLIT: usize = 3;

/// Choose cut timestamps that partition the recording into chunks no longer
/// than `max_duration`, preferring cuts at strong punctuation boundaries.
///
/// Greedy forward scan: each iteration searches the window
/// `(current_start, current_start + max_duration]` for the best punctuation
/// boundary — sentence endings outrank clause breaks, and among equal ranks
/// the latest boundary wins. When the window contains no eligible boundary,
/// the cut falls back to exactly `max_duration` past the current start.
///
/// The returned points are strictly increasing and every value is below the
/// total duration (the end of the last cue).
pub fn select_split_points(timed: &[TimedText], max_duration: f64) -> Result<Vec<f64>> {
    if max_duration <= 0.0 {
        bail!("max duration must be positive, got {max_duration}");
    }

    let total_duration = transcript_duration(timed);
    if total_duration <= 0.0 {
        return Ok(Vec::new());
    }

    // Cues with no text or a non-positive end carry no usable timing signal.
    let word_timings: Vec<&TimedText> = timed
        .iter()
        .filter(|t| !t.text.trim().is_empty() && t.end > 0.0)
        .collect();

    if word_timings.is_empty() {
        return Ok(Vec::new());
    }

    let mut split_points = Vec::new();
    let mut current_start = 0.0;

    while current_start < total_duration {
        let target_time = current_start + max_duration;

        let mut word_count = 0usize;
        let mut best: Option<(u8, f64)> = None;

        for word in &word_timings {
            if word.end <= current_start || word.end > target_time {
                continue;
            }

            word_count += word.text.split_whitespace().count();

            let priority = boundary_priority(&word.text, word_count);
            if priority == 0 {
                continue;
            }

            // Higher priority wins outright; a later boundary replaces an
            // earlier one of equal priority.
            match best {
                Some((p, _)) if priority < p => {}
                _ => best = Some((priority, word.end)),
            }
        }

        match best {
            Some((_, end)) if end > current_start => {
                // A boundary on the last cue's end would only produce an
                // empty trailing segment.
                if end < total_duration {
                    split_points.push(end);
                }
                current_start = end;
            }
            _ => {
                // Hard cut with no transcript justification.
                current_start += max_duration;
                if current_start < total_duration {
                    split_points.push(current_start);
                }
            }
        }
    }

    Ok(split_points)
}

/// Rank a candidate boundary by its trailing punctuation: 3 for sentence
/// endings, 2 for clause breaks, 0 otherwise or when too few words precede it.
fn boundary_priority(text: &str, words_so_far: usize) -> u8 {
    if words_so_far < MIN_WORDS_BEFORE_SPLIT {
        return 0;
    }
    match text.chars().last() {
        Some('.' | '?' | '!') => 3,
        Some(',' | ';') => 2,
        _ => 0,
    }
}
