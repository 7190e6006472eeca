use crate::model::{SegmentDescriptor, TimedText};

/// Turn cut timestamps into the final segment descriptors: one per
/// consecutive boundary pair over `[0, total_duration]`, each carrying the
/// transcript text whose timing overlaps its range.
///
/// The overlap test is inclusive on both ends, so a cue exactly touching a
/// cut point is attributed to both neighboring segments. That duplication is
/// long-standing behavior downstream consumers rely on; see DESIGN.md before
/// changing it to a half-open test.
pub fn materialize(
    total_duration: f64,
    split_points: &[f64],
    timed: &[TimedText],
) -> Vec<SegmentDescriptor> {
    if timed.is_empty() {
        return Vec::new();
    }

    let mut boundaries = Vec::with_capacity(split_points.len() + 2);
    boundaries.push(0.0);
    boundaries.extend_from_slice(split_points);
    boundaries.push(total_duration);

    let mut segments = Vec::with_capacity(boundaries.len() - 1);

    for (i, pair) in boundaries.windows(2).enumerate() {
        let (start, end) = (pair[0], pair[1]);

        let text = timed
            .iter()
            .filter(|t| t.end >= start && t.start <= end)
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        segments.push(SegmentDescriptor {
            index: i + 1,
            start,
            end,
            duration: end - start,
            text,
        });
    }

    segments
}
