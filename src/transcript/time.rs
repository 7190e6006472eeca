/// Convert SRT timestamp components to seconds.
pub fn hms_to_secs(h: u32, m: u32, s: u32, ms: u32) -> f64 {
    (h as f64) * 3600.0 + (m as f64) * 60.0 + (s as f64) + (ms as f64) / 1000.0
}

/// Format seconds as an SRT-style `HH:MM:SS,mmm` timestamp. Negative values
/// clamp to zero.
pub fn format_srt_timestamp(secs: f64) -> String {
    let total_ms = (secs.max(0.0) * 1000.0).round() as i64;

    let milli = total_ms % 1000;
    let total_seconds = total_ms / 1000;
    let sec = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let min = total_minutes % 60;
    let hour = total_minutes / 60;

    format!("{hour:02}:{min:02}:{sec:02},{milli:03}")
}
