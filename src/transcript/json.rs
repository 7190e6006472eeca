use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::{model::TimedText, transcript::srt};

/// Parse structured transcription output into timed cues.
///
/// Accepts the JSON shapes word-timestamp transcription services produce:
/// an object with `segments` (each optionally carrying word-level `words`),
/// an object with `chunks` (`timestamp: [start, end]` pairs), an object
/// whose `text` field holds embedded SRT, or a bare array of segments.
/// Timing and text fields may be absent or null on any record; they go
/// through the usual coercion instead of failing the parse.
pub fn parse_json(input: &str) -> Result<Vec<TimedText>> {
    let v: Value = serde_json::from_str(input)?;

    if let Some(segments) = v.get("segments") {
        return parse_segments(segments);
    }

    if let Some(chunks) = v.get("chunks") {
        return parse_chunks(chunks);
    }

    if let Some(text) = v.get("text").and_then(Value::as_str) {
        return Ok(srt::parse_srt(text));
    }

    if v.is_array() {
        return parse_segments(&v);
    }

    Err(anyhow!("unrecognized JSON transcript shape"))
}

fn parse_segments(v: &Value) -> Result<Vec<TimedText>> {
    let arr = v
        .as_array()
        .ok_or_else(|| anyhow!("segments must be an array"))?;
    let mut cues = Vec::with_capacity(arr.len());

    for item in arr {
        let Some(obj) = item.as_object() else {
            tracing::debug!("skipping non-object segment entry");
            continue;
        };

        // Word-level timestamps give more precise split points than
        // segment-level ones, so prefer them when present.
        if let Some(words) = obj.get("words").and_then(Value::as_array) {
            if !words.is_empty() {
                for word in words {
                    let Some(w) = word.as_object() else { continue };
                    cues.push(TimedText::from_parts(
                        value_to_secs(w.get("start")),
                        value_to_secs(w.get("end")),
                        w.get("word")
                            .or_else(|| w.get("text"))
                            .and_then(Value::as_str),
                    ));
                }
                continue;
            }
        }

        cues.push(TimedText::from_parts(
            value_to_secs(obj.get("start")),
            value_to_secs(obj.get("end")),
            obj.get("text").and_then(Value::as_str),
        ));
    }

    Ok(cues)
}

fn parse_chunks(v: &Value) -> Result<Vec<TimedText>> {
    let arr = v
        .as_array()
        .ok_or_else(|| anyhow!("chunks must be an array"))?;
    let mut cues = Vec::with_capacity(arr.len());

    for item in arr {
        let Some(obj) = item.as_object() else {
            tracing::debug!("skipping non-object chunk entry");
            continue;
        };

        let ts = obj.get("timestamp").and_then(Value::as_array);
        let start = ts.and_then(|t| value_to_secs(t.first()));
        let end = ts.and_then(|t| value_to_secs(t.get(1)));

        cues.push(TimedText::from_parts(
            start,
            end,
            obj.get("text").and_then(Value::as_str),
        ));
    }

    Ok(cues)
}

fn value_to_secs(v: Option<&Value>) -> Option<f64> {
    match v? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_shape() {
        let cues = parse_json(
            r#"{"segments":[{"start":0.0,"end":1.5,"text":" hello "},{"start":1.5,"end":3.0,"text":"world."}]}"#,
        )
        .unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "hello");
        assert_eq!(cues[1].end, 3.0);
    }

    #[test]
    fn word_level_timestamps_preferred() {
        let cues = parse_json(
            r#"{"segments":[{"start":0.0,"end":2.0,"text":"hi there","words":[
                {"start":0.0,"end":1.0,"word":"hi"},
                {"start":1.0,"end":2.0,"word":"there"}]}]}"#,
        )
        .unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "hi");
        assert_eq!(cues[1].start, 1.0);
    }

    #[test]
    fn chunks_shape() {
        let cues =
            parse_json(r#"{"chunks":[{"timestamp":[0.0,2.5],"text":"chunked"}]}"#).unwrap();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].end, 2.5);
        assert_eq!(cues[0].text, "chunked");
    }

    #[test]
    fn null_and_absent_fields_coerced() {
        let cues = parse_json(
            r#"{"segments":[{"start":null,"end":null,"text":null},{"end":4.0}]}"#,
        )
        .unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].start, 0.0);
        assert_eq!(cues[0].end, 0.0);
        assert_eq!(cues[0].text, "");
        assert_eq!(cues[1].start, 0.0);
        assert_eq!(cues[1].end, 4.0);
    }

    #[test]
    fn numeric_strings_accepted() {
        let cues =
            parse_json(r#"{"segments":[{"start":"1.5","end":"2.5","text":"strings"}]}"#).unwrap();
        assert_eq!(cues[0].start, 1.5);
        assert_eq!(cues[0].end, 2.5);
    }

    #[test]
    fn embedded_srt_text() {
        let cues = parse_json(
            r#"{"text":"1\n00:00:00,000 --> 00:00:02,500\nHello world.\n"}"#,
        )
        .unwrap();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].end, 2.5);
    }

    #[test]
    fn bare_array() {
        let cues = parse_json(r#"[{"start":0,"end":1,"text":"a"}]"#).unwrap();
        assert_eq!(cues.len(), 1);
    }

    #[test]
    fn unknown_shape_errors() {
        assert!(parse_json(r#"{"wat":true}"#).is_err());
        assert!(parse_json("42").is_err());
    }
}
