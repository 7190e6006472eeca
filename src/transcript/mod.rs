pub mod json;
pub mod srt;
pub mod time;

use anyhow::{Context, Result};

use crate::{cli::TranscriptFormat, model::TimedText};

/// Normalize a raw transcript string into timed cues.
pub fn parse(raw: &str, fmt: TranscriptFormat) -> Result<Vec<TimedText>> {
    match fmt {
        TranscriptFormat::Srt => Ok(srt::parse_srt(raw)),
        TranscriptFormat::Json => {
            json::parse_json(raw).context("failed parsing input as transcript JSON")
        }
    }
}
