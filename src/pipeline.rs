use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    archive,
    cli::{ConcatCmd, SplitCmd, TranscriptFormat},
    config::Config,
    media::{FfmpegEngine, TrackConcatenator, TrackSlicer},
    model::{transcript_duration, SegmentDescriptor, TimedText},
    splitter::{materialize, select_split_points},
    transcript::{self, time::format_srt_timestamp},
};

#[derive(Debug, Serialize)]
struct Manifest {
    original_file: String,
    total_segments: usize,
    max_duration: f64,
    segments: Vec<ManifestSegment>,
    full_transcript: String,
}

#[derive(Debug, Serialize)]
struct ManifestSegment {
    filename: Option<String>,
    index: usize,
    start: f64,
    end: f64,
    duration: f64,
    text: String,
}

pub fn run_split(cmd: SplitCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("split", transcript = cmd.transcript.as_str());
    let _g = span.enter();

    let max_duration = cmd.max_duration.unwrap_or(cfg.split.max_duration_secs);
    validate_max_duration(max_duration, cfg)?;

    let format = cmd
        .from
        .unwrap_or_else(|| infer_format_from_path_or_dash(&cmd.transcript));
    tracing::info!(?format, max_duration, "input format selected");

    let raw = read_input_to_string(&cmd.transcript)?;
    tracing::info!(bytes = raw.len(), "read transcript");

    let timed = transcript::parse(&raw, format)?;
    if timed.is_empty() {
        return Err(anyhow!("no usable transcript cues in input"));
    }
    log_cue_summary(&timed, cfg);

    let engine = FfmpegEngine::new(&cfg.output.bitrate);

    // The transcript usually stops a little short of the recording; the
    // probed track length is the authoritative end bound when audio is given.
    let total_duration = match &cmd.audio {
        Some(audio) => {
            let probed = engine.probe_duration(audio)?;
            tracing::info!(
                probed,
                transcript_end = transcript_duration(&timed),
                "probed audio duration"
            );
            probed
        }
        None => transcript_duration(&timed),
    };

    // A transcript that overruns the actual track would otherwise place cut
    // points past the final boundary.
    let split_points: Vec<f64> = select_split_points(&timed, max_duration)?
        .into_iter()
        .filter(|p| *p < total_duration)
        .collect();
    tracing::info!(count = split_points.len(), "split points selected");

    let segments = materialize(total_duration, &split_points, &timed);
    tracing::info!(segments = segments.len(), "segments materialized");

    let out_dir = derive_output_dir(&cmd)?;
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed creating output dir: {}", out_dir.display()))?;

    let mut manifest_segments = Vec::with_capacity(segments.len());
    for segment in &segments {
        let filename = match &cmd.audio {
            Some(audio) => {
                let name = format!("segment_{:03}.{}", segment.index, cfg.output.audio_format);
                engine.slice(audio, segment.start, segment.end, &out_dir.join(&name))?;
                tracing::info!(
                    index = segment.index,
                    start = %format_srt_timestamp(segment.start),
                    end = %format_srt_timestamp(segment.end),
                    file = name.as_str(),
                    "sliced segment"
                );
                Some(name)
            }
            None => None,
        };

        if cfg.output.write_transcripts {
            let txt_name = format!("segment_{:03}.txt", segment.index);
            fs::write(out_dir.join(&txt_name), &segment.text)
                .with_context(|| format!("failed writing transcript: {txt_name}"))?;
        }

        manifest_segments.push(manifest_segment(segment, filename));
    }

    let manifest = Manifest {
        original_file: cmd
            .audio
            .as_deref()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| cmd.transcript.clone()),
        total_segments: segments.len(),
        max_duration,
        segments: manifest_segments,
        full_transcript: full_transcript(&timed),
    };

    let manifest_path = out_dir.join("metadata.json");
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("failed writing manifest: {}", manifest_path.display()))?;
    tracing::info!(path = %manifest_path.display(), "wrote manifest");

    if cmd.zip {
        let zip_path = out_dir.with_extension("zip");
        archive::package_dir(&out_dir, &zip_path, &cfg.output.audio_format)?;
        tracing::info!(path = %zip_path.display(), "packaged archive");
    }

    Ok(())
}

pub fn run_concat(cmd: ConcatCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("concat", inputs = cmd.inputs.len());
    let _g = span.enter();

    if cmd.inputs.is_empty() {
        return Err(anyhow!("no input files given"));
    }

    // Filename order keeps segment_001, segment_002, ... in sequence.
    let mut inputs = cmd.inputs.clone();
    inputs.sort();

    let engine = FfmpegEngine::new(&cfg.output.bitrate);
    engine.concatenate(&inputs, &cmd.output)?;
    tracing::info!(output = %cmd.output.display(), "concatenated tracks");

    Ok(())
}

fn validate_max_duration(max_duration: f64, cfg: &Config) -> Result<()> {
    let (lo, hi) = (
        cfg.split.min_duration_limit_secs,
        cfg.split.max_duration_limit_secs,
    );
    if !(lo..=hi).contains(&max_duration) {
        return Err(anyhow!(
            "max duration must be between {lo} and {hi} seconds, got {max_duration}"
        ));
    }
    Ok(())
}

fn infer_format_from_path_or_dash(input: &str) -> TranscriptFormat {
    if input == "-" {
        return TranscriptFormat::Srt;
    }
    match Path::new(input)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "json" => TranscriptFormat::Json,
        _ => TranscriptFormat::Srt,
    }
}

fn read_input_to_string(input: &str) -> Result<String> {
    if input == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed reading transcript: {input}"))
    }
}

fn derive_output_dir(cmd: &SplitCmd) -> Result<PathBuf> {
    if let Some(dir) = &cmd.out_dir {
        return Ok(dir.clone());
    }

    if cmd.transcript == "-" {
        return Err(anyhow!("--out-dir required when reading from stdin"));
    }

    let p = Path::new(&cmd.transcript);
    let stem = p
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("bad transcript filename"))?;
    let parent = p.parent().unwrap_or_else(|| Path::new("."));
    Ok(parent.join(format!("{stem}_segments")))
}

fn manifest_segment(segment: &SegmentDescriptor, filename: Option<String>) -> ManifestSegment {
    ManifestSegment {
        filename,
        index: segment.index,
        start: segment.start,
        end: segment.end,
        duration: segment.duration,
        text: segment.text.clone(),
    }
}

fn full_transcript(timed: &[TimedText]) -> String {
    timed
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn log_cue_summary(timed: &[TimedText], cfg: &Config) {
    tracing::info!(
        cues = timed.len(),
        duration_secs = transcript_duration(timed),
        "transcript summary"
    );

    if tracing::enabled!(tracing::Level::DEBUG) {
        let n = cfg.logging.debug_cue_samples.min(timed.len());
        for (i, t) in timed.iter().take(n).enumerate() {
            tracing::debug!(
                idx = i,
                start = t.start,
                end = t.end,
                chars = t.text.chars().count(),
                "cue sample"
            );
        }
    }
}
