use anyhow::{anyhow, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

/// Cuts one time range out of a track, re-encoding for sample-exact edges.
pub trait TrackSlicer {
    fn slice(&self, source: &Path, start: f64, end: f64, dest: &Path) -> Result<()>;
}

/// Joins tracks in the given order into a single output.
pub trait TrackConcatenator {
    fn concatenate(&self, sources: &[PathBuf], dest: &Path) -> Result<()>;
}

/// Media engine backed by the `ffmpeg` and `ffprobe` binaries.
pub struct FfmpegEngine {
    bitrate: String,
}

impl FfmpegEngine {
    pub fn new(bitrate: &str) -> Self {
        Self {
            bitrate: bitrate.to_string(),
        }
    }

    /// Track length in seconds, via ffprobe.
    pub fn probe_duration(&self, source: &Path) -> Result<f64> {
        let output = Command::new("ffprobe")
            .arg("-v")
            .arg("error")
            .arg("-show_entries")
            .arg("format=duration")
            .arg("-of")
            .arg("default=noprint_wrappers=1:nokey=1")
            .arg(source)
            .output()
            .context("failed to run ffprobe (is it installed?)")?;

        if !output.status.success() {
            return Err(anyhow!(
                "ffprobe failed on {}: {}",
                source.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .trim()
            .parse::<f64>()
            .with_context(|| format!("unparseable ffprobe duration: '{}'", stdout.trim()))
    }
}

impl TrackSlicer for FfmpegEngine {
    fn slice(&self, source: &Path, start: f64, end: f64, dest: &Path) -> Result<()> {
        // Stream copy would only cut at codec block boundaries; re-encoding
        // gives millisecond-accurate edges.
        let output = Command::new("ffmpeg")
            .arg("-y")
            .arg("-nostdin")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-ss")
            .arg(format!("{start:.3}"))
            .arg("-i")
            .arg(source)
            .arg("-t")
            .arg(format!("{:.3}", end - start))
            .arg("-vn")
            .arg("-b:a")
            .arg(&self.bitrate)
            .arg(dest)
            .output()
            .context("failed to run ffmpeg (is it installed?)")?;

        if !output.status.success() {
            return Err(anyhow!(
                "ffmpeg slice [{start:.3}, {end:.3}] failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        Ok(())
    }
}

impl TrackConcatenator for FfmpegEngine {
    fn concatenate(&self, sources: &[PathBuf], dest: &Path) -> Result<()> {
        if sources.is_empty() {
            return Err(anyhow!("nothing to concatenate"));
        }

        let list_path = dest.with_extension("concat.txt");
        let mut list = String::new();
        for source in sources {
            // Concat demuxer list syntax: single-quoted paths, embedded
            // quotes escaped as '\''.
            let escaped = source.to_string_lossy().replace('\'', "'\\''");
            list.push_str(&format!("file '{escaped}'\n"));
        }
        fs::write(&list_path, &list)
            .with_context(|| format!("failed writing concat list: {}", list_path.display()))?;

        let output = Command::new("ffmpeg")
            .arg("-y")
            .arg("-nostdin")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-f")
            .arg("concat")
            .arg("-safe")
            .arg("0")
            .arg("-i")
            .arg(&list_path)
            .arg("-c")
            .arg("copy")
            .arg(dest)
            .output()
            .context("failed to run ffmpeg (is it installed?)")?;

        let _ = fs::remove_file(&list_path);

        if !output.status.success() {
            return Err(anyhow!(
                "ffmpeg concat failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        Ok(())
    }
}
