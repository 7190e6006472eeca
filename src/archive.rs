use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};
use zip::{write::FileOptions, ZipWriter};

/// Package a segment output directory into a zip archive: audio files under
/// `audio/`, per-segment transcripts under `transcripts/`, `metadata.json`
/// at the archive root.
pub fn package_dir(dir: &Path, zip_path: &Path, audio_ext: &str) -> Result<()> {
    let file = File::create(zip_path)
        .with_context(|| format!("failed creating archive: {}", zip_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut entries: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("failed reading output dir: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if !path.is_file() || path == zip_path {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();

        let arcname = if name == "metadata.json" {
            name.clone()
        } else if name.ends_with(&format!(".{audio_ext}")) {
            format!("audio/{name}")
        } else if name.ends_with(".txt") {
            format!("transcripts/{name}")
        } else {
            name.clone()
        };

        zip.start_file(arcname, options)?;
        let data = fs::read(&path)
            .with_context(|| format!("failed reading {} for archive", path.display()))?;
        zip.write_all(&data)?;
    }

    zip.finish()?;
    Ok(())
}
