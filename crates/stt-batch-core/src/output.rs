//! JSON transcript files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

/// Path of the transcript for `audio_file` inside `output_dir`.
///
/// The last extension is replaced with `.json`: `clip_01.mp3` becomes
/// `clip_01.json`, `clip` becomes `clip.json`.
pub fn output_path(output_dir: &Path, audio_file: &Path) -> PathBuf {
    let stem = audio_file
        .file_stem()
        .unwrap_or_else(|| audio_file.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// Render a result as 2-space indented JSON, non-ASCII left unescaped
pub fn to_pretty_json(result: &Value) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize transcription result")
}

/// Write a result to `path`, replacing any existing file
pub fn save_json(result: &Value, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
