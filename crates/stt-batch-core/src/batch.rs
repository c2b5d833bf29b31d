//! Folder transcription.
//!
//! Every regular file of the input directory is sent to the recognizer, one
//! at a time, in directory-listing order. Each result is written to the output
//! directory as `<stem>.json` before the next file is read.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::output::{output_path, save_json};
use crate::provider::{RecognitionOptions, RecognizeRequest, SpeechRecognizer};

/// What to do when one file fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the batch at the first failure
    #[default]
    Abort,
    /// Report the failure and move on to the next file
    Continue,
}

/// Progress notification for one directory entry
#[derive(Debug)]
pub enum FileEvent<'a> {
    Saved {
        audio: &'a Path,
        output: &'a Path,
        result: &'a Value,
    },
    Failed {
        audio: &'a Path,
        error: &'a anyhow::Error,
    },
    Skipped {
        path: &'a Path,
    },
}

/// Counts for a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Drives a recognizer over a folder of recordings
pub struct BatchTranscriber<'a, R: SpeechRecognizer + ?Sized> {
    recognizer: &'a R,
    options: &'a RecognitionOptions,
    policy: FailurePolicy,
}

impl<'a, R: SpeechRecognizer + ?Sized> BatchTranscriber<'a, R> {
    pub fn new(recognizer: &'a R, options: &'a RecognitionOptions) -> Self {
        Self {
            recognizer,
            options,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Transcribe every regular file of `input_dir` into `output_dir`.
    ///
    /// `on_event` is called once per directory entry. With
    /// [`FailurePolicy::Abort`] the first error is returned and no later file
    /// is attempted; files saved before it stay on disk.
    pub fn run<F>(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        mut on_event: F,
    ) -> Result<BatchSummary>
    where
        F: FnMut(FileEvent<'_>),
    {
        let entries = list_entries(input_dir)?;
        fs::create_dir_all(output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                output_dir.display()
            )
        })?;

        crate::verbose!(
            "Found {} entries in {} (recognizer: {})",
            entries.len(),
            input_dir.display(),
            self.recognizer.name()
        );

        let mut summary = BatchSummary::default();

        for path in entries {
            if !path.is_file() {
                summary.skipped += 1;
                on_event(FileEvent::Skipped { path: &path });
                continue;
            }

            match self.transcribe_file(&path, output_dir) {
                Ok((output, result)) => {
                    summary.processed += 1;
                    on_event(FileEvent::Saved {
                        audio: &path,
                        output: &output,
                        result: &result,
                    });
                }
                Err(error) => match self.policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::Continue => {
                        summary.failed += 1;
                        on_event(FileEvent::Failed {
                            audio: &path,
                            error: &error,
                        });
                    }
                },
            }
        }

        Ok(summary)
    }

    /// Recognize one file and save its result, returning the output path
    pub fn transcribe_file(
        &self,
        audio_path: &Path,
        output_dir: &Path,
    ) -> Result<(PathBuf, Value)> {
        let audio_data = fs::read(audio_path)
            .with_context(|| format!("Failed to read audio file {}", audio_path.display()))?;

        let filename = audio_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let result = self
            .recognizer
            .recognize(RecognizeRequest {
                audio_data,
                filename,
                options: self.options,
            })
            .with_context(|| format!("Failed to transcribe {}", audio_path.display()))?;

        let output = output_path(output_dir, audio_path);
        save_json(&result, &output)?;

        Ok((output, result))
    }
}

/// Snapshot of the directory's entries, in listing order
fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_dir = fs::read_dir(dir)
        .with_context(|| format!("Failed to read audio directory {}", dir.display()))?;

    read_dir
        .map(|entry| {
            entry
                .map(|entry| entry.path())
                .with_context(|| format!("Failed to list {}", dir.display()))
        })
        .collect()
}
