use std::cell::RefCell;
use std::fs;
use std::path::Path;

use anyhow::{Result, bail};
use serde_json::{Value, json};
use stt_batch_core::{
    BatchTranscriber, FailurePolicy, FileEvent, RecognitionOptions, RecognizeRequest,
    SpeechRecognizer,
};
use tempfile::TempDir;

/// Recognizer that echoes the request and records every call
#[derive(Default)]
struct FakeRecognizer {
    calls: RefCell<Vec<String>>,
    fail_on: Option<&'static str>,
    fail_all: bool,
}

impl FakeRecognizer {
    fn failing_on(filename: &'static str) -> Self {
        Self {
            fail_on: Some(filename),
            ..Default::default()
        }
    }

    fn always_failing() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl SpeechRecognizer for FakeRecognizer {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn recognize(&self, request: RecognizeRequest<'_>) -> Result<Value> {
        self.calls.borrow_mut().push(request.filename.clone());

        if self.fail_all || self.fail_on == Some(request.filename.as_str()) {
            bail!("connection reset by peer");
        }

        Ok(json!({
            "results": [{
                "alternatives": [{
                    "transcript": format!("transcripción de {}", request.filename),
                    "confidence": 0.9
                }],
                "final": true
            }],
            "audio_bytes": request.audio_data.len(),
            "keywords": request.options.keywords,
            "result_index": 0
        }))
    }
}

struct Workspace {
    _root: TempDir,
    audios: std::path::PathBuf,
    json: std::path::PathBuf,
}

fn workspace(files: &[&str]) -> Workspace {
    let root = TempDir::new().unwrap();
    let audios = root.path().join("audios");
    let json = root.path().join("json");
    fs::create_dir_all(&audios).unwrap();
    fs::create_dir_all(&json).unwrap();
    for name in files {
        fs::write(audios.join(name), format!("mp3 bytes of {name}")).unwrap();
    }
    Workspace {
        _root: root,
        audios,
        json,
    }
}

fn json_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn options() -> RecognitionOptions {
    RecognitionOptions::new(
        Some("custom-1".into()),
        vec!["saldo".into(), "factura".into()],
    )
}

#[test]
fn test_transcribes_regular_files_and_skips_directories() {
    let ws = workspace(&["clip_01.mp3", "clip_02.mp3"]);
    fs::create_dir(ws.audios.join("archive")).unwrap();
    let recognizer = FakeRecognizer::default();
    let options = options();

    let mut saved = Vec::new();
    let mut skipped = Vec::new();
    let summary = BatchTranscriber::new(&recognizer, &options)
        .run(&ws.audios, &ws.json, |event| match event {
            FileEvent::Saved { output, .. } => saved.push(output.to_path_buf()),
            FileEvent::Skipped { path } => skipped.push(path.to_path_buf()),
            FileEvent::Failed { .. } => panic!("no file should fail"),
        })
        .unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 1);
    assert!(!summary.has_failures());
    assert_eq!(json_files(&ws.json), vec!["clip_01.json", "clip_02.json"]);
    assert_eq!(saved.len(), 2);
    assert_eq!(skipped, vec![ws.audios.join("archive")]);
    assert_eq!(recognizer.call_count(), 2);
}

#[test]
fn test_saved_file_matches_result() {
    let ws = workspace(&["llamada.mp3"]);
    let recognizer = FakeRecognizer::default();
    let options = options();

    let mut results = Vec::new();
    BatchTranscriber::new(&recognizer, &options)
        .run(&ws.audios, &ws.json, |event| {
            if let FileEvent::Saved { result, .. } = event {
                results.push(result.clone());
            }
        })
        .unwrap();

    let text = fs::read_to_string(ws.json.join("llamada.json")).unwrap();
    let on_disk: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(on_disk, results[0]);
    assert_eq!(on_disk["keywords"], json!(["saldo", "factura"]));
    assert!(text.contains("transcripción de llamada.mp3"));
}

#[test]
fn test_first_failure_aborts_batch() {
    let ws = workspace(&["a.mp3", "b.mp3", "c.mp3"]);
    let recognizer = FakeRecognizer::always_failing();
    let options = options();

    let mut events = 0;
    let err = BatchTranscriber::new(&recognizer, &options)
        .run(&ws.audios, &ws.json, |_| events += 1)
        .unwrap_err();

    assert_eq!(recognizer.call_count(), 1);
    assert_eq!(events, 0);
    assert!(json_files(&ws.json).is_empty());
    assert!(format!("{err:#}").contains("connection reset by peer"));
}

#[test]
fn test_continue_policy_isolates_failures() {
    let ws = workspace(&["a.mp3", "b.mp3", "c.mp3"]);
    let recognizer = FakeRecognizer::failing_on("b.mp3");
    let options = options();

    let mut failed = Vec::new();
    let summary = BatchTranscriber::new(&recognizer, &options)
        .with_policy(FailurePolicy::Continue)
        .run(&ws.audios, &ws.json, |event| {
            if let FileEvent::Failed { audio, .. } = event {
                failed.push(audio.to_path_buf());
            }
        })
        .unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 1);
    assert!(summary.has_failures());
    assert_eq!(failed, vec![ws.audios.join("b.mp3")]);
    assert_eq!(json_files(&ws.json), vec!["a.json", "c.json"]);
    assert_eq!(recognizer.call_count(), 3);
}

#[test]
fn test_creates_missing_output_directory() {
    let ws = workspace(&["clip"]);
    let output = ws.json.join("nested");
    let recognizer = FakeRecognizer::default();
    let options = options();

    BatchTranscriber::new(&recognizer, &options)
        .run(&ws.audios, &output, |_| {})
        .unwrap();

    assert_eq!(json_files(&output), vec!["clip.json"]);
}

#[test]
fn test_missing_input_directory_fails() {
    let ws = workspace(&[]);
    let recognizer = FakeRecognizer::default();
    let options = options();

    let result = BatchTranscriber::new(&recognizer, &options).run(
        &ws.audios.join("missing"),
        &ws.json,
        |_| {},
    );

    assert!(result.is_err());
    assert_eq!(recognizer.call_count(), 0);
}
