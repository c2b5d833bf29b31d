use std::path::Path;

use stt_batch_core::{BatchSummary, Config, ConfigError, FileEvent, to_pretty_json, verbose};

/// Load the env file, exiting with status 1 if it is unusable
pub fn load_config(env_file: &Path) -> Config {
    match Config::load(env_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, ConfigError::MissingValue { .. }) {
                eprintln!(
                    "\nThe env file must define non-empty values for: {}",
                    stt_batch_core::REQUIRED_KEYS.join(", ")
                );
            }
            std::process::exit(1);
        }
    }
}

/// Console output for one directory entry
pub fn report(event: &FileEvent<'_>, print_result: bool) {
    match event {
        FileEvent::Saved { output, result, .. } => {
            if print_result {
                match to_pretty_json(result) {
                    Ok(text) => println!("{text}"),
                    Err(e) => eprintln!("Error: {e:#}"),
                }
            }
            println!("'{}' was saved successfully", output.display());
        }
        FileEvent::Failed { audio, error } => {
            eprintln!("Error: {} failed: {error:#}", audio.display());
        }
        FileEvent::Skipped { path } => {
            verbose!("Skipping {} (not a regular file)", path.display());
        }
    }
}

pub fn print_summary(summary: &BatchSummary) {
    println!(
        "Processed {} file(s), {} failed, {} skipped",
        summary.processed, summary.failed, summary.skipped
    );
}
