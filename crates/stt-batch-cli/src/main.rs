mod app;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use stt_batch_core::{
    BatchTranscriber, FailurePolicy, RecognitionOptions, WatsonClient, extract_keywords,
    set_verbose, verbose,
};

/// Transcribe a folder of recordings with IBM Watson Speech to Text
#[derive(Parser)]
#[command(name = "stt-batch", version)]
struct Cli {
    /// Env file with api_key, api_url, base_lang and custom_id
    env_file: PathBuf,

    /// Spreadsheet whose first column lists keyword hints
    keywords_file: PathBuf,

    /// Directory of audio recordings
    #[arg(long, default_value = "audios")]
    input_dir: PathBuf,

    /// Directory for the JSON transcripts
    #[arg(long, default_value = "json")]
    output_dir: PathBuf,

    /// Header rows to skip in the keyword spreadsheet
    #[arg(long, default_value_t = 1)]
    header_rows: usize,

    /// HTTP timeout per request in seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Keep going when a file fails and report a summary at the end
    #[arg(long)]
    keep_going: bool,

    /// Also print each transcript to stdout
    #[arg(long)]
    print: bool,

    /// Print diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_verbose(cli.verbose);

    let config = app::load_config(&cli.env_file);
    verbose!(
        "Loaded {} (base language: {})",
        cli.env_file.display(),
        config.base_lang
    );

    let client = WatsonClient::new(
        &config.api_key,
        &config.api_url,
        cli.timeout.map(std::time::Duration::from_secs),
    )?;
    let keywords = extract_keywords(&cli.keywords_file, cli.header_rows)?;
    let options = RecognitionOptions::new(Some(config.custom_id.clone()), keywords);

    let policy = if cli.keep_going {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Abort
    };

    let summary = BatchTranscriber::new(&client, &options)
        .with_policy(policy)
        .run(&cli.input_dir, &cli.output_dir, |event| {
            app::report(&event, cli.print)
        })?;

    if cli.keep_going {
        app::print_summary(&summary);
        if summary.has_failures() {
            process::exit(1);
        }
    }

    Ok(())
}
