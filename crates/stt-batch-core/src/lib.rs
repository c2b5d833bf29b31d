pub mod batch;
pub mod config;
pub mod keywords;
pub mod output;
pub mod provider;
pub mod verbose;

pub use batch::{BatchSummary, BatchTranscriber, FailurePolicy, FileEvent};
pub use config::{Config, ConfigError, REQUIRED_KEYS};
pub use keywords::extract_keywords;
pub use output::{output_path, save_json, to_pretty_json};
pub use provider::{RecognitionOptions, RecognizeRequest, SpeechRecognizer, WatsonClient};
pub use verbose::set_verbose;
