//! Recognition parameters sent with every request.

/// Audio content type of the recordings
pub const DEFAULT_CONTENT_TYPE: &str = "audio/mp3";
/// Colombian Spanish telephony model
pub const DEFAULT_MODEL: &str = "es-CO_NarrowbandModel";
/// Confidence threshold for keyword spotting and word alternatives
pub const DEFAULT_THRESHOLD: f32 = 0.5;
/// Alternative transcripts requested per utterance
pub const DEFAULT_MAX_ALTERNATIVES: u32 = 3;
/// `inactivity_timeout` value that disables the service-side timeout
pub const NO_INACTIVITY_TIMEOUT: i32 = -1;

/// Parameters of a `/v1/recognize` call
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionOptions {
    pub content_type: String,
    pub model: String,
    pub customization_id: Option<String>,
    pub keywords: Vec<String>,
    pub keywords_threshold: f32,
    pub word_alternatives_threshold: f32,
    pub speaker_labels: bool,
    /// Seconds of silence before the service gives up (-1 = never)
    pub inactivity_timeout: i32,
    pub max_alternatives: u32,
}

impl RecognitionOptions {
    /// The fixed batch parameters, with the run's custom model and keywords
    pub fn new(customization_id: Option<String>, keywords: Vec<String>) -> Self {
        Self {
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            customization_id,
            keywords,
            keywords_threshold: DEFAULT_THRESHOLD,
            word_alternatives_threshold: DEFAULT_THRESHOLD,
            speaker_labels: true,
            inactivity_timeout: NO_INACTIVITY_TIMEOUT,
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
        }
    }

    /// Query string parameters for the request.
    ///
    /// Keywords and their threshold travel together: the service rejects a
    /// threshold without keywords, so both are left out for an empty list.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("model", self.model.clone())];

        if let Some(id) = &self.customization_id {
            pairs.push(("customization_id", id.clone()));
        }

        if !self.keywords.is_empty() {
            pairs.push(("keywords", self.keywords.join(",")));
            pairs.push(("keywords_threshold", self.keywords_threshold.to_string()));
        }

        pairs.extend([
            (
                "word_alternatives_threshold",
                self.word_alternatives_threshold.to_string(),
            ),
            ("speaker_labels", self.speaker_labels.to_string()),
            ("inactivity_timeout", self.inactivity_timeout.to_string()),
            ("max_alternatives", self.max_alternatives.to_string()),
        ]);

        pairs
    }
}
