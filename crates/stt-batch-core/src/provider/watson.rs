//! IBM Watson Speech to Text provider
//!
//! Sends each recording to the synchronous `/v1/recognize` endpoint of a
//! service instance. Audio travels as the raw request body, recognition
//! options as query parameters.
//!
//! ## Authentication
//!
//! Requests carry an IAM bearer token obtained from the instance API key, see
//! [`IamAuthenticator`].

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use super::{IamAuthenticator, RecognizeRequest, SpeechRecognizer};

/// Watson Speech to Text client bound to one service instance
#[derive(Debug)]
pub struct WatsonClient {
    http: reqwest::blocking::Client,
    service_url: String,
    authenticator: IamAuthenticator,
}

impl WatsonClient {
    /// Build a client for the instance at `service_url`.
    ///
    /// `timeout` of `None` waits indefinitely for each response. Nothing is
    /// sent until the first [`SpeechRecognizer::recognize`] call.
    pub fn new(api_key: &str, service_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::from_parts(
            http,
            service_url,
            IamAuthenticator::new(api_key),
        ))
    }

    pub(crate) fn from_parts(
        http: reqwest::blocking::Client,
        service_url: &str,
        authenticator: IamAuthenticator,
    ) -> Self {
        Self {
            http,
            service_url: service_url.to_string(),
            authenticator,
        }
    }
}

impl SpeechRecognizer for WatsonClient {
    fn name(&self) -> &'static str {
        "watson"
    }

    fn recognize(&self, request: RecognizeRequest<'_>) -> Result<Value> {
        let api_url = build_recognize_url(&self.service_url)?;
        let token = self.authenticator.token(&self.http)?;
        let options = request.options;

        crate::verbose!(
            "Uploading {} ({:.1} KB) to {}",
            request.filename,
            request.audio_data.len() as f64 / 1024.0,
            api_url
        );

        let response = self
            .http
            .post(&api_url)
            .query(&options.query_pairs())
            .header(CONTENT_TYPE, options.content_type.as_str())
            .header(ACCEPT, "application/json")
            .bearer_auth(token)
            .body(request.audio_data)
            .send()
            .with_context(|| format!("Failed to send request for {}", request.filename))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("API error ({status}): {error_text}");
        }

        let text = response.text().context("Failed to get response text")?;
        serde_json::from_str(&text).context("Failed to parse API response")
    }
}

/// Build the recognize endpoint from the instance URL
fn build_recognize_url(service_url: &str) -> Result<String> {
    let trimmed = service_url.trim();
    if trimmed.is_empty() {
        anyhow::bail!("Speech to Text service URL not configured (set api_url in the env file)");
    }

    let after_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid service URL: must start with http:// or https://\nGot: {trimmed}"
            )
        })?;
    if after_scheme.is_empty() || after_scheme.starts_with('/') {
        anyhow::bail!("Invalid service URL: missing host\nGot: {trimmed}");
    }

    let base = trimmed.trim_end_matches('/');
    Ok(format!("{base}/v1/recognize"))
}
