//! IBM Cloud IAM authentication.
//!
//! Exchanges a long-lived API key for a bearer token. The exchange happens on
//! first use, so bad credentials surface on the first recognition request. The
//! token is kept for the rest of the run.

use std::fmt;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::header::ACCEPT;
use serde::Deserialize;

/// Public IBM Cloud IAM token endpoint
const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";

const API_KEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

#[derive(Deserialize)]
struct IamTokenResponse {
    access_token: String,
}

/// API key authenticator with a lazily fetched token
pub struct IamAuthenticator {
    api_key: String,
    url: String,
    token: OnceCell<String>,
}

impl IamAuthenticator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, DEFAULT_IAM_URL)
    }

    pub(crate) fn with_endpoint(api_key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            url: url.into(),
            token: OnceCell::new(),
        }
    }

    /// Bearer token, requested on the first call and cached afterwards
    pub fn token(&self, client: &reqwest::blocking::Client) -> Result<&str> {
        self.token
            .get_or_try_init(|| self.request_token(client))
            .map(String::as_str)
    }

    fn request_token(&self, client: &reqwest::blocking::Client) -> Result<String> {
        crate::verbose!("Requesting IAM token from {}", self.url);

        let response = client
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .form(&[
                ("grant_type", API_KEY_GRANT_TYPE),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .context("Failed to send IAM token request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("IAM authentication failed ({status}): {error_text}");
        }

        let resp: IamTokenResponse = response
            .json()
            .context("Failed to parse IAM token response")?;

        Ok(resp.access_token)
    }
}

impl fmt::Debug for IamAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamAuthenticator")
            .field("url", &self.url)
            .field("has_token", &self.token.get().is_some())
            .finish_non_exhaustive()
    }
}
