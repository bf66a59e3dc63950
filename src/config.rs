use std::env;

use anyhow::{Context, Result};

use crate::pipeline::run::PipelineSettings;
use crate::vk::client::{DEFAULT_API_URL, DEFAULT_API_VERSION};
use crate::vk::rate_limiter::DEFAULT_REQUESTS_PER_SECOND;
use crate::vk::{VkClient, VkError};

/// Central configuration loaded from environment variables.
///
/// The access token only ever comes from the environment. The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// VK user access token (VK_ACCESS_TOKEN). Optional here so `reply`
    /// works without one; network commands call `require_access_token`.
    pub access_token: Option<String>,
    /// API endpoint (defaults to https://api.vk.com/method)
    pub api_url: String,
    pub api_version: String,
    /// Client-side request spacing (PAGESCOUT_REQUESTS_PER_SECOND)
    pub requests_per_second: f64,
    /// Comma-separated override of the search queries (PAGESCOUT_QUERIES)
    pub queries: Option<Vec<String>>,
    /// Comma-separated override of the spam stop words (PAGESCOUT_STOP_WORDS)
    pub stop_words: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let requests_per_second = match lookup("PAGESCOUT_REQUESTS_PER_SECOND") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("PAGESCOUT_REQUESTS_PER_SECOND is not a number: {raw}"))?,
            None => DEFAULT_REQUESTS_PER_SECOND,
        };

        Ok(Self {
            access_token: lookup("VK_ACCESS_TOKEN").filter(|t| !t.trim().is_empty()),
            api_url: lookup("VK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_version: lookup("VK_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            requests_per_second,
            queries: lookup("PAGESCOUT_QUERIES").map(|raw| split_list(&raw)),
            stop_words: lookup("PAGESCOUT_STOP_WORDS").map(|raw| split_list(&raw)),
        })
    }

    /// Check that an access token is configured.
    /// Call this before building a client or touching the network.
    pub fn require_access_token(&self) -> std::result::Result<&str, VkError> {
        self.access_token.as_deref().ok_or_else(|| {
            VkError::Configuration(
                "No access token in VK_ACCESS_TOKEN environment variable.\n\
                 Get one via VK's Implicit Flow (https://dev.vk.com/api/access-token/implicit-flow-user)\n\
                 and add it to your .env file."
                    .to_string(),
            )
        })
    }

    /// Build an authenticated client. Fails before any request if the
    /// token is missing.
    pub fn client(&self) -> std::result::Result<VkClient, VkError> {
        let token = self.require_access_token()?;
        VkClient::new(
            &self.api_url,
            &self.api_version,
            token,
            self.requests_per_second,
        )
    }

    /// Pipeline settings with any query or stop-word overrides applied.
    pub fn pipeline_settings(&self) -> PipelineSettings {
        let mut settings = PipelineSettings::default();
        if let Some(queries) = self.queries.as_ref().filter(|q| !q.is_empty()) {
            settings.queries = queries.clone();
        }
        if let Some(words) = self.stop_words.as_ref().filter(|w| !w.is_empty()) {
            settings.stop_words = words.clone();
        }
        settings
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
