// Error taxonomy for the discovery pipeline.
//
// The pipeline never retries: every variant aborts the current run. Request
// and transport failures are kept apart so the operator can tell a bad token
// from a flaky network.

use thiserror::Error;

/// VK's error code for "one of the parameters specified was missing or invalid".
pub const INVALID_PARAMETER_CODE: i64 = 100;

#[derive(Debug, Error)]
pub enum VkError {
    /// Missing or invalid local configuration, detected before any network call.
    #[error("{0}")]
    Configuration(String),

    /// The API explicitly rejected the call (bad token, malformed parameters).
    #[error("VK API rejected the request (code {code}): {message}")]
    Request { code: i64, message: String },

    /// The call never produced a usable HTTP response.
    #[error("Network error reaching VK API: {0}")]
    Transport(String),

    /// The response arrived but its payload did not have the expected shape.
    #[error("Unexpected VK API response: {0}")]
    Decode(String),
}

impl VkError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        VkError::Request {
            code: INVALID_PARAMETER_CODE,
            message: message.into(),
        }
    }

    pub fn is_request(&self) -> bool {
        matches!(self, VkError::Request { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, VkError::Transport(_))
    }
}

impl From<reqwest::Error> for VkError {
    fn from(err: reqwest::Error) -> Self {
        VkError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for VkError {
    fn from(err: serde_json::Error) -> Self {
        VkError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VkError>;
