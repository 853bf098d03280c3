//! Failure taxonomy for a single lookup.

use thiserror::Error;

/// Shown under every error message.
pub const ERROR_HINT: &str = "Try: torvalds, sindresorhus, facebook";

/// Everything that can end a lookup attempt. None of these are retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// Input was empty after trimming; no request was made.
    #[error("no username given")]
    EmptyInput,

    #[error("profile request timed out")]
    Timeout,

    #[error("user {0:?} not found")]
    NotFound(String),

    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    #[error("HTTP {0}")]
    Http(u16),

    /// Connection failure, or a failed repository listing request.
    #[error("network error: {0}")]
    Transport(String),

    #[error("malformed response body: {0}")]
    Decode(String),
}

/// Coarse classification used to pick the rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    EmptyInput,
    Timeout,
    NotFound,
    RateLimited,
    HttpError,
    NetworkOrParseFailure,
}

impl LookupError {
    pub fn condition(&self) -> Condition {
        match self {
            LookupError::EmptyInput => Condition::EmptyInput,
            LookupError::Timeout => Condition::Timeout,
            LookupError::NotFound(_) => Condition::NotFound,
            LookupError::RateLimited => Condition::RateLimited,
            LookupError::Http(_) => Condition::HttpError,
            LookupError::Transport(_) | LookupError::Decode(_) => {
                Condition::NetworkOrParseFailure
            }
        }
    }

    /// Message for the error view. `Display` is the log text.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::EmptyInput => "Please enter a username".to_string(),
            LookupError::Timeout => "Request timeout. Please try again.".to_string(),
            LookupError::NotFound(username) => format!("User \"{}\" not found", username),
            LookupError::RateLimited => {
                "Rate limit exceeded. Wait a few minutes or try a different user.".to_string()
            }
            LookupError::Http(code) => format!("Something went wrong! (HTTP {})", code),
            LookupError::Transport(_) | LookupError::Decode(_) => {
                "Something went wrong!".to_string()
            }
        }
    }

    /// Maps a reqwest failure, keeping decode failures apart from transport ones.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout
        } else if err.is_decode() {
            LookupError::Decode(err.to_string())
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}
