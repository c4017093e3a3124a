//! Typed TVmaze request failures.

/// Root cause of a failed TVmaze request.
///
/// The client wraps this in `anyhow::Error`; callers that need to tell the
/// failure classes apart recover it with `downcast_ref`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum TvMazeError {
    /// The request never produced a response (connect, DNS, timeout, body read).
    Transport {
        /// Request path relative to the base URL.
        path: String,
        /// Underlying transport error text.
        message: String,
    },
    /// The upstream answered with a non-2xx status.
    Status {
        /// Request path relative to the base URL.
        path: String,
        /// HTTP status code.
        status: u16,
    },
    /// The upstream kept answering HTTP 429 after all retries.
    RateLimited {
        /// Request path relative to the base URL.
        path: String,
        /// Number of retries performed.
        retries: u32,
    },
    /// The response body was not the expected JSON shape.
    Decode {
        /// Request path relative to the base URL.
        path: String,
        /// Decoder error text.
        message: String,
    },
}

impl std::fmt::Display for TvMazeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { path, message } => {
                write!(f, "TVmaze request failed: {path}: {message}")
            }
            Self::Status { path, status } => {
                write!(f, "TVmaze API error (HTTP {status}): {path}")
            }
            Self::RateLimited { path, retries } => {
                write!(
                    f,
                    "TVmaze API rate limit exceeded after {retries} retries: {path}"
                )
            }
            Self::Decode { path, message } => {
                write!(f, "failed to decode TVmaze response: {path}: {message}")
            }
        }
    }
}

impl std::error::Error for TvMazeError {}
