use thiserror::Error;

/// Errors that abort a sync run. Every stage returns one of these; nothing
/// is retried automatically except a single re-authentication on a rejected
/// token.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The source list could not be retrieved: unreachable host, timeout,
    /// or a non-success transport status.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The payload did not conform to the declared format, or zero valid
    /// entries survived extraction.
    #[error("parse failed: {0}")]
    Parse(String),

    /// Credentials were rejected, or the cached token was rejected and the
    /// re-authentication attempt failed too.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The gateway rejected a call for a non-auth reason. Status 0 marks a
    /// transport-level failure with no HTTP response.
    #[error("gateway call failed (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl SyncError {
    /// Maps a failed gateway request to an `Api` error, carrying the HTTP
    /// status when one was received.
    pub(crate) fn api_request(err: reqwest::Error) -> Self {
        SyncError::Api {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
