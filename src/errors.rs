//! Typed error hierarchy for the Dubstage client.
//!
//! Two top-level enums cover the two failure surfaces:
//! - `ValidationError` — local input rejection, raised before any network call
//! - `TransportError` — failures from the two remote submission calls
//!
//! Both render to the human-readable strings that the presenter shows as the
//! single feedback surface.

use thiserror::Error;

/// Local validation failures. These never reach the network.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Please select a valid video file (mp4, mov, avi, mkv, etc.)")]
    UnsupportedFileType { filename: String },

    #[error("File name could not be read")]
    UnreadableFileName,

    #[error("Please enter a YouTube URL")]
    EmptyUrl,

    #[error("Please enter a valid YouTube URL")]
    NotAWatchUrl { url: String },
}

/// Failures from a single remote submission call.
///
/// Server errors carry the best-effort message extracted from the response
/// body (structured `message` field, falling back to raw body text, falling
/// back to `"Server error: <status>"`).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to read {path}: {source}")]
    InputRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected response from server")]
    UnexpectedResponse { body: String },
}
