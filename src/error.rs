use thiserror::Error;

// Error types for the tracking client
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Invalid tracking query: {0}")]
    Validation(String),

    // Raised for carrier-side rejections (hard faults and per-package
    // failures). The carrier's failure payload may itself be malformed, so
    // the message is optional rather than fabricated.
    #[error("Tracking request failed: {}", .message.as_deref().unwrap_or("no failure message supplied by carrier"))]
    Protocol { message: Option<String> },

    #[error("XML parse error: {0}")]
    Parse(String),

    #[error("Transport error: {0}")]
    Transport(String),
}
