//! Error types for the feed client.

/// Errors that can occur when fetching the source documents.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or undecodable body).
    #[error("Request failed")]
    RequestFailed,
    /// The server returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The document URL could not be constructed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
