//! Error types for the OMIM and UniProt clients.
//!
//! # Design
//! Validation failures are raised before the throttle or the network is
//! touched, so a caller never pays a rate-limit slot for a request that could
//! not succeed. Transport failures (DNS, refused connections, non-2xx
//! statuses) are passed through unchanged as the underlying `ureq::Error`.

use thiserror::Error;

/// Errors returned by the request builders and the executing client methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An endpoint-specific required parameter is absent.
    #[error("required parameter '{0}' is not specified")]
    MissingParameter(String),

    /// No `apiKey` parameter was supplied and the client has none configured.
    #[error("API key is not specified; OMIM requires it with every request (register at https://omim.org/api)")]
    MissingApiKey,

    /// A UniProt entry format was requested without an entry id.
    #[error("id must be defined when format is defined")]
    FormatWithoutId,

    #[error("unknown UniProt entry format: {0}")]
    UnknownFormat(String),

    #[error("unknown OMIM search target: {0}")]
    UnknownSearchTarget(String),

    /// Environment configuration could not be interpreted.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Network failure or non-2xx status, as reported by the HTTP layer.
    #[error(transparent)]
    Transport(#[from] ureq::Error),
}

impl ApiError {
    /// True for errors raised before any network activity.
    pub fn is_validation(&self) -> bool {
        !matches!(self, ApiError::Transport(_) | ApiError::Config(_))
    }
}
