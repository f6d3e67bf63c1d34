//! Error types for the curl-style request layer.
//!
//! # Design
//! Every failure is fail-fast. Argument problems (`ConflictingAlias`,
//! `IncompatibleType`, `UnknownEngine`) are raised before any file or network
//! I/O happens. Filesystem and transport errors are wrapped transparently so
//! the caller sees the underlying error unchanged.

/// Errors returned by the normalizers, the request builder and the engines.
#[derive(Debug, thiserror::Error)]
pub enum CurlError {
    /// Both the short and the long form of one option were supplied.
    #[error("options '{short}' and '{long}' are aliases, only one of them can be used")]
    ConflictingAlias {
        short: &'static str,
        long: &'static str,
    },

    /// A header, form or credential value has the wrong shape or type.
    #[error("incompatible type: {0}")]
    IncompatibleType(String),

    /// No engine is registered under the requested name.
    #[error("unknown engine `{0}`")]
    UnknownEngine(String),

    /// The prepared request could not be turned into a wire request
    /// (invalid header name, unparsable URL or proxy).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Opening or reading an upload file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The backend HTTP client failed (DNS, refused connection, timeout...).
    #[error(transparent)]
    Transport(#[from] ureq::Error),

    /// The response body is not valid JSON for the requested type.
    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CurlError {
    pub(crate) fn incompatible(msg: impl Into<String>) -> Self {
        CurlError::IncompatibleType(msg.into())
    }
}
