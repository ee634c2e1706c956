use hyper::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("TLS error: {0}")]
    Tls(String),
    #[error("HTTP status {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("Network timeout after {0:?}")]
    Timeout(std::time::Duration),
    #[error("Network error: {0}")]
    Network(String),
    /// The 200 body is not JSON at all.
    #[error("Invalid JSON body: {0}")]
    Decode(String),
    /// The 200 body is JSON, but not an object.
    #[error("JSON parse error: {0}")]
    Json(String),
    #[error("Invalid request: {0}")]
    Request(String),
    #[error("Check task failed: {0}")]
    Join(String),
}

/// Coarse classification of a [`CheckError`], used to pick the log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The server answered with something other than 200.
    Http,
    /// The request never completed (connect, TLS, timeout, body read) or
    /// its body could not be decoded as JSON.
    Transport,
    Unexpected,
}

impl CheckError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CheckError::Http { .. } => FailureKind::Http,
            CheckError::Timeout(_)
            | CheckError::Network(_)
            | CheckError::Tls(_)
            | CheckError::Decode(_) => FailureKind::Transport,
            CheckError::Config(_)
            | CheckError::Json(_)
            | CheckError::Request(_)
            | CheckError::Join(_) => FailureKind::Unexpected,
        }
    }
}

/// Render an error with its whole `source()` chain, `outer: inner: root`.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let msg = cause.to_string();
        if !out.ends_with(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        source = cause.source();
    }
    out
}
