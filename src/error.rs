use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The local socket tables could not be read. Fatal for the whole scan.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot read socket table {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed entry in {path} line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// A ruleset failed to load or validate.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("cannot read policy {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid policy document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("rule `{rule}` has an invalid pattern: {source}")]
    Pattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule `{rule}`: {reason}")]
    Invalid { rule: String, reason: String },

    #[error("duplicate rule name `{0}`")]
    Duplicate(String),
}

/// The server's first flight could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HelloError {
    #[error("response truncated while reading {0}")]
    Truncated(&'static str),

    #[error("expected ServerHello, got handshake type {0}")]
    UnexpectedHandshake(u8),

    #[error("record too large ({0} bytes)")]
    Oversized(usize),

    #[error("not a TLS response (leading bytes {0})")]
    NotTls(String),
}
