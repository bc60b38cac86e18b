//! Error types

use std::{io, path::PathBuf};

use thiserror::Error;

/// Tree construction and proof generation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    /// No identifier survived trimming and deduplication
    #[error("allow-list contains no valid identifiers")]
    EmptyInput,
    /// Proof requested for an identifier outside the allow-list
    #[error("identifier {identifier:?} is not in the allow-list")]
    NotFound {
        /// The trimmed identifier that was looked up
        identifier: String,
    },
}

/// Hex decoding errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    /// Wrong number of hex digits after the optional `0x` prefix
    #[error("expected {expected} hex digits, got {actual}")]
    InvalidLength {
        /// Required digit count
        expected: usize,
        /// Digit count found
        actual: usize,
    },
    /// Non-hex character in the input
    #[error("invalid hex encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Allow-list file ingestion errors
#[derive(Debug, Error)]
pub enum AllowlistError {
    /// The allow-list file could not be opened
    #[error("failed to open allow-list {}", path.display())]
    Open {
        /// Path that was opened
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// A row could not be read or decoded
    #[error("failed to read allow-list line {line}")]
    Read {
        /// 1-based line number
        line: u64,
        /// Underlying error
        source: csv::Error,
    },
    /// Every row was blank or a comment
    #[error("no valid identifiers found in allow-list")]
    NoIdentifiers,
}
