use std::path::PathBuf;

use derive_getters::Getters;
use serde::Deserialize;

/// Raw query parameters of a `/tail`, `/seek` or `/linecount` request
///
/// Values are kept as strings so malformed numbers surface as validation
/// errors with context instead of extractor rejections.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TailQuery {
    /// File to tail, ignored when the server is bound to a fixed file
    pub filename: Option<String>,
    /// Byte offset to resume from
    pub offset: Option<String>,
    /// Maximum number of lines to return, `0` for unbounded
    pub limit: Option<String>,
    /// Lines of history to seek back from the end (`/seek` only)
    pub lines: Option<String>,
}

/// A validated tail request ready for the tail engine
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TailRequest {
    /// File to read
    path: PathBuf,
    /// Byte position to start reading at
    offset: u64,
    /// Maximum number of lines, `None` for unbounded
    limit: Option<usize>,
}

impl TailRequest {
    pub fn new(path: PathBuf, offset: u64, limit: Option<usize>) -> Self {
        Self {
            path,
            offset,
            limit,
        }
    }
}
