use async_trait::async_trait;
use std::path::Path;

use crate::{errors::WebTailResult, models::TailResult};

/// Domain trait for incremental file tailing
///
/// Implementations hold no per-client state: the read cursor is passed in
/// and handed back on every call, so independent pollers never interfere.
#[async_trait]
pub trait TailReader: Send + Sync {
    /// Read the complete lines available from a byte offset onward
    ///
    /// # Arguments
    /// * `path` - The file to read
    /// * `offset` - Byte position to resume from; may lie past end-of-file
    /// * `limit` - Maximum number of lines, `None` for unbounded
    ///
    /// # Returns
    /// * `Ok(TailResult)` - The lines and the offset just past the last one
    /// * `Err(WebTailError::NotFound)` - If the file is missing or unreadable
    /// * `Err(WebTailError::Io)` - If reading fails after the file is opened
    async fn read_tail(
        &self,
        path: &Path,
        offset: u64,
        limit: Option<usize>,
    ) -> WebTailResult<TailResult>;

    /// Count the complete (newline-terminated) lines in a file
    async fn count_lines(&self, path: &Path) -> WebTailResult<u64>;

    /// Byte offset at which the last `lines` complete lines begin
    ///
    /// An unterminated trailing line is not counted. Returns `0` when the
    /// file holds no more than `lines` complete lines, or when `lines` is `0`.
    async fn seek_last_lines(&self, path: &Path, lines: usize) -> WebTailResult<u64>;
}
