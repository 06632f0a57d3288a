use async_trait::async_trait;
use std::io::SeekFrom;
use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncSeekExt, BufReader};

use crate::domain::tail_reader::TailReader;
use crate::errors::{WebTailError, WebTailResult};
use crate::models::TailResult;

const COUNT_CHUNK_SIZE: usize = 64 * 1024;
const SEEK_CHUNK_SIZE: u64 = 64 * 1024;

/// Byte-offset tail engine over the local filesystem
///
/// Each call stats the file, seeks straight to the caller's offset and reads
/// forward line by line, so the cost of a poll is proportional to what was
/// appended since the last one rather than to the file size. The file handle
/// lives only for the duration of a call and is dropped on every exit path.
pub struct TailReaderService;

impl TailReaderService {
    /// Create a new instance of TailReaderService
    pub fn new() -> Self {
        Self
    }
}

impl Default for TailReaderService {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(path: &Path) -> WebTailError {
    WebTailError::NotFound {
        path: path.display().to_string(),
    }
}

fn io_error(path: &Path, source: std::io::Error) -> WebTailError {
    WebTailError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Current size of a regular file, without reading it
async fn file_size(path: &Path) -> WebTailResult<u64> {
    let metadata = fs::metadata(path).await.map_err(|_| not_found(path))?;
    if !metadata.is_file() {
        return Err(not_found(path));
    }
    Ok(metadata.len())
}

#[async_trait]
impl TailReader for TailReaderService {
    async fn read_tail(
        &self,
        path: &Path,
        offset: u64,
        limit: Option<usize>,
    ) -> WebTailResult<TailResult> {
        let size = file_size(path).await?;
        // Nothing new, or the file shrank below the cursor: resume at the current size.
        if size <= offset {
            return Ok(TailResult::empty(size));
        }

        let mut file = File::open(path).await.map_err(|_| not_found(path))?;
        file.seek(SeekFrom::Start(offset))
            .await
            .map_err(|e| io_error(path, e))?;

        let limit = limit.filter(|&n| n > 0);
        let mut reader = BufReader::new(file);
        let mut lines = Vec::new();
        let mut next_offset = offset;
        let mut buf = Vec::new();

        loop {
            if limit.is_some_and(|n| lines.len() >= n) {
                break;
            }

            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|e| io_error(path, e))?;

            // EOF, or a trailing line the writer has not finished yet.
            if read == 0 || buf.last() != Some(&b'\n') {
                break;
            }

            next_offset += read as u64;
            lines.push(String::from_utf8_lossy(&buf).into_owned());
        }

        Ok(TailResult { lines, next_offset })
    }

    async fn count_lines(&self, path: &Path) -> WebTailResult<u64> {
        file_size(path).await?;

        let mut file = File::open(path).await.map_err(|_| not_found(path))?;
        let mut chunk = vec![0u8; COUNT_CHUNK_SIZE];
        let mut count = 0u64;

        loop {
            let read = file
                .read(&mut chunk)
                .await
                .map_err(|e| io_error(path, e))?;
            if read == 0 {
                break;
            }
            count += chunk[..read].iter().filter(|&&b| b == b'\n').count() as u64;
        }

        Ok(count)
    }

    async fn seek_last_lines(&self, path: &Path, lines: usize) -> WebTailResult<u64> {
        let size = file_size(path).await?;
        if lines == 0 || size == 0 {
            return Ok(0);
        }

        let mut file = File::open(path).await.map_err(|_| not_found(path))?;
        let mut chunk = Vec::new();
        let mut newlines = 0usize;
        let mut end = size;

        // Walk backwards; the line start we want sits just past newline number `lines + 1`.
        while end > 0 {
            let start = end.saturating_sub(SEEK_CHUNK_SIZE);
            chunk.resize((end - start) as usize, 0);
            file.seek(SeekFrom::Start(start))
                .await
                .map_err(|e| io_error(path, e))?;
            file.read_exact(&mut chunk)
                .await
                .map_err(|e| io_error(path, e))?;

            for (i, _) in chunk.iter().enumerate().rev().filter(|&(_, &b)| b == b'\n') {
                newlines += 1;
                if newlines > lines {
                    return Ok(start + i as u64 + 1);
                }
            }
            end = start;
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(content)
            .expect("Failed to write test content");
        temp_file.flush().expect("Failed to flush test content");
        temp_file
    }

    fn append(file: &mut NamedTempFile, content: &[u8]) {
        file.write_all(content).expect("Failed to append");
        file.flush().expect("Failed to flush");
    }

    #[tokio::test]
    async fn test_read_all_complete_lines() {
        let service = TailReaderService::new();
        let file = create_test_file(b"line1\nline2\nline3\n");

        let result = service.read_tail(file.path(), 0, None).await.unwrap();
        assert_eq!(result.lines, vec!["line1\n", "line2\n", "line3\n"]);
        assert_eq!(result.next_offset, 18);
    }

    #[tokio::test]
    async fn test_incomplete_final_line_excluded_until_terminated() {
        let service = TailReaderService::new();
        let mut file = create_test_file(b"a\nb\nc");

        let result = service.read_tail(file.path(), 0, None).await.unwrap();
        assert_eq!(result.lines, vec!["a\n", "b\n"]);
        assert_eq!(result.next_offset, 4);

        append(&mut file, b"\n");
        let result = service.read_tail(file.path(), 4, None).await.unwrap();
        assert_eq!(result.lines, vec!["c\n"]);
        assert_eq!(result.next_offset, 6);
    }

    #[tokio::test]
    async fn test_limit_enforced() {
        let service = TailReaderService::new();
        let file = create_test_file("x\n".repeat(10).as_bytes());

        let result = service.read_tail(file.path(), 0, Some(3)).await.unwrap();
        assert_eq!(result.line_count(), 3);
        assert_eq!(result.next_offset, 6);

        let rest = service
            .read_tail(file.path(), result.next_offset, Some(3))
            .await
            .unwrap();
        assert_eq!(rest.line_count(), 3);
        assert_eq!(rest.next_offset, 12);
    }

    #[tokio::test]
    async fn test_zero_limit_is_unbounded() {
        let service = TailReaderService::new();
        let file = create_test_file("x\n".repeat(10).as_bytes());

        let result = service.read_tail(file.path(), 0, Some(0)).await.unwrap();
        assert_eq!(result.line_count(), 10);
        assert_eq!(result.next_offset, 20);
    }

    #[tokio::test]
    async fn test_offset_beyond_end_of_file() {
        let service = TailReaderService::new();
        let file = create_test_file(b"abcd\n");

        let result = service.read_tail(file.path(), 100, None).await.unwrap();
        assert!(result.lines.is_empty());
        assert_eq!(result.next_offset, 5);
    }

    #[tokio::test]
    async fn test_empty_file() {
        let service = TailReaderService::new();
        let file = create_test_file(b"");

        let result = service.read_tail(file.path(), 0, None).await.unwrap();
        assert_eq!(result, TailResult::empty(0));
    }

    #[tokio::test]
    async fn test_only_incomplete_line_keeps_offset() {
        let service = TailReaderService::new();
        let file = create_test_file(b"done\npartial");

        let result = service.read_tail(file.path(), 5, None).await.unwrap();
        assert!(result.lines.is_empty());
        assert_eq!(result.next_offset, 5);
    }

    #[tokio::test]
    async fn test_idempotent_without_mutation() {
        let service = TailReaderService::new();
        let file = create_test_file(b"one\ntwo\nthree\nfour");

        let first = service.read_tail(file.path(), 4, Some(2)).await.unwrap();
        let second = service.read_tail(file.path(), 4, Some(2)).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_polling_has_no_duplicates_or_gaps() {
        let service = TailReaderService::new();
        let mut file = create_test_file(b"");
        let mut offset = 0;
        let mut seen = Vec::new();

        for chunk in ["l1\nl2", "\nl3\n", "", "l4\nl5\nl6\nl"] {
            append(&mut file, chunk.as_bytes());
            let result = service.read_tail(file.path(), offset, Some(2)).await.unwrap();
            assert!(result.next_offset >= offset);
            let consumed: usize = result.lines.iter().map(String::len).sum();
            assert_eq!(result.next_offset, offset + consumed as u64);
            offset = result.next_offset;
            seen.extend(result.lines);
        }

        // Drain whatever the limit left behind.
        let result = service.read_tail(file.path(), offset, None).await.unwrap();
        seen.extend(result.lines);

        assert_eq!(seen, vec!["l1\n", "l2\n", "l3\n", "l4\n", "l5\n", "l6\n"]);
    }

    #[tokio::test]
    async fn test_truncated_file_resumes_at_current_size() {
        let service = TailReaderService::new();
        let file = create_test_file(b"short\n");

        let result = service.read_tail(file.path(), 4096, None).await.unwrap();
        assert_eq!(result.next_offset, 6);

        let result = service
            .read_tail(file.path(), result.next_offset, None)
            .await
            .unwrap();
        assert!(result.lines.is_empty());
    }

    #[tokio::test]
    async fn test_offset_counts_raw_bytes_for_invalid_utf8() {
        let service = TailReaderService::new();
        let file = create_test_file(b"\xffbad\nok\n");

        let result = service.read_tail(file.path(), 0, None).await.unwrap();
        assert_eq!(result.line_count(), 2);
        assert_eq!(result.next_offset, 8);
    }

    #[tokio::test]
    async fn test_read_nonexistent_file() {
        let service = TailReaderService::new();

        let result = service.read_tail(Path::new("/no/such/file"), 0, None).await;
        assert!(matches!(result, Err(WebTailError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_directory_is_not_found() {
        let service = TailReaderService::new();
        let dir = tempfile::TempDir::new().unwrap();

        let result = service.read_tail(dir.path(), 0, None).await;
        assert!(matches!(result, Err(WebTailError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_seek_last_lines() {
        let service = TailReaderService::new();
        let file = create_test_file(b"a\nb\nc\n");

        assert_eq!(service.seek_last_lines(file.path(), 2).await.unwrap(), 2);
        assert_eq!(service.seek_last_lines(file.path(), 3).await.unwrap(), 0);
        assert_eq!(service.seek_last_lines(file.path(), 10).await.unwrap(), 0);
        assert_eq!(service.seek_last_lines(file.path(), 0).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seek_last_lines_skips_incomplete_line() {
        let service = TailReaderService::new();
        let file = create_test_file(b"a\nb\nc");

        let offset = service.seek_last_lines(file.path(), 1).await.unwrap();
        assert_eq!(offset, 2);

        let result = service.read_tail(file.path(), offset, None).await.unwrap();
        assert_eq!(result.lines, vec!["b\n"]);
    }

    #[tokio::test]
    async fn test_seek_last_lines_across_chunks() {
        let service = TailReaderService::new();
        let content: String = (0..20_000).map(|i| format!("line{}\n", i)).collect();
        let file = create_test_file(content.as_bytes());

        let offset = service.seek_last_lines(file.path(), 1000).await.unwrap();
        let result = service.read_tail(file.path(), offset, None).await.unwrap();
        assert_eq!(result.line_count(), 1000);
        assert_eq!(result.lines[0], "line19000\n");
        assert_eq!(result.next_offset, content.len() as u64);
    }

    #[tokio::test]
    async fn test_seek_last_lines_missing_file() {
        let service = TailReaderService::new();

        let result = service.seek_last_lines(Path::new("/no/such/file"), 10).await;
        assert!(matches!(result, Err(WebTailError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_count_lines() {
        let service = TailReaderService::new();
        let file = create_test_file(b"a\nb\nc");

        assert_eq!(service.count_lines(file.path()).await.unwrap(), 2);

        let empty = create_test_file(b"");
        assert_eq!(service.count_lines(empty.path()).await.unwrap(), 0);

        let result = service.count_lines(Path::new("/no/such/file")).await;
        assert!(matches!(result, Err(WebTailError::NotFound { .. })));
    }
}
