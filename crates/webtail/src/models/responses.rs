use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

/// Header carrying the offset the client should send on its next poll
pub const SEEK_OFFSET_HEADER: &str = "x-seek-offset";

/// Lines read from a file and the byte offset to resume from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TailResult {
    /// Complete lines, each including its trailing newline
    pub lines: Vec<String>,
    /// Offset just past the last returned line
    pub next_offset: u64,
}

impl TailResult {
    /// An empty result that resumes at `next_offset`
    pub fn empty(next_offset: u64) -> Self {
        Self {
            lines: Vec::new(),
            next_offset,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The lines joined into a single response body
    pub fn text(&self) -> String {
        self.lines.concat()
    }
}

/// HTTP response for a successful `/tail` poll
///
/// The body is the raw line text; the resume offset travels in
/// `X-Seek-Offset` so the body never carries control data.
#[derive(Debug)]
pub struct TailResponse(pub TailResult);

impl IntoResponse for TailResponse {
    fn into_response(self) -> Response {
        let next_offset = HeaderValue::from(self.0.next_offset);
        (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                ),
                (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
                (
                    header::HeaderName::from_static(SEEK_OFFSET_HEADER),
                    next_offset,
                ),
            ],
            self.0.text(),
        )
            .into_response()
    }
}
