use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::{
    config::Config,
    domain::TailReader,
    errors::{WebTailError, WebTailResult},
    models::{TailQuery, TailRequest, TailResponse, TailResult},
    service::{resolve_file, resolve_seek_request, resolve_tail_request},
};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    reader: Arc<dyn TailReader>,
}

impl AppState {
    pub fn new(config: Config, reader: Arc<dyn TailReader>) -> Self {
        Self {
            config: Arc::new(config),
            reader,
        }
    }
}

/// Build the HTTP router
///
/// `/` serves the polling page, `/seek`, `/tail` and `/linecount` read the
/// file and anything else is a 404. A panic inside a handler becomes a 500
/// for that request only.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/seek", get(seek))
        .route("/tail", get(tail))
        .route("/linecount", get(linecount))
        .fallback(not_found)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

fn log_rejected(route: &str, query: &TailQuery, err: &WebTailError) {
    warn!(
        route,
        filename = ?query.filename,
        offset = ?query.offset,
        limit = ?query.limit,
        lines = ?query.lines,
        error_type = err.error_type(),
        data = %err.details().unwrap_or(&serde_json::Value::Null),
        "{}",
        err
    );
}

fn log_failed(route: &str, request: &TailRequest, err: &WebTailError) {
    error!(
        route,
        filename = %request.path().display(),
        offset = request.offset(),
        limit = ?request.limit(),
        error_type = err.error_type(),
        "{}",
        err
    );
}

fn log_engine_failure(route: &str, path: &Path, err: &WebTailError) {
    error!(
        route,
        filename = %path.display(),
        error_type = err.error_type(),
        "{}",
        err
    );
}

/// Unwrap the query extractor, reporting a rejection like any other bad parameter
fn accept_query(
    route: &str,
    query: Result<Query<TailQuery>, QueryRejection>,
) -> WebTailResult<TailQuery> {
    query.map(|Query(query)| query).map_err(|rejection| {
        let err = WebTailError::ValidationError {
            message: "malformed query string".to_string(),
            data: serde_json::json!({"error": rejection.body_text()}),
        };
        log_rejected(route, &TailQuery::default(), &err);
        err
    })
}

async fn tail(
    State(state): State<AppState>,
    query: Result<Query<TailQuery>, QueryRejection>,
) -> WebTailResult<TailResponse> {
    let query = accept_query("tail", query)?;
    let request = resolve_tail_request(&query, &state.config)
        .inspect_err(|e| log_rejected("tail", &query, e))?;

    let result = state
        .reader
        .read_tail(request.path(), *request.offset(), *request.limit())
        .await
        .inspect_err(|e| log_failed("tail", &request, e))?;

    info!(
        filename = %request.path().display(),
        offset = request.offset(),
        limit = ?request.limit(),
        lines = result.line_count(),
        bytes = result.next_offset.saturating_sub(*request.offset()),
        next_offset = result.next_offset,
        "tail served"
    );

    Ok(TailResponse(result))
}

/// Find where the last `lines` complete lines begin
///
/// Answers with an empty body and the offset in `X-Seek-Offset`, so a client
/// can start polling near the end of the file like `tail` does.
async fn seek(
    State(state): State<AppState>,
    query: Result<Query<TailQuery>, QueryRejection>,
) -> WebTailResult<TailResponse> {
    let query = accept_query("seek", query)?;
    let (path, lines) = resolve_seek_request(&query, &state.config)
        .inspect_err(|e| log_rejected("seek", &query, e))?;

    let offset = state
        .reader
        .seek_last_lines(&path, lines)
        .await
        .inspect_err(|e| log_engine_failure("seek", &path, e))?;

    info!(filename = %path.display(), lines, next_offset = offset, "seek served");

    Ok(TailResponse(TailResult::empty(offset)))
}

async fn linecount(
    State(state): State<AppState>,
    query: Result<Query<TailQuery>, QueryRejection>,
) -> WebTailResult<impl IntoResponse> {
    let query = accept_query("linecount", query)?;
    let path =
        resolve_file(&query, &state.config).inspect_err(|e| log_rejected("linecount", &query, e))?;

    let count = state
        .reader
        .count_lines(&path)
        .await
        .inspect_err(|e| log_engine_failure("linecount", &path, e))?;

    info!(filename = %path.display(), lines = count, "linecount served");

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        count.to_string(),
    ))
}
