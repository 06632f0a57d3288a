use std::path::PathBuf;

use crate::{
    config::Config,
    errors::{WebTailError, WebTailResult},
    models::{TailQuery, TailRequest},
    utils::path::resolve_request_path,
};

pub trait Validate {
    type Output;

    fn validate(&self) -> WebTailResult<Self::Output>;
}

/// Numeric parameters of a poll, parsed but before defaults are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollNumbers {
    pub offset: u64,
    pub limit: Option<usize>,
    pub lines: Option<usize>,
}

impl Validate for TailQuery {
    type Output = PollNumbers;

    fn validate(&self) -> WebTailResult<PollNumbers> {
        Ok(PollNumbers {
            offset: parse_number("offset", self.offset.as_deref())?.unwrap_or(0),
            limit: parse_number("limit", self.limit.as_deref())?,
            lines: parse_number("lines", self.lines.as_deref())?,
        })
    }
}

/// Treat an empty query value the same as an absent one
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: Option<&str>) -> WebTailResult<Option<T>> {
    match non_empty(raw) {
        None => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| WebTailError::ValidationError {
                message: format!("{} must be a non-negative integer", name),
                data: serde_json::json!({"parameter": name, "value": value}),
            }),
    }
}

/// Pick the file a poll reads: the server's fixed file wins over `filename`
pub fn resolve_file(query: &TailQuery, config: &Config) -> WebTailResult<PathBuf> {
    if let Some(fixed) = &config.fixed_file {
        return Ok(fixed.clone());
    }

    non_empty(query.filename.as_deref())
        .map(resolve_request_path)
        .ok_or_else(|| WebTailError::ValidationError {
            message: "filename is required".to_string(),
            data: serde_json::json!({"parameter": "filename", "value": null}),
        })
}

/// Build a tail request from raw query parameters
///
/// An explicit `limit` applies to every poll, with `0` meaning unbounded.
/// Without one, the first poll (offset 0) is capped at the configured
/// default so an initial page load fetches bounded history; later polls
/// only fetch new content and are unbounded.
pub fn resolve_tail_request(query: &TailQuery, config: &Config) -> WebTailResult<TailRequest> {
    let PollNumbers { offset, limit, .. } = query.validate()?;
    let path = resolve_file(query, config)?;

    let limit = match limit {
        Some(0) => None,
        Some(limit) => Some(limit),
        None if offset == 0 => Some(config.default_limit),
        None => None,
    };

    Ok(TailRequest::new(path, offset, limit))
}

/// Resolve the file and line count of a `/seek` request
///
/// `lines` defaults to the configured first-poll limit; `0` seeks to the
/// start of the file.
pub fn resolve_seek_request(query: &TailQuery, config: &Config) -> WebTailResult<(PathBuf, usize)> {
    let PollNumbers { lines, .. } = query.validate()?;
    let path = resolve_file(query, config)?;

    Ok((path, lines.unwrap_or(config.default_limit)))
}
