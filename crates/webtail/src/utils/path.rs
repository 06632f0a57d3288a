use std::path::{Path, PathBuf};

use tokio::fs;

use crate::errors::{WebTailError, WebTailResult};

/// Expand home directory (~) in path
///
/// Converts paths starting with ~ to the user's home directory
pub fn expand_home(path: &str) -> String {
    if path.starts_with('~')
        && let Some(home) = dirs::home_dir()
    {
        return path.replacen('~', &home.to_string_lossy(), 1);
    }
    path.to_string()
}

/// Normalize path by resolving `.` and `..` components lexically
pub fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .fold(PathBuf::new(), |mut result, component| {
            match component {
                std::path::Component::ParentDir => {
                    result.pop();
                }
                std::path::Component::CurDir => {}
                _ => {
                    result.push(component);
                }
            }
            result
        })
}

/// Turn a client-supplied `filename` parameter into a path to tail
pub fn resolve_request_path(filename: &str) -> PathBuf {
    PathBuf::from(expand_home(filename))
}

/// Resolve the file bound at startup to an absolute path
///
/// Existing files are canonicalized. A file that does not exist yet is kept
/// as a normalized absolute path, since the writer may create it later.
pub async fn resolve_fixed_file(file: &Path) -> WebTailResult<PathBuf> {
    let expanded = PathBuf::from(expand_home(&file.to_string_lossy()));
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map_err(|e| WebTailError::InvalidConfiguration {
                message: format!("Failed to get current directory: {}", e),
            })?
            .join(expanded)
    };

    match fs::canonicalize(&absolute).await {
        Ok(canonical) => {
            let metadata = fs::metadata(&canonical).await.map_err(|e| {
                WebTailError::InvalidConfiguration {
                    message: format!("Cannot stat {}: {}", canonical.display(), e),
                }
            })?;
            if metadata.is_dir() {
                return Err(WebTailError::InvalidConfiguration {
                    message: format!("{} is a directory, not a file", canonical.display()),
                });
            }
            Ok(canonical)
        }
        Err(_) => {
            let normalized = normalize_path(&absolute);
            tracing::warn!(
                file = %normalized.display(),
                "File to tail does not exist yet; polls will fail until it is created"
            );
            Ok(normalized)
        }
    }
}
