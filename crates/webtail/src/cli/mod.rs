use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, LogFormat};
use crate::errors::{WebTailError, WebTailResult};
use crate::utils::path::resolve_fixed_file;

/// Web Tail Server
///
/// Serves the tail of a growing text file over HTTP. A browser page polls
/// `/tail` with a byte offset and receives only the complete lines written
/// since that offset, plus the offset to resume from in `X-Seek-Offset`.
///
/// ## Usage
/// ```bash
/// webtail /var/log/app.log --port 4411
/// ```
///
/// Without a FILE argument every poll must name its file with `?filename=`.
///
/// ## Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error), defaults to info
#[derive(Parser, Debug, Clone)]
#[command(name = "webtail")]
#[command(about = "An HTTP server that tails a growing text file for browser clients")]
#[command(version)]
#[command(
    long_about = "An HTTP server emulating `tail -f` for the browser. \nClients poll GET /tail?offset=N and receive new complete lines plus the next offset in the X-Seek-Offset header."
)]
pub struct Cli {
    /// File to tail on every request.
    ///
    /// When omitted, clients choose the file with the `filename` query parameter.
    #[arg(
        value_name = "FILE",
        help = "File to tail (overrides the filename query parameter)"
    )]
    pub file: Option<PathBuf>,

    /// Network interface address to bind
    #[arg(short, long, default_value = "0.0.0.0", value_name = "IP")]
    pub address: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 4411, value_name = "PORT")]
    pub port: u16,

    /// Maximum lines returned by a first poll (offset 0) that names no limit
    #[arg(long, default_value_t = 1000, value_name = "LINES")]
    pub default_limit: usize,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Convert parsed CLI arguments to configuration
    ///
    /// Resolving the fixed file may log a warning, so call this after
    /// logging is initialized.
    pub async fn into_config(self) -> WebTailResult<Config> {
        if self.default_limit == 0 {
            return Err(WebTailError::InvalidConfiguration {
                message: "--default-limit must be greater than zero".to_string(),
            });
        }

        let fixed_file = match self.file {
            Some(file) => Some(resolve_fixed_file(&file).await?),
            None => None,
        };

        Ok(Config {
            address: self.address,
            port: self.port,
            fixed_file,
            default_limit: self.default_limit,
            log_format: self.log_format,
        })
    }
}
